use coilkit::{run_job, CoilJobConfig};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_default_job_returns_program() {
    let output = run_job(&CoilJobConfig::default()).unwrap();
    assert!(output.extents.max_x > 0.0);
    assert!(output.extents.max_y > 0.0);
    assert_eq!(output.gcode.matches("M10 O6.1").count(), 1);
    assert_eq!(output.gcode.matches("M10 O6.0").count(), 1);
}

#[test]
fn test_job_writes_both_outputs() {
    let dir = tempdir().unwrap();
    let gcode_path = dir.path().join("coil.nc");
    let tex_path = dir.path().join("coil.tex");

    let mut config = CoilJobConfig::default();
    config.gcode.output = gcode_path.to_string_lossy().into_owned();
    config.diagram.output = tex_path.to_string_lossy().into_owned();
    config.diagram.include_gcode = true;

    let output = run_job(&config).unwrap();
    assert_eq!(fs::read_to_string(&gcode_path).unwrap(), output.gcode);

    let tex = fs::read_to_string(&tex_path).unwrap();
    assert!(tex.contains("\\begin{tikzpicture}"));
    assert!(tex.contains(&output.gcode));
}

#[test]
fn test_invalid_job_fails_before_writing() {
    let dir = tempdir().unwrap();
    let gcode_path = dir.path().join("coil.nc");

    let mut config = CoilJobConfig::default();
    config.coil.cutter_diameter = 1.0;
    config.coil.corner_radius = 0.2;
    config.gcode.output = gcode_path.to_string_lossy().into_owned();

    assert!(run_job(&config).is_err());
    assert!(!gcode_path.exists());
}

#[test]
fn test_feed_is_applied() {
    let mut config = CoilJobConfig::default();
    config.gcode.feed = 30.0;
    let output = run_job(&config).unwrap();
    assert!(output.gcode.contains("F30.000"));
}
