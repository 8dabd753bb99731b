use anyhow::Context;
use coilkit::{init_logging, run_job, CoilJobConfig, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    info!("coilkit {} (built {})", VERSION, BUILD_DATE);

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => CoilJobConfig::load_from_file(&path)
            .with_context(|| format!("failed to load job {}", path.display()))?,
        None => {
            info!("no job file given, running the default coil");
            CoilJobConfig::default()
        }
    };

    let output = run_job(&config)?;
    if config.gcode.output_path().is_none() {
        print!("{}", output.gcode);
    }

    Ok(())
}
