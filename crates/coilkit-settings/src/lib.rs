//! CoilKit Settings Crate
//!
//! Loads and saves coil jobs: the coil dimensions plus the G-code and
//! diagram output settings, stored as TOML or JSON.

pub mod config;
pub mod error;

pub use config::{CoilJobConfig, DiagramSettings, GcodeSettings};
pub use error::{SettingsError, SettingsResult};
