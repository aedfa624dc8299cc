pub mod config;
pub mod info;
pub mod rules;
pub mod samples;
pub mod scan;

use std::path::Path;

use anyhow::{Context, Result};
use eclipse_core::pipeline::config::EclipseConfig;

/// Load a TOML config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<EclipseConfig> {
    let Some(path) = path else {
        return Ok(EclipseConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    EclipseConfig::from_toml_str(&contents)
        .with_context(|| format!("Invalid config {}", path.display()))
}
