//! Loading generation parameters from TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use delve_core::GenerationConfig;
use tracing::debug;

/// Reads a TOML file; keys it leaves out keep their defaults. The result is validated.
pub fn load_generation_config(path: &Path) -> Result<GenerationConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = parse_generation_config(&text)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    debug!(path = %path.display(), width = config.width, height = config.height, "loaded config");
    Ok(config)
}

pub fn parse_generation_config(text: &str) -> Result<GenerationConfig> {
    let config: GenerationConfig =
        toml::from_str(text).context("Failed to parse generation config TOML")?;
    config.validate()?;
    Ok(config)
}

/// Config from `path` if given, otherwise the defaults.
pub fn resolve_generation_config(path: Option<&Path>) -> Result<GenerationConfig> {
    match path {
        Some(path) => load_generation_config(path),
        None => Ok(GenerationConfig::default()),
    }
}
