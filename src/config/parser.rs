use super::{COMPRESSION_LEVELS, Config};
use crate::utils::expand_tilde;
use anyhow::{Context, Result};
use std::path::Path;

/// Read, parse and validate a configuration file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML or holds
/// out-of-range values
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
}

fn parse_config_str(content: &str) -> Result<Config> {
    let mut config: Config =
        toml::from_str(content).with_context(|| "Failed to parse TOML config")?;

    validate_config(&config)?;
    config.core.store_path = expand_tilde(&config.core.store_path)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    if !COMPRESSION_LEVELS.contains(&config.core.compression_level) {
        anyhow::bail!("Compression level must be between 1 and 22");
    }

    if config.core.store_path.as_os_str().is_empty() {
        anyhow::bail!("Store path cannot be empty");
    }

    Ok(())
}
