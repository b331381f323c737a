/// Reading and validating config files
pub mod parser;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Valid range for `core.compression_level` (zstd levels).
pub const COMPRESSION_LEVELS: std::ops::RangeInclusive<i32> = 1..=22;

/// Every key accepted by [`Config::get`], [`Config::set`] and [`Config::unset`].
pub const KEYS: [&str; 4] = [
    "core.store_path",
    "core.compression_level",
    "tracking.follow_symlinks",
    "output.relative_paths",
];

/// User configuration, stored as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Store settings
    #[serde(default)]
    pub core: CoreConfig,

    /// Walk options
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Report rendering
    #[serde(default)]
    pub output: OutputConfig,
}

/// Store location and encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Directory holding the registry and snapshot files
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// zstd level for snapshot files
    #[serde(default = "default_compression_level")]
    pub compression_level: i32,
}

/// Options that affect how snapshots are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrackingConfig {
    /// Descend into symlinked directories while walking
    #[serde(default)]
    pub follow_symlinks: bool,
}

/// Report rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print report paths relative to the snapshot root
    #[serde(default = "default_relative_paths")]
    pub relative_paths: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            relative_paths: default_relative_paths(),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            compression_level: default_compression_level(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot read or parse the configuration file
    /// - Configuration file contains invalid TOML or out-of-range values
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        parser::parse_config_file(path)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let (section, name) = key.split_once('.')?;

        match (section, name) {
            ("core", "store_path") => Some(self.core.store_path.display().to_string()),
            ("core", "compression_level") => Some(self.core.compression_level.to_string()),
            ("tracking", "follow_symlinks") => Some(self.tracking.follow_symlinks.to_string()),
            ("output", "relative_paths") => Some(self.output.relative_paths.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key format is invalid (must be section.key)
    /// - The key is unknown
    /// - The value is invalid for the key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let (section, name) = key
            .split_once('.')
            .with_context(|| format!("Invalid configuration key: {key}"))?;

        match (section, name) {
            ("core", "store_path") => {
                if value.trim().is_empty() {
                    anyhow::bail!("Store path cannot be empty");
                }
                self.core.store_path = crate::utils::expand_tilde(Path::new(value))?;
            }
            ("core", "compression_level") => {
                let level: i32 = value
                    .parse()
                    .with_context(|| format!("Invalid compression level: {value}"))?;
                if !COMPRESSION_LEVELS.contains(&level) {
                    anyhow::bail!("Compression level must be between 1 and 22");
                }
                self.core.compression_level = level;
            }
            ("tracking", "follow_symlinks") => {
                self.tracking.follow_symlinks = value
                    .parse()
                    .with_context(|| format!("Invalid boolean: {value}"))?;
            }
            ("output", "relative_paths") => {
                self.output.relative_paths = value
                    .parse()
                    .with_context(|| format!("Invalid boolean: {value}"))?;
            }
            _ => anyhow::bail!("Unknown configuration key: {key}"),
        }
        Ok(())
    }

    /// Reset a configuration value to its default
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let defaults = Self::default();

        match key.split_once('.') {
            Some(("core", "store_path")) => self.core.store_path = defaults.core.store_path,
            Some(("core", "compression_level")) => {
                self.core.compression_level = defaults.core.compression_level;
            }
            Some(("tracking", "follow_symlinks")) => self.tracking = defaults.tracking,
            Some(("output", "relative_paths")) => self.output = defaults.output,
            _ => anyhow::bail!("Cannot unset configuration key: {key}"),
        }
        Ok(())
    }

    /// All keys with their current values, in [`KEYS`] order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}

/// Default location of the configuration file.
#[must_use]
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("dirtrack")
        .join("config.toml")
}

// Default functions for serde
fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("dirtrack")
}

const fn default_compression_level() -> i32 {
    3
}

const fn default_relative_paths() -> bool {
    true
}
