//! Configuration module for qqwry-seek
//!
//! Handles loading and managing configuration from YAML files and environment variables.

use crate::database::source::DEFAULT_MMAP_WINDOW;
use crate::error::{Result, SeekError};
use crate::utils::path;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the database file path
pub const ENV_DB_PATH: &str = "QQWRY_SEEK_DB";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub global: GlobalConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Explicit database path, `~` expanded
    #[serde(default)]
    pub path: Option<String>,

    /// File name inside the data directory when no path is set
    #[serde(default = "default_database_file")]
    pub file: String,

    /// Memory-map the database instead of reading through a file handle
    #[serde(default = "default_true")]
    pub use_mmap: bool,

    /// Size of each memory-mapped window in bytes
    #[serde(default = "default_mmap_window")]
    pub mmap_window: u64,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub enable_colors: bool,

    /// Output in JSON format
    #[serde(default)]
    pub json: bool,
}

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Verbose logging
    #[serde(default)]
    pub verbose: bool,

    /// Custom config path
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl GlobalConfig {
    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

// Default value functions
fn default_database_file() -> String {
    "qqwry.dat".to_string()
}

fn default_mmap_window() -> u64 {
    DEFAULT_MMAP_WINDOW
}

fn default_true() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            file: default_database_file(),
            use_mmap: true,
            mmap_window: default_mmap_window(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            enable_colors: true,
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        path::ensure_dirs()?;

        let config_file = path::config_file()?;

        let mut config = if config_file.exists() {
            Self::load_from(&config_file)?
        } else {
            let config = Self::default();
            config.save(&config_file)?;
            config
        };
        config.global.config_path = Some(config_file);

        config.apply_env();

        Ok(config)
    }

    /// Read a YAML configuration file
    pub fn load_from(file: &Path) -> Result<Self> {
        let content = fs::read_to_string(file)
            .map_err(|e| SeekError::config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| SeekError::Yaml(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        if let Ok(val) = env::var(ENV_DB_PATH) {
            if !val.is_empty() {
                self.database.path = Some(val);
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| SeekError::Yaml(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, yaml)
            .map_err(|e| SeekError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Location of the QQwry database file
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(ref custom) = self.database.path {
            return Ok(path::expand_tilde(custom));
        }
        path::database_file(&self.database.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.database.file, "qqwry.dat");
        assert!(config.database.use_mmap);
        assert_eq!(config.database.mmap_window, DEFAULT_MMAP_WINDOW);
        assert!(config.output.enable_colors);
        assert!(!config.output.json);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("database"));
        assert!(yaml.contains("output"));

        let back = AppConfig::from_yaml(&yaml).unwrap();
        assert_eq!(back.database.file, config.database.file);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = AppConfig::from_yaml("database:\n  path: /srv/geo/qqwry.dat\n").unwrap();
        assert_eq!(config.database.path.as_deref(), Some("/srv/geo/qqwry.dat"));
        assert!(config.database.use_mmap);
        assert!(config.output.enable_colors);
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/srv/geo/qqwry.dat")
        );
    }

    #[test]
    fn test_verbose_from_yaml() {
        let config = AppConfig::from_yaml("global:\n  verbose: true\n").unwrap();
        assert!(config.global.verbose);
        assert_eq!(config.global.log_level(), "debug");
        assert_eq!(AppConfig::default().global.log_level(), "warn");
    }

    #[test]
    fn test_load_from_does_not_record_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.yaml");
        AppConfig::default().save(&file).unwrap();

        let loaded = AppConfig::load_from(&file).unwrap();
        assert!(loaded.global.config_path.is_none());
        assert!(!serde_yaml::to_string(&loaded).unwrap().contains("config_path"));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            AppConfig::from_yaml("database: [unclosed"),
            Err(SeekError::Yaml(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.yaml");
        let mut config = AppConfig::default();
        config.database.use_mmap = false;
        config.save(&file).unwrap();

        let loaded = AppConfig::load_from(&file).unwrap();
        assert!(!loaded.database.use_mmap);
    }
}
