//! Where qqwry-seek keeps its config file and database
//!
//! Each directory is taken from the first non-empty override variable, then
//! from the platform location reported by `dirs` with `qqwry-seek` appended.

use crate::error::{Result, SeekError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "qqwry-seek";
const CONFIG_FILE: &str = "config.yaml";

/// Shared override for both directories
pub const ENV_HOME: &str = "QQWRY_SEEK_HOME";
pub const ENV_CONFIG_HOME: &str = "QQWRY_SEEK_CONFIG_HOME";
pub const ENV_DB_HOME: &str = "QQWRY_SEEK_DB_HOME";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    /// Holds `config.yaml`
    Config,
    /// Holds the database file
    Data,
}

impl AppDir {
    /// Override variables, most specific first
    fn overrides(self) -> [&'static str; 2] {
        match self {
            AppDir::Config => [ENV_CONFIG_HOME, ENV_HOME],
            AppDir::Data => [ENV_DB_HOME, ENV_HOME],
        }
    }

    fn platform_base(self) -> Option<PathBuf> {
        match self {
            AppDir::Config => dirs::config_dir(),
            AppDir::Data => dirs::data_dir(),
        }
    }

    /// Resolve against the process environment
    pub fn resolve(self) -> Result<PathBuf> {
        self.resolve_with(|name| env::var(name).ok())
    }

    /// Resolve with an explicit variable lookup
    pub fn resolve_with<F>(self, lookup: F) -> Result<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overridden = self
            .overrides()
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.is_empty());
        if let Some(value) = overridden {
            return Ok(expand_tilde(&value));
        }

        self.platform_base()
            .map(|base| base.join(APP_DIR))
            .ok_or_else(|| SeekError::config(format!("Cannot determine {:?} directory", self)))
    }
}

pub fn config_dir() -> Result<PathBuf> {
    AppDir::Config.resolve()
}

pub fn data_dir() -> Result<PathBuf> {
    AppDir::Data.resolve()
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Database `name` inside the data directory
pub fn database_file(name: &str) -> Result<PathBuf> {
    Ok(data_dir()?.join(name))
}

/// Create `path` and its parents; existing directories are left alone
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        SeekError::config(format!("Failed to create directory {}: {}", path.display(), e))
    })
}

pub fn ensure_dirs() -> Result<()> {
    for dir in [AppDir::Config, AppDir::Data] {
        ensure_dir(&dir.resolve()?)?;
    }
    Ok(())
}

/// Replace a leading `~` with the home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path {
        "~" => "",
        _ => match path.strip_prefix("~/") {
            Some(rest) => rest,
            None => return PathBuf::from(path),
        },
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}
