//! # Configuration Module
//!
//! Locates the library database and the optional configuration file, and
//! merges configured ordering defaults.
//!
//! ## Data Storage
//!
//! The library lives in the platform-standard data directory:
//! - Linux: `~/.local/share/dancerator/library.db`
//! - macOS: `~/Library/Application Support/dancerator/library.db`
//! - Windows: `%APPDATA%\dancerator\library.db`
//!
//! The configuration file is `dancerator/config.json` below the platform
//! configuration directory. Every key is optional:
//!
//! ```json
//! { "owner": "bob", "period": 12, "tempo_group_width": 10 }
//! ```

use crate::pipeline::{DEFAULT_PERIOD, DEFAULT_TEMPO_GROUP_WIDTH};
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "dancerator";

/// Account used when neither the command line nor the config names one
pub const DEFAULT_OWNER: &str = "local";

/// Returns the platform-appropriate data directory, creating it if needed.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The dancerator subdirectory cannot be created due to permissions
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Pass --db or set DANCERATOR_DB instead."
        )
    })?;

    let app_dir = data_dir.join(APP_DIR);
    fs::create_dir_all(&app_dir).with_context(|| {
        format!(
            "Failed to create Dancerator data directory at {}. Please check file permissions.",
            app_dir.display()
        )
    })?;

    Ok(app_dir)
}

/// Returns the default library database path.
///
/// # Errors
///
/// Fails like [`get_data_dir`].
pub fn get_db_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("library.db"))
}

/// Returns the default configuration file path. The file may not exist.
#[must_use]
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}

/// Contents of `config.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub owner: Option<String>,
    pub period: Option<i64>,
    pub tempo_group_width: Option<usize>,
}

impl FileConfig {
    /// Reads the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be read or cannot be
    /// parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}

/// Effective settings for one invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub db_path: PathBuf,
    pub owner: String,
    /// Unvalidated; checked when the pipeline runs
    pub period: i64,
    pub tempo_group_width: usize,
}

impl RuntimeConfig {
    /// Builds the settings from an explicit database path and config file,
    /// falling back to defaults for anything the file leaves out.
    ///
    /// An explicit `config_path` must exist. Without one, the platform
    /// config file is read only if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database location cannot be determined, the
    /// explicit config file is missing, or a config file is invalid.
    pub fn resolve(db_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self> {
        let file = match config_path {
            Some(path) => FileConfig::load(&path)?,
            None => match get_config_path() {
                Some(path) if path.exists() => FileConfig::load(&path)?,
                Some(path) => {
                    debug!("No config file at {}", path.display());
                    FileConfig::default()
                }
                None => FileConfig::default(),
            },
        };
        let db_path = match db_path {
            Some(path) => path,
            None => get_db_path()?,
        };
        Ok(Self::with_file_config(db_path, file))
    }

    /// Create configuration with explicit database path
    #[must_use]
    pub fn with_file_config(db_path: PathBuf, file: FileConfig) -> Self {
        Self {
            db_path,
            owner: file.owner.unwrap_or_else(|| DEFAULT_OWNER.to_string()),
            period: file
                .period
                .unwrap_or_else(|| i64::try_from(DEFAULT_PERIOD).unwrap_or(i64::MAX)),
            tempo_group_width: file.tempo_group_width.unwrap_or(DEFAULT_TEMPO_GROUP_WIDTH),
        }
    }
}
