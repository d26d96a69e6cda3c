//! JSON-based application-config persistence.
//!
//! Reads and writes [`AppConfig`] to the platform-appropriate per-user
//! location:
//! - Windows:  `%APPDATA%\InputCast\inputcast.conf`
//! - Linux:    `$XDG_CONFIG_HOME/inputcast/inputcast.conf` (or `~/.config/…`)
//! - macOS:    `~/Library/Application Support/InputCast/inputcast.conf`
//!
//! The app config is owned by the service context for the process's
//! lifetime and replaced wholesale on load — it is never partially mutated
//! concurrently with a read.
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default…)]` use a fallback when absent from
//! the file, so the app works on first run (before a config file exists) and
//! when upgrading from an older file that is missing newer fields.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for app-config file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config JSON could not be parsed or serialized.
    #[error("failed to read or write config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sub-folder names under the data root. The web root nests the views and
/// media bundles served to browser clients.
pub const CONFIGURATIONS_FOLDER: &str = "Configurations";
pub const SCRIPTS_FOLDER: &str = "Scripts";
pub const WEB_FOLDER: &str = "Web";
pub const VIEWS_FOLDER: &str = "Views";
pub const MEDIA_FOLDER: &str = "Media";

const CONFIG_FILE_NAME: &str = "inputcast.conf";

/// Process-wide application configuration persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Root of all persisted library state. `None` until the user completes
    /// first-run setup.
    #[serde(default)]
    pub data_folder: Option<PathBuf>,
    /// IP address the HTTP listener binds to.
    #[serde(default = "default_ip")]
    pub last_ip: String,
    /// TCP port of the HTTP command API.
    #[serde(default = "default_port")]
    pub last_port: u16,
    /// UDP port the presence beacon broadcasts on.
    #[serde(default = "default_beacon_port")]
    pub beacon_port: u16,
    /// Identifier carried in every presence announcement so clients can tell
    /// multiple hosts apart.
    #[serde(default = "default_identifier")]
    pub broadcast_identifier: String,
    /// Set when startup found no usable data folder; the host then runs in
    /// first-run mode without a network listener.
    #[serde(default)]
    pub first_time_running: bool,
}

fn default_ip() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_beacon_port() -> u16 {
    8001
}
fn default_identifier() -> String {
    Uuid::new_v4().to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_folder: None,
            last_ip: default_ip(),
            last_port: default_port(),
            beacon_port: default_beacon_port(),
            broadcast_identifier: default_identifier(),
            first_time_running: false,
        }
    }
}

impl AppConfig {
    /// Resolved configuration root, when a data folder is set.
    pub fn config_folder(&self) -> Option<PathBuf> {
        self.data_folder.as_ref().map(|d| d.join(CONFIGURATIONS_FOLDER))
    }

    /// Resolved scripts root, when a data folder is set.
    pub fn scripts_folder(&self) -> Option<PathBuf> {
        self.data_folder.as_ref().map(|d| d.join(SCRIPTS_FOLDER))
    }

    /// Resolved static web root, when a data folder is set.
    pub fn web_root(&self) -> Option<PathBuf> {
        self.data_folder.as_ref().map(|d| d.join(WEB_FOLDER))
    }

    /// Resolved UI views root, when a data folder is set.
    pub fn views_root(&self) -> Option<PathBuf> {
        self.web_root().map(|w| w.join(VIEWS_FOLDER))
    }

    /// Resolved media root, when a data folder is set.
    pub fn media_root(&self) -> Option<PathBuf> {
        self.web_root().map(|w| w.join(MEDIA_FOLDER))
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads [`AppConfig`] from disk, returning `AppConfig::default()` if the
/// file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Json`] if the file is malformed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    let path = config_file_path()?;

    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Persists `config` to disk, creating the config directory if needed.
pub fn save_app_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_file_path()?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, content).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory including the `InputCast`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("InputCast"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("inputcast"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("InputCast")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
