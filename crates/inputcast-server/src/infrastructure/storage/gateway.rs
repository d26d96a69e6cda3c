//! File-backed implementation of the [`Storage`] trait.
//!
//! Layout under the data root:
//!
//! ```text
//! <data root>/
//!   Configurations/*.json     one JSON file per input configuration
//!   Scripts/*.script          one JSON descriptor per script
//!   Scripts/<source files>    referenced by descriptors, loaded separately
//!   Web/  Web/Views/  Web/Media/   static front-end roots
//! ```
//!
//! A [`FileStorage`] built from a config without a data folder still
//! constructs; every operation then reports [`StorageError::DataFolderMissing`]
//! (or yields nothing), which is what puts the orchestrator into first-run
//! mode.

use std::path::{Path, PathBuf};

use tracing::debug;

use inputcast_core::{InputConfiguration, Script};

use super::config::{
    AppConfig, CONFIGURATIONS_FOLDER, MEDIA_FOLDER, SCRIPTS_FOLDER, VIEWS_FOLDER, WEB_FOLDER,
};
use super::{Storage, StorageError};

/// File extension of configuration files.
const CONFIGURATION_EXTENSION: &str = "json";
/// File extension of script descriptors.
const SCRIPT_EXTENSION: &str = "script";

/// Resolved folder layout under one data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRoots {
    pub data: PathBuf,
    pub configurations: PathBuf,
    pub scripts: PathBuf,
    pub web: PathBuf,
    pub views: PathBuf,
    pub media: PathBuf,
}

impl StorageRoots {
    /// Derives the layout from `data` without touching the file system.
    pub fn new(data: impl Into<PathBuf>) -> Self {
        let data = data.into();
        let web = data.join(WEB_FOLDER);
        Self {
            configurations: data.join(CONFIGURATIONS_FOLDER),
            scripts: data.join(SCRIPTS_FOLDER),
            views: web.join(VIEWS_FOLDER),
            media: web.join(MEDIA_FOLDER),
            web,
            data,
        }
    }

    /// Derives the layout from an [`AppConfig`], when it has a data folder.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        config.data_folder.as_ref().map(Self::new)
    }
}

/// [`Storage`] implementation over the local file system.
pub struct FileStorage {
    roots: Option<StorageRoots>,
}

impl FileStorage {
    pub fn new(roots: StorageRoots) -> Self {
        Self { roots: Some(roots) }
    }

    /// Builds storage for `config`; unconfigured when no data folder is set.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            roots: StorageRoots::from_config(config),
        }
    }

    fn roots(&self) -> Result<&StorageRoots, StorageError> {
        self.roots.as_ref().ok_or(StorageError::DataFolderMissing)
    }

    /// Path of the artifact backing `config`: its recorded origin when it has
    /// one, else `<name>.json`. Only the final path component of either is
    /// honored, so a record can never address a file outside the
    /// configurations folder.
    fn configuration_path(
        roots: &StorageRoots,
        config: &InputConfiguration,
    ) -> PathBuf {
        let recorded = match &config.file_name {
            Some(f) => f.clone(),
            None => format!("{}.{CONFIGURATION_EXTENSION}", config.name),
        };
        let file_name = Path::new(&recorded)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                PathBuf::from(format!("{}.{CONFIGURATION_EXTENSION}", config.name))
            });
        roots.configurations.join(file_name)
    }

    /// Names of files under `dir` ending in `.extension`. A missing folder
    /// yields nothing rather than an error, matching the load pipelines'
    /// tolerance.
    fn file_names_with_extension(dir: &Path, extension: &str) -> Vec<String> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("cannot enumerate {}: {e}", dir.display());
                return Vec::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry.path().extension().map(|e| e.eq_ignore_ascii_case(extension)) == Some(true)
            })
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect()
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
        let content = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Storage for FileStorage {
    fn verify(&self) -> Result<(), StorageError> {
        let roots = self.roots()?;
        if !roots.data.is_dir() {
            return Err(StorageError::DataFolderMissing);
        }

        // Missing sub-folders are created; only the data root is the user's
        // responsibility.
        for dir in [
            &roots.configurations,
            &roots.scripts,
            &roots.web,
            &roots.views,
            &roots.media,
        ] {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    fn enumerate_configurations(&self) -> Vec<String> {
        match &self.roots {
            Some(roots) => {
                Self::file_names_with_extension(&roots.configurations, CONFIGURATION_EXTENSION)
            }
            None => Vec::new(),
        }
    }

    fn load_configuration(&self, file_name: &str) -> Result<InputConfiguration, StorageError> {
        let path = self.roots()?.configurations.join(file_name);
        Self::read_json(&path)
    }

    fn save_configuration(&self, config: &InputConfiguration) -> Result<(), StorageError> {
        let roots = self.roots()?;
        let path = Self::configuration_path(roots, config);
        let content =
            serde_json::to_string_pretty(config).map_err(|source| StorageError::Json {
                path: path.clone(),
                source,
            })?;
        std::fs::write(&path, content).map_err(|source| StorageError::Io { path, source })
    }

    fn remove_configuration(&self, config: &InputConfiguration) -> Result<(), StorageError> {
        let roots = self.roots()?;
        let path = Self::configuration_path(roots, config);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            // Already gone is as good as deleted.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn enumerate_scripts(&self) -> Vec<String> {
        match &self.roots {
            Some(roots) => Self::file_names_with_extension(&roots.scripts, SCRIPT_EXTENSION),
            None => Vec::new(),
        }
    }

    fn load_script(&self, file_name: &str) -> Result<Script, StorageError> {
        let path = self.roots()?.scripts.join(file_name);
        Self::read_json(&path)
    }

    fn load_source_contents(&self, file_name: &str) -> Result<String, StorageError> {
        let path = self.roots()?.scripts.join(file_name);
        std::fs::read_to_string(&path).map_err(|source| StorageError::Io { path, source })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
