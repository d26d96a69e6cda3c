//! Storage infrastructure: app-config persistence and the storage gateway.
//!
//! The `config` sub-module reads and writes the per-user application-config
//! file. The `gateway` sub-module implements the [`Storage`] trait over the
//! data-folder layout. The application layer only ever sees the trait, so
//! tests can drive it with a mock and the on-disk format can change without
//! touching commands or pipelines.

use std::path::PathBuf;

use thiserror::Error;

use inputcast_core::{InputConfiguration, Script};

pub mod config;
pub mod gateway;

/// Error type for persistence operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The data root folder is unset or does not exist. Fatal startup
    /// precondition; the orchestrator degrades into first-run mode.
    #[error("data folder is not configured or does not exist")]
    DataFolderMissing,

    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted file holds malformed JSON.
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistence capability the application layer depends on.
///
/// Enumeration returns whatever order the underlying file enumeration
/// yields; callers must not rely on it being stable across calls.
#[cfg_attr(test, mockall::automock)]
pub trait Storage: Send + Sync {
    /// Verifies the on-disk layout: fails with
    /// [`StorageError::DataFolderMissing`] when the data root is absent,
    /// auto-creates missing sub-folders otherwise.
    fn verify(&self) -> Result<(), StorageError>;

    /// File names of every persisted configuration candidate.
    fn enumerate_configurations(&self) -> Vec<String>;

    /// Loads one configuration by file name.
    fn load_configuration(&self, file_name: &str) -> Result<InputConfiguration, StorageError>;

    /// Persists `config`, deriving the file name from the record.
    fn save_configuration(&self, config: &InputConfiguration) -> Result<(), StorageError>;

    /// Deletes the backing artifact of `config`. Deleting an already-absent
    /// file is not an error.
    fn remove_configuration(&self, config: &InputConfiguration) -> Result<(), StorageError>;

    /// File names of every persisted script descriptor.
    fn enumerate_scripts(&self) -> Vec<String>;

    /// Loads one script descriptor by file name.
    fn load_script(&self, file_name: &str) -> Result<Script, StorageError>;

    /// Reads one script source file, relative to the scripts folder.
    fn load_source_contents(&self, file_name: &str) -> Result<String, StorageError>;
}
