use std::path::PathBuf;

use thiserror::Error;

use crate::models::store::Snapshot;

pub mod json;
pub mod memory;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to load store from '{path}': {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted document exists but cannot be read as a snapshot.
    /// Nothing is repaired or reset automatically.
    #[error("Store file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to save store to '{path}': {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize store to JSON: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },
}

pub trait Storage {
    /// Reads the persisted snapshot, creating an empty one if none exists yet.
    fn load(&self) -> Result<Snapshot, StorageError>;
    /// Replaces the persisted snapshot as a whole.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;
}
