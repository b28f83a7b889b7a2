use std::{
    fs::{self, OpenOptions, rename, write},
    path::{Path, PathBuf},
};

use fs2::FileExt;
use serde_json::to_string_pretty;
use tracing::debug;
use uuid::Uuid;

use crate::{
    models::store::Snapshot,
    storage::{Storage, StorageError},
};

/// Keeps the snapshot as a single pretty-printed JSON document.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Snapshot, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let snapshot: Snapshot =
                    serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
                        path: self.path.clone(),
                        source: e,
                    })?;
                debug!(path = %self.path.display(), "loaded store");
                Ok(snapshot)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let snapshot = Snapshot::default();
                self.save(&snapshot)?;
                debug!(path = %self.path.display(), "initialized empty store");
                Ok(snapshot)
            }
            Err(e) => Err(StorageError::LoadFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let json =
            to_string_pretty(snapshot).map_err(|e| StorageError::SerializeFailed { source: e })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::SaveFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let unique_temp = format!("{}.tmp.{}", self.path.display(), Uuid::new_v4());
        let temp_path = PathBuf::from(&unique_temp);
        write(&temp_path, json).map_err(|e| StorageError::SaveFailed {
            path: temp_path.clone(),
            source: e,
        })?;

        let lock_file_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_file_path)
            .map_err(|e| StorageError::SaveFailed {
                path: lock_file_path.clone(),
                source: e,
            })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| StorageError::SaveFailed {
                path: lock_file_path,
                source: e,
            })?;

        let renamed = rename(&temp_path, &self.path);
        let unlocked = lock_file.unlock();

        if let Err(e) = renamed {
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::SaveFailed {
                path: self.path.clone(),
                source: e,
            });
        }
        unlocked.map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), "saved store");
        Ok(())
    }
}
