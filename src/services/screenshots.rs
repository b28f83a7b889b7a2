//! Screenshot archive.
//!
//! Images live at `screenshots/{project}/{employee}/{employee_id}_{timestamp}.png`
//! under the data directory, and every stored image has a matching record in
//! the snapshot. A record is only ever written for a file that made it to its
//! final path.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    config::SCREENSHOTS_DIRNAME,
    models::{id::Id, screenshot::ScreenshotRecord},
    storage::{Storage, StorageError},
    store::DocumentStore,
};

#[derive(Debug, Error)]
pub enum StoreScreenshotError {
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidPathSegment {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Failed to write screenshot '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct StoreScreenshotParameters {
    pub employee_id: Id,
    pub employee_name: String,
    pub project_name: String,
    pub timestamp: String,
    pub permission: String,
    pub bytes: Vec<u8>,
}

/// Replaces whitespace with underscores, then rejects anything that could
/// escape or restructure the archive directory.
pub fn sanitize_name(field: &'static str, raw: &str) -> Result<String, StoreScreenshotError> {
    let sanitized: String = raw
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    check_segment(field, &sanitized)?;
    Ok(sanitized)
}

fn check_segment(field: &'static str, segment: &str) -> Result<(), StoreScreenshotError> {
    let reason = if segment.is_empty() {
        Some("must not be empty")
    } else if segment == "." || segment == ".." {
        Some("must not be a relative directory")
    } else if segment.contains(['/', '\\', ':', '\0']) {
        Some("must not contain path separators")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StoreScreenshotError::InvalidPathSegment {
            field,
            value: segment.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// `/`-separated path relative to the data directory. Segments must already
/// be sanitized.
pub fn relative_path(project_name: &str, employee_name: &str, employee_id: &str, timestamp: &str) -> String {
    format!("{SCREENSHOTS_DIRNAME}/{project_name}/{employee_name}/{employee_id}_{timestamp}.png")
}

pub struct ScreenshotArchive {
    data_dir: PathBuf,
}

impl ScreenshotArchive {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Absolute location of a record's image.
    pub fn resolve(&self, record: &ScreenshotRecord) -> PathBuf {
        record
            .filename
            .split('/')
            .fold(self.data_dir.clone(), |path, segment| path.join(segment))
    }

    /// Writes the image and records its metadata as one logical step. The
    /// bytes go to a temp file first; the rename into place and the record
    /// append happen in the same unit of work, so a failed rename leaves no
    /// record behind. An existing image for the same employee and timestamp
    /// is replaced, along with its record. If the snapshot cannot be flushed,
    /// the new image is removed and the previous one put back.
    pub fn store<S: Storage>(
        &self,
        store: &DocumentStore<S>,
        parameters: StoreScreenshotParameters,
    ) -> Result<ScreenshotRecord, StoreScreenshotError> {
        let employee_name = sanitize_name("employee name", &parameters.employee_name)?;
        let project_name = sanitize_name("project name", &parameters.project_name)?;
        check_segment("employee id", &parameters.employee_id)?;
        check_segment("timestamp", &parameters.timestamp)?;

        let record = ScreenshotRecord {
            filename: relative_path(
                &project_name,
                &employee_name,
                &parameters.employee_id,
                &parameters.timestamp,
            ),
            employee_id: parameters.employee_id,
            employee_name,
            project_name,
            timestamp: parameters.timestamp,
            permission: parameters.permission,
        };

        let target = self.resolve(&record);
        let directory = target.parent().unwrap_or(self.data_dir.as_path()).to_path_buf();
        fs::create_dir_all(&directory).map_err(|e| StoreScreenshotError::WriteFailed {
            path: directory.clone(),
            source: e,
        })?;

        let temp_path = temp_path_for(&target);
        if let Err(e) = fs::write(&temp_path, &parameters.bytes) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreScreenshotError::WriteFailed {
                path: temp_path,
                source: e,
            });
        }
        debug!(path = %temp_path.display(), bytes = parameters.bytes.len(), "screenshot staged");

        // Filled in by the unit of work so a failed flush can be undone on disk
        let mut backup: Option<PathBuf> = None;
        let mut placed = false;

        let stored = store.with_store(|snapshot| {
            if target.is_file() {
                let backup_path = backup_path_for(&target);
                fs::rename(&target, &backup_path).map_err(|e| {
                    StoreScreenshotError::WriteFailed {
                        path: target.clone(),
                        source: e,
                    }
                })?;
                backup = Some(backup_path);
            }

            fs::rename(&temp_path, &target).map_err(|e| StoreScreenshotError::WriteFailed {
                path: target.clone(),
                source: e,
            })?;
            placed = true;

            match snapshot
                .screenshots
                .iter_mut()
                .find(|existing| existing.filename == record.filename)
            {
                Some(existing) => *existing = record.clone(),
                None => snapshot.screenshots.push(record.clone()),
            }
            Ok::<_, StoreScreenshotError>(record)
        });

        match stored {
            Ok(record) => {
                if let Some(backup_path) = &backup {
                    let _ = fs::remove_file(backup_path);
                }
                info!(
                    employee_id = %record.employee_id,
                    filename = %record.filename,
                    "screenshot saved"
                );
                Ok(record)
            }
            Err(e) => {
                let _ = fs::remove_file(&temp_path);
                if placed {
                    let _ = fs::remove_file(&target);
                }
                if let Some(backup_path) = &backup {
                    if let Err(restore) = fs::rename(backup_path, &target) {
                        warn!(
                            path = %backup_path.display(),
                            error = %restore,
                            "previous screenshot could not be restored"
                        );
                    }
                }
                Err(e)
            }
        }
    }
}

fn temp_path_for(target: &Path) -> PathBuf {
    sibling_path(target, "tmp")
}

fn backup_path_for(target: &Path) -> PathBuf {
    sibling_path(target, "bak")
}

fn sibling_path(target: &Path, kind: &str) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}.{}", file_name, kind, Uuid::new_v4()))
}

pub fn list_screenshots<S: Storage>(
    store: &DocumentStore<S>,
) -> Result<Vec<ScreenshotRecord>, StorageError> {
    store.read(|snapshot| snapshot.screenshots.clone())
}
