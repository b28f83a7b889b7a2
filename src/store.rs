//! Process-wide handle on the persisted snapshot.
//!
//! Every operation runs as one unit of work under a single mutex: the caller
//! mutates a working copy, the copy is flushed through the [`Storage`]
//! backend, and only then does it replace the in-memory snapshot. A unit of
//! work that fails, either in the caller's closure or while saving, leaves
//! both memory and disk as they were.

use parking_lot::Mutex;
use tracing::debug;

use crate::{
    models::store::Snapshot,
    storage::{Storage, StorageError},
};

pub struct DocumentStore<S: Storage> {
    storage: S,
    snapshot: Mutex<Option<Snapshot>>,
}

impl<S: Storage> DocumentStore<S> {
    /// Wraps a backend. The snapshot is loaded lazily on first access.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            snapshot: Mutex::new(None),
        }
    }

    /// Wraps a backend and loads it immediately, so a corrupt file is
    /// reported at startup instead of on the first request.
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let snapshot = storage.load()?;
        Ok(Self {
            storage,
            snapshot: Mutex::new(Some(snapshot)),
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Runs `f` against the current snapshot without persisting anything.
    pub fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> Result<T, StorageError> {
        let mut slot = self.snapshot.lock();
        let snapshot = self.loaded(&mut slot)?;
        Ok(f(snapshot))
    }

    /// One load-mutate-save cycle. The snapshot is written back only when `f`
    /// succeeds and actually changed something.
    pub fn with_store<T, E>(&self, f: impl FnOnce(&mut Snapshot) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StorageError>,
    {
        let mut slot = self.snapshot.lock();
        let current = self.loaded(&mut slot)?;

        let mut working = current.clone();
        let output = f(&mut working)?;

        if working != *current {
            self.storage.save(&working)?;
            *current = working;
        } else {
            debug!("unit of work left the store unchanged, skipping save");
        }

        Ok(output)
    }

    /// Discards the in-memory snapshot and reads the backend again.
    pub fn reload(&self) -> Result<(), StorageError> {
        let mut slot = self.snapshot.lock();
        *slot = Some(self.storage.load()?);
        Ok(())
    }

    fn loaded<'a>(&self, slot: &'a mut Option<Snapshot>) -> Result<&'a mut Snapshot, StorageError> {
        let snapshot = match slot.take() {
            Some(snapshot) => snapshot,
            None => self.storage.load()?,
        };
        Ok(slot.insert(snapshot))
    }
}
