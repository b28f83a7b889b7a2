use parking_lot::Mutex;

use crate::{
    models::store::Snapshot,
    storage::{Storage, StorageError},
};

/// Storage that never touches disk. Counts saves so callers can observe
/// whether a unit of work actually flushed.
#[derive(Default)]
pub struct MemoryStorage {
    snapshot: Mutex<Option<Snapshot>>,
    saves: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            saves: Mutex::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Snapshot, StorageError> {
        let mut slot = self.snapshot.lock();
        Ok(slot.get_or_insert_with(Snapshot::default).clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        *self.snapshot.lock() = Some(snapshot.clone());
        *self.saves.lock() += 1;
        Ok(())
    }
}
