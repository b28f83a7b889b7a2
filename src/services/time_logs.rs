use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::{
    models::time_log::TimeLog,
    storage::{Storage, StorageError},
    store::DocumentStore,
};

#[derive(Debug, Error)]
pub enum AppendTimeLogError {
    #[error("Time log must be a JSON object")]
    NotAnObject,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Ack {
    pub status: &'static str,
}

/// Appends the payload as-is. No fields are required or checked.
pub fn append_time_log<S: Storage>(
    store: &DocumentStore<S>,
    payload: Value,
) -> Result<Ack, AppendTimeLogError> {
    let time_log = TimeLog::from_value(payload).ok_or(AppendTimeLogError::NotAnObject)?;

    let count = store.with_store(|snapshot| {
        snapshot.time_logs.push(time_log);
        Ok::<_, AppendTimeLogError>(snapshot.time_logs.len())
    })?;
    info!(count, "time logged");

    Ok(Ack {
        status: "Time logged successfully",
    })
}

pub fn list_time_logs<S: Storage>(store: &DocumentStore<S>) -> Result<Vec<TimeLog>, StorageError> {
    store.read(|snapshot| snapshot.time_logs.clone())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::storage::{json::JsonFileStorage, memory::MemoryStorage};

    #[test]
    fn test_append_keeps_payload_verbatim() {
        let store = DocumentStore::new(MemoryStorage::new());
        let payload = json!({"employeeId": "e1", "taskId": "t1", "start": 1, "end": 2});

        let ack = append_time_log(&store, payload.clone()).unwrap();

        assert_eq!(ack.status, "Time logged successfully");
        let logs = list_time_logs(&store).unwrap();
        assert_eq!(serde_json::to_value(&logs).unwrap(), json!([payload]));
    }

    #[test]
    fn test_identical_payloads_are_both_kept() {
        let store = DocumentStore::new(MemoryStorage::new());

        append_time_log(&store, json!({"minutes": 5})).unwrap();
        append_time_log(&store, json!({"minutes": 5})).unwrap();

        assert_eq!(list_time_logs(&store).unwrap().len(), 2);
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        let store = DocumentStore::new(MemoryStorage::new());

        let result = append_time_log(&store, json!(42));

        assert!(matches!(result, Err(AppendTimeLogError::NotAnObject)));
        assert_eq!(store.storage().save_count(), 0);
    }

    #[test]
    fn test_concurrent_appends_are_all_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let store = DocumentStore::new(JsonFileStorage::new(path.clone()));
        let writers = 50;

        std::thread::scope(|scope| {
            for n in 0..writers {
                let store = &store;
                scope.spawn(move || append_time_log(store, json!({"writer": n})).unwrap());
            }
        });

        let reopened = DocumentStore::open(JsonFileStorage::new(path)).unwrap();
        let mut writers_seen: Vec<i64> = list_time_logs(&reopened)
            .unwrap()
            .iter()
            .filter_map(|log| log.get("writer").and_then(Value::as_i64))
            .collect();
        writers_seen.sort_unstable();
        assert_eq!(writers_seen, (0..writers).collect::<Vec<i64>>());
    }
}
