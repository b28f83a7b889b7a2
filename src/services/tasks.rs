use thiserror::Error;

use crate::{
    models::task::Task,
    storage::{Storage, StorageError},
    store::DocumentStore,
};

#[derive(Debug, Error)]
pub enum ListTasksError {
    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub fn list_tasks<S: Storage>(store: &DocumentStore<S>) -> Result<Vec<Task>, StorageError> {
    store.read(|snapshot| snapshot.tasks.clone())
}

pub fn list_tasks_for_project<S: Storage>(
    store: &DocumentStore<S>,
    project_id: &str,
) -> Result<Vec<Task>, ListTasksError> {
    store.read(|snapshot| {
        snapshot
            .get_project(project_id)
            .map(|project| snapshot.get_tasks_for_project(&project.id).cloned().collect())
            .ok_or_else(|| ListTasksError::ProjectNotFound(project_id.to_string()))
    })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::projects::{CreateProjectParameters, create_project},
        storage::memory::MemoryStorage,
    };

    #[test]
    fn test_list_tasks_for_project_filters_by_project() {
        let store = DocumentStore::new(MemoryStorage::new());
        let alpha = create_project(
            &store,
            CreateProjectParameters {
                name: "Alpha".to_string(),
                employee_ids: vec![],
            },
        )
        .unwrap();
        create_project(
            &store,
            CreateProjectParameters {
                name: "Beta".to_string(),
                employee_ids: vec![],
            },
        )
        .unwrap();

        let tasks = list_tasks_for_project(&store, &alpha.project.id).unwrap();

        assert_eq!(list_tasks(&store).unwrap().len(), 2);
        assert_eq!(tasks, vec![alpha.default_task]);
    }

    #[test]
    fn test_list_tasks_for_unknown_project() {
        let store = DocumentStore::new(MemoryStorage::new());

        let result = list_tasks_for_project(&store, "missing");

        assert!(matches!(result, Err(ListTasksError::ProjectNotFound(id)) if id == "missing"));
    }
}
