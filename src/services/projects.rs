use thiserror::Error;
use tracing::info;

use crate::{
    models::{id::Id, project::Project, store::Snapshot, task::Task},
    storage::{Storage, StorageError},
    store::DocumentStore,
};

#[derive(Debug, Error)]
pub enum CreateProjectError {
    #[error("Project name is required")]
    MissingName,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct CreateProjectParameters {
    pub name: String,
    pub employee_ids: Vec<Id>,
}

pub struct CreatedProject {
    pub project: Project,
    pub default_task: Task,
}

/// Adds a project and its default task to the snapshot. Callers run this
/// inside a single unit of work so neither is ever persisted alone.
pub fn insert_project_with_default_task(snapshot: &mut Snapshot, project: Project) -> CreatedProject {
    let default_task = Task::default_for(&project);
    snapshot.projects.push(project.clone());
    snapshot.tasks.push(default_task.clone());
    CreatedProject {
        project,
        default_task,
    }
}

pub fn create_project<S: Storage>(
    store: &DocumentStore<S>,
    parameters: CreateProjectParameters,
) -> Result<CreatedProject, CreateProjectError> {
    let name = parameters.name.trim();
    if name.is_empty() {
        return Err(CreateProjectError::MissingName);
    }

    // Employee ids are taken as given; nothing checks they exist.
    let project = Project::new(name.to_string(), parameters.employee_ids);

    let created = store.with_store(|snapshot| {
        Ok::<_, CreateProjectError>(insert_project_with_default_task(snapshot, project))
    })?;

    info!(
        project_id = %created.project.id,
        task_id = %created.default_task.id,
        "project created with default task"
    );
    Ok(created)
}

pub fn list_projects<S: Storage>(store: &DocumentStore<S>) -> Result<Vec<Project>, StorageError> {
    store.read(|snapshot| snapshot.projects.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;

    #[test]
    fn test_create_project_cascades_exactly_one_task() {
        let store = DocumentStore::new(MemoryStorage::new());

        let created = create_project(
            &store,
            CreateProjectParameters {
                name: "Alpha".to_string(),
                employee_ids: vec!["e1".to_string()],
            },
        )
        .unwrap();

        let (projects, tasks) = store
            .read(|s| (s.projects.clone(), s.tasks.clone()))
            .unwrap();
        assert_eq!(projects, vec![created.project.clone()]);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Default Task for Alpha");
        assert_eq!(tasks[0].project_id, created.project.id);
        assert_eq!(tasks[0].employee_ids, vec!["e1".to_string()]);
        assert_eq!(store.storage().save_count(), 1);
    }

    #[test]
    fn test_unknown_employee_ids_are_accepted() {
        let store = DocumentStore::new(MemoryStorage::new());

        let created = create_project(
            &store,
            CreateProjectParameters {
                name: "Beta".to_string(),
                employee_ids: vec!["ghost".to_string()],
            },
        )
        .unwrap();

        assert_eq!(created.project.employee_ids, vec!["ghost".to_string()]);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let store = DocumentStore::new(MemoryStorage::new());

        let result = create_project(
            &store,
            CreateProjectParameters {
                name: " ".to_string(),
                employee_ids: vec![],
            },
        );

        assert!(matches!(result, Err(CreateProjectError::MissingName)));
        assert!(list_projects(&store).unwrap().is_empty());
    }

    #[test]
    fn test_insert_project_with_default_task_links_both() {
        let mut snapshot = Snapshot::default();
        let project = Project::new("Gamma".to_string(), vec![]);

        let created = insert_project_with_default_task(&mut snapshot, project);

        assert_eq!(snapshot.projects.len(), 1);
        let tasks: Vec<_> = snapshot.get_tasks_for_project(&created.project.id).collect();
        assert_eq!(tasks, vec![&created.default_task]);
    }
}
