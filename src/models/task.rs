use serde::{Deserialize, Serialize};

use crate::models::{
    id::{Id, new_id, now_millis},
    project::Project,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// UUID to identify the task
    pub id: Id,
    /// Title of the task
    pub name: String,
    /// The project this task belongs to
    pub project_id: Id,
    /// Employees who can log time against the task
    #[serde(default)]
    pub employee_ids: Vec<Id>,
    /// When the task was created, in milliseconds
    pub created_at: i64,
}

impl Task {
    /// The task every project receives on creation.
    pub fn default_for(project: &Project) -> Self {
        Self {
            id: new_id(),
            name: format!("Default Task for {}", project.name),
            project_id: project.id.clone(),
            employee_ids: project.employee_ids.clone(),
            created_at: now_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_task_derives_from_project() {
        let project = Project::new("Alpha".into(), vec!["e1".into()]);
        let task = Task::default_for(&project);

        assert_eq!(task.name, "Default Task for Alpha");
        assert_eq!(task.project_id, project.id);
        assert_eq!(task.employee_ids, vec!["e1".to_string()]);
        assert_ne!(task.id, project.id);
    }
}
