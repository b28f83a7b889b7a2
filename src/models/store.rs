use serde::{Deserialize, Serialize};

use crate::models::{
    employee::Employee, project::Project, screenshot::ScreenshotRecord, task::Task,
    time_log::TimeLog,
};

/// The whole persisted document. Arrays keep insertion order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub employees: Vec<Employee>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub time_logs: Vec<TimeLog>,
    pub screenshots: Vec<ScreenshotRecord>,
}

impl Snapshot {
    pub fn get_employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn get_employee_mut(&mut self, id: &str) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| e.id == id)
    }

    pub fn get_active_employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter().filter(|e| e.active)
    }

    pub fn get_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn get_tasks_for_project<'a>(&'a self, project_id: &'a str) -> impl Iterator<Item = &'a Task> {
        self.tasks.iter().filter(move |t| t.project_id == project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_has_canonical_shape() {
        let value = serde_json::to_value(Snapshot::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "employees": [],
                "projects": [],
                "tasks": [],
                "timeLogs": [],
                "screenshots": []
            })
        );
    }

    #[test]
    fn test_get_active_employees_filters_pending() {
        let mut active = Employee::new("A".into(), "a@example.com".into());
        active.activate();
        let pending = Employee::new("P".into(), "p@example.com".into());
        let snapshot = Snapshot {
            employees: vec![active.clone(), pending],
            ..Snapshot::default()
        };

        let ids: Vec<_> = snapshot.get_active_employees().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![active.id]);
    }
}
