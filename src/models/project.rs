use serde::{Deserialize, Serialize};

use crate::models::id::{Id, new_id, now_millis};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// UUID of the project
    pub id: Id,
    /// Name of the project
    pub name: String,
    /// Employees assigned to the project. Not checked against the employee list
    #[serde(default)]
    pub employee_ids: Vec<Id>,
    /// Created at timestamp of the project, in milliseconds
    pub created_at: i64,
}

impl Project {
    pub fn new(name: String, employee_ids: Vec<Id>) -> Self {
        Self {
            id: new_id(),
            name,
            employee_ids,
            created_at: now_millis(),
        }
    }
}
