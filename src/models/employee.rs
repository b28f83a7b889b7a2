use serde::{Deserialize, Serialize};

use crate::models::id::{Id, new_id, now_millis};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Opaque unique identifier, also embedded in the activation link
    pub id: Id,
    /// Display name of the employee
    pub name: String,
    /// Where the activation email is delivered. Not required to be unique
    pub email: String,
    /// Starts false and flips to true exactly once
    #[serde(default)]
    pub active: bool,
    /// Creation time in milliseconds since the epoch
    pub created_at: i64,
}

/// Lifecycle of an employee account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    Pending,
    Active,
}

impl Employee {
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: new_id(),
            name,
            email,
            active: false,
            created_at: now_millis(),
        }
    }

    pub fn state(&self) -> ActivationState {
        if self.active {
            ActivationState::Active
        } else {
            ActivationState::Pending
        }
    }

    /// Moves a pending employee to active. Returns false when the employee
    /// was already active, leaving it untouched.
    pub fn activate(&mut self) -> bool {
        match self.state() {
            ActivationState::Pending => {
                self.active = true;
                true
            }
            ActivationState::Active => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_employee_is_pending() {
        let employee = Employee::new("Ada".into(), "ada@example.com".into());
        assert_eq!(employee.state(), ActivationState::Pending);
        assert!(!employee.active);
    }

    #[test]
    fn test_activate_only_transitions_once() {
        let mut employee = Employee::new("Ada".into(), "ada@example.com".into());
        assert!(employee.activate());
        assert!(!employee.activate());
        assert_eq!(employee.state(), ActivationState::Active);
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let employee = Employee::new("Ada".into(), "ada@example.com".into());
        let value = serde_json::to_value(&employee).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["active"], serde_json::json!(false));
    }
}
