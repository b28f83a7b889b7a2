use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::Config,
    models::employee::Employee,
    notify::{ActivationEmail, DeliveryError, Notifier},
    storage::{Storage, StorageError},
    store::DocumentStore,
};

#[derive(Debug, Error)]
pub enum CreateEmployeeError {
    #[error("Employee {0} is required")]
    MissingField(&'static str),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct CreateEmployeeParameters {
    pub name: String,
    pub email: String,
}

/// A persisted employee plus the outcome of the activation email. Delivery
/// failure does not undo the creation.
pub struct CreatedEmployee {
    pub employee: Employee,
    pub delivery: Result<(), DeliveryError>,
}

pub fn create_employee<S: Storage>(
    store: &DocumentStore<S>,
    notifier: &dyn Notifier,
    config: &Config,
    parameters: CreateEmployeeParameters,
) -> Result<CreatedEmployee, CreateEmployeeError> {
    let name = parameters.name.trim();
    if name.is_empty() {
        return Err(CreateEmployeeError::MissingField("name"));
    }
    let email = parameters.email.trim();
    if email.is_empty() {
        return Err(CreateEmployeeError::MissingField("email"));
    }

    let employee = Employee::new(name.to_string(), email.to_string());

    store.with_store(|snapshot| {
        snapshot.employees.push(employee.clone());
        Ok::<_, CreateEmployeeError>(())
    })?;
    info!(employee_id = %employee.id, "employee created");

    let delivery = ActivationEmail::compose(&employee, config).send_with(notifier);
    if let Err(e) = &delivery {
        warn!(employee_id = %employee.id, error = %e, "activation email not delivered");
    }

    Ok(CreatedEmployee { employee, delivery })
}

pub fn list_employees<S: Storage>(
    store: &DocumentStore<S>,
    active_only: bool,
) -> Result<Vec<Employee>, StorageError> {
    store.read(|snapshot| {
        if active_only {
            snapshot.get_active_employees().cloned().collect()
        } else {
            snapshot.employees.clone()
        }
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use parking_lot::Mutex;

    use super::*;
    use crate::{services::activation::activate, storage::memory::MemoryStorage};

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), DeliveryError> {
            self.sent.lock().push((to.to_string(), subject.to_string()));
            Ok(())
        }
    }

    struct UnreachableNotifier;

    impl Notifier for UnreachableNotifier {
        fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), DeliveryError> {
            Err(DeliveryError {
                to: to.to_string(),
                subject: subject.to_string(),
                reason: "connection refused".to_string(),
            })
        }
    }

    fn config() -> Config {
        Config::new(PathBuf::from("/tmp/unused"))
    }

    fn parameters(name: &str, email: &str) -> CreateEmployeeParameters {
        CreateEmployeeParameters {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_create_employee_persists_pending_and_notifies_once() {
        let store = DocumentStore::new(MemoryStorage::new());
        let notifier = RecordingNotifier::default();

        let created = create_employee(
            &store,
            &notifier,
            &config(),
            parameters("Ada", "ada@example.com"),
        )
        .unwrap();

        assert!(!created.employee.active);
        assert!(created.delivery.is_ok());
        assert_eq!(
            *notifier.sent.lock(),
            vec![(
                "ada@example.com".to_string(),
                "Activate Your Time Tracker Account".to_string()
            )]
        );
        let stored = list_employees(&store, false).unwrap();
        assert_eq!(stored, vec![created.employee]);
    }

    #[test]
    fn test_delivery_failure_keeps_employee() {
        let store = DocumentStore::new(MemoryStorage::new());

        let created = create_employee(
            &store,
            &UnreachableNotifier,
            &config(),
            parameters("Ada", "ada@example.com"),
        )
        .unwrap();

        assert!(created.delivery.is_err());
        assert_eq!(list_employees(&store, false).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_fields_are_rejected_before_mutation() {
        let store = DocumentStore::new(MemoryStorage::new());
        let notifier = RecordingNotifier::default();

        let no_name = create_employee(&store, &notifier, &config(), parameters("  ", "a@example.com"));
        let no_email = create_employee(&store, &notifier, &config(), parameters("Ada", ""));

        assert!(matches!(no_name, Err(CreateEmployeeError::MissingField("name"))));
        assert!(matches!(no_email, Err(CreateEmployeeError::MissingField("email"))));
        assert!(notifier.sent.lock().is_empty());
        assert_eq!(store.storage().save_count(), 0);
    }

    #[test]
    fn test_duplicate_emails_are_allowed() {
        let store = DocumentStore::new(MemoryStorage::new());
        let notifier = RecordingNotifier::default();

        let first = create_employee(&store, &notifier, &config(), parameters("A", "same@example.com"))
            .unwrap();
        let second = create_employee(&store, &notifier, &config(), parameters("B", "same@example.com"))
            .unwrap();

        assert_ne!(first.employee.id, second.employee.id);
        assert_eq!(list_employees(&store, false).unwrap().len(), 2);
    }

    #[test]
    fn test_list_active_only() {
        let store = DocumentStore::new(MemoryStorage::new());
        let notifier = RecordingNotifier::default();
        let ada = create_employee(&store, &notifier, &config(), parameters("Ada", "ada@example.com"))
            .unwrap()
            .employee;
        create_employee(&store, &notifier, &config(), parameters("Bob", "bob@example.com")).unwrap();

        activate(&store, &ada.id).unwrap();

        let active = list_employees(&store, true).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, ada.id);
        assert_eq!(list_employees(&store, false).unwrap().len(), 2);
    }
}
