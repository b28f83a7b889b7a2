use tracing::info;

use crate::{
    config::Config,
    models::employee::Employee,
    storage::{Storage, StorageError},
    store::DocumentStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationResult {
    /// The employee was pending and is now active
    Activated(Employee),
    /// Nothing changed, the employee had activated before
    AlreadyActive(Employee),
    /// No employee carries this id
    Invalid,
}

/// Flips a pending employee to active. Unknown ids are a normal outcome, not
/// an error; only storage failures are.
pub fn activate<S: Storage>(
    store: &DocumentStore<S>,
    employee_id: &str,
) -> Result<ActivationResult, StorageError> {
    let result = store.with_store(|snapshot| {
        let outcome = match snapshot.get_employee_mut(employee_id) {
            None => ActivationResult::Invalid,
            Some(employee) => {
                if employee.activate() {
                    ActivationResult::Activated(employee.clone())
                } else {
                    ActivationResult::AlreadyActive(employee.clone())
                }
            }
        };
        Ok::<_, StorageError>(outcome)
    })?;

    match &result {
        ActivationResult::Activated(employee) => info!(employee_id = %employee.id, "employee activated"),
        ActivationResult::AlreadyActive(employee) => {
            info!(employee_id = %employee.id, "activation link reused")
        }
        ActivationResult::Invalid => info!(%employee_id, "activation attempted for unknown employee"),
    }

    Ok(result)
}

impl ActivationResult {
    /// The page shown to whoever followed the activation link.
    pub fn render_page(&self, config: &Config) -> String {
        let download = escape_html(&config.download_path());
        match self {
            ActivationResult::Invalid => "<h1>Invalid Activation Link</h1>".to_string(),
            ActivationResult::AlreadyActive(employee) => format!(
                "<h1>Already Activated</h1><p>Hi {}, you have already activated your account. \
                 <a href='{}'>Download Tracker App</a></p>",
                escape_html(&employee.name),
                download
            ),
            ActivationResult::Activated(employee) => format!(
                "<h1>Activation Successful!</h1><p>Hi {}, you can now download the tracker app: \
                 <a href='{}'>Download</a></p>",
                escape_html(&employee.name),
                download
            ),
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
