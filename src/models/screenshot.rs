use serde::{Deserialize, Serialize};

use crate::models::id::Id;

/// Metadata for one archived screenshot. Employee and project are referenced
/// by their sanitized names, which are also the directory names on disk.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotRecord {
    pub employee_id: Id,
    pub employee_name: String,
    pub project_name: String,
    pub timestamp: String,
    pub permission: String,
    /// Path of the image relative to the data directory, `/`-separated
    pub filename: String,
}
