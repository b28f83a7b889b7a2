use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A caller-defined time entry. Fields are stored exactly as received; by
/// convention clients send employee, project and task ids alongside start and
/// end times, but nothing here enforces that.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct TimeLog(pub Map<String, Value>);

impl TimeLog {
    /// Accepts only JSON objects; anything else has no fields to keep.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}
