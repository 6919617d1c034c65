//! Response envelope normalization
//!
//! DevOps Center answers the same endpoint either with the payload wrapped
//! under a `root` key or with the payload at the top level. Everything here
//! unwraps first and only then looks at fields, so callers never see the
//! wrapping.

use serde_json::Value;
use thiserror::Error;

use crate::models::ImportOutcome;

/// Key DevOps Center sometimes wraps its payload in
pub const ROOT_KEY: &str = "root";

/// Key holding the task list in a fetch response
pub const TASKS_KEY: &str = "tasks";

/// A 2xx body that could not be read as the expected payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unexpected response shape: expected {expected}, found {found}")]
pub struct ShapeError {
    pub expected: &'static str,
    pub found: &'static str,
}

/// Return the value under `root` if present, otherwise the body unchanged
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key(ROOT_KEY) => {
            map.remove(ROOT_KEY).unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Extract the task list from a fetch response body.
///
/// After unwrapping, a `tasks` field wins; otherwise the unwrapped value is
/// itself taken as the list. `null` is read as an empty list and a lone
/// object as a list of one. Only a scalar is rejected.
pub fn extract_tasks(body: Value) -> Result<Vec<Value>, ShapeError> {
    let payload = match unwrap_envelope(body) {
        Value::Object(mut map) if map.contains_key(TASKS_KEY) => {
            map.remove(TASKS_KEY).unwrap_or(Value::Null)
        }
        other => other,
    };

    match payload {
        Value::Array(tasks) => Ok(tasks),
        Value::Null => Ok(Vec::new()),
        task @ Value::Object(_) => Ok(vec![task]),
        other => Err(ShapeError {
            expected: "a task list or task object",
            found: kind_of(&other),
        }),
    }
}

/// Extract the import outcome from a `createFromJIRA` response body.
///
/// The four outcome fields are copied as received, with no type checks. An
/// empty (`null`) payload yields an outcome with every field absent; a payload
/// that is not an object at all is rejected.
pub fn extract_import_outcome(body: Value) -> Result<ImportOutcome, ShapeError> {
    match unwrap_envelope(body) {
        Value::Null => Ok(ImportOutcome::default()),
        Value::Object(mut map) => Ok(ImportOutcome {
            created_work_item_ids: map.remove("createdWorkItemIds"),
            failed_jira_tasks: map.remove("failedJiraTasks"),
            message: map.remove("message"),
            success: map.remove("success"),
        }),
        other => Err(ShapeError {
            expected: "an import outcome object",
            found: kind_of(&other),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
