//! Standard test fixtures for consistent testing
//!
//! Provides:
//! - Opaque JIRA task records as DevOps Center returns them
//! - Response bodies in each envelope shape
//! - Credentials for mock resolvers

use bridge_core::JiraCredentials;
use serde_json::{json, Value};

/// Access token handed out by [`crate::MockAuthResolver::new`]
pub const TEST_ACCESS_TOKEN: &str = "00Dtest!AccessToken";

/// JIRA token in [`test_jira_credentials`]; must never appear in diagnostics
pub const TEST_JIRA_TOKEN: &str = "jira-secret-token";

/// JIRA base URL in [`test_jira_credentials`]
pub const TEST_JIRA_URL: &str = "https://acme.atlassian.net";

/// Named credential in [`test_jira_credentials`]
pub const TEST_NAMED_CREDENTIAL: &str = "JiraNamedCredential";

pub fn test_jira_credentials() -> JiraCredentials {
    JiraCredentials::new(TEST_NAMED_CREDENTIAL, TEST_JIRA_URL, TEST_JIRA_TOKEN)
}

/// A JIRA task record with the given id
pub fn jira_task(id: &str, summary: &str) -> Value {
    json!({
        "id": id,
        "key": format!("PROJ-{id}"),
        "summary": summary,
        "status": "To Do"
    })
}

/// Two distinct task records
pub fn sample_tasks() -> Vec<Value> {
    vec![
        jira_task("10000", "Login page returns 500"),
        jira_task("10001", "Add audit trail to exports"),
    ]
}

/// `{ "root": { "tasks": [...] } }`
pub fn root_wrapped_tasks(tasks: &[Value]) -> Value {
    json!({ "root": { "tasks": tasks } })
}

/// `{ "tasks": [...] }`
pub fn top_level_tasks(tasks: &[Value]) -> Value {
    json!({ "tasks": tasks })
}

/// A `createFromJIRA` response, optionally `root`-wrapped
pub fn import_response(created: &[&str], failed: &[&str], message: &str, wrapped: bool) -> Value {
    let payload = json!({
        "createdWorkItemIds": created,
        "failedJiraTasks": failed,
        "success": failed.is_empty(),
        "message": message
    });
    if wrapped {
        json!({ "root": payload })
    } else {
        payload
    }
}

/// Salesforce-style REST error body
pub fn api_error_body(error_code: &str, message: &str) -> Value {
    json!([{ "errorCode": error_code, "message": message }])
}
