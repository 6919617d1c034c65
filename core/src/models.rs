use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, Result};

/// Placeholder written over secrets in diagnostic payloads
pub const REDACTED: &str = "[REDACTED]";

/// Resolved credentials for one caller against the DevOps Center instance.
///
/// A connection is produced by an [`crate::auth::AuthResolver`] for a single
/// call and dropped when that call completes. Both fields must be non-empty
/// before any request is sent; see [`Connection::ensure_complete`].
///
/// # Examples
///
/// ```rust
/// use bridge_core::models::Connection;
///
/// let connection = Connection::new("00Dxx!token", "https://example.my.salesforce.com");
/// assert!(connection.ensure_complete().is_ok());
///
/// let empty = Connection::new("", "https://example.my.salesforce.com");
/// assert!(empty.ensure_complete().is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Bearer token for the DevOps Center API
    pub access_token: String,
    /// Base URL of the instance, e.g. `https://acme.my.salesforce.com`
    pub instance_url: String,
}

impl Connection {
    pub fn new(access_token: impl Into<String>, instance_url: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            instance_url: instance_url.into(),
        }
    }

    /// Fail with a precondition fault if either field is blank
    pub fn ensure_complete(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(BridgeError::MissingAccessToken);
        }
        if self.instance_url.trim().is_empty() {
            return Err(BridgeError::MissingInstanceUrl);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("access_token", &REDACTED)
            .field("instance_url", &self.instance_url)
            .finish()
    }
}

/// Credentials the DevOps Center side uses to reach JIRA on the caller's behalf
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraCredentials {
    /// Name of the named credential configured on the DevOps Center org
    pub named_credential: String,
    /// Base URL of the JIRA instance
    pub url: String,
    /// API token for the JIRA instance
    pub token: String,
}

impl JiraCredentials {
    pub fn new(
        named_credential: impl Into<String>,
        url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            named_credential: named_credential.into(),
            url: url.into(),
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for JiraCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraCredentials")
            .field("named_credential", &self.named_credential)
            .field("url", &self.url)
            .field("token", &REDACTED)
            .finish()
    }
}

/// Input for listing importable JIRA tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    /// DevOps Center project id
    pub project_id: String,
    /// JIRA project key
    pub jira_project: String,
}

impl TaskQuery {
    pub fn new(project_id: impl Into<String>, jira_project: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            jira_project: jira_project.into(),
        }
    }
}

/// Input for importing JIRA tasks as work items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    /// DevOps Center project id
    pub project_id: String,
    /// JIRA project key
    pub jira_project: String,
    /// JIRA task ids, in the order they should be sent
    pub task_ids: Vec<String>,
}

impl ImportRequest {
    pub fn new(
        project_id: impl Into<String>,
        jira_project: impl Into<String>,
        task_ids: Vec<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            jira_project: jira_project.into(),
            task_ids,
        }
    }
}

/// Wire body of the `createFromJIRA` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFromJiraBody {
    #[serde(rename = "jiraNamedCredential")]
    pub jira_named_credential: String,
    #[serde(rename = "jiraProject")]
    pub jira_project: String,
    #[serde(rename = "jiraTasks")]
    pub jira_tasks: Vec<String>,
    #[serde(rename = "jiraURL")]
    pub jira_url: String,
    #[serde(rename = "jiraToken")]
    pub jira_token: String,
}

impl CreateFromJiraBody {
    pub fn new(request: &ImportRequest, credentials: &JiraCredentials) -> Self {
        Self {
            jira_named_credential: credentials.named_credential.clone(),
            jira_project: request.jira_project.clone(),
            jira_tasks: request.task_ids.clone(),
            jira_url: credentials.url.clone(),
            jira_token: credentials.token.clone(),
        }
    }

    /// Copy of the body with the JIRA URL and token masked, for diagnostics
    pub fn redacted(&self) -> Self {
        Self {
            jira_url: REDACTED.to_string(),
            jira_token: REDACTED.to_string(),
            ..self.clone()
        }
    }
}

/// Diagnostic record for a request that was sent and failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub message: String,
    /// Response body of the failed call, when it had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    /// Request URL
    pub url: String,
    /// Redacted request body (imports only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
}

impl ErrorDetail {
    pub fn new(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
            status: None,
            status_text: None,
            url: url.into(),
            request_body: None,
        }
    }

    pub fn with_status(mut self, status: u16, status_text: Option<String>) -> Self {
        self.status = Some(status);
        self.status_text = status_text;
        self
    }

    pub fn with_details(mut self, details: Option<Value>) -> Self {
        self.details = details;
        self
    }

    pub fn with_request_body(mut self, body: Value) -> Self {
        self.request_body = Some(body);
        self
    }
}

/// Outcome of listing JIRA tasks.
///
/// Serializes to either `{ "tasks": [...], "success": true }` or
/// `{ "error": {...} }`, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FetchResult {
    Failed { error: ErrorDetail },
    Fetched { tasks: Vec<Value>, success: bool },
}

impl FetchResult {
    pub fn fetched(tasks: Vec<Value>) -> Self {
        FetchResult::Fetched {
            tasks,
            success: true,
        }
    }

    pub fn failed(error: ErrorDetail) -> Self {
        FetchResult::Failed { error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Fetched { .. })
    }

    pub fn tasks(&self) -> Option<&[Value]> {
        match self {
            FetchResult::Fetched { tasks, .. } => Some(tasks),
            FetchResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorDetail> {
        match self {
            FetchResult::Failed { error } => Some(error),
            FetchResult::Fetched { .. } => None,
        }
    }
}

/// Fields reported by DevOps Center after a `createFromJIRA` call.
///
/// Values are passed through exactly as received, whatever their JSON type.
/// A field the remote omitted stays absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_work_item_ids: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_jira_tasks: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<Value>,
}

impl ImportOutcome {
    /// Number of created work items, when the remote sent a list
    pub fn created_count(&self) -> usize {
        list_len(&self.created_work_item_ids)
    }

    /// Number of tasks the remote failed to import, when it sent a list
    pub fn failed_count(&self) -> usize {
        list_len(&self.failed_jira_tasks)
    }
}

fn list_len(value: &Option<Value>) -> usize {
    value.as_ref().and_then(Value::as_array).map_or(0, Vec::len)
}

/// Outcome of importing JIRA tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportResult {
    Failed { error: ErrorDetail },
    Completed(ImportOutcome),
}

impl ImportResult {
    pub fn failed(error: ErrorDetail) -> Self {
        ImportResult::Failed { error }
    }

    /// True when the call went through, regardless of what the remote reported
    pub fn is_completed(&self) -> bool {
        matches!(self, ImportResult::Completed(_))
    }

    pub fn outcome(&self) -> Option<&ImportOutcome> {
        match self {
            ImportResult::Completed(outcome) => Some(outcome),
            ImportResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorDetail> {
        match self {
            ImportResult::Failed { error } => Some(error),
            ImportResult::Completed(_) => None,
        }
    }
}
