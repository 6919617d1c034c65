use std::sync::Arc;

use bridge_core::{
    endpoints::create_from_jira_url,
    envelope::extract_import_outcome,
    error::Result,
    models::{CreateFromJiraBody, ImportRequest, ImportResult},
    AuthResolver, JiraCredentialSource,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::common::{authorized, resolve_connection, send_json, shape_failure};

/// Creates DevOps Center work items from JIRA tasks.
///
/// Each call is one POST. There is no idempotency key, so repeating a call
/// whose response was lost can create duplicate work items.
#[derive(Clone)]
pub struct TaskImporter {
    client: reqwest::Client,
    auth: Arc<dyn AuthResolver>,
    jira: Arc<dyn JiraCredentialSource>,
}

impl TaskImporter {
    pub fn new(
        client: reqwest::Client,
        auth: Arc<dyn AuthResolver>,
        jira: Arc<dyn JiraCredentialSource>,
    ) -> Self {
        Self { client, auth, jira }
    }

    /// Import JIRA tasks into a DevOps Center project
    ///
    /// # Returns
    /// * `Ok(ImportResult::Completed)` - The remote accepted the call; per-task failures are in `failed_jira_tasks`
    /// * `Ok(ImportResult::Failed)` - The request was sent and failed; `request_body` is redacted
    /// * `Err(BridgeError)` - No request was sent
    pub async fn import(&self, caller: &str, request: &ImportRequest) -> Result<ImportResult> {
        let connection = resolve_connection(self.auth.as_ref(), caller).await?;
        let url = create_from_jira_url(&connection.instance_url, &request.project_id)?;
        let credentials = self.jira.jira_credentials(caller).await?;
        let body = CreateFromJiraBody::new(request, &credentials);

        debug!(
            url = %url,
            jira_project = %request.jira_project,
            task_count = request.task_ids.len(),
            "Importing JIRA tasks"
        );

        let http_request = authorized(self.client.post(url.clone()), &connection).json(&body);
        let response = match send_json(http_request, &url).await {
            Ok(response) => response,
            Err(detail) => {
                warn!(url = %url, status = ?detail.status, error = %detail.message, "JIRA task import failed");
                return Ok(ImportResult::failed(
                    detail.with_request_body(redacted_body(&body)),
                ));
            }
        };

        match extract_import_outcome(response.body) {
            Ok(outcome) => {
                info!(
                    project_id = %request.project_id,
                    created = outcome.created_count(),
                    failed = outcome.failed_count(),
                    "Imported JIRA tasks"
                );
                Ok(ImportResult::Completed(outcome))
            }
            Err(shape) => {
                warn!(url = %url, error = %shape, "Unreadable import response");
                Ok(ImportResult::failed(
                    shape_failure(shape.to_string(), response.status, &url)
                        .with_request_body(redacted_body(&body)),
                ))
            }
        }
    }
}

fn redacted_body(body: &CreateFromJiraBody) -> Value {
    serde_json::to_value(body.redacted()).unwrap_or_default()
}
