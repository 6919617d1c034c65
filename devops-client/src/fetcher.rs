use std::sync::Arc;

use bridge_core::{
    endpoints::get_from_jira_url,
    envelope::extract_tasks,
    error::Result,
    models::{FetchResult, TaskQuery},
    AuthResolver,
};
use tracing::{debug, info, warn};

use crate::common::{authorized, resolve_connection, send_json, shape_failure};

/// Lists the JIRA tasks DevOps Center can import into a project
#[derive(Clone)]
pub struct TaskFetcher {
    client: reqwest::Client,
    auth: Arc<dyn AuthResolver>,
}

impl TaskFetcher {
    /// Create a fetcher sharing the given HTTP client
    pub fn new(client: reqwest::Client, auth: Arc<dyn AuthResolver>) -> Self {
        Self { client, auth }
    }

    /// Fetch candidate tasks for a DevOps Center project
    ///
    /// # Arguments
    /// * `caller` - Identity passed to the auth resolver
    /// * `query` - DevOps Center project id and JIRA project key
    ///
    /// # Returns
    /// * `Ok(FetchResult::Fetched)` - The task list, whatever envelope it arrived in
    /// * `Ok(FetchResult::Failed)` - The request was sent and failed
    /// * `Err(BridgeError)` - No request was sent: auth failed or the connection is incomplete
    pub async fn fetch(&self, caller: &str, query: &TaskQuery) -> Result<FetchResult> {
        let connection = resolve_connection(self.auth.as_ref(), caller).await?;
        let url = get_from_jira_url(
            &connection.instance_url,
            &query.project_id,
            &query.jira_project,
        )?;

        debug!(url = %url, jira_project = %query.jira_project, "Fetching JIRA tasks");

        let request = authorized(self.client.get(url.clone()), &connection);
        let response = match send_json(request, &url).await {
            Ok(response) => response,
            Err(detail) => {
                warn!(url = %url, status = ?detail.status, error = %detail.message, "JIRA task fetch failed");
                return Ok(FetchResult::failed(detail));
            }
        };

        match extract_tasks(response.body) {
            Ok(tasks) => {
                info!(
                    project_id = %query.project_id,
                    jira_project = %query.jira_project,
                    count = tasks.len(),
                    "Fetched JIRA tasks"
                );
                Ok(FetchResult::fetched(tasks))
            }
            Err(shape) => {
                warn!(url = %url, error = %shape, "Unreadable JIRA task list");
                Ok(FetchResult::failed(shape_failure(
                    shape.to_string(),
                    response.status,
                    &url,
                )))
            }
        }
    }
}
