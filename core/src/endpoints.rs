//! DevOps Center REST endpoint construction

use url::Url;

use crate::error::{BridgeError, Result};

/// Salesforce REST API version the DevOps Center endpoints live under
pub const API_VERSION: &str = "v65.0";

const PROJECTS_PREFIX: [&str; 6] = ["services", "data", API_VERSION, "connect", "devops", "projects"];

/// `GET {instance}/services/data/v65.0/connect/devops/projects/{projectId}/workitems/getFromJIRA/{jiraProject}`
pub fn get_from_jira_url(instance_url: &str, project_id: &str, jira_project: &str) -> Result<Url> {
    project_url(
        instance_url,
        &[project_id, "workitems", "getFromJIRA", jira_project],
    )
}

/// `POST {instance}/services/data/v65.0/connect/devops/projects/{projectId}/workitems/createFromJIRA`
pub fn create_from_jira_url(instance_url: &str, project_id: &str) -> Result<Url> {
    project_url(instance_url, &[project_id, "workitems", "createFromJIRA"])
}

fn project_url(instance_url: &str, tail: &[&str]) -> Result<Url> {
    let mut url = parse_instance_url(instance_url)?;
    {
        // Segments are percent-encoded, so ids containing '/' or '?' stay inside their segment
        let mut segments = url.path_segments_mut().map_err(|_| {
            BridgeError::InvalidInstanceUrl(format!("{instance_url}: cannot be a base URL"))
        })?;
        segments.pop_if_empty();
        segments.extend(PROJECTS_PREFIX);
        segments.extend(tail);
    }
    Ok(url)
}

/// Parse and sanity-check an instance URL
pub fn parse_instance_url(instance_url: &str) -> Result<Url> {
    let trimmed = instance_url.trim();
    if trimmed.is_empty() {
        return Err(BridgeError::MissingInstanceUrl);
    }

    let url = Url::parse(trimmed)
        .map_err(|e| BridgeError::InvalidInstanceUrl(format!("{trimmed}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(BridgeError::InvalidInstanceUrl(format!(
            "{trimmed}: unsupported scheme '{other}'"
        ))),
    }
}
