//! RMCP tool handler for the JIRA bridge
//!
//! Exposes the two bridge operations as MCP tools using the official RMCP SDK
//! `#[tool]` macros. The tools are meant to be called in order (fetch, then
//! import with ids taken from the fetch output), but nothing here enforces it.

use std::future::Future;

use bridge_core::{ImportRequest, InputValidator, TaskQuery};
use devops_client::{TaskFetcher, TaskImporter};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    schemars::JsonSchema,
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{fault_result, invalid_params},
    serialization::{fetch_result_to_tool_result, import_result_to_tool_result},
};

const INSTRUCTIONS: &str = "Bridges JIRA issues into DevOps Center work items. \
First call 'get_jira_tasks' to list the JIRA tasks available for a DevOps Center project. \
Then call 'import_jira_tasks' with the ids of the tasks to import, taken from that list. \
Importing the same ids twice can create duplicate work items.";

/// Get JIRA Tasks Parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetJiraTasksRequest {
    #[schemars(description = "Username whose DevOps Center connection is used")]
    pub username: String,
    #[schemars(description = "DevOps Center project id")]
    pub project_id: String,
    #[schemars(description = "JIRA project key, e.g. 'PROJ'")]
    pub jira_project: String,
}

/// Import JIRA Tasks Parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportJiraTasksRequest {
    #[schemars(description = "Username whose DevOps Center connection is used")]
    pub username: String,
    #[schemars(description = "DevOps Center project id")]
    pub project_id: String,
    #[schemars(description = "JIRA project key, e.g. 'PROJ'")]
    pub jira_project: String,
    #[schemars(description = "Ids of the JIRA tasks to import, as returned by get_jira_tasks")]
    pub jira_tasks: Vec<String>,
}

/// MCP server exposing the JIRA bridge tools
#[derive(Clone)]
pub struct JiraBridgeHandler {
    fetcher: TaskFetcher,
    importer: TaskImporter,
    tool_router: ToolRouter<Self>,
}

impl JiraBridgeHandler {
    /// Create new handler over a fetcher and an importer
    pub fn new(fetcher: TaskFetcher, importer: TaskImporter) -> Self {
        Self {
            fetcher,
            importer,
            tool_router: Self::tool_router(),
        }
    }

    /// Names of the registered tools, sorted
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tool_router.map.keys().map(|k| k.to_string()).collect();
        names.sort();
        names
    }
}

#[tool_router]
impl JiraBridgeHandler {
    /// List JIRA tasks that can be imported
    #[tool(
        description = "List the JIRA tasks of a JIRA project that can be imported into a DevOps Center project. Call this before import_jira_tasks."
    )]
    pub async fn get_jira_tasks(
        &self,
        Parameters(request): Parameters<GetJiraTasksRequest>,
    ) -> Result<CallToolResult, McpError> {
        InputValidator::validate_username(&request.username).map_err(|e| invalid_params(&e))?;
        let query = TaskQuery::new(request.project_id, request.jira_project);
        InputValidator::validate_task_query(&query).map_err(|e| invalid_params(&e))?;

        info!(
            tool = "get_jira_tasks",
            username = %request.username,
            project_id = %query.project_id,
            jira_project = %query.jira_project,
            "Tool invoked"
        );

        match self.fetcher.fetch(&request.username, &query).await {
            Ok(result) => fetch_result_to_tool_result(&result),
            Err(e) => {
                tracing::error!(tool = "get_jira_tasks", error = %e, "Call aborted before sending");
                Ok(fault_result(&e))
            }
        }
    }

    /// Import JIRA tasks as work items
    #[tool(
        description = "Import JIRA tasks as DevOps Center work items. Pass task ids obtained from get_jira_tasks. Not idempotent: repeating a call can create duplicate work items."
    )]
    pub async fn import_jira_tasks(
        &self,
        Parameters(request): Parameters<ImportJiraTasksRequest>,
    ) -> Result<CallToolResult, McpError> {
        InputValidator::validate_username(&request.username).map_err(|e| invalid_params(&e))?;
        let import = ImportRequest::new(request.project_id, request.jira_project, request.jira_tasks);
        InputValidator::validate_import_request(&import).map_err(|e| invalid_params(&e))?;

        info!(
            tool = "import_jira_tasks",
            username = %request.username,
            project_id = %import.project_id,
            jira_project = %import.jira_project,
            task_count = import.task_ids.len(),
            "Tool invoked"
        );

        match self.importer.import(&request.username, &import).await {
            Ok(result) => import_result_to_tool_result(&result),
            Err(e) => {
                tracing::error!(tool = "import_jira_tasks", error = %e, "Call aborted before sending");
                Ok(fault_result(&e))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for JiraBridgeHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
