//! MCP Protocol Implementation
//!
//! This crate exposes the JIRA → DevOps Center bridge as Model Context
//! Protocol tools. It provides:
//!
//! - `get_jira_tasks` and `import_jira_tasks` tools built on the RMCP SDK
//! - Input validation at the tool boundary
//! - Mapping of bridge results and faults to MCP tool results
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use bridge_core::{AuthResolver, JiraCredentialSource};
//! use devops_client::{TaskFetcher, TaskImporter};
//! use mcp_protocol::JiraBridgeHandler;
//! use rmcp::ServiceExt;
//!
//! async fn serve<C>(credentials: Arc<C>) -> Result<(), Box<dyn std::error::Error>>
//! where
//!     C: AuthResolver + JiraCredentialSource + 'static,
//! {
//!     let client = reqwest::Client::new();
//!     let fetcher = TaskFetcher::new(client.clone(), credentials.clone());
//!     let importer = TaskImporter::new(client, credentials.clone(), credentials);
//!     let service = JiraBridgeHandler::new(fetcher, importer)
//!         .serve(rmcp::transport::stdio())
//!         .await?;
//!     service.waiting().await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod handler;
pub mod serialization;

// Re-export key types for easier usage
pub use handler::{GetJiraTasksRequest, ImportJiraTasksRequest, JiraBridgeHandler};
pub use serialization::{fetch_result_to_tool_result, import_result_to_tool_result};
