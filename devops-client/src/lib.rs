//! DevOps Center client for the JIRA bridge
//!
//! This crate performs the two HTTP calls the bridge is built around:
//!
//! - [`TaskFetcher`] - `GET .../workitems/getFromJIRA/{jiraProject}`
//! - [`TaskImporter`] - `POST .../workitems/createFromJIRA`
//!
//! Each call resolves a connection, sends exactly one request and normalizes
//! the response envelope. Transport and API failures come back as
//! `ErrorDetail` values inside the result; a missing token or instance URL
//! comes back as `Err` and no request is sent.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bridge_core::{AuthResolver, Result, TaskQuery};
//! use devops_client::TaskFetcher;
//!
//! async fn list_tasks(auth: Arc<dyn AuthResolver>) -> Result<()> {
//!     let fetcher = TaskFetcher::new(reqwest::Client::new(), auth);
//!     let result = fetcher.fetch("jdoe", &TaskQuery::new("1Dp000", "PROJ")).await?;
//!     if let Some(tasks) = result.tasks() {
//!         println!("{} importable tasks", tasks.len());
//!     }
//!     Ok(())
//! }
//! ```

mod common;
mod fetcher;
mod importer;

pub use fetcher::TaskFetcher;
pub use importer::TaskImporter;

// Re-export commonly used types from bridge-core for convenience
pub use bridge_core::{
    error::{BridgeError, Result},
    models::{ErrorDetail, FetchResult, ImportOutcome, ImportRequest, ImportResult, TaskQuery},
    AuthResolver, JiraCredentialSource,
};
