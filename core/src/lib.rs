//! Bridge Core Library
//!
//! Domain types, collaborator traits and pure normalization logic for the
//! JIRA → DevOps Center bridge. Nothing in this crate performs I/O; the HTTP
//! side lives in `devops-client` and the tool surface in `mcp-protocol`.
//!
//! # Architecture
//!
//! - [`models`] - Connection, queries, results and the `ErrorDetail` record
//! - [`error`] - Fatal faults that stop a call before it is sent
//! - [`auth`] - Collaborator traits for DevOps Center and JIRA credentials
//! - [`envelope`] - `root`-wrapped vs. bare response normalization
//! - [`endpoints`] - REST URL construction
//! - [`validation`] - Tool input checks
//!
//! # Example
//!
//! ```rust
//! use bridge_core::{envelope::extract_tasks, models::FetchResult};
//! use serde_json::json;
//!
//! let body = json!({ "root": { "tasks": [{ "id": "10000" }] } });
//! let result = FetchResult::fetched(extract_tasks(body).unwrap());
//! assert_eq!(result.tasks().unwrap().len(), 1);
//! ```

pub mod auth;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types at the crate root for convenience
pub use auth::{AuthResolver, JiraCredentialSource};
pub use envelope::ShapeError;
pub use error::{BridgeError, Result};
pub use models::{
    Connection, CreateFromJiraBody, ErrorDetail, FetchResult, ImportOutcome, ImportRequest,
    ImportResult, JiraCredentials, TaskQuery,
};
pub use validation::InputValidator;

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_crate_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(CRATE_NAME, "bridge-core");
    }

    #[test]
    fn test_re_exports() {
        let error = BridgeError::empty_field("username");
        assert!(error.is_validation());

        let query = TaskQuery::new("p", "PROJ");
        assert!(InputValidator::validate_task_query(&query).is_ok());
    }
}
