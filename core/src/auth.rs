use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Connection, JiraCredentials},
};

/// Resolves a caller identity to a DevOps Center connection.
///
/// Implementations own token storage and refresh; the bridge only asks for
/// a connection at the start of each call and never caches it.
#[async_trait]
pub trait AuthResolver: Send + Sync {
    /// Resolve the connection for a caller
    ///
    /// # Arguments
    /// * `caller` - Username or other caller identity supplied with the tool call
    ///
    /// # Returns
    /// * `Ok(Connection)` - Possibly incomplete; the bridge checks both fields itself
    /// * `Err(BridgeError::Auth)` - If the resolver could not produce a connection
    async fn resolve(&self, caller: &str) -> Result<Connection>;
}

/// Supplies the JIRA endpoint and token that DevOps Center should use when
/// pulling tasks on the caller's behalf.
#[async_trait]
pub trait JiraCredentialSource: Send + Sync {
    /// # Returns
    /// * `Ok(JiraCredentials)` - Values to embed in the import request body
    /// * `Err(BridgeError::Auth)` - If no credentials are available for the caller
    async fn jira_credentials(&self, caller: &str) -> Result<JiraCredentials>;
}
