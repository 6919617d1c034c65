//! Mock implementation of the credential collaborator traits
//!
//! Provides a thread-safe resolver with:
//! - Fixed connection and JIRA credentials
//! - Error injection for the next resolution
//! - Call tracking for verification

use std::sync::Arc;

use async_trait::async_trait;
use bridge_core::{
    AuthResolver, BridgeError, Connection, JiraCredentialSource, JiraCredentials, Result,
};
use parking_lot::Mutex;

/// Mock implementation of [`AuthResolver`] and [`JiraCredentialSource`]
///
/// Clones share state, so a test can keep one handle while the code under
/// test holds another behind `Arc<dyn AuthResolver>`.
#[derive(Clone)]
pub struct MockAuthResolver {
    connection: Arc<Mutex<Connection>>,
    jira: Arc<Mutex<JiraCredentials>>,
    error_injection: Arc<Mutex<Option<BridgeError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl MockAuthResolver {
    /// Resolver pointing at the given instance with a fixed token
    pub fn new(instance_url: impl Into<String>) -> Self {
        Self::with_connection(Connection::new(crate::fixtures::TEST_ACCESS_TOKEN, instance_url))
    }

    /// Resolver returning exactly this connection, complete or not
    pub fn with_connection(connection: Connection) -> Self {
        Self {
            connection: Arc::new(Mutex::new(connection)),
            jira: Arc::new(Mutex::new(crate::fixtures::test_jira_credentials())),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Resolver whose connection has no access token
    pub fn without_token(instance_url: impl Into<String>) -> Self {
        Self::with_connection(Connection::new("", instance_url))
    }

    /// Resolver whose connection has no instance URL
    pub fn without_instance_url() -> Self {
        Self::with_connection(Connection::new(crate::fixtures::TEST_ACCESS_TOKEN, ""))
    }

    /// Replace the JIRA credentials handed to importers
    pub fn set_jira_credentials(&self, credentials: JiraCredentials) {
        *self.jira.lock() = credentials;
    }

    /// Inject error for next resolution
    pub fn inject_error(&self, error: BridgeError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.contains(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    fn check_error_injection(&self) -> Result<()> {
        if let Some(error) = self.error_injection.lock().take() {
            return Err(error);
        }
        Ok(())
    }

    fn record_call(&self, method: &str, caller: &str) {
        self.call_history.lock().push(format!("{method}({caller})"));
    }
}

#[async_trait]
impl AuthResolver for MockAuthResolver {
    async fn resolve(&self, caller: &str) -> Result<Connection> {
        self.record_call("resolve", caller);
        self.check_error_injection()?;
        Ok(self.connection.lock().clone())
    }
}

#[async_trait]
impl JiraCredentialSource for MockAuthResolver {
    async fn jira_credentials(&self, caller: &str) -> Result<JiraCredentials> {
        self.record_call("jira_credentials", caller);
        self.check_error_injection()?;
        Ok(self.jira.lock().clone())
    }
}
