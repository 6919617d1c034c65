use anyhow::{Context, Result};
use async_trait::async_trait;
use bridge_core::{
    AuthResolver, BridgeError, Connection, JiraCredentialSource, JiraCredentials,
};
use devops_client::{TaskFetcher, TaskImporter};
use mcp_protocol::JiraBridgeHandler;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{Config, DevOpsConfig, JiraConfig};

const USER_AGENT: &str = concat!("jira-devops-mcp/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Credential collaborator backed by the loaded configuration
///
/// A user's own entry wins field by field over the defaults. Missing values
/// resolve to empty strings and are rejected by the client before any request.
#[derive(Debug, Clone)]
pub struct ConfigAuthResolver {
    devops: DevOpsConfig,
    jira: JiraConfig,
}

impl ConfigAuthResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            devops: config.devops.clone(),
            jira: config.jira.clone(),
        }
    }
}

#[async_trait]
impl AuthResolver for ConfigAuthResolver {
    async fn resolve(&self, caller: &str) -> bridge_core::Result<Connection> {
        let user = self.devops.users.get(caller);
        debug!(caller = caller, per_user = user.is_some(), "Resolving connection");

        let access_token = user
            .and_then(|u| u.access_token.clone())
            .or_else(|| self.devops.access_token.clone())
            .unwrap_or_default();
        let instance_url = user
            .and_then(|u| u.instance_url.clone())
            .or_else(|| self.devops.instance_url.clone())
            .unwrap_or_default();

        Ok(Connection::new(access_token, instance_url))
    }
}

#[async_trait]
impl JiraCredentialSource for ConfigAuthResolver {
    async fn jira_credentials(&self, _caller: &str) -> bridge_core::Result<JiraCredentials> {
        let url = self
            .jira
            .url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                BridgeError::Auth("JIRA URL is not configured (set JIRA_URL or jira.url)".into())
            })?;
        let token = self
            .jira
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                BridgeError::Auth(
                    "JIRA token is not configured (set JIRA_TOKEN or jira.token)".into(),
                )
            })?;

        Ok(JiraCredentials::new(
            self.jira.named_credential.clone(),
            url,
            token,
        ))
    }
}

/// Create the shared HTTP client
pub fn create_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Create the MCP handler wired to configuration-backed credentials
pub fn create_handler(config: &Config, client: reqwest::Client) -> JiraBridgeHandler {
    info!("Creating JIRA bridge handler");

    let credentials = Arc::new(ConfigAuthResolver::new(config));
    let fetcher = TaskFetcher::new(client.clone(), credentials.clone());
    let importer = TaskImporter::new(client, credentials.clone(), credentials);

    JiraBridgeHandler::new(fetcher, importer)
}

/// Initialize the complete application
pub fn initialize_app(config: &Config) -> Result<JiraBridgeHandler> {
    info!("Initializing application");

    let client = create_http_client()?;
    let handler = create_handler(config, client);

    info!(tools = ?handler.tool_names(), "Application initialized successfully");
    Ok(handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserConnection;

    fn config() -> Config {
        let mut config = Config::default();
        config.devops.instance_url = Some("https://acme.my.salesforce.com".to_string());
        config.devops.access_token = Some("00Ddefault".to_string());
        config.devops.users.insert(
            "jdoe".to_string(),
            UserConnection {
                instance_url: None,
                access_token: Some("00Djdoe".to_string()),
            },
        );
        config.jira.url = Some("https://acme.atlassian.net".to_string());
        config.jira.token = Some("jira-token".to_string());
        config
    }

    #[tokio::test]
    async fn test_per_user_token_overrides_default() {
        let resolver = ConfigAuthResolver::new(&config());

        let connection = resolver.resolve("jdoe").await.unwrap();
        assert_eq!(connection.access_token, "00Djdoe");
        assert_eq!(connection.instance_url, "https://acme.my.salesforce.com");

        let connection = resolver.resolve("someone-else").await.unwrap();
        assert_eq!(connection.access_token, "00Ddefault");
    }

    #[tokio::test]
    async fn test_unconfigured_connection_is_incomplete() {
        let resolver = ConfigAuthResolver::new(&Config::default());

        let connection = resolver.resolve("jdoe").await.unwrap();
        assert_eq!(connection.ensure_complete(), Err(BridgeError::MissingAccessToken));
    }

    #[tokio::test]
    async fn test_jira_credentials() {
        let resolver = ConfigAuthResolver::new(&config());

        let credentials = resolver.jira_credentials("jdoe").await.unwrap();
        assert_eq!(credentials.named_credential, "JiraNamedCredential");
        assert_eq!(credentials.url, "https://acme.atlassian.net");
        assert_eq!(credentials.token, "jira-token");
    }

    #[tokio::test]
    async fn test_missing_jira_token_is_auth_error() {
        let mut config = config();
        config.jira.token = None;
        let resolver = ConfigAuthResolver::new(&config);

        let err = resolver.jira_credentials("jdoe").await.unwrap_err();
        assert!(err.is_auth());
        assert!(err.to_string().contains("JIRA_TOKEN"));
    }

    #[test]
    fn test_initialize_app_registers_tools() {
        let handler = initialize_app(&config()).unwrap();
        assert_eq!(handler.tool_names(), vec!["get_jira_tasks", "import_jira_tasks"]);
    }
}
