use anyhow::{Context, Result};
use bridge_core::{endpoints::parse_instance_url, models::REDACTED};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;

/// Prefix for structured environment overrides, e.g. `JIRA_BRIDGE__LOGGING__LEVEL`
const ENV_PREFIX: &str = "JIRA_BRIDGE";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub logging: LoggingConfig,
    #[serde(default)]
    pub devops: DevOpsConfig,
    #[serde(default)]
    pub jira: JiraConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

/// DevOps Center connection defaults plus per-user overrides
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct DevOpsConfig {
    /// Base URL of the DevOps Center instance, e.g. `https://acme.my.salesforce.com`
    #[serde(default)]
    pub instance_url: Option<String>,
    /// Access token used when a user has no token of their own
    #[serde(default)]
    pub access_token: Option<String>,
    /// Per-user connections keyed by username
    #[serde(default)]
    pub users: HashMap<String, UserConnection>,
}

#[derive(Deserialize, Serialize, Clone, Default)]
pub struct UserConnection {
    #[serde(default)]
    pub instance_url: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

/// JIRA values sent along with every import
#[derive(Deserialize, Serialize, Clone)]
pub struct JiraConfig {
    /// Named credential DevOps Center uses to reach JIRA
    pub named_credential: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            named_credential: "JiraNamedCredential".to_string(),
            url: None,
            token: None,
        }
    }
}

fn redact(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| REDACTED)
}

impl fmt::Debug for DevOpsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DevOpsConfig")
            .field("instance_url", &self.instance_url)
            .field("access_token", &redact(&self.access_token))
            .field("users", &self.users)
            .finish()
    }
}

impl fmt::Debug for UserConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserConnection")
            .field("instance_url", &self.instance_url)
            .field("access_token", &redact(&self.access_token))
            .finish()
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("named_credential", &self.named_credential)
            .field("url", &self.url)
            .field("token", &redact(&self.token))
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables and config files
    pub fn from_env() -> Result<Self> {
        let config_file = env::var("CONFIG_FILE").ok();
        let mut result = Self::from_sources(config_file.as_deref(), false)?;

        Self::apply_standard_env_vars(&mut result);

        Ok(result)
    }

    /// Load configuration from a specific file path
    pub fn from_file(path: &str) -> Result<Self> {
        let mut result = Self::from_sources(Some(path), true)?;

        Self::apply_standard_env_vars(&mut result);

        Ok(result)
    }

    /// Build from the embedded defaults, an optional file and `JIRA_BRIDGE__*` overrides
    pub fn from_sources(path: Option<&str>, file_required: bool) -> Result<Self> {
        let mut builder = ConfigBuilder::builder().add_source(File::from_str(
            include_str!("../config/default.toml"),
            FileFormat::Toml,
        ));

        if let Some(path) = path {
            builder = builder.add_source(
                File::with_name(path)
                    .required(file_required)
                    .format(FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Apply standard environment variables (DEVOPS_INSTANCE_URL, JIRA_TOKEN, LOG_LEVEL, ...)
    /// This provides compatibility with common deployment patterns
    fn apply_standard_env_vars(config: &mut Config) {
        config.apply_overrides(|name| env::var(name).ok());
    }

    /// Apply standard variables read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(instance_url) = lookup("DEVOPS_INSTANCE_URL") {
            self.devops.instance_url = Some(instance_url);
        }

        if let Some(access_token) = lookup("DEVOPS_ACCESS_TOKEN") {
            self.devops.access_token = Some(access_token);
        }

        if let Some(url) = lookup("JIRA_URL") {
            self.jira.url = Some(url);
        }

        if let Some(token) = lookup("JIRA_TOKEN") {
            self.jira.token = Some(token);
        }

        if let Some(named_credential) = lookup("JIRA_NAMED_CREDENTIAL") {
            self.jira.named_credential = named_credential;
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.logging.level = log_level;
        }
    }

    /// Number of users with their own connection entry
    pub fn user_count(&self) -> usize {
        self.devops.users.len()
    }

    /// Validate the configuration
    ///
    /// Credentials are not required here; a missing token or URL surfaces as a
    /// fault on the call that needs it.
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        if let Some(url) = non_blank(&self.devops.instance_url) {
            parse_instance_url(url)
                .with_context(|| format!("Invalid devops.instance_url: {url}"))?;
        }

        for (username, user) in &self.devops.users {
            if let Some(url) = non_blank(&user.instance_url) {
                parse_instance_url(url).with_context(|| {
                    format!("Invalid instance_url for user '{username}': {url}")
                })?;
            }
        }

        if let Some(url) = non_blank(&self.jira.url) {
            parse_instance_url(url).with_context(|| format!("Invalid jira.url: {url}"))?;
        }

        if self.jira.named_credential.trim().is_empty() {
            return Err(anyhow::anyhow!("jira.named_credential cannot be empty"));
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
