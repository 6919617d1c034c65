use anyhow::{Context, Result};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

use crate::config::{Config, LogFormat, LoggingConfig};

/// Initialize the tracing subscriber for logging
///
/// Everything is written to stderr: stdout carries the MCP stdio transport.
pub fn init_telemetry(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(config)?;

    let registry = Registry::default().with(env_filter);

    match config.format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true);

            registry.with(fmt_layer).try_init()
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_current_span(false)
                .flatten_event(true);

            registry.with(fmt_layer).try_init()
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false);

            registry.with(fmt_layer).try_init()
        }
    }
    .context("Failed to install tracing subscriber")?;

    tracing::info!(
        log_level = %config.level,
        log_format = ?config.format,
        "Telemetry initialized"
    );

    Ok(())
}

/// `RUST_LOG` wins over the configured level
fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .context("Invalid log level configuration")
}

/// Log server startup information
///
/// Only whether credentials are present is logged, never their values.
pub fn log_startup_info(config: &Config) {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        instance_url = config.devops.instance_url.as_deref().unwrap_or("<unset>"),
        default_token = config.devops.access_token.is_some(),
        users = config.user_count(),
        jira_url = config.jira.url.as_deref().unwrap_or("<unset>"),
        jira_token = config.jira.token.is_some(),
        named_credential = %config.jira.named_credential,
        "JIRA bridge MCP server starting up"
    );
}

/// Validate the configuration once and log the outcome
pub fn validate_and_log(config: &Config) -> Result<()> {
    match config.validate() {
        Ok(()) => {
            tracing::info!("Configuration validation passed");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Configuration validation failed");
            Err(e)
        }
    }
}

/// Log server shutdown information
pub fn log_shutdown_info(reason: &str) {
    tracing::info!(reason = reason, "JIRA bridge MCP server shutting down");
}
