//! MCP Server Library
//!
//! Host wiring for the JIRA bridge: layered configuration, telemetry, the
//! configuration-backed credential resolver and handler construction. The
//! `jira-devops-mcp` binary serves the handler over stdio.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::Config;
pub use setup::{create_handler, create_http_client, initialize_app, ConfigAuthResolver};
pub use telemetry::init_telemetry;
