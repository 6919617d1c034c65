use anyhow::{Context, Result};
use clap::Parser;
use mcp_server::{
    config::Config,
    setup::initialize_app,
    telemetry::{init_telemetry, log_shutdown_info, log_startup_info, validate_and_log},
};
use rmcp::{transport::stdio, ServiceExt};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "jira-devops-mcp")]
#[command(about = "MCP server bridging JIRA tasks into DevOps Center work items")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// DevOps Center instance URL override
    #[arg(long)]
    instance_url: Option<String>,

    /// Log level override
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(config_file) => Config::from_file(config_file)?,
        None => Config::from_env()?,
    };

    // Apply CLI overrides
    if let Some(ref instance_url) = cli.instance_url {
        config.devops.instance_url = Some(instance_url.clone());
    }

    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => "SIGINT",
                    _ = sigterm.recv() => "SIGTERM",
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to register SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
                "SIGINT"
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        "Ctrl-C"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(&cli).context("Failed to load configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;

    if validate_and_log(&config).is_err() {
        std::process::exit(1);
    }

    log_startup_info(&config);

    let handler = initialize_app(&config).context("Failed to initialize application")?;

    info!("Serving MCP over stdio");
    let service = handler
        .serve(stdio())
        .await
        .context("Failed to start MCP stdio service")?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(reason) => {
                    log_shutdown_info(&format!("{reason:?}"));
                    Ok(())
                }
                Err(e) => {
                    error!(error = %e, "MCP service error");
                    std::process::exit(3);
                }
            }
        }
        signal = shutdown_signal() => {
            log_shutdown_info(signal);
            Ok(())
        }
    }
}
