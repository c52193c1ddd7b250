use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;
use voice_agent_brain::{config, server};

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

/// Validates a filter such as `info` or `warn,voice_agent_brain=debug`.
///
/// Every directive must end in a valid level; a bare word that is not a level
/// would otherwise be read as a target name and silently log everything.
fn build_env_filter(filter: &str) -> Result<EnvFilter> {
    for directive in filter.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let level = directive
            .rsplit_once('=')
            .map_or(directive, |(_, level)| level);
        validate_log_level(level)?;
    }
    EnvFilter::try_new(filter)
        .map_err(|e| anyhow::anyhow!("Invalid log filter: '{}': {}", filter, e))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Determine log level: environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    let env_filter = match build_env_filter(&log_level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt().with_env_filter(env_filter).json().init();

    info!(
        "Starting Voice Agent Brain server with log level: {}",
        log_level
    );
    info!("Configuration loaded successfully");

    server::run(config).await?;

    Ok(())
}
