//! Tracing setup: readable lines on stderr, JSON lines in a daily-rolled
//! file under `logging.dir`.

use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{DashboardError, Result};

fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        DashboardError::Config(format!("Invalid logging filter '{directives}': {e}"))
    })
}

/// `RUST_LOG` takes precedence over the configured directives.
pub fn filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_filter(&config.filter),
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer when dropped; `main` holds it
/// until exit.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    fs::create_dir_all(&config.dir)?;
    let appender = tracing_appender::rolling::daily(&config.dir, &config.file);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter(config)?)
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| DashboardError::Config(format!("Logging already initialised: {e}")))?;
    Ok(guard)
}
