use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

const LOG_FILE_NAME: &str = "chatsync.log";

/// Keeps the background log writer alive; drop it only at process exit.
#[must_use]
pub struct LoggingGuard {
    _writer: Option<WorkerGuard>,
}

pub fn init(config: &LogConfig) -> Result<LoggingGuard, AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::never(directory, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer)
                .try_init()
                .map_err(AppError::LoggingInit)?;

            Ok(LoggingGuard {
                _writer: Some(guard),
            })
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(AppError::LoggingInit)?;

            Ok(LoggingGuard { _writer: None })
        }
    }
}
