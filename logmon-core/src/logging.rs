use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_FILE_PREFIX: &str = "logmon.log";

/// Initialize the logging system with JSON formatting and environment-based filtering
///
/// This function sets up the logging infrastructure using tracing-subscriber:
/// - Uses environment variables for log level filtering (defaults to "info" if not set)
/// - Configures JSON output format for structured logging
/// - Flattens event fields for cleaner log output
/// - Writes to a daily rotated file under `log_dir` when given, to stderr otherwise
///
/// The returned guard flushes the file writer on drop and must be kept alive.
pub fn init_normal_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            fmt()
                .with_env_filter(filter)
                .json()
                .flatten_event(true)
                .with_writer(writer)
                .init();

            Some(guard)
        }
        None => {
            fmt()
                .with_env_filter(filter)
                .json()
                .flatten_event(true)
                .with_writer(std::io::stderr)
                .init();

            None
        }
    }
}

pub fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // If tokio-console is enabled, DO NOT install the normal subscriber
    if std::env::var("TOKIO_CONSOLE").is_ok() {
        init_console_logging();
        None
    } else {
        init_normal_logging(log_dir)
    }
}

fn init_console_logging() {
    console_subscriber::init();
}
