use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    // IO
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parsing
    #[error("failed to parse HCL in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    // Monitor
    #[error("log file path is empty")]
    EmptyLogFilePath,

    #[error("retention_seconds must be greater than 0")]
    ZeroRetention,

    #[error("alarm_threshold must be greater than 0")]
    ZeroAlarmThreshold,

    #[error("tick_interval_ms must be greater than 0")]
    ZeroTickInterval,

    #[error("tick interval of {tick_ms}ms is not shorter than the {retention_seconds}s retention window")]
    TickNotShorterThanRetention { tick_ms: u64, retention_seconds: u64 },

    // Dashboard
    #[error("dashboard refresh_ms must be greater than 0")]
    ZeroRefresh,
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Operator-facing advice for errors that have an obvious fix.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::EmptyLogFilePath => Some(
                "Tell logmon which access log to follow.\n\
                 \n\
                 Either pass --log-file, set LOG_FILE_PATH, or add to the config file:\n\
                 \n\
                 monitor = {\n\
                 \x20 log_file_path = \"/var/log/nginx/access.log\"\n\
                 }",
            ),

            Self::TickNotShorterThanRetention { .. } => Some(
                "The tick prunes the cache and evaluates the alarm. It must run many times per\n\
                 retention window, otherwise records linger past their expiry.\n\
                 \n\
                 Lower tick_interval_ms or raise retention_seconds.",
            ),

            Self::ZeroAlarmThreshold => Some(
                "A threshold of 0 would keep the alarm on permanently.\n\
                 \n\
                 alarm_threshold is the number of records cached within the retention window.",
            ),

            _ => None,
        }
    }
}
