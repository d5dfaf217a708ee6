use chrono::Duration as ChronoDuration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_RETENTION_SECONDS: u64 = 120;
pub const DEFAULT_ALARM_THRESHOLD: usize = 10;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
pub const DEFAULT_REFRESH_MS: u64 = 10_000;

/// Represents the whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogmonConfig {
    pub monitor: MonitorConfig,
    pub dashboard: DashboardConfig,
}

/// Settings of the monitor engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Access log to tail. Required.
    pub log_file_path: PathBuf,

    /// How long records stay cached.
    pub retention_seconds: u64,

    /// Number of cached records at which the traffic alarm goes off.
    ///
    /// An absolute count over the retention window, not a per-second rate.
    pub alarm_threshold: usize,

    /// Expire records by ingestion time instead of the time written in the line.
    /// Replayed or synthetic logs often carry stale or unordered timestamps.
    pub ignore_timestamp: bool,

    /// Period of the prune + alarm tick.
    pub tick_interval_ms: u64,

    /// Read the file from the beginning instead of only following new lines.
    pub read_from_start: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            log_file_path: PathBuf::new(),
            retention_seconds: DEFAULT_RETENTION_SECONDS,
            alarm_threshold: DEFAULT_ALARM_THRESHOLD,
            ignore_timestamp: true,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            read_from_start: false,
        }
    }
}

impl MonitorConfig {
    pub fn new(log_file_path: impl Into<PathBuf>) -> Self {
        Self {
            log_file_path: log_file_path.into(),
            ..Default::default()
        }
    }

    pub fn retention(&self) -> ChronoDuration {
        i64::try_from(self.retention_seconds)
            .ok()
            .and_then(ChronoDuration::try_seconds)
            .unwrap_or(ChronoDuration::MAX)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Settings of the console dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Redraw period; short-term stats are reset after every redraw.
    pub refresh_ms: u64,
    pub last_requests: usize,
    pub top_sections: usize,
    pub top_users: usize,

    /// Directory for the JSON log file. Logs go to stderr when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_ms: DEFAULT_REFRESH_MS,
            last_requests: 10,
            top_sections: 10,
            top_users: 5,
            log_dir: None,
        }
    }
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}
