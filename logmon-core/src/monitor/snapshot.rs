use crate::alarm::AlertEvent;
use crate::record::RequestRow;
use crate::stats::StatsSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the dashboard shows, read under a single lock.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorSnapshot {
    pub taken_at: DateTime<Utc>,

    /// Records in the retention window
    pub cached_records: usize,
    pub retention_seconds: u64,
    pub alarm_threshold: usize,
    pub alarm_active: bool,
    /// Most recent first
    pub alerts: Vec<AlertEvent>,
    pub last_requests: Vec<RequestRow>,

    /// Since the last short-term reset
    pub stats: StatsSnapshot,

    pub parse_errors: usize,
    pub tick_failures: u64,
}
