use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub remote_addr: String,
    /// `-` when the client was not authenticated
    pub remote_user: String,
    /// Timestamp embedded in the line, normalized to UTC
    pub time_local: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub section: String,
    pub status_code: u16,
    pub body_bytes: u64,
    /// When the monitor ingested the line
    pub processed_at: DateTime<Utc>,
    pub raw: String,
}

impl LogRecord {
    /// Timestamp used for retention: ingestion time or the embedded log time.
    pub fn effective_timestamp(&self, ignore_timestamp: bool) -> DateTime<Utc> {
        if ignore_timestamp {
            self.processed_at
        } else {
            self.time_local
        }
    }

    /// The request line as it appeared between the quotes, minus the protocol.
    pub fn request(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Display projection of a record for "last requests" tables.
///
/// An empty store is represented by a single [`RequestRow::placeholder`] so the table
/// always has one row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestRow {
    pub remote_addr: String,
    pub remote_user: String,
    pub time_local: String,
    pub request: String,
    pub section: String,
    pub status: String,
}

impl RequestRow {
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&LogRecord> for RequestRow {
    fn from(record: &LogRecord) -> Self {
        Self {
            remote_addr: record.remote_addr.clone(),
            remote_user: record.remote_user.clone(),
            time_local: record.time_local.to_rfc3339(),
            request: record.request(),
            section: record.section.clone(),
            status: record.status_code.to_string(),
        }
    }
}
