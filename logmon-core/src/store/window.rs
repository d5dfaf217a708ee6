use crate::record::{LogRecord, RequestRow};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Records cached for the retention window, oldest first.
///
/// Insertion order is trusted to be file order, so nothing is sorted or de-duplicated on
/// the way in. Pruning keeps the order of the survivors.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: VecDeque<LogRecord>,
    ignore_timestamp: bool,
}

impl RecordStore {
    pub fn new(ignore_timestamp: bool) -> Self {
        Self {
            records: VecDeque::new(),
            ignore_timestamp,
        }
    }

    pub fn ingest(&mut self, record: LogRecord) {
        self.records.push_back(record);
    }

    /// Drop every record whose effective timestamp is strictly older than `cutoff`.
    ///
    /// Returns how many records were removed.
    pub fn prune_older_than(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.records.len();
        let ignore_timestamp = self.ignore_timestamp;

        // Embedded log times are not guaranteed to be monotonic, so this cannot stop at
        // the first survivor the way an ingestion-time-only window could.
        self.records
            .retain(|r| r.effective_timestamp(ignore_timestamp) >= cutoff);

        before - self.records.len()
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    /// The `n` most recent records as display rows, oldest first.
    ///
    /// An empty store yields exactly one placeholder row.
    pub fn last_n(&self, n: usize) -> Vec<RequestRow> {
        if self.records.is_empty() {
            return vec![RequestRow::placeholder()];
        }

        let skip = self.records.len().saturating_sub(n);
        self.records.iter().skip(skip).map(RequestRow::from).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter()
    }
}
