use crate::record::LogRecord;
use crate::stats::counter::HitCounter;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusClasses {
    pub ok: u64,          // 2xx
    pub redirect: u64,    // 3xx
    pub client_err: u64,  // 4xx
    pub server_err: u64,  // 5xx
    pub other: u64,
}

impl StatusClasses {
    fn record(&mut self, status: u16) {
        match status {
            200..=299 => self.ok += 1,
            300..=399 => self.redirect += 1,
            400..=499 => self.client_err += 1,
            500..=599 => self.server_err += 1,
            _ => self.other += 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    sections: HitCounter,
    users: HitCounter,

    // Short-term counters
    total_hits: u64,
    body_bytes: u64,
    status: StatusClasses,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self, section: &str, user: &str) {
        self.sections.increment(section);
        self.users.increment(user);
        self.total_hits += 1;
    }

    /// Count a parsed record: section, user, status class and body size.
    pub fn record(&mut self, record: &LogRecord) {
        self.record_hit(&record.section, &record.remote_user);
        self.status.record(record.status_code);
        self.body_bytes = self.body_bytes.saturating_add(record.body_bytes);
    }

    pub fn top_sections(&self, n: usize) -> Vec<(String, u64)> {
        self.sections.top(n)
    }

    pub fn top_users(&self, n: usize) -> Vec<(String, u64)> {
        self.users.top(n)
    }

    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    pub fn distinct_sections(&self) -> usize {
        self.sections.len()
    }

    pub fn reset(&mut self) {
        self.sections.clear();
        self.users.clear();
        self.total_hits = 0;
        self.body_bytes = 0;
        self.status = StatusClasses::default();
    }

    pub fn snapshot(&self, top_sections: usize, top_users: usize) -> StatsSnapshot {
        StatsSnapshot {
            total_hits: self.total_hits,
            body_bytes: self.body_bytes,
            status: self.status,
            top_sections: self.top_sections(top_sections),
            top_users: self.top_users(top_users),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub total_hits: u64,
    pub body_bytes: u64,
    pub status: StatusClasses,
    pub top_sections: Vec<(String, u64)>,
    pub top_users: Vec<(String, u64)>,
}
