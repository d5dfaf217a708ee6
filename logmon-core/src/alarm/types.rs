use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Breach,
    Recovery,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct AlertEvent {
    pub kind: AlertKind,
    pub timestamp: DateTime<Utc>,
    /// For a breach: the peak record count of the episode once it has recovered,
    /// the count at onset until then. For a recovery: the count when it recovered.
    pub hits: usize,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AlarmState {
    Normal,
    Breach,
}

/// Outcome of one evaluation step.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AlarmTransition {
    /// Normal -> Breach
    Breached { hits: usize },
    /// Breach -> Normal, with the finalized peak of the episode
    Recovered { hits: usize, peak: usize },
    /// Still in breach
    Held { hits: usize, peak: usize },
    /// Still normal
    Quiet,
}
