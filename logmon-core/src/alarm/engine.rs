use crate::alarm::types::{AlarmState, AlarmTransition, AlertEvent, AlertKind};
use chrono::{DateTime, Utc};

/// Traffic alarm over the number of cached records.
///
/// Enters breach at `hits >= threshold` and leaves it at `hits < threshold`. While a
/// breach is open the engine tracks the highest count seen, and writes it into the breach
/// event at recovery. That backfill is the only change ever made to an existing event.
#[derive(Debug, Clone)]
pub struct AlarmEngine {
    threshold: usize,

    // Breach
    peak_hits: Option<usize>,

    events: Vec<AlertEvent>,
}

impl AlarmEngine {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            peak_hits: None,
            events: Vec::new(),
        }
    }

    /// Active iff the latest event is a breach.
    pub fn is_active(&self) -> bool {
        self.events
            .last()
            .is_some_and(|e| e.kind == AlertKind::Breach)
    }

    pub fn state(&self) -> AlarmState {
        if self.is_active() {
            AlarmState::Breach
        } else {
            AlarmState::Normal
        }
    }

    /// Peak of the open breach episode, if any.
    pub fn peak_hits(&self) -> Option<usize> {
        self.peak_hits
    }

    /// Run one step of the state machine against the current record count.
    pub fn evaluate(&mut self, hits: usize, now: DateTime<Utc>) -> AlarmTransition {
        match self.state() {
            AlarmState::Normal if hits >= self.threshold => {
                self.open_breach(hits, now);
                AlarmTransition::Breached { hits }
            }

            AlarmState::Normal => AlarmTransition::Quiet,

            AlarmState::Breach if hits < self.threshold => {
                let peak = self.close_breach(hits, now);
                AlarmTransition::Recovered { hits, peak }
            }

            AlarmState::Breach => {
                let peak = self.peak_hits.map_or(hits, |p| p.max(hits));
                self.peak_hits = Some(peak);
                AlarmTransition::Held { hits, peak }
            }
        }
    }

    /// All events, most recent first.
    pub fn alerts(&self) -> Vec<AlertEvent> {
        self.events.iter().rev().cloned().collect()
    }

    /// All events in the order they were raised.
    pub fn history(&self) -> &[AlertEvent] {
        &self.events
    }

    fn open_breach(&mut self, hits: usize, now: DateTime<Utc>) {
        self.peak_hits = Some(hits);
        self.events.push(AlertEvent {
            kind: AlertKind::Breach,
            timestamp: now,
            hits,
        });
    }

    /// Finalize the open breach with its peak, then append the recovery.
    fn close_breach(&mut self, hits: usize, now: DateTime<Utc>) -> usize {
        let peak = self.peak_hits.take().unwrap_or(hits);

        if let Some(breach) = self
            .events
            .last_mut()
            .filter(|e| e.kind == AlertKind::Breach)
        {
            breach.hits = peak.max(breach.hits);
        }

        self.events.push(AlertEvent {
            kind: AlertKind::Recovery,
            timestamp: now,
            hits,
        });

        peak
    }
}
