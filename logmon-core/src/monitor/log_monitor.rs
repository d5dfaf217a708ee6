use crate::alarm::{AlarmEngine, AlarmTransition, AlertEvent};
use crate::clock::{Clock, SystemClock};
use crate::conf::{ConfigError, MonitorConfig, validate_monitor};
use crate::monitor::error::{ParseFailure, TickError};
use crate::monitor::snapshot::MonitorSnapshot;
use crate::record::{RequestRow, parse_line};
use crate::stats::StatsAggregator;
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct MonitorState {
    store: RecordStore,
    stats: StatsAggregator,
    alarm: AlarmEngine,
    /// Never truncated.
    errors: Vec<ParseFailure>,
}

#[derive(Debug)]
pub struct LogMonitor {
    pub(crate) config: MonitorConfig,
    clock: Arc<dyn Clock>,
    state: Mutex<MonitorState>,

    ticks: AtomicU64,
    tick_failures: AtomicU64,
}

/// What one successful tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub pruned: usize,
    pub cached_records: usize,
    pub transition: AlarmTransition,
}

impl LogMonitor {
    pub fn new(config: MonitorConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build a monitor reading time from `clock`.
    ///
    /// Fails fast on invalid configuration, an empty log path included.
    pub fn with_clock(config: MonitorConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        validate_monitor(&config)?;

        let state = MonitorState {
            store: RecordStore::new(config.ignore_timestamp),
            stats: StatsAggregator::new(),
            alarm: AlarmEngine::new(config.alarm_threshold),
            errors: Vec::new(),
        };

        Ok(Self {
            config,
            clock,
            state: Mutex::new(state),
            ticks: AtomicU64::new(0),
            tick_failures: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Queries and ingestion never fail: every mutation leaves the state consistent, so a
    /// poisoned lock is still safe to use.
    fn lock_state(&self) -> MutexGuard<'_, MonitorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
impl LogMonitor {
    /// Leave the state lock poisoned, as a writer panicking mid-update would.
    pub(crate) fn poison_state(&self) {
        std::thread::scope(|s| {
            let writer = s.spawn(|| {
                let _guard = self.state.lock();
                panic!("writer panicked while holding the state lock");
            });
            assert!(writer.join().is_err());
        });
    }
}

/// Ingestion
impl LogMonitor {
    /// Ingest one appended line.
    ///
    /// Unparseable lines are recorded in the error log and otherwise ignored.
    pub fn handle_line(&self, raw: &str) {
        let now = self.clock.now();
        let parsed = parse_line(raw, now);

        let mut state = self.lock_state();
        match parsed {
            Ok(record) => {
                state.stats.record(&record);
                state.store.ingest(record);
            }
            Err(cause) => {
                tracing::debug!(error = %cause, line = raw, "dropping unparseable line");
                state.errors.push(ParseFailure {
                    cause,
                    line: raw.to_string(),
                    at: now,
                });
            }
        }
    }

    /// Clear the short-term section/user stats. The cache and alert history are untouched.
    pub fn reset_short_term_stats(&self) {
        self.lock_state().stats.reset();
    }

    pub fn clear_cached_stats(&self) {
        self.reset_short_term_stats();
    }
}

/// Tick
impl LogMonitor {
    /// Prune records older than the retention window, then evaluate the alarm once.
    pub fn tick(&self) -> Result<TickReport, TickError> {
        let now = self.clock.now();
        // A window reaching back past the start of time prunes nothing.
        let cutoff = now
            .checked_sub_signed(self.config.retention())
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(_) => {
                // Report this tick, let the next one run on the recovered state.
                self.state.clear_poison();
                return Err(TickError::StatePoisoned);
            }
        };

        let pruned = state.store.prune_older_than(cutoff);
        let cached_records = state.store.size();
        let transition = state.alarm.evaluate(cached_records, now);
        drop(state);

        self.ticks.fetch_add(1, Ordering::Relaxed);

        match transition {
            AlarmTransition::Breached { hits } => tracing::info!(
                hits,
                threshold = self.config.alarm_threshold,
                "high traffic alert raised"
            ),
            AlarmTransition::Recovered { hits, peak } => tracing::info!(
                hits,
                peak,
                threshold = self.config.alarm_threshold,
                "traffic back to normal"
            ),
            AlarmTransition::Held { .. } | AlarmTransition::Quiet => {}
        }

        Ok(TickReport {
            pruned,
            cached_records,
            transition,
        })
    }

    /// Run one tick, absorbing its failure.
    ///
    /// Used by the background loop, which must survive any single bad tick.
    pub fn run_tick(&self) -> Option<TickReport> {
        match self.tick() {
            Ok(report) => Some(report),
            Err(e) => {
                let failures = self.tick_failures.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::warn!(error = %e, failures, "monitor tick failed");
                None
            }
        }
    }

    /// Successful ticks so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn tick_failures(&self) -> u64 {
        self.tick_failures.load(Ordering::Relaxed)
    }
}

/// Queries (read-only)
impl LogMonitor {
    pub fn size(&self) -> usize {
        self.lock_state().store.size()
    }

    pub fn last_n(&self, n: usize) -> Vec<RequestRow> {
        self.lock_state().store.last_n(n)
    }

    pub fn top_sections(&self, n: usize) -> Vec<(String, u64)> {
        self.lock_state().stats.top_sections(n)
    }

    pub fn top_users(&self, n: usize) -> Vec<(String, u64)> {
        self.lock_state().stats.top_users(n)
    }

    /// Alert history, most recent first.
    pub fn alerts(&self) -> Vec<AlertEvent> {
        self.lock_state().alarm.alerts()
    }

    pub fn alarm_active(&self) -> bool {
        self.lock_state().alarm.is_active()
    }

    pub fn errors(&self) -> Vec<ParseFailure> {
        self.lock_state().errors.clone()
    }

    pub fn error_count(&self) -> usize {
        self.lock_state().errors.len()
    }

    pub fn snapshot(
        &self,
        last_n: usize,
        top_sections: usize,
        top_users: usize,
    ) -> MonitorSnapshot {
        let state = self.lock_state();

        MonitorSnapshot {
            taken_at: self.clock.now(),
            cached_records: state.store.size(),
            retention_seconds: self.config.retention_seconds,
            alarm_threshold: self.config.alarm_threshold,
            alarm_active: state.alarm.is_active(),
            alerts: state.alarm.alerts(),
            last_requests: state.store.last_n(last_n),
            stats: state.stats.snapshot(top_sections, top_users),
            parse_errors: state.errors.len(),
            tick_failures: self.tick_failures(),
        }
    }
}
