//! The log monitor engine.
//!
//! [`LogMonitor`] owns the record store, the short-term stats, the alarm and the error
//! log. Two activities mutate them: the ingest task (one call per appended line) and the
//! tick task (prune, then evaluate the alarm). Both go through one mutex, so they never
//! interleave. Readers take the same lock and get owned copies back.
//!
//! line source
//! handle_line
//! RecordStore + StatsAggregator
//! tick: prune_older_than, AlarmEngine::evaluate
//! snapshot
//! dashboard

mod error;
mod log_monitor;
mod runtime;
mod snapshot;

#[cfg(test)]
mod tests;

pub use error::{ParseFailure, TickError};
pub use log_monitor::{LogMonitor, TickReport};
pub use runtime::MonitorHandle;
pub use snapshot::MonitorSnapshot;
