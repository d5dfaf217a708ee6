//! Short-term hit statistics.
//!
//! Counts accumulate from every ingested record until the dashboard asks for a reset.
//! Unlike the record store nothing here expires on its own.

mod aggregation;
mod counter;


pub use aggregation::{StatsAggregator, StatsSnapshot, StatusClasses};
pub use counter::HitCounter;
