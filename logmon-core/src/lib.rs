pub mod alarm;
pub mod cli;
pub mod clock;
pub mod conf;
pub mod logging;
pub mod monitor;
pub mod record;
pub mod stats;
pub mod store;
pub mod tail;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use monitor::{LogMonitor, MonitorHandle};
