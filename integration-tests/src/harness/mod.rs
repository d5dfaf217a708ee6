mod log_file;
pub mod tracing;
mod wait;

pub use log_file::TestLogFile;
pub use tracing::{CapturedEvent, captured_events, init_test_tracing};
pub use wait::wait_until;
