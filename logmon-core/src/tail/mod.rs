//! Sources of appended log lines.
//!
//! The monitor only needs lines in file order. [`FileTail`] follows a file on disk; any
//! `tokio::sync::mpsc::Receiver<String>` also works as a source, which is how tests feed
//! the monitor.

mod error;
mod file;
mod source;


pub use error::TailError;
pub use file::{DEFAULT_POLL_INTERVAL, FileTail};
pub use source::LineSource;
