//! Access log records.
//!
//! One appended line of the monitored file becomes one [`LogRecord`]:
//!
//! raw line
//! parse_line
//! LogRecord (section derived by section_of)
//!
//! Records are immutable once parsed. The store prunes them, nothing mutates them.

mod error;
mod parse;
mod section;
mod types;


pub use error::ParseError;
pub use parse::{CLF_TIME_FORMAT, parse_line};
pub use section::section_of;
pub use types::{LogRecord, RequestRow};
