//! Line and time builders shared by unit tests and the integration test crate.

use crate::record::CLF_TIME_FORMAT;
use chrono::{DateTime, TimeZone, Utc};

/// Fixed instant used as "now" by most tests.
pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// Format a timestamp the way it appears between brackets in an access log.
pub fn clf_time(at: DateTime<Utc>) -> String {
    at.format(CLF_TIME_FORMAT).to_string()
}

/// A valid access log line for `user` requesting `path` at `at`.
pub fn access_line(user: &str, method: &str, path: &str, at: DateTime<Utc>) -> String {
    format!(
        "127.0.0.1 - {user} [{}] \"{method} {path} HTTP/1.0\" 200 123",
        clf_time(at)
    )
}

/// Same as [`access_line`] with an explicit status code.
pub fn access_line_with_status(user: &str, path: &str, status: u16, at: DateTime<Utc>) -> String {
    format!(
        "127.0.0.1 - {user} [{}] \"GET {path} HTTP/1.0\" {status} 512",
        clf_time(at)
    )
}
