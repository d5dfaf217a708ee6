use crate::record::ParseError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// A scheduled tick that could not run to completion.
///
/// Ticks that fail are counted and logged; the loop keeps going.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("monitor state lock was poisoned by a panicking writer")]
    StatePoisoned,
}

/// One entry of the error log: a line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    #[serde(serialize_with = "serialize_display")]
    pub cause: ParseError,
    pub line: String,
    pub at: DateTime<Utc>,
}

fn serialize_display<S: serde::Serializer>(err: &ParseError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(err)
}
