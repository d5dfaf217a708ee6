use thiserror::Error;

/// Why a line could not become a record.
///
/// Never fatal: the monitor records the failure next to the offending line and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line does not match the access log format")]
    Malformed,

    #[error("request line '{request}' needs at least a method and a path")]
    IncompleteRequest { request: String },

    #[error("invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },

    #[error("invalid status code '{value}'")]
    InvalidStatus { value: String },

    #[error("invalid body size '{value}'")]
    InvalidBodyBytes { value: String },
}
