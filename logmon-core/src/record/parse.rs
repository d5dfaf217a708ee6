use crate::record::error::ParseError;
use crate::record::section::section_of;
use crate::record::types::LogRecord;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// `10/Oct/2000:13:55:36 -0700`
pub const CLF_TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

// remote_addr ident remote_user [time_local] "request" status bytes [combined-log extras]
static ACCESS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\S+) (\S+) (\S+) \[([^\]]+)\] "([^"]*)" (\S+) (\S+)(?:\s.*)?$"#)
        .expect("access line pattern is valid")
});

/// Parse one access log line, stamping it as processed at `processed_at`.
pub fn parse_line(raw: &str, processed_at: DateTime<Utc>) -> Result<LogRecord, ParseError> {
    let line = raw.trim_end_matches(['\r', '\n']);

    let caps = ACCESS_LINE.captures(line).ok_or(ParseError::Malformed)?;

    let remote_addr = &caps[1];
    let remote_user = &caps[3];
    let time_local = parse_time(&caps[4])?;
    let request = &caps[5];
    let status_code = parse_status(&caps[6])?;
    let body_bytes = parse_body_bytes(&caps[7])?;

    let mut tokens = request.split_whitespace();
    let (Some(method), Some(path)) = (tokens.next(), tokens.next()) else {
        return Err(ParseError::IncompleteRequest {
            request: request.to_string(),
        });
    };

    Ok(LogRecord {
        remote_addr: remote_addr.to_string(),
        remote_user: remote_user.to_string(),
        time_local,
        method: method.to_string(),
        path: path.to_string(),
        section: section_of(path).to_string(),
        status_code,
        body_bytes,
        processed_at,
        raw: line.to_string(),
    })
}

impl LogRecord {
    /// Parse a line stamped with the current system time.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        parse_line(raw, Utc::now())
    }
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_str(value, CLF_TIME_FORMAT)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ParseError::InvalidTimestamp {
            value: value.to_string(),
        })
}

fn parse_status(value: &str) -> Result<u16, ParseError> {
    match value.parse::<u16>() {
        Ok(status) if (100..=999).contains(&status) => Ok(status),
        _ => Err(ParseError::InvalidStatus {
            value: value.to_string(),
        }),
    }
}

fn parse_body_bytes(value: &str) -> Result<u64, ParseError> {
    if value == "-" {
        return Ok(0);
    }

    value.parse::<u64>().map_err(|_| ParseError::InvalidBodyBytes {
        value: value.to_string(),
    })
}
