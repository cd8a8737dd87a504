///! Badge message parsers
///!
///! The monitoring pipeline only guarantees loose text such as "99.95%" or
///! "142ms". These turn that text into typed values or a `ParseFailure`.

use regex::Regex;
use statusboard_common::ServiceStatus;
use std::sync::LazyLock;

use crate::error::{StatusError, StatusResult};

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Uptime at or above this is operational
pub const OPERATIONAL_UPTIME_PERCENT: f64 = 99.0;

/// Parse an uptime badge message like "99.95%" into a percentage.
pub fn parse_uptime(message: &str) -> StatusResult<f64> {
    let trimmed = message.trim();
    let number = trimmed
        .strip_suffix('%')
        .ok_or_else(|| StatusError::parse("uptime", message))?
        .trim();

    let value: f64 = number
        .parse()
        .map_err(|_| StatusError::parse("uptime", message))?;

    if !value.is_finite() || value < 0.0 {
        return Err(StatusError::parse("uptime", message));
    }

    Ok(value)
}

/// Map a parsed uptime percentage to a status.
///
/// `0` is down, anything below 99 is degraded, 99 and above is up.
pub fn derive_status(uptime_percent: f64) -> ServiceStatus {
    if uptime_percent == 0.0 {
        ServiceStatus::Down
    } else if uptime_percent < OPERATIONAL_UPTIME_PERCENT {
        ServiceStatus::Degraded
    } else {
        ServiceStatus::Up
    }
}

/// Parse a response-time badge message like "142ms" into milliseconds,
/// using the first run of digits.
pub fn parse_response_time(message: &str) -> StatusResult<u64> {
    let digits = DIGITS
        .find(message)
        .ok_or_else(|| StatusError::parse("response-time", message))?;

    digits
        .as_str()
        .parse()
        .map_err(|_| StatusError::parse("response-time", message))
}
