// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire duration token parsing.
//!
//! Slot timing fields are written as `<integer><unit>` tokens, e.g. `2s`
//! or `500ms`. Units are `ns`, `us`, `ms`, `s`, `m`, and `h`.

use std::time::Duration;

use thiserror::Error;

/// Error produced when a duration token cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}: {token:?}")]
pub struct DurationParseError {
    /// The offending token.
    pub token: String,
    /// What was wrong with it.
    message: &'static str,
}

impl DurationParseError {
    fn new(token: &str, message: &'static str) -> Self {
        Self {
            token: token.to_string(),
            message,
        }
    }
}

/// Parses a duration token of the form `<integer><unit>`.
///
/// The magnitude is a non-negative integer and the unit is one of `ns`,
/// `us`, `ms`, `s`, `m`, or `h`. Compound (`1h30m`) and fractional
/// (`1.5s`) tokens are rejected.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lumen_lib::types::parse_duration;
///
/// assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
/// assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
/// assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
/// ```
///
/// # Errors
///
/// Returns [`DurationParseError`] when the token is empty, has no unit,
/// has an unknown unit, or the magnitude is not a non-negative integer.
pub fn parse_duration(token: &str) -> Result<Duration, DurationParseError> {
    if token.is_empty() {
        return Err(DurationParseError::new(token, "empty duration token"));
    }

    let unit_start = token
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| DurationParseError::new(token, "missing duration unit"))?;
    let (magnitude, unit) = token.split_at(unit_start);

    if magnitude.is_empty() {
        return Err(DurationParseError::new(token, "missing duration magnitude"));
    }
    let magnitude: u64 = magnitude
        .parse()
        .map_err(|_| DurationParseError::new(token, "invalid duration magnitude"))?;

    let duration = match unit {
        "ns" => Duration::from_nanos(magnitude),
        "us" => Duration::from_micros(magnitude),
        "ms" => Duration::from_millis(magnitude),
        "s" => Duration::from_secs(magnitude),
        "m" => Duration::from_secs(magnitude.saturating_mul(60)),
        "h" => Duration::from_secs(magnitude.saturating_mul(3600)),
        _ => return Err(DurationParseError::new(token, "unknown duration unit")),
    };
    Ok(duration)
}

/// Encodes a duration as a wire token.
///
/// Picks the largest unit that divides the value exactly, so that
/// `parse_duration` round-trips it. Zero encodes as `0s`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lumen_lib::types::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(2)), "2s");
/// assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
/// assert_eq!(format_duration(Duration::from_secs(90)), "90s");
/// assert_eq!(format_duration(Duration::from_secs(7200)), "2h");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    const UNITS: [(u128, &str); 6] = [
        (3_600_000_000_000, "h"),
        (60_000_000_000, "m"),
        (1_000_000_000, "s"),
        (1_000_000, "ms"),
        (1_000, "us"),
        (1, "ns"),
    ];
    for (scale, unit) in UNITS {
        if nanos % scale == 0 {
            return format!("{}{unit}", nanos / scale);
        }
    }
    unreachable!("the ns scale divides every value")
}
