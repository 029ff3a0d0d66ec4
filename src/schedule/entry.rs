// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire schedule entries decoded from `~` command payloads.

use chrono::NaiveDate;

use crate::error::DecodeError;

/// A schedule entry decoded from the parts of a schedule command.
///
/// The payload fields are positional:
/// `id|start|end|expression|action|repeat`. Empty date fields mean the
/// entry is open-ended on that side, and a missing or empty repeat field
/// means the action repeats without bound. The cron expression is carried
/// verbatim; this library does not evaluate it.
///
/// # Examples
///
/// ```
/// use lumen_lib::command::Command;
///
/// let cmd = Command::decode("!~8|2015-07-04|2015-07-05|0 0 20 * * *|:ab|1").unwrap();
/// let entry = cmd.schedule().unwrap();
/// assert_eq!(entry.id(), "8");
/// assert_eq!(entry.expression(), "0 0 20 * * *");
/// assert_eq!(entry.action(), ":ab");
/// assert_eq!(entry.repeat(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleEntry {
    id: String,
    starts: Option<NaiveDate>,
    ends: Option<NaiveDate>,
    expression: String,
    action: String,
    repeat: Option<i32>,
}

impl ScheduleEntry {
    /// Decodes a schedule entry from ordered command parts.
    ///
    /// Fields are positional and cumulative like slot fields: only the
    /// first `k` parts are present, and a present part that trims to
    /// empty keeps its default (absent date, empty string, unbounded
    /// repeat).
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidDate`] when a non-empty start or end
    /// field is not an ISO `YYYY-MM-DD` date, and
    /// [`DecodeError::InvalidLoopCount`] when a non-empty repeat field is
    /// not an integer.
    pub fn from_parts(parts: &[String]) -> Result<Self, DecodeError> {
        let field = |index: usize| parts.get(index).map_or("", |p| p.trim());

        let starts = parse_date(field(1), "start")?;
        let ends = parse_date(field(2), "end")?;

        let repeat = field(5);
        let repeat = if repeat.is_empty() {
            None
        } else {
            Some(repeat.parse().map_err(|_| DecodeError::InvalidLoopCount {
                value: repeat.to_string(),
            })?)
        };

        Ok(Self {
            id: field(0).to_string(),
            starts,
            ends,
            expression: field(3).to_string(),
            action: field(4).to_string(),
            repeat,
        })
    }

    /// Returns the entry id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the first day the entry applies, if bounded.
    #[must_use]
    pub const fn starts(&self) -> Option<NaiveDate> {
        self.starts
    }

    /// Returns the last day the entry applies, if bounded.
    #[must_use]
    pub const fn ends(&self) -> Option<NaiveDate> {
        self.ends
    }

    /// Returns the cron expression, verbatim.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the command string to run when the entry fires.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the repeat count, or `None` for unbounded repetition.
    #[must_use]
    pub const fn repeat(&self) -> Option<i32> {
        self.repeat
    }
}

fn parse_date(value: &str, field: &'static str) -> Result<Option<NaiveDate>, DecodeError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DecodeError::InvalidDate {
            field,
            value: value.to_string(),
        })
}
