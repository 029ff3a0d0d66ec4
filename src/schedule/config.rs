// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON configuration documents for controller nodes.
//!
//! A configuration document lists the patterns available on a node and
//! the day-of-week schedules that display them:
//!
//! ```json
//! {
//!   "patterns": [
//!     {
//!       "_id": "p1",
//!       "name": "alert",
//!       "slots": [{"color": "#F00", "hold": "2s", "transition": "1s"}]
//!     }
//!   ],
//!   "schedules": [
//!     {"_id": "s1", "name": "weekdays", "pattern": "alert",
//!      "mon": true, "tue": true, "wed": true, "thu": true, "fri": true}
//!   ]
//! }
//! ```
//!
//! Schedules reference patterns by name; [`Config::from_json`] resolves
//! the references and rejects dangling ones.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::error::DecodeError;
use crate::types::{Color, parse_duration};

/// Errors produced while reading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON of the expected shape.
    #[error("error parsing schedule JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A slot color failed to decode.
    #[error("error parsing color code in pattern {pattern}: {source}")]
    InvalidColor {
        /// The pattern the slot belongs to.
        pattern: String,
        /// The underlying decode failure.
        source: DecodeError,
    },

    /// A slot duration token failed to parse.
    #[error("invalid {field} duration in pattern {pattern}: {value:?}")]
    InvalidDuration {
        /// The pattern the slot belongs to.
        pattern: String,
        /// Which slot field held the token.
        field: &'static str,
        /// The offending token.
        value: String,
    },

    /// A schedule referenced a pattern name that is not in the document.
    #[error("no pattern named {name}")]
    UnknownPattern {
        /// The dangling reference.
        name: String,
    },
}

/// One light state within a configured pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSlot {
    /// The color to display.
    pub color: Color,
    /// How long to hold the color.
    pub hold: Duration,
    /// How long the transition into the color takes.
    pub transition: Duration,
}

/// A display pattern as configured on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// The pattern id.
    pub id: String,
    /// The human-readable pattern name schedules reference.
    pub name: String,
    /// The slots in display order.
    pub slots: Vec<PatternSlot>,
}

/// A day-of-week schedule displaying one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Schedule {
    /// The schedule id.
    pub id: String,
    /// The human-readable schedule name.
    pub name: String,
    /// The pattern this schedule displays.
    pub pattern: Pattern,
    pub mon: bool,
    pub tue: bool,
    pub wed: bool,
    pub thu: bool,
    pub fri: bool,
    pub sat: bool,
    pub sun: bool,
}

/// A complete node configuration: patterns and schedules by id.
#[derive(Debug, Clone, Default)]
pub struct Config {
    patterns: HashMap<String, Pattern>,
    schedules: HashMap<String, Schedule>,
}

impl Config {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration document.
    ///
    /// Slot colors go through the wire color codec and slot timings
    /// through the duration codec, so a document uses the same token
    /// grammar as the wire protocol. Each schedule's `pattern` field is
    /// resolved by name against the document's patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON, malformed color or
    /// duration tokens, or a schedule referencing an unknown pattern.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let doc: ConfigDoc = serde_json::from_str(document)?;

        let mut config = Self::new();
        for pattern_doc in doc.patterns {
            let mut slots = Vec::with_capacity(pattern_doc.slots.len());
            for slot_doc in pattern_doc.slots {
                slots.push(slot_doc.resolve(&pattern_doc.name)?);
            }
            config.add_pattern(Pattern {
                id: pattern_doc.id,
                name: pattern_doc.name,
                slots,
            });
        }

        for schedule_doc in doc.schedules {
            let pattern = config
                .pattern_by_name(&schedule_doc.pattern)
                .ok_or_else(|| ConfigError::UnknownPattern {
                    name: schedule_doc.pattern.clone(),
                })?
                .clone();
            config.schedules.insert(
                schedule_doc.id.clone(),
                Schedule {
                    id: schedule_doc.id,
                    name: schedule_doc.name,
                    pattern,
                    mon: schedule_doc.mon,
                    tue: schedule_doc.tue,
                    wed: schedule_doc.wed,
                    thu: schedule_doc.thu,
                    fri: schedule_doc.fri,
                    sat: schedule_doc.sat,
                    sun: schedule_doc.sun,
                },
            );
        }

        Ok(config)
    }

    /// Adds a pattern, keyed by its id.
    pub fn add_pattern(&mut self, pattern: Pattern) {
        self.patterns.insert(pattern.id.clone(), pattern);
    }

    /// Returns the configured patterns by id.
    #[must_use]
    pub const fn patterns(&self) -> &HashMap<String, Pattern> {
        &self.patterns
    }

    /// Returns the configured schedules by id.
    #[must_use]
    pub const fn schedules(&self) -> &HashMap<String, Schedule> {
        &self.schedules
    }

    /// Locates a pattern by its human-readable name.
    #[must_use]
    pub fn pattern_by_name(&self, name: &str) -> Option<&Pattern> {
        self.patterns.values().find(|p| p.name == name)
    }
}

// Raw document shapes; resolution happens in Config::from_json.

#[derive(Debug, Deserialize)]
struct ConfigDoc {
    #[serde(default)]
    patterns: Vec<PatternDoc>,
    #[serde(default)]
    schedules: Vec<ScheduleDoc>,
}

#[derive(Debug, Deserialize)]
struct PatternDoc {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(default)]
    slots: Vec<SlotDoc>,
}

#[derive(Debug, Deserialize)]
struct SlotDoc {
    color: String,
    #[serde(default)]
    hold: Option<String>,
    #[serde(default)]
    transition: Option<String>,
}

impl SlotDoc {
    fn resolve(self, pattern: &str) -> Result<PatternSlot, ConfigError> {
        let color = Color::decode(&self.color).map_err(|source| ConfigError::InvalidColor {
            pattern: pattern.to_string(),
            source,
        })?;
        let duration = |token: Option<&String>, field| match token {
            None => Ok(Duration::ZERO),
            Some(token) => {
                parse_duration(token).map_err(|_| ConfigError::InvalidDuration {
                    pattern: pattern.to_string(),
                    field,
                    value: token.clone(),
                })
            }
        };
        Ok(PatternSlot {
            color,
            hold: duration(self.hold.as_ref(), "hold")?,
            transition: duration(self.transition.as_ref(), "transition")?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleDoc {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    pattern: String,
    #[serde(default)]
    mon: bool,
    #[serde(default)]
    tue: bool,
    #[serde(default)]
    wed: bool,
    #[serde(default)]
    thu: bool,
    #[serde(default)]
    fri: bool,
    #[serde(default)]
    sat: bool,
    #[serde(default)]
    sun: bool,
}
