// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Slot specifications: one timed color step within a pattern.

use std::time::Duration;

use crate::error::DecodeError;
use crate::types::{Color, format_duration, parse_duration};

/// Default transition curve applied when a slot omits the field.
pub const DEFAULT_TRANSITION: &str = "ease";

/// One step of a pattern: a color with fade/hold timing and a transition
/// curve.
///
/// A slot specification is a comma-delimited field sequence in the fixed
/// order `color,fade,hold,transition`. Trailing fields may be omitted and
/// any present field may be left empty; both keep the field's default.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lumen_lib::pattern::Slot;
/// use lumen_lib::types::Color;
///
/// let slot = Slot::decode("#F00,2s,1s").unwrap();
/// assert_eq!(slot.color(), Some(Color::new(255, 0, 0)));
/// assert_eq!(slot.fade(), Duration::from_secs(2));
/// assert_eq!(slot.hold(), Duration::from_secs(1));
/// assert_eq!(slot.transition(), "ease");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Slot {
    color: Option<Color>,
    fade: Duration,
    hold: Duration,
    transition: String,
}

impl Slot {
    /// Decodes a slot specification.
    ///
    /// The input is split on `,` into up to four positional fields:
    /// color, fade, hold, transition. Only the fields present in the
    /// input are assigned; the rest keep their defaults (absent color,
    /// zero durations, `"ease"` transition). A present field that trims
    /// to empty also keeps its default; in particular an empty color
    /// field leaves the color absent, meaning "hold the current color".
    ///
    /// # Errors
    ///
    /// Propagates [`DecodeError::InvalidLength`] /
    /// [`DecodeError::InvalidDigit`] from a malformed color field and
    /// returns [`DecodeError::InvalidDuration`] for malformed fade or
    /// hold fields. A field sequence that somehow decomposes to zero
    /// fields fails with [`DecodeError::EmptySlot`].
    pub fn decode(input: &str) -> Result<Self, DecodeError> {
        let fields: Vec<&str> = input.split(',').collect();
        Self::from_fields(&fields)
    }

    // Assigns each present field by position; the rest keep defaults.
    fn from_fields(fields: &[&str]) -> Result<Self, DecodeError> {
        if fields.is_empty() {
            return Err(DecodeError::EmptySlot);
        }
        let mut slot = Self::default();
        for (index, field) in fields.iter().take(4).enumerate() {
            let value = field.trim();
            if value.is_empty() {
                continue;
            }
            match index {
                0 => slot.color = Some(Color::decode(value)?),
                1 => {
                    slot.fade = parse_duration(value)
                        .map_err(|source| DecodeError::InvalidDuration { field: "fade", source })?;
                }
                2 => {
                    slot.hold = parse_duration(value)
                        .map_err(|source| DecodeError::InvalidDuration { field: "hold", source })?;
                }
                3 => slot.transition = value.to_string(),
                _ => unreachable!("field iteration is capped at 4"),
            }
        }
        Ok(slot)
    }

    /// Encodes the slot as a wire specification.
    ///
    /// All four fields are always emitted (`,`-joined), with an empty
    /// color field when the color is absent. `Slot::decode` round-trips
    /// the result.
    #[must_use]
    pub fn encode(&self) -> String {
        let color = self.color.map(|c| c.encode()).unwrap_or_default();
        format!(
            "{color},{},{},{}",
            format_duration(self.fade),
            format_duration(self.hold),
            self.transition
        )
    }

    /// Returns the slot color, if one was specified.
    ///
    /// `None` means "no change": the controller holds its current color.
    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns the fade-in duration (zero if omitted).
    #[must_use]
    pub const fn fade(&self) -> Duration {
        self.fade
    }

    /// Returns the hold duration (zero if omitted).
    #[must_use]
    pub const fn hold(&self) -> Duration {
        self.hold
    }

    /// Returns the transition curve name.
    #[must_use]
    pub fn transition(&self) -> &str {
        &self.transition
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            color: None,
            fade: Duration::ZERO,
            hold: Duration::ZERO,
            transition: DEFAULT_TRANSITION.to_string(),
        }
    }
}
