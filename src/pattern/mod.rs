// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pattern definitions: the payload layer of the wire protocol.
//!
//! A pattern definition is the type-bearing substring of a pattern
//! command, shaped `:id[:loops]|slot|slot|...`. The leading `:` is the
//! pattern kind marker; the header names the pattern and optionally caps
//! the number of playback loops, and each `|`-delimited token after it is
//! one [`Slot`].
//!
//! # Examples
//!
//! ```
//! use lumen_lib::pattern::Pattern;
//!
//! let pattern = Pattern::decode(":ab:3|#F00,2s,1s|#00F,2s,1s").unwrap();
//! assert_eq!(pattern.id(), "ab");
//! assert_eq!(pattern.loops(), Some(3));
//! assert_eq!(pattern.slots().len(), 2);
//!
//! // No loop count means unbounded playback
//! let pattern = Pattern::decode(":ab|#F00,2s,1s").unwrap();
//! assert_eq!(pattern.loops(), None);
//! ```

mod slot;

pub use slot::{DEFAULT_TRANSITION, Slot};

use crate::error::DecodeError;

/// A light display pattern: an identifier, an optional loop count, and an
/// ordered sequence of slots.
///
/// Slot order is textual order is playback order. `loops` of `None` is
/// the unspecified sentinel: the pattern repeats until replaced.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pattern {
    id: String,
    loops: Option<i32>,
    slots: Vec<Slot>,
}

impl Pattern {
    /// Decodes a pattern definition string.
    ///
    /// The input must be the type-bearing substring, i.e. it starts with
    /// the `:` kind marker: `:id[:loops]|slot|slot|...` with zero or more
    /// slots.
    ///
    /// The header is permissive: a missing or empty loop field means
    /// unbounded playback, and a header that does not match the
    /// `:id[:loops]` shape at all yields an empty id rather than an
    /// error. Only an explicitly present, non-integer loop count is
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidLoopCount`] for a non-integer loop
    /// field, [`DecodeError::EmptyPattern`] for input that decomposes to
    /// zero tokens (unreachable through standard split semantics), and
    /// propagates the first slot decode failure.
    pub fn decode(input: &str) -> Result<Self, DecodeError> {
        let tokens: Vec<&str> = input.split('|').collect();
        let Some((header, slot_tokens)) = tokens.split_first() else {
            return Err(DecodeError::EmptyPattern {
                input: input.to_string(),
            });
        };

        // Header is `:id[:loops]`; the leading `:` makes segment 0 empty.
        let segments: Vec<&str> = header.split(':').collect();
        let (id, loops) = match segments.as_slice() {
            [_, id] => (id.trim().to_string(), None),
            [_, id, loops] => {
                let loops = loops.trim();
                let loops = if loops.is_empty() {
                    None
                } else {
                    Some(loops.parse().map_err(|_| DecodeError::InvalidLoopCount {
                        value: (*loops).to_string(),
                    })?)
                };
                (id.trim().to_string(), loops)
            }
            _ => (String::new(), None),
        };

        let slots = slot_tokens
            .iter()
            .map(|token| Slot::decode(token))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { id, loops, slots })
    }

    /// Encodes the pattern as a wire definition string.
    ///
    /// Emits `:id` (plus `:loops` when a count is set) followed by one
    /// `|`-delimited token per slot. `Pattern::decode` round-trips the
    /// result.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = match self.loops {
            Some(loops) => format!(":{}:{loops}", self.id),
            None => format!(":{}", self.id),
        };
        for slot in &self.slots {
            out.push('|');
            out.push_str(&slot.encode());
        }
        out
    }

    /// Returns the pattern identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the loop count, or `None` for unbounded playback.
    #[must_use]
    pub const fn loops(&self) -> Option<i32> {
        self.loops
    }

    /// Returns the slots in playback order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use std::time::Duration;

    #[test]
    fn decode_with_empty_loop_field() {
        let pattern = Pattern::decode(":ab:|#F00,2s,1s|#FFF,2s,1s|#00F,2s,1s").unwrap();
        assert_eq!(pattern.id(), "ab");
        assert_eq!(pattern.loops(), None);
        assert_eq!(pattern.slots().len(), 3);
    }

    #[test]
    fn decode_with_loop_count() {
        let pattern = Pattern::decode(":1:3|#F00,1s,2s|#0F0,1s,2s|#00f,1s,").unwrap();
        assert_eq!(pattern.id(), "1");
        assert_eq!(pattern.loops(), Some(3));
        assert_eq!(pattern.slots().len(), 3);
        // The trailing empty field leaves the last slot's transition at its default
        assert_eq!(pattern.slots()[2].transition(), "ease");
    }

    #[test]
    fn decode_without_loop_field() {
        let pattern = Pattern::decode(":ab|#F00,2s,1s|#FFF,2s,1s|#00F,2s,1s").unwrap();
        assert_eq!(pattern.id(), "ab");
        assert_eq!(pattern.loops(), None);
        assert_eq!(pattern.slots().len(), 3);
    }

    #[test]
    fn decode_header_only_has_no_slots() {
        let pattern = Pattern::decode(":ab:4").unwrap();
        assert_eq!(pattern.id(), "ab");
        assert_eq!(pattern.loops(), Some(4));
        assert!(pattern.slots().is_empty());
    }

    #[test]
    fn decode_trims_header_fields() {
        let pattern = Pattern::decode(": ab : 2 ").unwrap();
        assert_eq!(pattern.id(), "ab");
        assert_eq!(pattern.loops(), Some(2));
    }

    #[test]
    fn decode_rejects_non_integer_loops() {
        assert_eq!(
            Pattern::decode(":ab:many|#F00"),
            Err(DecodeError::InvalidLoopCount {
                value: "many".to_string()
            })
        );
    }

    #[test]
    fn decode_negative_loops_parse() {
        let pattern = Pattern::decode(":ab:-1").unwrap();
        assert_eq!(pattern.loops(), Some(-1));
    }

    #[test]
    fn odd_header_shapes_yield_empty_id() {
        // One segment (no ':' at all) and four segments are both tolerated
        for input in ["ab", ":a:b:c"] {
            let pattern = Pattern::decode(input).unwrap();
            assert_eq!(pattern.id(), "");
            assert_eq!(pattern.loops(), None);
        }
    }

    #[test]
    fn slots_preserve_textual_order() {
        let pattern = Pattern::decode(":p|#F00|#0F0|#00F").unwrap();
        let colors: Vec<_> = pattern.slots().iter().map(|s| s.color().unwrap()).collect();
        assert_eq!(
            colors,
            vec![
                Color::new(255, 0, 0),
                Color::new(0, 255, 0),
                Color::new(0, 0, 255)
            ]
        );
    }

    #[test]
    fn first_bad_slot_aborts_decode() {
        let err = Pattern::decode(":p|#F00|#XYZ,1s|#0F0").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidDigit { .. }));
    }

    #[test]
    fn decode_is_idempotent() {
        let input = ":ab:3|#F00,2s,1s";
        assert_eq!(Pattern::decode(input).unwrap(), Pattern::decode(input).unwrap());
    }

    #[test]
    fn encode_decode_round_trip() {
        for input in [
            ":ab:3|#F00,2s,1s|#0F0,500ms,1s,linear",
            ":ab|#F00,2s,1s",
            ":solo",
        ] {
            let pattern = Pattern::decode(input).unwrap();
            assert_eq!(Pattern::decode(&pattern.encode()).unwrap(), pattern);
        }
    }

    #[test]
    fn encode_omits_unspecified_loops() {
        let pattern = Pattern::decode(":ab|#F00,1s").unwrap();
        assert!(pattern.encode().starts_with(":ab|"));
    }

    #[test]
    fn slot_fade_and_hold_decode() {
        let pattern = Pattern::decode(":p|#F00,2s,1s").unwrap();
        let slot = &pattern.slots()[0];
        assert_eq!(slot.fade(), Duration::from_secs(2));
        assert_eq!(slot.hold(), Duration::from_secs(1));
    }
}
