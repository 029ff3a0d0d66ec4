// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color codec for wire color tokens.
//!
//! Color tokens follow the CSS color code forms `#RGB` and `#RRGGBB`.
//! Controllers have no alpha channel; a parsed color is always fully
//! opaque.

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// RGB color with 8-bit channels (0-255).
///
/// Parsed from wire tokens in either `#RGB` or `#RRGGBB` form and encoded
/// canonically as uppercase `#RRGGBB`. Immutable once parsed.
///
/// # Examples
///
/// ```
/// use lumen_lib::types::Color;
///
/// let color = Color::decode("#ABCDEF").unwrap();
/// assert_eq!(color.red(), 0xAB);
/// assert_eq!(color.green(), 0xCD);
/// assert_eq!(color.blue(), 0xEF);
///
/// // Short form expands each digit per the CSS rule
/// assert_eq!(Color::decode("#ABC").unwrap(), Color::decode("#AABBCC").unwrap());
///
/// // Canonical encoding round-trips
/// assert_eq!(color.encode(), "#ABCDEF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Creates a color from explicit channel values.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Decodes a wire color token.
    ///
    /// The token must start with `#` and carry either 3 hex digits (each
    /// channel is the digit duplicated, so `A` becomes `0xAA`) or 6 hex
    /// digits (two per channel). Hex digits are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidLength`] for any token that is not 4
    /// or 7 characters long (including tokens missing the `#` marker,
    /// which can never have a valid length AND a valid first digit), and
    /// [`DecodeError::InvalidDigit`] when a channel position holds a
    /// non-hex character or the marker is not `#`.
    pub fn decode(token: &str) -> Result<Self, DecodeError> {
        let bytes = token.as_bytes();
        match bytes.len() {
            4 | 7 if bytes[0] != b'#' => Err(DecodeError::InvalidDigit {
                token: token.to_string(),
            }),
            4 => Ok(Self::new(
                hex_channel(bytes[1], bytes[1], token)?,
                hex_channel(bytes[2], bytes[2], token)?,
                hex_channel(bytes[3], bytes[3], token)?,
            )),
            7 => Ok(Self::new(
                hex_channel(bytes[1], bytes[2], token)?,
                hex_channel(bytes[3], bytes[4], token)?,
                hex_channel(bytes[5], bytes[6], token)?,
            )),
            len => Err(DecodeError::InvalidLength {
                expected: [4, 7],
                actual: len,
            }),
        }
    }

    /// Encodes the canonical wire form: uppercase `#RRGGBB`.
    ///
    /// `Color::decode(&c.encode())` yields `c` for every color.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Returns the red channel.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green channel.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue channel.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl FromStr for Color {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

// Combines two hex digit bytes into one channel value.
fn hex_channel(high: u8, low: u8, token: &str) -> Result<u8, DecodeError> {
    let digit = |b: u8| -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    };
    match (digit(high), digit(low)) {
        (Some(h), Some(l)) => Ok(h * 16 + l),
        _ => Err(DecodeError::InvalidDigit {
            token: token.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_full_form() {
        let color = Color::decode("#ABCDEF").unwrap();
        assert_eq!(color, Color::new(0xAB, 0xCD, 0xEF));
    }

    #[test]
    fn decode_is_case_insensitive() {
        assert_eq!(
            Color::decode("#abcdef").unwrap(),
            Color::decode("#ABCDEF").unwrap()
        );
    }

    #[test]
    fn decode_short_form_duplicates_digits() {
        let color = Color::decode("#ABC").unwrap();
        assert_eq!(color, Color::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn short_channel_is_digit_times_seventeen() {
        // 0xAA = 170 = 10 * 17, the CSS short-hex expansion
        for (token, value) in [("#A00", 170u8), ("#300", 51), ("#F00", 255)] {
            assert_eq!(Color::decode(token).unwrap().red(), value);
        }
    }

    #[test]
    fn short_and_full_forms_agree() {
        assert_eq!(
            Color::decode("#F0C").unwrap(),
            Color::decode("#FF00CC").unwrap()
        );
    }

    #[test]
    fn decode_rejects_bad_lengths() {
        for token in ["#", "#F0", "#F0000", "", "#F000000"] {
            assert!(matches!(
                Color::decode(token),
                Err(DecodeError::InvalidLength { expected: [4, 7], .. })
            ));
        }
    }

    #[test]
    fn decode_reports_actual_length() {
        let err = Color::decode("#F0").unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidLength {
                expected: [4, 7],
                actual: 3
            }
        );
    }

    #[test]
    fn decode_rejects_non_hex_digits() {
        for token in ["#GG0000", "#G00", "#FF00G0"] {
            assert!(matches!(
                Color::decode(token),
                Err(DecodeError::InvalidDigit { .. })
            ));
        }
    }

    #[test]
    fn decode_requires_hash_marker() {
        assert!(Color::decode("0F00000").is_err());
        assert!(Color::decode("FF00").is_err());
    }

    #[test]
    fn encode_is_uppercase_with_hash() {
        let color = Color::new(255, 0, 12);
        assert_eq!(color.encode(), "#FF000C");
    }

    #[test]
    fn encode_decode_round_trip() {
        for color in [
            Color::new(0, 0, 0),
            Color::new(255, 255, 255),
            Color::new(0xAB, 0xCD, 0xEF),
            Color::new(1, 2, 3),
        ] {
            assert_eq!(Color::decode(&color.encode()).unwrap(), color);
        }
    }

    #[test]
    fn decode_is_idempotent() {
        assert_eq!(Color::decode("#F00").unwrap(), Color::decode("#F00").unwrap());
    }

    #[test]
    fn display_matches_encode() {
        let color = Color::new(255, 128, 0);
        assert_eq!(color.to_string(), "#FF8000");
    }

    #[test]
    fn from_str() {
        let color: Color = "#FF0000".parse().unwrap();
        assert_eq!(color, Color::new(255, 0, 0));
    }

    #[test]
    fn from_tuple() {
        let color: Color = (255u8, 0u8, 0u8).into();
        assert_eq!(color, Color::new(255, 0, 0));
    }
}
