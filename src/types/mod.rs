// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for the wire protocol.
//!
//! - [`Color`] - RGB color codec for `#RGB` / `#RRGGBB` tokens
//! - [`parse_duration`] / [`format_duration`] - `<integer><unit>` duration
//!   tokens used by slot timing fields

mod color;
mod duration;

pub use color::Color;
pub use duration::{DurationParseError, format_duration, parse_duration};
