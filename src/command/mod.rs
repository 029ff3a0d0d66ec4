// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The envelope layer of the wire protocol.
//!
//! A command is a short, position-sensitive text message: byte 0 selects
//! the [`Action`], byte 1 the [`Kind`], and everything after is the
//! `|`-delimited payload.
//!
//! | byte 0 | action | | byte 1 | kind |
//! |--------|--------|-|--------|------|
//! | `!` | Execute | | `#` | Color |
//! | `+` | Add | | `:` | Pattern |
//! | `-` | Remove | | `~` | Schedule |
//! | `?` | Query | | `^` | Scene |
//! | | | | `-` | Property |
//!
//! # Examples
//!
//! ```
//! use lumen_lib::command::{Action, Command, Kind};
//!
//! // Execute the pattern `ab`
//! let cmd = Command::decode("!:ab:|#F00,2s,1s|#00F,2s,1s").unwrap();
//! assert_eq!(cmd.action(), Action::Execute);
//! assert_eq!(cmd.kind(), Kind::Pattern);
//! assert_eq!(cmd.id(), "ab");
//!
//! // Materialize the full pattern definition
//! let pattern = cmd.pattern().unwrap();
//! assert_eq!(pattern.slots().len(), 2);
//! ```

mod envelope;

pub use envelope::{Action, Command, Kind};
