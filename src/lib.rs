// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lumen Lib - the shared backplane for light-controller agents.
//!
//! This library provides the standardized functionality used across all
//! agent software running on networked lighting controllers: the
//! command/pattern wire protocol, device identity, flat-file
//! persistence, schedule models, and the HTTP/MQTT transport glue that
//! moves command strings between agents.
//!
//! # The wire protocol
//!
//! Commands are short, position-sensitive text messages. Byte 0 selects
//! the action, byte 1 the payload kind, and the remainder is a
//! `|`-delimited payload:
//!
//! ```text
//! !#F00                          execute: show the color #F00
//! +:ab:3|#F00,2s,1s|#00F,2s,1s   add: pattern "ab", 3 loops, 2 slots
//! ?-version                      query: the "version" property
//! ```
//!
//! Decoding is two-layered: [`command::Command`] decodes the envelope
//! (action, kind, routing id, raw parts), and the payload is
//! materialized on demand into a [`pattern::Pattern`],
//! [`types::Color`], or [`schedule::ScheduleEntry`]. All decoders are
//! pure, synchronous functions: safe to call concurrently, no I/O, no
//! logging, and every failure is a returned [`error::DecodeError`].
//!
//! # Quick start
//!
//! ```
//! use lumen_lib::command::{Action, Command, Kind};
//!
//! fn handle(raw: &str) -> lumen_lib::Result<()> {
//!     let cmd = Command::decode(raw)?;
//!     if cmd.action() == Action::Execute && cmd.kind() == Kind::Pattern {
//!         let pattern = cmd.pattern()?;
//!         for slot in pattern.slots() {
//!             // drive the hardware
//!             let _ = (slot.color(), slot.fade(), slot.hold());
//!         }
//!     }
//!     Ok(())
//! }
//!
//! handle("!:ab:|#F00,2s,1s|#00F,2s,1s").unwrap();
//! ```
//!
//! # Receiving commands (feature `http`)
//!
//! ```no_run
//! use lumen_lib::agent::{Agent, Worker};
//! use lumen_lib::command::Command;
//!
//! #[tokio::main]
//! async fn main() -> lumen_lib::Result<()> {
//!     let worker = Worker::new(Agent::Controller)?;
//!     worker
//!         .serve(|raw| {
//!             let cmd = Command::decode(&raw)?;
//!             tracing::info!(id = cmd.id(), "handling command");
//!             Ok(())
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Environment
//!
//! Agent behavior has standard defaults that can be overridden with
//! environment variables:
//!
//! - `LUMEN_DEVICE_ID` - overrides the device ID, which otherwise comes
//!   from the hardware address of the `wlan0` or `en0` interface. Device
//!   IDs are used in queue topic names and reported in logs.
//! - `LUMEN_BROKER` - the message broker address used when agents
//!   publish, `host[:port]`. The default is `127.0.0.1:1883`, assuming a
//!   broker runs locally.

pub mod agent;
pub mod command;
pub mod error;
pub mod identity;
pub mod pattern;
pub mod schedule;
pub mod store;
pub mod types;

pub use command::{Action, Command, Kind};
pub use error::{DecodeError, Error, ProtocolError, Result, StoreError};
pub use identity::DeviceId;
pub use pattern::{Pattern, Slot};
pub use schedule::ScheduleEntry;
pub use store::{FileStore, MemoryStore, Store};
pub use types::Color;
