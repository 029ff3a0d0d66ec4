// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Agent transport collaborators.
//!
//! A controller node runs a fixed set of agents, each listening on a
//! well-known local port. The transport layer moves raw command strings
//! between them; it never interprets the action or kind bytes - that is
//! the [`command`](crate::command) layer's job.
//!
//! - [`Agent`] - the agent registry and its port table
//! - [`Worker`] - HTTP command intake and agent-to-agent sends
//!   (feature `http`)
//! - [`Publisher`] - message-queue publishing with device-id-prefixed
//!   topics (feature `mqtt`)

#[cfg(feature = "mqtt")]
mod publisher;
#[cfg(feature = "http")]
mod worker;

#[cfg(feature = "mqtt")]
pub use publisher::{BROKER_ENV, Publisher, PublisherConfig};
#[cfg(feature = "http")]
pub use worker::Worker;

use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;

/// The agents that make up a controller node, with their well-known
/// ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agent {
    /// Accepts external API traffic and relays commands inward.
    Gateway,
    /// Drives the light hardware.
    Controller,
    /// Enforces access policy.
    Gatekeeper,
    /// Holds schedules and fires their actions.
    Scheduler,
    /// Applies software updates.
    Updater,
}

impl Agent {
    /// Returns the agent's well-known local port.
    #[must_use]
    pub const fn port(self) -> u16 {
        match self {
            Self::Gateway => 8001,
            Self::Controller => 8002,
            Self::Gatekeeper => 8003,
            Self::Scheduler => 8004,
            Self::Updater => 8005,
        }
    }

    /// Returns the agent's registry name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gateway => "gateway",
            Self::Controller => "controller",
            Self::Gatekeeper => "gatekeeper",
            Self::Scheduler => "scheduler",
            Self::Updater => "updater",
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Agent {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gateway" => Ok(Self::Gateway),
            "controller" => Ok(Self::Controller),
            "gatekeeper" => Ok(Self::Gatekeeper),
            "scheduler" => Ok(Self::Scheduler),
            "updater" => Ok(Self::Updater),
            other => Err(ProtocolError::UnknownAgent(other.to_string())),
        }
    }
}
