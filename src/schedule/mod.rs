// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schedule models.
//!
//! This module carries the schedule value types: wire entries decoded
//! from `~` commands ([`ScheduleEntry`]), the [`Crontab`] an agent
//! assembles from them, and JSON node configuration documents
//! ([`config::Config`]).
//!
//! Cron-style day/time evaluation is out of scope for this library; the
//! models hold the expressions verbatim for a scheduler agent to act on.

pub mod config;
mod entry;

pub use entry::ScheduleEntry;

/// A complete set of cron entries assembled by a scheduler agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Crontab {
    specs: Vec<Spec>,
}

impl Crontab {
    /// Creates an empty crontab ready to add specs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new spec to the crontab.
    pub fn add(&mut self, expression: impl Into<String>, action: impl Into<String>) {
        self.specs.push(Spec {
            expression: expression.into(),
            action: action.into(),
        });
    }

    /// Returns the specs in insertion order.
    #[must_use]
    pub fn specs(&self) -> &[Spec] {
        &self.specs
    }
}

/// One cron entry: an expression and the command to run when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    /// The cron expression, verbatim.
    pub expression: String,
    /// The command string to run.
    pub action: String,
}
