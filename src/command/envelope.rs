// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The command envelope: action, kind, routing id, and payload parts.

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;
use crate::pattern::Pattern;
use crate::schedule::ScheduleEntry;
use crate::types::Color;

/// What a command asks the receiving agent to do, dispatched from byte 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// `!` - carry out the payload now.
    Execute,
    /// `+` - add the payload to the agent's configuration.
    Add,
    /// `-` - remove the identified configuration.
    Remove,
    /// `?` - query the identified value.
    Query,
}

impl Action {
    /// Resolves an action from its wire byte.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            '!' => Some(Self::Execute),
            '+' => Some(Self::Add),
            '-' => Some(Self::Remove),
            '?' => Some(Self::Query),
            _ => None,
        }
    }

    /// Returns the wire byte for this action.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Execute => '!',
            Self::Add => '+',
            Self::Remove => '-',
            Self::Query => '?',
        }
    }
}

/// What the command payload describes, dispatched from byte 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// `#` - a single color.
    Color,
    /// `:` - a pattern definition or reference.
    Pattern,
    /// `~` - a schedule entry.
    Schedule,
    /// `^` - a scene.
    Scene,
    /// `-` - a device property.
    Property,
}

impl Kind {
    /// Resolves a kind from its wire byte.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            '#' => Some(Self::Color),
            ':' => Some(Self::Pattern),
            '~' => Some(Self::Schedule),
            '^' => Some(Self::Scene),
            '-' => Some(Self::Property),
            _ => None,
        }
    }

    /// Returns the wire byte for this kind.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Color => '#',
            Self::Pattern => ':',
            Self::Schedule => '~',
            Self::Scene => '^',
            Self::Property => '-',
        }
    }
}

/// A decoded command envelope.
///
/// The envelope carries the action and kind bytes, a kind-specific
/// routing id, and the ordered `|`-delimited payload parts. It does not
/// interpret the parts beyond id derivation; richer payloads are
/// materialized on demand via [`Command::pattern`], [`Command::color`],
/// and [`Command::schedule`].
///
/// # Examples
///
/// ```
/// use lumen_lib::command::{Action, Command, Kind};
///
/// let cmd = Command::decode("!#F00").unwrap();
/// assert_eq!(cmd.action(), Action::Execute);
/// assert_eq!(cmd.kind(), Kind::Color);
/// assert_eq!(cmd.id(), "#F00");
/// assert_eq!(cmd.parts(), ["F00"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Command {
    action: Action,
    kind: Kind,
    id: String,
    parts: Vec<String>,
}

impl Command {
    /// Decodes a command string into its envelope.
    ///
    /// Byte 0 selects the [`Action`] and byte 1 the [`Kind`]; everything
    /// from byte 2 onward is split on `|` into parts, preserving empty
    /// segments. The routing id is derived from `parts[0]` by a
    /// kind-specific rule:
    ///
    /// | kind | id |
    /// |------|----|
    /// | Color | `#` re-attached to `parts[0]` |
    /// | Pattern | `parts[0]` up to the first `:` (whole token if none) |
    /// | Schedule, Scene, Property | `parts[0]` verbatim |
    ///
    /// Id derivation never fails, and the envelope decode is total over
    /// every input whose first two bytes are in the dispatch tables:
    /// malformed parts only surface when a payload is materialized.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] for input shorter than two
    /// bytes and [`DecodeError::UnknownAction`] /
    /// [`DecodeError::UnknownKind`] for bytes outside the dispatch
    /// tables.
    pub fn decode(input: &str) -> Result<Self, DecodeError> {
        let mut chars = input.chars();
        let (Some(action_code), Some(kind_code)) = (chars.next(), chars.next()) else {
            return Err(DecodeError::Truncated {
                input: input.to_string(),
            });
        };
        let action = Action::from_code(action_code).ok_or_else(|| DecodeError::UnknownAction {
            code: action_code,
            input: input.to_string(),
        })?;
        let kind = Kind::from_code(kind_code).ok_or_else(|| DecodeError::UnknownKind {
            code: kind_code,
            input: input.to_string(),
        })?;

        let remainder = chars.as_str();
        if remainder.is_empty() {
            return Ok(Self {
                action,
                kind,
                id: String::new(),
                parts: Vec::new(),
            });
        }

        let parts: Vec<String> = remainder.split('|').map(str::to_string).collect();
        let id = match kind {
            Kind::Color => format!("#{}", parts[0]),
            Kind::Pattern => parts[0]
                .split(':')
                .next()
                .unwrap_or_default()
                .to_string(),
            Kind::Schedule | Kind::Scene | Kind::Property => parts[0].clone(),
        };

        Ok(Self {
            action,
            kind,
            id,
            parts,
        })
    }

    /// Encodes the envelope back to its wire form.
    ///
    /// Emits the action and kind bytes followed by the parts joined with
    /// `|`. `Command::decode` round-trips the result.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}{}{}",
            self.action.code(),
            self.kind.code(),
            self.parts.join("|")
        )
    }

    /// Returns the command action.
    #[must_use]
    pub const fn action(&self) -> Action {
        self.action
    }

    /// Returns the payload kind.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the kind-specific routing id (empty if the command had no
    /// payload).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the ordered payload parts.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Returns the type-bearing payload substring: the kind byte followed
    /// by the raw remainder.
    ///
    /// For pattern commands this is exactly the input accepted by
    /// [`Pattern::decode`].
    #[must_use]
    pub fn payload(&self) -> String {
        format!("{}{}", self.kind.code(), self.parts.join("|"))
    }

    /// Materializes the payload as a full [`Pattern`] definition.
    ///
    /// # Errors
    ///
    /// Propagates pattern decode failures. Intended for commands of
    /// [`Kind::Pattern`]; other kinds will fail on the payload grammar.
    pub fn pattern(&self) -> Result<Pattern, DecodeError> {
        Pattern::decode(&self.payload())
    }

    /// Materializes the payload as a [`Color`].
    ///
    /// # Errors
    ///
    /// Propagates color decode failures. Intended for commands of
    /// [`Kind::Color`], where the routing id carries the color token.
    pub fn color(&self) -> Result<Color, DecodeError> {
        Color::decode(&self.id)
    }

    /// Materializes the payload as a [`ScheduleEntry`].
    ///
    /// # Errors
    ///
    /// Propagates schedule entry decode failures. Intended for commands
    /// of [`Kind::Schedule`].
    pub fn schedule(&self) -> Result<ScheduleEntry, DecodeError> {
        ScheduleEntry::from_parts(&self.parts)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl FromStr for Command {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
