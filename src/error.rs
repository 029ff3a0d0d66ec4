// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Lumen library.
//!
//! This module provides the error hierarchy for failures across the
//! library: wire protocol decoding, transport communication, and the
//! flat-file store.

use thiserror::Error;

use crate::types::DurationParseError;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A wire command, pattern, slot, or color failed to decode.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error occurred during transport communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred in the persistence store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// No device identity could be determined for this host.
    #[error("no device identity: {0}")]
    NoIdentity(String),
}

/// Errors produced while decoding wire protocol text.
///
/// Every variant is recoverable by the caller: malformed input is a
/// permanent, non-retryable condition for that specific message, and the
/// decoders return the first failure without constructing a partial value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The command envelope was shorter than the two dispatch bytes.
    #[error("truncated command: {input:?}")]
    Truncated {
        /// The offending input.
        input: String,
    },

    /// The action byte (byte 0) is not in the action table.
    #[error("unknown action code {code:?} in command: {input}")]
    UnknownAction {
        /// The unrecognized byte.
        code: char,
        /// The full command text.
        input: String,
    },

    /// The kind byte (byte 1) is not in the kind table.
    #[error("unknown kind code {code:?} in command: {input}")]
    UnknownKind {
        /// The unrecognized byte.
        code: char,
        /// The full command text.
        input: String,
    },

    /// A pattern payload had no splittable content.
    #[error("empty pattern: {input:?}")]
    EmptyPattern {
        /// The offending input.
        input: String,
    },

    /// An explicit loop count was present but not an integer.
    #[error("loop count is not an integer: {value:?}")]
    InvalidLoopCount {
        /// The text that failed to parse.
        value: String,
    },

    /// A slot token decomposed to zero fields.
    ///
    /// Unreachable through standard split semantics; kept so the slot
    /// decoder stays total over every field sequence.
    #[error("no slot information found")]
    EmptySlot,

    /// A color token had an invalid length.
    #[error("color code must be {} or {} characters, got {actual}", .expected[0], .expected[1])]
    InvalidLength {
        /// The accepted token lengths.
        expected: [usize; 2],
        /// The length that was provided.
        actual: usize,
    },

    /// A color token contained a non-hex digit in a channel position.
    #[error("invalid hex digit in color code: {token}")]
    InvalidDigit {
        /// The offending token.
        token: String,
    },

    /// A duration token failed to parse.
    #[error("invalid {field} duration: {source}")]
    InvalidDuration {
        /// The slot field the token belonged to.
        field: &'static str,
        /// The underlying parse failure.
        source: DurationParseError,
    },

    /// A schedule date field was not an ISO `YYYY-MM-DD` date.
    #[error("invalid {field} date: {value:?}")]
    InvalidDate {
        /// The schedule field the value belonged to.
        field: &'static str,
        /// The text that failed to parse.
        value: String,
    },
}

/// Errors related to transport communication (HTTP/MQTT).
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// MQTT connection or communication failed.
    #[cfg(feature = "mqtt")]
    #[error("MQTT error: {0}")]
    Mqtt(#[from] rumqttc::ClientError),

    /// The named agent is not in the agent registry.
    #[error("agent {0} not supported")]
    UnknownAgent(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The listening socket could not be bound or the server failed.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A peer agent rejected a command.
    #[error("agent returned HTTP {status}: {body}")]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The error text from the peer.
        body: String,
    },
}

/// Errors produced by [`Store`](crate::store::Store) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying filesystem operation failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested collection does not exist.
    #[error("no collection found: {collection}")]
    NoCollection {
        /// The missing collection.
        collection: String,
    },

    /// The requested item does not exist in the collection.
    #[error("no item with ID {id} in collection {collection}")]
    NoItem {
        /// The collection that was searched.
        collection: String,
        /// The missing item ID.
        id: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
