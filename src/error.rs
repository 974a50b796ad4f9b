// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `switchgear` library.
//!
//! Every switch operation stops at its first failing step and reports it
//! through [`Error`]. Nothing is retried internally; the caller decides
//! whether to re-issue the command.

use thiserror::Error;

use crate::switch::StateAction;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation needs a state handler but none is bound.
    #[error("switch '{id}' has no state handler bound")]
    HandlerUnbound {
        /// The switch identifier.
        id: String,
    },

    /// A state handler is already bound to the switch.
    #[error("switch '{id}' already has a state handler bound")]
    AlreadyBound {
        /// The switch identifier.
        id: String,
    },

    /// The state handler reported a hardware fault.
    #[error("state handler of '{id}' failed on {action}")]
    HandlerFailure {
        /// The switch identifier.
        id: String,
        /// The action the handler was invoked with.
        action: StateAction,
    },

    /// The inching countdown of the switch is locked and cannot be cancelled.
    #[error("inching of '{id}' is locked and cannot be cancelled")]
    InchingLocked {
        /// The switch identifier.
        id: String,
    },

    /// A group sibling with a locked inching countdown is still ON.
    #[error("cannot switch '{id}' ON: '{sibling}' has a locked inching countdown")]
    SiblingLocked {
        /// The switch that was asked to turn ON.
        id: String,
        /// The sibling holding the lock.
        sibling: String,
    },

    /// A group sibling could not be switched OFF before an interlocked ON.
    #[error("cannot switch '{id}' ON: failed to switch '{sibling}' OFF")]
    SiblingFailure {
        /// The switch that was asked to turn ON.
        id: String,
        /// The sibling that failed.
        sibling: String,
        /// Why the sibling failed.
        #[source]
        source: Box<Error>,
    },

    /// Another live switch is already registered under this identifier.
    #[error("a switch with id '{0}' is already registered")]
    DuplicateId(String),

    /// The switch has been closed.
    #[error("switch '{id}' is closed")]
    Closed {
        /// The switch identifier.
        id: String,
    },

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while parsing configuration.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Returns `true` if this error was caused by an inching lock, either
    /// on the switch itself or on a group sibling.
    #[must_use]
    pub fn is_lock_violation(&self) -> bool {
        match self {
            Self::InchingLocked { .. } | Self::SiblingLocked { .. } => true,
            Self::SiblingFailure { source, .. } => source.is_lock_violation(),
            _ => false,
        }
    }
}

/// Errors related to value validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An unrecognized switch command string was provided.
    #[error("invalid switch command: {0}")]
    InvalidCommand(String),
}

/// Errors related to parsing switch configuration.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
