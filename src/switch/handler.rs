// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hardware state handlers.
//!
//! The switch engine never touches hardware itself. Each switch is bound
//! to one [`StateHandler`] that reads and writes the physical state.

use std::fmt;

use crate::event::ThingId;

/// The mode a state handler is invoked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateAction {
    /// Read the current value into [`SwitchState::value`].
    Get,
    /// Drive the hardware to [`SwitchState::value`].
    Set,
}

impl StateAction {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Set => "SET",
        }
    }
}

impl fmt::Display for StateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The switch state passed to a handler, built fresh for each invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchState {
    /// The instance being driven.
    pub thing_id: ThingId,
    /// The switch name.
    pub id: String,
    /// On [`StateAction::Set`], the requested value. On
    /// [`StateAction::Get`], starts `false` and is overwritten by the handler.
    pub value: bool,
}

/// Performs the physical read and write of a switch.
///
/// Return `true` on success. A `false` return is treated as a hardware
/// fault: the engine stops the current command without emitting events.
/// Handlers are called synchronously and must not call back into the
/// switch that invoked them.
///
/// Any closure `Fn(StateAction, &mut SwitchState) -> bool` is a handler;
/// state the handler needs is captured by the closure.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use switchgear::switch::{StateAction, StateHandler, SwitchState};
///
/// let relay = Arc::new(AtomicBool::new(false));
/// let handler = move |action: StateAction, state: &mut SwitchState| {
///     match action {
///         StateAction::Get => state.value = relay.load(Ordering::SeqCst),
///         StateAction::Set => relay.store(state.value, Ordering::SeqCst),
///     }
///     true
/// };
/// # fn assert_handler<H: StateHandler>(_: &H) {}
/// # assert_handler(&handler);
/// ```
pub trait StateHandler: Send + Sync {
    /// Handles one read or write.
    fn handle(&self, action: StateAction, state: &mut SwitchState) -> bool;
}

impl<F> StateHandler for F
where
    F: Fn(StateAction, &mut SwitchState) -> bool + Send + Sync,
{
    fn handle(&self, action: StateAction, state: &mut SwitchState) -> bool {
        self(action, state)
    }
}
