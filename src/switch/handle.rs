// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Caller-side handle to a switch.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::event::ThingId;
use crate::registry::Thing;
use crate::types::SwitchCommand;

use super::config::SwitchSettings;
use super::engine::Engine;
use super::handler::StateHandler;
use super::switch_core::SwitchCore;

/// Handle to a switch created by a [`SwitchManager`](super::SwitchManager).
///
/// Handles are cheap to clone; all clones refer to the same switch.
/// [`set`](Self::set), [`toggle`](Self::toggle) and [`close`](Self::close)
/// are serialized with every other switch of the same manager, including
/// inching timers firing.
#[derive(Clone)]
pub struct Switch {
    core: Arc<SwitchCore>,
    engine: Arc<Engine>,
}

impl Switch {
    pub(crate) fn new(core: Arc<SwitchCore>, engine: Arc<Engine>) -> Self {
        Self { core, engine }
    }

    /// Returns the switch name.
    #[must_use]
    pub fn id(&self) -> &str {
        self.core.id()
    }

    /// Returns the instance identifier.
    #[must_use]
    pub fn thing_id(&self) -> ThingId {
        self.core.thing_id()
    }

    /// Returns the normalized settings.
    #[must_use]
    pub fn settings(&self) -> &SwitchSettings {
        self.core.settings()
    }

    /// Returns `true` once the switch has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }

    /// Returns `true` while an inching countdown is running.
    ///
    /// Turns `false` as soon as the countdown ends, even if the automatic
    /// OFF is still waiting behind another command.
    #[must_use]
    pub fn is_inching(&self) -> bool {
        self.core
            .inching_timer()
            .is_some_and(|id| self.engine.timers.is_armed(id))
    }

    // =========================================================================
    // Handler binding
    // =========================================================================

    /// Binds the hardware state handler.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyBound`](crate::Error::AlreadyBound) if a
    /// handler is already bound (the existing one stays in place), or
    /// [`Error::Closed`](crate::Error::Closed) if the switch is closed.
    pub fn bind_handler<H>(&self, handler: H) -> Result<()>
    where
        H: StateHandler + 'static,
    {
        self.core.ensure_open()?;
        self.core.bind(Arc::new(handler))
    }

    /// Unbinds the state handler. Does nothing if none is bound.
    pub fn unbind_handler(&self) {
        self.core.unbind();
    }

    /// Returns `true` if a state handler is bound.
    #[must_use]
    pub fn has_handler(&self) -> bool {
        self.core.has_handler()
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Reads the current state from the handler.
    ///
    /// # Errors
    ///
    /// Returns an error if the switch is closed, no handler is bound, or
    /// the handler fails.
    pub fn get(&self) -> Result<bool> {
        self.core.ensure_open()?;
        self.core.read()
    }

    /// Switches ON or OFF.
    ///
    /// Turning ON first switches OFF every other switch in the same
    /// interlock group, then this one, then arms the inching countdown if
    /// configured. Setting the current state again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the switch is closed or unbound, if the handler
    /// fails, if a locked inching countdown (own or a sibling's) blocks the
    /// change, or if a sibling could not be switched OFF. On error this
    /// switch's state is unchanged.
    pub async fn set(&self, value: bool) -> Result<()> {
        self.core.ensure_open()?;
        let _guard = self.engine.lock().await;
        self.core.ensure_open()?;
        self.engine.set(&self.core, value).await
    }

    /// Inverts the current state and returns the new one.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the state or the subsequent
    /// [`set`](Self::set) fails.
    pub async fn toggle(&self) -> Result<bool> {
        self.core.ensure_open()?;
        let _guard = self.engine.lock().await;
        self.core.ensure_open()?;

        let target = !self.core.read()?;
        self.engine.set(&self.core, target).await?;
        Ok(target)
    }

    /// Executes a command and returns the resulting state.
    ///
    /// # Errors
    ///
    /// See [`set`](Self::set) and [`toggle`](Self::toggle).
    pub async fn execute(&self, command: SwitchCommand) -> Result<bool> {
        match command.target() {
            Some(value) => self.set(value).await.map(|()| value),
            None => self.toggle().await,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Closes the switch.
    ///
    /// Cancels a running inching countdown (even a locked one), unbinds the
    /// handler and removes the switch from its manager. The id becomes
    /// free for reuse. Closing an already closed switch does nothing.
    pub async fn close(&self) {
        let _guard = self.engine.lock().await;
        if !self.core.mark_closed() {
            return;
        }

        self.core.force_disarm_inching(&self.engine.timers);
        self.core.unbind();
        self.engine.registry.unregister(self.core.thing_id());
        tracing::debug!(switch = %self.id(), "Switch closed");
    }
}

impl fmt::Debug for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Switch")
            .field("id", &self.id())
            .field("thing_id", &self.thing_id())
            .field("settings", self.settings())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
