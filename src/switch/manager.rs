// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch manager: creation, lookup and event subscription.

use std::fmt;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::error::{Error, Result};
use crate::event::{EventBus, SwitchEvent};
use crate::registry::Thing;

use super::config::SwitchConfig;
use super::engine::Engine;
use super::handle::Switch;
use super::switch_core::SwitchCore;

/// Creates and owns switches.
///
/// All switches created by one manager share its registry (and therefore
/// its interlock groups), its event bus and its command lock. Cloning the
/// manager is cheap and yields a handle to the same set of switches.
///
/// # Examples
///
/// ```
/// use switchgear::switch::{StateAction, SwitchConfig, SwitchManager, SwitchState};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> switchgear::Result<()> {
/// let manager = SwitchManager::new();
/// let mut events = manager.subscribe();
///
/// let pump = manager.create("pump", Some(SwitchConfig::new().with_group(1)))?;
/// assert!(events.try_recv().unwrap().is_created());
///
/// let relay = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
/// pump.bind_handler(move |action: StateAction, state: &mut SwitchState| {
///     use std::sync::atomic::Ordering;
///     match action {
///         StateAction::Get => state.value = relay.load(Ordering::SeqCst),
///         StateAction::Set => relay.store(state.value, Ordering::SeqCst),
///     }
///     true
/// })?;
///
/// pump.set(true).await?;
/// assert!(pump.get()?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SwitchManager {
    engine: Arc<Engine>,
}

impl SwitchManager {
    /// Creates a new switch manager.
    #[must_use]
    pub fn new() -> Self {
        Self::with_event_bus(EventBus::new())
    }

    /// Creates a new switch manager with custom event bus capacity.
    #[must_use]
    pub fn with_capacity(event_capacity: usize) -> Self {
        Self::with_event_bus(EventBus::with_capacity(event_capacity))
    }

    /// Creates a new switch manager publishing to an existing event bus.
    #[must_use]
    pub fn with_event_bus(event_bus: EventBus) -> Self {
        Self {
            engine: Arc::new(Engine::new(event_bus)),
        }
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribes to switch events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SwitchEvent> {
        self.engine.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.engine.event_bus.subscriber_count()
    }

    // =========================================================================
    // Switch Management
    // =========================================================================

    /// Creates and registers a switch.
    ///
    /// `config` is normalized on the way in; `None` means all defaults.
    /// On success a [`SwitchEvent::Created`] event is published.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `id` is empty, or
    /// [`Error::DuplicateId`] if a live switch already uses `id`.
    pub fn create(&self, id: &str, config: Option<SwitchConfig>) -> Result<Switch> {
        if id.is_empty() {
            tracing::error!("Cannot create a switch without an id");
            return Err(Error::InvalidArgument("switch id is empty".to_string()));
        }

        let settings = config.unwrap_or_default().normalize();
        let core = Arc::new(SwitchCore::new(id, settings));

        if let Err(e) = self.engine.registry.register(Arc::clone(&core)) {
            tracing::error!(switch = %id, error = %e, "Switch registration failed");
            return Err(e);
        }

        tracing::debug!(switch = %id, thing_id = %core.thing_id(), ?settings, "Switch created");
        self.engine
            .event_bus
            .publish(SwitchEvent::created(core.thing_id(), id));

        Ok(Switch::new(core, Arc::clone(&self.engine)))
    }

    /// Looks up a live switch by id.
    #[must_use]
    pub fn switch(&self, id: &str) -> Option<Switch> {
        self.engine
            .registry
            .get(id)
            .map(|core| Switch::new(core, Arc::clone(&self.engine)))
    }

    /// Returns the ids of all live switches, in creation order.
    #[must_use]
    pub fn switch_ids(&self) -> Vec<String> {
        self.engine.registry.ids()
    }

    /// Returns the number of live switches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.engine.registry.len()
    }

    /// Returns `true` if no switch is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engine.registry.is_empty()
    }
}

impl Default for SwitchManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SwitchManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchManager")
            .field("switches", &self.engine.registry)
            .field("timers", &self.engine.timers)
            .finish_non_exhaustive()
    }
}
