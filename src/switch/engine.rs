// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch state machine.
//!
//! Every transition runs while holding the engine's command lock, so at
//! most one ON/OFF sequence (manual or timer-driven) is in flight across
//! all switches. Each step is a precondition for the next: the first
//! failure returns immediately and no later side effect happens.

use std::sync::{Arc, Weak};

use tokio::sync::{Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::event::{EventBus, SwitchEvent};
use crate::registry::{Registry, Thing};
use crate::timer::{TimerId, TimerService};
use crate::types::ThingType;

use super::group::group_siblings;
use super::switch_core::SwitchCore;

/// Shared state behind a [`SwitchManager`](super::SwitchManager) and its
/// [`Switch`](super::Switch) handles.
pub(crate) struct Engine {
    /// Live switches in creation order.
    pub registry: Registry<SwitchCore>,
    /// Sink for created and state updated events.
    pub event_bus: EventBus,
    /// Runs inching countdowns.
    pub timers: TimerService,
    /// Serializes every transition.
    command_lock: Mutex<()>,
}

impl Engine {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            registry: Registry::new(),
            event_bus,
            timers: TimerService::new(),
            command_lock: Mutex::new(()),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.command_lock.lock().await
    }

    /// Sets `switch` to `value`, switching its group siblings OFF first
    /// when turning ON. The caller must hold the command lock.
    pub async fn set(self: &Arc<Self>, switch: &Arc<SwitchCore>, value: bool) -> Result<()> {
        if !switch.has_handler() {
            return Err(Error::HandlerUnbound {
                id: switch.id().to_string(),
            });
        }

        if !value {
            return self.turn_off(switch).await;
        }

        let switches = self.registry.of_type(ThingType::SWITCH);
        for sibling in group_siblings(switch, &switches) {
            if let Err(source) = self.turn_off(sibling).await {
                tracing::error!(
                    switch = %switch.id(),
                    sibling = %sibling.id(),
                    error = %source,
                    "Failed switching sibling OFF"
                );
                return Err(Error::SiblingFailure {
                    id: switch.id().to_string(),
                    sibling: sibling.id().to_string(),
                    source: Box::new(source),
                });
            }
        }

        self.turn_on(switch).await
    }

    async fn turn_off(&self, switch: &SwitchCore) -> Result<()> {
        switch.disarm_inching(&self.timers)?;

        if !switch.read()? {
            return Ok(());
        }

        switch.write(false)?;
        self.settle(switch).await;
        self.publish_state(switch, false);
        Ok(())
    }

    async fn turn_on(self: &Arc<Self>, switch: &Arc<SwitchCore>) -> Result<()> {
        if switch.read()? {
            return Ok(());
        }

        let switches = self.registry.of_type(ThingType::SWITCH);
        if let Some(locked) = group_siblings(switch, &switches).find(|s| s.is_inching_locked()) {
            tracing::warn!(
                switch = %switch.id(),
                sibling = %locked.id(),
                "Sibling has a locked inching countdown running"
            );
            return Err(Error::SiblingLocked {
                id: switch.id().to_string(),
                sibling: locked.id().to_string(),
            });
        }

        switch.disarm_inching(&self.timers)?;
        switch.write(true)?;
        self.settle(switch).await;
        self.publish_state(switch, true);

        if switch.settings().has_inching() {
            self.arm_inching(switch);
        }
        Ok(())
    }

    /// Waits out the switching time. The command lock stays held, so no
    /// other transition can observe the switch before it settles.
    async fn settle(&self, switch: &SwitchCore) {
        let switching_time = switch.settings().switching_time;
        if !switching_time.is_zero() {
            tokio::time::sleep(switching_time).await;
        }
    }

    fn publish_state(&self, switch: &SwitchCore, value: bool) {
        tracing::debug!(switch = %switch.id(), value, "State updated");
        self.event_bus
            .publish(SwitchEvent::state_updated(switch.thing_id(), switch.id(), value));
    }

    fn arm_inching(self: &Arc<Self>, switch: &Arc<SwitchCore>) {
        let engine = Arc::downgrade(self);
        let target = Arc::clone(switch);
        let id = self
            .timers
            .arm(switch.settings().inching_timeout, move |fired| {
                Self::inching_expired(engine, target, fired)
            });
        switch.set_inching_timer(id);
    }

    async fn inching_expired(engine: Weak<Self>, switch: Arc<SwitchCore>, fired: TimerId) {
        let Some(engine) = engine.upgrade() else {
            return;
        };
        let _guard = engine.lock().await;

        if switch.is_closed() || !switch.clear_fired_timer(fired) {
            tracing::debug!(switch = %switch.id(), timer = %fired, "Ignoring stale inching timer");
            return;
        }

        tracing::debug!(switch = %switch.id(), "Inching expired");
        if let Err(e) = engine.turn_off(&switch).await {
            tracing::warn!(switch = %switch.id(), error = %e, "Inching failed to switch OFF");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::switch::{StateAction, SwitchConfig, SwitchState};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Registers a switch backed by an in-memory relay; returns its SET counter.
    fn add_switch(
        engine: &Engine,
        id: &str,
        config: &SwitchConfig,
        on: bool,
    ) -> (Arc<SwitchCore>, Arc<AtomicUsize>) {
        let core = Arc::new(SwitchCore::new(id, config.normalize()));
        let relay = Arc::new(AtomicBool::new(on));
        let writes = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&writes);
        core.bind(Arc::new(move |action: StateAction, state: &mut SwitchState| {
            match action {
                StateAction::Get => state.value = relay.load(Ordering::SeqCst),
                StateAction::Set => {
                    relay.store(state.value, Ordering::SeqCst);
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            }
            true
        }))
        .unwrap();
        engine.registry.register(Arc::clone(&core)).unwrap();
        (core, writes)
    }

    fn engine() -> Arc<Engine> {
        Arc::new(Engine::new(EventBus::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn turn_on_refuses_while_sibling_countdown_is_locked() {
        let engine = engine();
        let mut events = engine.event_bus.subscribe();
        let locked = SwitchConfig::new()
            .with_group(1)
            .with_inching(1000)
            .with_inching_lock(true);
        let (a, a_writes) = add_switch(&engine, "A", &locked, true);
        let (b, b_writes) = add_switch(&engine, "B", &SwitchConfig::new().with_group(1), false);

        let timer = engine.timers.arm(Duration::from_secs(1), |_| async {});
        a.set_inching_timer(timer);

        let _guard = engine.lock().await;
        match engine.turn_on(&b).await {
            Err(Error::SiblingLocked { id, sibling }) => {
                assert_eq!(id, "B");
                assert_eq!(sibling, "A");
            }
            other => panic!("Expected SiblingLocked, got {other:?}"),
        }

        assert!(!b.read().unwrap());
        assert_eq!(b_writes.load(Ordering::SeqCst), 0);
        assert_eq!(a_writes.load(Ordering::SeqCst), 0);
        assert_eq!(a.inching_timer(), Some(timer));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn turn_on_ignores_unlocked_sibling_countdown() {
        let engine = engine();
        let unlocked = SwitchConfig::new().with_group(1).with_inching(1000);
        let (a, _) = add_switch(&engine, "A", &unlocked, true);
        let (b, b_writes) = add_switch(&engine, "B", &SwitchConfig::new().with_group(1), false);

        a.set_inching_timer(engine.timers.arm(Duration::from_secs(1), |_| async {}));

        let _guard = engine.lock().await;
        engine.turn_on(&b).await.unwrap();
        assert!(b.read().unwrap());
        assert_eq!(b_writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_switches_off_and_publishes() {
        let engine = engine();
        let mut events = engine.event_bus.subscribe();
        let (a, a_writes) = add_switch(&engine, "A", &SwitchConfig::new().with_inching(500), true);

        let timer = engine.timers.arm(Duration::from_secs(60), |_| async {});
        a.set_inching_timer(timer);

        Engine::inching_expired(Arc::downgrade(&engine), Arc::clone(&a), timer).await;

        assert!(!a.read().unwrap());
        assert_eq!(a_writes.load(Ordering::SeqCst), 1);
        assert_eq!(a.inching_timer(), None);
        assert_eq!(
            events.try_recv().unwrap(),
            SwitchEvent::state_updated(a.thing_id(), "A", false)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stale_expiry_is_ignored() {
        let engine = engine();
        let (a, a_writes) = add_switch(&engine, "A", &SwitchConfig::new().with_inching(500), true);

        let stale = engine.timers.arm(Duration::from_secs(60), |_| async {});
        let current = engine.timers.arm(Duration::from_secs(60), |_| async {});
        a.set_inching_timer(current);

        Engine::inching_expired(Arc::downgrade(&engine), Arc::clone(&a), stale).await;

        assert!(a.read().unwrap());
        assert_eq!(a_writes.load(Ordering::SeqCst), 0);
        assert_eq!(a.inching_timer(), Some(current));
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_after_engine_dropped_does_nothing() {
        let engine = engine();
        let (a, a_writes) = add_switch(&engine, "A", &SwitchConfig::new().with_inching(500), true);

        let timer = engine.timers.arm(Duration::from_secs(60), |_| async {});
        a.set_inching_timer(timer);
        let weak = Arc::downgrade(&engine);
        drop(engine);

        Engine::inching_expired(weak, Arc::clone(&a), timer).await;

        assert!(a.read().unwrap());
        assert_eq!(a_writes.load(Ordering::SeqCst), 0);
    }
}
