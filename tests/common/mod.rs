// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory relay used as the hardware behind test switches.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use switchgear::{StateAction, StateHandler, Switch, SwitchConfig, SwitchEvent, SwitchManager, SwitchState};
use tokio::sync::broadcast;

/// A relay whose state lives in an atomic, with switchable faults.
#[derive(Clone, Default)]
pub struct MockRelay {
    on: Arc<AtomicBool>,
    fail_get: Arc<AtomicBool>,
    fail_set: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MockRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::SeqCst)
    }

    /// Changes the physical state behind the engine's back.
    pub fn force(&self, on: bool) {
        self.on.store(on, Ordering::SeqCst);
    }

    pub fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_set(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    /// Number of successful SET calls.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn handler(&self) -> impl StateHandler + 'static {
        let relay = self.clone();
        move |action: StateAction, state: &mut SwitchState| match action {
            StateAction::Get => {
                if relay.fail_get.load(Ordering::SeqCst) {
                    return false;
                }
                state.value = relay.on.load(Ordering::SeqCst);
                true
            }
            StateAction::Set => {
                if relay.fail_set.load(Ordering::SeqCst) {
                    return false;
                }
                relay.on.store(state.value, Ordering::SeqCst);
                relay.writes.fetch_add(1, Ordering::SeqCst);
                true
            }
        }
    }
}

/// Creates a switch and binds a fresh relay to it.
pub fn bound_switch(manager: &SwitchManager, id: &str, config: SwitchConfig) -> (Switch, MockRelay) {
    let switch = manager.create(id, Some(config)).expect("create switch");
    let relay = MockRelay::new();
    switch.bind_handler(relay.handler()).expect("bind handler");
    (switch, relay)
}

/// Drains every event currently queued, keeping state updates as `(id, value)`.
pub fn drain_updates(rx: &mut broadcast::Receiver<SwitchEvent>) -> Vec<(String, bool)> {
    let mut updates = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let SwitchEvent::StateUpdated { id, value, .. } = event {
            updates.push((id, value));
        }
    }
    updates
}

pub fn update(id: &str, value: bool) -> (String, bool) {
    (id.to_string(), value)
}
