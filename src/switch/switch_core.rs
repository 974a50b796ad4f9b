// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Internal per-switch state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::error::{Error, Result};
use crate::event::ThingId;
use crate::registry::Thing;
use crate::timer::{TimerId, TimerService};
use crate::types::ThingType;

use super::config::SwitchSettings;
use super::handler::{StateAction, StateHandler, SwitchState};

/// A registered switch.
///
/// None of the locks here are held across an `.await` or a handler call.
pub(crate) struct SwitchCore {
    /// Caller-assigned name.
    id: String,
    /// Instance identifier.
    thing_id: ThingId,
    /// Normalized configuration.
    settings: SwitchSettings,
    /// Bound hardware handler, if any.
    handler: RwLock<Option<Arc<dyn StateHandler>>>,
    /// Armed inching countdown, if any.
    inching: Mutex<Option<TimerId>>,
    /// Set once by close.
    closed: AtomicBool,
}

impl SwitchCore {
    pub fn new(id: impl Into<String>, settings: SwitchSettings) -> Self {
        Self {
            id: id.into(),
            thing_id: ThingId::new(),
            settings,
            handler: RwLock::new(None),
            inching: Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &SwitchSettings {
        &self.settings
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Marks the switch closed. Returns `false` if it already was.
    pub fn mark_closed(&self) -> bool {
        !self.closed.swap(true, Ordering::SeqCst)
    }

    pub fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::Closed {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Handler binding
    // =========================================================================

    pub fn bind(&self, handler: Arc<dyn StateHandler>) -> Result<()> {
        let mut slot = self.handler.write();
        if slot.is_some() {
            tracing::error!(switch = %self.id, "State handler already bound");
            return Err(Error::AlreadyBound {
                id: self.id.clone(),
            });
        }
        *slot = Some(handler);
        Ok(())
    }

    pub fn unbind(&self) {
        self.handler.write().take();
    }

    pub fn has_handler(&self) -> bool {
        self.handler.read().is_some()
    }

    fn handler(&self) -> Result<Arc<dyn StateHandler>> {
        self.handler.read().clone().ok_or_else(|| Error::HandlerUnbound {
            id: self.id.clone(),
        })
    }

    fn invoke(&self, action: StateAction, value: bool) -> Result<bool> {
        let handler = self.handler()?;
        let mut state = SwitchState {
            thing_id: self.thing_id,
            id: self.id.clone(),
            value,
        };
        if !handler.handle(action, &mut state) {
            tracing::error!(switch = %self.id, %action, "State handler failed");
            return Err(Error::HandlerFailure {
                id: self.id.clone(),
                action,
            });
        }
        Ok(state.value)
    }

    /// Reads the current value through the handler.
    pub fn read(&self) -> Result<bool> {
        self.invoke(StateAction::Get, false)
    }

    /// Drives the hardware to `value` through the handler.
    pub fn write(&self, value: bool) -> Result<()> {
        self.invoke(StateAction::Set, value).map(|_| ())
    }

    // =========================================================================
    // Inching timer slot
    // =========================================================================

    pub fn inching_timer(&self) -> Option<TimerId> {
        *self.inching.lock()
    }

    pub fn set_inching_timer(&self, id: TimerId) {
        *self.inching.lock() = Some(id);
    }

    /// Returns `true` if a locked inching countdown is running.
    pub fn is_inching_locked(&self) -> bool {
        self.settings.inching_lock && self.inching_timer().is_some()
    }

    /// Cancels a running inching countdown unless it is locked.
    pub fn disarm_inching(&self, timers: &TimerService) -> Result<()> {
        let mut slot = self.inching.lock();
        if let Some(id) = *slot {
            if self.settings.inching_lock {
                tracing::warn!(switch = %self.id, timer = %id, "Inching is locked and cannot be cancelled");
                return Err(Error::InchingLocked {
                    id: self.id.clone(),
                });
            }
            timers.cancel(id);
            *slot = None;
        }
        Ok(())
    }

    /// Cancels a running inching countdown regardless of the lock.
    pub fn force_disarm_inching(&self, timers: &TimerService) {
        if let Some(id) = self.inching.lock().take() {
            timers.cancel(id);
        }
    }

    /// Clears the slot if `fired` is still the armed timer.
    ///
    /// Returns `false` for a stale timer that was replaced or cancelled
    /// while its callback was waiting to run.
    pub fn clear_fired_timer(&self, fired: TimerId) -> bool {
        let mut slot = self.inching.lock();
        if *slot == Some(fired) {
            *slot = None;
            true
        } else {
            false
        }
    }
}

impl Thing for SwitchCore {
    fn id(&self) -> &str {
        &self.id
    }

    fn thing_id(&self) -> ThingId {
        self.thing_id
    }

    fn thing_type(&self) -> ThingType {
        ThingType::SWITCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::switch::SwitchConfig;
    use std::time::Duration;

    fn core(config: &SwitchConfig) -> SwitchCore {
        SwitchCore::new("sw", config.normalize())
    }

    #[test]
    fn bind_is_one_shot() {
        let sw = core(&SwitchConfig::default());
        let first = |_: StateAction, state: &mut SwitchState| {
            state.value = true;
            true
        };
        let second = |_: StateAction, _: &mut SwitchState| false;

        sw.bind(Arc::new(first)).unwrap();
        let err = sw.bind(Arc::new(second)).unwrap_err();
        assert!(matches!(err, Error::AlreadyBound { .. }));

        // Original binding still answers
        assert!(sw.read().unwrap());
    }

    #[test]
    fn unbind_is_idempotent() {
        let sw = core(&SwitchConfig::default());
        sw.unbind();
        sw.bind(Arc::new(|_: StateAction, _: &mut SwitchState| true))
            .unwrap();
        sw.unbind();
        sw.unbind();
        assert!(!sw.has_handler());
        assert!(matches!(sw.read(), Err(Error::HandlerUnbound { .. })));
    }

    #[test]
    fn handler_failure_is_reported() {
        let sw = core(&SwitchConfig::default());
        sw.bind(Arc::new(|_: StateAction, _: &mut SwitchState| false))
            .unwrap();

        assert!(matches!(
            sw.write(true),
            Err(Error::HandlerFailure {
                action: StateAction::Set,
                ..
            })
        ));
    }

    #[test]
    fn close_is_reported_once() {
        let sw = core(&SwitchConfig::default());
        assert!(sw.ensure_open().is_ok());
        assert!(sw.mark_closed());
        assert!(!sw.mark_closed());
        assert!(matches!(sw.ensure_open(), Err(Error::Closed { .. })));
    }

    #[tokio::test]
    async fn locked_inching_refuses_disarm() {
        let timers = TimerService::new();
        let sw = core(&SwitchConfig::new().with_inching(1000).with_inching_lock(true));
        let id = timers.arm(Duration::from_secs(1), |_| async {});
        sw.set_inching_timer(id);

        assert!(sw.is_inching_locked());
        assert!(matches!(
            sw.disarm_inching(&timers),
            Err(Error::InchingLocked { .. })
        ));
        assert!(timers.is_armed(id));

        sw.force_disarm_inching(&timers);
        assert!(!timers.is_armed(id));
        assert_eq!(sw.inching_timer(), None);
    }

    #[tokio::test]
    async fn stale_timer_is_ignored() {
        let timers = TimerService::new();
        let sw = core(&SwitchConfig::new().with_inching(1000));
        let old = timers.arm(Duration::from_secs(1), |_| async {});
        let new = timers.arm(Duration::from_secs(1), |_| async {});
        sw.set_inching_timer(new);

        assert!(!sw.clear_fired_timer(old));
        assert_eq!(sw.inching_timer(), Some(new));
        assert!(sw.clear_fired_timer(new));
        assert_eq!(sw.inching_timer(), None);

        timers.cancel(old);
        timers.cancel(new);
    }
}
