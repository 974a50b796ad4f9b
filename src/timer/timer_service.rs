// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Timer service backed by spawned tokio tasks.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;

/// Identifier of an armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Schedules and cancels single-shot callbacks.
///
/// Cloning is cheap; clones share the same set of armed timers.
/// Arming requires a running tokio runtime.
#[derive(Clone, Default)]
pub struct TimerService {
    inner: Arc<TimerInner>,
}

#[derive(Default)]
struct TimerInner {
    next_id: AtomicU64,
    armed: Mutex<HashMap<TimerId, AbortHandle>>,
}

impl TimerService {
    /// Creates a timer service with no armed timers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a timer that runs `callback` once after `duration`.
    ///
    /// The callback receives the id of the timer that fired. By the time
    /// it runs the timer is already disarmed.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn arm<F, Fut>(&self, duration: Duration, callback: F) -> TimerId
    where
        F: FnOnce(TimerId) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = TimerId(self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let inner = Arc::clone(&self.inner);

        // Held across the spawn so the task cannot disarm itself before it is recorded
        let mut armed = self.inner.armed.lock();
        let task = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            inner.armed.lock().remove(&id);
            tracing::debug!(timer = %id, "Timer fired");
            callback(id).await;
        });
        armed.insert(id, task.abort_handle());
        drop(armed);

        tracing::debug!(timer = %id, ?duration, "Timer armed");
        id
    }

    /// Cancels an armed timer.
    ///
    /// Returns `true` if the timer was armed and is now cancelled, `false`
    /// if it had already fired or been cancelled.
    pub fn cancel(&self, id: TimerId) -> bool {
        match self.inner.armed.lock().remove(&id) {
            Some(handle) => {
                handle.abort();
                tracing::debug!(timer = %id, "Timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the timer is armed and has not fired yet.
    #[must_use]
    pub fn is_armed(&self, id: TimerId) -> bool {
        self.inner.armed.lock().contains_key(&id)
    }

    /// Returns the number of armed timers.
    #[must_use]
    pub fn armed_count(&self) -> usize {
        self.inner.armed.lock().len()
    }
}

impl fmt::Debug for TimerService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerService")
            .field("armed", &self.armed_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_duration() {
        let timers = TimerService::new();
        let fired = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&fired);
        let id = timers.arm(Duration::from_millis(100), move |_| async move {
            flag.store(true, Ordering::SeqCst);
        });
        assert!(timers.is_armed(id));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(fired.load(Ordering::SeqCst));
        assert!(!timers.is_armed(id));
        assert_eq!(timers.armed_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let timers = TimerService::new();
        let fired = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&fired);
        let id = timers.arm(Duration::from_millis(100), move |_| async move {
            flag.store(true, Ordering::SeqCst);
        });

        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn callback_receives_own_id() {
        let timers = TimerService::new();
        let seen = Arc::new(AtomicU64::new(0));

        let slot = Arc::clone(&seen);
        let id = timers.arm(Duration::from_millis(10), move |fired| async move {
            slot.store(fired.value(), Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(seen.load(Ordering::SeqCst), id.value());
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let timers = TimerService::new();
        let a = timers.arm(Duration::from_secs(60), |_| async {});
        let b = timers.arm(Duration::from_secs(60), |_| async {});
        assert_ne!(a, b);
        assert_eq!(timers.armed_count(), 2);
        timers.cancel(a);
        timers.cancel(b);
    }
}
