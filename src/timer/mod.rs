// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-shot timers on the tokio runtime.
//!
//! [`TimerService::arm`] schedules a callback to run once after a delay and
//! returns a [`TimerId`] that can be passed to [`TimerService::cancel`].
//! A timer that has started running its callback is no longer armed and
//! cannot be cancelled.

mod timer_service;

pub use timer_service::{TimerId, TimerService};
