// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for switch lifecycle and state notifications.
//!
//! The [`EventBus`] broadcasts two kinds of [`SwitchEvent`]: one when a
//! switch is created and one each time a switch settles into a new state.
//!
//! # Examples
//!
//! ```
//! use switchgear::event::{EventBus, SwitchEvent, ThingId};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(SwitchEvent::created(ThingId::new(), "pump"));
//! assert!(rx.try_recv().unwrap().is_created());
//! ```

mod event_bus;
mod switch_event;
mod thing_id;

pub use event_bus::EventBus;
pub use switch_event::SwitchEvent;
pub use thing_id::ThingId;
