// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch engine.
//!
//! A [`Switch`] is a binary actuator whose hardware is driven by a
//! caller-supplied [`StateHandler`]. On top of plain ON/OFF the engine
//! enforces two policies:
//!
//! - **Interlock groups**: switches sharing a non-zero group id are
//!   mutually exclusive. Turning one ON switches the others OFF first.
//! - **Inching**: an optional countdown that switches OFF automatically
//!   after the switch turns ON. With the inching lock set, the countdown
//!   cannot be cut short and blocks group siblings from turning ON.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use switchgear::switch::{StateAction, SwitchConfig, SwitchManager, SwitchState};
//!
//! fn relay() -> impl Fn(StateAction, &mut SwitchState) -> bool + Send + Sync {
//!     let on = Arc::new(AtomicBool::new(false));
//!     move |action: StateAction, state: &mut SwitchState| {
//!         match action {
//!             StateAction::Get => state.value = on.load(Ordering::SeqCst),
//!             StateAction::Set => on.store(state.value, Ordering::SeqCst),
//!         }
//!         true
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> switchgear::Result<()> {
//! let manager = SwitchManager::new();
//! let group = SwitchConfig::new().with_group(2);
//!
//! let valve_a = manager.create("valveA", Some(group.clone()))?;
//! let valve_b = manager.create("valveB", Some(group))?;
//! valve_a.bind_handler(relay())?;
//! valve_b.bind_handler(relay())?;
//!
//! valve_a.set(true).await?;
//! valve_b.set(true).await?;
//! assert!(!valve_a.get()?);
//! assert!(valve_b.get()?);
//! # Ok(())
//! # }
//! ```

mod config;
mod engine;
mod group;
mod handle;
mod handler;
mod manager;
mod switch_core;

pub use config::{DEFAULT_SWITCHING_TIME, NO_GROUP, NO_INCHING, SwitchConfig, SwitchSettings};
pub use handle::Switch;
pub use handler::{StateAction, StateHandler, SwitchState};
pub use manager::SwitchManager;
