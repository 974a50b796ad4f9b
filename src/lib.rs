// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `switchgear` - policy and sequencing for remotely controlled switches.
//!
//! This library models binary actuators (relays, valves, pumps) whose
//! physical read/write is delegated to a caller-supplied handler, and
//! layers two safety behaviors on top of plain ON/OFF control.
//!
//! # Features
//!
//! - **Interlock groups**: at most one switch per group is ON; turning one
//!   ON switches the rest of its group OFF first
//! - **Inching**: automatic OFF after a configurable time, optionally
//!   locked against early cancellation
//! - **Switching time**: a settle pause after every transition, before the
//!   state change is announced
//! - **Events**: creation and state updates broadcast on an [`EventBus`]
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use switchgear::{StateAction, SwitchConfig, SwitchManager, SwitchState};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> switchgear::Result<()> {
//! let manager = SwitchManager::new();
//!
//! // Auto-OFF 500 ms after switching ON
//! let config = SwitchConfig::new().with_group(1).with_inching(500);
//! let pump = manager.create("pump", Some(config))?;
//!
//! let relay = Arc::new(AtomicBool::new(false));
//! pump.bind_handler(move |action: StateAction, state: &mut SwitchState| {
//!     match action {
//!         StateAction::Get => state.value = relay.load(Ordering::SeqCst),
//!         StateAction::Set => relay.store(state.value, Ordering::SeqCst),
//!     }
//!     true
//! })?;
//!
//! pump.set(true).await?;
//! assert!(pump.get()?);
//! assert!(pump.is_inching());
//! # Ok(())
//! # }
//! ```
//!
//! ## Commands
//!
//! ```
//! use switchgear::SwitchCommand;
//!
//! let cmd: SwitchCommand = "TOGGLE".parse().unwrap();
//! assert_eq!(cmd, SwitchCommand::Toggle);
//! ```

pub mod error;
pub mod event;
pub mod registry;
pub mod switch;
pub mod timer;
pub mod types;

pub use error::{Error, ParseError, Result, ValueError};
pub use event::{EventBus, SwitchEvent, ThingId};
pub use switch::{
    StateAction, StateHandler, Switch, SwitchConfig, SwitchManager, SwitchSettings, SwitchState,
};
pub use timer::{TimerId, TimerService};
pub use types::{SwitchCommand, ThingType};
