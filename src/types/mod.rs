// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the library.
//!
//! # Types
//!
//! - [`SwitchCommand`] - ON/OFF/TOGGLE command surface
//! - [`ThingType`] - Type tag used by the registry to filter things

mod switch_command;
mod thing_type;

pub use switch_command::SwitchCommand;
pub use thing_type::ThingType;
