// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Commands accepted by a switch.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A command that can be issued to a switch.
///
/// The string forms `ON`, `OFF` and `TOGGLE` are the wire-level command
/// names; they map to `set(true)`, `set(false)` and `toggle()`.
///
/// # Examples
///
/// ```
/// use switchgear::types::SwitchCommand;
///
/// assert_eq!(SwitchCommand::On.as_str(), "ON");
/// assert_eq!("toggle".parse::<SwitchCommand>().unwrap(), SwitchCommand::Toggle);
/// assert_eq!(SwitchCommand::from(false), SwitchCommand::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchCommand {
    /// Switch OFF.
    Off,
    /// Switch ON, turning OFF the rest of the group first.
    On,
    /// Invert the current state.
    Toggle,
}

impl SwitchCommand {
    /// Returns the command string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
            Self::Toggle => "TOGGLE",
        }
    }

    /// Returns the target value for `On`/`Off`, or `None` for `Toggle`.
    #[must_use]
    pub const fn target(&self) -> Option<bool> {
        match self {
            Self::Off => Some(false),
            Self::On => Some(true),
            Self::Toggle => None,
        }
    }
}

impl fmt::Display for SwitchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwitchCommand {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OFF" | "0" | "FALSE" => Ok(Self::Off),
            "ON" | "1" | "TRUE" => Ok(Self::On),
            "TOGGLE" | "2" => Ok(Self::Toggle),
            _ => Err(ValueError::InvalidCommand(s.to_string())),
        }
    }
}

impl From<bool> for SwitchCommand {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}
