// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Type tags for registered things.

use std::fmt;

/// Type tag of a registered thing.
///
/// The low bits carry the class (sensor or actuator), the upper bits the
/// concrete kind. Tags are compared by value when the registry filters
/// its enumeration.
///
/// # Examples
///
/// ```
/// use switchgear::types::ThingType;
///
/// assert!(ThingType::SWITCH.is_actuator());
/// assert!(!ThingType::SWITCH.is_sensor());
/// assert_ne!(ThingType::SWITCH, ThingType::ACTUATOR);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThingType(u16);

impl ThingType {
    /// Generic sensor class.
    pub const SENSOR: Self = Self(1);
    /// Generic actuator class.
    pub const ACTUATOR: Self = Self(2);
    /// Binary on/off actuator.
    pub const SWITCH: Self = Self(4 | Self::ACTUATOR.0);

    /// Returns the raw tag value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns `true` if the tag belongs to the sensor class.
    #[must_use]
    pub const fn is_sensor(&self) -> bool {
        self.0 & Self::SENSOR.0 != 0
    }

    /// Returns `true` if the tag belongs to the actuator class.
    #[must_use]
    pub const fn is_actuator(&self) -> bool {
        self.0 & Self::ACTUATOR.0 != 0
    }
}

impl fmt::Display for ThingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SENSOR => f.write_str("sensor"),
            Self::ACTUATOR => f.write_str("actuator"),
            Self::SWITCH => f.write_str("switch"),
            Self(other) => write!(f, "thing({other:#06x})"),
        }
    }
}
