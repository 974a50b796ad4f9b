// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Group id meaning "not part of any interlock group".
pub const NO_GROUP: u32 = 0;

/// Inching timeout meaning "inching disabled".
pub const NO_INCHING: Duration = Duration::ZERO;

/// Switching time used when none (or a negative one) is configured.
pub const DEFAULT_SWITCHING_TIME: Duration = Duration::from_millis(10);

/// Caller-facing switch configuration.
///
/// Values are taken as given and only normalized when the switch is
/// created (see [`SwitchConfig::normalize`]), so out-of-range input is
/// accepted here. Both `snake_case` and `camelCase` keys are accepted when
/// deserializing.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use switchgear::switch::SwitchConfig;
///
/// let config = SwitchConfig::new()
///     .with_group(1)
///     .with_inching(500)
///     .with_switching_time(20);
///
/// let settings = config.normalize();
/// assert_eq!(settings.group_id, 1);
/// assert_eq!(settings.inching_timeout, Duration::from_millis(500));
///
/// let parsed = SwitchConfig::from_json(r#"{"groupId": 2, "inchingLock": true}"#).unwrap();
/// assert_eq!(parsed.group_id, 2);
/// assert!(parsed.inching_lock);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    /// Interlock group; zero or negative means no group.
    #[serde(alias = "groupId")]
    pub group_id: i64,
    /// Milliseconds before an automatic OFF; zero or negative disables inching.
    #[serde(alias = "inchingTimeout")]
    pub inching_timeout: i64,
    /// Forbid cancelling an inching countdown before it expires.
    #[serde(alias = "inchingLock")]
    pub inching_lock: bool,
    /// Milliseconds to pause after each transition; unset or negative
    /// means the default.
    #[serde(alias = "switchingTime")]
    pub switching_time: Option<i64>,
}

impl SwitchConfig {
    /// Creates a configuration with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the input is not a valid configuration object.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the interlock group.
    #[must_use]
    pub fn with_group(mut self, group_id: i64) -> Self {
        self.group_id = group_id;
        self
    }

    /// Sets the inching timeout in milliseconds.
    #[must_use]
    pub fn with_inching(mut self, timeout_ms: i64) -> Self {
        self.inching_timeout = timeout_ms;
        self
    }

    /// Sets whether the inching countdown is locked.
    #[must_use]
    pub fn with_inching_lock(mut self, locked: bool) -> Self {
        self.inching_lock = locked;
        self
    }

    /// Sets the switching time in milliseconds.
    #[must_use]
    pub fn with_switching_time(mut self, switching_time_ms: i64) -> Self {
        self.switching_time = Some(switching_time_ms);
        self
    }

    /// Produces the normalized settings a switch runs with.
    ///
    /// Zero or negative group and inching values collapse to "none", and
    /// an unset or negative switching time becomes
    /// [`DEFAULT_SWITCHING_TIME`].
    #[must_use]
    pub fn normalize(&self) -> SwitchSettings {
        let group_id = u32::try_from(self.group_id.max(0)).unwrap_or(u32::MAX);
        let inching_timeout = positive_millis(self.inching_timeout).unwrap_or(NO_INCHING);
        let switching_time = match self.switching_time {
            Some(ms) if ms >= 0 => positive_millis(ms).unwrap_or(Duration::ZERO),
            _ => DEFAULT_SWITCHING_TIME,
        };

        SwitchSettings {
            group_id,
            inching_timeout,
            inching_lock: self.inching_lock,
            switching_time,
        }
    }
}

fn positive_millis(ms: i64) -> Option<Duration> {
    u64::try_from(ms)
        .ok()
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

/// Normalized settings of a live switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchSettings {
    /// Interlock group, [`NO_GROUP`] if none.
    pub group_id: u32,
    /// Inching countdown, [`NO_INCHING`] if disabled.
    pub inching_timeout: Duration,
    /// Whether the inching countdown may not be cancelled early.
    pub inching_lock: bool,
    /// Pause after each commanded transition.
    pub switching_time: Duration,
}

impl SwitchSettings {
    /// Returns `true` if the switch belongs to an interlock group.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.group_id != NO_GROUP
    }

    /// Returns `true` if turning ON arms an inching countdown.
    #[must_use]
    pub fn has_inching(&self) -> bool {
        self.inching_timeout != NO_INCHING
    }
}

impl Default for SwitchSettings {
    fn default() -> Self {
        SwitchConfig::default().normalize()
    }
}
