// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch event types.

use super::ThingId;

/// Events broadcast by the switch manager.
///
/// # Examples
///
/// ```
/// use switchgear::event::{SwitchEvent, ThingId};
///
/// let thing_id = ThingId::new();
/// let event = SwitchEvent::state_updated(thing_id, "pump", true);
/// assert!(event.is_state_update());
/// assert_eq!(event.id(), "pump");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SwitchEvent {
    /// A switch was created and registered.
    Created {
        /// The instance identifier.
        thing_id: ThingId,
        /// The switch name.
        id: String,
    },

    /// A switch changed state.
    ///
    /// Emitted only after the state handler accepted the change and the
    /// switching time has elapsed.
    StateUpdated {
        /// The instance identifier.
        thing_id: ThingId,
        /// The switch name.
        id: String,
        /// The new value (`true` = ON).
        value: bool,
    },
}

impl SwitchEvent {
    /// Creates a created event.
    #[must_use]
    pub fn created(thing_id: ThingId, id: impl Into<String>) -> Self {
        Self::Created {
            thing_id,
            id: id.into(),
        }
    }

    /// Creates a state updated event.
    #[must_use]
    pub fn state_updated(thing_id: ThingId, id: impl Into<String>, value: bool) -> Self {
        Self::StateUpdated {
            thing_id,
            id: id.into(),
            value,
        }
    }

    /// Returns the instance identifier associated with this event.
    #[must_use]
    pub fn thing_id(&self) -> ThingId {
        match self {
            Self::Created { thing_id, .. } | Self::StateUpdated { thing_id, .. } => *thing_id,
        }
    }

    /// Returns the switch name associated with this event.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Created { id, .. } | Self::StateUpdated { id, .. } => id,
        }
    }

    /// Returns `true` if this is a created event.
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    /// Returns `true` if this is a state updated event.
    #[must_use]
    pub fn is_state_update(&self) -> bool {
        matches!(self, Self::StateUpdated { .. })
    }

    /// Returns the new value for a state updated event.
    #[must_use]
    pub fn value(&self) -> Option<bool> {
        match self {
            Self::StateUpdated { value, .. } => Some(*value),
            Self::Created { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let thing_id = ThingId::new();

        let created = SwitchEvent::created(thing_id, "valveA");
        assert_eq!(created.thing_id(), thing_id);
        assert_eq!(created.id(), "valveA");
        assert!(created.is_created());
        assert_eq!(created.value(), None);

        let updated = SwitchEvent::state_updated(thing_id, "valveA", false);
        assert!(updated.is_state_update());
        assert!(!updated.is_created());
        assert_eq!(updated.value(), Some(false));
    }

    #[test]
    fn serializes_to_json() {
        let event = SwitchEvent::state_updated(ThingId::new(), "pump", true);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["StateUpdated"]["id"], "pump");
        assert_eq!(json["StateUpdated"]["value"], true);
    }
}
