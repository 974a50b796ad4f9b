// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Instance identifier type.

use std::fmt;

use uuid::Uuid;

/// Unique identifier of a registered instance.
///
/// The caller-supplied string id names a switch; a `ThingId` names one
/// particular instance of it. Closing a switch and creating a new one
/// under the same name yields a different `ThingId`.
///
/// # Examples
///
/// ```
/// use switchgear::event::ThingId;
///
/// let a = ThingId::new();
/// let b = ThingId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ThingId(Uuid);

impl ThingId {
    /// Creates a new unique identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ThingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = &self.0.to_string()[..8];
        write!(f, "ThingId({short}...)")
    }
}

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ThingId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
