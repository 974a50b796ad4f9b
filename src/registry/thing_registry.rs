// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Insertion-ordered thing registry.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::event::ThingId;
use crate::types::ThingType;

/// Identity shared by every registered thing.
pub trait Thing: Send + Sync {
    /// The caller-assigned name, unique among live things.
    fn id(&self) -> &str;

    /// The instance identifier assigned at creation.
    fn thing_id(&self) -> ThingId;

    /// The type tag used to filter enumeration.
    fn thing_type(&self) -> ThingType;
}

/// Holds all live things of type `T` in registration order.
///
/// Enumeration returns a snapshot, so callers may register or unregister
/// things while walking a previous enumeration.
pub struct Registry<T> {
    things: RwLock<Vec<Arc<T>>>,
}

impl<T: Thing> Registry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            things: RwLock::new(Vec::new()),
        }
    }

    /// Registers a thing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if a live thing already uses the same
    /// name.
    pub fn register(&self, thing: Arc<T>) -> Result<()> {
        let mut things = self.things.write();
        if things.iter().any(|t| t.id() == thing.id()) {
            return Err(Error::DuplicateId(thing.id().to_string()));
        }
        tracing::debug!(id = thing.id(), thing_id = %thing.thing_id(), kind = %thing.thing_type(), "Registered");
        things.push(thing);
        Ok(())
    }

    /// Removes a thing by instance id, returning it if it was registered.
    pub fn unregister(&self, thing_id: ThingId) -> Option<Arc<T>> {
        let mut things = self.things.write();
        let index = things.iter().position(|t| t.thing_id() == thing_id)?;
        let thing = things.remove(index);
        tracing::debug!(id = thing.id(), %thing_id, "Unregistered");
        Some(thing)
    }

    /// Looks up a live thing by name.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.things.read().iter().find(|t| t.id() == id).cloned()
    }

    /// Returns every live thing with the given type tag, in registration order.
    #[must_use]
    pub fn of_type(&self, thing_type: ThingType) -> Vec<Arc<T>> {
        self.things
            .read()
            .iter()
            .filter(|t| t.thing_type() == thing_type)
            .cloned()
            .collect()
    }

    /// Returns the names of all live things, in registration order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.things.read().iter().map(|t| t.id().to_string()).collect()
    }

    /// Returns the number of live things.
    #[must_use]
    pub fn len(&self) -> usize {
        self.things.read().len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.things.read().is_empty()
    }
}

impl<T: Thing> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Thing> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("ids", &self.ids()).finish()
    }
}
