// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of live things.
//!
//! A [`Thing`] is anything with a name, an instance id and a type tag.
//! The [`Registry`] owns registered things and enumerates them in the
//! order they were registered.

mod thing_registry;

pub use thing_registry::{Registry, Thing};
