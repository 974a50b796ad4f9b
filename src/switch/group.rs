// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interlock group membership.

use std::sync::Arc;

use crate::registry::Thing;
use crate::types::ThingType;

use super::switch_core::SwitchCore;

/// Yields the other switches sharing `switch`'s interlock group.
///
/// `candidates` is a registry enumeration; its order is preserved. A
/// switch without a group has no siblings, and ungrouped candidates are
/// never siblings.
pub(crate) fn group_siblings<'a>(
    switch: &'a SwitchCore,
    candidates: &'a [Arc<SwitchCore>],
) -> impl Iterator<Item = &'a Arc<SwitchCore>> + 'a {
    let settings = switch.settings();
    candidates.iter().filter(move |candidate| {
        settings.is_grouped()
            && candidate.thing_type() == ThingType::SWITCH
            && candidate.thing_id() != switch.thing_id()
            && candidate.settings().group_id == settings.group_id
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::switch::SwitchConfig;

    fn switch(id: &str, group: i64) -> Arc<SwitchCore> {
        Arc::new(SwitchCore::new(
            id,
            SwitchConfig::new().with_group(group).normalize(),
        ))
    }

    fn sibling_ids(of: &SwitchCore, all: &[Arc<SwitchCore>]) -> Vec<String> {
        group_siblings(of, all).map(|s| s.id().to_string()).collect()
    }

    #[test]
    fn same_group_excluding_self_in_order() {
        let all = vec![
            switch("a", 5),
            switch("b", 2),
            switch("c", 5),
            switch("d", 5),
        ];
        assert_eq!(sibling_ids(&all[2], &all), vec!["a", "d"]);
        assert!(sibling_ids(&all[1], &all).is_empty());
    }

    #[test]
    fn ungrouped_switch_has_no_siblings() {
        let all = vec![switch("a", 0), switch("b", 0), switch("c", -1)];
        assert!(sibling_ids(&all[0], &all).is_empty());
    }

    #[test]
    fn ungrouped_candidates_are_skipped() {
        let all = vec![switch("a", 1), switch("b", 0), switch("c", 1)];
        assert_eq!(sibling_ids(&all[0], &all), vec!["c"]);
    }
}
