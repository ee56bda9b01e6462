// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pinned ("anchored") groups.
//!
//! Anchoring is kept as an overlay keyed by group id. Fetched
//! [`GroupSummary`] rows are never touched.

use serde::{Deserialize, Serialize};

use crate::models::GroupSummary;

pub const QUICK_ACCESS: &str = "Quick Access";
pub const ALL_GROUPS: &str = "All Groups";

/// Anchored group ids, in the order they were anchored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorSet {
    ids: Vec<i64>,
}

impl AnchorSet {
    pub fn from_ids<I: IntoIterator<Item = i64>>(ids: I) -> Self {
        let mut set = AnchorSet::default();
        for id in ids {
            set.anchor(id);
        }
        set
    }

    /// Returns false when the group was already anchored.
    pub fn anchor(&mut self, id: i64) -> bool {
        if self.is_anchored(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns false when the group was not anchored.
    pub fn unanchor(&mut self, id: i64) -> bool {
        let before = self.ids.len();
        self.ids.retain(|g| *g != id);
        self.ids.len() != before
    }

    pub fn is_anchored(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSection<'a> {
    pub title: &'static str,
    pub groups: Vec<&'a GroupSummary>,
}

/// Splits `groups` into a quick-access section (only when something is
/// anchored and present) followed by everything else.
pub fn sections<'a>(groups: &'a [GroupSummary], anchors: &AnchorSet) -> Vec<GroupSection<'a>> {
    let mut out = Vec::with_capacity(2);
    let pinned: Vec<&GroupSummary> = anchors
        .ids()
        .iter()
        .filter_map(|id| groups.iter().find(|g| g.id == *id))
        .collect();
    if !pinned.is_empty() {
        out.push(GroupSection {
            title: QUICK_ACCESS,
            groups: pinned,
        });
    }
    out.push(GroupSection {
        title: ALL_GROUPS,
        groups: groups
            .iter()
            .filter(|g| !anchors.is_anchored(g.id))
            .collect(),
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: i64, title: &str) -> GroupSummary {
        GroupSummary {
            id,
            title: title.to_string(),
            status: None,
            member_count: 2,
            expense_count: 0,
        }
    }

    #[test]
    fn anchor_and_unanchor_report_changes() {
        let mut a = AnchorSet::default();
        assert!(a.anchor(3));
        assert!(a.is_anchored(3));
        assert!(a.unanchor(3));
        assert!(a.is_empty());
        assert!(a.anchor(1));
        assert!(!a.anchor(1));
        assert!(!a.unanchor(9));
    }

    #[test]
    fn sections_follow_anchor_order() {
        let groups = vec![group(1, "Flat"), group(2, "Trip"), group(3, "Office")];
        let before = groups.clone();
        let anchors = AnchorSet::from_ids([3, 1, 42]);

        let s = sections(&groups, &anchors);
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].title, QUICK_ACCESS);
        let pinned: Vec<i64> = s[0].groups.iter().map(|g| g.id).collect();
        assert_eq!(pinned, vec![3, 1]);
        assert_eq!(s[1].title, ALL_GROUPS);
        assert_eq!(s[1].groups.len(), 1);
        assert_eq!(s[1].groups[0].id, 2);
        assert_eq!(groups, before);
    }

    #[test]
    fn no_quick_access_without_anchors() {
        let groups = vec![group(1, "Flat")];
        let s = sections(&groups, &AnchorSet::from_ids([7]));
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].title, ALL_GROUPS);
    }
}
