// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial selection: which items a content-space rectangle hits.
//!
//! Hit testing is a linear scan over the host's items. An item matches when
//! it is selectable, has valid bounds, and its bounds overlap the query with a
//! non-zero area; degenerate rubber bands therefore never match anything.

use kurbo::Rect;
use understory_view2d::intersects;

use crate::{ItemHost, ItemId};

/// How many matches a query reports, and in which order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Single selection: matches ordered top-first, so the first entry is the
    /// item painted on top.
    FirstMatch,
    /// Multiple selection: every match, in paint order.
    AllMatches,
}

/// Returns the selectable items whose bounds intersect `rect`.
#[must_use]
pub fn query<H: ItemHost>(rect: Rect, host: &H, policy: SelectionPolicy) -> Vec<ItemId> {
    let mut hits: Vec<ItemId> = host
        .items()
        .filter(|(_, item)| item.is_selectable && item.is_valid() && intersects(item.bounds(), rect))
        .map(|(id, _)| id)
        .collect();
    if policy == SelectionPolicy::FirstMatch {
        hits.reverse();
    }
    hits
}

/// How a selection gesture combines its hits with the selection that existed
/// when the gesture started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionType {
    /// Hits replace the selection.
    #[default]
    Replace,
    /// Hits are added.
    Append,
    /// Hits are removed.
    Remove,
    /// Hits flip between selected and unselected.
    Invert,
}

impl SelectionType {
    /// Combines `base` with `hits`. The result keeps `base` order, followed by
    /// newly selected hits in hit order.
    #[must_use]
    pub fn apply(self, base: &[ItemId], hits: &[ItemId]) -> Vec<ItemId> {
        match self {
            Self::Replace => hits.to_vec(),
            Self::Append => base
                .iter()
                .chain(hits.iter().filter(|id| !base.contains(id)))
                .copied()
                .collect(),
            Self::Remove => base.iter().filter(|id| !hits.contains(id)).copied().collect(),
            Self::Invert => base
                .iter()
                .filter(|id| !hits.contains(id))
                .chain(hits.iter().filter(|id| !base.contains(id)))
                .copied()
                .collect(),
        }
    }
}

/// Single-selection resolver that keeps its pick while the pick stays valid.
///
/// When the picked item stops matching, the next item after it in the
/// previous match list that still matches takes over; only when none does is
/// the top of the fresh match list used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StickyPick {
    candidates: Vec<ItemId>,
    picked: Option<ItemId>,
}

impl StickyPick {
    /// A resolver with no previous pick.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current pick.
    #[must_use]
    pub fn picked(&self) -> Option<ItemId> {
        self.picked
    }

    /// Resolves the pick against a fresh top-first match list.
    pub fn update(&mut self, matches: &[ItemId]) -> Option<ItemId> {
        let next = match self.picked {
            Some(picked) if matches.contains(&picked) => Some(picked),
            Some(picked) => self.fallback_after(picked, matches),
            None => matches.first().copied(),
        };
        self.candidates.clear();
        self.candidates.extend_from_slice(matches);
        self.picked = next;
        next
    }

    fn fallback_after(&self, picked: ItemId, matches: &[ItemId]) -> Option<ItemId> {
        let from_candidates = self.candidates.iter().position(|c| *c == picked).and_then(|idx| {
            let (before, after) = self.candidates.split_at(idx);
            after[1..]
                .iter()
                .chain(before)
                .find(|c| matches.contains(c))
                .copied()
        });
        from_candidates.or_else(|| matches.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::{SelectionPolicy, SelectionType, StickyPick, query};
    use crate::{Item, ItemId, ItemStore};

    fn id(i: usize) -> ItemId {
        ItemId::new(i)
    }

    fn store() -> ItemStore {
        let mut store = ItemStore::new();
        store.insert(Item::new(Rect::new(0.0, 0.0, 50.0, 50.0)));
        store.insert(Item::new(Rect::new(25.0, 25.0, 75.0, 75.0)));
        store.insert(Item::new(Rect::new(200.0, 200.0, 250.0, 250.0)).unselectable());
        store.insert(Item::pending());
        store
    }

    #[test]
    fn first_match_is_topmost() {
        let hits = query(
            Rect::new(30.0, 30.0, 40.0, 40.0),
            &store(),
            SelectionPolicy::FirstMatch,
        );
        assert_eq!(hits, [id(1), id(0)]);
    }

    #[test]
    fn unselectable_invalid_and_degenerate_never_match() {
        let store = store();
        let everything = Rect::new(-1000.0, -1000.0, 1000.0, 1000.0);
        assert_eq!(
            query(everything, &store, SelectionPolicy::AllMatches),
            [id(0), id(1)]
        );
        let point = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(query(point, &store, SelectionPolicy::AllMatches).is_empty());
    }

    #[test]
    fn selection_types_combine_with_base() {
        let base = [id(1), id(2)];
        let hits = [id(2), id(3)];
        assert_eq!(SelectionType::Replace.apply(&base, &hits), [id(2), id(3)]);
        assert_eq!(SelectionType::Append.apply(&base, &hits), [id(1), id(2), id(3)]);
        assert_eq!(SelectionType::Remove.apply(&base, &hits), [id(1)]);
        assert_eq!(SelectionType::Invert.apply(&base, &hits), [id(1), id(3)]);
    }

    #[test]
    fn pick_sticks_while_still_matching() {
        let mut pick = StickyPick::new();
        assert_eq!(pick.update(&[id(1), id(0)]), Some(id(1)));
        // A new item on top does not steal the pick.
        assert_eq!(pick.update(&[id(2), id(1), id(0)]), Some(id(1)));
    }

    #[test]
    fn invalidated_pick_falls_back_to_next_candidate() {
        let mut pick = StickyPick::new();
        pick.update(&[id(3), id(2), id(1)]);
        assert_eq!(pick.picked(), Some(id(3)));
        // 3 drops out; 2 follows it in the last-known list.
        assert_eq!(pick.update(&[id(5), id(1), id(2)]), Some(id(2)));
        // The search wraps around the last-known list.
        assert_eq!(pick.update(&[id(7), id(5)]), Some(id(5)));
        // Nothing from the last-known list remains: take the new top.
        assert_eq!(pick.update(&[id(9), id(8)]), Some(id(9)));
        assert_eq!(pick.update(&[]), None);
    }
}
