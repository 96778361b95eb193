// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag propagation: one pointer delta, many moving items.
//!
//! ## Usage
//!
//! 1) Pick the items that move with [`drag_targets`]: the whole selection when
//!    the grabbed item is part of a multi-item selection, otherwise just it.
//! 2) On each move, call [`DragPropagator::on_drag_move`]. The delta is added
//!    to every target's render-time offset, and committed right away under
//!    [`CommitPolicy::Immediate`].
//! 3) On release, call [`DragPropagator::finish`] to commit what is left and
//!    learn which items moved.
//!
//! ```
//! use kurbo::{Rect, Vec2};
//! use understory_canvas::drag::{CommitPolicy, DragPropagator};
//! use understory_canvas::{Item, ItemStore};
//!
//! let mut store = ItemStore::new();
//! let a = store.insert(Item::new(Rect::new(0.0, 0.0, 10.0, 10.0)));
//! let b = store.insert(Item::new(Rect::new(10.0, 10.0, 20.0, 20.0)));
//!
//! let mut drag = DragPropagator::new();
//! drag.on_drag_move(&mut store, &[a, b], Vec2::new(5.0, 5.0), CommitPolicy::Deferred);
//! assert_eq!(store[a].left, 0.0);
//! assert_eq!(store[a].offset, Vec2::new(5.0, 5.0));
//!
//! let moved = drag.finish(&mut store);
//! assert_eq!(moved, [a, b]);
//! assert_eq!((store[b].left, store[b].top), (15.0, 15.0));
//! ```

use hashbrown::HashMap;
use kurbo::Vec2;
use understory_selection::Selection;

use crate::{ItemHost, ItemId};

/// When drag offsets are written into `left`/`top`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Commit on every move, so the items extent follows the drag.
    Immediate,
    /// Keep offsets render-time only until the gesture ends.
    Deferred,
}

impl CommitPolicy {
    /// [`CommitPolicy::Immediate`] for real-time dragging.
    #[must_use]
    pub fn from_real_time(real_time: bool) -> Self {
        if real_time {
            Self::Immediate
        } else {
            Self::Deferred
        }
    }
}

/// Items that move when `container` is dragged.
///
/// A grabbed item that belongs to a multi-item selection drags the whole
/// selection; otherwise it moves alone.
#[must_use]
pub fn drag_targets(selection: &Selection<ItemId>, container: ItemId) -> Vec<ItemId> {
    if selection.len() > 1 && selection.contains(&container) {
        selection.items().to_vec()
    } else {
        vec![container]
    }
}

/// Accumulates per-item drag offsets for one gesture.
#[derive(Clone, Debug, Default)]
pub struct DragPropagator {
    pending: HashMap<ItemId, Vec2>,
    moved: Vec<ItemId>,
}

impl DragPropagator {
    /// Creates an idle propagator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if some offsets are not yet committed.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Items moved so far in this gesture, in the order they were first moved.
    #[must_use]
    pub fn moved(&self) -> &[ItemId] {
        &self.moved
    }

    /// Broadcasts `delta` to every draggable item in `targets`.
    ///
    /// Returns the items whose offset changed. Under
    /// [`CommitPolicy::Immediate`] their `left`/`top` have already absorbed
    /// the offset when this returns.
    pub fn on_drag_move<H: ItemHost>(
        &mut self,
        host: &mut H,
        targets: &[ItemId],
        delta: Vec2,
        policy: CommitPolicy,
    ) -> Vec<ItemId> {
        if delta == Vec2::ZERO {
            return Vec::new();
        }
        let mut changed = Vec::with_capacity(targets.len());
        for &id in targets {
            let Some(item) = host.item_mut(id) else {
                continue;
            };
            if !item.is_draggable {
                continue;
            }
            let offset = self.pending.entry(id).or_insert(Vec2::ZERO);
            *offset += delta;
            item.offset = *offset;
            if !self.moved.contains(&id) {
                self.moved.push(id);
            }
            changed.push(id);
        }
        if policy == CommitPolicy::Immediate {
            self.commit(host);
        }
        changed
    }

    /// Writes every pending offset into `left`/`top` and resets the offsets.
    ///
    /// Returns the committed items.
    pub fn commit<H: ItemHost>(&mut self, host: &mut H) -> Vec<ItemId> {
        let mut committed = Vec::with_capacity(self.pending.len());
        // Commit in first-moved order so notifications are deterministic.
        for &id in &self.moved {
            let Some(offset) = self.pending.remove(&id) else {
                continue;
            };
            if let Some(item) = host.item_mut(id) {
                item.left += offset.x;
                item.top += offset.y;
                item.offset = Vec2::ZERO;
                committed.push(id);
            }
        }
        self.pending.clear();
        committed
    }

    /// Commits what is left and ends the gesture, returning every item that
    /// moved during it.
    pub fn finish<H: ItemHost>(&mut self, host: &mut H) -> Vec<ItemId> {
        self.commit(host);
        core::mem::take(&mut self.moved)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Vec2};
    use understory_selection::{Selection, SelectionMode};

    use super::{CommitPolicy, DragPropagator, drag_targets};
    use crate::{Item, ItemId, ItemStore};

    #[test]
    fn lone_or_unselected_container_moves_alone() {
        let mut selection = Selection::new();
        let (a, b, c) = (ItemId::new(0), ItemId::new(1), ItemId::new(2));
        assert_eq!(drag_targets(&selection, a), [a]);
        selection.replace_with([a, b]);
        assert_eq!(drag_targets(&selection, c), [c]);
        assert_eq!(drag_targets(&selection, b), [a, b]);

        let single = Selection::with_mode(SelectionMode::Single);
        assert_eq!(drag_targets(&single, a), [a]);
    }

    #[test]
    fn immediate_policy_commits_each_move() {
        let mut store = ItemStore::new();
        let a = store.insert(Item::new(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let mut drag = DragPropagator::new();

        drag.on_drag_move(&mut store, &[a], Vec2::new(2.0, 3.0), CommitPolicy::Immediate);
        drag.on_drag_move(&mut store, &[a], Vec2::new(1.0, 1.0), CommitPolicy::Immediate);
        assert!(!drag.has_pending());
        assert_eq!(store[a].position(), kurbo::Point::new(3.0, 4.0));
        assert_eq!(store[a].offset, Vec2::ZERO);
        assert_eq!(drag.finish(&mut store), [a]);
        assert!(drag.moved().is_empty());
    }

    #[test]
    fn pinned_items_stay_put() {
        let mut store = ItemStore::new();
        let a = store.insert(Item::new(Rect::new(0.0, 0.0, 10.0, 10.0)).pinned());
        let b = store.insert(Item::new(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let mut drag = DragPropagator::new();

        let changed =
            drag.on_drag_move(&mut store, &[a, b], Vec2::new(4.0, 0.0), CommitPolicy::Deferred);
        assert_eq!(changed, [b]);
        assert_eq!(drag.finish(&mut store), [b]);
        assert_eq!(store[a].left, 0.0);
        assert_eq!(store[b].left, 4.0);
    }
}
