// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_selection --heading-base-level=0

//! Understory Selection: selection bookkeeping for canvases.
//!
//! This crate tracks _which_ items are selected. It does **not** know anything
//! about where items are or how a gesture maps to a set of keys; callers decide
//! that (for example with a rubber-band hit test) and hand the resulting keys
//! to a [`Selection`].
//!
//! The core type is [`Selection`], a small, generic container that tracks:
//! - The set of selected keys, in the order they were selected.
//! - An optional **primary** key (the most recently selected item).
//! - A [`SelectionMode`]: [`SelectionMode::Single`] holds at most one key,
//!   [`SelectionMode::Multiple`] is unbounded.
//! - A monotonically increasing **revision** counter that bumps when the
//!   selection changes.
//!
//! Every mutation returns a [`SelectionDiff`] listing the keys that became
//! selected and unselected, so hosts can flip per-item flags and raise
//! notifications without diffing the whole set themselves.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_selection::{Selection, SelectionMode};
//!
//! // Using u32 as a stand-in for an application-specific ID.
//! let mut selection = Selection::<u32>::new();
//!
//! // Rubber band over items 1, 2 and 3.
//! let diff = selection.replace_with([1, 2, 3]);
//! assert_eq!(diff.added, [1, 2, 3]);
//!
//! // The band shrinks: 3 drops out.
//! let diff = selection.replace_with([1, 2]);
//! assert_eq!(diff.removed, [3]);
//!
//! // Switching modes always starts from an empty selection.
//! let diff = selection.set_mode(SelectionMode::Single);
//! assert_eq!(diff.removed, [1, 2]);
//! assert!(selection.is_empty());
//! ```
//!
//! ## Single selection is a contract
//!
//! In [`SelectionMode::Single`], handing more than one key to
//! [`Selection::replace_with`] or growing the selection past one item with
//! [`Selection::add`] is a caller bug and **panics**. Silently keeping one of
//! the keys would hide a gesture that was routed through the wrong mode.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// How many keys a [`Selection`] may hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// At most one key.
    Single,
    /// Any number of keys.
    #[default]
    Multiple,
}

/// Keys whose selection state changed during one mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionDiff<T> {
    /// Keys that became selected, in selection order.
    pub added: Vec<T>,
    /// Keys that became unselected.
    pub removed: Vec<T>,
}

impl<T> SelectionDiff<T> {
    /// A diff with no changes.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl<T> Default for SelectionDiff<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// A small selection container tracking a set of keys plus a primary key,
/// a mode, and a revision.
///
/// `Selection` does not impose hashing or ordering constraints on `T`; it only
/// requires equality (and `Clone` to report diffs). Keys live in a `Vec<T>`
/// and uniqueness is enforced by scanning, which suits the item counts of an
/// interactive canvas.
#[derive(Clone, Debug, Default)]
pub struct Selection<T> {
    items: Vec<T>,
    primary: Option<usize>,
    mode: SelectionMode,
    revision: u64,
}

impl<T> Selection<T> {
    /// Creates an empty selection in [`SelectionMode::Multiple`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_mode(SelectionMode::Multiple)
    }

    /// Creates an empty selection in the given mode.
    #[must_use]
    pub const fn with_mode(mode: SelectionMode) -> Self {
        Self {
            items: Vec::new(),
            primary: None,
            mode,
            revision: 0,
        }
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Returns `true` if the selection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns a slice of all selected keys in selection order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns an iterator over the selected keys.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns a reference to the primary key, if any.
    ///
    /// In single mode this is the selected key.
    #[must_use]
    pub fn primary(&self) -> Option<&T> {
        self.primary.map(|idx| &self.items[idx])
    }

    /// Returns the current revision counter.
    ///
    /// It is bumped only when a mutation changes the selected keys or the
    /// primary key; no-op calls leave it unchanged.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn assert_fits(&self, len: usize) {
        assert!(
            self.mode == SelectionMode::Multiple || len <= 1,
            "single-selection mode cannot hold {len} items"
        );
    }
}

impl<T> Selection<T>
where
    T: PartialEq + Clone,
{
    /// Returns `true` if the selection currently contains `key`.
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        self.position_of(key).is_some()
    }

    /// Switches the selection mode. Changing the mode clears the selection;
    /// setting the current mode again is a no-op.
    pub fn set_mode(&mut self, mode: SelectionMode) -> SelectionDiff<T> {
        if self.mode == mode {
            return SelectionDiff::empty();
        }
        self.mode = mode;
        self.clear()
    }

    /// Removes all keys from the selection.
    pub fn clear(&mut self) -> SelectionDiff<T> {
        if self.items.is_empty() {
            return SelectionDiff::empty();
        }
        let removed = core::mem::take(&mut self.items);
        self.primary = None;
        self.bump_revision();
        SelectionDiff {
            added: Vec::new(),
            removed,
        }
    }

    /// Replaces the selection with a single key, which becomes primary.
    pub fn select_only(&mut self, key: T) -> SelectionDiff<T> {
        self.replace_with_items(alloc::vec![key])
    }

    /// Replaces the current selection with the provided batch of keys.
    ///
    /// - Duplicates in the input are ignored.
    /// - The primary key is the first key of the batch, if any.
    ///
    /// # Panics
    ///
    /// Panics in [`SelectionMode::Single`] if the batch holds more than one
    /// unique key.
    pub fn replace_with<I>(&mut self, keys: I) -> SelectionDiff<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut new_items: Vec<T> = Vec::new();
        for key in keys {
            if !new_items.contains(&key) {
                new_items.push(key);
            }
        }
        self.assert_fits(new_items.len());
        self.replace_with_items(new_items)
    }

    /// Adds `key` to the selection if it is not already present, making it
    /// primary.
    ///
    /// # Panics
    ///
    /// Panics in [`SelectionMode::Single`] if a different key is already
    /// selected.
    pub fn add(&mut self, key: T) -> SelectionDiff<T> {
        if let Some(idx) = self.position_of(&key) {
            if self.primary != Some(idx) {
                self.primary = Some(idx);
                self.bump_revision();
            }
            return SelectionDiff::empty();
        }
        self.assert_fits(self.items.len() + 1);
        self.items.push(key.clone());
        self.primary = Some(self.items.len() - 1);
        self.bump_revision();
        SelectionDiff {
            added: alloc::vec![key],
            removed: Vec::new(),
        }
    }

    /// Removes `key` from the selection if present.
    ///
    /// If the removed key was primary, the most recently selected remaining
    /// key becomes primary.
    pub fn remove(&mut self, key: &T) -> SelectionDiff<T> {
        let Some(idx) = self.position_of(key) else {
            return SelectionDiff::empty();
        };
        let removed = self.items.remove(idx);
        self.primary = match self.primary {
            _ if self.items.is_empty() => None,
            Some(p) if p == idx => Some(self.items.len() - 1),
            Some(p) if p > idx => Some(p - 1),
            other => other,
        };
        self.bump_revision();
        SelectionDiff {
            added: Vec::new(),
            removed: alloc::vec![removed],
        }
    }

    /// Toggles `key`: removes it if selected, otherwise adds it.
    ///
    /// In [`SelectionMode::Single`] toggling an unselected key replaces the
    /// current one instead of panicking.
    pub fn toggle(&mut self, key: T) -> SelectionDiff<T> {
        if self.contains(&key) {
            self.remove(&key)
        } else if self.mode == SelectionMode::Single {
            self.select_only(key)
        } else {
            self.add(key)
        }
    }

    fn position_of(&self, key: &T) -> Option<usize> {
        self.items.iter().position(|k| k == key)
    }

    fn replace_with_items(&mut self, new_items: Vec<T>) -> SelectionDiff<T> {
        let new_primary = if new_items.is_empty() { None } else { Some(0) };
        if new_items == self.items && self.primary == new_primary {
            return SelectionDiff::empty();
        }

        let removed = self
            .items
            .iter()
            .filter(|k| !new_items.contains(k))
            .cloned()
            .collect();
        let added = new_items
            .iter()
            .filter(|k| !self.items.contains(k))
            .cloned()
            .collect();

        self.items = new_items;
        self.primary = new_primary;
        self.bump_revision();
        SelectionDiff { added, removed }
    }
}
