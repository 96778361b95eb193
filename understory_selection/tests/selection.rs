// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_selection` crate.
//!
//! These exercise the core `Selection<T>` API, with a focus on how contents,
//! the primary key, the mode, the reported diffs, and the revision counter
//! interact.

use understory_selection::{Selection, SelectionMode};

#[test]
fn empty_selection_basics() {
    let sel = Selection::<u32>::new();
    assert!(sel.is_empty());
    assert_eq!(sel.len(), 0);
    assert_eq!(sel.primary(), None);
    assert_eq!(sel.mode(), SelectionMode::Multiple);
    assert_eq!(sel.revision(), 0);
}

#[test]
fn select_only_sets_primary_and_bumps_revision() {
    let mut sel = Selection::new();
    let diff = sel.select_only(1);

    assert_eq!(diff.added, [1]);
    assert!(diff.removed.is_empty());
    assert_eq!(sel.items(), &[1]);
    assert_eq!(sel.primary(), Some(&1));
    assert_eq!(sel.revision(), 1);

    // No-op: selecting the same singleton again should not change revision.
    assert!(sel.select_only(1).is_empty());
    assert_eq!(sel.revision(), 1);
}

#[test]
fn clear_reports_removed_keys_and_bumps_revision_only_on_change() {
    let mut sel = Selection::new();
    assert!(sel.clear().is_empty());
    assert_eq!(sel.revision(), 0);

    sel.replace_with([1, 2]);
    let diff = sel.clear();
    assert_eq!(diff.removed, [1, 2]);
    assert!(sel.is_empty());
    assert_eq!(sel.primary(), None);
    assert_eq!(sel.revision(), 2);
}

#[test]
fn replace_with_dedups_and_diffs_against_previous_contents() {
    let mut sel = Selection::new();

    let diff = sel.replace_with([1, 2, 2, 3]);
    assert_eq!(sel.items(), &[1, 2, 3]);
    assert_eq!(diff.added, [1, 2, 3]);
    assert_eq!(sel.primary(), Some(&1));

    // The rubber band moves: 1 leaves, 4 enters.
    let diff = sel.replace_with([2, 3, 4]);
    assert_eq!(diff.added, [4]);
    assert_eq!(diff.removed, [1]);
    assert_eq!(sel.primary(), Some(&2));
}

#[test]
fn add_and_remove_update_primary_and_revision() {
    let mut sel = Selection::new();
    sel.add(1);
    sel.add(2);
    assert_eq!(sel.items(), &[1, 2]);
    assert_eq!(sel.primary(), Some(&2));

    let rev_before = sel.revision();
    // Adding an already-selected key should only move primary.
    assert!(sel.add(1).is_empty());
    assert_eq!(sel.primary(), Some(&1));
    assert!(sel.revision() > rev_before);

    // Removing a non-existent key is a no-op.
    let rev_before_remove = sel.revision();
    assert!(sel.remove(&99).is_empty());
    assert_eq!(sel.revision(), rev_before_remove);

    // Removing the primary key hands primary to the last remaining key.
    let diff = sel.remove(&1);
    assert_eq!(diff.removed, [1]);
    assert_eq!(sel.items(), &[2]);
    assert_eq!(sel.primary(), Some(&2));
    assert!(sel.revision() > rev_before_remove);
}

#[test]
fn toggle_adds_and_removes_with_revision() {
    let mut sel = Selection::new();

    sel.toggle(1);
    assert_eq!(sel.items(), &[1]);
    assert_eq!(sel.primary(), Some(&1));
    let rev_after_add = sel.revision();

    sel.toggle(1);
    assert!(sel.items().is_empty());
    assert!(sel.primary().is_none());
    assert!(sel.revision() > rev_after_add);
}

#[test]
fn changing_mode_clears_selection() {
    let mut sel = Selection::new();
    sel.replace_with([5, 6, 7]);

    assert!(sel.set_mode(SelectionMode::Multiple).is_empty());
    assert_eq!(sel.len(), 3);

    let diff = sel.set_mode(SelectionMode::Single);
    assert_eq!(diff.removed, [5, 6, 7]);
    assert!(sel.is_empty());
    assert_eq!(sel.mode(), SelectionMode::Single);
}

#[test]
fn single_mode_holds_at_most_one_key() {
    let mut sel = Selection::with_mode(SelectionMode::Single);
    sel.replace_with([3]);
    sel.replace_with([4, 4]);
    assert_eq!(sel.items(), &[4]);
    sel.replace_with(core::iter::empty());
    assert!(sel.is_empty());
}

#[test]
#[should_panic(expected = "single-selection mode cannot hold 2 items")]
fn single_mode_rejects_batches() {
    let mut sel = Selection::with_mode(SelectionMode::Single);
    sel.replace_with([1, 2]);
}

#[test]
#[should_panic(expected = "single-selection mode cannot hold 2 items")]
fn single_mode_rejects_growing() {
    let mut sel = Selection::with_mode(SelectionMode::Single);
    sel.add(1);
    sel.add(2);
}
