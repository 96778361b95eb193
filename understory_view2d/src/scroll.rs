// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::Axis;

/// Scrollbar-facing view of a canvas: how far into the content the viewport
/// sits, and how large the scrollable area is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Distance from the start of the scrollable area to the viewport, per axis.
    pub offset: Vec2,
    /// Size of the scrollable area.
    pub extent: Size,
}

/// Derives scrollbar offsets and extents from the items extent and the
/// viewport, and turns scrollbar commands back into viewport locations.
///
/// The scrollable area is always the union of the items extent and the
/// visible window, so the viewport can never be "outside" the scrollbars.
///
/// A *scroll sequence* starts with the first [`ScrollReconciler::set_offset`]
/// call and lasts until [`ScrollReconciler::end_scroll`]. While it runs:
/// - offsets are measured from the viewport location recorded at its start
///   (or the items origin, whichever is smaller), and may go negative;
/// - the extent only grows, so a dragged scrollbar thumb does not jump;
/// - [`ScrollReconciler::update_scrollbars`] is ignored.
#[derive(Clone, Debug, Default)]
pub struct ScrollReconciler {
    offset: Vec2,
    extent: Size,
    sequence: Option<ScrollSequence>,
}

#[derive(Clone, Copy, Debug)]
struct ScrollSequence {
    location: Point,
    extent: Size,
}

impl ScrollReconciler {
    /// Creates a reconciler with zero offset and extent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a scroll sequence is in flight.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.sequence.is_some()
    }

    /// Offset as reported to a scrollbar: never negative.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset.x.max(0.0), self.offset.y.max(0.0))
    }

    /// Offset as tracked internally; may be negative during a scroll sequence.
    #[must_use]
    pub fn signed_offset(&self) -> Vec2 {
        self.offset
    }

    /// Current scrollable extent.
    #[must_use]
    pub fn extent(&self) -> Size {
        self.extent
    }

    /// Scrollbar state with the offset clamped for read-back.
    #[must_use]
    pub fn state(&self) -> ScrollState {
        ScrollState {
            offset: self.offset(),
            extent: self.extent,
        }
    }

    /// Recomputes offset and extent from the items extent and the visible
    /// window.
    ///
    /// - extent: size of `items_extent ∪ viewport`;
    /// - offset: `max(0, viewport.origin - items_extent.origin)` per axis.
    ///
    /// With no valid items the viewport alone defines the extent. Does nothing
    /// while a scroll sequence is in flight. Returns `true` if the state
    /// changed.
    pub fn update_scrollbars(&mut self, items_extent: Option<Rect>, viewport: Rect) -> bool {
        if self.sequence.is_some() {
            return false;
        }
        let extent = scrollable_area(items_extent, viewport).size();
        let start = items_extent.map_or(viewport.origin(), |r| r.origin());
        let offset = Vec2::new(
            (viewport.x0 - start.x).max(0.0),
            (viewport.y0 - start.y).max(0.0),
        );
        if extent == self.extent && offset == self.offset {
            return false;
        }
        self.extent = extent;
        self.offset = offset;
        true
    }

    /// Applies a scrollbar offset along `axis` and returns the new viewport
    /// location.
    ///
    /// The first call of a sequence records the current viewport location
    /// and extent. The returned location's `axis` component is
    /// `min(items_extent.origin, recorded_location) + value`; the other
    /// component is taken from `viewport` unchanged. The extent grows to
    /// cover the moved viewport but never shrinks below the recorded one.
    pub fn set_offset(
        &mut self,
        axis: Axis,
        value: f64,
        viewport: Rect,
        items_extent: Option<Rect>,
    ) -> Point {
        let value = if value.is_finite() { value } else { 0.0 };
        let extent = self.extent;
        let sequence = self.sequence.get_or_insert(ScrollSequence {
            location: viewport.origin(),
            extent,
        });

        let recorded = axis.of_point(sequence.location);
        let start = items_extent.map_or(recorded, |r| axis.of_point(r.origin()).min(recorded));
        let mut location = viewport.origin();
        axis.set_point(&mut location, start + value);
        axis.set_vec(&mut self.offset, value);

        let moved = Rect::from_origin_size(location, viewport.size());
        let grown = scrollable_area(items_extent, moved).size();
        let extent = Size::new(
            sequence.extent.width.max(grown.width),
            sequence.extent.height.max(grown.height),
        );
        sequence.extent = extent;
        self.extent = extent;
        location
    }

    /// Closes the current scroll sequence and reconciles against the final
    /// items extent and viewport. Negative offsets are clamped back to zero
    /// and the extent may shrink again.
    pub fn end_scroll(&mut self, items_extent: Option<Rect>, viewport: Rect) -> bool {
        let was_scrolling = self.sequence.take().is_some();
        self.update_scrollbars(items_extent, viewport) || was_scrolling
    }
}

fn scrollable_area(items_extent: Option<Rect>, viewport: Rect) -> Rect {
    items_extent.map_or(viewport, |items| items.union(viewport))
}
