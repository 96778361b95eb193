// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive placement of pending items.

use kurbo::{Point, Vec2};
use understory_view2d::{ScaleDirection, rect_from_corners};

use super::Canvas;
use crate::interaction::StateData;
use crate::{CanvasError, CanvasEvent, ItemHost, ItemId};

impl Canvas {
    /// Queues `id` for interactive placement. The next draw gesture sizes it.
    ///
    /// Items are placed in the order they were queued; queueing an item twice
    /// is a no-op.
    pub fn queue_for_placement<H: ItemHost>(
        &mut self,
        host: &H,
        id: ItemId,
    ) -> Result<(), CanvasError> {
        let item = host.item(id).ok_or(CanvasError::UnknownItem(id))?;
        if item.is_drawn {
            return Err(CanvasError::AlreadyDrawn(id));
        }
        if !self.pending.contains(&id) {
            tracing::debug!(?id, queued = self.pending.len() + 1, "item pending placement");
            self.pending.push_back(id);
        }
        Ok(())
    }

    /// Items waiting for placement, next first.
    pub fn pending_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.pending.iter().copied()
    }

    /// Drops queue entries the host no longer knows or that were drawn
    /// elsewhere, and reports whether any remain.
    pub(super) fn has_pending<H: ItemHost>(&mut self, host: &H) -> bool {
        self.pending.retain(|id| host.item(*id).is_some_and(|item| !item.is_drawn));
        !self.pending.is_empty()
    }

    /// Anchors the next pending item at the pointer, unless its position was
    /// preset.
    pub(super) fn enter_drawing<H: ItemHost>(&mut self, host: &mut H) -> Option<StateData> {
        if !self.has_pending(host) {
            return None;
        }
        let id = self.pending.pop_front()?;
        let pointer = self.pointer_position();
        let (x, y) = (self.snap(pointer.x), self.snap(pointer.y));
        let item = host.item_mut(id)?;
        if !item.position_preset {
            item.left = x;
            item.top = y;
        }
        item.width = 0.0;
        item.height = 0.0;
        item.scale_x = ScaleDirection::Positive;
        item.scale_y = ScaleDirection::Positive;
        item.offset = Vec2::ZERO;
        let anchor = item.position();
        tracing::debug!(?id, ?anchor, "drawing started");
        Some(StateData::Drawing { item: id, anchor })
    }

    /// Sizes the item from the anchor to the pointer. The scale directions
    /// follow the pointer across the anchor on every move.
    pub(super) fn draw_move<H: ItemHost>(&mut self, host: &mut H, id: ItemId, anchor: Point) {
        let signed = rect_from_corners(anchor, self.pointer_position());
        let Some(item) = host.item_mut(id) else {
            return;
        };
        let (width, height) = (signed.rect.width(), signed.rect.height());
        if item.width == width
            && item.height == height
            && item.scale_x == signed.scale_x
            && item.scale_y == signed.scale_y
        {
            return;
        }
        item.width = width;
        item.height = height;
        item.scale_x = signed.scale_x;
        item.scale_y = signed.scale_y;
        tracing::trace!(?id, width, height, "drawing resized");
        self.emit_bounds(host, id);
        self.refresh_extent(host);
    }

    /// Normalizes and commits the drawn item. Drawing is never cancelled.
    pub(super) fn exit_drawing<H: ItemHost>(&mut self, host: &mut H, id: ItemId) {
        let position = self.pointer_position();
        let Some(item) = host.item(id) else {
            return;
        };
        let normalize = item.allow_scale_change_to_update_position;
        let bounds = item.bounds();
        let (left, top) = if normalize {
            (self.snap(bounds.x0), self.snap(bounds.y0))
        } else {
            (self.snap(item.left), self.snap(item.top))
        };
        let Some(item) = host.item_mut(id) else {
            return;
        };
        if normalize {
            item.scale_x = ScaleDirection::Positive;
            item.scale_y = ScaleDirection::Positive;
        }
        item.left = left;
        item.top = top;
        item.is_drawn = true;
        tracing::debug!(?id, bounds = ?item.bounds(), "drawing completed");
        self.emit_bounds(host, id);
        self.events.push(CanvasEvent::DrawingCompleted { item: id, position });
        self.refresh_extent(host);
    }
}
