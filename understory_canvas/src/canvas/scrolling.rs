// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zooming and scrollbar-driven scrolling.
//!
//! Both move the content under a stationary pointer, so the active gesture is
//! replayed at the last pointer position afterwards.

use kurbo::Point;
use understory_view2d::Axis;

use super::Canvas;
use crate::{CanvasEvent, ItemHost, ScrollCommand};

impl Canvas {
    /// Multiplies the zoom by `multiplier`, keeping the content under
    /// `screen_point` in place.
    pub fn zoom_at_position<H: ItemHost>(
        &mut self,
        host: &mut H,
        screen_point: Point,
        multiplier: f64,
    ) {
        if !self.viewport.zoom_at_position(screen_point, multiplier) {
            return;
        }
        tracing::debug!(zoom = self.viewport.zoom(), ?screen_point, "zoomed");
        self.viewport_changed();
        self.handle_move(host);
    }

    /// Zooms one notch per wheel event at `screen_point`: in for a positive
    /// `delta`, out for a negative one.
    pub fn wheel<H: ItemHost>(&mut self, host: &mut H, screen_point: Point, delta: f64) {
        self.end_scroll_sequence();
        self.pointer = screen_point;
        let factor = self.config.scale_factor;
        if delta > 0.0 {
            self.zoom_at_position(host, screen_point, factor);
        } else if delta < 0.0 {
            self.zoom_at_position(host, screen_point, 1.0 / factor);
        }
    }

    /// Zooms in one notch around the center of the screen.
    pub fn zoom_in<H: ItemHost>(&mut self, host: &mut H) {
        let center = self.viewport.screen_size().to_rect().center();
        self.zoom_at_position(host, center, self.config.scale_factor);
    }

    /// Zooms out one notch around the center of the screen.
    pub fn zoom_out<H: ItemHost>(&mut self, host: &mut H) {
        let center = self.viewport.screen_size().to_rect().center();
        self.zoom_at_position(host, center, 1.0 / self.config.scale_factor);
    }

    /// Applies a scrollbar offset along `axis`, starting a scroll sequence if
    /// none is in flight. Call [`Canvas::end_scroll`] when the thumb is
    /// released.
    pub fn set_scroll_offset<H: ItemHost>(&mut self, host: &mut H, axis: Axis, value: f64) {
        if !self.scroll.is_scrolling() {
            tracing::debug!(?axis, "scroll sequence started");
        }
        let location = self.scroll.set_offset(
            axis,
            value,
            self.viewport.visible_rect(),
            self.items_extent,
        );
        if self.viewport.set_location(location) {
            self.emit_viewport();
        }
        self.events.push(CanvasEvent::ScrollChanged(self.scroll.state()));
        self.handle_move(host);
    }

    /// Ends the scroll sequence and reconciles the scrollbars with the items
    /// extent, clamping offsets back to zero and letting the extent shrink.
    pub fn end_scroll(&mut self) {
        let was_scrolling = self.scroll.is_scrolling();
        if self
            .scroll
            .end_scroll(self.items_extent, self.viewport.visible_rect())
        {
            self.events.push(CanvasEvent::ScrollChanged(self.scroll.state()));
        }
        if was_scrolling {
            tracing::debug!(state = ?self.scroll.state(), "scroll sequence ended");
        }
    }

    /// Scrolls by a line or a page as a one-shot scroll sequence.
    ///
    /// Lines are `scroll_factor` content units; pages are the visible size.
    pub fn scroll_command<H: ItemHost>(&mut self, host: &mut H, command: ScrollCommand) {
        let line = self.config.scroll_factor;
        let page = self.viewport.size();
        let (axis, amount) = match command {
            ScrollCommand::LineUp => (Axis::Vertical, -line),
            ScrollCommand::LineDown => (Axis::Vertical, line),
            ScrollCommand::LineLeft => (Axis::Horizontal, -line),
            ScrollCommand::LineRight => (Axis::Horizontal, line),
            ScrollCommand::PageUp => (Axis::Vertical, -page.height),
            ScrollCommand::PageDown => (Axis::Vertical, page.height),
            ScrollCommand::PageLeft => (Axis::Horizontal, -page.width),
            ScrollCommand::PageRight => (Axis::Horizontal, page.width),
        };
        let current = axis.of_vec(self.scroll.signed_offset());
        self.set_scroll_offset(host, axis, current + amount);
        self.end_scroll();
    }

    /// Presses and wheel events close a scroll sequence left open by the host.
    pub(super) fn end_scroll_sequence(&mut self) {
        if self.scroll.is_scrolling() {
            self.end_scroll();
        }
    }
}
