// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer panning and edge auto-panning.

use std::time::Duration;

use understory_event_state::track::PointerTrack;

use super::Canvas;
use crate::ItemHost;
use crate::interaction::StateData;

impl Canvas {
    pub(super) fn enter_panning(&mut self) -> StateData {
        StateData::Panning {
            track: PointerTrack::new(self.pointer),
        }
    }

    /// Each move pans by the screen delta since the previous one, so content
    /// stays under the pointer at any zoom.
    pub(super) fn pan_move(&mut self, track: &mut PointerTrack) {
        let delta = track.advance(self.pointer);
        if self.viewport.pan_by_screen(delta) {
            tracing::trace!(?delta, location = ?self.viewport.location(), "panned");
            self.viewport_changed();
        }
    }

    /// Period at which the host should call [`Canvas::auto_pan_tick`], or
    /// `None` while no gesture holds the pointer near an edge.
    #[must_use]
    pub fn auto_pan_interval(&self) -> Option<Duration> {
        self.auto_pan.interval()
    }

    /// Runs one auto-pan tick: moves the viewport towards the edge the
    /// pointer is near and replays the last pointer position to the active
    /// gesture, as a real move would.
    ///
    /// Returns `false`, stopping the timer, when no gesture owns it.
    pub fn auto_pan_tick<H: ItemHost>(&mut self, host: &mut H) -> bool {
        let step = self
            .auto_pan
            .step(self.viewport.screen_size(), self.pointer, self.viewport.zoom());
        let Some(step) = step.filter(|_| self.auto_pan.is_running() && self.owns_auto_pan())
        else {
            if self.auto_pan.stop() {
                tracing::debug!("auto-pan stopped");
            }
            return false;
        };
        if self.viewport.pan_by_content(step) {
            self.viewport_changed();
        }
        self.handle_move(host);
        true
    }

    fn owns_auto_pan(&self) -> bool {
        self.stack.top_id().auto_pans() && !self.buttons.is_empty()
    }

    /// Starts or stops the auto-pan timer to match the pointer and the
    /// active gesture.
    pub(super) fn update_auto_pan(&mut self) {
        let near_edge = self
            .auto_pan
            .step(self.viewport.screen_size(), self.pointer, self.viewport.zoom())
            .is_some();
        if near_edge && self.owns_auto_pan() {
            if self.auto_pan.start() {
                tracing::debug!(state = ?self.stack.top_id(), "auto-pan started");
            }
        } else if self.auto_pan.stop() {
            tracing::debug!("auto-pan stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};
    use understory_event_state::gesture::{Key, PointerButton, PointerButtons};

    use crate::{Canvas, CanvasConfig, ItemStore, KeyEvent, PointerEvent, StateId};

    #[test]
    fn each_move_pans_by_its_own_delta() {
        let mut items = ItemStore::new();
        let mut canvas = Canvas::new(CanvasConfig::default(), Size::new(400.0, 300.0));
        canvas.pointer_down(
            &mut items,
            &PointerEvent::down(Point::new(100.0, 100.0), PointerButton::Secondary),
        );
        assert_eq!(canvas.state(), StateId::Panning);

        let held = PointerButtons::SECONDARY;
        canvas.pointer_move(&mut items, &PointerEvent::moved(Point::new(110.0, 100.0), held));
        canvas.pointer_move(&mut items, &PointerEvent::moved(Point::new(130.0, 90.0), held));
        assert_eq!(canvas.viewport().location(), Point::new(-30.0, 10.0));

        canvas.pointer_up(
            &mut items,
            &PointerEvent::up(Point::new(130.0, 90.0), PointerButton::Secondary),
        );
        assert_eq!(canvas.state(), StateId::Default);
    }

    #[test]
    fn space_pans_without_buttons() {
        let mut items = ItemStore::new();
        let mut canvas = Canvas::new(CanvasConfig::default(), Size::new(400.0, 300.0));
        canvas.key_down(&mut items, &KeyEvent::new(Key::Space));
        // Key repeat does not stack another pan.
        canvas.key_down(&mut items, &KeyEvent::new(Key::Space));
        assert_eq!(canvas.state_stack(), [StateId::Default, StateId::Panning]);

        let none = PointerButtons::empty();
        canvas.pointer_move(&mut items, &PointerEvent::moved(Point::new(0.0, 0.0), none));
        canvas.pointer_move(&mut items, &PointerEvent::moved(Point::new(-20.0, 0.0), none));
        assert_eq!(canvas.viewport().location(), Point::new(20.0, 0.0));

        canvas.key_up(&mut items, &KeyEvent::new(Key::Space));
        assert_eq!(canvas.state(), StateId::Default);
    }
}
