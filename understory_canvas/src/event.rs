// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events consumed by the canvas and notifications it produces.

use kurbo::{Point, Rect, Size, Vec2};
use understory_event_state::gesture::{Key, Modifiers, PointerButton, PointerButtons};
use understory_view2d::ScrollState;

use crate::ItemId;
use crate::interaction::StateId;

/// A pointer press, move, or release in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position relative to the canvas surface.
    pub position: Point,
    /// Button that changed state; `None` for moves.
    pub button: Option<PointerButton>,
    /// Buttons held after the event.
    pub buttons: PointerButtons,
    /// Keyboard modifiers held during the event.
    pub modifiers: Modifiers,
    /// Item under the pointer, as resolved by the host's hit testing.
    pub target: Option<ItemId>,
}

impl PointerEvent {
    /// A press of `button` at `position`.
    #[must_use]
    pub fn down(position: Point, button: PointerButton) -> Self {
        Self {
            position,
            button: Some(button),
            buttons: button.as_buttons(),
            modifiers: Modifiers::empty(),
            target: None,
        }
    }

    /// A move to `position` with `buttons` held.
    #[must_use]
    pub fn moved(position: Point, buttons: PointerButtons) -> Self {
        Self {
            position,
            button: None,
            buttons,
            modifiers: Modifiers::empty(),
            target: None,
        }
    }

    /// A release of `button` at `position`, leaving no buttons held.
    #[must_use]
    pub fn up(position: Point, button: PointerButton) -> Self {
        Self {
            position,
            button: Some(button),
            buttons: PointerButtons::empty(),
            modifiers: Modifiers::empty(),
            target: None,
        }
    }

    /// Returns the event with `modifiers` held.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns the event with `buttons` held after it.
    #[must_use]
    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Returns the event targeted at `item`.
    #[must_use]
    pub fn on_item(mut self, item: ItemId) -> Self {
        self.target = Some(item);
        self
    }
}

/// A key press or release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key that changed state.
    pub key: Key,
    /// Modifiers held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// `key` with no modifiers.
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }
}

/// Line and page scrolling, as issued by scrollbar arrows, track clicks, or
/// keyboard navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollCommand {
    /// One line towards the top.
    LineUp,
    /// One line towards the bottom.
    LineDown,
    /// One line towards the left.
    LineLeft,
    /// One line towards the right.
    LineRight,
    /// One viewport height towards the top.
    PageUp,
    /// One viewport height towards the bottom.
    PageDown,
    /// One viewport width towards the left.
    PageLeft,
    /// One viewport width towards the right.
    PageRight,
}

/// Notifications drained with [`Canvas::drain_events`](crate::Canvas::drain_events).
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent {
    /// The item joined the selection.
    ItemSelected(ItemId),
    /// The item left the selection.
    ItemUnselected(ItemId),
    /// Committed position or size changed; `bounds` is the new visual rectangle.
    ItemBoundsChanged {
        /// Item that changed.
        id: ItemId,
        /// New bounds in content space.
        bounds: Rect,
    },
    /// The render-time drag offset of an item changed.
    ItemOffsetChanged {
        /// Item that moved.
        id: ItemId,
        /// Uncommitted offset in content space.
        offset: Vec2,
    },
    /// Interactive placement of an item finished.
    DrawingCompleted {
        /// The drawn item.
        item: ItemId,
        /// Final pointer position in content space.
        position: Point,
    },
    /// Location, size, or zoom changed.
    ViewportChanged {
        /// Content-space top-left of the visible window.
        location: Point,
        /// Content-space size of the visible window.
        size: Size,
        /// Zoom factor.
        zoom: f64,
    },
    /// Scrollbar offset or extent changed.
    ScrollChanged(ScrollState),
    /// Rubber band in content space; `None` when it is hidden.
    RubberBandChanged(Option<Rect>),
    /// The top of the interaction stack changed.
    StateChanged(StateId),
}
