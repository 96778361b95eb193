// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction states, their transition table, and the state stack.
//!
//! Only the state *identity* is public; the per-state data that gestures
//! accumulate stays inside the canvas. Which state a press
//! may push on top of which is decided by [`transition`] alone.

use kurbo::Point;
use smallvec::SmallVec;
use understory_event_state::gesture::{Key, PointerButton, PointerButtons};
use understory_event_state::track::PointerTrack;
use understory_selection::SelectionMode;

use crate::ItemId;
use crate::selector::{SelectionType, StickyPick};

/// Identity of an interaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateId {
    /// Base state; dispatches presses and is never popped.
    Default,
    /// Moving the viewport with the pointer.
    Panning,
    /// Sizing an item that is pending placement.
    Drawing,
    /// Rubber band in single-selection mode.
    SingleSelecting,
    /// Rubber band in multiple-selection mode.
    MultipleSelecting,
    /// Moving one or more items.
    Dragging,
}

impl StateId {
    /// Returns `true` for the two rubber-band states.
    #[must_use]
    pub fn is_selecting(self) -> bool {
        matches!(self, Self::SingleSelecting | Self::MultipleSelecting)
    }

    /// Returns `true` for states that pan automatically near the edges.
    #[must_use]
    pub fn auto_pans(self) -> bool {
        matches!(
            self,
            Self::Drawing | Self::SingleSelecting | Self::MultipleSelecting | Self::Dragging
        )
    }
}

/// The interaction a matched gesture asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    /// Pan gesture.
    Pan,
    /// Draw gesture with an item pending placement.
    Draw,
    /// Select gesture in the given mode.
    Select(SelectionMode),
    /// Drag gesture pressed on an item.
    Drag,
}

/// The state `kind` pushes on top of `from`, or `None` if it may not.
///
/// Panning can interrupt any state but itself; every other interaction only
/// starts from the base state.
#[must_use]
pub fn transition(from: StateId, kind: GestureKind) -> Option<StateId> {
    use StateId::*;
    match (from, kind) {
        (
            Default | Drawing | SingleSelecting | MultipleSelecting | Dragging,
            GestureKind::Pan,
        ) => Some(Panning),
        (Default, GestureKind::Draw) => Some(Drawing),
        (Default, GestureKind::Select(SelectionMode::Single)) => Some(SingleSelecting),
        (Default, GestureKind::Select(SelectionMode::Multiple)) => Some(MultipleSelecting),
        (Default, GestureKind::Drag) => Some(Dragging),
        _ => None,
    }
}

/// What started a frame, and therefore what ends it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Trigger {
    Base,
    Pointer(PointerButton),
    Key(Key),
}

impl Trigger {
    /// Returns `true` once the button or key is no longer held.
    pub(crate) fn is_released(self, buttons: PointerButtons, keys: &[Key]) -> bool {
        match self {
            Self::Base => false,
            Self::Pointer(button) => !buttons.contains(button.as_buttons()),
            Self::Key(key) => !keys.contains(&key),
        }
    }
}

/// Rubber-band bookkeeping shared by both selecting states.
#[derive(Clone, Debug)]
pub(crate) struct SelectingState {
    /// Pointer path in content space.
    pub(crate) track: PointerTrack,
    pub(crate) selection_type: SelectionType,
    /// Selection when the gesture started, after a replace cleared it.
    pub(crate) base: Vec<ItemId>,
    pub(crate) sticky: StickyPick,
}

/// Per-state data.
#[derive(Clone, Debug)]
pub(crate) enum StateData {
    Idle,
    Panning {
        /// Pointer path in screen space.
        track: PointerTrack,
    },
    Drawing {
        item: ItemId,
        anchor: Point,
    },
    Selecting(SelectingState),
    Dragging {
        targets: Vec<ItemId>,
        /// Pointer path in content space.
        track: PointerTrack,
    },
}

#[derive(Clone, Debug)]
pub(crate) struct Frame {
    pub(crate) id: StateId,
    pub(crate) trigger: Trigger,
    pub(crate) data: StateData,
}

impl Frame {
    fn base() -> Self {
        Self {
            id: StateId::Default,
            trigger: Trigger::Base,
            data: StateData::Idle,
        }
    }
}

/// LIFO stack of interaction frames over a permanent base frame.
#[derive(Clone, Debug)]
pub(crate) struct StateStack {
    frames: SmallVec<[Frame; 4]>,
}

impl Default for StateStack {
    fn default() -> Self {
        let mut frames = SmallVec::new();
        frames.push(Frame::base());
        Self { frames }
    }
}

impl StateStack {
    pub(crate) fn top(&self) -> &Frame {
        // The base frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    pub(crate) fn top_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub(crate) fn top_id(&self) -> StateId {
        self.top().id
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.frames.iter().map(|f| f.id)
    }

    /// Frames from the top down.
    pub(crate) fn frames_top_down(&self) -> impl Iterator<Item = &Frame> + '_ {
        self.frames.iter().rev()
    }

    pub(crate) fn frames_mut(&mut self) -> impl Iterator<Item = &mut Frame> + '_ {
        self.frames.iter_mut()
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Moves the top frame's data out so a handler can update it while
    /// borrowing the rest of the canvas.
    pub(crate) fn take_top_data(&mut self) -> StateData {
        core::mem::replace(&mut self.top_mut().data, StateData::Idle)
    }

    pub(crate) fn restore_top_data(&mut self, data: StateData) {
        self.top_mut().data = data;
    }

    /// Pops the top frame unless it is the base.
    pub(crate) fn pop(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }
}
