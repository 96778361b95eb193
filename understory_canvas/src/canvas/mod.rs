// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The canvas interaction engine.

mod dragging;
mod drawing;
mod panning;
mod scrolling;
mod selecting;

use std::collections::VecDeque;

use kurbo::{Affine, Point, Rect, Size};
use smallvec::SmallVec;
use understory_event_state::gesture::{InputGesture, Key, Modifiers, PointerButton, PointerButtons};
use understory_event_state::track::PointerTrack;
use understory_selection::{Selection, SelectionMode};
use understory_view2d::{ScrollReconciler, ScrollState, Viewport, snap_to_grid, union_valid};

use crate::auto_pan::AutoPanner;
use crate::drag::DragPropagator;
use crate::interaction::{Frame, GestureKind, StateData, StateId, StateStack, Trigger, transition};
use crate::{CanvasConfig, CanvasEvent, ItemHost, ItemId, KeyEvent, PointerEvent};

/// Interaction engine for a pannable, zoomable canvas of items.
///
/// The canvas owns the viewport, the scrollbar model, the selection, and the
/// interaction state stack. Items stay with the host and are reached through
/// an [`ItemHost`] passed to every call that may touch them. Notifications
/// are queued and collected with [`Canvas::drain_events`].
///
/// ```
/// use kurbo::{Point, Rect, Size};
/// use understory_canvas::{Canvas, CanvasConfig, CanvasEvent, Item, ItemStore, PointerEvent};
/// use understory_event_state::gesture::{PointerButton, PointerButtons};
///
/// let mut items = ItemStore::new();
/// let a = items.insert(Item::new(Rect::new(10.0, 10.0, 40.0, 40.0)));
/// let mut canvas = Canvas::new(CanvasConfig::default(), Size::new(800.0, 600.0));
/// canvas.items_changed(&mut items);
///
/// // Rubber band across the item.
/// canvas.pointer_down(&mut items, &PointerEvent::down(Point::new(0.0, 0.0), PointerButton::Primary));
/// canvas.pointer_move(&mut items, &PointerEvent::moved(Point::new(50.0, 50.0), PointerButtons::PRIMARY));
/// canvas.pointer_up(&mut items, &PointerEvent::up(Point::new(50.0, 50.0), PointerButton::Primary));
///
/// assert!(items[a].is_selected);
/// assert!(canvas.drain_events().contains(&CanvasEvent::ItemSelected(a)));
/// ```
#[derive(Clone, Debug)]
pub struct Canvas {
    config: CanvasConfig,
    viewport: Viewport,
    scroll: ScrollReconciler,
    items_extent: Option<Rect>,
    selection: Selection<ItemId>,
    stack: StateStack,
    drag: DragPropagator,
    auto_pan: AutoPanner,
    pending: VecDeque<ItemId>,
    events: Vec<CanvasEvent>,
    /// Last pointer position in screen space.
    pointer: Point,
    buttons: PointerButtons,
    keys: SmallVec<[Key; 2]>,
    modifiers: Modifiers,
}

impl Canvas {
    /// Creates a canvas showing the content origin at zoom 1.
    #[must_use]
    pub fn new(config: CanvasConfig, screen_size: Size) -> Self {
        let config = config.normalized();
        let mut viewport = Viewport::new(screen_size);
        viewport.set_zoom_limits(config.min_zoom, config.max_zoom);
        let mode = selection_mode(&config);
        let mut scroll = ScrollReconciler::new();
        scroll.update_scrollbars(None, viewport.visible_rect());
        Self {
            auto_pan: AutoPanner::new(&config),
            config,
            viewport,
            scroll,
            items_extent: None,
            selection: Selection::with_mode(mode),
            stack: StateStack::default(),
            drag: DragPropagator::new(),
            pending: VecDeque::new(),
            events: Vec::new(),
            pointer: Point::ZERO,
            buttons: PointerButtons::empty(),
            keys: SmallVec::new(),
            modifiers: Modifiers::empty(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// New zoom limits clamp the current zoom; switching between single and
    /// multiple selection clears the selection.
    pub fn set_config<H: ItemHost>(&mut self, host: &mut H, config: CanvasConfig) {
        let config = config.normalized();
        let zoom = self.viewport.zoom();
        self.viewport.set_zoom_limits(config.min_zoom, config.max_zoom);
        self.auto_pan.configure(&config);
        let mode = selection_mode(&config);
        self.config = config;
        if self.viewport.zoom() != zoom {
            self.viewport_changed();
        }
        self.set_selection_mode(host, mode);
        self.update_auto_pan();
    }

    /// Switches between single and multiple selection. Changing the mode
    /// clears the selection, and a rubber band in progress continues under
    /// the new mode.
    pub fn set_can_select_multiple<H: ItemHost>(&mut self, host: &mut H, multiple: bool) {
        self.config.can_select_multiple = multiple;
        let mode = selection_mode(&self.config);
        self.set_selection_mode(host, mode);
    }

    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Content-to-screen transform to apply to the rendered surface.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.viewport.transform()
    }

    /// Union of all valid item bounds, as of the last refresh.
    #[must_use]
    pub fn items_extent(&self) -> Option<Rect> {
        self.items_extent
    }

    /// Scrollbar offset and extent.
    #[must_use]
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection<ItemId> {
        &self.selection
    }

    /// State on top of the interaction stack.
    #[must_use]
    pub fn state(&self) -> StateId {
        self.stack.top_id()
    }

    /// Every state on the interaction stack, base first.
    #[must_use]
    pub fn state_stack(&self) -> Vec<StateId> {
        self.stack.ids().collect()
    }

    /// Last pointer position, in content space.
    #[must_use]
    pub fn pointer_position(&self) -> Point {
        self.viewport.to_content_point(self.pointer)
    }

    /// Takes every queued notification, oldest first.
    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        core::mem::take(&mut self.events)
    }

    /// Resizes the surface the canvas is shown on.
    pub fn set_screen_size(&mut self, size: Size) {
        if self.viewport.set_screen_size(size) {
            self.viewport_changed();
        }
    }

    /// Moves the visible window so its top-left corner shows `location`.
    pub fn set_location(&mut self, location: Point) {
        if self.viewport.set_location(location) {
            self.viewport_changed();
        }
    }

    /// Recomputes the items extent and the scrollbars after the host added,
    /// removed, moved, or resized items. Selected and pending items the host
    /// no longer knows are forgotten.
    pub fn items_changed<H: ItemHost>(&mut self, host: &mut H) {
        let gone: Vec<ItemId> = self
            .selection
            .iter()
            .copied()
            .filter(|id| host.item(*id).is_none())
            .collect();
        for id in gone {
            let diff = self.selection.remove(&id);
            self.apply_selection_diff(host, diff);
        }
        self.pending.retain(|id| host.item(*id).is_some());
        self.refresh_extent(host);
    }

    /// Handles a button press.
    ///
    /// Gestures are tried in the order draw (only with an item pending
    /// placement), drag (only on a draggable target item), pan, select; the
    /// first whose gesture matches and whose state may start on top of the
    /// current one is pushed. A drag press on an item that is not draggable
    /// never starts a rubber band; it selects the item if it can be selected.
    pub fn pointer_down<H: ItemHost>(&mut self, host: &mut H, event: &PointerEvent) {
        self.pointer = event.position;
        self.modifiers = event.modifiers;
        self.buttons = event.buttons;
        let Some(button) = event.button else {
            return;
        };
        self.buttons |= button.as_buttons();
        self.end_scroll_sequence();

        let (kinds, pinned) = self.pointer_gestures(host, button, event);
        let started = kinds
            .into_iter()
            .any(|kind| self.push_state(host, kind, Trigger::Pointer(button), event.target));
        if let Some(id) = pinned.filter(|_| !started) {
            // A drag press on an item that cannot move only selects it.
            tracing::debug!(?id, "press on a pinned item");
            self.select_pressed_item(host, id);
        }
        self.update_auto_pan();
    }

    /// Handles pointer movement, with or without buttons held.
    pub fn pointer_move<H: ItemHost>(&mut self, host: &mut H, event: &PointerEvent) {
        self.pointer = event.position;
        self.modifiers = event.modifiers;
        self.buttons = event.buttons;
        // A release may have happened outside the surface.
        self.settle(host);
        self.handle_move(host);
        self.update_auto_pan();
    }

    /// Handles a button release. Every state started by a button that is no
    /// longer held is exited and committed.
    pub fn pointer_up<H: ItemHost>(&mut self, host: &mut H, event: &PointerEvent) {
        self.pointer = event.position;
        self.modifiers = event.modifiers;
        self.buttons = event.buttons;
        if let Some(button) = event.button {
            self.buttons.remove(button.as_buttons());
        }
        self.handle_move(host);
        self.settle(host);
        self.update_auto_pan();
    }

    /// Handles a key press. Only pan gestures are bound to keys.
    pub fn key_down<H: ItemHost>(&mut self, host: &mut H, event: &KeyEvent) {
        self.modifiers = event.modifiers;
        if !self.keys.contains(&event.key) {
            self.keys.push(event.key);
        }
        let pans = self
            .config
            .gestures
            .pan
            .iter()
            .any(|g| g.matches_key(event.key, event.modifiers));
        if pans {
            self.push_state(host, GestureKind::Pan, Trigger::Key(event.key), None);
        }
        self.update_auto_pan();
    }

    /// Handles a key release.
    pub fn key_up<H: ItemHost>(&mut self, host: &mut H, event: &KeyEvent) {
        self.modifiers = event.modifiers;
        self.keys.retain(|k| *k != event.key);
        self.settle(host);
        self.update_auto_pan();
    }

    /// Candidate interactions for a press, in priority order, plus the
    /// pressed item when a drag gesture landed on one that cannot move.
    fn pointer_gestures<H: ItemHost>(
        &mut self,
        host: &H,
        button: PointerButton,
        event: &PointerEvent,
    ) -> (SmallVec<[GestureKind; 4]>, Option<ItemId>) {
        let has_pending = self.has_pending(host);
        let gestures = &self.config.gestures;
        let held = event.modifiers;
        let matches =
            |list: &[InputGesture]| list.iter().any(|g| g.matches_pointer(button, held));
        let mut kinds = SmallVec::new();
        let mut pinned = None;
        if has_pending && matches(&gestures.draw) {
            kinds.push(GestureKind::Draw);
        }
        if matches(&gestures.drag) {
            let target = event.target.and_then(|id| Some((id, host.item(id)?)));
            match target {
                Some((_, item)) if item.is_draggable => kinds.push(GestureKind::Drag),
                Some((id, _)) => pinned = Some(id),
                None => {}
            }
        }
        if matches(&gestures.pan) {
            kinds.push(GestureKind::Pan);
        }
        if pinned.is_none() && matches(&gestures.select) {
            kinds.push(GestureKind::Select(self.selection.mode()));
        }
        (kinds, pinned)
    }

    /// Pushes the state `kind` leads to, running its enter hook. Returns
    /// `false` if the transition is not allowed or the state could not start.
    fn push_state<H: ItemHost>(
        &mut self,
        host: &mut H,
        kind: GestureKind,
        trigger: Trigger,
        target: Option<ItemId>,
    ) -> bool {
        let from = self.stack.top_id();
        let Some(id) = transition(from, kind) else {
            return false;
        };
        let data = match id {
            StateId::Panning => Some(self.enter_panning()),
            StateId::Drawing => self.enter_drawing(host),
            StateId::SingleSelecting | StateId::MultipleSelecting => {
                Some(self.enter_selecting(host, id))
            }
            StateId::Dragging => target.and_then(|item| self.enter_dragging(host, item)),
            StateId::Default => None,
        };
        let Some(data) = data else {
            return false;
        };
        tracing::debug!(from = ?from, to = ?id, trigger = ?trigger, "entering interaction state");
        self.stack.push(Frame { id, trigger, data });
        self.events.push(CanvasEvent::StateChanged(id));
        true
    }

    /// Pops every top frame whose button or key is no longer held, then lets
    /// the uncovered state re-derive its effects.
    fn settle<H: ItemHost>(&mut self, host: &mut H) {
        let mut popped = false;
        while self.stack.top().trigger.is_released(self.buttons, &self.keys) {
            let Some(frame) = self.stack.pop() else {
                break;
            };
            tracing::debug!(state = ?frame.id, "exiting interaction state");
            self.exit_state(host, frame);
            popped = true;
        }
        if !popped {
            return;
        }
        let top = self.stack.top_id();
        self.events.push(CanvasEvent::StateChanged(top));
        if top != StateId::Default {
            tracing::debug!(state = ?top, "re-entering interaction state");
            self.reenter_state(host);
        }
    }

    fn exit_state<H: ItemHost>(&mut self, host: &mut H, frame: Frame) {
        match frame.data {
            StateData::Drawing { item, .. } => self.exit_drawing(host, item),
            StateData::Selecting(state) => self.exit_selecting(host, frame.id, state),
            StateData::Dragging { .. } => self.exit_dragging(host),
            StateData::Panning { .. } | StateData::Idle => {}
        }
    }

    fn reenter_state<H: ItemHost>(&mut self, host: &mut H) {
        if let StateData::Panning { track } = &mut self.stack.top_mut().data {
            *track = PointerTrack::new(self.pointer);
            return;
        }
        self.handle_move(host);
    }

    /// Feeds the last pointer position to the top state's move handler.
    fn handle_move<H: ItemHost>(&mut self, host: &mut H) {
        let id = self.stack.top_id();
        let mut data = self.stack.take_top_data();
        match &mut data {
            StateData::Panning { track } => self.pan_move(track),
            StateData::Drawing { item, anchor } => self.draw_move(host, *item, *anchor),
            StateData::Selecting(state) => self.select_move(host, id, state),
            StateData::Dragging { targets, track } => self.drag_move(host, targets, track),
            StateData::Idle => {}
        }
        self.stack.restore_top_data(data);
    }

    /// Rounds a committed coordinate to the grid when snapping is enabled.
    fn snap(&self, value: f64) -> f64 {
        if self.config.enable_snapping {
            snap_to_grid(value, self.config.grid_spacing)
        } else {
            value
        }
    }

    fn emit_bounds<H: ItemHost>(&mut self, host: &H, id: ItemId) {
        if let Some(item) = host.item(id) {
            self.events.push(CanvasEvent::ItemBoundsChanged {
                id,
                bounds: item.bounds(),
            });
        }
    }

    /// Recomputes the items extent from committed bounds and reconciles the
    /// scrollbars.
    fn refresh_extent<H: ItemHost>(&mut self, host: &H) {
        let extent = union_valid(host.items().map(|(_, item)| item.bounds()));
        if extent != self.items_extent {
            tracing::trace!(?extent, "items extent changed");
            self.items_extent = extent;
        }
        self.update_scrollbars();
    }

    fn update_scrollbars(&mut self) {
        if self
            .scroll
            .update_scrollbars(self.items_extent, self.viewport.visible_rect())
        {
            self.events.push(CanvasEvent::ScrollChanged(self.scroll.state()));
        }
    }

    fn emit_viewport(&mut self) {
        self.events.push(CanvasEvent::ViewportChanged {
            location: self.viewport.location(),
            size: self.viewport.size(),
            zoom: self.viewport.zoom(),
        });
    }

    fn viewport_changed(&mut self) {
        self.emit_viewport();
        self.update_scrollbars();
    }
}

fn selection_mode(config: &CanvasConfig) -> SelectionMode {
    if config.can_select_multiple {
        SelectionMode::Multiple
    } else {
        SelectionMode::Single
    }
}
