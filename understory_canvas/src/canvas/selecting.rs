// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rubber-band selection and the programmatic selection API.

use kurbo::Rect;
use understory_event_state::track::PointerTrack;
use understory_selection::{SelectionDiff, SelectionMode};

use super::Canvas;
use crate::interaction::{SelectingState, StateData, StateId};
use crate::selector::{SelectionPolicy, SelectionType, StickyPick, query};
use crate::{CanvasEvent, ItemHost, ItemId};

impl Canvas {
    /// Rubber band of the selection gesture in progress, in content space.
    ///
    /// The band stays visible while a pan interrupts the gesture.
    #[must_use]
    pub fn rubber_band(&self) -> Option<Rect> {
        self.stack.frames_top_down().find_map(|frame| match &frame.data {
            StateData::Selecting(state) => Some(state.track.span()),
            _ => None,
        })
    }

    /// Replaces the selection with `ids`. Unknown and unselectable items are
    /// skipped.
    ///
    /// # Panics
    ///
    /// Panics in single-selection mode if more than one item remains.
    pub fn select<H, I>(&mut self, host: &mut H, ids: I)
    where
        H: ItemHost,
        I: IntoIterator<Item = ItemId>,
    {
        let ids: Vec<ItemId> = ids
            .into_iter()
            .filter(|id| host.item(*id).is_some_and(|item| item.is_selectable))
            .collect();
        let diff = self.selection.replace_with(ids);
        self.apply_selection_diff(host, diff);
    }

    /// Selects every selectable, valid item. Does nothing in single-selection
    /// mode.
    pub fn select_all<H: ItemHost>(&mut self, host: &mut H) {
        if self.selection.mode() == SelectionMode::Single {
            tracing::debug!("select all ignored in single-selection mode");
            return;
        }
        let all: Vec<ItemId> = host
            .items()
            .filter(|(_, item)| item.is_selectable && item.is_valid())
            .map(|(id, _)| id)
            .collect();
        let diff = self.selection.replace_with(all);
        self.apply_selection_diff(host, diff);
    }

    /// Clears the selection.
    pub fn unselect_all<H: ItemHost>(&mut self, host: &mut H) {
        let diff = self.selection.clear();
        self.apply_selection_diff(host, diff);
    }

    pub(super) fn set_selection_mode<H: ItemHost>(&mut self, host: &mut H, mode: SelectionMode) {
        if self.selection.mode() == mode {
            return;
        }
        tracing::debug!(?mode, "selection mode changed");
        let diff = self.selection.set_mode(mode);
        self.apply_selection_diff(host, diff);

        // A band in progress restarts under the new mode from the cleared
        // selection.
        let retarget = match mode {
            SelectionMode::Single => StateId::SingleSelecting,
            _ => StateId::MultipleSelecting,
        };
        let before = self.stack.top_id();
        for frame in self.stack.frames_mut() {
            if let StateData::Selecting(state) = &mut frame.data {
                frame.id = retarget;
                state.selection_type = SelectionType::Replace;
                state.base.clear();
                state.sticky = StickyPick::new();
            }
        }
        let after = self.stack.top_id();
        if after != before {
            tracing::debug!(state = ?after, "rubber band switched selection mode");
            self.events.push(CanvasEvent::StateChanged(after));
        }
    }

    /// Mirrors a selection change onto the items and queues notifications.
    pub(super) fn apply_selection_diff<H: ItemHost>(
        &mut self,
        host: &mut H,
        diff: SelectionDiff<ItemId>,
    ) {
        if diff.is_empty() {
            return;
        }
        tracing::debug!(
            added = diff.added.len(),
            removed = diff.removed.len(),
            total = self.selection.len(),
            "selection changed"
        );
        for id in diff.removed {
            if let Some(item) = host.item_mut(id) {
                item.is_selected = false;
            }
            self.events.push(CanvasEvent::ItemUnselected(id));
        }
        for id in diff.added {
            if let Some(item) = host.item_mut(id) {
                item.is_selected = true;
            }
            self.events.push(CanvasEvent::ItemSelected(id));
        }
    }

    /// Starts a rubber band at the pointer. A replacing gesture clears the
    /// selection up front.
    pub(super) fn enter_selecting<H: ItemHost>(&mut self, host: &mut H, id: StateId) -> StateData {
        let selection_type = if id == StateId::MultipleSelecting {
            self.config.gestures.selection_type(self.modifiers)
        } else {
            SelectionType::Replace
        };
        if selection_type == SelectionType::Replace {
            self.unselect_all(host);
        }
        let origin = self.pointer_position();
        tracing::debug!(?origin, ?selection_type, "rubber band started");
        let band = Rect::from_points(origin, origin);
        self.events.push(CanvasEvent::RubberBandChanged(Some(band)));
        StateData::Selecting(SelectingState {
            track: PointerTrack::new(origin),
            selection_type,
            base: self.selection.items().to_vec(),
            sticky: StickyPick::new(),
        })
    }

    /// Stretches the band to the pointer. Real-time selection applies the
    /// hits right away.
    pub(super) fn select_move<H: ItemHost>(
        &mut self,
        host: &mut H,
        id: StateId,
        state: &mut SelectingState,
    ) {
        let before = state.track.span();
        state.track.advance(self.pointer_position());
        let band = state.track.span();
        if band == before {
            return;
        }
        tracing::trace!(?band, "rubber band moved");
        self.events.push(CanvasEvent::RubberBandChanged(Some(band)));
        if self.config.real_time_selection {
            self.apply_band(host, id, state);
        }
    }

    /// Commits the band. Selecting is never cancelled.
    pub(super) fn exit_selecting<H: ItemHost>(
        &mut self,
        host: &mut H,
        id: StateId,
        mut state: SelectingState,
    ) {
        self.apply_band(host, id, &mut state);
        tracing::debug!(
            band = ?state.track.span(),
            selected = self.selection.len(),
            "rubber band committed"
        );
        self.events.push(CanvasEvent::RubberBandChanged(None));
    }

    fn apply_band<H: ItemHost>(&mut self, host: &mut H, id: StateId, state: &mut SelectingState) {
        let band = state.track.span();
        let diff = if id == StateId::SingleSelecting {
            let hits = query(band, host, SelectionPolicy::FirstMatch);
            let pick = state.sticky.update(&hits);
            self.selection.replace_with(pick)
        } else {
            let hits = query(band, host, SelectionPolicy::AllMatches);
            let next = state.selection_type.apply(&state.base, &hits);
            self.selection.replace_with(next)
        };
        self.apply_selection_diff(host, diff);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};
    use understory_event_state::gesture::{Modifiers, PointerButton, PointerButtons};

    use crate::{Canvas, CanvasConfig, Item, ItemHost, ItemId, ItemStore, PointerEvent, StateId};

    fn canvas_with_grid(config: CanvasConfig) -> (Canvas, ItemStore, Vec<ItemId>) {
        let mut items = ItemStore::new();
        let ids = (0_u8..3)
            .map(|i| {
                let x = f64::from(i) * 100.0;
                items.insert(Item::new(Rect::new(x, 0.0, x + 50.0, 50.0)))
            })
            .collect();
        let mut canvas = Canvas::new(config, Size::new(800.0, 600.0));
        canvas.items_changed(&mut items);
        (canvas, items, ids)
    }

    fn band(canvas: &mut Canvas, items: &mut ItemStore, from: Point, to: Point, mods: Modifiers) {
        canvas.pointer_down(
            items,
            &PointerEvent::down(from, PointerButton::Primary).with_modifiers(mods),
        );
        canvas.pointer_move(
            items,
            &PointerEvent::moved(to, PointerButtons::PRIMARY).with_modifiers(mods),
        );
        canvas.pointer_up(items, &PointerEvent::up(to, PointerButton::Primary));
    }

    #[test]
    fn shrinking_band_deselects() {
        let (mut canvas, mut items, ids) = canvas_with_grid(CanvasConfig::default());
        let primary = PointerButtons::PRIMARY;
        canvas.pointer_down(
            &mut items,
            &PointerEvent::down(Point::new(10.0, 10.0), PointerButton::Primary),
        );
        canvas.pointer_move(&mut items, &PointerEvent::moved(Point::new(260.0, 40.0), primary));
        assert_eq!(canvas.selection().items(), &ids[..]);
        canvas.pointer_move(&mut items, &PointerEvent::moved(Point::new(120.0, 40.0), primary));
        assert_eq!(canvas.selection().items(), &ids[..2]);
        assert!(!items[ids[2]].is_selected);
        assert!(canvas.rubber_band().is_some());

        canvas.pointer_up(
            &mut items,
            &PointerEvent::up(Point::new(120.0, 40.0), PointerButton::Primary),
        );
        assert_eq!(canvas.selection().len(), 2);
        assert_eq!(canvas.rubber_band(), None);
    }

    #[test]
    fn modifiers_append_and_remove() {
        let (mut canvas, mut items, ids) = canvas_with_grid(CanvasConfig::default());
        band(&mut canvas, &mut items, Point::new(10.0, 10.0), Point::new(20.0, 20.0), Modifiers::empty());
        assert_eq!(canvas.selection().items(), &[ids[0]]);

        band(&mut canvas, &mut items, Point::new(210.0, 10.0), Point::new(220.0, 20.0), Modifiers::SHIFT);
        assert_eq!(canvas.selection().items(), &[ids[0], ids[2]]);

        band(&mut canvas, &mut items, Point::new(5.0, 5.0), Point::new(120.0, 20.0), Modifiers::ALT);
        assert_eq!(canvas.selection().items(), &[ids[2]]);
        assert!(!items[ids[0]].is_selected);
        assert!(items[ids[2]].is_selected);
    }

    #[test]
    fn deferred_selection_commits_on_release() {
        let config = CanvasConfig {
            real_time_selection: false,
            ..CanvasConfig::default()
        };
        let (mut canvas, mut items, ids) = canvas_with_grid(config);
        canvas.pointer_down(
            &mut items,
            &PointerEvent::down(Point::new(10.0, 10.0), PointerButton::Primary),
        );
        canvas.pointer_move(
            &mut items,
            &PointerEvent::moved(Point::new(150.0, 30.0), PointerButtons::PRIMARY),
        );
        assert!(canvas.selection().is_empty());
        canvas.pointer_up(
            &mut items,
            &PointerEvent::up(Point::new(150.0, 30.0), PointerButton::Primary),
        );
        assert_eq!(canvas.selection().items(), &ids[..2]);
    }

    #[test]
    fn select_all_skips_unselectable() {
        let (mut canvas, mut items, ids) = canvas_with_grid(CanvasConfig::default());
        let hidden = items.insert(Item::new(Rect::new(0.0, 100.0, 10.0, 110.0)).unselectable());
        canvas.select_all(&mut items);
        assert_eq!(canvas.selection().items(), &ids[..]);
        assert!(!items.item(hidden).is_some_and(|i| i.is_selected));

        canvas.set_can_select_multiple(&mut items, false);
        assert!(canvas.selection().is_empty());
        assert!(ids.iter().all(|id| !items[*id].is_selected));
    }

    #[test]
    fn mode_switch_mid_band_keeps_one_item() {
        let mut items = ItemStore::new();
        let a = items.insert(Item::new(Rect::new(0.0, 0.0, 20.0, 20.0)));
        let b = items.insert(Item::new(Rect::new(30.0, 30.0, 50.0, 50.0)));
        let mut canvas = Canvas::new(CanvasConfig::default(), Size::new(400.0, 400.0));
        canvas.items_changed(&mut items);
        let primary = PointerButtons::PRIMARY;

        canvas.pointer_down(
            &mut items,
            &PointerEvent::down(Point::new(-5.0, -5.0), PointerButton::Primary),
        );
        canvas.pointer_move(&mut items, &PointerEvent::moved(Point::new(50.0, 50.0), primary));
        assert_eq!(canvas.state(), StateId::MultipleSelecting);
        assert_eq!(canvas.selection().items(), &[a, b]);

        canvas.set_can_select_multiple(&mut items, false);
        assert_eq!(canvas.state(), StateId::SingleSelecting);
        assert!(canvas.selection().is_empty());
        assert!(canvas.rubber_band().is_some());

        canvas.pointer_move(&mut items, &PointerEvent::moved(Point::new(60.0, 60.0), primary));
        assert_eq!(canvas.selection().len(), 1);
        assert_eq!(canvas.selection().items(), &[b]);
        canvas.pointer_up(
            &mut items,
            &PointerEvent::up(Point::new(60.0, 60.0), PointerButton::Primary),
        );
        assert_eq!(canvas.state(), StateId::Default);
        assert_eq!(canvas.selection().items(), &[b]);
        assert!(!items[a].is_selected);
    }

    #[test]
    #[should_panic(expected = "single-selection mode cannot hold 2 items")]
    fn single_mode_rejects_batches() {
        let config = CanvasConfig {
            can_select_multiple: false,
            ..CanvasConfig::default()
        };
        let (mut canvas, mut items, ids) = canvas_with_grid(config);
        canvas.select(&mut items, [ids[0], ids[1]]);
    }
}
