// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use understory_event_state::track::PointerTrack;
use understory_selection::SelectionMode;

use super::Canvas;
use crate::drag::{CommitPolicy, drag_targets};
use crate::interaction::StateData;
use crate::selector::SelectionType;
use crate::{CanvasEvent, ItemHost, ItemId};

impl Canvas {
    /// Grabs `container`, selecting it first if needed. Returns `None` for
    /// items that cannot be dragged.
    pub(super) fn enter_dragging<H: ItemHost>(
        &mut self,
        host: &mut H,
        container: ItemId,
    ) -> Option<StateData> {
        if !host.item(container)?.is_draggable {
            return None;
        }
        self.select_pressed_item(host, container);
        let targets = drag_targets(&self.selection, container);
        tracing::debug!(?container, targets = targets.len(), "drag started");
        Some(StateData::Dragging {
            targets,
            track: PointerTrack::new(self.pointer_position()),
        })
    }

    /// Selects a pressed item that is not selected yet: only it, or in
    /// addition to the selection when the append modifier is held in
    /// multiple mode. Unselectable items are left alone.
    pub(super) fn select_pressed_item<H: ItemHost>(&mut self, host: &mut H, id: ItemId) {
        let Some(item) = host.item(id) else {
            return;
        };
        if !item.is_selectable || self.selection.contains(&id) {
            return;
        }
        let append = self.selection.mode() == SelectionMode::Multiple
            && self.config.gestures.selection_type(self.modifiers) == SelectionType::Append;
        let diff = if append {
            self.selection.add(id)
        } else {
            self.selection.select_only(id)
        };
        self.apply_selection_diff(host, diff);
    }

    pub(super) fn drag_move<H: ItemHost>(
        &mut self,
        host: &mut H,
        targets: &[ItemId],
        track: &mut PointerTrack,
    ) {
        let delta = track.advance(self.pointer_position());
        let policy = CommitPolicy::from_real_time(self.config.real_time_dragging);
        let changed = self.drag.on_drag_move(host, targets, delta, policy);
        if changed.is_empty() {
            return;
        }
        tracing::trace!(?delta, items = changed.len(), "dragged");
        for id in changed {
            match policy {
                CommitPolicy::Immediate => self.emit_bounds(host, id),
                CommitPolicy::Deferred => {
                    if let Some(item) = host.item(id) {
                        self.events.push(CanvasEvent::ItemOffsetChanged {
                            id,
                            offset: item.offset,
                        });
                    }
                }
            }
        }
        if policy == CommitPolicy::Immediate {
            self.refresh_extent(host);
        }
    }

    /// Commits outstanding offsets, snaps the moved items, and grows the
    /// extent. Dragging is never cancelled.
    pub(super) fn exit_dragging<H: ItemHost>(&mut self, host: &mut H) {
        let had_offsets = self.drag.has_pending();
        let moved = self.drag.finish(host);
        for &id in &moved {
            if self.config.enable_snapping {
                let Some(item) = host.item(id) else {
                    continue;
                };
                let (left, top) = (self.snap(item.left), self.snap(item.top));
                if let Some(item) = host.item_mut(id) {
                    item.left = left;
                    item.top = top;
                }
            }
            if had_offsets {
                self.events.push(CanvasEvent::ItemOffsetChanged {
                    id,
                    offset: Vec2::ZERO,
                });
            }
            self.emit_bounds(host, id);
        }
        tracing::debug!(moved = moved.len(), "drag committed");
        self.refresh_extent(host);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};
    use understory_event_state::gesture::{Modifiers, PointerButton, PointerButtons};

    use crate::{Canvas, CanvasConfig, CanvasEvent, Item, ItemStore, PointerEvent, StateId};

    #[test]
    fn pressing_an_unselected_item_selects_only_it() {
        let mut items = ItemStore::new();
        let a = items.insert(Item::new(Rect::new(0.0, 0.0, 20.0, 20.0)));
        let b = items.insert(Item::new(Rect::new(50.0, 0.0, 70.0, 20.0)));
        let mut canvas = Canvas::new(CanvasConfig::default(), Size::new(400.0, 400.0));
        canvas.select(&mut items, [a]);

        let press = PointerEvent::down(Point::new(60.0, 10.0), PointerButton::Primary).on_item(b);
        canvas.pointer_down(&mut items, &press);
        assert_eq!(canvas.state(), StateId::Dragging);
        assert_eq!(canvas.selection().items(), &[b]);
        canvas.pointer_up(&mut items, &PointerEvent::up(Point::new(60.0, 10.0), PointerButton::Primary));

        // Shift appends instead.
        let press = PointerEvent::down(Point::new(10.0, 10.0), PointerButton::Primary)
            .on_item(a)
            .with_modifiers(Modifiers::SHIFT);
        canvas.pointer_down(&mut items, &press);
        assert_eq!(canvas.selection().items(), &[b, a]);
    }

    #[test]
    fn deferred_drag_reports_offsets_then_commits() {
        let mut items = ItemStore::new();
        let a = items.insert(Item::new(Rect::new(0.0, 0.0, 20.0, 20.0)));
        let config = CanvasConfig {
            real_time_dragging: false,
            ..CanvasConfig::default()
        };
        let mut canvas = Canvas::new(config, Size::new(400.0, 400.0));
        canvas.items_changed(&mut items);

        let press = PointerEvent::down(Point::new(10.0, 10.0), PointerButton::Primary).on_item(a);
        canvas.pointer_down(&mut items, &press);
        canvas.pointer_move(
            &mut items,
            &PointerEvent::moved(Point::new(310.0, 40.0), PointerButtons::PRIMARY),
        );
        assert_eq!(items[a].left, 0.0);
        assert_eq!(items[a].offset, Vec2::new(300.0, 30.0));
        assert_eq!(canvas.items_extent(), Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
        canvas.drain_events();

        canvas.pointer_up(
            &mut items,
            &PointerEvent::up(Point::new(310.0, 40.0), PointerButton::Primary),
        );
        assert_eq!(items[a].bounds(), Rect::new(300.0, 30.0, 320.0, 50.0));
        assert_eq!(items[a].offset, Vec2::ZERO);
        assert_eq!(canvas.items_extent(), Some(Rect::new(300.0, 30.0, 320.0, 50.0)));
        let events = canvas.drain_events();
        assert!(events.contains(&CanvasEvent::ItemOffsetChanged {
            id: a,
            offset: Vec2::ZERO,
        }));
    }

    #[test]
    fn pressing_a_pinned_item_only_selects_it() {
        let mut items = ItemStore::new();
        let a = items.insert(Item::new(Rect::new(0.0, 0.0, 20.0, 20.0)).pinned());
        let b = items.insert(Item::new(Rect::new(50.0, 0.0, 70.0, 20.0)));
        let c = items.insert(Item::new(Rect::new(100.0, 0.0, 120.0, 20.0)).pinned().unselectable());
        let mut canvas = Canvas::new(CanvasConfig::default(), Size::new(400.0, 400.0));
        canvas.items_changed(&mut items);
        canvas.select(&mut items, [b]);

        let press = PointerEvent::down(Point::new(10.0, 10.0), PointerButton::Primary).on_item(a);
        canvas.pointer_down(&mut items, &press);
        // No drag and no rubber band.
        assert_eq!(canvas.state(), StateId::Default);
        assert_eq!(canvas.rubber_band(), None);
        assert_eq!(canvas.selection().items(), &[a]);
        assert!(items[a].is_selected && !items[b].is_selected);
        canvas.pointer_up(&mut items, &PointerEvent::up(Point::new(10.0, 10.0), PointerButton::Primary));
        assert_eq!(items[a].position(), Point::new(0.0, 0.0));

        // An item that is neither draggable nor selectable absorbs the press.
        let press = PointerEvent::down(Point::new(110.0, 10.0), PointerButton::Primary).on_item(c);
        canvas.pointer_down(&mut items, &press);
        assert_eq!(canvas.state(), StateId::Default);
        assert_eq!(canvas.selection().items(), &[a]);
        canvas.pointer_up(&mut items, &PointerEvent::up(Point::new(110.0, 10.0), PointerButton::Primary));
        assert_eq!(canvas.selection().items(), &[a]);
    }
}
