// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared setup for the canvas integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_canvas::{Canvas, CanvasConfig, Item, ItemId, ItemStore, PointerEvent};
use understory_event_state::gesture::{PointerButton, PointerButtons};

/// Routes `tracing` output to the test harness. Set `RUST_LOG` to see it.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// A canvas over `rects`, with the extent already reconciled.
pub(crate) fn canvas_with(config: CanvasConfig, rects: &[Rect]) -> (Canvas, ItemStore, Vec<ItemId>) {
    init_tracing();
    let mut items = ItemStore::new();
    let ids = rects.iter().map(|r| items.insert(Item::new(*r))).collect();
    let mut canvas = Canvas::new(config, Size::new(800.0, 600.0));
    canvas.items_changed(&mut items);
    (canvas, items, ids)
}

/// Presses `button` at `from`, moves through `path`, and releases at the
/// last point.
pub(crate) fn gesture(
    canvas: &mut Canvas,
    items: &mut ItemStore,
    button: PointerButton,
    from: Point,
    path: &[Point],
) {
    canvas.pointer_down(items, &PointerEvent::down(from, button));
    let held = button.as_buttons();
    for p in path {
        canvas.pointer_move(items, &PointerEvent::moved(*p, held));
    }
    let end = path.last().copied().unwrap_or(from);
    canvas.pointer_up(items, &PointerEvent::up(end, button));
}

/// Moves with the primary button held.
pub(crate) fn drag_to(canvas: &mut Canvas, items: &mut ItemStore, to: Point) {
    canvas.pointer_move(items, &PointerEvent::moved(to, PointerButtons::PRIMARY));
}
