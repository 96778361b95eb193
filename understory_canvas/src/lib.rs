// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_canvas --heading-base-level=0

//! Understory Canvas: an interaction engine for zoomable item canvases.
//!
//! A [`Canvas`] hosts positioned, resizable items inside a pannable, zoomable,
//! scrollable surface. It turns pointer and key input into:
//!
//! - **panning** with a pointer or key gesture, interrupting other gestures;
//! - **drawing**: interactive placement of items queued with
//!   [`Canvas::queue_for_placement`];
//! - **rubber-band selection** in single or multiple mode, with append,
//!   remove, and invert modifiers;
//! - **dragging** one item, or every selected item at once;
//! - **scrollbars** whose offset and extent always agree with the items
//!   extent and the visible window.
//!
//! The engine is headless. Items stay with the host behind the [`ItemHost`]
//! trait ([`ItemStore`] is a ready-made one), rendering applies
//! [`Canvas::transform`], and changes are reported as [`CanvasEvent`]s
//! collected with [`Canvas::drain_events`].
//!
//! ## Interaction states
//!
//! Gestures push states onto a stack whose base ([`StateId::Default`]) is
//! never popped. Panning may interrupt any other state; when it ends the
//! suspended state picks up again from the current pointer position, so a
//! selection resumed after a pan matches one made without interruption.
//! Releasing the button (or key) that started a state always commits it;
//! there is no cancel path.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_canvas::{Canvas, CanvasConfig, Item, ItemStore, PointerEvent, StateId};
//! use understory_event_state::gesture::{PointerButton, PointerButtons};
//!
//! let mut items = ItemStore::new();
//! let a = items.insert(Item::new(Rect::new(0.0, 0.0, 10.0, 10.0)));
//! let b = items.insert(Item::new(Rect::new(20.0, 0.0, 30.0, 10.0)));
//! let mut canvas = Canvas::new(CanvasConfig::default(), Size::new(640.0, 480.0));
//! canvas.items_changed(&mut items);
//! canvas.select(&mut items, [a, b]);
//!
//! // Grab `a` and move it; the whole selection follows.
//! let down = PointerEvent::down(Point::new(5.0, 5.0), PointerButton::Primary).on_item(a);
//! canvas.pointer_down(&mut items, &down);
//! assert_eq!(canvas.state(), StateId::Dragging);
//! canvas.pointer_move(&mut items, &PointerEvent::moved(Point::new(45.0, 25.0), PointerButtons::PRIMARY));
//! canvas.pointer_up(&mut items, &PointerEvent::up(Point::new(45.0, 25.0), PointerButton::Primary));
//!
//! assert_eq!(items[a].position(), Point::new(40.0, 20.0));
//! assert_eq!(items[b].position(), Point::new(60.0, 20.0));
//! assert_eq!(canvas.items_extent(), Some(Rect::new(40.0, 20.0, 70.0, 30.0)));
//! ```
//!
//! ## Features
//!
//! - `serde` (default): derive `Serialize`/`Deserialize` for
//!   [`CanvasConfig`] and load it with [`CanvasConfig::from_json`].
//!
//! ## Logging
//!
//! The crate logs through `tracing`: `debug` for state transitions, zoom,
//! scroll sequences and commits, `trace` for per-move updates. It never
//! installs a subscriber.

pub mod auto_pan;
mod canvas;
mod config;
pub mod drag;
mod error;
mod event;
pub mod interaction;
mod item;
pub mod selector;

pub use canvas::Canvas;
pub use config::{CanvasConfig, DEFAULT_SCROLL_FACTOR, GestureMap};
pub use error::CanvasError;
pub use event::{CanvasEvent, KeyEvent, PointerEvent, ScrollCommand};
pub use interaction::StateId;
pub use item::{Item, ItemHost, ItemId, ItemStore};
pub use selector::{SelectionPolicy, SelectionType};
