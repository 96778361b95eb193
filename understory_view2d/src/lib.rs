// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view2d --heading-base-level=0

//! Understory View 2D: viewport and scrollbar primitives for zoomable canvases.
//!
//! This crate provides small, headless models of a visible window into an
//! unbounded content plane. It focuses on:
//! - Viewport state: a content-space location, a screen size, and a uniform
//!   zoom factor bounded to a configurable range.
//! - Coordinate conversion between content space and screen space.
//! - Point-anchored zoom that keeps the content under the cursor in place.
//! - Scrollbar reconciliation: deriving scrollbar offsets and extents from the
//!   bounds of the content, and mapping scrollbar commands back to viewport
//!   locations.
//! - Rectangle helpers that treat degenerate (zero-sized or NaN) bounds as
//!   having no extent.
//!
//! It does **not** own any items or rendering backend. Callers are expected
//! to:
//! - Compute the union of their item bounds (see [`union_valid`]) and feed it
//!   to a [`ScrollReconciler`] whenever items or the viewport change.
//! - Apply [`Viewport::transform`] to their rendered surface.
//! - Map pointer and wheel input to [`Viewport::pan_by_screen`] and
//!   [`Viewport::zoom_at_position`] at a higher layer.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_view2d::{ScrollReconciler, Viewport, union_valid};
//!
//! let mut view = Viewport::new(Size::new(800.0, 600.0));
//!
//! // Zoom in around the cursor; the content under it stays put.
//! let cursor = Point::new(400.0, 300.0);
//! let before = view.to_content_point(cursor);
//! view.zoom_at_position(cursor, 1.1);
//! let after = view.to_content_point(cursor);
//! assert!((before - after).hypot() < 1e-9);
//!
//! // Keep scrollbars in sync with the content.
//! let items = [Rect::new(-50.0, 0.0, 100.0, 80.0), Rect::new(900.0, 20.0, 950.0, 60.0)];
//! let mut scroll = ScrollReconciler::new();
//! scroll.update_scrollbars(union_valid(items), view.visible_rect());
//! assert!(scroll.extent().width >= 1000.0);
//! ```
//!
//! ## Design notes
//!
//! - The viewport is axis-aligned with a **uniform** zoom factor.
//! - The location is the only persistent position state; the transform is
//!   derived from it.
//! - Zoom changes of at most [`ZOOM_EPSILON`] do not move the location, so
//!   repeated wheel ticks at a zoom limit do not make the content jitter.
//!
//! This crate is `no_std`.

#![no_std]

mod axis;
mod geometry;
mod scroll;
mod viewport;

pub use axis::Axis;
pub use geometry::{
    ScaleDirection, SignedRect, intersects, is_valid_rect, rect_from_corners, snap_to_grid,
    union_valid,
};
pub use scroll::{ScrollReconciler, ScrollState};
pub use viewport::{
    DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, Viewport, ViewportDebugInfo, ZOOM_EPSILON,
};
