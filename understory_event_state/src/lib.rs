// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: input vocabulary for interaction state machines.
//!
//! This crate provides the small, framework-agnostic pieces an interaction
//! state machine needs to interpret raw input:
//!
//! - [`gesture`]: buttons, keys, modifiers, and configurable [`gesture::InputGesture`]s
//!   that decide which interaction a press starts.
//! - [`track`]: a [`track::PointerTrack`] computing movement deltas and total
//!   offsets over the lifetime of one gesture.
//!
//! ## Usage Patterns
//!
//! ### Gesture tables
//!
//! Keep gestures in configuration rather than hard-coding buttons:
//!
//! ```rust
//! use understory_event_state::gesture::{InputGesture, Key, Modifiers, PointerButton};
//!
//! let pan = [
//!     InputGesture::pointer(PointerButton::Secondary),
//!     InputGesture::key(Key::Space),
//! ];
//! let held = Modifiers::empty();
//! assert!(pan.iter().any(|g| g.matches_pointer(PointerButton::Secondary, held)));
//! assert!(pan.iter().any(|g| g.matches_key(Key::Space, held)));
//! ```
//!
//! ### Pointer tracking
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_event_state::track::PointerTrack;
//!
//! let mut track = PointerTrack::new(Point::new(0.0, 0.0));
//! let delta = track.advance(Point::new(4.0, -2.0));
//! assert_eq!(delta, Vec2::new(4.0, -2.0));
//! ```
//!
//! The crate does not assume any particular UI framework, event system, or
//! scene graph structure; hosts translate their native events into these
//! types.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for gestures, buttons, keys, and
//!   modifiers so they can live in a host configuration file.
//!
//! This crate is `no_std` compatible.

#![no_std]

pub mod gesture;
pub mod track;
