// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer track: movement deltas and total offsets for one gesture.
//!
//! A [`PointerTrack`] is created when a gesture starts and dropped when it
//! ends, so it always has an origin. Interaction states keep one in their
//! per-state data.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_event_state::track::PointerTrack;
//!
//! let mut track = PointerTrack::new(Point::new(10.0, 20.0));
//!
//! // Each step reports the movement since the previous one...
//! assert_eq!(track.advance(Point::new(15.0, 25.0)), Vec2::new(5.0, 5.0));
//! assert_eq!(track.advance(Point::new(16.0, 20.0)), Vec2::new(1.0, -5.0));
//!
//! // ...while the total stays relative to the origin.
//! assert_eq!(track.total(), Vec2::new(6.0, 0.0));
//! ```

use kurbo::{Point, Rect, Vec2};

/// Origin and latest position of a pointer during one gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerTrack {
    origin: Point,
    last: Point,
}

impl PointerTrack {
    /// Starts tracking at `origin`.
    #[must_use]
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            last: origin,
        }
    }

    /// Position the gesture started at.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Most recent position.
    #[must_use]
    pub fn last(&self) -> Point {
        self.last
    }

    /// Moves to `pos` and returns the delta since the previous position.
    pub fn advance(&mut self, pos: Point) -> Vec2 {
        let delta = pos - self.last;
        self.last = pos;
        delta
    }

    /// Offset from the origin to the most recent position.
    #[must_use]
    pub fn total(&self) -> Vec2 {
        self.last - self.origin
    }

    /// Normalized rectangle spanned by the origin and the most recent
    /// position, as used for rubber bands.
    #[must_use]
    pub fn span(&self) -> Rect {
        Rect::from_points(self.origin, self.last)
    }
}
