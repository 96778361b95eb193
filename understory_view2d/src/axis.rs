// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};

/// One of the two scroll axes.
///
/// Scrollbar commands address a single axis at a time; this enum picks the
/// matching component out of kurbo's 2D types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    Horizontal,
    /// The Y axis.
    Vertical,
}

impl Axis {
    /// Returns the component of `pt` along this axis.
    #[must_use]
    pub fn of_point(self, pt: Point) -> f64 {
        match self {
            Self::Horizontal => pt.x,
            Self::Vertical => pt.y,
        }
    }

    /// Overwrites the component of `pt` along this axis.
    pub fn set_point(self, pt: &mut Point, value: f64) {
        match self {
            Self::Horizontal => pt.x = value,
            Self::Vertical => pt.y = value,
        }
    }

    /// Returns the component of `v` along this axis.
    #[must_use]
    pub fn of_vec(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Overwrites the component of `v` along this axis.
    pub fn set_vec(self, v: &mut Vec2, value: f64) {
        match self {
            Self::Horizontal => v.x = value,
            Self::Vertical => v.y = value,
        }
    }

    /// Returns the width or height of `size`.
    #[must_use]
    pub fn of_size(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }
}
