// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle and point helpers shared by the viewport, the scroll reconciler,
//! and canvas hit testing.
//!
//! Canvas items are allowed to carry degenerate bounds while they are being
//! placed (zero or NaN width/height). Everything in this module treats such
//! rectangles as "no extent": they never intersect anything and never grow a
//! union.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use kurbo::{Point, Rect};

/// Sign of an axis for a rectangle built from an anchor and a moving corner.
///
/// A `Negative` direction means the moving corner sits before the anchor on
/// that axis, so the visual rectangle extends from the anchor towards the
/// origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScaleDirection {
    /// The corner is at or after the anchor.
    #[default]
    Positive,
    /// The corner is before the anchor.
    Negative,
}

impl ScaleDirection {
    /// Direction for a signed delta along one axis. Zero counts as positive.
    #[must_use]
    pub fn from_delta(delta: f64) -> Self {
        if delta < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns `1.0` or `-1.0`.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }

    /// Returns `true` for [`ScaleDirection::Negative`].
    #[must_use]
    pub fn is_negative(self) -> bool {
        self == Self::Negative
    }
}

/// A normalized rectangle plus the direction it was dragged out in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignedRect {
    /// Normalized rectangle (`x0 <= x1`, `y0 <= y1`).
    pub rect: Rect,
    /// Horizontal direction from the anchor to the corner.
    pub scale_x: ScaleDirection,
    /// Vertical direction from the anchor to the corner.
    pub scale_y: ScaleDirection,
}

/// Builds a rectangle from two arbitrary corners, remembering on which side of
/// `anchor` the `corner` lies.
#[must_use]
pub fn rect_from_corners(anchor: Point, corner: Point) -> SignedRect {
    let delta = corner - anchor;
    SignedRect {
        rect: Rect::from_points(anchor, corner),
        scale_x: ScaleDirection::from_delta(delta.x),
        scale_y: ScaleDirection::from_delta(delta.y),
    }
}

/// Returns `true` if `rect` is finite and has strictly positive width and height.
#[must_use]
pub fn is_valid_rect(rect: Rect) -> bool {
    rect.x0.is_finite()
        && rect.y0.is_finite()
        && rect.x1.is_finite()
        && rect.y1.is_finite()
        && rect.width() > 0.0
        && rect.height() > 0.0
}

/// Union of every valid rectangle in `rects`, or `None` if there are none.
#[must_use]
pub fn union_valid<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    rects
        .into_iter()
        .filter(|r| is_valid_rect(*r))
        .reduce(|acc, r| acc.union(r))
}

/// Returns `true` if `a` and `b` overlap with a non-zero area.
///
/// Degenerate rectangles (zero-sized or non-finite) never intersect.
#[must_use]
pub fn intersects(a: Rect, b: Rect) -> bool {
    is_valid_rect(a) && is_valid_rect(b) && a.intersect(b).area() > 0.0
}

/// Rounds `value` to the nearest multiple of `spacing`.
///
/// A non-positive or non-finite spacing disables snapping.
#[must_use]
pub fn snap_to_grid(value: f64, spacing: f64) -> f64 {
    if !(spacing.is_finite() && spacing > 0.0) {
        return value;
    }
    (value / spacing).round() * spacing
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;

    #[test]
    fn corners_up_and_left_are_negative() {
        let signed = rect_from_corners(Point::new(100.0, 100.0), Point::new(50.0, 40.0));
        assert_eq!(signed.rect, Rect::new(50.0, 40.0, 100.0, 100.0));
        assert_eq!(signed.scale_x, ScaleDirection::Negative);
        assert_eq!(signed.scale_y, ScaleDirection::Negative);
    }

    #[test]
    fn corner_on_anchor_is_positive_and_degenerate() {
        let p = Point::new(3.0, 4.0);
        let signed = rect_from_corners(p, p);
        assert_eq!(signed.scale_x, ScaleDirection::Positive);
        assert!(!is_valid_rect(signed.rect));
    }

    #[test]
    fn invalid_rects_do_not_contribute() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(500.0, 500.0, 500.0, 520.0),
            Rect::new(f64::NAN, 0.0, 1.0, 1.0),
            Rect::new(20.0, -5.0, 30.0, 5.0),
        ];
        assert_eq!(union_valid(rects), Some(Rect::new(0.0, -5.0, 30.0, 10.0)));
        assert_eq!(union_valid([Rect::ZERO]), None);
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!intersects(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(intersects(a, Rect::new(9.0, 9.0, 20.0, 20.0)));
        assert!(!intersects(a, Rect::new(5.0, 5.0, 5.0, 8.0)));
    }

    #[test]
    fn snapping_rounds_to_nearest_line() {
        assert_eq!(snap_to_grid(22.0, 15.0), 15.0);
        assert_eq!(snap_to_grid(23.0, 15.0), 30.0);
        assert_eq!(snap_to_grid(-8.0, 15.0), -15.0);
        assert_eq!(snap_to_grid(7.3, 0.0), 7.3);
    }
}
