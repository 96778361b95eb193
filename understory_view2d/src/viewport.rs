// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Zoom changes at or below this magnitude leave the location untouched.
///
/// Near the zoom limits, clamping turns a wheel tick into a tiny residual
/// change; re-anchoring on such a change would make the content jitter.
pub const ZOOM_EPSILON: f64 = 1e-3;

/// Default lower zoom bound used by [`Viewport::new`].
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;

/// Default upper zoom bound used by [`Viewport::new`].
pub const DEFAULT_MAX_ZOOM: f64 = 2.0;

/// Visible window into an unbounded content plane.
///
/// The viewport is described by the content-space point shown at the
/// screen's top-left corner (the *location*), the screen size in device
/// units, and a uniform zoom factor. A content point `p` is drawn at
/// `(p - location) * zoom` on screen.
///
/// The location is the single source of truth for where the visible window
/// sits. Panning, scrolling, and point-anchored zooming all write it.
#[derive(Clone, Debug)]
pub struct Viewport {
    location: Point,
    screen_size: Size,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    content_to_screen: Affine,
    screen_to_content: Affine,
}

impl Viewport {
    /// Creates a viewport showing `screen_size` device units of content at
    /// zoom `1.0`, with the content origin at the top-left corner.
    ///
    /// Zoom is clamped to `[0.1, 2.0]` by default.
    #[must_use]
    pub fn new(screen_size: Size) -> Self {
        let mut vp = Self {
            location: Point::ORIGIN,
            screen_size: sanitize_size(screen_size),
            zoom: 1.0,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            content_to_screen: Affine::IDENTITY,
            screen_to_content: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Content-space point shown at the top-left of the screen.
    #[must_use]
    pub fn location(&self) -> Point {
        self.location
    }

    /// Moves the visible window. Returns `true` if the location changed.
    ///
    /// Non-finite locations are ignored.
    pub fn set_location(&mut self, location: Point) -> bool {
        if !location.is_finite() || location == self.location {
            return false;
        }
        self.location = location;
        self.rebuild_transforms();
        true
    }

    /// Size of the rendering surface in device units.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen_size
    }

    /// Sets the size of the rendering surface. Returns `true` on change.
    ///
    /// Negative or non-finite dimensions are treated as zero.
    pub fn set_screen_size(&mut self, size: Size) -> bool {
        let size = sanitize_size(size);
        if size == self.screen_size {
            return false;
        }
        self.screen_size = size;
        true
    }

    /// Size of the visible window in content units (`screen_size / zoom`).
    #[must_use]
    pub fn size(&self) -> Size {
        self.screen_size / self.zoom
    }

    /// Visible window in content space.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(self.location, self.size())
    }

    /// Current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Lower zoom bound.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    /// Upper zoom bound.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`, and
    /// non-positive or non-finite bounds are replaced with the defaults. The
    /// current zoom is clamped into the new range, keeping the location.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let min_zoom = positive_or(min_zoom, DEFAULT_MIN_ZOOM);
        let max_zoom = positive_or(max_zoom, DEFAULT_MAX_ZOOM);
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Sets the zoom factor, clamped into the zoom range, keeping the
    /// location. Returns `true` if the zoom changed.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !zoom.is_finite() {
            return false;
        }
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if clamped == self.zoom {
            return false;
        }
        self.zoom = clamped;
        self.rebuild_transforms();
        true
    }

    /// Multiplies the zoom by `multiplier` while keeping the content point
    /// under `screen_point` fixed on screen.
    ///
    /// The resulting zoom is clamped into the zoom range. If it differs from
    /// the previous zoom by no more than [`ZOOM_EPSILON`], the zoom is still
    /// updated but the location is left unchanged. Non-positive or non-finite
    /// multipliers are ignored.
    ///
    /// Returns `true` if the zoom changed.
    pub fn zoom_at_position(&mut self, screen_point: Point, multiplier: f64) -> bool {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return false;
        }
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * multiplier).clamp(self.min_zoom, self.max_zoom);
        if new_zoom == old_zoom {
            return false;
        }

        if (new_zoom - old_zoom).abs() > ZOOM_EPSILON {
            let anchor = self.to_content_point(screen_point);
            self.location = anchor - screen_point.to_vec2() / new_zoom;
        }
        self.zoom = new_zoom;
        self.rebuild_transforms();
        true
    }

    /// Pans by a delta expressed in screen units.
    ///
    /// Content follows the pointer: dragging right reveals content on the
    /// left, so the location moves by `-delta / zoom`.
    pub fn pan_by_screen(&mut self, delta: Vec2) -> bool {
        self.pan_by_content(-delta / self.zoom)
    }

    /// Moves the location by a delta expressed in content units.
    pub fn pan_by_content(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        self.set_location(self.location + delta)
    }

    /// Converts a screen-space point into content space.
    #[must_use]
    pub fn to_content_point(&self, pt: Point) -> Point {
        self.screen_to_content * pt
    }

    /// Converts a content-space point into screen space.
    #[must_use]
    pub fn to_screen_point(&self, pt: Point) -> Point {
        self.content_to_screen * pt
    }

    /// Converts a screen-space rectangle into content space.
    #[must_use]
    pub fn to_content_rect(&self, rect: Rect) -> Rect {
        // Uniform scale plus translation keeps rectangles axis-aligned, so
        // mapping the two corners is enough.
        Rect::from_points(
            self.to_content_point(rect.origin()),
            self.to_content_point(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Converts a content-space rectangle into screen space.
    #[must_use]
    pub fn to_screen_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.to_screen_point(rect.origin()),
            self.to_screen_point(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Scale + translation to apply to the rendered surface.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.content_to_screen
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            location: self.location,
            screen_size: self.screen_size,
            size: self.size(),
            zoom: self.zoom,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
        }
    }

    fn rebuild_transforms(&mut self) {
        // Content → screen: move the location to the origin, then scale.
        self.content_to_screen =
            Affine::scale(self.zoom) * Affine::translate(-self.location.to_vec2());
        self.screen_to_content = self.content_to_screen.inverse();
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportDebugInfo {
    /// Content-space point at the screen's top-left corner.
    pub location: Point,
    /// Surface size in device units.
    pub screen_size: Size,
    /// Visible window size in content units.
    pub size: Size,
    /// Current zoom factor.
    pub zoom: f64,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
}

fn sanitize_size(size: Size) -> Size {
    let dim = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    Size::new(dim(size.width), dim(size.height))
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, Viewport};

    fn close(a: Point, b: Point, tol: f64) -> bool {
        (a.x - b.x).abs() < tol && (a.y - b.y).abs() < tol
    }

    #[test]
    fn screen_content_roundtrip() {
        let mut vp = Viewport::new(Size::new(800.0, 600.0));
        vp.set_location(Point::new(-40.0, 25.0));
        vp.set_zoom(1.5);

        let content = Point::new(10.0, -5.0);
        let screen = vp.to_screen_point(content);
        assert!(close(vp.to_content_point(screen), content, 1e-9));
        assert!(close(vp.to_screen_point(vp.location()), Point::ORIGIN, 1e-9));
    }

    #[test]
    fn zoom_keeps_point_under_cursor() {
        let mut vp = Viewport::new(Size::new(800.0, 600.0));
        let cursor = Point::new(200.0, 150.0);
        let before = vp.to_content_point(cursor);

        assert!(vp.zoom_at_position(cursor, 1.5));
        assert!(close(vp.to_content_point(cursor), before, 1e-9));
        assert_eq!(vp.zoom(), 1.5);
    }

    #[test]
    fn zoom_roundtrip_restores_location() {
        let cursor = Point::new(333.0, 41.0);
        for start_zoom in [DEFAULT_MIN_ZOOM, 0.37, 1.0, 1.6] {
            for k in [1.1_f64, 1.25] {
                let mut vp = Viewport::new(Size::new(640.0, 480.0));
                vp.set_zoom(start_zoom);
                vp.set_location(Point::new(12.5, -80.0));
                if start_zoom * k > DEFAULT_MAX_ZOOM {
                    continue;
                }
                let origin = vp.location();
                vp.zoom_at_position(cursor, k);
                vp.zoom_at_position(cursor, 1.0 / k);
                assert!(
                    close(vp.location(), origin, 1e-5),
                    "zoom {start_zoom} by {k} did not round-trip"
                );
            }
        }
    }

    #[test]
    fn zoom_converges_to_limits() {
        let mut vp = Viewport::new(Size::new(100.0, 100.0));
        for _ in 0..64 {
            vp.zoom_at_position(Point::new(50.0, 50.0), 1.1);
            assert!(vp.zoom() <= DEFAULT_MAX_ZOOM, "zoom exceeded the maximum");
        }
        assert_eq!(vp.zoom(), DEFAULT_MAX_ZOOM);

        for _ in 0..128 {
            vp.zoom_at_position(Point::new(50.0, 50.0), 1.0 / 1.1);
            assert!(vp.zoom() >= DEFAULT_MIN_ZOOM, "zoom fell below the minimum");
        }
        assert_eq!(vp.zoom(), DEFAULT_MIN_ZOOM);
    }

    #[test]
    fn tiny_zoom_change_keeps_location() {
        let mut vp = Viewport::new(Size::new(100.0, 100.0));
        vp.set_zoom(1.9995);
        let location = vp.location();
        assert!(vp.zoom_at_position(Point::new(90.0, 90.0), 1.1));
        assert_eq!(vp.zoom(), DEFAULT_MAX_ZOOM);
        assert_eq!(vp.location(), location);
    }

    #[test]
    fn invalid_multiplier_is_ignored() {
        let mut vp = Viewport::new(Size::new(100.0, 100.0));
        assert!(!vp.zoom_at_position(Point::ORIGIN, 0.0));
        assert!(!vp.zoom_at_position(Point::ORIGIN, -2.0));
        assert!(!vp.zoom_at_position(Point::ORIGIN, f64::NAN));
        assert_eq!(vp.zoom(), 1.0);
    }

    #[test]
    fn pan_follows_pointer_and_scales_with_zoom() {
        let mut vp = Viewport::new(Size::new(100.0, 100.0));
        vp.set_zoom(2.0);
        vp.pan_by_screen(Vec2::new(20.0, -10.0));
        assert!(close(vp.location(), Point::new(-10.0, 5.0), 1e-12));
    }

    #[test]
    fn visible_rect_shrinks_when_zoomed_in() {
        let mut vp = Viewport::new(Size::new(800.0, 600.0));
        vp.set_zoom(2.0);
        assert_eq!(vp.visible_rect(), Rect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(
            vp.to_screen_rect(Rect::new(10.0, 10.0, 20.0, 30.0)),
            Rect::new(20.0, 20.0, 40.0, 60.0)
        );
    }

    #[test]
    fn zoom_limits_are_normalized() {
        let mut vp = Viewport::new(Size::new(10.0, 10.0));
        vp.set_zoom_limits(3.0, 0.5);
        assert_eq!(vp.min_zoom(), 0.5);
        assert_eq!(vp.max_zoom(), 3.0);

        vp.set_zoom_limits(1.5, 4.0);
        assert_eq!(vp.zoom(), 1.5);
        let info = vp.debug_info();
        assert!(info.min_zoom <= info.max_zoom);
    }
}
