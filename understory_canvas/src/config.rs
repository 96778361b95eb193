// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas configuration and gesture tables.

use std::time::Duration;

use understory_event_state::gesture::{InputGesture, Key, Modifiers, PointerButton};
use understory_view2d::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};

use crate::selector::SelectionType;

/// Line-scroll distance used when `scroll_factor` is zero or invalid.
pub const DEFAULT_SCROLL_FACTOR: f64 = 10.0;

/// Which gestures start which interaction.
///
/// Pointer gestures are checked in the order draw, drag, pan, select; the
/// first match whose interaction may start on top of the current one wins.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureMap {
    /// Starts panning. May hold key gestures.
    pub pan: Vec<InputGesture>,
    /// Starts drawing when an item is pending placement.
    pub draw: Vec<InputGesture>,
    /// Starts a rubber-band selection.
    pub select: Vec<InputGesture>,
    /// Starts dragging when pressed on an item.
    pub drag: Vec<InputGesture>,
    /// Held while selecting: add hits to the selection.
    pub append: Modifiers,
    /// Held while selecting: remove hits from the selection.
    pub remove: Modifiers,
    /// Held while selecting: flip the selection state of hits.
    pub invert: Modifiers,
}

impl Default for GestureMap {
    fn default() -> Self {
        Self {
            pan: vec![
                InputGesture::pointer(PointerButton::Secondary),
                InputGesture::pointer(PointerButton::Auxiliary),
                InputGesture::key(Key::Space),
            ],
            draw: vec![InputGesture::pointer(PointerButton::Primary)],
            select: vec![InputGesture::pointer(PointerButton::Primary)],
            drag: vec![InputGesture::pointer(PointerButton::Primary)],
            append: Modifiers::SHIFT,
            remove: Modifiers::ALT,
            invert: Modifiers::CONTROL,
        }
    }
}

impl GestureMap {
    /// How a selection gesture with `held` modifiers combines with the
    /// existing selection. Remove wins over invert, invert over append.
    #[must_use]
    pub fn selection_type(&self, held: Modifiers) -> SelectionType {
        let holds = |required: Modifiers| !required.is_empty() && held.contains(required);
        if holds(self.remove) {
            SelectionType::Remove
        } else if holds(self.invert) {
            SelectionType::Invert
        } else if holds(self.append) {
            SelectionType::Append
        } else {
            SelectionType::Replace
        }
    }
}

/// Options recognized by [`Canvas`](crate::Canvas).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CanvasConfig {
    /// Zoom multiplier per wheel notch.
    pub scale_factor: f64,
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Line-scroll distance in content units. Zero means the default.
    pub scroll_factor: f64,
    /// Round drawn and dragged positions to the grid.
    pub enable_snapping: bool,
    /// Grid spacing used when snapping.
    pub grid_spacing: f64,
    /// Apply rubber-band hits on every move instead of on release.
    pub real_time_selection: bool,
    /// Commit drag offsets on every move instead of on release.
    pub real_time_dragging: bool,
    /// Multiple selection mode; switching clears the selection.
    pub can_select_multiple: bool,
    /// Pan automatically while a gesture holds the pointer near an edge.
    pub enable_auto_panning: bool,
    /// Auto-pan timer period in milliseconds.
    pub auto_pan_tick_rate_ms: u64,
    /// Auto-pan distance per tick in screen units.
    pub auto_pan_speed: f64,
    /// Distance from a screen edge at which auto-pan kicks in.
    pub auto_pan_edge_distance: f64,
    /// Gesture table.
    pub gestures: GestureMap,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.1,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            scroll_factor: DEFAULT_SCROLL_FACTOR,
            enable_snapping: false,
            grid_spacing: 15.0,
            real_time_selection: true,
            real_time_dragging: true,
            can_select_multiple: true,
            enable_auto_panning: true,
            auto_pan_tick_rate_ms: 1,
            auto_pan_speed: 15.0,
            auto_pan_edge_distance: 15.0,
            gestures: GestureMap::default(),
        }
    }
}

impl CanvasConfig {
    /// Returns the configuration with out-of-range values repaired.
    ///
    /// - non-finite or non-positive numbers fall back to their defaults;
    /// - swapped zoom limits are put back in order;
    /// - a zero `scroll_factor` becomes [`DEFAULT_SCROLL_FACTOR`].
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        let positive = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        self.scale_factor = positive(self.scale_factor, defaults.scale_factor);
        self.min_zoom = positive(self.min_zoom, defaults.min_zoom);
        self.max_zoom = positive(self.max_zoom, defaults.max_zoom);
        if self.min_zoom > self.max_zoom {
            core::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }
        self.scroll_factor = positive(self.scroll_factor, DEFAULT_SCROLL_FACTOR);
        if !self.grid_spacing.is_finite() || self.grid_spacing < 0.0 {
            self.grid_spacing = defaults.grid_spacing;
        }
        self.auto_pan_tick_rate_ms = self.auto_pan_tick_rate_ms.max(1);
        if !self.auto_pan_speed.is_finite() || self.auto_pan_speed < 0.0 {
            self.auto_pan_speed = defaults.auto_pan_speed;
        }
        if !self.auto_pan_edge_distance.is_finite() || self.auto_pan_edge_distance < 0.0 {
            self.auto_pan_edge_distance = defaults.auto_pan_edge_distance;
        }
        self
    }

    /// Auto-pan timer period.
    #[must_use]
    pub fn auto_pan_tick_rate(&self) -> Duration {
        Duration::from_millis(self.auto_pan_tick_rate_ms)
    }

    /// Parses a JSON document and normalizes it. Missing fields take their
    /// defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, crate::CanvasError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.normalized())
    }
}
