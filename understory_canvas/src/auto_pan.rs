// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge auto-panning for gestures that hold the pointer near the border.
//!
//! The timer itself belongs to the host. [`AutoPanner::interval`] says whether
//! it should be running and at which period; each tick asks
//! [`AutoPanner::step`] how far to move the viewport.

use std::time::Duration;

use kurbo::{Point, Size, Vec2};

use crate::CanvasConfig;

/// Auto-pan timer state and tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct AutoPanner {
    enabled: bool,
    running: bool,
    tick_rate: Duration,
    speed: f64,
    edge_distance: f64,
}

impl AutoPanner {
    /// A stopped panner tuned from `config`.
    #[must_use]
    pub fn new(config: &CanvasConfig) -> Self {
        let mut panner = Self {
            enabled: false,
            running: false,
            tick_rate: Duration::ZERO,
            speed: 0.0,
            edge_distance: 0.0,
        };
        panner.configure(config);
        panner
    }

    /// Re-reads tuning from `config`. Disabling stops a running timer.
    pub fn configure(&mut self, config: &CanvasConfig) {
        self.enabled = config.enable_auto_panning;
        self.tick_rate = config.auto_pan_tick_rate();
        self.speed = config.auto_pan_speed;
        self.edge_distance = config.auto_pan_edge_distance;
        if !self.enabled {
            self.running = false;
        }
    }

    /// Starts the timer. Returns `true` if it was not running before.
    pub fn start(&mut self) -> bool {
        if !self.enabled || self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stops the timer. Returns `true` if it was running.
    pub fn stop(&mut self) -> bool {
        core::mem::replace(&mut self.running, false)
    }

    /// Returns `true` while the timer should be running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Timer period while running.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.running.then_some(self.tick_rate)
    }

    /// Per-axis direction towards the edge `pointer` is near or beyond:
    /// `-1`, `0`, or `1`.
    #[must_use]
    pub fn direction(&self, screen_size: Size, pointer: Point) -> Vec2 {
        let towards = |pos: f64, extent: f64| {
            if pos <= self.edge_distance {
                -1.0
            } else if pos >= extent - self.edge_distance {
                1.0
            } else {
                0.0
            }
        };
        Vec2::new(
            towards(pointer.x, screen_size.width),
            towards(pointer.y, screen_size.height),
        )
    }

    /// Content-space distance to move the viewport for one tick, or `None`
    /// when the pointer is away from every edge.
    #[must_use]
    pub fn step(&self, screen_size: Size, pointer: Point, zoom: f64) -> Option<Vec2> {
        let direction = self.direction(screen_size, pointer);
        if direction == Vec2::ZERO || zoom <= 0.0 {
            return None;
        }
        Some(direction * (self.speed / zoom))
    }
}
