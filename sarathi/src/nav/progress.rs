//! Progress tracking for stuck-cycle detection.
//!
//! A slowly blended copy of the vehicle position trails behind a vehicle
//! that makes progress down the route. When the vehicle circles in place
//! the trailing position catches up.

use crate::core::Vec2;
use crate::core::math::blend_vec_into_accumulator;

/// Blend rate of the trailing position per second
const TRAIL_RATE: f32 = 0.06;

/// Distance behind the vehicle the trail restarts at
const RESTART_OFFSET: f32 = 80.0;

/// Trail distance below which the vehicle is considered circling
const CIRCLING_DISTANCE: f32 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressMonitor {
    smoothed_position: Vec2,
}

impl ProgressMonitor {
    /// Monitor whose trail starts well behind `position`.
    pub fn new(position: Vec2, forward: Vec2) -> Self {
        let mut monitor = Self::default();
        monitor.restart(position, forward);
        monitor
    }

    /// Put the trail behind the vehicle again (after spawn or teleport).
    pub fn restart(&mut self, position: Vec2, forward: Vec2) {
        self.smoothed_position = position - forward * RESTART_OFFSET;
    }

    /// Blend the trail toward the current position.
    pub fn update(&mut self, position: Vec2, dt: f32) {
        blend_vec_into_accumulator(dt * TRAIL_RATE, position, &mut self.smoothed_position);
    }

    /// Trailing position
    pub fn smoothed_position(&self) -> Vec2 {
        self.smoothed_position
    }

    /// True when the trail has caught up with `position`.
    pub fn going_in_circles(&self, position: Vec2) -> bool {
        self.smoothed_position.distance(position) < CIRCLING_DISTANCE
    }
}
