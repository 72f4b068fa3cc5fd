//! Navigator configuration.
//!
//! # Modes
//!
//! | Preset | Prediction | Smoothing | Notes |
//! |--------|------------|-----------|-------|
//! | [`NavigatorConfig::curved`] | arcs about the turning center | incremental | default |
//! | [`NavigatorConfig::linear`] | straight rays | none | cheaper, brakes earlier |
//!
//! Derived quantities (look-ahead times, safety radius, curvature limits)
//! are computed here so every stage of the tick agrees on them.

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::math::lerp;
use crate::error::ConfigError;

/// Configuration for a [`Navigator`](super::Navigator).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Predict motion along the current curvature arc instead of straight lines.
    ///
    /// Default: true
    #[serde(default = "defaults::enabled")]
    pub curved_steering: bool,

    /// Low-pass filter steering requests across ticks.
    ///
    /// Default: true
    #[serde(default = "defaults::enabled")]
    pub incremental_steering: bool,

    /// Half of the vehicle body width (meters).
    ///
    /// Default: 1.0
    #[serde(default = "defaults::half_width")]
    pub half_width: f32,

    /// Half of the vehicle body length (meters).
    ///
    /// Default: 1.5
    #[serde(default = "defaults::half_length")]
    pub half_length: f32,

    /// Tightest turn the vehicle may take (meters).
    ///
    /// Default: 5.0
    #[serde(default = "defaults::min_turning_radius")]
    pub min_turning_radius: f32,

    /// Base prediction horizon (seconds).
    ///
    /// Default: 3.0
    #[serde(default = "defaults::base_look_ahead_time")]
    pub base_look_ahead_time: f32,

    /// Direction of travel along the route: +1 follows waypoint order,
    /// -1 runs it backwards.
    ///
    /// Default: 1
    #[serde(default = "defaults::path_follow_direction")]
    pub path_follow_direction: i32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self::curved()
    }
}

impl NavigatorConfig {
    /// Curvature-aware prediction with incremental steering.
    pub fn curved() -> Self {
        Self {
            curved_steering: true,
            incremental_steering: true,
            half_width: defaults::half_width(),
            half_length: defaults::half_length(),
            min_turning_radius: defaults::min_turning_radius(),
            base_look_ahead_time: defaults::base_look_ahead_time(),
            path_follow_direction: defaults::path_follow_direction(),
        }
    }

    /// Straight-line prediction, steering applied as requested.
    pub fn linear() -> Self {
        Self {
            curved_steering: false,
            incremental_steering: false,
            ..Self::curved()
        }
    }

    /// Check ranges. Called once when a navigator is built from a file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {v}")))
            }
        };
        positive("half_width", self.half_width)?;
        positive("half_length", self.half_length)?;
        positive("min_turning_radius", self.min_turning_radius)?;
        positive("base_look_ahead_time", self.base_look_ahead_time)?;
        if self.path_follow_direction != 1 && self.path_follow_direction != -1 {
            return Err(ConfigError::Invalid(format!(
                "path_follow_direction must be 1 or -1, got {}",
                self.path_follow_direction
            )));
        }
        Ok(())
    }

    /// Radius of the lane fan swept by obstacle scans. Grows with speed
    /// in curved mode.
    pub fn safety_radius(&self, relative_speed: f32) -> f32 {
        let body = self.half_width.hypot(self.half_length);
        if self.curved_steering {
            body + lerp(relative_speed, 0.0, 1.5)
        } else {
            body
        }
    }

    /// Curvature of the tightest allowed turn
    #[inline]
    pub fn max_curvature(&self) -> f32 {
        1.0 / self.min_turning_radius
    }

    /// Curvature above which avoidance forces a widening turn
    #[inline]
    pub fn avoidance_curvature_limit(&self) -> f32 {
        1.0 / (self.min_turning_radius * 1.2)
    }

    /// Curvature above which the turning-radius limiter engages
    #[inline]
    pub fn turning_curvature_limit(&self) -> f32 {
        1.0 / (self.min_turning_radius * 1.1)
    }

    /// Braking rate applied while stuck or about to collide
    #[inline]
    pub fn braking_rate(&self) -> f32 {
        if self.curved_steering { 3.0 } else { 2.0 }
    }

    /// Outward slope of the wing scans, narrowing with speed
    #[inline]
    pub fn wing_slope(&self, relative_speed: f32) -> f32 {
        let slow = if self.curved_steering { 0.3 } else { 0.35 };
        lerp(relative_speed, slow, 0.06)
    }

    /// Horizon for obstacle avoidance scans (seconds)
    pub fn obstacle_look_ahead_time(&self, speed: f32, relative_speed: f32) -> f32 {
        let scale = if self.curved_steering {
            lerp(relative_speed, 0.4, 0.7)
        } else {
            0.66
        };
        combined_look_ahead_time(speed, self.base_look_ahead_time * scale, 3.0)
    }

    /// Horizon for path following prediction (seconds)
    pub fn path_look_ahead_time(&self, speed: f32) -> f32 {
        combined_look_ahead_time(speed, self.base_look_ahead_time, 3.0)
    }

    /// Horizon for the short imminent-collision scan (seconds)
    pub fn imminent_look_ahead_time(&self, speed: f32) -> f32 {
        if self.curved_steering {
            combined_look_ahead_time(speed, 0.75, 2.0)
        } else {
            combined_look_ahead_time(speed, 1.3, 2.5)
        }
    }
}

/// Horizon that covers at least `min_time` seconds and `min_distance`
/// meters at `speed`. Zero when stopped.
#[inline]
pub fn combined_look_ahead_time(speed: f32, min_time: f32, min_distance: f32) -> f32 {
    if speed == 0.0 {
        0.0
    } else {
        min_time.max(min_distance / speed)
    }
}
