//! Per-tick motion snapshot and curvature geometry.
//!
//! The turning center sits on the vehicle's side axis at the signed turning
//! radius. Positive curvature turns left:
//!
//! ```text
//!                 ● center = position + side / κ
//!                 │
//!                 │ R = 1/κ
//!                 │
//!     ────────────▲──────▶ forward
//!              position
//! ```

use super::vehicle::Kinematics;
use crate::core::math::sign_of;
use crate::core::{LocalSpace, Vec2};

/// Smallest curvature magnitude used when taking a reciprocal.
pub const MIN_CURVATURE: f32 = 1.0 / 100_000.0;

/// Arc-length cap for avoidance scans, as a fraction of the circumference.
pub const AVOIDANCE_ARC_FRACTION: f32 = 1.0 / 6.0;

/// Arc-length cap for motion prediction, as a fraction of the circumference.
pub const PREDICTION_ARC_FRACTION: f32 = 1.0 / 4.0;

/// Curvature clamped away from zero, keeping its sign.
#[inline]
pub fn non_zero_curvature(curvature: f32) -> f32 {
    if curvature.abs() < MIN_CURVATURE {
        MIN_CURVATURE * sign_of(curvature)
    } else {
        curvature
    }
}

/// Copy of the vehicle's kinematics taken at the start of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    /// World position
    pub position: Vec2,
    /// Unit heading
    pub forward: Vec2,
    /// Unit left vector
    pub side: Vec2,
    /// Scalar speed
    pub speed: f32,
    /// Speed limit
    pub max_speed: f32,
    /// Steering force limit
    pub max_force: f32,
    /// Signed curvature
    pub curvature: f32,
}

impl Motion {
    /// Snapshot any kinematic source.
    pub fn of<K: Kinematics + ?Sized>(vehicle: &K) -> Self {
        Self {
            position: vehicle.position(),
            forward: vehicle.forward(),
            side: vehicle.side(),
            speed: vehicle.speed(),
            max_speed: vehicle.max_speed(),
            max_force: vehicle.max_force(),
            curvature: vehicle.curvature(),
        }
    }

    /// Velocity vector
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.forward * self.speed
    }

    /// Speed as a fraction of the limit
    #[inline]
    pub fn relative_speed(&self) -> f32 {
        if self.max_speed > 0.0 {
            self.speed / self.max_speed
        } else {
            0.0
        }
    }

    /// Vehicle frame
    #[inline]
    pub fn local_space(&self) -> LocalSpace {
        LocalSpace {
            position: self.position,
            forward: self.forward,
            side: self.side,
        }
    }

    /// Circle implied by the current curvature
    #[inline]
    pub fn turn_circle(&self) -> TurnCircle {
        TurnCircle::new(self.position, self.side, self.curvature)
    }

    /// Where the vehicle will be after `time` seconds.
    ///
    /// Curved prediction follows the turn circle for at most a quarter turn;
    /// straight prediction extrapolates the velocity. Zero speed predicts
    /// the current position.
    pub fn predict_position(&self, time: f32, curved: bool) -> Vec2 {
        if curved {
            let circle = self.turn_circle();
            let angle = circle.arc_angle(self.speed * time, PREDICTION_ARC_FRACTION);
            circle.rotate_about_center(self.position, angle)
        } else {
            self.position + self.velocity() * time
        }
    }
}

/// Instantaneous turning circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnCircle {
    /// Center of curvature
    pub center: Vec2,
    /// Turning radius, positive for left turns
    pub signed_radius: f32,
}

impl TurnCircle {
    /// Circle for a vehicle at `position` with left vector `side`.
    pub fn new(position: Vec2, side: Vec2, curvature: f32) -> Self {
        let signed_radius = 1.0 / non_zero_curvature(curvature);
        Self {
            center: position + side * signed_radius,
            signed_radius,
        }
    }

    /// Unsigned radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.signed_radius.abs()
    }

    /// Full circumference
    #[inline]
    pub fn circumference(&self) -> f32 {
        std::f32::consts::TAU * self.radius()
    }

    /// +1 when turning left, -1 when turning right
    #[inline]
    pub fn turn_sign(&self) -> f32 {
        sign_of(self.signed_radius)
    }

    /// Rotation angle that moves `arc_length` forward along the circle,
    /// with the length capped at `max_fraction` of the circumference.
    #[inline]
    pub fn arc_angle(&self, arc_length: f32, max_fraction: f32) -> f32 {
        let limit = self.circumference() * max_fraction;
        arc_length.clamp(-limit, limit) / self.signed_radius
    }

    /// Rotate a point about the center
    #[inline]
    pub fn rotate_about_center(&self, point: Vec2, angle: f32) -> Vec2 {
        self.center + (point - self.center).rotate(angle)
    }

    /// Lateral direction pointing away from the center, given the
    /// vehicle's left vector.
    #[inline]
    pub fn away_from_center(&self, side: Vec2) -> Vec2 {
        side * -self.turn_sign()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn motion(speed: f32, curvature: f32) -> Motion {
        Motion {
            position: Vec2::ZERO,
            forward: Vec2::UNIT_X,
            side: Vec2::UNIT_Y,
            speed,
            max_speed: 20.0,
            max_force: 8.0,
            curvature,
        }
    }

    #[test]
    fn test_non_zero_curvature() {
        assert_eq!(non_zero_curvature(0.0), MIN_CURVATURE);
        assert_eq!(non_zero_curvature(-1e-9), -MIN_CURVATURE);
        assert_eq!(non_zero_curvature(0.2), 0.2);
    }

    #[test]
    fn test_turn_circle_center() {
        let left = motion(10.0, 0.1).turn_circle();
        assert_relative_eq!(left.center.y, 10.0, epsilon = 1e-4);
        assert_eq!(left.turn_sign(), 1.0);
        assert_eq!(left.away_from_center(Vec2::UNIT_Y), -Vec2::UNIT_Y);

        let right = motion(10.0, -0.1).turn_circle();
        assert_relative_eq!(right.center.y, -10.0, epsilon = 1e-4);
        assert_eq!(right.away_from_center(Vec2::UNIT_Y), Vec2::UNIT_Y);
    }

    #[test]
    fn test_arc_angle_is_capped() {
        let circle = motion(10.0, 0.1).turn_circle();
        // Circumference 20π, quarter = 5π
        assert_relative_eq!(circle.arc_angle(1.0, 0.25), 0.1, epsilon = 1e-5);
        assert_relative_eq!(circle.arc_angle(1000.0, 0.25), FRAC_PI_2, epsilon = 1e-4);
    }

    #[test]
    fn test_curved_prediction_turns_left() {
        // Quarter of a 10 m circle is 5π ≈ 15.7 m
        let m = motion(10.0, 0.1);
        let p = m.predict_position(10.0, true);
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-3);
        assert_relative_eq!(p.y, 10.0, epsilon = 1e-3);

        let straight = m.predict_position(2.0, false);
        assert_eq!(straight, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_prediction_at_rest_is_identity() {
        let m = motion(0.0, 0.0);
        assert_eq!(m.predict_position(3.0, false), Vec2::ZERO);
        let p = m.predict_position(3.0, true);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-2);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-2);
    }

    #[test]
    fn test_right_turn_prediction() {
        let m = motion(10.0, -0.1);
        let p = m.predict_position(10.0, true);
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-3);
        assert_relative_eq!(p.y, -10.0, epsilon = 1e-3);
    }
}
