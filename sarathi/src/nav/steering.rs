//! Steering primitives, turning-radius limiting and incremental smoothing.

use super::motion::Motion;
use crate::core::Vec2;
use crate::core::math::blend_vec_into_accumulator;

/// Full-force steering toward a unit heading.
#[inline]
pub fn steer_toward_heading(motion: &Motion, heading: Vec2) -> Vec2 {
    (heading - motion.forward).normalize() * motion.max_force
}

/// Seek force toward `target` (desired velocity minus current velocity).
#[inline]
pub fn steer_for_seek(motion: &Motion, target: Vec2) -> Vec2 {
    (target - motion.position) - motion.velocity()
}

/// Widen the turn when turning tighter than `limit_curvature` allows.
///
/// The lateral part of the request is replaced by a full-force push away
/// from the turning center; the thrust part is kept but capped.
pub fn limit_turning_radius(motion: &Motion, steering: Vec2, limit_curvature: f32) -> Vec2 {
    if motion.curvature.abs() <= limit_curvature {
        return steering;
    }
    let thrust = steering
        .parallel_component(motion.forward)
        .truncate_length(motion.max_force);
    let widen = motion.turn_circle().away_from_center(motion.side) * motion.max_force;
    thrust + widen
}

/// Map a linear steering request onto the current turning circle.
///
/// The forward part of the request becomes arc length along the circle;
/// the outward part changes the circle's radius. The result is the offset
/// from the vehicle to the curved image of the request.
pub fn linear_to_curved(motion: &Motion, linear: Vec2) -> Vec2 {
    let trimmed = linear.truncate_length(motion.max_force);
    let circle = motion.turn_circle();
    let signed_radius = circle.signed_radius;
    let turn = circle.turn_sign();
    let radius = circle.radius();

    let outward = circle.away_from_center(motion.side);
    let radius_change = trimmed.dot(outward);
    let angle = trimmed.dot(motion.forward) / signed_radius;

    // Vehicle frame: center at side * signed_radius, spoke rotated by angle
    // and scaled by (radius + radius_change) / radius.
    let half = 0.5 * angle;
    let along = turn * (radius + radius_change) * angle.sin();
    let across = 2.0 * signed_radius * half.sin() * half.sin() - turn * radius_change * angle.cos();
    motion.forward * along + motion.side * across
}

/// Low-pass filter turning absolute steering requests into incremental
/// changes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SteeringSmoother {
    accumulated: Vec2,
}

impl SteeringSmoother {
    /// Blend rate per second
    pub const RATE: f32 = 8.0;

    /// Fresh smoother with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one request and return the smoothed steering.
    ///
    /// In curved mode the request is first mapped onto the turning circle.
    /// A zero `dt` leaves the accumulator unchanged.
    pub fn smooth(&mut self, motion: &Motion, raw: Vec2, dt: f32, curved: bool) -> Vec2 {
        let target = if curved {
            linear_to_curved(motion, raw)
        } else {
            raw
        };
        blend_vec_into_accumulator(dt * Self::RATE, target, &mut self.accumulated);
        self.accumulated
    }

    /// Forget all history
    pub fn reset(&mut self) {
        self.accumulated = Vec2::ZERO;
    }

    /// Current accumulator value
    pub fn accumulated(&self) -> Vec2 {
        self.accumulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn motion(speed: f32, curvature: f32) -> Motion {
        Motion {
            position: Vec2::new(3.0, -2.0),
            forward: Vec2::UNIT_X,
            side: Vec2::UNIT_Y,
            speed,
            max_speed: 20.0,
            max_force: 8.0,
            curvature,
        }
    }

    #[test]
    fn test_steer_toward_heading() {
        let m = motion(5.0, 0.0);
        let s = steer_toward_heading(&m, Vec2::UNIT_Y);
        assert_relative_eq!(s.length(), 8.0, epsilon = 1e-5);
        assert!(s.y > 0.0 && s.x < 0.0);
    }

    #[test]
    fn test_seek_subtracts_velocity() {
        let m = motion(5.0, 0.0);
        let s = steer_for_seek(&m, Vec2::new(13.0, -2.0));
        assert_eq!(s, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_limiter_passes_through_within_limit() {
        let m = motion(10.0, 0.1);
        let steering = Vec2::new(3.0, 4.0);
        assert_eq!(limit_turning_radius(&m, steering, 1.0 / 5.5), steering);
    }

    #[test]
    fn test_limiter_widens_tight_turns() {
        // Tight left turn: push right, keep thrust
        let m = motion(10.0, 0.19);
        let out = limit_turning_radius(&m, Vec2::new(20.0, 6.0), 1.0 / 5.5);
        assert_relative_eq!(out.x, 8.0);
        assert_relative_eq!(out.y, -8.0);

        let m = motion(10.0, -0.19);
        let out = limit_turning_radius(&m, Vec2::new(-2.0, -6.0), 1.0 / 5.5);
        assert_relative_eq!(out.x, -2.0);
        assert_relative_eq!(out.y, 8.0);
        // Lateral part never exceeds the force limit
        assert!(out.perpendicular_component(m.forward).length() <= m.max_force + 1e-5);
    }

    #[test]
    fn test_linear_to_curved_straight_is_identity() {
        let m = motion(10.0, 0.0);
        let out = linear_to_curved(&m, Vec2::new(3.0, -2.0));
        assert_relative_eq!(out.x, 3.0, epsilon = 1e-3);
        assert_relative_eq!(out.y, -2.0, epsilon = 1e-3);

        // Requests beyond the force limit are trimmed first
        let out = linear_to_curved(&m, Vec2::new(80.0, 0.0));
        assert_relative_eq!(out.length(), 8.0, epsilon = 1e-3);
    }

    #[test]
    fn test_linear_to_curved_follows_the_circle() {
        // 8 m of arc on a radius 5 left turn
        let m = motion(10.0, 0.2);
        let out = linear_to_curved(&m, Vec2::new(8.0, 0.0));
        let angle = 8.0 / 5.0_f32;
        assert_relative_eq!(out.x, 5.0 * angle.sin(), epsilon = 1e-4);
        assert_relative_eq!(out.y, 5.0 * (1.0 - angle.cos()), epsilon = 1e-4);

        // Outward request on a right turn grows the radius (moves left)
        let m = motion(10.0, -0.2);
        let out = linear_to_curved(&m, Vec2::new(0.0, 2.0));
        assert_relative_eq!(out.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(out.y, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_smoother_blends_and_resets() {
        let m = motion(10.0, 0.0);
        let mut smoother = SteeringSmoother::new();
        let out = smoother.smooth(&m, Vec2::new(8.0, 0.0), 0.05, false);
        assert_relative_eq!(out.x, 3.2, epsilon = 1e-5);

        // Zero dt keeps the accumulator
        let held = smoother.smooth(&m, Vec2::ZERO, 0.0, false);
        assert_eq!(held, out);

        smoother.reset();
        assert_eq!(smoother.accumulated(), Vec2::ZERO);
    }
}
