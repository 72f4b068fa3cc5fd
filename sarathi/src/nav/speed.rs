//! Target speed shaping.

use super::motion::Motion;
use crate::core::Vec2;
use crate::core::math::{clamp, lerp};

/// Relative speed floor when facing away from the path
const HEADING_SPEED_FLOOR: f32 = 0.2;

/// Relative speed at the tightest turn
const CURVE_SPEED_FLOOR: f32 = 0.1;

/// Full throttle when straight, down to 10% at `max_curvature`.
#[inline]
pub fn curve_speed_factor(curvature: f32, max_curvature: f32) -> f32 {
    let relative = if max_curvature > 0.0 {
        clamp(curvature.abs() / max_curvature, 0.0, 1.0).sqrt()
    } else {
        1.0
    };
    lerp(relative, 1.0, CURVE_SPEED_FLOOR)
}

/// Relative speed allowed for a given alignment with the path heading.
#[inline]
pub fn heading_speed_factor(alignment: f32) -> f32 {
    if alignment < 0.0 {
        HEADING_SPEED_FLOOR
    } else {
        lerp(alignment, HEADING_SPEED_FLOOR, 1.0)
    }
}

/// Speed limit for the current curvature and, when following a route,
/// the current path heading.
pub fn max_speed_for_curvature(motion: &Motion, max_curvature: f32, path_heading: Option<Vec2>) -> f32 {
    let curve = curve_speed_factor(motion.curvature, max_curvature);
    let relative = match path_heading {
        Some(heading) => curve.min(heading_speed_factor(heading.dot(motion.forward))),
        None => curve,
    };
    motion.max_speed * relative
}

/// Longitudinal force toward `target_speed`, bounded by the force limit.
#[inline]
pub fn steer_for_target_speed(motion: &Motion, target_speed: f32) -> Vec2 {
    let error = target_speed - motion.speed;
    motion.forward * clamp(error, -motion.max_force, motion.max_force)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

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
    fn test_curve_speed_factor_is_monotonic() {
        let max_curvature = 0.2;
        let mut last = f32::MAX;
        for step in 0..=40 {
            let k = step as f32 * 0.01;
            let factor = curve_speed_factor(k, max_curvature);
            assert!(factor <= last, "factor rose at curvature {k}");
            last = factor;
        }
        assert_eq!(curve_speed_factor(0.0, max_curvature), 1.0);
        assert_relative_eq!(curve_speed_factor(0.4, max_curvature), 0.1);
        assert_relative_eq!(curve_speed_factor(-0.2, max_curvature), 0.1);
    }

    #[test]
    fn test_heading_speed_factor() {
        assert_eq!(heading_speed_factor(-0.5), 0.2);
        assert_eq!(heading_speed_factor(1.0), 1.0);
        assert_relative_eq!(heading_speed_factor(0.5), 0.6);
    }

    #[test]
    fn test_max_speed_takes_the_tighter_limit() {
        let m = motion(10.0, 0.0);
        assert_eq!(max_speed_for_curvature(&m, 0.2, None), 20.0);
        let sideways = Some(Vec2::UNIT_Y);
        assert_relative_eq!(max_speed_for_curvature(&m, 0.2, sideways), 4.0);

        // Curvature limit dominates when aligned
        let turning = motion(10.0, 0.05);
        let limit = max_speed_for_curvature(&turning, 0.2, Some(Vec2::UNIT_X));
        assert_relative_eq!(limit, 20.0 * lerp(0.5, 1.0, 0.1), epsilon = 1e-4);
    }

    #[test]
    fn test_target_speed_force_is_clamped() {
        let m = motion(10.0, 0.0);
        assert_eq!(steer_for_target_speed(&m, 12.0), Vec2::new(2.0, 0.0));
        assert_eq!(steer_for_target_speed(&m, 0.0), Vec2::new(-8.0, 0.0));
        assert_eq!(steer_for_target_speed(&m, 40.0), Vec2::new(8.0, 0.0));
    }
}
