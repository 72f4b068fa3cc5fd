//! Scalar helpers for interpolation, clipping and exponential smoothing.

use super::Vec2;

/// Linear interpolation: `a` at `t = 0`, `b` at `t = 1`.
///
/// # Example
/// ```
/// use sarathi::core::math::lerp;
///
/// assert_eq!(lerp(0.5, 2.0, 4.0), 3.0);
/// assert_eq!(lerp(0.0, 0.4, 0.7), 0.4);
/// ```
#[inline]
pub fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp a value to a range.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Linearly remap `value` from `[in_min, in_max]` to `[out_min, out_max]`.
#[inline]
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}

/// Exponential smoothing step for scalars.
///
/// Moves `accumulator` toward `new_value` by `rate` clipped to `[0, 1]`.
/// A rate of zero (paused tick) leaves the accumulator unchanged.
#[inline]
pub fn blend_into_accumulator(rate: f32, new_value: f32, accumulator: &mut f32) {
    *accumulator = lerp(clamp(rate, 0.0, 1.0), *accumulator, new_value);
}

/// Exponential smoothing step for vectors.
#[inline]
pub fn blend_vec_into_accumulator(rate: f32, new_value: Vec2, accumulator: &mut Vec2) {
    let t = clamp(rate, 0.0, 1.0);
    *accumulator = accumulator.lerp(new_value, t);
}

/// Sign as ±1.0, treating zero as positive.
#[inline]
pub fn sign_of(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_and_clamp() {
        assert_relative_eq!(lerp(0.25, 0.0, 8.0), 2.0);
        assert_relative_eq!(clamp(1.5, 0.0, 1.0), 1.0);
        assert_relative_eq!(clamp(-1.5, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_remap() {
        assert_relative_eq!(remap(0.0, -100.0, 100.0, 0.0, 200.0), 100.0);
        assert_relative_eq!(remap(5.0, 5.0, 5.0, 1.0, 2.0), 1.0);
    }

    #[test]
    fn test_blend_clips_rate() {
        let mut acc = 0.0;
        blend_into_accumulator(0.5, 10.0, &mut acc);
        assert_relative_eq!(acc, 5.0);

        blend_into_accumulator(4.0, 10.0, &mut acc);
        assert_relative_eq!(acc, 10.0);

        blend_into_accumulator(0.0, -10.0, &mut acc);
        assert_relative_eq!(acc, 10.0);
    }

    #[test]
    fn test_blend_vec() {
        let mut acc = Vec2::ZERO;
        blend_vec_into_accumulator(0.25, Vec2::new(4.0, -8.0), &mut acc);
        assert_relative_eq!(acc.x, 1.0);
        assert_relative_eq!(acc.y, -2.0);
    }
}
