//! Pure point-to-segment projection.

use crate::core::Vec2;

/// Nearest point on a segment to a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentProjection {
    /// Closest point on the segment
    pub point: Vec2,
    /// Distance from the query point to `point`
    pub distance: f32,
    /// Distance of `point` from the segment start
    pub along: f32,
}

/// Project `point` onto the segment `start → end`.
///
/// Zero-length segments behave as the point `start`.
pub fn project_onto_segment(point: Vec2, start: Vec2, end: Vec2) -> SegmentProjection {
    let delta = end - start;
    let length = delta.length();
    if length == 0.0 {
        return SegmentProjection {
            point: start,
            distance: point.distance(start),
            along: 0.0,
        };
    }

    let unit = delta / length;
    let along = (point - start).dot(unit).clamp(0.0, length);
    let nearest = start + unit * along;
    SegmentProjection {
        point: nearest,
        distance: point.distance(nearest),
        along,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_interior() {
        let p = project_onto_segment(Vec2::new(3.0, 4.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert_eq!(p.point, Vec2::new(3.0, 0.0));
        assert_relative_eq!(p.distance, 4.0);
        assert_relative_eq!(p.along, 3.0);
    }

    #[test]
    fn test_projection_clamps_to_ends() {
        let start = Vec2::ZERO;
        let end = Vec2::new(10.0, 0.0);

        let before = project_onto_segment(Vec2::new(-3.0, 4.0), start, end);
        assert_eq!(before.point, start);
        assert_relative_eq!(before.distance, 5.0);

        let after = project_onto_segment(Vec2::new(13.0, -4.0), start, end);
        assert_eq!(after.point, end);
        assert_relative_eq!(after.along, 10.0);
    }

    #[test]
    fn test_zero_length_segment() {
        let p = project_onto_segment(Vec2::new(0.0, 2.0), Vec2::UNIT_X, Vec2::UNIT_X);
        assert_eq!(p.point, Vec2::UNIT_X);
        assert_relative_eq!(p.distance, 5.0_f32.sqrt());
        assert!(p.distance.is_finite());
    }
}
