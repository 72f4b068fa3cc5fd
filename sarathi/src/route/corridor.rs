//! Polyline route with a tube radius per segment.

use super::segment::{SegmentProjection, project_onto_segment};
use crate::core::Vec2;
use crate::error::RouteError;

/// Result of projecting a point onto the corridor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathProjection {
    /// Nearest point on the centerline of the chosen segment
    pub point: Vec2,
    /// Unit tangent of the chosen segment (in route order)
    pub tangent: Vec2,
    /// Signed distance to the tube boundary (negative = inside)
    pub outside: f32,
    /// Index of the chosen segment
    pub segment: usize,
}

/// Cached per-segment geometry.
#[derive(Clone, Debug)]
struct Segment {
    start: Vec2,
    end: Vec2,
    length: f32,
    tangent: Vec2,
    /// Route distance at `start`
    offset: f32,
}

/// Ordered polyline with a tube radius, optionally closed into a loop.
///
/// Segment `k` runs from waypoint `k` to waypoint `k + 1` and uses the radius
/// stored at its end waypoint. A cyclic route adds a closing segment from the
/// last waypoint back to the first, which uses `radii[0]`.
///
/// ```text
///     ┌───────── radius[2] ─────────┐
///  p0 ●━━━━━━━━━ p1 ●━━━━━━━━━━━━━━━● p2
///     └─ radius[1] ─┘
/// ```
#[derive(Clone, Debug)]
pub struct RouteCorridor {
    points: Vec<Vec2>,
    radii: Vec<f32>,
    cyclic: bool,
    segments: Vec<Segment>,
    total_length: f32,
}

impl RouteCorridor {
    /// Build a corridor, validating waypoints and radii.
    pub fn new(points: Vec<Vec2>, radii: Vec<f32>, cyclic: bool) -> Result<Self, RouteError> {
        if points.len() < 2 {
            return Err(RouteError::TooFewPoints {
                count: points.len(),
            });
        }
        if radii.len() != points.len() {
            return Err(RouteError::RadiiMismatch {
                points: points.len(),
                radii: radii.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(RouteError::NonFinitePoint { index });
        }
        for (index, &radius) in radii.iter().enumerate() {
            validate_radius(index, radius)?;
        }

        let segments = build_segments(&points, cyclic);
        let total_length = segments.iter().map(|s| s.length).sum();
        Ok(Self {
            points,
            radii,
            cyclic,
            segments,
            total_length,
        })
    }

    /// Corridor with the same radius everywhere.
    pub fn with_uniform_radius(
        points: Vec<Vec2>,
        radius: f32,
        cyclic: bool,
    ) -> Result<Self, RouteError> {
        let radii = vec![radius; points.len()];
        Self::new(points, radii, cyclic)
    }

    /// Waypoints in route order
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Radius per waypoint
    #[inline]
    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    /// Whether the route closes into a loop
    #[inline]
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// Number of segments
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total centerline length
    #[inline]
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Tube radius of segment `segment`
    #[inline]
    pub fn segment_radius(&self, segment: usize) -> f32 {
        self.radii[(segment + 1) % self.points.len()]
    }

    /// Unit tangent of segment `segment`
    #[inline]
    pub fn segment_tangent(&self, segment: usize) -> Vec2 {
        self.segments[segment].tangent
    }

    /// Endpoints of segment `segment`
    #[inline]
    pub fn segment_endpoints(&self, segment: usize) -> (Vec2, Vec2) {
        let s = &self.segments[segment];
        (s.start, s.end)
    }

    /// Replace the radius stored at waypoint `index`.
    pub fn set_radius(&mut self, index: usize, radius: f32) -> Result<(), RouteError> {
        if index >= self.radii.len() {
            return Err(RouteError::IndexOutOfRange {
                index,
                count: self.radii.len(),
            });
        }
        validate_radius(index, radius)?;
        self.radii[index] = radius;
        Ok(())
    }

    fn project_segment(&self, point: Vec2, segment: usize) -> SegmentProjection {
        let s = &self.segments[segment];
        project_onto_segment(point, s.start, s.end)
    }

    /// Project onto the segment whose tube boundary is nearest.
    ///
    /// Segments are ranked by outsideness (distance minus radius), so a
    /// wide segment can win over a geometrically closer narrow one.
    pub fn project_to_path(&self, point: Vec2) -> PathProjection {
        let mut best = PathProjection {
            point: self.segments[0].start,
            tangent: self.segments[0].tangent,
            outside: f32::MAX,
            segment: 0,
        };

        for k in 0..self.segments.len() {
            let projection = self.project_segment(point, k);
            let outside = projection.distance - self.segment_radius(k);
            if outside < best.outside {
                best = PathProjection {
                    point: projection.point,
                    tangent: self.segments[k].tangent,
                    outside,
                    segment: k,
                };
            }
        }
        best
    }

    /// Segment with the smallest raw distance to `point`.
    pub fn nearest_segment_index(&self, point: Vec2) -> usize {
        let mut best = 0;
        let mut best_distance = f32::MAX;
        for k in 0..self.segments.len() {
            let d = self.project_segment(point, k).distance;
            if d < best_distance {
                best_distance = d;
                best = k;
            }
        }
        best
    }

    /// Signed distance outside the tube (negative = inside)
    #[inline]
    pub fn distance_outside_path(&self, point: Vec2) -> f32 {
        self.project_to_path(point).outside
    }

    /// True if `point` lies strictly inside the tube
    #[inline]
    pub fn is_inside_path(&self, point: Vec2) -> bool {
        self.distance_outside_path(point) < 0.0
    }

    /// True if `point` lies inside the tube of one particular segment
    pub fn is_inside_segment(&self, point: Vec2, segment: usize) -> bool {
        self.project_segment(point, segment).distance < self.segment_radius(segment)
    }

    /// Tangent of the corridor at `point`
    #[inline]
    pub fn tangent_at(&self, point: Vec2) -> Vec2 {
        self.project_to_path(point).tangent
    }

    /// Tangent in travel direction (`direction` is +1 or -1).
    ///
    /// When `point` is already inside the tube of the next segment in that
    /// direction, that segment's tangent is used so headings switch early at
    /// waypoints.
    pub fn tangent_at_in_direction(&self, point: Vec2, direction: i32) -> Vec2 {
        let mut segment = self.nearest_segment_index(point);
        if let Some(next) = self.next_segment(segment, direction)
            && self.is_inside_segment(point, next)
        {
            segment = next;
        }
        self.segments[segment].tangent * direction_sign(direction)
    }

    /// Neighbouring segment in `direction`, wrapping on cyclic routes.
    pub fn next_segment(&self, segment: usize, direction: i32) -> Option<usize> {
        let count = self.segments.len() as i64;
        let next = segment as i64 + i64::from(direction.signum());
        if self.cyclic {
            Some(next.rem_euclid(count) as usize)
        } else if (0..count).contains(&next) {
            Some(next as usize)
        } else {
            None
        }
    }

    /// True if `point` is within the larger adjacent radius of a waypoint
    /// joining two segments.
    pub fn near_waypoint(&self, point: Vec2) -> bool {
        let n = self.points.len();
        let corners = if self.cyclic { 0..n } else { 1..n - 1 };

        for waypoint in corners {
            let incoming = (waypoint + self.segments.len() - 1) % self.segments.len();
            let radius = self
                .segment_radius(incoming)
                .max(self.segment_radius(waypoint % self.segments.len()));
            if point.distance(self.points[waypoint]) < radius {
                return true;
            }
        }
        false
    }

    /// Dot product of two segments' tangents
    #[inline]
    pub fn dot_segment_tangents(&self, a: usize, b: usize) -> f32 {
        self.segments[a].tangent.dot(self.segments[b].tangent)
    }

    /// Route distance of the centerline point nearest to `point`.
    pub fn path_distance(&self, point: Vec2) -> f32 {
        let segment = self.nearest_segment_index(point);
        self.segments[segment].offset + self.project_segment(point, segment).along
    }

    /// Centerline point at route distance `distance`.
    ///
    /// Cyclic routes wrap; open routes clamp to their ends.
    pub fn point_at_path_distance(&self, distance: f32) -> Vec2 {
        let mut remaining = distance;
        if self.cyclic && self.total_length > 0.0 {
            remaining = remaining.rem_euclid(self.total_length);
        } else if remaining <= 0.0 {
            return self.points[0];
        } else if remaining >= self.total_length {
            return self.segments[self.segments.len() - 1].end;
        }

        for segment in &self.segments {
            if remaining <= segment.length {
                if segment.length == 0.0 {
                    return segment.start;
                }
                return segment
                    .start
                    .lerp(segment.end, remaining / segment.length);
            }
            remaining -= segment.length;
        }
        self.segments[self.segments.len() - 1].end
    }
}

fn validate_radius(index: usize, radius: f32) -> Result<(), RouteError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(RouteError::InvalidRadius { index, radius })
    }
}

#[inline]
fn direction_sign(direction: i32) -> f32 {
    if direction < 0 { -1.0 } else { 1.0 }
}

fn build_segments(points: &[Vec2], cyclic: bool) -> Vec<Segment> {
    let n = points.len();
    let count = if cyclic { n } else { n - 1 };

    let raw: Vec<(Vec2, Vec2, f32, Option<Vec2>)> = (0..count)
        .map(|k| {
            let start = points[k];
            let end = points[(k + 1) % n];
            let length = start.distance(end);
            let tangent = (length > 0.0).then(|| (end - start) / length);
            (start, end, length, tangent)
        })
        .collect();

    // Zero-length segments borrow the tangent of the nearest real neighbour
    let inherited = |k: usize| -> Vec2 {
        let before = raw[..k].iter().rev().find_map(|s| s.3);
        let after = raw[k + 1..].iter().find_map(|s| s.3);
        before.or(after).unwrap_or(Vec2::UNIT_X)
    };

    let mut offset = 0.0;
    let mut segments = Vec::with_capacity(count);
    for (k, &(start, end, length, tangent)) in raw.iter().enumerate() {
        segments.push(Segment {
            start,
            end,
            length,
            tangent: tangent.unwrap_or_else(|| inherited(k)),
            offset,
        });
        offset += length;
    }
    segments
}
