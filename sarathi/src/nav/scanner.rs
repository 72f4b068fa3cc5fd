//! Obstacle scanning ahead of the vehicle.
//!
//! ## Lane fan
//!
//! Parallel lanes are cast at half-spacing offsets out to the safety
//! radius on both sides. Four wing scans per side fan outward from the
//! outermost lane:
//!
//! ```text
//!                         ╱ WL (4 wings)
//!                      ╱╱
//!   ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─   L lanes
//!   ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─
//!   ●━━━━━━━━━━━━━━━━━━━━━━━━━▶  forward · max_forward
//!   ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─
//!   ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─   R lanes
//!                      ╲╲
//!                         ╲ WR
//! ```
//!
//! In curved mode every lane and wing becomes an arc about the turning
//! center, capped at a sixth of the circle. Arc hits are measured by
//! distance along the arc, in spacing units.

use super::motion::{AVOIDANCE_ARC_FRACTION, Motion};
use crate::annotation::{AnnotationSink, Color};
use crate::core::Vec2;
use crate::core::math::lerp;
use crate::grid::{ArcHit, OccupancyGrid};

/// Reach reported for a lane with no hit.
pub const NO_HIT: f32 = 9999.0;

/// Number of wing scans per side
const WING_COUNT: usize = 4;

/// How close the nearest obstacle is to the scanned corridor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanContact {
    /// No lane hit anything
    #[default]
    Clear,
    /// Hits only in the outermost lane, wings not both blocked
    Scraping,
    /// Obstacle inside the corridor
    Blocked,
}

/// Scan parameters derived from configuration and speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanParams {
    /// Prediction horizon (seconds)
    pub horizon: f32,
    /// Lateral extent of the lane fan
    pub radius: f32,
    /// Outward slope of the wings
    pub wing_slope: f32,
    /// Use arcs instead of rays
    pub curved: bool,
}

/// Nearest hits of one avoidance scan, in units of the scan spacing.
///
/// Straight lanes report the 1-based sample index. Arcs report the hit
/// distance along the arc divided by the spacing, so both modes compare
/// against `max_samples` the same way.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObstacleScan {
    /// Nearest hit among left lanes
    pub left: Option<usize>,
    /// Nearest hit among right lanes
    pub right: Option<usize>,
    /// Nearest hit among left wings
    pub wing_left: Option<usize>,
    /// Nearest hit among right wings
    pub wing_right: Option<usize>,
    /// Samples per lane (the full scan range)
    pub max_samples: usize,
    /// World position of the nearest lane hit
    pub nearest_obstacle: Option<Vec2>,
    /// Contact classification
    pub contact: ScanContact,
}

impl ObstacleScan {
    /// Reach of a lane, [`NO_HIT`] when clear
    #[inline]
    pub fn reach(hit: Option<usize>) -> f32 {
        hit.map_or(NO_HIT, |i| i as f32)
    }

    /// True when no lane (wings excluded) hit anything
    #[inline]
    pub fn lanes_clear(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Keep the smaller of two optional hit indices.
#[inline]
fn nearer(current: Option<usize>, candidate: Option<usize>) -> Option<usize> {
    match (current, candidate) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Scan a single lane or wing from `start`.
///
/// Straight lanes step toward `end`; curved lanes sweep about the turn
/// circle with the spiral change `end_radius_change`.
struct LaneScanner<'a> {
    grid: &'a OccupancyGrid,
    motion: &'a Motion,
    params: ScanParams,
    spacing: f32,
    arc_angle: f32,
}

impl LaneScanner<'_> {
    /// Arc hit distance in units of the scan spacing. A hit closer than one
    /// spacing still counts as a hit.
    #[inline]
    fn arc_reach(&self, hit: &ArcHit) -> usize {
        ((hit.distance / self.spacing) as usize).max(1)
    }

    /// Scan along `forward` for `samples` steps. Returns reach and hit point.
    fn lane(&self, start: Vec2, samples: usize) -> Option<(usize, Vec2)> {
        if self.params.curved {
            let circle = self.motion.turn_circle();
            self.grid
                .scan_arc(start, circle.center, self.arc_angle, samples, 0.0)
                .map(|hit| (self.arc_reach(&hit), hit.position))
        } else {
            let step = self.motion.forward * self.spacing;
            match self.grid.scan_ray(start, step, samples) {
                0 => None,
                i => Some((i, start + step * i as f32)),
            }
        }
    }

    /// Wing from `start` toward `end` (straight) or spiralling by
    /// `end_radius_change` (curved).
    fn wing(&self, start: Vec2, end: Vec2, end_radius_change: f32) -> Option<usize> {
        let ray = end - start;
        let length = ray.length();
        if length == 0.0 {
            return None;
        }
        let samples = (length / self.spacing) as usize;
        if self.params.curved {
            let circle = self.motion.turn_circle();
            self.grid
                .scan_arc(start, circle.center, self.arc_angle, samples, end_radius_change)
                .map(|hit| self.arc_reach(&hit))
        } else {
            let step = ray * (self.spacing / length);
            match self.grid.scan_ray(start, step, samples) {
                0 => None,
                i => Some(i),
            }
        }
    }
}

/// Cast the lane fan and wings for obstacle avoidance.
pub fn scan_for_obstacles(
    grid: &OccupancyGrid,
    motion: &Motion,
    params: ScanParams,
    sink: &mut dyn AnnotationSink,
) -> ObstacleScan {
    let spacing = grid.min_spacing() / 2.0;
    let max_forward = params.horizon * motion.speed;
    let max_samples = (max_forward / spacing) as usize;
    let circle = motion.turn_circle();

    let scanner = LaneScanner {
        grid,
        motion,
        params,
        spacing,
        arc_angle: circle.arc_angle(max_forward, AVOIDANCE_ARC_FRACTION),
    };

    let mut scan = ObstacleScan {
        max_samples,
        ..ObstacleScan::default()
    };
    let mut nearest_left = NO_HIT;
    let mut nearest_right = NO_HIT;
    let mut scraping = true;

    // Lanes, innermost first
    let mut lane_offset = Vec2::ZERO;
    let mut s = spacing / 2.0;
    while s < params.radius {
        lane_offset = motion.side * s;
        s += spacing;
        let outermost = s >= params.radius;

        let left = scanner.lane(motion.position + lane_offset, max_samples);
        let right = scanner.lane(motion.position - lane_offset, max_samples);

        if let Some((index, at)) = left {
            let reach = index as f32;
            if reach < nearest_left {
                nearest_left = reach;
                if reach < nearest_right {
                    scan.nearest_obstacle = Some(at);
                }
            }
        }
        if let Some((index, at)) = right {
            let reach = index as f32;
            if reach < nearest_right {
                nearest_right = reach;
                if reach < nearest_left {
                    scan.nearest_obstacle = Some(at);
                }
            }
        }
        if !outermost && (left.is_some() || right.is_some()) {
            scraping = false;
        }

        scan.left = nearer(scan.left, left.map(|(i, _)| i));
        scan.right = nearer(scan.right, right.map(|(i, _)| i));
    }

    // Wings fan out from the outermost lane
    let wing_width = params.wing_slope * max_forward;
    let corridor_front = motion.forward * max_forward;
    for w in 1..=WING_COUNT {
        let fraction = w as f32 / WING_COUNT as f32;
        let end_side = lane_offset + motion.side * (wing_width * fraction);
        let spiral = wing_width * fraction * circle.turn_sign();

        let left_start = motion.position + lane_offset;
        let left_end = motion.position + corridor_front + end_side;
        scan.wing_left = nearer(scan.wing_left, scanner.wing(left_start, left_end, -spiral));

        let right_start = motion.position - lane_offset;
        let right_end = motion.position + corridor_front - end_side;
        scan.wing_right = nearer(scan.wing_right, scanner.wing(right_start, right_end, spiral));

        if sink.enabled() && !params.curved {
            sink.line(left_start, left_end, Color::GRAY);
            sink.line(right_start, right_end, Color::GRAY);
        }
    }

    if scan.wing_left.is_some() && scan.wing_right.is_some() {
        scraping = false;
    }

    scan.contact = if scan.lanes_clear() {
        scan.nearest_obstacle = None;
        ScanContact::Clear
    } else if scraping {
        ScanContact::Scraping
    } else {
        ScanContact::Blocked
    };

    if let Some(obstacle) = scan.nearest_obstacle
        && sink.enabled()
    {
        sink.line(motion.position, obstacle, Color::RED);
        sink.circle(obstacle, spacing, Color::RED);
    }

    scan
}

/// Short-horizon scan for a collision the vehicle can no longer steer
/// around. Lanes cover the body width plus one spacing; inner lanes reach
/// farther than outer ones. No wings.
pub fn detect_imminent_collision(
    grid: &OccupancyGrid,
    motion: &Motion,
    half_width: f32,
    half_length: f32,
    horizon: f32,
    curved: bool,
    sink: &mut dyn AnnotationSink,
) -> bool {
    let spacing = grid.min_spacing() / 2.0;
    let max_side = half_width + spacing;
    let max_forward = motion.speed * horizon;
    let step = motion.forward * spacing;
    let circle = motion.turn_circle();

    let mut s = if curved { spacing / 4.0 } else { spacing / 2.0 };
    while s < max_side {
        let offset = motion.side * s;
        let left = motion.position + offset;
        let right = motion.position - offset;

        let fraction = s / max_side;
        let scan_distance = half_length + lerp(fraction, max_forward, max_forward * 0.3);
        let samples = (scan_distance / spacing) as usize;

        let hit = if curved {
            let angle = scan_distance / circle.signed_radius;
            grid.scan_arc(left, circle.center, angle, samples, 0.0)
                .is_some()
                || grid
                    .scan_arc(right, circle.center, angle, samples, 0.0)
                    .is_some()
        } else {
            grid.scan_ray(left, step, samples) > 0 || grid.scan_ray(right, step, samples) > 0
        };

        if hit {
            if sink.enabled() {
                sink.text(motion.position, "imminent collision", Color::RED);
            }
            return true;
        }
        s += spacing;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::NullSink;

    fn motion(speed: f32) -> Motion {
        Motion {
            position: Vec2::ZERO,
            forward: Vec2::UNIT_X,
            side: Vec2::UNIT_Y,
            speed,
            max_speed: 20.0,
            max_force: 8.0,
            curvature: 0.0,
        }
    }

    fn params(curved: bool) -> ScanParams {
        ScanParams {
            horizon: 1.98,
            radius: 1.0_f32.hypot(1.5),
            wing_slope: 0.2,
            curved,
        }
    }

    /// 200 m world with 1 m cells; cell (i, j) spans x in [i-100, i-99)
    fn grid_with(cells: &[(usize, usize)]) -> OccupancyGrid {
        let mut grid = OccupancyGrid::square(200.0, 200).unwrap();
        for &(i, j) in cells {
            grid.set_cell(i, j, true);
        }
        grid
    }

    #[test]
    fn test_empty_grid_is_clear() {
        let grid = grid_with(&[]);
        for curved in [false, true] {
            let scan = scan_for_obstacles(&grid, &motion(10.0), params(curved), &mut NullSink);
            assert!(scan.lanes_clear());
            assert_eq!(scan.wing_left, None);
            assert_eq!(scan.wing_right, None);
            assert_eq!(scan.contact, ScanContact::Clear);
            assert_eq!(scan.nearest_obstacle, None);
            assert_eq!(scan.max_samples, 39);
        }
    }

    #[test]
    fn test_obstacle_right_of_center() {
        // Cell at x in [15, 16), y in [-1, 0)
        let grid = grid_with(&[(115, 99)]);
        for curved in [false, true] {
            let scan = scan_for_obstacles(&grid, &motion(10.0), params(curved), &mut NullSink);
            assert_eq!(scan.left, None, "curved={curved}");
            assert_eq!(scan.right, Some(30), "curved={curved}");
            assert_eq!(scan.contact, ScanContact::Blocked);
            let obstacle = scan.nearest_obstacle.unwrap();
            assert!(obstacle.x >= 15.0 && obstacle.x < 16.0);
        }
    }

    #[test]
    fn test_capped_arc_reach_is_distance_in_spacings() {
        // R = 10 m left turn: 19.8 m of scan is capped to a sixth of the
        // circle, so 39 samples cover only about 10.5 m of arc
        let m = Motion {
            curvature: 0.1,
            ..motion(10.0)
        };
        let center = Vec2::new(0.0, 10.0);
        let angle = 0.9 * std::f32::consts::FRAC_PI_3;
        let target = center + Vec2::new(0.0, -9.75).rotate(angle);
        // Cell x in [7, 8), y in [4, 5)
        assert_eq!((target.x.floor(), target.y.floor()), (7.0, 4.0));
        let grid = grid_with(&[(107, 104)]);

        let scan = scan_for_obstacles(&grid, &m, params(true), &mut NullSink);
        assert_eq!(scan.max_samples, 39);
        // About 8.2 m along the arc; the sample index there is 33
        assert_eq!(scan.left, Some(16));
        assert!(ObstacleScan::reach(scan.left) < 0.8 * scan.max_samples as f32);
        let obstacle = scan.nearest_obstacle.unwrap();
        assert!(obstacle.x >= 7.0 && obstacle.x < 8.0);
    }

    #[test]
    fn test_outermost_lane_hit_is_scraping() {
        // 0.5 m cells. x in [15, 15.5), y in [1.5, 2.0) is crossed only by
        // the outermost lane at 1.625 m
        let mut grid = OccupancyGrid::square(200.0, 400).unwrap();
        grid.set_cell(230, 203, true);
        let scan = scan_for_obstacles(&grid, &motion(10.0), params(false), &mut NullSink);
        assert!(scan.left.is_some());
        assert_eq!(scan.right, None);
        assert_eq!(scan.contact, ScanContact::Scraping);
    }

    #[test]
    fn test_wing_sees_off_corridor_obstacle() {
        // Ahead and well to the left of the lanes: x in [18, 19), y in [4, 5)
        let grid = grid_with(&[(118, 104)]);
        let scan = scan_for_obstacles(&grid, &motion(10.0), params(false), &mut NullSink);
        assert!(scan.lanes_clear());
        assert!(scan.wing_left.is_some());
        assert_eq!(scan.wing_right, None);
        assert_eq!(scan.contact, ScanContact::Clear);
    }

    #[test]
    fn test_zero_speed_scans_nothing() {
        let grid = grid_with(&[(100, 100)]);
        let scan = scan_for_obstacles(&grid, &motion(0.0), params(false), &mut NullSink);
        assert_eq!(scan.max_samples, 0);
        assert!(scan.lanes_clear());
    }

    #[test]
    fn test_imminent_collision() {
        let far = grid_with(&[(115, 99)]);
        let near = grid_with(&[(108, 99)]);
        let m = motion(10.0);
        // Straight horizon 1.3 s reaches about 13 m on the inner lanes
        assert!(!detect_imminent_collision(&far, &m, 1.0, 1.5, 1.3, false, &mut NullSink));
        assert!(detect_imminent_collision(&near, &m, 1.0, 1.5, 1.3, false, &mut NullSink));
        assert!(detect_imminent_collision(&near, &m, 1.0, 1.5, 0.75, true, &mut NullSink));
    }

    #[test]
    fn test_imminent_collision_at_rest_covers_body_length() {
        // x in [1, 2) directly ahead
        let grid = grid_with(&[(101, 100)]);
        let m = motion(0.0);
        assert!(detect_imminent_collision(&grid, &m, 1.0, 1.5, 0.0, false, &mut NullSink));
        let clear = grid_with(&[(103, 100)]);
        assert!(!detect_imminent_collision(&clear, &m, 1.0, 1.5, 0.0, false, &mut NullSink));
    }
}
