//! Obstacle avoidance policy.
//!
//! The policy is an ordered table; the first clause whose condition holds
//! decides the steering direction:
//!
//! | # | Clause | Condition | Response |
//! |---|--------|-----------|----------|
//! | 1 | [`ObstacleFree`](AvoidanceClause::ObstacleFree) | `L`, `R` clear | straight, or brake if both wings blocked at speed |
//! | 2 | [`DistantObstacleHint`](AvoidanceClause::DistantObstacleHint) | hint, `min(L,R) > 0.8·range` | hint side |
//! | 3 | [`TurningRadiusLimit`](AvoidanceClause::TurningRadiusLimit) | turning too tight | away from turn center |
//! | 4 | [`ClearSide`](AvoidanceClause::ClearSide) | exactly one of `L`, `R` clear | clear side |
//! | 5 | [`ClearWings`](AvoidanceClause::ClearWings) | `WL`, `WR` clear | hint on near-tie, else farther of `L`, `R` |
//! | 6 | [`BalancedWings`](AvoidanceClause::BalancedWings) | hint, `|WL-WR| < 2` | hint side |
//! | 7 | [`LessClutteredWing`](AvoidanceClause::LessClutteredWing) | always | farther of `WL`, `WR` |
//!
//! Clear lanes compare as [`NO_HIT`](super::scanner::NO_HIT).

use super::motion::Motion;
use super::scanner::ObstacleScan;
use crate::core::Vec2;
use crate::route::RouteCorridor;

/// Table rows in evaluation order.
pub const POLICY: [AvoidanceClause; 7] = [
    AvoidanceClause::ObstacleFree,
    AvoidanceClause::DistantObstacleHint,
    AvoidanceClause::TurningRadiusLimit,
    AvoidanceClause::ClearSide,
    AvoidanceClause::ClearWings,
    AvoidanceClause::BalancedWings,
    AvoidanceClause::LessClutteredWing,
];

/// Row of the avoidance table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AvoidanceClause {
    ObstacleFree,
    DistantObstacleHint,
    TurningRadiusLimit,
    ClearSide,
    ClearWings,
    BalancedWings,
    LessClutteredWing,
}

/// Direction chosen by a clause.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Response {
    Straight,
    Brake,
    Left,
    Right,
    Hint(Vec2),
}

/// Everything a clause may look at.
#[derive(Clone, Copy, Debug)]
pub struct PolicyInputs {
    /// Nearest left lane reach
    pub left: f32,
    /// Nearest right lane reach
    pub right: f32,
    /// Nearest left wing reach
    pub wing_left: f32,
    /// Nearest right wing reach
    pub wing_right: f32,
    /// Samples per lane
    pub max_samples: usize,
    /// Speed as a fraction of the limit
    pub relative_speed: f32,
    /// Signed curvature
    pub curvature: f32,
    /// Curvature above which clause 3 forces a widening turn
    pub curvature_limit: f32,
    /// Preferred direction from path following
    pub hint: Option<Vec2>,
}

impl PolicyInputs {
    /// Collect inputs from a scan.
    pub fn new(scan: &ObstacleScan, motion: &Motion, curvature_limit: f32, hint: Option<Vec2>) -> Self {
        Self {
            left: ObstacleScan::reach(scan.left),
            right: ObstacleScan::reach(scan.right),
            wing_left: ObstacleScan::reach(scan.wing_left),
            wing_right: ObstacleScan::reach(scan.wing_right),
            max_samples: scan.max_samples,
            relative_speed: motion.relative_speed(),
            curvature: motion.curvature,
            curvature_limit,
            hint,
        }
    }
}

/// Outcome of the policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvoidanceDecision {
    /// Unit steering direction, or zero to go straight
    pub steering: Vec2,
    /// Clause that decided
    pub clause: AvoidanceClause,
    /// Whether the hint was followed
    pub followed_hint: bool,
}

impl AvoidanceClause {
    fn evaluate(self, inputs: &PolicyInputs) -> Option<Response> {
        use super::scanner::NO_HIT;

        let left_clear = inputs.left == NO_HIT;
        let right_clear = inputs.right == NO_HIT;
        let wing_left_clear = inputs.wing_left == NO_HIT;
        let wing_right_clear = inputs.wing_right == NO_HIT;
        let toward_larger = |a: f32, b: f32| {
            if a > b { Response::Left } else { Response::Right }
        };

        match self {
            Self::ObstacleFree => (left_clear && right_clear).then(|| {
                if wing_left_clear || wing_right_clear || inputs.relative_speed < 0.7 {
                    Response::Straight
                } else {
                    Response::Brake
                }
            }),
            Self::DistantObstacleHint => inputs
                .hint
                .filter(|_| inputs.left.min(inputs.right) > inputs.max_samples as f32 * 0.8)
                .map(Response::Hint),
            Self::TurningRadiusLimit => {
                (inputs.curvature.abs() > inputs.curvature_limit).then(|| {
                    if inputs.curvature > 0.0 {
                        Response::Right
                    } else {
                        Response::Left
                    }
                })
            }
            Self::ClearSide => match (left_clear, right_clear) {
                (true, false) => Some(Response::Left),
                (false, true) => Some(Response::Right),
                _ => None,
            },
            Self::ClearWings => (wing_left_clear && wing_right_clear).then(|| {
                match inputs.hint {
                    Some(hint) if (inputs.left - inputs.right).abs() < 5.0 => Response::Hint(hint),
                    _ => toward_larger(inputs.left, inputs.right),
                }
            }),
            Self::BalancedWings => inputs
                .hint
                .filter(|_| (inputs.wing_left - inputs.wing_right).abs() < 2.0)
                .map(Response::Hint),
            Self::LessClutteredWing => Some(toward_larger(inputs.wing_left, inputs.wing_right)),
        }
    }
}

/// Run the table and turn the winning response into a direction.
pub fn decide(inputs: &PolicyInputs, motion: &Motion) -> AvoidanceDecision {
    let (clause, response) = POLICY
        .iter()
        .find_map(|&clause| clause.evaluate(inputs).map(|r| (clause, r)))
        .unwrap_or((AvoidanceClause::LessClutteredWing, Response::Straight));

    let steering = match response {
        Response::Straight => Vec2::ZERO,
        Response::Brake => -motion.forward,
        Response::Left => motion.side,
        Response::Right => -motion.side,
        Response::Hint(hint) => {
            if hint.dot(motion.side) > 0.0 {
                motion.side
            } else {
                -motion.side
            }
        }
    };

    AvoidanceDecision {
        steering,
        clause,
        followed_hint: matches!(response, Response::Hint(_)),
    }
}

/// Preferred avoidance direction while following a route.
///
/// When the vehicle points away from the path heading, the heading itself
/// is the hint. Otherwise a remembered obstacle inside a wide corridor,
/// far enough from the centerline and still distant, suggests passing on
/// the centerline side.
pub fn steering_hint(
    route: &RouteCorridor,
    motion: &Motion,
    direction: i32,
    last_obstacle: Option<Vec2>,
    half_width: f32,
    look_ahead_time: f32,
) -> Option<Vec2> {
    let path_heading = route.tangent_at_in_direction(motion.position, direction);
    if path_heading.dot(motion.forward) < 0.8 {
        return Some(path_heading);
    }

    let obstacle = last_obstacle?;
    let projection = route.project_to_path(obstacle);
    if projection.outside >= 0.0 {
        return None;
    }

    let offset = projection.point - obstacle;
    let edge_width = half_width * 6.0;
    let near_edge = offset.length() > edge_width;
    let wide = route.segment_radius(projection.segment) > edge_width * 2.0;
    if !(near_edge && wide) {
        return None;
    }

    let range = motion.speed * look_ahead_time;
    (obstacle.distance(motion.position) > range * 0.8).then_some(offset)
}
