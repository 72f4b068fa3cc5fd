//! Route corridor following.
//!
//! Two strategies share one entry point:
//!
//! - **Linear**: predict straight ahead, seek a target point further along
//!   the route, brake laterally when about to leave the tube.
//! - **Curved**: predict along the turning circle and respond with
//!   full-force lateral pushes, braking whenever the prediction leaves the
//!   tube.
//!
//! Both return zero when no correction is needed.

use super::motion::Motion;
use super::steering::{steer_for_seek, steer_toward_heading};
use crate::annotation::{AnnotationSink, Color};
use crate::core::Vec2;
use crate::route::RouteCorridor;

/// Alignment below which the vehicle is considered turned around
const ANTI_PARALLEL: f32 = -0.707;

/// Tangent dot below which consecutive segments fold back
const FOLD_BACK_DOT: f32 = -0.1;

/// Target offset scale when facing the wrong way (linear mode)
const WRONG_WAY_OFFSET_SCALE: f32 = 0.1;

/// Per-tick path following inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathFollowParams {
    /// +1 downstream, -1 upstream
    pub direction: i32,
    /// Prediction horizon (seconds)
    pub prediction_time: f32,
    /// Vehicle safety radius
    pub radius: f32,
    /// Curved prediction and steering
    pub curved: bool,
}

impl PathFollowParams {
    #[inline]
    fn direction_sign(&self) -> f32 {
        if self.direction < 0 { -1.0 } else { 1.0 }
    }
}

/// Corrective steering to stay inside the route corridor.
pub fn steer_to_follow_path(
    route: &RouteCorridor,
    motion: &Motion,
    params: PathFollowParams,
    sink: &mut dyn AnnotationSink,
) -> Vec2 {
    if params.curved {
        follow_curved(route, motion, params, sink)
    } else {
        follow_linear(route, motion, params, sink)
    }
}

fn follow_linear(
    route: &RouteCorridor,
    motion: &Motion,
    params: PathFollowParams,
    sink: &mut dyn AnnotationSink,
) -> Vec2 {
    let direction = params.direction_sign();
    let offset = direction * params.prediction_time * motion.speed;
    let future = motion.predict_position(params.prediction_time, false);

    let heading = route.tangent_at(motion.position) * direction;
    let correct_direction = heading.dot(motion.forward) > 0.0;

    let now = route.project_to_path(motion.position);
    let ahead = route.project_to_path(future);

    let margin = -params.radius;
    if now.outside < margin && ahead.outside < margin && correct_direction {
        return Vec2::ZERO;
    }

    let now_distance = route.path_distance(motion.position);
    let scale = if correct_direction {
        1.0
    } else {
        WRONG_WAY_OFFSET_SCALE
    };
    let mut target = route.point_at_path_distance(now_distance + offset * scale);

    // Target on the next segment of a hairpin: reach further to compensate
    let current_segment = route.nearest_segment_index(motion.position);
    let target_segment = route.nearest_segment_index(target);
    if route.next_segment(current_segment, params.direction) == Some(target_segment)
        && route.dot_segment_tangents(target_segment, current_segment) < FOLD_BACK_DOT
    {
        target = route.point_at_path_distance(now_distance + offset * 2.0);
    }

    if sink.enabled() {
        sink.line(motion.position, future, Color::GRAY);
        sink.line(motion.position, target, Color::GREEN);
        sink.line(ahead.point, future, Color::CYAN);
    }

    if now.outside > 0.0 {
        return steer_for_seek(motion, now.point);
    }

    let seek = steer_for_seek(motion, target).truncate_length(motion.max_force);
    if now.outside < 0.0 && ahead.outside > 0.0 {
        seek.perpendicular_component(motion.forward) - motion.forward * motion.max_force
    } else {
        seek
    }
}

fn follow_curved(
    route: &RouteCorridor,
    motion: &Motion,
    params: PathFollowParams,
    sink: &mut dyn AnnotationSink,
) -> Vec2 {
    let future = motion.predict_position(params.prediction_time, true);
    let ahead = route.project_to_path(future);
    let heading = route.tangent_at_in_direction(ahead.point, params.direction);

    let full_brake = -motion.forward * motion.max_force;
    let braking = if ahead.outside < 0.0 {
        Vec2::ZERO
    } else {
        full_brake
    };

    let now = route.project_to_path(motion.position);
    let alignment = (now.tangent * params.direction_sign()).dot(motion.forward);

    if alignment < 0.0 {
        if sink.enabled() {
            sink.line(motion.position, motion.position + now.tangent * 10.0, Color::CYAN);
        }
        if alignment < ANTI_PARALLEL {
            let toward_center = now.point - motion.position;
            let turn = if toward_center.dot(motion.side) > 0.0 {
                motion.side * motion.max_force
            } else {
                motion.side * -motion.max_force
            };
            return turn + full_brake;
        }
        return steer_toward_heading(motion, heading).perpendicular_component(motion.forward) + braking;
    }

    if ahead.outside < -(params.radius + 1.0) {
        return Vec2::ZERO;
    }

    if sink.enabled() {
        sink.line(future, future + heading, Color::RED);
        sink.line(ahead.point, future, Color::CYAN);
    }

    // Entering a turn: align with the next segment
    if route.near_waypoint(ahead.point) && ahead.outside > 0.0 {
        if sink.enabled() {
            sink.circle(future, 0.5, Color::RED);
        }
        return steer_toward_heading(motion, heading) + braking;
    }

    // Push away from the tube wall the prediction drifts toward
    let path_side = heading.perpendicular();
    let drift = future - ahead.point;
    let away = if path_side.dot(drift) < 0.0 { 1.0 } else { -1.0 };
    motion.side * (motion.max_force * away) + braking
}
