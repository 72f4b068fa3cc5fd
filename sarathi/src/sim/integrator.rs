//! Point-mass integrator driving a [`VehicleState`] from steering output.

use crate::core::Vec2;
use crate::core::math::{blend_into_accumulator, blend_vec_into_accumulator, clamp, lerp};
use crate::nav::{Kinematics, SteeringOutput, VehicleState};

/// Fraction of `max_speed` below which steering is bent toward `forward`
const LOW_SPEED_FRACTION: f32 = 0.2;

/// Curvature blend rate per second
const CURVATURE_RATE: f32 = 4.0;

/// Applies steering and braking to a vehicle.
///
/// The vehicle cannot reverse or turn on the spot: at low speed the
/// steering force is bent into a cone around the heading that widens as
/// speed picks up.
#[derive(Clone, Copy, Debug, Default)]
pub struct KinematicIntegrator;

impl KinematicIntegrator {
    pub fn new() -> Self {
        Self
    }

    /// Advance `vehicle` by `dt` seconds under `output`.
    pub fn apply(&self, vehicle: &mut VehicleState, output: &SteeringOutput, dt: f32) {
        if let Some(rate) = output.braking {
            apply_braking(vehicle, rate, dt);
        }
        apply_force(vehicle, output.force, dt);
    }
}

/// Reduce speed at `rate` per second, capped by the force limit.
pub fn apply_braking(vehicle: &mut VehicleState, rate: f32, dt: f32) {
    let braking = (vehicle.speed * rate).min(vehicle.max_force);
    vehicle.speed = (vehicle.speed - braking * dt).max(0.0);
    vehicle.smoothed_acceleration = Vec2::ZERO;
}

fn apply_force(vehicle: &mut VehicleState, force: Vec2, dt: f32) {
    let adjusted = limit_low_speed_deviation(vehicle, force);
    let clipped = adjusted.truncate_length(vehicle.max_force);
    let acceleration = clipped / vehicle.mass;

    if dt > 0.0 {
        let rate = clamp(9.0 * dt, 0.15, 0.4);
        blend_vec_into_accumulator(rate, acceleration, &mut vehicle.smoothed_acceleration);
    }

    let velocity = (vehicle.velocity() + vehicle.smoothed_acceleration * dt).truncate_length(vehicle.max_speed);
    vehicle.speed = velocity.length();
    vehicle.position += velocity * dt;
    if vehicle.speed > 0.0 {
        vehicle.set_forward(velocity / vehicle.speed);
    }

    measure_curvature(vehicle, dt);
}

/// Bend `force` into a cone about `forward` whose half-angle grows from
/// zero at rest to 180° at 20% of `max_speed`.
fn limit_low_speed_deviation(vehicle: &VehicleState, force: Vec2) -> Vec2 {
    let max_adjusted_speed = LOW_SPEED_FRACTION * vehicle.max_speed;
    if vehicle.speed > max_adjusted_speed || force.is_zero() || max_adjusted_speed <= 0.0 {
        return force;
    }
    let range = vehicle.speed / max_adjusted_speed;
    let cone_cosine = lerp(range.powi(20), 1.0, -1.0);
    limit_deviation_angle(force, cone_cosine, vehicle.forward())
}

/// Clamp `source` to lie inside the cone about unit `basis`.
fn limit_deviation_angle(source: Vec2, cone_cosine: f32, basis: Vec2) -> Vec2 {
    let length = source.length();
    if length == 0.0 {
        return source;
    }
    if (source / length).dot(basis) >= cone_cosine {
        return source;
    }
    let perpendicular = source.perpendicular_component(basis).normalize();
    let sine = (1.0 - cone_cosine * cone_cosine).max(0.0).sqrt();
    (basis * cone_cosine + perpendicular * sine) * length
}

/// Curvature from the change in heading per meter travelled.
fn measure_curvature(vehicle: &mut VehicleState, dt: f32) {
    if dt <= 0.0 {
        return;
    }
    let travelled = vehicle.position.distance(vehicle.last_position);
    if travelled > 0.0 {
        let turn = (vehicle.last_forward - vehicle.forward()) / travelled;
        let lateral = turn.perpendicular_component(vehicle.forward());
        let sign = if lateral.dot(vehicle.side()) < 0.0 { 1.0 } else { -1.0 };
        vehicle.curvature = lateral.length() * sign;
        blend_into_accumulator(dt * CURVATURE_RATE, vehicle.curvature, &mut vehicle.smoothed_curvature);
    }
    vehicle.last_forward = vehicle.forward();
    vehicle.last_position = vehicle.position;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn output(force: Vec2) -> SteeringOutput {
        SteeringOutput {
            force,
            ..SteeringOutput::default()
        }
    }

    #[test]
    fn test_thrust_accelerates_along_heading() {
        let mut v = VehicleState::default().with_speed(10.0);
        let integrator = KinematicIntegrator::new();
        integrator.apply(&mut v, &output(Vec2::new(8.0, 0.0)), 0.1);
        // Blend rate clamps to 0.4: smoothed acceleration 3.2 after one tick
        assert_relative_eq!(v.speed, 10.32, epsilon = 1e-4);
        assert_relative_eq!(v.position.x, 1.032, epsilon = 1e-4);
        assert_eq!(v.forward(), Vec2::UNIT_X);
    }

    #[test]
    fn test_speed_is_capped() {
        let mut v = VehicleState::default().with_speed(19.9);
        let integrator = KinematicIntegrator::new();
        for _ in 0..20 {
            integrator.apply(&mut v, &output(Vec2::new(8.0, 0.0)), 0.1);
        }
        assert_relative_eq!(v.speed, 20.0, epsilon = 1e-4);
    }

    #[test]
    fn test_braking_slows_and_stops() {
        let mut v = VehicleState::default().with_speed(10.0);
        let integrator = KinematicIntegrator::new();
        let brake = SteeringOutput {
            braking: Some(3.0),
            ..SteeringOutput::default()
        };
        integrator.apply(&mut v, &brake, 0.1);
        // min(30, 8) * 0.1
        assert_relative_eq!(v.speed, 9.2, epsilon = 1e-4);

        for _ in 0..200 {
            integrator.apply(&mut v, &brake, 0.1);
        }
        assert!(v.speed < 1e-3);
    }

    #[test]
    fn test_at_rest_force_is_bent_forward() {
        let v = VehicleState::default();
        let adjusted = limit_low_speed_deviation(&v, Vec2::new(0.0, 5.0));
        assert_relative_eq!(adjusted.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(adjusted.y, 0.0, epsilon = 1e-5);

        // Above 20% of max speed nothing changes
        let fast = VehicleState::default().with_speed(5.0);
        assert_eq!(limit_low_speed_deviation(&fast, Vec2::new(0.0, 5.0)), Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_left_turn_measures_positive_curvature() {
        let mut v = VehicleState::default().with_speed(10.0);
        let integrator = KinematicIntegrator::new();
        for _ in 0..5 {
            integrator.apply(&mut v, &output(Vec2::new(0.0, 8.0)), 0.1);
        }
        assert!(v.curvature() > 0.0);
        assert!(v.smoothed_curvature() > 0.0);
        assert!(v.position.y > 0.0);

        let mut v = VehicleState::default().with_speed(10.0);
        for _ in 0..5 {
            integrator.apply(&mut v, &output(Vec2::new(0.0, -8.0)), 0.1);
        }
        assert!(v.curvature() < 0.0);
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let mut v = VehicleState::default().with_speed(10.0);
        let before = v.clone();
        KinematicIntegrator::new().apply(&mut v, &output(Vec2::new(0.0, 8.0)), 0.0);
        assert_eq!(v, before);
    }
}
