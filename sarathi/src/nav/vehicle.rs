//! Vehicle kinematics capability and the default kinematic state.

use serde::{Deserialize, Serialize};

use crate::core::{LocalSpace, Vec2};

/// Read access to a vehicle's kinematic state.
///
/// The navigator only needs position, heading, speed, force limits and the
/// measured path curvature. Anything providing these can be navigated.
pub trait Kinematics {
    /// World position
    fn position(&self) -> Vec2;

    /// Unit heading
    fn forward(&self) -> Vec2;

    /// Unit left vector
    fn side(&self) -> Vec2 {
        self.forward().perpendicular()
    }

    /// Scalar speed along `forward` (m/s)
    fn speed(&self) -> f32;

    /// Speed limit (m/s)
    fn max_speed(&self) -> f32;

    /// Steering force limit
    fn max_force(&self) -> f32;

    /// Signed path curvature (1/m), positive when turning left
    fn curvature(&self) -> f32;

    /// Velocity vector
    fn velocity(&self) -> Vec2 {
        self.forward() * self.speed()
    }

    /// Speed as a fraction of `max_speed`
    fn relative_speed(&self) -> f32 {
        let max = self.max_speed();
        if max > 0.0 { self.speed() / max } else { 0.0 }
    }
}

/// Point-mass vehicle state driven by an external integrator.
///
/// Besides the kinematic values it keeps the smoothing history used by
/// [`KinematicIntegrator`](crate::sim::KinematicIntegrator): smoothed
/// acceleration, last pose for curvature measurement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// World position
    pub position: Vec2,
    /// Unit heading (kept normalized through [`set_forward`](Self::set_forward))
    pub(crate) forward: Vec2,
    /// Scalar speed (m/s)
    pub speed: f32,
    /// Speed limit (m/s)
    pub max_speed: f32,
    /// Steering force limit
    pub max_force: f32,
    /// Mass used to turn force into acceleration
    pub mass: f32,
    pub(crate) curvature: f32,
    pub(crate) smoothed_curvature: f32,
    pub(crate) smoothed_acceleration: Vec2,
    pub(crate) last_forward: Vec2,
    pub(crate) last_position: Vec2,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new(20.0, 8.0)
    }
}

impl VehicleState {
    /// Vehicle at rest at the origin facing +X.
    pub fn new(max_speed: f32, max_force: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            forward: Vec2::UNIT_X,
            speed: 0.0,
            max_speed,
            max_force,
            mass: 1.0,
            curvature: 0.0,
            smoothed_curvature: 0.0,
            smoothed_acceleration: Vec2::ZERO,
            last_forward: Vec2::UNIT_X,
            last_position: Vec2::ZERO,
        }
    }

    /// Builder: place at `position` facing `forward`.
    pub fn at(mut self, position: Vec2, forward: Vec2) -> Self {
        self.place(position, forward);
        self
    }

    /// Builder: set the current speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Builder: set the measured curvature.
    pub fn with_curvature(mut self, curvature: f32) -> Self {
        self.set_curvature(curvature);
        self
    }

    /// Teleport, clearing curvature and acceleration history.
    pub fn place(&mut self, position: Vec2, forward: Vec2) {
        self.position = position;
        self.set_forward(forward);
        self.reset_smoothing();
    }

    /// Set the heading (normalized; a zero vector is ignored).
    pub fn set_forward(&mut self, forward: Vec2) {
        if !forward.is_zero() && forward.is_finite() {
            self.forward = forward.normalize();
        }
    }

    /// Override the measured curvature.
    pub fn set_curvature(&mut self, curvature: f32) {
        self.curvature = curvature;
        self.smoothed_curvature = curvature;
    }

    /// Clear smoothing history so the next measurement starts fresh.
    pub fn reset_smoothing(&mut self) {
        self.curvature = 0.0;
        self.smoothed_curvature = 0.0;
        self.smoothed_acceleration = Vec2::ZERO;
        self.last_forward = self.forward;
        self.last_position = self.position;
    }

    /// Low-pass filtered curvature
    #[inline]
    pub fn smoothed_curvature(&self) -> f32 {
        self.smoothed_curvature
    }

    /// Low-pass filtered acceleration
    #[inline]
    pub fn smoothed_acceleration(&self) -> Vec2 {
        self.smoothed_acceleration
    }

    /// Vehicle frame
    #[inline]
    pub fn local_space(&self) -> LocalSpace {
        LocalSpace::new(self.position, self.forward)
    }
}

impl Kinematics for VehicleState {
    #[inline]
    fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    fn forward(&self) -> Vec2 {
        self.forward
    }

    #[inline]
    fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    fn max_speed(&self) -> f32 {
        self.max_speed
    }

    #[inline]
    fn max_force(&self) -> f32 {
        self.max_force
    }

    #[inline]
    fn curvature(&self) -> f32 {
        self.curvature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kinematics_defaults() {
        let v = VehicleState::new(20.0, 8.0)
            .at(Vec2::new(1.0, 2.0), Vec2::new(0.0, 3.0))
            .with_speed(5.0);
        assert_eq!(v.forward(), Vec2::UNIT_Y);
        assert_eq!(v.side(), Vec2::new(-1.0, 0.0));
        assert_eq!(v.velocity(), Vec2::new(0.0, 5.0));
        assert_relative_eq!(v.relative_speed(), 0.25);
    }

    #[test]
    fn test_zero_max_speed_relative_speed() {
        let v = VehicleState::new(0.0, 1.0).with_speed(3.0);
        assert_eq!(v.relative_speed(), 0.0);
    }

    #[test]
    fn test_place_resets_history() {
        let mut v = VehicleState::default().with_curvature(0.1);
        v.smoothed_acceleration = Vec2::new(1.0, 1.0);
        v.place(Vec2::new(5.0, 5.0), Vec2::UNIT_X);
        assert_eq!(v.curvature(), 0.0);
        assert_eq!(v.smoothed_acceleration(), Vec2::ZERO);
        assert_eq!(v.last_position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_set_forward_ignores_zero() {
        let mut v = VehicleState::default();
        v.set_forward(Vec2::ZERO);
        assert_eq!(v.forward(), Vec2::UNIT_X);
    }
}
