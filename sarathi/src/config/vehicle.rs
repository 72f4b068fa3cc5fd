//! Vehicle configuration section.

use serde::{Deserialize, Serialize};

use crate::nav::VehicleState;

use super::defaults;

/// Vehicle limits
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleSection {
    /// Speed limit (m/s)
    #[serde(default = "defaults::max_speed")]
    pub max_speed: f32,

    /// Steering force limit
    #[serde(default = "defaults::max_force")]
    pub max_force: f32,

    /// Point mass
    #[serde(default = "defaults::mass")]
    pub mass: f32,
}

impl Default for VehicleSection {
    fn default() -> Self {
        Self {
            max_speed: defaults::max_speed(),
            max_force: defaults::max_force(),
            mass: defaults::mass(),
        }
    }
}

impl VehicleSection {
    /// Vehicle at rest at the origin with these limits
    pub fn to_vehicle(&self) -> VehicleState {
        let mut vehicle = VehicleState::new(self.max_speed, self.max_force);
        vehicle.mass = self.mass;
        vehicle
    }
}
