//! Map-drive scenario section.

use serde::{Deserialize, Serialize};

use crate::sim::TerrainSettings;

use super::defaults;

/// Scenario settings for [`MapDriveScenario`](crate::sim::MapDriveScenario)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSection {
    /// Random seed for terrain and route radii
    #[serde(default = "defaults::seed")]
    pub seed: u64,

    /// Follow the diamond route instead of driving freely
    #[serde(default = "defaults::enabled")]
    pub follow_route: bool,

    /// Initial tube radius of the route (meters)
    #[serde(default = "defaults::route_radius")]
    pub route_radius: f32,

    /// Fixed simulation step (seconds)
    #[serde(default = "defaults::time_step")]
    pub time_step: f32,

    /// Scatter rock clumps on every map
    #[serde(default = "defaults::enabled")]
    pub random_rocks: bool,

    /// Wall off the route tube
    #[serde(default = "defaults::enabled")]
    pub path_fences: bool,

    /// Fence the map border in free mode
    #[serde(default)]
    pub boundary_fences: bool,

    /// Clump count range (half-open)
    #[serde(default = "defaults::clump_range")]
    pub clumps: (usize, usize),

    /// Rocks per clump upper bound (exclusive)
    #[serde(default = "defaults::max_rocks_per_clump")]
    pub max_rocks_per_clump: usize,

    /// Range for randomized route radii (half-open)
    #[serde(default = "defaults::radius_range")]
    pub radius_range: (f32, f32),
}

impl Default for ScenarioSection {
    fn default() -> Self {
        Self {
            seed: defaults::seed(),
            follow_route: true,
            route_radius: defaults::route_radius(),
            time_step: defaults::time_step(),
            random_rocks: true,
            path_fences: true,
            boundary_fences: false,
            clumps: defaults::clump_range(),
            max_rocks_per_clump: defaults::max_rocks_per_clump(),
            radius_range: defaults::radius_range(),
        }
    }
}

impl ScenarioSection {
    /// Terrain generation settings
    pub fn terrain_settings(&self) -> TerrainSettings {
        TerrainSettings {
            random_rocks: self.random_rocks,
            path_fences: self.path_fences && self.follow_route,
            boundary_fences: self.boundary_fences,
            clumps: self.clumps,
            max_rocks_per_clump: self.max_rocks_per_clump,
            radius_range: self.radius_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_mode_has_no_path_fences() {
        let section = ScenarioSection {
            follow_route: false,
            ..ScenarioSection::default()
        };
        assert!(!section.terrain_settings().path_fences);
        assert_eq!(ScenarioSection::default().terrain_settings(), TerrainSettings::default());
    }
}
