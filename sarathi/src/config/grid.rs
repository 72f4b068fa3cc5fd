//! Grid configuration section.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::grid::OccupancyGrid;

use super::defaults;

/// Grid configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Side length of the square world (meters)
    #[serde(default = "defaults::world_size")]
    pub world_size: f32,

    /// Cells per side
    #[serde(default = "defaults::grid_resolution")]
    pub resolution: usize,

    /// Value reported for points outside the grid
    #[serde(default)]
    pub outside_value: bool,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            world_size: defaults::world_size(),
            resolution: defaults::grid_resolution(),
            outside_value: false,
        }
    }
}

impl GridSection {
    /// Build an empty grid centered on the origin.
    pub fn to_grid(&self) -> Result<OccupancyGrid, GridError> {
        Ok(OccupancyGrid::square(self.world_size, self.resolution)?.with_outside_value(self.outside_value))
    }
}
