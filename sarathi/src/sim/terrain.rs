//! Random terrain generation for the map-drive scenario.

use log::{debug, warn};
use rand::Rng;

use crate::grid::OccupancyGrid;
use crate::route::RouteCorridor;

/// Cells per side of a rock clump
const CLUMP_SPREAD: usize = 4;

/// Thickness of path fences (meters outside the tube)
const FENCE_THICKNESS: f32 = 1.0;

/// Terrain generation settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSettings {
    /// Scatter rock clumps
    pub random_rocks: bool,
    /// Wall off the route tube
    pub path_fences: bool,
    /// Fence the map border (free driving)
    pub boundary_fences: bool,
    /// Clump count range (half-open)
    pub clumps: (usize, usize),
    /// Rocks per clump upper bound (exclusive)
    pub max_rocks_per_clump: usize,
    /// Range for randomized route radii (half-open)
    pub radius_range: (f32, f32),
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            random_rocks: true,
            path_fences: true,
            boundary_fences: false,
            clumps: (50, 150),
            max_rocks_per_clump: 10,
            radius_range: (4.0, 19.0),
        }
    }
}

/// Scatter clumps of rocks over the grid.
pub fn scatter_rock_clumps<R: Rng>(grid: &mut OccupancyGrid, settings: &TerrainSettings, rng: &mut R) {
    let r = grid.resolution();
    if r <= CLUMP_SPREAD || settings.clumps.0 >= settings.clumps.1 {
        return;
    }
    let clumps = rng.random_range(settings.clumps.0..settings.clumps.1);
    for _ in 0..clumps {
        let i = rng.random_range(0..r - CLUMP_SPREAD);
        let j = rng.random_range(0..r - CLUMP_SPREAD);
        let rocks = rng.random_range(0..settings.max_rocks_per_clump.max(1));
        for _ in 0..rocks {
            let m = rng.random_range(0..CLUMP_SPREAD);
            let n = rng.random_range(0..CLUMP_SPREAD);
            grid.set_cell(i + m, j + n, true);
        }
    }
    debug!("Scattered {} rock clumps, {} cells occupied", clumps, grid.count_occupied());
}

/// Clear the central sixteenth of the grid so a vehicle can spawn there.
pub fn clear_center(grid: &mut OccupancyGrid) {
    let r = grid.resolution();
    let o = r >> 4;
    let lo = (r - o) >> 1;
    let hi = ((r + o) >> 1).min(r - 1);
    for i in lo..=hi {
        for j in lo..=hi {
            grid.set_cell(i, j, false);
        }
    }
}

/// Fence the border plus two diagonal baffles with a gap in the middle.
pub fn draw_boundary_fences(grid: &mut OccupancyGrid) {
    let r = grid.resolution();
    let last = r - 1;
    let a = r >> 3;
    let b = r - a;
    let o = r >> 4;
    let p = (r - o) >> 1;
    let q = (r + o) >> 1;

    for i in 0..r {
        for j in 0..r {
            let baffle = i > a && i < b && (i < p || i > q);
            let border = i == 0 || j == 0 || i == last || j == last;
            if border || (baffle && (i == j || i + j == last)) {
                grid.set_cell(i, j, true);
            }
        }
    }
}

/// Wall the outside of the route tube and clear everything beyond the
/// wall.
pub fn draw_path_fences(grid: &mut OccupancyGrid, route: &RouteCorridor) {
    let r = grid.resolution();
    for j in 0..r {
        for i in 0..r {
            let outside = route.distance_outside_path(grid.cell_center(i, j));
            if outside > 0.0 && outside < FENCE_THICKNESS {
                grid.set_cell(i, j, true);
            } else if outside > FENCE_THICKNESS {
                grid.set_cell(i, j, false);
            }
        }
    }
}

/// Draw new tube radii for every segment.
///
/// The segment the vehicle enters next keeps the radius of the segment it
/// just left, so a teleport never lands it in a narrower tube.
pub fn randomize_route_radii<R: Rng>(
    route: &mut RouteCorridor,
    direction: i32,
    settings: &TerrainSettings,
    rng: &mut R,
) {
    let count = route.points().len();
    if count < 2 {
        return;
    }
    let upstream = direction > 0;
    let entry = if upstream { 1 } else { count - 1 };
    let exit = if upstream { count - 1 } else { 1 };
    let last_exit_radius = route.radii()[exit];

    let (lo, hi) = settings.radius_range;
    for index in 1..count {
        let radius = if hi > lo { rng.random_range(lo..hi) } else { lo };
        if let Err(e) = route.set_radius(index, radius) {
            warn!("Keeping old route radius: {}", e);
        }
    }
    if let Err(e) = route.set_radius(entry, last_exit_radius) {
        warn!("Entry radius not carried over: {}", e);
    }
}

/// Rebuild the whole map: rocks, spawn area, fences, route radii.
pub fn regenerate<R: Rng>(
    grid: &mut OccupancyGrid,
    route: Option<&mut RouteCorridor>,
    direction: i32,
    settings: &TerrainSettings,
    rng: &mut R,
) {
    grid.clear();
    if settings.random_rocks {
        scatter_rock_clumps(grid, settings, rng);
    }
    clear_center(grid);
    if settings.boundary_fences {
        draw_boundary_fences(grid);
    }
    if let Some(route) = route {
        randomize_route_radii(route, direction, settings, rng);
        if settings.path_fences {
            draw_path_fences(grid, route);
        }
    }
}
