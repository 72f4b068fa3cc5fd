//! Test utilities for Sarathi integration tests.
//!
//! Worlds, routes and vehicles shared by the navigation scenarios.

#![allow(dead_code)]

use sarathi::annotation::NullSink;
use sarathi::core::Vec2;
use sarathi::grid::OccupancyGrid;
use sarathi::nav::{Navigator, NavigatorConfig, SteeringOutput, Surroundings, VehicleState};
use sarathi::route::RouteCorridor;
use sarathi::sim::KinematicIntegrator;

/// Fixed simulation step
pub const DT: f32 = 0.05;

/// 200 m square world with 1 m cells, all passable.
pub fn open_world() -> OccupancyGrid {
    OccupancyGrid::square(200.0, 200).unwrap()
}

/// Open world with the listed cells blocked.
pub fn world_with_rocks(cells: &[(usize, usize)]) -> OccupancyGrid {
    let mut grid = open_world();
    for &(i, j) in cells {
        grid.set_cell(i, j, true);
    }
    grid
}

/// Straight two-waypoint route along the X axis.
pub fn straight_route(half_length: f32, radius: f32) -> RouteCorridor {
    RouteCorridor::with_uniform_radius(
        vec![Vec2::new(-half_length, 0.0), Vec2::new(half_length, 0.0)],
        radius,
        false,
    )
    .unwrap()
}

/// Default vehicle (max speed 20, max force 8) at the origin facing +X.
pub fn vehicle_at_origin(speed: f32) -> VehicleState {
    VehicleState::default()
        .at(Vec2::ZERO, Vec2::UNIT_X)
        .with_speed(speed)
}

/// Run `ticks` navigation steps, integrating the vehicle after each.
///
/// Returns every output in order.
pub fn drive(
    navigator: &mut Navigator,
    grid: &OccupancyGrid,
    route: Option<&RouteCorridor>,
    ticks: usize,
) -> Vec<SteeringOutput> {
    let integrator = KinematicIntegrator::new();
    let surroundings = Surroundings { grid, route };
    (0..ticks)
        .map(|tick| {
            let output = navigator.update(&surroundings, tick as f32 * DT, DT, &mut NullSink);
            integrator.apply(navigator.vehicle_mut(), &output, DT);
            output
        })
        .collect()
}

/// Navigator in the given mode for a vehicle at the origin.
pub fn navigator(config: NavigatorConfig, speed: f32) -> Navigator {
    Navigator::new(config, vehicle_at_origin(speed))
}
