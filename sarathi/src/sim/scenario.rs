//! Map-drive scenario: one vehicle crossing randomly generated terrain.
//!
//! # Route mode
//!
//! The vehicle follows a diamond-shaped route that enters the map on one
//! side and leaves on the other. Crossing the far edge finishes a lap: the
//! vehicle is teleported back to the opposite edge at the same lateral
//! position and a fresh map is generated.
//!
//! ```text
//!              e───f
//!             ╱      ╲
//!            d        ╲
//!            │         g
//!            c        ╱
//!  i ─────── h ──── b ─── a
//! ```
//!
//! # Free mode
//!
//! No route; the vehicle wanders among the rocks and is reset once it drives
//! beyond the world diagonal.
//!
//! Either way a vehicle that comes to rest while stuck is reset to its spawn
//! pose on a regenerated map.

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::integrator::KinematicIntegrator;
use super::terrain::{self, TerrainSettings};
use crate::annotation::AnnotationSink;
use crate::config::SarathiConfig;
use crate::core::Vec2;
use crate::error::{Result, RouteError};
use crate::grid::OccupancyGrid;
use crate::nav::{Kinematics, Navigator, SteeringOutput, Surroundings, VehicleState};
use crate::route::RouteCorridor;
use crate::telemetry::Telemetry;

/// Map exit threshold as a fraction of the world size
const EXIT_FRACTION: f32 = 0.51;

/// Build the diamond route for a square world of side `world_size`.
///
/// The first and last waypoints lie far outside the world so the route
/// crosses the whole map.
pub fn diamond_route(world_size: f32, radius: f32) -> std::result::Result<RouteCorridor, RouteError> {
    let m = world_size * 0.4;
    let n = world_size / 8.0;
    let o = world_size * 2.0;

    let p = Vec2::new(0.0, m);
    let q = Vec2::new(0.0, m - n);
    let r = Vec2::new(-m, 0.0);
    let s = Vec2::new(2.0 * n, 0.0);
    let t = Vec2::new(o, 0.0);
    let v = Vec2::new(n, 0.0);

    let points = vec![
        t - p,
        s + v - p,
        s - q,
        s + q,
        s - v + p,
        p,
        r,
        -p,
        -t - p,
    ];
    RouteCorridor::with_uniform_radius(points, radius, false)
}

/// Headless map-drive simulation.
pub struct MapDriveScenario {
    grid: OccupancyGrid,
    route: Option<RouteCorridor>,
    navigator: Navigator<VehicleState>,
    integrator: KinematicIntegrator,
    spawn_vehicle: VehicleState,
    terrain: TerrainSettings,
    rng: StdRng,
    world_size: f32,
    time_step: f32,
    time: f32,
}

impl MapDriveScenario {
    /// Build the world from `config`, generate the first map and spawn the
    /// vehicle.
    pub fn new(config: &SarathiConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.to_grid()?;
        let world_size = config.grid.world_size;
        let route = if config.scenario.follow_route {
            Some(diamond_route(world_size, config.scenario.route_radius)?)
        } else {
            None
        };
        let spawn_vehicle = config.to_vehicle();
        let navigator = Navigator::new(config.navigator.clone(), spawn_vehicle.clone());

        let mut scenario = Self {
            grid,
            route,
            navigator,
            integrator: KinematicIntegrator::new(),
            spawn_vehicle,
            terrain: config.terrain_settings(),
            rng: StdRng::seed_from_u64(config.scenario.seed),
            world_size,
            time_step: config.scenario.time_step,
            time: 0.0,
        };
        scenario.reset();
        Ok(scenario)
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn route(&self) -> Option<&RouteCorridor> {
        self.route.as_ref()
    }

    pub fn navigator(&self) -> &Navigator<VehicleState> {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator<VehicleState> {
        &mut self.navigator
    }

    pub fn vehicle(&self) -> &VehicleState {
        self.navigator.vehicle()
    }

    pub fn telemetry(&self) -> &Telemetry {
        self.navigator.telemetry()
    }

    /// Simulation clock (seconds)
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Fixed step used by [`tick`](Self::tick)
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Spawn pose: the entry edge in route mode, the center otherwise.
    fn spawn_pose(&self) -> (Vec2, Vec2) {
        if self.route.is_some() {
            let d = self.navigator.config().path_follow_direction as f32;
            (
                Vec2::new(self.world_size * d * 0.6, self.world_size * -0.4),
                Vec2::new(-d, 0.0),
            )
        } else {
            (Vec2::ZERO, Vec2::UNIT_X)
        }
    }

    /// New map, vehicle back at the spawn pose and at rest, new lap.
    pub fn reset(&mut self) {
        self.regenerate_map();
        let (position, forward) = self.spawn_pose();
        let mut vehicle = self.spawn_vehicle.clone();
        vehicle.place(position, forward);
        *self.navigator.vehicle_mut() = vehicle;
        self.navigator.reset();
        if self.route.is_some() {
            self.navigator.telemetry_mut().start_lap();
        }
        info!("Scenario reset at ({:.1}, {:.1})", position.x, position.y);
    }

    /// Run the route the other way and start over.
    pub fn reverse_path_follow_direction(&mut self) {
        let direction = &mut self.navigator.config_mut().path_follow_direction;
        *direction = if *direction > 0 { -1 } else { 1 };
        self.reset();
    }

    /// Switch between curved and linear prediction.
    pub fn toggle_curved_steering(&mut self) {
        let config = self.navigator.config_mut();
        config.curved_steering = !config.curved_steering;
        info!("Curved steering {}", if config.curved_steering { "on" } else { "off" });
    }

    fn regenerate_map(&mut self) {
        let direction = self.navigator.config().path_follow_direction;
        terrain::regenerate(&mut self.grid, self.route.as_mut(), direction, &self.terrain, &mut self.rng);
    }

    /// Advance the clock by one fixed step.
    pub fn tick(&mut self, sink: &mut dyn AnnotationSink) -> SteeringOutput {
        let dt = self.time_step;
        self.time += dt;
        self.step(self.time, dt, sink)
    }

    /// One simulation step: navigate, integrate, handle map exit and stuck
    /// resets.
    pub fn step(&mut self, time: f32, dt: f32, sink: &mut dyn AnnotationSink) -> SteeringOutput {
        let surroundings = Surroundings {
            grid: &self.grid,
            route: self.route.as_ref(),
        };
        let output = self.navigator.update(&surroundings, time, dt, sink);
        self.integrator.apply(self.navigator.vehicle_mut(), &output, dt);

        if self.handle_exit_from_map() {
            self.regenerate_map();
        }

        if output.reset_requested {
            self.reset();
        }
        output
    }

    /// Teleport across the map after a finished lap (route mode) or reset
    /// after leaving the world (free mode). True when a new map is needed.
    fn handle_exit_from_map(&mut self) -> bool {
        let position = self.navigator.vehicle().position();
        if self.route.is_none() {
            let world_diagonal = (self.world_size * self.world_size / 2.0).sqrt();
            if position.length() > world_diagonal {
                info!("Left the world at ({:.1}, {:.1})", position.x, position.y);
                self.reset();
            }
            return false;
        }

        let fx = self.navigator.vehicle().forward().x;
        let edge = self.world_size * EXIT_FRACTION;
        if !((fx > 0.0 && position.x > edge) || (fx < 0.0 && position.x < -edge)) {
            return false;
        }

        let telemetry = self.navigator.telemetry_mut();
        telemetry.start_lap();
        telemetry.finish_lap();
        info!("Lap {} finished at t={:.1}", telemetry.laps_finished(), self.time);

        let entry_side = if position.x < 0.0 { 1.0 } else { -1.0 };
        let offset = self.navigator.vehicle().speed() * self.navigator.path_look_ahead_time();
        let x = entry_side * (self.world_size * 0.5 + offset);
        let vehicle = self.navigator.vehicle_mut();
        vehicle.position.x = x;
        vehicle.last_position = vehicle.position;
        self.navigator.restart_progress_tracking();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::NullSink;
    use approx::assert_relative_eq;

    fn quiet_config() -> SarathiConfig {
        let mut config = SarathiConfig::default();
        config.scenario.random_rocks = false;
        config
    }

    #[test]
    fn test_diamond_route_waypoints() {
        let route = diamond_route(200.0, 10.0).unwrap();
        let points = route.points();
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], Vec2::new(400.0, -80.0));
        assert_eq!(points[1], Vec2::new(75.0, -80.0));
        assert_eq!(points[2], Vec2::new(50.0, -55.0));
        assert_eq!(points[3], Vec2::new(50.0, 55.0));
        assert_eq!(points[4], Vec2::new(25.0, 80.0));
        assert_eq!(points[5], Vec2::new(0.0, 80.0));
        assert_eq!(points[6], Vec2::new(-80.0, 0.0));
        assert_eq!(points[7], Vec2::new(0.0, -80.0));
        assert_eq!(points[8], Vec2::new(-400.0, -80.0));
        assert!(!route.is_cyclic());
    }

    #[test]
    fn test_spawn_on_route_entry() {
        let scenario = MapDriveScenario::new(&quiet_config()).unwrap();
        let v = scenario.vehicle();
        assert_relative_eq!(v.position.x, 120.0, epsilon = 1e-4);
        assert_relative_eq!(v.position.y, -80.0, epsilon = 1e-4);
        assert_eq!(v.forward(), Vec2::new(-1.0, 0.0));
        assert_eq!(v.speed, 0.0);
        assert_eq!(scenario.telemetry().laps_started(), 1);
        assert!(scenario.route().unwrap().is_inside_path(v.position));
    }

    #[test]
    fn test_reverse_direction_spawns_on_other_side() {
        let mut scenario = MapDriveScenario::new(&quiet_config()).unwrap();
        scenario.reverse_path_follow_direction();
        let v = scenario.vehicle();
        assert_relative_eq!(v.position.x, -120.0, epsilon = 1e-4);
        assert_relative_eq!(v.position.y, -80.0, epsilon = 1e-4);
        assert_eq!(v.forward(), Vec2::UNIT_X);
        assert_eq!(scenario.navigator().config().path_follow_direction, -1);
    }

    #[test]
    fn test_vehicle_drives_off() {
        let mut scenario = MapDriveScenario::new(&quiet_config()).unwrap();
        let start = scenario.vehicle().position;
        for _ in 0..40 {
            scenario.tick(&mut NullSink);
        }
        assert!(scenario.vehicle().speed > 0.0);
        assert!(scenario.vehicle().position.x < start.x);
        assert_relative_eq!(scenario.time(), 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_exit_teleports_to_entry_edge() {
        let mut scenario = MapDriveScenario::new(&quiet_config()).unwrap();
        let vehicle = scenario.navigator_mut().vehicle_mut();
        vehicle.place(Vec2::new(-103.0, -80.0), Vec2::new(-1.0, 0.0));
        vehicle.speed = 10.0;
        scenario.navigator_mut().restart_progress_tracking();

        scenario.tick(&mut NullSink);
        let v = scenario.vehicle();
        assert!(v.position.x > 100.0);
        assert_eq!(scenario.telemetry().laps_finished(), 1);
        assert_eq!(scenario.telemetry().laps_started(), 2);
    }

    #[test]
    fn test_free_mode_resets_beyond_world() {
        let mut config = quiet_config();
        config.scenario.follow_route = false;
        let mut scenario = MapDriveScenario::new(&config).unwrap();
        assert!(scenario.route().is_none());
        assert_eq!(scenario.vehicle().position, Vec2::ZERO);

        scenario
            .navigator_mut()
            .vehicle_mut()
            .place(Vec2::new(150.0, 150.0), Vec2::UNIT_X);
        scenario.tick(&mut NullSink);
        assert_eq!(scenario.vehicle().position, Vec2::ZERO);
        assert_eq!(scenario.telemetry().laps_started(), 0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = SarathiConfig::default();
        let mut a = MapDriveScenario::new(&config).unwrap();
        let mut b = MapDriveScenario::new(&config).unwrap();
        assert_eq!(a.grid(), b.grid());
        for _ in 0..100 {
            let oa = a.tick(&mut NullSink);
            let ob = b.tick(&mut NullSink);
            assert_eq!(oa, ob);
        }
        assert_eq!(a.vehicle(), b.vehicle());
    }
}
