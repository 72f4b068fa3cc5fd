//! Per-vehicle navigation engine.
//!
//! One [`Navigator::update`] call per simulation tick:
//!
//! ```text
//! footprint collision ─▶ telemetry
//!        │
//!  stuck / off path / imminent? ──yes──▶ brake, zero force
//!        │ no
//!  hint ─▶ scan ─▶ avoidance table ─┬─ avoid: weighted avoidance + slow down
//!                                   └─ clear: target speed + path following
//!        │
//!  incremental smoothing ─▶ turning-radius limit ─▶ truncate
//!        │
//!  progress trail ─▶ going in circles? ─▶ stuck at rest? ─▶ reset request
//! ```

use log::{debug, info};

use super::avoidance::{self, AvoidanceClause, PolicyInputs};
use super::config::NavigatorConfig;
use super::motion::Motion;
use super::path_follow::{PathFollowParams, steer_to_follow_path};
use super::progress::ProgressMonitor;
use super::scanner::{ScanContact, ScanParams, detect_imminent_collision, scan_for_obstacles};
use super::speed::{max_speed_for_curvature, steer_for_target_speed};
use super::steering::{SteeringSmoother, limit_turning_radius, steer_toward_heading};
use super::vehicle::{Kinematics, VehicleState};
use crate::annotation::{AnnotationSink, Color};
use crate::core::Vec2;
use crate::grid::OccupancyGrid;
use crate::route::RouteCorridor;
use crate::telemetry::Telemetry;

/// Relative speed below which a stuck vehicle counts as stopped
const STOPPED_RELATIVE_SPEED: f32 = 0.001;

/// Heading alignment weight near a waypoint
const WAYPOINT_ALIGN_WEIGHT: f32 = 0.5;

/// Heading alignment weight along a segment
const SEGMENT_ALIGN_WEIGHT: f32 = 0.1;

/// World the navigator reads during one tick.
#[derive(Clone, Copy, Debug)]
pub struct Surroundings<'a> {
    /// Obstacle map
    pub grid: &'a OccupancyGrid,
    /// Route to follow, if any
    pub route: Option<&'a RouteCorridor>,
}

impl<'a> Surroundings<'a> {
    /// Free driving on `grid`
    pub fn new(grid: &'a OccupancyGrid) -> Self {
        Self { grid, route: None }
    }

    /// Follow `route` on `grid`
    pub fn with_route(grid: &'a OccupancyGrid, route: &'a RouteCorridor) -> Self {
        Self {
            grid,
            route: Some(route),
        }
    }
}

/// Status flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavFlags {
    /// Braking until reset
    pub stuck: bool,
    /// Some body corner is outside the route
    pub off_path: bool,
    /// Body footprint overlaps an obstacle
    pub collision_detected: bool,
}

/// Result of one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SteeringOutput {
    /// Steering force, bounded by the vehicle's force limit
    pub force: Vec2,
    /// Braking rate to apply instead of steering
    pub braking: Option<f32>,
    /// Flags after this tick
    pub flags: NavFlags,
    /// Obstacle contact measured this tick
    pub contact: ScanContact,
    /// Avoidance clause that decided, when avoidance ran
    pub clause: Option<AvoidanceClause>,
    /// Unit avoidance direction (zero when none)
    pub avoidance: Vec2,
    /// The vehicle is stuck at rest and should be reset
    pub reset_requested: bool,
}

/// Local navigation controller for one vehicle.
#[derive(Clone, Debug)]
pub struct Navigator<V: Kinematics = VehicleState> {
    config: NavigatorConfig,
    vehicle: V,
    smoother: SteeringSmoother,
    progress: ProgressMonitor,
    flags: NavFlags,
    contact: ScanContact,
    last_obstacle: Option<Vec2>,
    stuck_reported: bool,
    telemetry: Telemetry,
}

impl<V: Kinematics> Navigator<V> {
    /// Navigator for `vehicle`; the progress trail starts behind it.
    pub fn new(config: NavigatorConfig, vehicle: V) -> Self {
        let progress = ProgressMonitor::new(vehicle.position(), vehicle.forward());
        Self {
            config,
            vehicle,
            smoother: SteeringSmoother::new(),
            progress,
            flags: NavFlags::default(),
            contact: ScanContact::Clear,
            last_obstacle: None,
            stuck_reported: false,
            telemetry: Telemetry::new(),
        }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Settings are read afresh every tick, so changes apply immediately.
    pub fn config_mut(&mut self) -> &mut NavigatorConfig {
        &mut self.config
    }

    pub fn vehicle(&self) -> &V {
        &self.vehicle
    }

    /// Mutable vehicle access for the integrator.
    pub fn vehicle_mut(&mut self) -> &mut V {
        &mut self.vehicle
    }

    pub fn flags(&self) -> NavFlags {
        self.flags
    }

    /// Contact from the latest scan
    pub fn contact(&self) -> ScanContact {
        self.contact
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn telemetry_mut(&mut self) -> &mut Telemetry {
        &mut self.telemetry
    }

    /// Trailing position used for stuck-cycle detection
    pub fn smoothed_position(&self) -> Vec2 {
        self.progress.smoothed_position()
    }

    /// Accumulated incremental steering
    pub fn accumulated_steering(&self) -> Vec2 {
        self.smoother.accumulated()
    }

    /// Nearest obstacle from the latest scan
    pub fn last_obstacle(&self) -> Option<Vec2> {
        self.last_obstacle
    }

    /// Prediction horizon for path following at the current speed
    pub fn path_look_ahead_time(&self) -> f32 {
        self.config.path_look_ahead_time(self.vehicle.speed())
    }

    /// Return to the normal running state. Telemetry is kept.
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.flags = NavFlags::default();
        self.contact = ScanContact::Clear;
        self.last_obstacle = None;
        self.stuck_reported = false;
        self.restart_progress_tracking();
    }

    /// Put the progress trail behind the vehicle again (after a teleport).
    pub fn restart_progress_tracking(&mut self) {
        self.progress
            .restart(self.vehicle.position(), self.vehicle.forward());
    }

    /// Body corners in world coordinates (front-left first, clockwise).
    pub fn body_corners(&self) -> [Vec2; 4] {
        let p = self.vehicle.position();
        let front = self.vehicle.forward() * self.config.half_length;
        let side = self.vehicle.side() * self.config.half_width;
        [p + front + side, p + front - side, p - front - side, p - front + side]
    }

    fn body_inside(&self, route: &RouteCorridor) -> bool {
        self.body_corners()
            .iter()
            .all(|&corner| route.is_inside_path(corner))
    }

    /// Compute the steering output for one tick.
    ///
    /// `time` is the simulation clock, `dt` the tick length. A zero `dt`
    /// leaves every rate-dependent state untouched.
    pub fn update(
        &mut self,
        surroundings: &Surroundings<'_>,
        time: f32,
        dt: f32,
        sink: &mut dyn AnnotationSink,
    ) -> SteeringOutput {
        let motion = Motion::of(&self.vehicle);
        let grid = surroundings.grid;
        let hw = self.config.half_width;
        let hl = self.config.half_length;
        let curved = self.config.curved_steering;

        let collision = grid.scan_footprint(&motion.local_space(), -hw, hw, -hl, hl);
        self.flags.collision_detected = collision;
        self.telemetry.record_collision(collision, time);

        let off_path = surroundings
            .route
            .is_some_and(|route| !self.body_inside(route));
        self.flags.off_path = off_path;

        let imminent = detect_imminent_collision(
            grid,
            &motion,
            hw,
            hl,
            self.config.imminent_look_ahead_time(motion.speed),
            curved,
            sink,
        );

        let mut output = SteeringOutput::default();

        if self.flags.stuck || off_path || imminent {
            if !self.flags.stuck {
                debug!(
                    "Braking at ({:.1}, {:.1}): off_path={} imminent={}",
                    motion.position.x, motion.position.y, off_path, imminent
                );
                if off_path {
                    self.telemetry.count_stuck_off_path();
                }
            }
            self.flags.stuck = true;
            self.contact = ScanContact::Clear;
            self.smoother.reset();
            output.braking = Some(self.config.braking_rate());
        } else {
            let raw = self.combined_steering(surroundings, &motion, dt, sink, &mut output);
            let smoothed = if self.config.incremental_steering {
                self.smoother.smooth(&motion, raw, dt, curved)
            } else {
                raw
            };
            let limited = limit_turning_radius(&motion, smoothed, self.config.turning_curvature_limit());
            output.force = limited.truncate_length(motion.max_force);
        }

        self.telemetry.record_motion(motion.speed, dt);
        if surroundings.route.is_some() {
            self.telemetry.record_path_follow(off_path, dt);
        }

        self.progress.update(motion.position, dt);
        if surroundings.route.is_some() && motion.speed > 0.0 {
            let circles = self.progress.going_in_circles(motion.position);
            if circles && !self.flags.stuck {
                debug!("Going in circles near ({:.1}, {:.1})", motion.position.x, motion.position.y);
                self.telemetry.count_stuck_cycle();
            }
            if circles {
                self.flags.stuck = true;
            }
        }

        if self.flags.stuck && motion.relative_speed() < STOPPED_RELATIVE_SPEED {
            if !self.stuck_reported {
                self.stuck_reported = true;
                self.telemetry.count_stuck();
                info!(
                    "Stuck at ({:.1}, {:.1}), total {}",
                    motion.position.x,
                    motion.position.y,
                    self.telemetry.stuck_count()
                );
            }
            output.reset_requested = true;
        }

        if sink.enabled() {
            let color = if self.flags.collision_detected {
                Color::RED
            } else if self.flags.stuck {
                Color::YELLOW
            } else {
                Color::BLACK
            };
            sink.circle(motion.position, self.config.safety_radius(motion.relative_speed()), color);
            sink.circle(self.progress.smoothed_position(), 0.5, Color::WHITE);
        }

        output.flags = self.flags;
        output.contact = self.contact;
        output
    }

    /// Avoidance, speed and path steering before smoothing.
    fn combined_steering(
        &mut self,
        surroundings: &Surroundings<'_>,
        motion: &Motion,
        dt: f32,
        sink: &mut dyn AnnotationSink,
        output: &mut SteeringOutput,
    ) -> Vec2 {
        let config = &self.config;
        let relative_speed = motion.relative_speed();
        let radius = config.safety_radius(relative_speed);
        let avoid_time = config.obstacle_look_ahead_time(motion.speed, relative_speed);
        let direction = config.path_follow_direction;

        let hint = surroundings.route.and_then(|route| {
            avoidance::steering_hint(route, motion, direction, self.last_obstacle, config.half_width, avoid_time)
        });
        if let Some(hint) = hint
            && sink.enabled()
        {
            sink.line(motion.position, motion.position + hint.normalize() * 5.0, Color::MAGENTA);
        }

        let scan = scan_for_obstacles(
            surroundings.grid,
            motion,
            ScanParams {
                horizon: avoid_time,
                radius,
                wing_slope: config.wing_slope(relative_speed),
                curved: config.curved_steering,
            },
            sink,
        );
        self.contact = scan.contact;
        self.last_obstacle = scan.nearest_obstacle;

        let inputs = PolicyInputs::new(&scan, motion, config.avoidance_curvature_limit(), hint);
        let decision = avoidance::decide(&inputs, motion);
        output.clause = Some(decision.clause);
        output.avoidance = decision.steering;
        if hint.is_some() && dt != 0.0 {
            self.telemetry.count_hint(decision.followed_hint);
        }

        let path_heading = surroundings
            .route
            .map(|route| route.tangent_at_in_direction(motion.position, direction));

        if !decision.steering.is_zero() {
            let creep = config.curved_steering && scan.contact == ScanContact::Scraping;
            let target_speed = if creep {
                max_speed_for_curvature(motion, config.max_curvature(), path_heading)
            } else {
                0.0
            };
            let weight = 3.0 + 3.0 * relative_speed;
            if sink.enabled() {
                sink.line(motion.position, motion.position + decision.steering * 3.0, Color::RED);
            }
            return decision.steering * weight + steer_for_target_speed(motion, target_speed);
        }

        let target_speed = max_speed_for_curvature(motion, config.max_curvature(), path_heading);
        let mut steering = steer_for_target_speed(motion, target_speed);

        let (Some(route), Some(heading)) = (surroundings.route, path_heading) else {
            return steering;
        };

        let follow = steer_to_follow_path(
            route,
            motion,
            PathFollowParams {
                direction,
                prediction_time: config.path_look_ahead_time(motion.speed),
                radius,
                curved: config.curved_steering,
            },
            sink,
        );

        if !follow.is_zero() {
            if follow.dot(motion.forward) < 0.0 {
                steering = follow;
            } else {
                steering += follow;
            }
        } else {
            let weight = if route.near_waypoint(motion.position) {
                WAYPOINT_ALIGN_WEIGHT
            } else {
                SEGMENT_ALIGN_WEIGHT
            };
            steering += steer_toward_heading(motion, heading) * weight;
        }
        steering
    }
}
