//! # Sarathi: Local Navigation Controller
//!
//! Steers a single ground vehicle across a boolean occupancy grid, either
//! freely or along a route corridor, without ever leaving the corridor or
//! touching an obstacle.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sarathi::annotation::NullSink;
//! use sarathi::core::Vec2;
//! use sarathi::grid::OccupancyGrid;
//! use sarathi::nav::{Navigator, NavigatorConfig, Surroundings, VehicleState};
//! use sarathi::route::RouteCorridor;
//! use sarathi::sim::KinematicIntegrator;
//!
//! let grid = OccupancyGrid::square(200.0, 201)?;
//! let route = RouteCorridor::with_uniform_radius(
//!     vec![Vec2::new(-50.0, 0.0), Vec2::new(50.0, 0.0)],
//!     10.0,
//!     false,
//! )?;
//! let vehicle = VehicleState::default().at(Vec2::new(-40.0, 0.0), Vec2::UNIT_X);
//! let mut navigator = Navigator::new(NavigatorConfig::curved(), vehicle);
//! let integrator = KinematicIntegrator::new();
//!
//! let dt = 0.05;
//! for tick in 0..100 {
//!     let output = navigator.update(
//!         &Surroundings::with_route(&grid, &route),
//!         tick as f32 * dt,
//!         dt,
//!         &mut NullSink,
//!     );
//!     integrator.apply(navigator.vehicle_mut(), &output, dt);
//! }
//! # Ok::<(), sarathi::SarathiError>(())
//! ```
//!
//! ## Coordinate Frame
//!
//! Ground-plane REP-103 convention: X forward at zero heading, Y left,
//! counter-clockwise positive. Positive curvature is a left turn.
//!
//! ## Architecture
//!
//! - [`core`]: Vectors, local frames, interpolation helpers
//! - [`grid`]: Occupancy grid with point, footprint, ray and arc scans
//! - [`route`]: Polyline corridor with per-segment tube radius
//! - [`nav`]: The navigation engine ([`Navigator`])
//! - [`telemetry`]: Passive reliability counters
//! - [`annotation`]: Debug drawing sink and SVG snapshots
//! - [`config`]: YAML configuration
//! - [`sim`]: Integrator, terrain generation, map-drive scenario
//!
//! ## Data Flow
//!
//! ```text
//!   OccupancyGrid ──┐
//!                   ├─▶ Surroundings ─▶ Navigator::update ─▶ SteeringOutput
//!   RouteCorridor ──┘                      │    ▲                  │
//!                                          │    │                  ▼
//!                              Telemetry ◀─┘    └──── KinematicIntegrator
//! ```

pub mod annotation;
pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod nav;
pub mod route;
pub mod sim;
pub mod telemetry;

// Re-export main types at crate root
pub use config::SarathiConfig;
pub use error::{ConfigError, GridError, Result, RouteError, SarathiError};
pub use grid::OccupancyGrid;
pub use nav::{Kinematics, NavFlags, Navigator, NavigatorConfig, SteeringOutput, Surroundings, VehicleState};
pub use route::RouteCorridor;
pub use telemetry::Telemetry;
