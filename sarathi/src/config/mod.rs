//! Unified configuration loading for Sarathi.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sarathi::config::SarathiConfig;
//!
//! // Load from default path (configs/sarathi.yaml)
//! let config = SarathiConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = SarathiConfig::default();
//!
//! // Convert to runtime types
//! let grid = config.to_grid()?;
//! let vehicle = config.to_vehicle();
//! let navigator = Navigator::new(config.navigator.clone(), vehicle);
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | World size, cell count, outside value |
//! | [`VehicleSection`] | Speed, force and mass limits |
//! | [`NavigatorConfig`](crate::nav::NavigatorConfig) | Steering mode, body size, turning radius |
//! | [`ScenarioSection`] | Seed, route, terrain generation |
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   world_size: 200.0     # meters per side
//!   resolution: 201       # cells per side
//!
//! navigator:
//!   curved_steering: true
//!   min_turning_radius: 5.0
//!   path_follow_direction: 1   # -1 runs the route backwards
//!
//! scenario:
//!   seed: 42
//!   follow_route: true
//!   radius_range: [4.0, 19.0]
//! ```
//!
//! Every field is optional; missing values take their defaults. Loaded
//! files are validated before use.

pub(crate) mod defaults;
mod grid;
mod sarathi;
mod scenario;
mod vehicle;

pub use sarathi::SarathiConfig;

pub use grid::GridSection;
pub use scenario::ScenarioSection;
pub use vehicle::VehicleSection;
