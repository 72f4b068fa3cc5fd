//! Error types for Sarathi.
//!
//! Errors only arise while building the world (grid, route, configuration).
//! Once constructed, a navigation tick never fails: problems surface as
//! flags on the steering output instead.

use thiserror::Error;

/// Occupancy grid construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid resolution must be positive")]
    ZeroResolution,

    #[error("grid extent must be positive and finite (width={width}, depth={depth})")]
    InvalidExtent { width: f32, depth: f32 },
}

/// Route corridor construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("route needs at least 2 waypoints, got {count}")]
    TooFewPoints { count: usize },

    #[error("route has {points} waypoints but {radii} radii")]
    RadiiMismatch { points: usize, radii: usize },

    #[error("route radius {radius} at waypoint {index} must be finite and non-negative")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("route waypoint {index} is not finite")]
    NonFinitePoint { index: usize },

    #[error("waypoint index {index} out of range for route of {count} waypoints")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Sarathi error type
#[derive(Error, Debug)]
pub enum SarathiError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, SarathiError>;
