//! Simulation harness: vehicle integration, terrain generation and the
//! map-drive scenario.
//!
//! None of this is needed to navigate; it exists to exercise a
//! [`Navigator`](crate::nav::Navigator) headless and deterministically.
//!
//! ```rust,ignore
//! use sarathi::annotation::NullSink;
//! use sarathi::config::SarathiConfig;
//! use sarathi::sim::MapDriveScenario;
//!
//! let mut scenario = MapDriveScenario::new(&SarathiConfig::default())?;
//! for _ in 0..1000 {
//!     scenario.tick(&mut NullSink);
//! }
//! println!("{} laps", scenario.telemetry().laps_finished());
//! ```

mod integrator;
mod scenario;
pub mod terrain;

pub use integrator::{KinematicIntegrator, apply_braking};
pub use scenario::{MapDriveScenario, diamond_route};
pub use terrain::TerrainSettings;
