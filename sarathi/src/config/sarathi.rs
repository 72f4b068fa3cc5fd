//! Main SarathiConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SarathiError};
use crate::grid::OccupancyGrid;
use crate::nav::{NavigatorConfig, VehicleState};
use crate::sim::TerrainSettings;

use super::grid::GridSection;
use super::scenario::ScenarioSection;
use super::vehicle::VehicleSection;

/// Default config file, relative to the working directory
const DEFAULT_PATH: &str = "configs/sarathi.yaml";

/// Full Sarathi configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct SarathiConfig {
    /// World and grid settings
    #[serde(default)]
    pub grid: GridSection,

    /// Vehicle limits
    #[serde(default)]
    pub vehicle: VehicleSection,

    /// Navigation engine settings
    #[serde(default)]
    pub navigator: NavigatorConfig,

    /// Map-drive scenario settings
    #[serde(default)]
    pub scenario: ScenarioSection,
}

impl SarathiConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/sarathi.yaml)
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check ranges across all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.navigator.validate()?;
        if !(self.grid.world_size.is_finite() && self.grid.world_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "grid.world_size must be positive, got {}",
                self.grid.world_size
            )));
        }
        if self.grid.resolution == 0 {
            return Err(ConfigError::Invalid("grid.resolution must be positive".to_string()));
        }
        let vehicle = &self.vehicle;
        if !(vehicle.max_speed > 0.0 && vehicle.max_force > 0.0 && vehicle.mass > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "vehicle limits must be positive (max_speed={}, max_force={}, mass={})",
                vehicle.max_speed, vehicle.max_force, vehicle.mass
            )));
        }
        let scenario = &self.scenario;
        if !(scenario.time_step.is_finite() && scenario.time_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scenario.time_step must be positive, got {}",
                scenario.time_step
            )));
        }
        if scenario.route_radius < 0.0 || scenario.radius_range.0 < 0.0 {
            return Err(ConfigError::Invalid("route radii must be non-negative".to_string()));
        }
        Ok(())
    }

    /// Empty obstacle grid
    pub fn to_grid(&self) -> Result<OccupancyGrid, SarathiError> {
        Ok(self.grid.to_grid()?)
    }

    /// Vehicle at rest at the origin
    pub fn to_vehicle(&self) -> VehicleState {
        self.vehicle.to_vehicle()
    }

    /// Terrain generation settings for the scenario
    pub fn terrain_settings(&self) -> TerrainSettings {
        self.scenario.terrain_settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SarathiConfig::default();
        assert_eq!(config.grid.world_size, 200.0);
        assert_eq!(config.grid.resolution, 201);
        assert_eq!(config.vehicle.max_speed, 20.0);
        assert_eq!(config.navigator, NavigatorConfig::curved());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
navigator:
  curved_steering: false
  min_turning_radius: 8.0
scenario:
  seed: 7
"#;
        let config = SarathiConfig::from_yaml(yaml).unwrap();
        assert!(!config.navigator.curved_steering);
        assert!(config.navigator.incremental_steering);
        assert_eq!(config.navigator.min_turning_radius, 8.0);
        assert_eq!(config.scenario.seed, 7);
        assert_eq!(config.scenario.route_radius, 10.0);
        assert_eq!(config.grid, GridSection::default());
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = SarathiConfig::from_yaml(include_str!("../../configs/sarathi.yaml")).unwrap();
        assert_eq!(config, SarathiConfig::default());
    }

    #[test]
    fn test_load_default_reads_shipped_file() {
        // Tests run from the package root, where configs/sarathi.yaml lives
        let config = SarathiConfig::load_default().unwrap();
        assert_eq!(config, SarathiConfig::default());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SarathiConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = SarathiConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = SarathiConfig::from_yaml("vehicle:\n  max_speed: -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SarathiConfig::from_yaml("navigator:\n  path_follow_direction: 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SarathiConfig::from_yaml("grid: [1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "grid:\n  world_size: 100.0\n  resolution: 101").unwrap();
        let config = SarathiConfig::load(file.path()).unwrap();
        let grid = config.to_grid().unwrap();
        assert_eq!(grid.resolution(), 101);
        assert_eq!(grid.width(), 100.0);

        let missing = SarathiConfig::load(Path::new("/nonexistent/sarathi.yaml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
