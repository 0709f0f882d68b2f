//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LandscapeConfig {
    /// Grid and height settings.
    pub terrain: TerrainConfig,
    /// Region clustering settings.
    pub regions: RegionConfig,
    /// Prop placement settings.
    pub props: PropConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
    /// Run seed. When absent a seed is drawn at startup and logged.
    pub seed: Option<u64>,
}

/// Grid and height configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Side length of the square grid in world units.
    pub size: f64,
    /// Grid cells per side.
    pub subdivisions: u32,
    /// Frequency of the trigonometric height noise.
    pub noise_scale: f64,
}

/// k-means clustering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegionConfig {
    /// Number of regions.
    pub n_clusters: usize,
    /// Lloyd iteration cap.
    pub max_iterations: usize,
    /// Convergence threshold, relative to the mean per-axis variance.
    pub tolerance: f64,
}

/// Prop placement configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PropConfig {
    /// Trees to place on grassland and forest.
    pub tree_count: usize,
    /// Rocks to place on mountains.
    pub rock_count: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size: 30.0,
            subdivisions: 70,
            noise_scale: 0.3,
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            n_clusters: 3,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

impl Default for PropConfig {
    fn default() -> Self {
        Self {
            tree_count: 50,
            rock_count: 20,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Validation ---

impl LandscapeConfig {
    /// Checks every numeric setting before any generation stage runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("terrain.size", self.terrain.size)?;
        positive("terrain.noise_scale", self.terrain.noise_scale)?;
        nonzero("terrain.subdivisions", self.terrain.subdivisions as usize)?;
        nonzero("regions.n_clusters", self.regions.n_clusters)?;
        nonzero("regions.max_iterations", self.regions.max_iterations)?;
        if !self.regions.tolerance.is_finite() || self.regions.tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "regions.tolerance",
                reason: format!("must be finite and non-negative, got {}", self.regions.tolerance),
            });
        }
        nonzero("props.tree_count", self.props.tree_count)?;
        nonzero("props.rock_count", self.props.rock_count)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

fn nonzero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::Invalid {
            field,
            reason: "must be at least 1".to_string(),
        })
    } else {
        Ok(())
    }
}

// --- Load / Save ---

impl LandscapeConfig {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: LandscapeConfig =
                ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = LandscapeConfig::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        log::debug!("Saved config to {}", config_path.display());
        Ok(())
    }
}
