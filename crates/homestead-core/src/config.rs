//! Configuration loading and typed config structures for the Homestead
//! simulation.
//!
//! The canonical configuration lives in `homestead-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every field has a default, so an empty file is a valid configuration.

use std::path::Path;

use homestead_types::{CropSpeciesId, LivestockSpeciesId, TerrainKind, TileCoord};
use homestead_world::GrowthConfig;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Explanation of what is wrong with the value.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `homestead-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Crop and livestock stage thresholds.
    #[serde(default)]
    pub growth: GrowthConfig,

    /// Farm layout and automation.
    #[serde(default)]
    pub farm: FarmConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.world.tick_delta.is_finite() || self.world.tick_delta < 0.0 {
            return Err(ConfigError::Invalid {
                field: "world.tick_delta",
                reason: format!("must be a non-negative number, got {}", self.world.tick_delta),
            });
        }
        if !(0.0..=1.0).contains(&self.farm.soil_jitter) {
            return Err(ConfigError::Invalid {
                field: "farm.soil_jitter",
                reason: format!("must be within [0, 1], got {}", self.farm.soil_jitter),
            });
        }

        let crop = &self.growth.crop;
        let crop_finite = [crop.sprout, crop.growing, crop.harvestable]
            .into_iter()
            .all(f64::is_finite);
        if !crop_finite || crop.sprout > crop.growing || crop.growing > crop.harvestable {
            return Err(ConfigError::Invalid {
                field: "growth.crop",
                reason: "thresholds must be finite with sprout <= growing <= harvestable"
                    .to_owned(),
            });
        }
        let livestock = &self.growth.livestock;
        let livestock_finite = livestock.growing.is_finite() && livestock.mature.is_finite();
        if !livestock_finite || livestock.growing > livestock.mature {
            return Err(ConfigError::Invalid {
                field: "growth.livestock",
                reason: "thresholds must be finite with growing <= mature".to_owned(),
            });
        }
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Simulated time units added per tick.
    #[serde(default = "default_tick_delta")]
    pub tick_delta: f64,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Ticks to run before the engine stops.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_delta: default_tick_delta(),
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: default_max_ticks(),
        }
    }
}

/// Farm layout and automation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FarmConfig {
    /// Harvest ripe plots automatically each tick.
    #[serde(default = "default_true")]
    pub auto_harvest: bool,

    /// Replant the same species after an automatic harvest.
    #[serde(default = "default_true")]
    pub auto_replant: bool,

    /// Collect ready livestock products automatically each tick.
    #[serde(default = "default_true")]
    pub auto_collect: bool,

    /// Maximum random offset applied to each terrain soil factor.
    #[serde(default = "default_soil_jitter")]
    pub soil_jitter: f64,

    /// Crop plots.
    #[serde(default = "default_plots")]
    pub plots: Vec<PlotConfig>,

    /// Livestock pens.
    #[serde(default = "default_pens")]
    pub pens: Vec<PenConfig>,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            auto_harvest: true,
            auto_replant: true,
            auto_collect: true,
            soil_jitter: default_soil_jitter(),
            plots: default_plots(),
            pens: default_pens(),
        }
    }
}

/// One crop plot in the farm layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlotConfig {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Terrain whose soil preset the plot starts from.
    #[serde(default)]
    pub terrain: TerrainKind,
    /// Crop to plant at startup.
    #[serde(default)]
    pub crop: Option<CropSpeciesId>,
}

impl PlotConfig {
    /// Tile coordinate of the plot.
    pub const fn coord(&self) -> TileCoord {
        TileCoord::new(self.x, self.y)
    }
}

/// One livestock pen in the farm layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PenConfig {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Animal to place at startup.
    #[serde(default)]
    pub species: Option<LivestockSpeciesId>,
}

impl PenConfig {
    /// Tile coordinate of the pen.
    pub const fn coord(&self) -> TileCoord {
        TileCoord::new(self.x, self.y)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Homestead".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_delta() -> f64 {
    1.0
}

const fn default_tick_interval_ms() -> u64 {
    250
}

const fn default_max_ticks() -> u64 {
    60
}

const fn default_true() -> bool {
    true
}

const fn default_soil_jitter() -> f64 {
    0.05
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_plots() -> Vec<PlotConfig> {
    vec![
        PlotConfig {
            x: 0,
            y: 0,
            terrain: TerrainKind::Loam,
            crop: Some(CropSpeciesId::new("wheat")),
        },
        PlotConfig {
            x: 1,
            y: 0,
            terrain: TerrainKind::Loam,
            crop: Some(CropSpeciesId::new("potato")),
        },
        PlotConfig {
            x: 2,
            y: 0,
            terrain: TerrainKind::Marsh,
            crop: Some(CropSpeciesId::new("rice")),
        },
    ]
}

fn default_pens() -> Vec<PenConfig> {
    vec![
        PenConfig {
            x: 0,
            y: 1,
            species: Some(LivestockSpeciesId::new("chicken")),
        },
        PenConfig {
            x: 1,
            y: 1,
            species: Some(LivestockSpeciesId::new("cow")),
        },
    ]
}
