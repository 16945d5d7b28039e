//! Stage thresholds for the crop and livestock growth cycles.
//!
//! Thresholds are elapsed-time values in simulation time units. They are
//! deployment configuration rather than part of the cycle contract; the
//! defaults below are the reference values. The core crate embeds
//! [`GrowthConfig`] under the `growth` key of `homestead-config.yaml`.

use serde::{Deserialize, Serialize};

/// Elapsed-time thresholds for each crop stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropThresholds {
    /// Elapsed time at which a seed becomes a sprout (default: 3.0).
    pub sprout: f64,
    /// Elapsed time at which a sprout becomes a growing plant (default: 6.0).
    pub growing: f64,
    /// Elapsed time at which the crop becomes harvestable (default: 10.0).
    pub harvestable: f64,
}

impl Default for CropThresholds {
    fn default() -> Self {
        Self {
            sprout: 3.0,
            growing: 6.0,
            harvestable: 10.0,
        }
    }
}

/// Elapsed-time thresholds for each livestock stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivestockThresholds {
    /// Elapsed time at which a juvenile starts growing (default: 5.0).
    pub growing: f64,
    /// Elapsed time at which the animal is mature (default: 10.0).
    pub mature: f64,
}

impl Default for LivestockThresholds {
    fn default() -> Self {
        Self {
            growing: 5.0,
            mature: 10.0,
        }
    }
}

/// Bundle of every growth threshold, passed to farm construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Crop stage thresholds.
    pub crop: CropThresholds,
    /// Livestock stage thresholds.
    pub livestock: LivestockThresholds,
}
