//! Per-tile soil conditions.
//!
//! A [`SoilProfile`] holds four fractions in `[0.0, 1.0]`: moisture,
//! fertility, drainage, and tillage difficulty. Every constructor and setter
//! clamps its input into that range; out-of-range values are never rejected.
//! Non-finite input clamps to `0.0`.
//!
//! Starting soil for a tile comes either from [`SoilProfile::default`]
//! (0.5 across the board) or from a terrain preset via
//! [`SoilProfile::for_terrain`]:
//!
//! | Terrain   | Moisture | Fertility | Drainage | Tillage |
//! |-----------|----------|-----------|----------|---------|
//! | Loam      | 0.50     | 0.60      | 0.60     | 0.30    |
//! | Grassland | 0.45     | 0.55      | 0.60     | 0.50    |
//! | Marsh     | 0.90     | 0.50      | 0.10     | 0.30    |
//! | Clay      | 0.70     | 0.50      | 0.20     | 0.80    |
//! | Sand      | 0.20     | 0.25      | 0.90     | 0.10    |
//! | Rocky     | 0.30     | 0.20      | 0.80     | 0.90    |

use homestead_types::TerrainKind;
use serde::{Deserialize, Serialize};

/// Clamp a value into `[0.0, 1.0]`, mapping NaN to `0.0`.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Growing conditions of a single tile.
///
/// `SoilProfile` is `Copy`: copies share no state with the original.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSoil")]
pub struct SoilProfile {
    moisture: f64,
    fertility: f64,
    drainage: f64,
    tillage_difficulty: f64,
}

/// Unclamped wire form, so deserialized soil goes through the same clamping
/// as every other constructor.
#[derive(Deserialize)]
struct RawSoil {
    moisture: f64,
    fertility: f64,
    drainage: f64,
    tillage_difficulty: f64,
}

impl From<RawSoil> for SoilProfile {
    fn from(raw: RawSoil) -> Self {
        Self::new(raw.moisture, raw.fertility, raw.drainage, raw.tillage_difficulty)
    }
}

impl Default for SoilProfile {
    fn default() -> Self {
        Self {
            moisture: 0.5,
            fertility: 0.5,
            drainage: 0.5,
            tillage_difficulty: 0.5,
        }
    }
}

impl SoilProfile {
    /// Create a soil profile, clamping every field into `[0.0, 1.0]`.
    pub fn new(moisture: f64, fertility: f64, drainage: f64, tillage_difficulty: f64) -> Self {
        Self {
            moisture: clamp_unit(moisture),
            fertility: clamp_unit(fertility),
            drainage: clamp_unit(drainage),
            tillage_difficulty: clamp_unit(tillage_difficulty),
        }
    }

    /// Starting soil for a terrain kind (see the module table).
    pub fn for_terrain(terrain: TerrainKind) -> Self {
        match terrain {
            TerrainKind::Loam => Self::new(0.5, 0.6, 0.6, 0.3),
            TerrainKind::Grassland => Self::new(0.45, 0.55, 0.6, 0.5),
            TerrainKind::Marsh => Self::new(0.9, 0.5, 0.1, 0.3),
            TerrainKind::Clay => Self::new(0.7, 0.5, 0.2, 0.8),
            TerrainKind::Sand => Self::new(0.2, 0.25, 0.9, 0.1),
            TerrainKind::Rocky => Self::new(0.3, 0.2, 0.8, 0.9),
        }
    }

    /// Water content.
    pub const fn moisture(&self) -> f64 {
        self.moisture
    }

    /// Nutrient content.
    pub const fn fertility(&self) -> f64 {
        self.fertility
    }

    /// How quickly water drains away.
    pub const fn drainage(&self) -> f64 {
        self.drainage
    }

    /// How hard the ground is to work.
    pub const fn tillage_difficulty(&self) -> f64 {
        self.tillage_difficulty
    }

    /// Set moisture, clamped into `[0.0, 1.0]`.
    pub fn set_moisture(&mut self, value: f64) {
        self.moisture = clamp_unit(value);
    }

    /// Set fertility, clamped into `[0.0, 1.0]`.
    pub fn set_fertility(&mut self, value: f64) {
        self.fertility = clamp_unit(value);
    }

    /// Set drainage, clamped into `[0.0, 1.0]`.
    pub fn set_drainage(&mut self, value: f64) {
        self.drainage = clamp_unit(value);
    }

    /// Set tillage difficulty, clamped into `[0.0, 1.0]`.
    pub fn set_tillage_difficulty(&mut self, value: f64) {
        self.tillage_difficulty = clamp_unit(value);
    }
}
