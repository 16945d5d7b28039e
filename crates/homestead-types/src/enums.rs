//! Enumeration types for the Homestead simulation.
//!
//! Growth stages are ordered: the derived [`Ord`] follows declaration order,
//! which matches each stage's ordinal.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Crop stages
// ---------------------------------------------------------------------------

/// Life-cycle stage of a planted crop.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum CropStage {
    /// Freshly planted, nothing visible yet.
    #[default]
    Seed,
    /// First shoots above the soil.
    Sprout,
    /// Established plant, not yet ripe.
    Growing,
    /// Ripe and ready to harvest.
    Harvestable,
}

impl CropStage {
    /// All stages in growth order.
    pub const ALL: [Self; 4] = [Self::Seed, Self::Sprout, Self::Growing, Self::Harvestable];

    /// Ordinal position of the stage (0 for `Seed` through 3 for `Harvestable`).
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Seed => 0,
            Self::Sprout => 1,
            Self::Growing => 2,
            Self::Harvestable => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Livestock stages
// ---------------------------------------------------------------------------

/// Life-cycle stage of a raised animal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum LivestockStage {
    /// Newly placed young animal.
    #[default]
    Juvenile,
    /// Half grown.
    Growing,
    /// Fully grown; produces goods if the species has a product.
    Mature,
}

impl LivestockStage {
    /// All stages in growth order.
    pub const ALL: [Self; 3] = [Self::Juvenile, Self::Growing, Self::Mature];

    /// Ordinal position of the stage (0 for `Juvenile` through 2 for `Mature`).
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Juvenile => 0,
            Self::Growing => 1,
            Self::Mature => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// Terrain classification used to seed a tile's starting soil.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TerrainKind {
    /// Balanced, easily worked soil.
    #[default]
    Loam,
    /// Grass-covered ground; fertile but matted roots make tilling harder.
    Grassland,
    /// Waterlogged lowland with poor drainage.
    Marsh,
    /// Heavy, water-retaining soil that is hard to till.
    Clay,
    /// Fast-draining, nutrient-poor soil.
    Sand,
    /// Thin soil over stone.
    Rocky,
}

impl TerrainKind {
    /// All terrain kinds.
    pub const ALL: [Self; 6] = [
        Self::Loam,
        Self::Grassland,
        Self::Marsh,
        Self::Clay,
        Self::Sand,
        Self::Rocky,
    ];
}
