//! Plain data structs shared between the simulation and its host.
//!
//! Covers tile coordinates and the persistence snapshots of the two growth
//! cycles. Snapshots carry only plain fields; the owning cycle types in
//! `homestead-world` rebuild their runtime state from them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{CropStage, LivestockStage};
use crate::ids::LivestockSpeciesId;

// ---------------------------------------------------------------------------
// TileCoord
// ---------------------------------------------------------------------------

/// Integer grid coordinate of a farm tile.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct TileCoord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl TileCoord {
    /// Create a coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Growth cycle snapshots
// ---------------------------------------------------------------------------

/// Persisted fields of a crop growth cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CropCycleSnapshot {
    /// Whether a seed is in the ground.
    pub planted: bool,
    /// Current stage.
    pub stage: CropStage,
    /// Accumulated (already multiplier-scaled) growth time.
    pub elapsed: f64,
}

/// Persisted fields of a livestock growth cycle.
///
/// `species` is `None` when the pen is empty. The species profile itself is
/// never persisted; it is resolved from the content registry on restore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LivestockCycleSnapshot {
    /// Species of the animal in the pen, if any.
    pub species: Option<LivestockSpeciesId>,
    /// Current stage.
    pub stage: LivestockStage,
    /// Accumulated growth time (frozen once mature).
    pub growth_elapsed: f64,
    /// Accumulated production time toward the next product.
    pub product_elapsed: f64,
    /// Whether a product is waiting to be collected.
    pub product_ready: bool,
}
