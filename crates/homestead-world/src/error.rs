//! Error types for the `homestead-world` crate.
//!
//! Growth cycles report expected failures (double planting, premature
//! harvest) through `bool` and `Option` results. The registry and farm
//! layers return [`WorldError`] for lookups and tile-level rejections.

use homestead_types::{CropSpeciesId, LivestockSpeciesId, TileCoord};

/// Errors that can occur in registry and farm operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// No crop species is registered under this id.
    #[error("unknown crop species: {0}")]
    UnknownCrop(CropSpeciesId),

    /// No livestock species is registered under this id.
    #[error("unknown livestock species: {0}")]
    UnknownLivestock(LivestockSpeciesId),

    /// A species id was registered twice.
    #[error("duplicate species id: {0}")]
    DuplicateSpecies(String),

    /// No crop plot exists at the coordinate.
    #[error("no crop plot at {0}")]
    PlotNotFound(TileCoord),

    /// No livestock pen exists at the coordinate.
    #[error("no livestock pen at {0}")]
    PenNotFound(TileCoord),

    /// The tile already holds a plot or pen.
    #[error("tile {0} is already occupied")]
    TileOccupied(TileCoord),

    /// The plot already has a crop in the ground.
    #[error("plot {0} is already planted")]
    AlreadyPlanted(TileCoord),

    /// The plot's soil fails the species' hard requirements.
    #[error("soil at {coord} is unsuitable for {species}")]
    UnsuitableSoil {
        /// The plot.
        coord: TileCoord,
        /// The rejected species.
        species: CropSpeciesId,
    },

    /// The plot has no ripe crop to harvest.
    #[error("nothing to harvest at {0}")]
    NotHarvestable(TileCoord),

    /// The pen already holds an animal.
    #[error("pen {0} is already occupied by an animal")]
    PenOccupied(TileCoord),

    /// The pen holds no animal.
    #[error("pen {0} is empty")]
    PenEmpty(TileCoord),

    /// The pen's animal has no product waiting.
    #[error("no product ready at {0}")]
    ProductNotReady(TileCoord),

    /// A snapshot references a species that does not match the supplied profile.
    #[error("snapshot species {expected} does not match profile {actual}")]
    SpeciesMismatch {
        /// Species recorded in the snapshot.
        expected: String,
        /// Species of the supplied profile (or `none`).
        actual: String,
    },
}
