//! Shared type definitions for the Homestead farming simulation.
//!
//! This crate is the single source of truth for the identifiers, stage
//! enumerations, and persistence snapshots used across the workspace.
//! Types defined here flow to `TypeScript` via `ts-rs` for host tooling
//! (save editors, map viewers).
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string wrappers for species and item keys
//! - [`enums`] -- Crop and livestock stages, terrain kinds
//! - [`structs`] -- Tile coordinates and growth cycle snapshots

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{CropStage, LivestockStage, TerrainKind};
pub use ids::{CropSpeciesId, ItemId, LivestockSpeciesId};
pub use structs::{CropCycleSnapshot, LivestockCycleSnapshot, TileCoord};
