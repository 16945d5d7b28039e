//! Soil, crop, and livestock simulation for the Homestead farm.
//!
//! Each farm tile carries a [`SoilProfile`]. A crop species declares a
//! [`CropRequirement`] which gates planting and turns soil quality into a
//! growth-rate and a yield multiplier. Crops progress through a
//! [`CropGrowthCycle`]; animals in pens progress through a
//! [`LivestockGrowthCycle`] and, once mature, periodically produce goods.
//!
//! # Modules
//!
//! - [`soil`] -- Per-tile soil conditions with clamping setters and terrain
//!   presets.
//! - [`requirement`] -- Crop soil tolerance: suitability gate plus growth and
//!   yield multipliers.
//! - [`crop_cycle`] -- Seed to harvest state machine driven by scaled time.
//! - [`livestock`] -- Livestock profiles and the growth/production cycle.
//! - [`registry`] -- Crop species and livestock profiles shared by id.
//! - [`farm`] -- Plots and pens keyed by tile, ticked together, with
//!   snapshot and restore.
//! - [`config`] -- Stage thresholds.
//! - [`error`] -- Error types for farm operations.

pub mod config;
pub mod crop_cycle;
pub mod error;
pub mod farm;
pub mod livestock;
pub mod registry;
pub mod requirement;
pub mod soil;

// Re-export primary types at crate root.
pub use config::{CropThresholds, GrowthConfig, LivestockThresholds};
pub use crop_cycle::CropGrowthCycle;
pub use error::WorldError;
pub use farm::{
    CropHarvest, CropPlot, Farm, FarmSnapshot, MIN_HARVEST_QUANTITY, PenSnapshot, PlotSnapshot,
    TickReport,
};
pub use livestock::{LivestockGrowthCycle, LivestockProduct, LivestockProfile};
pub use registry::{CropSpecies, SpeciesRegistry};
pub use requirement::{CropRequirement, CropRequirementBuilder};
pub use soil::SoilProfile;
