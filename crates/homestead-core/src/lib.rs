//! Tick driver, configuration, and farm layout for the Homestead
//! simulation.
//!
//! # Modules
//!
//! - [`config`] -- Typed `homestead-config.yaml` structures and loader.
//! - [`layout`] -- Builds the starting farm from the config, with seeded
//!   soil jitter.
//! - [`tick`] -- [`Simulation`]: the per-tick grow, harvest, and collect
//!   phases plus the storehouse they fill.
//!
//! [`Simulation`]: tick::Simulation

pub mod config;
pub mod layout;
pub mod tick;

pub use config::{ConfigError, SimulationConfig};
pub use tick::{Automation, Simulation, SimulationSnapshot, TickError, TickSummary};
