//! Engine binary for the Homestead simulation.
//!
//! This is the main entry point that wires together configuration, the
//! farm layout, and the paced tick loop.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `homestead-config.yaml` (or the path in
//!    `HOMESTEAD_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the species registry and farm layout
//! 4. Run the tick loop for `world.max_ticks` ticks or until Ctrl-C
//! 5. Log the result and print the final snapshot as JSON

mod error;
mod pacing;

use std::path::PathBuf;

use homestead_core::config::LoggingConfig;
use homestead_core::{Simulation, SimulationConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "homestead-config.yaml";

/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "HOMESTEAD_CONFIG";

/// Application entry point for the Homestead engine.
///
/// # Errors
///
/// Returns an error if configuration, farm construction, a tick, or the
/// final snapshot serialization fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("homestead-engine starting");
    if !config_found {
        info!("Config file not found, using defaults");
    }
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        tick_delta = config.world.tick_delta,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = config.world.max_ticks,
        "Configuration loaded"
    );

    // 3. Build the farm.
    let mut simulation = Simulation::from_config(&config).map_err(EngineError::from)?;

    // 4. Run the tick loop.
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C, running to completion");
            std::future::pending::<()>().await;
        }
    };
    let outcome = pacing::run_paced(
        &mut simulation,
        config.world.max_ticks,
        config.world.tick_interval_ms,
        shutdown,
    )
    .await
    .map_err(EngineError::from)?;

    // 5. Log results.
    for (item, quantity) in simulation.storehouse() {
        info!(%item, quantity, "Storehouse total");
    }
    info!(
        end_reason = ?outcome.end_reason,
        total_ticks = outcome.ticks,
        harvests = outcome.harvests,
        products = outcome.products,
        elapsed = simulation.elapsed(),
        "homestead-engine shutdown complete"
    );

    let snapshot =
        serde_json::to_string_pretty(&simulation.snapshot()).map_err(EngineError::from)?;
    println!("{snapshot}");

    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the simulation configuration.
///
/// Reads the file named by `HOMESTEAD_CONFIG`, or `homestead-config.yaml`
/// in the current working directory. A missing file yields the defaults;
/// the returned flag reports whether a file was found.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let config_path = std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        let config = SimulationConfig::from_file(&config_path)?;
        Ok((config, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}
