//! Builds the starting [`Farm`] from the `farm` section of the config.
//!
//! Each plot starts from its terrain's soil preset, with every factor
//! nudged by a random offset of at most `soil_jitter` drawn from an RNG
//! seeded with `world.seed`, so the same config always produces the same
//! farm.

use homestead_types::TerrainKind;
use homestead_world::{Farm, GrowthConfig, SoilProfile, SpeciesRegistry, WorldError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::config::FarmConfig;

/// Build a farm from `config`, resolving species through `registry`.
///
/// A plot whose soil turns out unsuitable for its configured crop is left
/// unplanted with a warning.
///
/// # Errors
///
/// Returns [`WorldError`] if two tiles share a coordinate or a configured
/// species is not registered.
pub fn build_farm(
    config: &FarmConfig,
    growth: GrowthConfig,
    registry: &SpeciesRegistry,
    seed: u64,
) -> Result<Farm, WorldError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut farm = Farm::new(growth);

    for plot in &config.plots {
        let coord = plot.coord();
        let soil = jittered_soil(plot.terrain, config.soil_jitter, &mut rng);
        farm.add_plot(coord, soil)?;

        let Some(crop) = &plot.crop else {
            continue;
        };
        let species = registry.crop(crop)?;
        match farm.plant(coord, species) {
            Ok(()) => {}
            Err(WorldError::UnsuitableSoil { coord, species }) => {
                warn!(
                    %coord,
                    %species,
                    terrain = ?plot.terrain,
                    "configured crop unsuitable, plot left empty"
                );
            }
            Err(other) => return Err(other),
        }
    }

    for pen in &config.pens {
        let coord = pen.coord();
        farm.add_pen(coord)?;
        if let Some(species) = &pen.species {
            farm.place_animal(coord, registry.livestock(species)?)?;
        }
    }

    debug!(
        plots = farm.plot_count(),
        planted = farm.planted_count(),
        pens = farm.pen_count(),
        animals = farm.animal_count(),
        "farm layout built"
    );
    Ok(farm)
}

/// Terrain preset with each factor offset by up to `jitter` either way.
fn jittered_soil(terrain: TerrainKind, jitter: f64, rng: &mut StdRng) -> SoilProfile {
    let base = SoilProfile::for_terrain(terrain);
    if jitter <= 0.0 {
        return base;
    }
    let mut offset = || rng.random_range(-jitter..=jitter);
    SoilProfile::new(
        base.moisture() + offset(),
        base.fertility() + offset(),
        base.drainage() + offset(),
        base.tillage_difficulty() + offset(),
    )
}
