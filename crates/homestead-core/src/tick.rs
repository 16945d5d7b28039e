//! Tick cycle: the phased loop that drives the Homestead simulation.
//!
//! Each call to [`Simulation::step`] runs these phases:
//!
//! 1. **Grow** -- advance every plot (scaled by its soil) and every pen by
//!    the configured tick delta.
//! 2. **Harvest** -- if enabled, harvest every ripe plot into the
//!    storehouse and optionally replant the same species.
//! 3. **Collect** -- if enabled, collect every ready livestock product into
//!    the storehouse.
//!
//! The tick cycle is deterministic: tiles are visited in coordinate order
//! and the only randomness (soil jitter) happens at layout time.

use std::collections::BTreeMap;

use homestead_types::{ItemId, TileCoord};
use homestead_world::{CropHarvest, Farm, FarmSnapshot, SpeciesRegistry, WorldError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::layout;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// A farm operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// Which per-tick chores the simulation performs on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Automation {
    /// Harvest ripe plots.
    pub harvest: bool,
    /// Replant after harvesting.
    pub replant: bool,
    /// Collect ready livestock products.
    pub collect: bool,
}

impl Default for Automation {
    fn default() -> Self {
        Self {
            harvest: true,
            replant: true,
            collect: true,
        }
    }
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed (1-based).
    pub tick: u64,
    /// Plots that became harvestable.
    pub ripened: Vec<TileCoord>,
    /// Pens whose animal reached maturity.
    pub matured: Vec<TileCoord>,
    /// Crops harvested automatically.
    pub harvested: Vec<CropHarvest>,
    /// Plots replanted after harvesting.
    pub replanted: Vec<TileCoord>,
    /// Livestock products collected, by pen.
    pub products: Vec<(TileCoord, ItemId)>,
}

/// Persisted state of a whole simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    /// Ticks executed so far.
    pub tick: u64,
    /// Simulated time elapsed so far.
    pub elapsed: f64,
    /// Every farm tile.
    pub farm: FarmSnapshot,
    /// Items gathered so far, by item.
    pub storehouse: BTreeMap<ItemId, u64>,
}

/// A farm plus the clock and storehouse that drive it.
#[derive(Debug, Clone)]
pub struct Simulation {
    farm: Farm,
    registry: SpeciesRegistry,
    tick: u64,
    elapsed: f64,
    tick_delta: f64,
    automation: Automation,
    storehouse: BTreeMap<ItemId, u64>,
}

impl Simulation {
    /// Wrap an existing farm.
    pub const fn new(
        farm: Farm,
        registry: SpeciesRegistry,
        tick_delta: f64,
        automation: Automation,
    ) -> Self {
        Self {
            farm,
            registry,
            tick: 0,
            elapsed: 0.0,
            tick_delta,
            automation,
            storehouse: BTreeMap::new(),
        }
    }

    /// Build the default species registry and the configured farm layout.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::World`] if the layout references an unknown
    /// species or repeats a tile.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, TickError> {
        let registry = SpeciesRegistry::with_defaults();
        let farm = layout::build_farm(&config.farm, config.growth, &registry, config.world.seed)?;
        info!(
            name = %config.world.name,
            plots = farm.plot_count(),
            pens = farm.pen_count(),
            "Simulation initialized"
        );
        Ok(Self::new(
            farm,
            registry,
            config.world.tick_delta,
            automation_from(config),
        ))
    }

    /// Resume from a snapshot taken by [`Simulation::snapshot`].
    ///
    /// # Errors
    ///
    /// Returns [`TickError::World`] if a species in the snapshot is unknown
    /// to `registry`.
    pub fn restore(
        snapshot: &SimulationSnapshot,
        registry: SpeciesRegistry,
        config: &SimulationConfig,
    ) -> Result<Self, TickError> {
        let farm = Farm::restore(&snapshot.farm, &registry, config.growth)?;
        let mut simulation = Self::new(
            farm,
            registry,
            config.world.tick_delta,
            automation_from(config),
        );
        simulation.tick = snapshot.tick;
        simulation.elapsed = snapshot.elapsed;
        simulation.storehouse.clone_from(&snapshot.storehouse);
        Ok(simulation)
    }

    /// The farm being simulated.
    pub const fn farm(&self) -> &Farm {
        &self.farm
    }

    /// Mutable farm, for manual planting and soil management between ticks.
    pub const fn farm_mut(&mut self) -> &mut Farm {
        &mut self.farm
    }

    /// Species registry used for replanting and restore.
    pub const fn registry(&self) -> &SpeciesRegistry {
        &self.registry
    }

    /// Ticks executed so far.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated time elapsed so far.
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Items gathered so far, by item.
    pub const fn storehouse(&self) -> &BTreeMap<ItemId, u64> {
        &self.storehouse
    }

    /// Execute one tick.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::TickOverflow`] if the tick counter is exhausted,
    /// or [`TickError::World`] if an automatic chore hits an unexpected farm
    /// error.
    pub fn step(&mut self) -> Result<TickSummary, TickError> {
        let tick = self.tick.checked_add(1).ok_or(TickError::TickOverflow)?;

        // --- Phase 1: Grow ---
        let report = self.farm.tick(self.tick_delta);
        let mut summary = TickSummary {
            tick,
            ripened: report.ripened,
            matured: report.matured,
            ..TickSummary::default()
        };

        // --- Phase 2: Harvest ---
        if self.automation.harvest {
            self.phase_harvest(&mut summary)?;
        }

        // --- Phase 3: Collect ---
        if self.automation.collect {
            self.phase_collect(&mut summary)?;
        }

        self.tick = tick;
        self.elapsed += self.tick_delta;

        debug!(
            tick,
            ripened = summary.ripened.len(),
            harvested = summary.harvested.len(),
            products = summary.products.len(),
            "Tick complete"
        );
        Ok(summary)
    }

    /// Plain-field snapshot for persistence.
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            tick: self.tick,
            elapsed: self.elapsed,
            farm: self.farm.snapshot(),
            storehouse: self.storehouse.clone(),
        }
    }

    fn phase_harvest(&mut self, summary: &mut TickSummary) -> Result<(), TickError> {
        for coord in self.farm.harvestable_plots() {
            // Replant from the plot's own species so crops planted through
            // `farm_mut` outside the registry still cycle.
            let species = self
                .farm
                .plot(coord)
                .and_then(|plot| plot.species().cloned());
            let harvest = self.farm.harvest_crop(coord)?;
            store(&mut self.storehouse, &harvest.item, u64::from(harvest.quantity));

            if let Some(species) = species.filter(|_| self.automation.replant) {
                match self.farm.plant(coord, species) {
                    Ok(()) => summary.replanted.push(coord),
                    Err(error) => {
                        debug!(%coord, species = %harvest.species, %error, "not replanting");
                    }
                }
            }
            summary.harvested.push(harvest);
        }
        Ok(())
    }

    fn phase_collect(&mut self, summary: &mut TickSummary) -> Result<(), TickError> {
        for coord in self.farm.pens_with_product() {
            let item = self.farm.collect_product(coord)?;
            store(&mut self.storehouse, &item, 1);
            summary.products.push((coord, item));
        }
        Ok(())
    }
}

const fn automation_from(config: &SimulationConfig) -> Automation {
    Automation {
        harvest: config.farm.auto_harvest,
        replant: config.farm.auto_replant,
        collect: config.farm.auto_collect,
    }
}

fn store(storehouse: &mut BTreeMap<ItemId, u64>, item: &ItemId, quantity: u64) {
    let entry = storehouse.entry(item.clone()).or_insert(0);
    *entry = entry.saturating_add(quantity);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use homestead_types::{CropSpeciesId, LivestockSpeciesId, TerrainKind};
    use homestead_world::{CropRequirement, CropSpecies, GrowthConfig, SoilProfile};

    use super::*;

    fn one_plot_one_pen(automation: Automation) -> Simulation {
        let registry = SpeciesRegistry::with_defaults();
        let mut farm = Farm::new(GrowthConfig::default());
        let plot = TileCoord::new(0, 0);
        let pen = TileCoord::new(1, 0);
        let wheat = registry.crop(&CropSpeciesId::new("wheat"));
        let chicken = registry.livestock(&LivestockSpeciesId::new("chicken"));
        let ok = farm
            .add_plot(plot, SoilProfile::for_terrain(TerrainKind::Loam))
            .and_then(|()| farm.add_pen(pen))
            .and_then(|()| wheat.and_then(|wheat| farm.plant(plot, wheat)))
            .and_then(|()| chicken.and_then(|chicken| farm.place_animal(pen, chicken)));
        assert!(ok.is_ok());
        Simulation::new(farm, registry, 1.0, automation)
    }

    #[test]
    fn step_advances_clock() {
        let mut sim = one_plot_one_pen(Automation::default());
        for expected in 1..=3 {
            let summary = sim.step().ok();
            assert_eq!(summary.map(|s| s.tick), Some(expected));
        }
        assert_eq!(sim.tick(), 3);
        assert!((sim.elapsed() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn auto_harvest_and_replant() {
        let mut sim = one_plot_one_pen(Automation::default());
        let mut harvests = 0_usize;
        for _ in 0..40 {
            let summary = sim.step().unwrap_or_default();
            assert_eq!(summary.harvested.len(), summary.replanted.len());
            harvests += summary.harvested.len();
        }
        assert!(harvests >= 1);
        assert!(sim.storehouse().get(&ItemId::new("wheat")).copied().unwrap_or(0) >= 1);
        assert_eq!(sim.farm().planted_count(), 1);
    }

    #[test]
    fn harvest_without_replant_leaves_plot_empty() {
        let mut sim = one_plot_one_pen(Automation {
            replant: false,
            ..Automation::default()
        });
        for _ in 0..40 {
            let summary = sim.step().unwrap_or_default();
            assert!(summary.replanted.is_empty());
        }
        assert_eq!(sim.farm().planted_count(), 0);
    }

    #[test]
    fn manual_mode_leaves_produce_in_place() {
        let mut sim = one_plot_one_pen(Automation {
            harvest: false,
            replant: false,
            collect: false,
        });
        for _ in 0..40 {
            assert!(sim.step().is_ok());
        }
        assert!(sim.storehouse().is_empty());
        assert_eq!(sim.farm().harvestable_plots(), vec![TileCoord::new(0, 0)]);
        assert_eq!(sim.farm().pens_with_product(), vec![TileCoord::new(1, 0)]);
    }

    #[test]
    fn eggs_are_collected() {
        let mut sim = one_plot_one_pen(Automation::default());
        let mut eggs = 0_usize;
        for _ in 0..18 {
            eggs += sim.step().unwrap_or_default().products.len();
        }
        // Mature at tick 10, eggs at ticks 14 and 18.
        assert_eq!(eggs, 2);
        assert_eq!(sim.storehouse().get(&ItemId::new("egg")).copied(), Some(2));
    }

    #[test]
    fn snapshot_restore_resumes_identically() {
        let config = SimulationConfig::default();
        let mut sim = Simulation::from_config(&config).unwrap();
        for _ in 0..7 {
            assert!(sim.step().is_ok());
        }

        let snapshot = sim.snapshot();
        let mut resumed =
            Simulation::restore(&snapshot, SpeciesRegistry::with_defaults(), &config).unwrap();

        for _ in 0..30 {
            assert_eq!(sim.step().unwrap(), resumed.step().unwrap());
        }
        assert_eq!(resumed.snapshot(), sim.snapshot());
    }

    #[test]
    fn crop_outside_registry_still_cycles() {
        let mut sim = Simulation::new(
            Farm::new(GrowthConfig::default()),
            SpeciesRegistry::with_defaults(),
            100.0,
            Automation::default(),
        );
        let plot = TileCoord::new(0, 0);
        let kale = Arc::new(CropSpecies::new(
            "kale",
            "Kale",
            CropRequirement::default(),
            "kale",
            2,
        ));
        sim.farm_mut()
            .add_plot(plot, SoilProfile::for_terrain(TerrainKind::Loam))
            .unwrap();
        sim.farm_mut().plant(plot, kale).unwrap();

        let summary = sim.step().unwrap();
        assert_eq!(summary.harvested.len(), 1);
        assert_eq!(summary.replanted, vec![plot]);
        assert_eq!(sim.tick(), 1);
        assert!((sim.elapsed() - 100.0).abs() < f64::EPSILON);
        let stored = sim.storehouse().get(&ItemId::new("kale")).copied();
        assert_eq!(stored, summary.harvested.first().map(|h| u64::from(h.quantity)));
        assert_eq!(sim.farm().planted_count(), 1);
    }

    #[test]
    fn failed_replant_skips_the_plot_and_finishes_the_tick() {
        let mut sim = one_plot_one_pen(Automation::default());
        let plot = TileCoord::new(0, 0);
        // Too dry for wheat to be planted again, though the standing crop keeps growing.
        sim.farm_mut().soil_mut(plot).unwrap().set_moisture(0.0);

        let mut harvested_at = None;
        for expected in 1..=100 {
            let summary = sim.step().unwrap();
            assert_eq!(sim.tick(), expected);
            if !summary.harvested.is_empty() {
                assert!(summary.replanted.is_empty());
                harvested_at = Some(expected);
                break;
            }
        }
        assert!(harvested_at.is_some());
        assert!(sim.storehouse().get(&ItemId::new("wheat")).is_some());
        assert_eq!(sim.farm().planted_count(), 0);
    }

    #[test]
    fn overflowing_tick_is_an_error() {
        let mut sim = one_plot_one_pen(Automation::default());
        sim.tick = u64::MAX;
        assert!(matches!(sim.step(), Err(TickError::TickOverflow)));
    }
}
