//! Farm tiles: crop plots and livestock pens keyed by grid coordinate.
//!
//! The farm owns each tile's soil and growth state and is where soil
//! meets the growth cycles: every [`Farm::tick`] scales the delta for each
//! planted plot by its species' growth multiplier before advancing the crop,
//! and [`Farm::harvest_crop`] scales the species' base yield by the yield
//! multiplier. Pens advance by the raw delta.
//!
//! Tiles are independent of each other; nothing one tile does during a
//! tick affects another.

use std::collections::BTreeMap;
use std::sync::Arc;

use homestead_types::{
    CropCycleSnapshot, CropSpeciesId, ItemId, LivestockCycleSnapshot, LivestockStage, TileCoord,
};
use serde::{Deserialize, Serialize};

use crate::config::GrowthConfig;
use crate::crop_cycle::CropGrowthCycle;
use crate::error::WorldError;
use crate::livestock::{LivestockGrowthCycle, LivestockProfile};
use crate::registry::{CropSpecies, SpeciesRegistry};
use crate::soil::SoilProfile;

/// Smallest quantity a successful crop harvest grants.
pub const MIN_HARVEST_QUANTITY: u32 = 1;

// ---------------------------------------------------------------------------
// CropPlot
// ---------------------------------------------------------------------------

/// A farmable tile: its soil, the species planted on it, and growth state.
///
/// `species` is set exactly while the cycle is planted.
#[derive(Debug, Clone, PartialEq)]
pub struct CropPlot {
    soil: SoilProfile,
    species: Option<Arc<CropSpecies>>,
    cycle: CropGrowthCycle,
}

impl CropPlot {
    /// Soil conditions of the plot.
    pub const fn soil(&self) -> &SoilProfile {
        &self.soil
    }

    /// Species currently planted.
    pub const fn species(&self) -> Option<&Arc<CropSpecies>> {
        self.species.as_ref()
    }

    /// Growth state.
    pub const fn cycle(&self) -> &CropGrowthCycle {
        &self.cycle
    }

    /// Growth multiplier of the planted species on this soil.
    pub fn growth_multiplier(&self) -> Option<f64> {
        self.species
            .as_ref()
            .map(|species| species.requirement.growth_multiplier(&self.soil))
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Items granted by a crop harvest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropHarvest {
    /// The harvested plot.
    pub coord: TileCoord,
    /// Species that was harvested.
    pub species: CropSpeciesId,
    /// Item to grant.
    pub item: ItemId,
    /// Number of items to grant.
    pub quantity: u32,
}

/// Tiles whose state changed notably during one [`Farm::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Plots that became harvestable this tick.
    pub ripened: Vec<TileCoord>,
    /// Pens whose product became ready this tick.
    pub products_ready: Vec<TileCoord>,
    /// Pens whose animal reached maturity this tick.
    pub matured: Vec<TileCoord>,
}

// ---------------------------------------------------------------------------
// Farm
// ---------------------------------------------------------------------------

/// All crop plots and livestock pens of one farm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Farm {
    plots: BTreeMap<TileCoord, CropPlot>,
    pens: BTreeMap<TileCoord, LivestockGrowthCycle>,
    growth: GrowthConfig,
}

impl Farm {
    /// Create an empty farm whose tiles grow against `growth` thresholds.
    pub const fn new(growth: GrowthConfig) -> Self {
        Self {
            plots: BTreeMap::new(),
            pens: BTreeMap::new(),
            growth,
        }
    }

    /// Thresholds used for new tiles.
    pub const fn growth_config(&self) -> GrowthConfig {
        self.growth
    }

    /// Add an empty crop plot.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TileOccupied`] if the tile already holds a plot
    /// or a pen.
    pub fn add_plot(&mut self, coord: TileCoord, soil: SoilProfile) -> Result<(), WorldError> {
        self.ensure_vacant(coord)?;
        self.plots.insert(
            coord,
            CropPlot {
                soil,
                species: None,
                cycle: CropGrowthCycle::new(self.growth.crop),
            },
        );
        Ok(())
    }

    /// Add an empty livestock pen.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TileOccupied`] if the tile already holds a plot
    /// or a pen.
    pub fn add_pen(&mut self, coord: TileCoord) -> Result<(), WorldError> {
        self.ensure_vacant(coord)?;
        self.pens
            .insert(coord, LivestockGrowthCycle::new(self.growth.livestock));
        Ok(())
    }

    /// Remove a plot or pen (tile demolished). Returns whether anything was
    /// removed.
    pub fn remove_tile(&mut self, coord: TileCoord) -> bool {
        self.plots.remove(&coord).is_some() || self.pens.remove(&coord).is_some()
    }

    /// The plot at `coord`, if any.
    pub fn plot(&self, coord: TileCoord) -> Option<&CropPlot> {
        self.plots.get(&coord)
    }

    /// The pen at `coord`, if any.
    pub fn pen(&self, coord: TileCoord) -> Option<&LivestockGrowthCycle> {
        self.pens.get(&coord)
    }

    /// Iterate over plots in coordinate order.
    pub fn plots(&self) -> impl Iterator<Item = (&TileCoord, &CropPlot)> {
        self.plots.iter()
    }

    /// Iterate over pens in coordinate order.
    pub fn pens(&self) -> impl Iterator<Item = (&TileCoord, &LivestockGrowthCycle)> {
        self.pens.iter()
    }

    /// Number of plots.
    pub fn plot_count(&self) -> usize {
        self.plots.len()
    }

    /// Number of pens.
    pub fn pen_count(&self) -> usize {
        self.pens.len()
    }

    /// Number of plots with a crop in the ground.
    pub fn planted_count(&self) -> usize {
        self.plots
            .values()
            .filter(|plot| plot.cycle.is_planted())
            .count()
    }

    /// Number of pens holding an animal.
    pub fn animal_count(&self) -> usize {
        self.pens.values().filter(|pen| pen.has_animal()).count()
    }

    /// Soil of the plot at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlotNotFound`] if there is no plot there.
    pub fn soil(&self, coord: TileCoord) -> Result<&SoilProfile, WorldError> {
        self.plots
            .get(&coord)
            .map(|plot| &plot.soil)
            .ok_or(WorldError::PlotNotFound(coord))
    }

    /// Mutable soil of the plot at `coord`, for external soil management
    /// (irrigation, fertilizing, tilling).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlotNotFound`] if there is no plot there.
    pub fn soil_mut(&mut self, coord: TileCoord) -> Result<&mut SoilProfile, WorldError> {
        self.plots
            .get_mut(&coord)
            .map(|plot| &mut plot.soil)
            .ok_or(WorldError::PlotNotFound(coord))
    }

    /// Plant `species` on the plot at `coord`.
    ///
    /// # Errors
    ///
    /// - [`WorldError::PlotNotFound`] if there is no plot there.
    /// - [`WorldError::AlreadyPlanted`] if a crop is already in the ground.
    /// - [`WorldError::UnsuitableSoil`] if the soil fails the species gate.
    pub fn plant(&mut self, coord: TileCoord, species: Arc<CropSpecies>) -> Result<(), WorldError> {
        let plot = self
            .plots
            .get_mut(&coord)
            .ok_or(WorldError::PlotNotFound(coord))?;
        if plot.cycle.is_planted() {
            return Err(WorldError::AlreadyPlanted(coord));
        }
        if !species.requirement.is_suitable(&plot.soil) {
            return Err(WorldError::UnsuitableSoil {
                coord,
                species: species.id.clone(),
            });
        }
        if !plot.cycle.plant() {
            return Err(WorldError::AlreadyPlanted(coord));
        }
        tracing::debug!(%coord, species = %species.id, "crop planted");
        plot.species = Some(species);
        Ok(())
    }

    /// Advance every tile by `delta` time units.
    ///
    /// Each planted plot advances by `delta` times its current growth
    /// multiplier; each pen by `delta`.
    pub fn tick(&mut self, delta: f64) -> TickReport {
        let mut report = TickReport::default();

        for (coord, plot) in &mut self.plots {
            let Some(species) = plot.species.as_ref() else {
                continue;
            };
            let multiplier = species.requirement.growth_multiplier(&plot.soil);
            let was_ripe = plot.cycle.is_harvestable();
            plot.cycle.advance(delta * multiplier);
            if !was_ripe && plot.cycle.is_harvestable() {
                report.ripened.push(*coord);
            }
        }

        for (coord, pen) in &mut self.pens {
            let was_mature = pen.stage() == LivestockStage::Mature;
            let was_ready = pen.product_ready();
            pen.advance(delta);
            if !was_mature && pen.stage() == LivestockStage::Mature {
                report.matured.push(*coord);
            }
            if !was_ready && pen.product_ready() {
                report.products_ready.push(*coord);
            }
        }

        tracing::trace!(
            delta,
            ripened = report.ripened.len(),
            matured = report.matured.len(),
            products_ready = report.products_ready.len(),
            "farm ticked"
        );
        report
    }

    /// Harvest the ripe crop at `coord`.
    ///
    /// The quantity is the species' base yield scaled by its yield
    /// multiplier on the plot's soil, rounded, and at least
    /// [`MIN_HARVEST_QUANTITY`]. The plot is left unplanted.
    ///
    /// # Errors
    ///
    /// - [`WorldError::PlotNotFound`] if there is no plot there.
    /// - [`WorldError::NotHarvestable`] if nothing ripe is planted.
    pub fn harvest_crop(&mut self, coord: TileCoord) -> Result<CropHarvest, WorldError> {
        let plot = self
            .plots
            .get_mut(&coord)
            .ok_or(WorldError::PlotNotFound(coord))?;
        if !plot.cycle.is_harvestable() {
            return Err(WorldError::NotHarvestable(coord));
        }
        let species = plot
            .species
            .take()
            .ok_or(WorldError::NotHarvestable(coord))?;
        let multiplier = species.requirement.yield_multiplier(&plot.soil);
        if !plot.cycle.harvest() {
            plot.species = Some(species);
            return Err(WorldError::NotHarvestable(coord));
        }

        let quantity = scaled_quantity(species.base_yield, multiplier);
        tracing::debug!(%coord, species = %species.id, quantity, "crop harvested");
        Ok(CropHarvest {
            coord,
            species: species.id.clone(),
            item: species.harvest_item.clone(),
            quantity,
        })
    }

    /// Put a young animal in the pen at `coord`.
    ///
    /// # Errors
    ///
    /// - [`WorldError::PenNotFound`] if there is no pen there.
    /// - [`WorldError::PenOccupied`] if the pen already holds an animal.
    pub fn place_animal(
        &mut self,
        coord: TileCoord,
        profile: Arc<LivestockProfile>,
    ) -> Result<(), WorldError> {
        let pen = self
            .pens
            .get_mut(&coord)
            .ok_or(WorldError::PenNotFound(coord))?;
        if !pen.place_animal(Some(profile)) {
            return Err(WorldError::PenOccupied(coord));
        }
        Ok(())
    }

    /// Collect the ready product from the pen at `coord`.
    ///
    /// # Errors
    ///
    /// - [`WorldError::PenNotFound`] if there is no pen there.
    /// - [`WorldError::PenEmpty`] if the pen holds no animal.
    /// - [`WorldError::ProductNotReady`] if nothing is waiting.
    pub fn collect_product(&mut self, coord: TileCoord) -> Result<ItemId, WorldError> {
        let pen = self
            .pens
            .get_mut(&coord)
            .ok_or(WorldError::PenNotFound(coord))?;
        let item = pen
            .species()
            .ok_or(WorldError::PenEmpty(coord))?
            .product()
            .map(|product| product.item().clone())
            .ok_or(WorldError::ProductNotReady(coord))?;
        if !pen.harvest_product() {
            return Err(WorldError::ProductNotReady(coord));
        }
        Ok(item)
    }

    /// Slaughter the animal in the pen at `coord`, returning its meat item.
    ///
    /// # Errors
    ///
    /// - [`WorldError::PenNotFound`] if there is no pen there.
    /// - [`WorldError::PenEmpty`] if the pen holds no animal.
    pub fn slaughter(&mut self, coord: TileCoord) -> Result<ItemId, WorldError> {
        self.pens
            .get_mut(&coord)
            .ok_or(WorldError::PenNotFound(coord))?
            .slaughter()
            .ok_or(WorldError::PenEmpty(coord))
    }

    /// Plots whose crop is ripe, in coordinate order.
    pub fn harvestable_plots(&self) -> Vec<TileCoord> {
        self.plots
            .iter()
            .filter(|(_, plot)| plot.cycle.is_harvestable())
            .map(|(coord, _)| *coord)
            .collect()
    }

    /// Pens with a product waiting, in coordinate order.
    pub fn pens_with_product(&self) -> Vec<TileCoord> {
        self.pens
            .iter()
            .filter(|(_, pen)| pen.product_ready())
            .map(|(coord, _)| *coord)
            .collect()
    }

    /// Plain-field snapshot of every tile.
    pub fn snapshot(&self) -> FarmSnapshot {
        FarmSnapshot {
            plots: self
                .plots
                .iter()
                .map(|(coord, plot)| PlotSnapshot {
                    coord: *coord,
                    soil: plot.soil,
                    species: plot.species.as_ref().map(|species| species.id.clone()),
                    cycle: plot.cycle.snapshot(),
                })
                .collect(),
            pens: self
                .pens
                .iter()
                .map(|(coord, pen)| PenSnapshot {
                    coord: *coord,
                    cycle: pen.snapshot(),
                })
                .collect(),
        }
    }

    /// Rebuild a farm from a snapshot, resolving species through `registry`.
    ///
    /// A plot whose snapshot names no species is restored unplanted.
    ///
    /// # Errors
    ///
    /// - [`WorldError::UnknownCrop`] / [`WorldError::UnknownLivestock`] if a
    ///   species id is not registered.
    /// - [`WorldError::TileOccupied`] if two snapshot entries share a tile.
    pub fn restore(
        snapshot: &FarmSnapshot,
        registry: &SpeciesRegistry,
        growth: GrowthConfig,
    ) -> Result<Self, WorldError> {
        let mut farm = Self::new(growth);

        for entry in &snapshot.plots {
            farm.ensure_vacant(entry.coord)?;
            let species = entry
                .species
                .as_ref()
                .map(|id| registry.crop(id))
                .transpose()?;
            let cycle = if species.is_some() {
                CropGrowthCycle::restore(&entry.cycle, growth.crop)
            } else {
                CropGrowthCycle::new(growth.crop)
            };
            let species = species.filter(|_| cycle.is_planted());
            farm.plots.insert(
                entry.coord,
                CropPlot {
                    soil: entry.soil,
                    species,
                    cycle,
                },
            );
        }

        for entry in &snapshot.pens {
            farm.ensure_vacant(entry.coord)?;
            let profile = entry
                .cycle
                .species
                .as_ref()
                .map(|id| registry.livestock(id))
                .transpose()?;
            let cycle = LivestockGrowthCycle::restore(&entry.cycle, profile, growth.livestock)?;
            farm.pens.insert(entry.coord, cycle);
        }

        Ok(farm)
    }

    fn ensure_vacant(&self, coord: TileCoord) -> Result<(), WorldError> {
        if self.plots.contains_key(&coord) || self.pens.contains_key(&coord) {
            return Err(WorldError::TileOccupied(coord));
        }
        Ok(())
    }
}

/// `base * multiplier`, rounded, clamped to `[MIN_HARVEST_QUANTITY, u32::MAX]`.
fn scaled_quantity(base: u32, multiplier: f64) -> u32 {
    let scaled = (f64::from(base) * multiplier).round();
    // Clamped into u32 range before the cast; huge base yields saturate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let quantity = scaled.clamp(0.0, f64::from(u32::MAX)) as u32;
    quantity.max(MIN_HARVEST_QUANTITY)
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Persisted state of one crop plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSnapshot {
    /// Tile coordinate.
    pub coord: TileCoord,
    /// Soil conditions.
    pub soil: SoilProfile,
    /// Species planted, if any.
    pub species: Option<CropSpeciesId>,
    /// Growth state.
    pub cycle: CropCycleSnapshot,
}

/// Persisted state of one livestock pen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenSnapshot {
    /// Tile coordinate.
    pub coord: TileCoord,
    /// Growth and production state.
    pub cycle: LivestockCycleSnapshot,
}

/// Persisted state of a whole farm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmSnapshot {
    /// Every crop plot.
    pub plots: Vec<PlotSnapshot>,
    /// Every livestock pen.
    pub pens: Vec<PenSnapshot>,
}

#[cfg(test)]
mod tests {
    use homestead_types::{CropStage, LivestockSpeciesId, TerrainKind};

    use super::*;

    fn registry() -> SpeciesRegistry {
        SpeciesRegistry::with_defaults()
    }

    fn crop(registry: &SpeciesRegistry, id: &str) -> Arc<CropSpecies> {
        registry
            .crop(&CropSpeciesId::new(id))
            .unwrap_or_else(|_| Arc::new(CropSpecies::new(id, id, Default::default(), id, 1)))
    }

    fn animal(registry: &SpeciesRegistry, id: &str) -> Arc<LivestockProfile> {
        registry
            .livestock(&LivestockSpeciesId::new(id))
            .unwrap_or_else(|_| Arc::new(LivestockProfile::pig()))
    }

    /// A farm with one loam plot at (0, 0) and one pen at (1, 0).
    fn small_farm() -> Farm {
        let mut farm = Farm::default();
        assert!(
            farm.add_plot(TileCoord::new(0, 0), SoilProfile::for_terrain(TerrainKind::Loam))
                .is_ok()
        );
        assert!(farm.add_pen(TileCoord::new(1, 0)).is_ok());
        farm
    }

    #[test]
    fn tiles_cannot_overlap() {
        let mut farm = small_farm();
        let plot = TileCoord::new(0, 0);
        let pen = TileCoord::new(1, 0);
        assert_eq!(
            farm.add_plot(plot, SoilProfile::default()),
            Err(WorldError::TileOccupied(plot))
        );
        assert_eq!(farm.add_pen(plot), Err(WorldError::TileOccupied(plot)));
        assert_eq!(
            farm.add_plot(pen, SoilProfile::default()),
            Err(WorldError::TileOccupied(pen))
        );
        assert_eq!(farm.plot_count(), 1);
        assert_eq!(farm.pen_count(), 1);
    }

    #[test]
    fn plant_checks_tile_and_soil() {
        let reg = registry();
        let mut farm = small_farm();
        let coord = TileCoord::new(0, 0);

        assert_eq!(
            farm.plant(TileCoord::new(9, 9), crop(&reg, "wheat")),
            Err(WorldError::PlotNotFound(TileCoord::new(9, 9)))
        );
        assert!(matches!(
            farm.plant(coord, crop(&reg, "rice")),
            Err(WorldError::UnsuitableSoil { .. })
        ));
        assert_eq!(farm.planted_count(), 0);

        assert!(farm.plant(coord, crop(&reg, "wheat")).is_ok());
        assert_eq!(
            farm.plant(coord, crop(&reg, "wheat")),
            Err(WorldError::AlreadyPlanted(coord))
        );
        assert_eq!(farm.planted_count(), 1);
    }

    #[test]
    fn tick_scales_crop_growth_by_soil() {
        let reg = registry();
        let mut farm = small_farm();
        let coord = TileCoord::new(0, 0);
        assert!(farm.plant(coord, crop(&reg, "wheat")).is_ok());

        let multiplier = farm
            .plot(coord)
            .and_then(CropPlot::growth_multiplier)
            .unwrap_or(0.0);
        assert!(multiplier > 0.1 && multiplier < 1.0);

        farm.tick(4.0);
        let elapsed = farm.plot(coord).map_or(0.0, |plot| plot.cycle().elapsed());
        assert!((elapsed - 4.0 * multiplier).abs() < 1e-9);
    }

    #[test]
    fn crop_ripens_and_harvests_with_yield() {
        let reg = registry();
        let mut farm = small_farm();
        let coord = TileCoord::new(0, 0);
        assert!(farm.plant(coord, crop(&reg, "wheat")).is_ok());

        assert_eq!(farm.harvest_crop(coord), Err(WorldError::NotHarvestable(coord)));

        let report = farm.tick(100.0);
        assert_eq!(report.ripened, vec![coord]);
        assert_eq!(farm.harvestable_plots(), vec![coord]);
        // Already ripe: not reported again.
        assert!(farm.tick(1.0).ripened.is_empty());

        let harvest = farm.harvest_crop(coord).ok();
        assert_eq!(harvest.as_ref().map(|h| h.item.as_str()), Some("wheat"));
        assert!(harvest.is_some_and(|h| h.quantity >= MIN_HARVEST_QUANTITY));

        let plot = farm.plot(coord);
        assert!(plot.is_some_and(|p| !p.cycle().is_planted() && p.species().is_none()));
        assert!(farm.plant(coord, crop(&reg, "wheat")).is_ok());
    }

    #[test]
    fn soil_changes_affect_next_tick() {
        let reg = registry();
        let mut farm = small_farm();
        let coord = TileCoord::new(0, 0);
        assert!(farm.plant(coord, crop(&reg, "wheat")).is_ok());
        let before = farm.plot(coord).and_then(CropPlot::growth_multiplier);

        if let Ok(soil) = farm.soil_mut(coord) {
            soil.set_tillage_difficulty(1.0);
        }
        let after = farm.plot(coord).and_then(CropPlot::growth_multiplier);
        assert!(after < before);
        assert!(farm.soil_mut(TileCoord::new(5, 5)).is_err());
    }

    #[test]
    fn pen_lifecycle() {
        let reg = registry();
        let mut farm = small_farm();
        let coord = TileCoord::new(1, 0);

        assert_eq!(farm.collect_product(coord), Err(WorldError::PenEmpty(coord)));
        assert_eq!(farm.slaughter(coord), Err(WorldError::PenEmpty(coord)));
        assert!(farm.place_animal(coord, animal(&reg, "cow")).is_ok());
        assert_eq!(
            farm.place_animal(coord, animal(&reg, "pig")),
            Err(WorldError::PenOccupied(coord))
        );

        let report = farm.tick(10.0);
        assert_eq!(report.matured, vec![coord]);
        assert_eq!(farm.collect_product(coord), Err(WorldError::ProductNotReady(coord)));

        let report = farm.tick(8.0);
        assert_eq!(report.products_ready, vec![coord]);
        assert_eq!(farm.pens_with_product(), vec![coord]);
        assert_eq!(farm.collect_product(coord), Ok(ItemId::new("milk")));

        assert_eq!(farm.slaughter(coord), Ok(ItemId::new("beef")));
        assert_eq!(farm.animal_count(), 0);
    }

    #[test]
    fn pig_has_no_product_to_collect() {
        let reg = registry();
        let mut farm = small_farm();
        let coord = TileCoord::new(1, 0);
        assert!(farm.place_animal(coord, animal(&reg, "pig")).is_ok());
        farm.tick(50.0);
        assert_eq!(farm.collect_product(coord), Err(WorldError::ProductNotReady(coord)));
    }

    #[test]
    fn missing_pen_is_reported() {
        let reg = registry();
        let mut farm = small_farm();
        let coord = TileCoord::new(0, 0);
        assert_eq!(
            farm.place_animal(coord, animal(&reg, "cow")),
            Err(WorldError::PenNotFound(coord))
        );
    }

    #[test]
    fn remove_tile_frees_coordinate() {
        let mut farm = small_farm();
        assert!(farm.remove_tile(TileCoord::new(0, 0)));
        assert!(!farm.remove_tile(TileCoord::new(0, 0)));
        assert!(farm.add_pen(TileCoord::new(0, 0)).is_ok());
    }

    #[test]
    fn snapshot_restore_roundtrip() {
        let reg = registry();
        let mut farm = small_farm();
        let plot = TileCoord::new(0, 0);
        let pen = TileCoord::new(1, 0);
        assert!(farm.plant(plot, crop(&reg, "potato")).is_ok());
        assert!(farm.place_animal(pen, animal(&reg, "chicken")).is_ok());
        farm.tick(6.0);
        farm.tick(6.0);

        let snapshot = farm.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap_or_default();
        let decoded: FarmSnapshot = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(decoded, snapshot);

        let restored = Farm::restore(&decoded, &reg, GrowthConfig::default());
        assert_eq!(restored.as_ref().ok(), Some(&farm));

        let restored = restored.unwrap_or_default();
        assert_eq!(
            restored.pen(pen).map(LivestockGrowthCycle::stage),
            Some(LivestockStage::Mature)
        );
        assert!(
            restored
                .plot(plot)
                .is_some_and(|p| p.cycle().stage() >= CropStage::Sprout)
        );
    }

    #[test]
    fn restore_rejects_unknown_species() {
        let reg = registry();
        let mut snapshot = small_farm().snapshot();
        if let Some(entry) = snapshot.plots.first_mut() {
            entry.species = Some(CropSpeciesId::new("mandrake"));
            entry.cycle.planted = true;
        }
        let restored = Farm::restore(&snapshot, &reg, GrowthConfig::default());
        assert_eq!(
            restored.err(),
            Some(WorldError::UnknownCrop(CropSpeciesId::new("mandrake")))
        );
    }

    #[test]
    fn scaled_quantity_rounds_and_floors() {
        assert_eq!(scaled_quantity(5, 0.75), 4);
        assert_eq!(scaled_quantity(4, 1.5), 6);
        assert_eq!(scaled_quantity(1, 0.3), MIN_HARVEST_QUANTITY);
        assert_eq!(scaled_quantity(0, 1.0), MIN_HARVEST_QUANTITY);
    }

    #[test]
    fn scaled_quantity_saturates_on_huge_yields() {
        assert_eq!(scaled_quantity(u32::MAX, 1.5), u32::MAX);
        assert_eq!(scaled_quantity(3_000_000_000, 1.5), u32::MAX);
        assert_eq!(scaled_quantity(u32::MAX, 0.5), 2_147_483_648);
    }
}
