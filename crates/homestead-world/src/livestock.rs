//! Livestock species profiles and the per-pen growth/production cycle.
//!
//! ```text
//! Juvenile --(growing)--> Growing --(mature)--> Mature
//!                                                 |
//!                                production timer +--> product ready
//! ```
//!
//! An animal grows until mature, after which its growth timer freezes and,
//! if the species has a product, a production timer runs. When the timer
//! reaches the species' interval a product becomes ready and the timer
//! stops until the product is collected.
//!
//! The delta that completes maturity is spent on growth; production starts
//! with the next [`LivestockGrowthCycle::advance`] call.
//!
//! Profiles are shared read-only through [`Arc`]; a pen never copies one.

use std::sync::Arc;

use homestead_types::{ItemId, LivestockCycleSnapshot, LivestockSpeciesId, LivestockStage};
use serde::{Deserialize, Serialize};

use crate::config::LivestockThresholds;
use crate::crop_cycle::sanitize_delta;
use crate::error::WorldError;

// ---------------------------------------------------------------------------
// LivestockProfile
// ---------------------------------------------------------------------------

/// A renewable good produced by a mature animal (eggs, milk, wool).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProduct")]
pub struct LivestockProduct {
    item: ItemId,
    interval: f64,
}

#[derive(Deserialize)]
struct RawProduct {
    item: ItemId,
    interval: f64,
}

impl From<RawProduct> for LivestockProduct {
    fn from(raw: RawProduct) -> Self {
        Self::new(raw.item, raw.interval)
    }
}

impl LivestockProduct {
    /// Create a product; negative or non-finite intervals become zero.
    pub fn new(item: impl Into<ItemId>, interval: f64) -> Self {
        Self {
            item: item.into(),
            interval: sanitize_delta(interval),
        }
    }

    /// Item granted when the product is collected.
    pub const fn item(&self) -> &ItemId {
        &self.item
    }

    /// Production time between products.
    pub const fn interval(&self) -> f64 {
        self.interval
    }
}

/// Read-only descriptor for a livestock species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivestockProfile {
    id: LivestockSpeciesId,
    name: String,
    meat_item: ItemId,
    #[serde(default)]
    product: Option<LivestockProduct>,
}

impl LivestockProfile {
    /// Create a profile.
    pub fn new(
        id: impl Into<LivestockSpeciesId>,
        name: impl Into<String>,
        meat_item: impl Into<ItemId>,
        product: Option<LivestockProduct>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            meat_item: meat_item.into(),
            product,
        }
    }

    /// Species identifier.
    pub const fn id(&self) -> &LivestockSpeciesId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Item granted on slaughter.
    pub const fn meat_item(&self) -> &ItemId {
        &self.meat_item
    }

    /// Renewable product, if the species has one.
    pub const fn product(&self) -> Option<&LivestockProduct> {
        self.product.as_ref()
    }

    /// Laying hen.
    pub fn chicken() -> Self {
        Self::new("chicken", "Chicken", "chicken_meat", Some(LivestockProduct::new("egg", 4.0)))
    }

    /// Dairy cow.
    pub fn cow() -> Self {
        Self::new("cow", "Cow", "beef", Some(LivestockProduct::new("milk", 8.0)))
    }

    /// Wool sheep.
    pub fn sheep() -> Self {
        Self::new("sheep", "Sheep", "mutton", Some(LivestockProduct::new("wool", 12.0)))
    }

    /// Pig; raised for meat only.
    pub fn pig() -> Self {
        Self::new("pig", "Pig", "pork", None)
    }
}

// ---------------------------------------------------------------------------
// LivestockGrowthCycle
// ---------------------------------------------------------------------------

/// Growth and production state of the animal in one pen.
#[derive(Debug, Clone, PartialEq)]
pub struct LivestockGrowthCycle {
    species: Option<Arc<LivestockProfile>>,
    stage: LivestockStage,
    growth_elapsed: f64,
    product_elapsed: f64,
    product_ready: bool,
    thresholds: LivestockThresholds,
}

impl Default for LivestockGrowthCycle {
    fn default() -> Self {
        Self::new(LivestockThresholds::default())
    }
}

impl LivestockGrowthCycle {
    /// Create an empty pen cycle using the given thresholds.
    pub const fn new(thresholds: LivestockThresholds) -> Self {
        Self {
            species: None,
            stage: LivestockStage::Juvenile,
            growth_elapsed: 0.0,
            product_elapsed: 0.0,
            product_ready: false,
            thresholds,
        }
    }

    /// Whether an animal is in the pen.
    pub const fn has_animal(&self) -> bool {
        self.species.is_some()
    }

    /// Profile of the animal in the pen.
    pub const fn species(&self) -> Option<&Arc<LivestockProfile>> {
        self.species.as_ref()
    }

    /// Current stage.
    pub const fn stage(&self) -> LivestockStage {
        self.stage
    }

    /// Accumulated growth time.
    pub const fn growth_elapsed(&self) -> f64 {
        self.growth_elapsed
    }

    /// Accumulated production time toward the next product.
    pub const fn product_elapsed(&self) -> f64 {
        self.product_elapsed
    }

    /// Whether a product is waiting to be collected.
    pub const fn product_ready(&self) -> bool {
        self.product_ready
    }

    /// Thresholds this cycle grows against.
    pub const fn thresholds(&self) -> LivestockThresholds {
        self.thresholds
    }

    /// Put a young animal of the given species in the pen.
    ///
    /// Returns `false` if the pen is occupied or no profile is supplied.
    pub fn place_animal(&mut self, profile: Option<Arc<LivestockProfile>>) -> bool {
        if self.has_animal() {
            return false;
        }
        let Some(profile) = profile else {
            return false;
        };
        self.reset();
        self.species = Some(profile);
        true
    }

    /// Advance growth, or production once mature, by `delta` time units.
    ///
    /// No-op for an empty pen.
    pub fn advance(&mut self, delta: f64) {
        let Some(profile) = self.species.as_ref() else {
            return;
        };
        let interval = profile.product().map(LivestockProduct::interval);
        let delta = sanitize_delta(delta);

        if self.stage < LivestockStage::Mature {
            self.growth_elapsed += delta;
            let next = stage_for(self.growth_elapsed, &self.thresholds);
            if next > self.stage {
                tracing::debug!(
                    from = ?self.stage,
                    to = ?next,
                    growth_elapsed = self.growth_elapsed,
                    "livestock stage advanced"
                );
                self.stage = next;
            }
        } else if let Some(interval) = interval
            && !self.product_ready
        {
            self.product_elapsed += delta;
            if self.product_elapsed >= interval {
                self.product_ready = true;
                self.product_elapsed = 0.0;
                tracing::debug!("livestock product ready");
            }
        }
    }

    /// Collect a ready product.
    ///
    /// Returns `false` for an empty pen or when nothing is ready. Granting
    /// the product item is the caller's job.
    pub fn harvest_product(&mut self) -> bool {
        if !self.has_animal() || !self.product_ready {
            return false;
        }
        self.product_ready = false;
        self.product_elapsed = 0.0;
        true
    }

    /// Remove the animal, returning its meat item.
    ///
    /// Returns `None` for an empty pen.
    pub fn slaughter(&mut self) -> Option<ItemId> {
        let profile = self.species.take()?;
        self.reset();
        tracing::debug!(species = %profile.id(), "animal slaughtered");
        Some(profile.meat_item().clone())
    }

    /// Plain-field snapshot for persistence.
    pub fn snapshot(&self) -> LivestockCycleSnapshot {
        LivestockCycleSnapshot {
            species: self.species.as_ref().map(|profile| profile.id().clone()),
            stage: self.stage,
            growth_elapsed: self.growth_elapsed,
            product_elapsed: self.product_elapsed,
            product_ready: self.product_ready,
        }
    }

    /// Rebuild a cycle from a snapshot and the profile its species id
    /// resolves to.
    ///
    /// Production fields are only restored for a mature animal whose species
    /// has a product, and the stage never moves backwards relative to the
    /// saved growth time.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::SpeciesMismatch`] if the snapshot's species and
    /// the supplied profile disagree (including one being absent).
    pub fn restore(
        snapshot: &LivestockCycleSnapshot,
        profile: Option<Arc<LivestockProfile>>,
        thresholds: LivestockThresholds,
    ) -> Result<Self, WorldError> {
        let profile = match (&snapshot.species, profile) {
            (None, None) => return Ok(Self::new(thresholds)),
            (Some(expected), Some(profile)) if profile.id() == expected => profile,
            (expected, actual) => {
                return Err(WorldError::SpeciesMismatch {
                    expected: expected
                        .as_ref()
                        .map_or_else(|| String::from("none"), ToString::to_string),
                    actual: actual
                        .as_ref()
                        .map_or_else(|| String::from("none"), |p| p.id().to_string()),
                });
            }
        };

        let growth_elapsed = sanitize_delta(snapshot.growth_elapsed);
        let stage = snapshot.stage.max(stage_for(growth_elapsed, &thresholds));
        let produces = stage == LivestockStage::Mature && profile.product().is_some();
        let product_ready = produces && snapshot.product_ready;
        let product_elapsed = if produces && !product_ready {
            sanitize_delta(snapshot.product_elapsed)
        } else {
            0.0
        };

        Ok(Self {
            species: Some(profile),
            stage,
            growth_elapsed,
            product_elapsed,
            product_ready,
            thresholds,
        })
    }

    const fn reset(&mut self) {
        self.stage = LivestockStage::Juvenile;
        self.growth_elapsed = 0.0;
        self.product_elapsed = 0.0;
        self.product_ready = false;
    }
}

/// Highest stage whose threshold `elapsed` has reached.
fn stage_for(elapsed: f64, thresholds: &LivestockThresholds) -> LivestockStage {
    if elapsed >= thresholds.mature {
        LivestockStage::Mature
    } else if elapsed >= thresholds.growing {
        LivestockStage::Growing
    } else {
        LivestockStage::Juvenile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cow_with_interval(interval: f64) -> Arc<LivestockProfile> {
        Arc::new(LivestockProfile::new(
            "cow",
            "Cow",
            "beef",
            Some(LivestockProduct::new("milk", interval)),
        ))
    }

    #[test]
    fn livestock_scenario() {
        let mut pen = LivestockGrowthCycle::default();
        assert!(pen.place_animal(Some(cow_with_interval(8.0))));

        pen.advance(10.0);
        assert_eq!(pen.stage(), LivestockStage::Mature);
        assert!(!pen.product_ready());

        pen.advance(8.0);
        assert!(pen.product_ready());

        assert!(pen.harvest_product());
        assert!(!pen.product_ready());
        assert!(pen.product_elapsed().abs() < f64::EPSILON);
    }

    #[test]
    fn production_accumulates_only_after_maturity() {
        let mut pen = LivestockGrowthCycle::default();
        assert!(pen.place_animal(Some(cow_with_interval(1.0))));

        for _ in 0..9 {
            pen.advance(1.0);
            assert!(!pen.product_ready());
            assert!(pen.product_elapsed().abs() < f64::EPSILON);
        }
        assert_eq!(pen.stage(), LivestockStage::Growing);

        pen.advance(1.0);
        assert_eq!(pen.stage(), LivestockStage::Mature);
        pen.advance(0.5);
        assert!((pen.product_elapsed() - 0.5).abs() < f64::EPSILON);
        // Growth timer is frozen once mature.
        assert!((pen.growth_elapsed() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn large_delta_reaches_maturity_but_not_product() {
        let mut pen = LivestockGrowthCycle::default();
        assert!(pen.place_animal(Some(cow_with_interval(8.0))));
        pen.advance(100.0);
        assert_eq!(pen.stage(), LivestockStage::Mature);
        assert!(!pen.product_ready());
        assert!(pen.product_elapsed().abs() < f64::EPSILON);
    }

    #[test]
    fn production_pauses_while_product_pending() {
        let mut pen = LivestockGrowthCycle::default();
        assert!(pen.place_animal(Some(cow_with_interval(2.0))));
        pen.advance(10.0);
        pen.advance(2.0);
        assert!(pen.product_ready());
        pen.advance(5.0);
        assert!(pen.product_elapsed().abs() < f64::EPSILON);
        assert!(pen.harvest_product());
        assert!(!pen.harvest_product());
    }

    #[test]
    fn meat_only_species_never_produces() {
        let mut pen = LivestockGrowthCycle::default();
        assert!(pen.place_animal(Some(Arc::new(LivestockProfile::pig()))));
        pen.advance(10.0);
        pen.advance(1_000.0);
        assert_eq!(pen.stage(), LivestockStage::Mature);
        assert!(!pen.product_ready());
        assert!(!pen.harvest_product());
    }

    #[test]
    fn place_animal_rejects_occupied_or_missing_profile() {
        let mut pen = LivestockGrowthCycle::default();
        assert!(!pen.place_animal(None));
        assert!(!pen.has_animal());

        assert!(pen.place_animal(Some(Arc::new(LivestockProfile::chicken()))));
        pen.advance(6.0);
        assert!(!pen.place_animal(Some(Arc::new(LivestockProfile::cow()))));
        assert_eq!(pen.stage(), LivestockStage::Growing);
        assert_eq!(
            pen.species().map(|profile| profile.id().as_str()),
            Some("chicken")
        );
    }

    #[test]
    fn empty_pen_operations_fail() {
        let mut pen = LivestockGrowthCycle::default();
        pen.advance(20.0);
        assert_eq!(pen.stage(), LivestockStage::Juvenile);
        assert!(!pen.harvest_product());
        assert_eq!(pen.slaughter(), None);
    }

    #[test]
    fn slaughter_returns_meat_and_clears_pen() {
        let mut pen = LivestockGrowthCycle::default();
        assert!(pen.place_animal(Some(cow_with_interval(1.0))));
        pen.advance(10.0);
        pen.advance(1.0);
        assert!(pen.product_ready());

        assert_eq!(pen.slaughter(), Some(ItemId::new("beef")));
        assert!(!pen.has_animal());
        assert_eq!(pen.stage(), LivestockStage::Juvenile);
        assert!(!pen.product_ready());
        assert!(pen.growth_elapsed().abs() < f64::EPSILON);
        assert_eq!(pen.slaughter(), None);

        assert!(pen.place_animal(Some(Arc::new(LivestockProfile::sheep()))));
    }

    #[test]
    fn pens_share_one_profile() {
        let profile = Arc::new(LivestockProfile::chicken());
        let mut a = LivestockGrowthCycle::default();
        let mut b = LivestockGrowthCycle::default();
        assert!(a.place_animal(Some(Arc::clone(&profile))));
        assert!(b.place_animal(Some(Arc::clone(&profile))));
        assert_eq!(Arc::strong_count(&profile), 3);
        assert!(a.species().is_some_and(|p| Arc::ptr_eq(p, &profile)));
    }

    #[test]
    fn negative_interval_is_zero() {
        let product = LivestockProduct::new("egg", -4.0);
        assert!(product.interval().abs() < f64::EPSILON);
    }

    #[test]
    fn snapshot_roundtrip() {
        let profile = cow_with_interval(8.0);
        let mut pen = LivestockGrowthCycle::default();
        assert!(pen.place_animal(Some(Arc::clone(&profile))));
        pen.advance(10.0);
        pen.advance(3.0);

        let snapshot = pen.snapshot();
        assert_eq!(snapshot.species, Some(LivestockSpeciesId::new("cow")));
        let restored =
            LivestockGrowthCycle::restore(&snapshot, Some(profile), LivestockThresholds::default());
        assert_eq!(restored.ok(), Some(pen));
    }

    #[test]
    fn restore_rejects_mismatched_species() {
        let mut pen = LivestockGrowthCycle::default();
        assert!(pen.place_animal(Some(cow_with_interval(8.0))));
        let snapshot = pen.snapshot();

        let wrong = LivestockGrowthCycle::restore(
            &snapshot,
            Some(Arc::new(LivestockProfile::pig())),
            LivestockThresholds::default(),
        );
        assert!(matches!(wrong, Err(WorldError::SpeciesMismatch { .. })));

        let missing =
            LivestockGrowthCycle::restore(&snapshot, None, LivestockThresholds::default());
        assert!(missing.is_err());
    }

    #[test]
    fn restore_drops_production_for_immature_animal() {
        let snapshot = LivestockCycleSnapshot {
            species: Some(LivestockSpeciesId::new("cow")),
            stage: LivestockStage::Juvenile,
            growth_elapsed: 2.0,
            product_elapsed: 3.0,
            product_ready: true,
        };
        let restored = LivestockGrowthCycle::restore(
            &snapshot,
            Some(cow_with_interval(8.0)),
            LivestockThresholds::default(),
        );
        let restored = restored.unwrap_or_default();
        assert!(restored.has_animal());
        assert!(!restored.product_ready());
        assert!(restored.product_elapsed().abs() < f64::EPSILON);
    }
}
