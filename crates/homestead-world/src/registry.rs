//! Content registry of crop species and livestock profiles.
//!
//! The registry owns one [`Arc`] per species. Plots and pens hold clones of
//! that `Arc`, so every tile growing a species shares the same read-only
//! profile. A profile stays alive as long as any tile references it, even
//! after the registry itself is dropped.

use std::collections::BTreeMap;
use std::sync::Arc;

use homestead_types::{CropSpeciesId, ItemId, LivestockSpeciesId};
use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::livestock::LivestockProfile;
use crate::requirement::CropRequirement;

// ---------------------------------------------------------------------------
// CropSpecies
// ---------------------------------------------------------------------------

/// A plantable crop: its soil requirement and what a harvest yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSpecies {
    /// Species identifier.
    pub id: CropSpeciesId,
    /// Display name.
    pub name: String,
    /// Soil tolerance and preference profile.
    pub requirement: CropRequirement,
    /// Item granted on harvest.
    pub harvest_item: ItemId,
    /// Items granted at a yield multiplier of 1.0.
    pub base_yield: u32,
}

impl CropSpecies {
    /// Create a crop species.
    pub fn new(
        id: impl Into<CropSpeciesId>,
        name: impl Into<String>,
        requirement: CropRequirement,
        harvest_item: impl Into<ItemId>,
        base_yield: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            requirement,
            harvest_item: harvest_item.into(),
            base_yield,
        }
    }

    /// The built-in crop catalog.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("rice", "Rice", CropRequirement::rice(), "rice", 6),
            Self::new("wheat", "Wheat", CropRequirement::wheat(), "wheat", 5),
            Self::new("potato", "Potato", CropRequirement::potato(), "potato", 4),
            Self::new("carrot", "Carrot", CropRequirement::carrot(), "carrot", 3),
            Self::new("corn", "Corn", CropRequirement::corn(), "corn", 4),
            Self::new("cabbage", "Cabbage", CropRequirement::cabbage(), "cabbage", 2),
        ]
    }
}

// ---------------------------------------------------------------------------
// SpeciesRegistry
// ---------------------------------------------------------------------------

/// Lookup table of every crop and livestock species known to the simulation.
#[derive(Debug, Clone, Default)]
pub struct SpeciesRegistry {
    crops: BTreeMap<CropSpeciesId, Arc<CropSpecies>>,
    livestock: BTreeMap<LivestockSpeciesId, Arc<LivestockProfile>>,
}

impl SpeciesRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            crops: BTreeMap::new(),
            livestock: BTreeMap::new(),
        }
    }

    /// Create a registry holding the built-in crops and animals.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for species in CropSpecies::defaults() {
            registry.crops.insert(species.id.clone(), Arc::new(species));
        }
        for profile in [
            LivestockProfile::chicken(),
            LivestockProfile::cow(),
            LivestockProfile::sheep(),
            LivestockProfile::pig(),
        ] {
            registry.livestock.insert(profile.id().clone(), Arc::new(profile));
        }
        registry
    }

    /// Register a crop species.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateSpecies`] if the id is taken.
    pub fn register_crop(&mut self, species: CropSpecies) -> Result<Arc<CropSpecies>, WorldError> {
        if self.crops.contains_key(&species.id) {
            return Err(WorldError::DuplicateSpecies(species.id.into_inner()));
        }
        let shared = Arc::new(species);
        self.crops.insert(shared.id.clone(), Arc::clone(&shared));
        Ok(shared)
    }

    /// Register a livestock species.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateSpecies`] if the id is taken.
    pub fn register_livestock(
        &mut self,
        profile: LivestockProfile,
    ) -> Result<Arc<LivestockProfile>, WorldError> {
        if self.livestock.contains_key(profile.id()) {
            return Err(WorldError::DuplicateSpecies(profile.id().to_string()));
        }
        let shared = Arc::new(profile);
        self.livestock.insert(shared.id().clone(), Arc::clone(&shared));
        Ok(shared)
    }

    /// Shared handle to a crop species.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownCrop`] if no such species is registered.
    pub fn crop(&self, id: &CropSpeciesId) -> Result<Arc<CropSpecies>, WorldError> {
        self.crops
            .get(id)
            .cloned()
            .ok_or_else(|| WorldError::UnknownCrop(id.clone()))
    }

    /// Shared handle to a livestock profile.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownLivestock`] if no such species is registered.
    pub fn livestock(&self, id: &LivestockSpeciesId) -> Result<Arc<LivestockProfile>, WorldError> {
        self.livestock
            .get(id)
            .cloned()
            .ok_or_else(|| WorldError::UnknownLivestock(id.clone()))
    }

    /// Iterate over crop species in id order.
    pub fn crops(&self) -> impl Iterator<Item = &Arc<CropSpecies>> {
        self.crops.values()
    }

    /// Iterate over livestock profiles in id order.
    pub fn livestock_profiles(&self) -> impl Iterator<Item = &Arc<LivestockProfile>> {
        self.livestock.values()
    }

    /// Number of crop species.
    pub fn crop_count(&self) -> usize {
        self.crops.len()
    }

    /// Number of livestock species.
    pub fn livestock_count(&self) -> usize {
        self.livestock.len()
    }
}
