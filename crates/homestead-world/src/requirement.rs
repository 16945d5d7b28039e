//! Crop suitability and performance profiles.
//!
//! A [`CropRequirement`] describes what a crop species tolerates and prefers.
//! Evaluated against a [`SoilProfile`] it produces:
//!
//! - a hard gate ([`CropRequirement::is_suitable`]),
//! - a growth-speed multiplier in `[0.1, 1.0]`
//!   ([`CropRequirement::growth_multiplier`]),
//! - a yield multiplier in `[0.3, 1.5]`
//!   ([`CropRequirement::yield_multiplier`]).
//!
//! Growth and yield read the same soil signals through different curves.
//! Moisture below the species minimum zeroes the growth moisture fit, while
//! the yield moisture fit never drops below 0.5. The drainage penalty is a
//! flat step, not a falloff.
//!
//! A missing bound is `None`. All numeric inputs are clamped into
//! `[0.0, 1.0]` when the profile is built; `min <= max` is left to the
//! content author.

use serde::{Deserialize, Serialize};

use crate::soil::{SoilProfile, clamp_unit};

/// Growth multiplier range.
pub const GROWTH_MULTIPLIER_MIN: f64 = 0.1;
/// Upper bound of the growth multiplier.
pub const GROWTH_MULTIPLIER_MAX: f64 = 1.0;
/// Yield multiplier range.
pub const YIELD_MULTIPLIER_MIN: f64 = 0.3;
/// Upper bound of the yield multiplier.
pub const YIELD_MULTIPLIER_MAX: f64 = 1.5;

/// Growth contribution when the soil violates a drainage bound.
const DRAINAGE_PENALTY: f64 = 0.5;

/// Floor of the yield moisture fit.
const YIELD_MOISTURE_FLOOR: f64 = 0.5;

// ---------------------------------------------------------------------------
// CropRequirement
// ---------------------------------------------------------------------------

/// Soil tolerance and preference profile for one crop species.
///
/// Immutable once built. One instance per species lives in the species
/// registry and is shared by every plot growing that species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "CropRequirementBuilder")]
pub struct CropRequirement {
    min_moisture: f64,
    max_moisture: Option<f64>,
    min_fertility: f64,
    min_drainage: Option<f64>,
    max_drainage: Option<f64>,
    max_tillage_difficulty: f64,
    fertility_impact: f64,
}

impl Default for CropRequirement {
    fn default() -> Self {
        CropRequirementBuilder::default().build()
    }
}

impl CropRequirement {
    /// Start building a requirement from the permissive defaults (any
    /// moisture, fertility, drainage and tillage; fertility impact 0.5).
    pub const fn builder() -> CropRequirementBuilder {
        CropRequirementBuilder::new()
    }

    /// Minimum moisture.
    pub const fn min_moisture(&self) -> f64 {
        self.min_moisture
    }

    /// Maximum moisture, `None` when unbounded.
    pub const fn max_moisture(&self) -> Option<f64> {
        self.max_moisture
    }

    /// Minimum fertility.
    pub const fn min_fertility(&self) -> f64 {
        self.min_fertility
    }

    /// Minimum drainage, `None` when not required.
    pub const fn min_drainage(&self) -> Option<f64> {
        self.min_drainage
    }

    /// Maximum drainage, `None` when unbounded.
    pub const fn max_drainage(&self) -> Option<f64> {
        self.max_drainage
    }

    /// Maximum tillage difficulty.
    pub const fn max_tillage_difficulty(&self) -> f64 {
        self.max_tillage_difficulty
    }

    /// Weight of soil fertility on growth and yield.
    pub const fn fertility_impact(&self) -> f64 {
        self.fertility_impact
    }

    /// Hard suitability gate: `false` if any single bound is violated.
    pub fn is_suitable(&self, soil: &SoilProfile) -> bool {
        let moisture = soil.moisture();
        if moisture < self.min_moisture {
            return false;
        }
        if self.max_moisture.is_some_and(|max| moisture > max) {
            return false;
        }
        if soil.fertility() < self.min_fertility {
            return false;
        }
        if !self.drainage_within_bounds(soil.drainage()) {
            return false;
        }
        soil.tillage_difficulty() <= self.max_tillage_difficulty
    }

    /// Growth-speed multiplier in `[0.1, 1.0]`.
    ///
    /// Product of four contributions:
    ///
    /// ```text
    /// moisture  = 0.5 + fit * 0.5            (fit = 0 below min_moisture)
    /// fertility = 0.7 + fertility * impact * 0.3
    /// drainage  = 0.5 if a set bound is violated, else 1.0
    /// tillage   = 1.0 - tillage_difficulty * 0.2
    /// ```
    pub fn growth_multiplier(&self, soil: &SoilProfile) -> f64 {
        let moisture_fit = if soil.moisture() < self.min_moisture {
            0.0
        } else {
            self.moisture_window_fit(soil.moisture(), 0.0)
        };

        let mut multiplier = 1.0_f64;
        multiplier *= moisture_fit.mul_add(0.5, 0.5);
        multiplier *= (soil.fertility() * self.fertility_impact).mul_add(0.3, 0.7);
        if self.has_drainage_bounds() && !self.drainage_within_bounds(soil.drainage()) {
            multiplier *= DRAINAGE_PENALTY;
        }
        multiplier *= soil.tillage_difficulty().mul_add(-0.2, 1.0);

        multiplier.clamp(GROWTH_MULTIPLIER_MIN, GROWTH_MULTIPLIER_MAX)
    }

    /// Yield multiplier in `[0.3, 1.5]`.
    ///
    /// ```text
    /// yield = (0.5 + fertility * impact) * max(0.5, moisture window fit)
    /// ```
    ///
    /// The moisture term is 1.0 when `max_moisture` is unbounded.
    pub fn yield_multiplier(&self, soil: &SoilProfile) -> f64 {
        let mut multiplier = 1.0_f64;
        multiplier *= soil.fertility().mul_add(self.fertility_impact, 0.5);
        multiplier *= self.moisture_window_fit(soil.moisture(), YIELD_MOISTURE_FLOOR);
        multiplier.clamp(YIELD_MULTIPLIER_MIN, YIELD_MULTIPLIER_MAX)
    }

    /// Closeness of `moisture` to the centre of the moisture window, floored
    /// at `floor`. Returns 1.0 when the window has no upper bound.
    fn moisture_window_fit(&self, moisture: f64, floor: f64) -> f64 {
        let Some(max) = self.max_moisture else {
            return 1.0;
        };
        let optimal = (self.min_moisture + max) / 2.0;
        let half_range = (max - self.min_moisture) / 2.0;

        // Zero-width window: only the exact value fits.
        if half_range <= 0.0 {
            return if (moisture - optimal).abs() <= f64::EPSILON {
                1.0
            } else {
                floor
            };
        }

        (1.0 - (moisture - optimal).abs() / half_range).max(floor)
    }

    const fn has_drainage_bounds(&self) -> bool {
        self.min_drainage.is_some() || self.max_drainage.is_some()
    }

    fn drainage_within_bounds(&self, drainage: f64) -> bool {
        !(self.min_drainage.is_some_and(|min| drainage < min)
            || self.max_drainage.is_some_and(|max| drainage > max))
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

impl CropRequirement {
    /// Paddy rice: very wet, poorly drained ground.
    pub fn rice() -> Self {
        Self::builder()
            .moisture(0.8, None)
            .min_fertility(0.3)
            .drainage(None, Some(0.4))
            .max_tillage_difficulty(0.7)
            .fertility_impact(0.6)
            .build()
    }

    /// Wheat: moderate moisture, needs some drainage.
    pub fn wheat() -> Self {
        Self::builder()
            .moisture(0.3, Some(0.7))
            .min_fertility(0.3)
            .drainage(Some(0.4), None)
            .max_tillage_difficulty(0.6)
            .fertility_impact(0.5)
            .build()
    }

    /// Potato: moist, well-drained, fertile soil.
    pub fn potato() -> Self {
        Self::builder()
            .moisture(0.4, Some(0.8))
            .min_fertility(0.4)
            .drainage(Some(0.5), None)
            .max_tillage_difficulty(0.5)
            .fertility_impact(0.7)
            .build()
    }

    /// Carrot: loose, free-draining soil.
    pub fn carrot() -> Self {
        Self::builder()
            .moisture(0.3, Some(0.7))
            .min_fertility(0.2)
            .drainage(Some(0.6), None)
            .max_tillage_difficulty(0.4)
            .fertility_impact(0.4)
            .build()
    }

    /// Corn: hungry for nutrients.
    pub fn corn() -> Self {
        Self::builder()
            .moisture(0.4, Some(0.8))
            .min_fertility(0.5)
            .drainage(Some(0.3), None)
            .max_tillage_difficulty(0.7)
            .fertility_impact(0.9)
            .build()
    }

    /// Cabbage: damp but not waterlogged.
    pub fn cabbage() -> Self {
        Self::builder()
            .moisture(0.5, Some(0.9))
            .min_fertility(0.4)
            .drainage(Some(0.3), Some(0.8))
            .max_tillage_difficulty(0.6)
            .fertility_impact(0.6)
            .build()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`CropRequirement`].
///
/// Also the deserialization form: content files list only the bounds they
/// care about and the rest fall back to the permissive defaults. Building
/// never fails; values are clamped into `[0.0, 1.0]`.
///
/// # Examples
///
/// ```
/// use homestead_world::CropRequirement;
///
/// let barley = CropRequirement::builder()
///     .moisture(0.25, Some(0.6))
///     .min_fertility(0.2)
///     .fertility_impact(0.4)
///     .build();
///
/// assert_eq!(barley.max_moisture(), Some(0.6));
/// assert_eq!(barley.min_drainage(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CropRequirementBuilder {
    min_moisture: f64,
    max_moisture: Option<f64>,
    min_fertility: f64,
    min_drainage: Option<f64>,
    max_drainage: Option<f64>,
    max_tillage_difficulty: f64,
    fertility_impact: f64,
}

impl Default for CropRequirementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CropRequirementBuilder {
    /// Permissive defaults.
    pub const fn new() -> Self {
        Self {
            min_moisture: 0.0,
            max_moisture: None,
            min_fertility: 0.0,
            min_drainage: None,
            max_drainage: None,
            max_tillage_difficulty: 1.0,
            fertility_impact: 0.5,
        }
    }

    /// Set the moisture window.
    #[must_use]
    pub const fn moisture(mut self, min: f64, max: Option<f64>) -> Self {
        self.min_moisture = min;
        self.max_moisture = max;
        self
    }

    /// Set the minimum fertility.
    #[must_use]
    pub const fn min_fertility(mut self, min: f64) -> Self {
        self.min_fertility = min;
        self
    }

    /// Set the drainage bounds.
    #[must_use]
    pub const fn drainage(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_drainage = min;
        self.max_drainage = max;
        self
    }

    /// Set the maximum tillage difficulty.
    #[must_use]
    pub const fn max_tillage_difficulty(mut self, max: f64) -> Self {
        self.max_tillage_difficulty = max;
        self
    }

    /// Set the fertility weight.
    #[must_use]
    pub const fn fertility_impact(mut self, impact: f64) -> Self {
        self.fertility_impact = impact;
        self
    }

    /// Produce the requirement, clamping every value into `[0.0, 1.0]`.
    pub fn build(self) -> CropRequirement {
        CropRequirement {
            min_moisture: clamp_unit(self.min_moisture),
            max_moisture: self.max_moisture.map(clamp_unit),
            min_fertility: clamp_unit(self.min_fertility),
            min_drainage: self.min_drainage.map(clamp_unit),
            max_drainage: self.max_drainage.map(clamp_unit),
            max_tillage_difficulty: clamp_unit(self.max_tillage_difficulty),
            fertility_impact: clamp_unit(self.fertility_impact),
        }
    }
}

impl From<CropRequirementBuilder> for CropRequirement {
    fn from(builder: CropRequirementBuilder) -> Self {
        builder.build()
    }
}
