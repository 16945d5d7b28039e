//! Per-tile crop growth state machine.
//!
//! ```text
//! Seed --(sprout)--> Sprout --(growing)--> Growing --(harvestable)--> Harvestable
//! ```
//!
//! The cycle has no soil awareness. The caller scales each delta by the
//! species' growth multiplier before calling [`CropGrowthCycle::advance`].
//! Stages are derived from accumulated time by comparing against the
//! thresholds from the largest down, so one large delta can jump straight
//! to `Harvestable`, and many small deltas reach the same stage as one
//! delta of the same total.

use homestead_types::{CropCycleSnapshot, CropStage};

use crate::config::CropThresholds;

/// Treat negative and non-finite deltas as no time passing.
pub(crate) fn sanitize_delta(delta: f64) -> f64 {
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        0.0
    }
}

/// Growth state of the crop on one farm tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropGrowthCycle {
    planted: bool,
    stage: CropStage,
    elapsed: f64,
    thresholds: CropThresholds,
}

impl Default for CropGrowthCycle {
    fn default() -> Self {
        Self::new(CropThresholds::default())
    }
}

impl CropGrowthCycle {
    /// Create an empty (unplanted) cycle using the given thresholds.
    pub const fn new(thresholds: CropThresholds) -> Self {
        Self {
            planted: false,
            stage: CropStage::Seed,
            elapsed: 0.0,
            thresholds,
        }
    }

    /// Whether a seed is in the ground.
    pub const fn is_planted(&self) -> bool {
        self.planted
    }

    /// Current stage.
    pub const fn stage(&self) -> CropStage {
        self.stage
    }

    /// Accumulated growth time since planting.
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Thresholds this cycle grows against.
    pub const fn thresholds(&self) -> CropThresholds {
        self.thresholds
    }

    /// Whether the crop can be harvested right now.
    pub fn is_harvestable(&self) -> bool {
        self.planted && self.stage == CropStage::Harvestable
    }

    /// Put a seed in the ground.
    ///
    /// Returns `false` without changing anything if already planted.
    pub fn plant(&mut self) -> bool {
        if self.planted {
            return false;
        }
        self.planted = true;
        self.stage = CropStage::Seed;
        self.elapsed = 0.0;
        true
    }

    /// Advance growth by `delta` time units (already multiplier-scaled).
    ///
    /// No-op when nothing is planted or the crop is already harvestable.
    pub fn advance(&mut self, delta: f64) {
        if !self.planted || self.stage == CropStage::Harvestable {
            return;
        }
        self.elapsed += sanitize_delta(delta);

        let next = stage_for(self.elapsed, &self.thresholds);
        if next > self.stage {
            tracing::debug!(
                from = ?self.stage,
                to = ?next,
                elapsed = self.elapsed,
                "crop stage advanced"
            );
            self.stage = next;
        }
    }

    /// Harvest a ripe crop, resetting the tile to unplanted.
    ///
    /// Returns `false` if nothing is planted or the crop is not yet
    /// harvestable. Granting the harvested item is the caller's job.
    pub fn harvest(&mut self) -> bool {
        if !self.is_harvestable() {
            return false;
        }
        self.planted = false;
        self.stage = CropStage::Seed;
        self.elapsed = 0.0;
        true
    }

    /// Plain-field snapshot for persistence.
    pub const fn snapshot(&self) -> CropCycleSnapshot {
        CropCycleSnapshot {
            planted: self.planted,
            stage: self.stage,
            elapsed: self.elapsed,
        }
    }

    /// Rebuild a cycle from a snapshot.
    ///
    /// An unplanted snapshot restores to a fresh cycle. For a planted one
    /// the stage is the later of the saved stage and the stage implied by
    /// the saved elapsed time, so a restore never moves a crop backwards.
    pub fn restore(snapshot: &CropCycleSnapshot, thresholds: CropThresholds) -> Self {
        if !snapshot.planted {
            return Self::new(thresholds);
        }
        let elapsed = sanitize_delta(snapshot.elapsed);
        Self {
            planted: true,
            stage: snapshot.stage.max(stage_for(elapsed, &thresholds)),
            elapsed,
            thresholds,
        }
    }
}

/// Highest stage whose threshold `elapsed` has reached.
fn stage_for(elapsed: f64, thresholds: &CropThresholds) -> CropStage {
    if elapsed >= thresholds.harvestable {
        CropStage::Harvestable
    } else if elapsed >= thresholds.growing {
        CropStage::Growing
    } else if elapsed >= thresholds.sprout {
        CropStage::Sprout
    } else {
        CropStage::Seed
    }
}
