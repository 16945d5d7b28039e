//! Real-time pacing of the tick loop.
//!
//! [`run_paced`] drives [`Simulation::step`] once per interval tick until
//! `max_ticks` have run or the shutdown future resolves. The simulation
//! itself is synchronous; only the waiting between ticks is async.

use std::future::Future;
use std::time::Duration;

use homestead_core::{Simulation, TickError};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Why the tick loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The configured tick budget was used up.
    MaxTicks,
    /// The shutdown signal fired first.
    Shutdown,
}

/// Totals accumulated over one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Why the loop stopped.
    pub end_reason: EndReason,
    /// Ticks executed during this run.
    pub ticks: u64,
    /// Crop harvests during this run.
    pub harvests: usize,
    /// Livestock products collected during this run.
    pub products: usize,
}

/// Step `simulation` once every `interval_ms` milliseconds.
///
/// An interval of zero is treated as one millisecond.
///
/// # Errors
///
/// Returns the first [`TickError`] raised by a tick.
pub async fn run_paced<F>(
    simulation: &mut Simulation,
    max_ticks: u64,
    interval_ms: u64,
    shutdown: F,
) -> Result<RunOutcome, TickError>
where
    F: Future<Output = ()>,
{
    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut outcome = RunOutcome {
        end_reason: EndReason::MaxTicks,
        ticks: 0,
        harvests: 0,
        products: 0,
    };

    info!(max_ticks, interval_ms, "Tick loop starting");

    while outcome.ticks < max_ticks {
        tokio::select! {
            biased;
            () = &mut shutdown => {
                info!(ticks = outcome.ticks, "Shutdown requested");
                outcome.end_reason = EndReason::Shutdown;
                break;
            }
            _ = interval.tick() => {}
        }

        let summary = simulation.step()?;
        outcome.ticks = outcome.ticks.saturating_add(1);
        outcome.harvests = outcome.harvests.saturating_add(summary.harvested.len());
        outcome.products = outcome.products.saturating_add(summary.products.len());

        for harvest in &summary.harvested {
            debug!(
                tick = summary.tick,
                coord = %harvest.coord,
                item = %harvest.item,
                quantity = harvest.quantity,
                "Crop harvested"
            );
        }
        for (coord, item) in &summary.products {
            debug!(tick = summary.tick, %coord, %item, "Product collected");
        }
    }

    Ok(outcome)
}
