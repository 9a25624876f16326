//! Live-state derivation.
//!
//! The stored [`Checkpoint`] is a snapshot at some past time plus a queue of
//! pending jobs. This module derives the player's *current* state from that
//! snapshot and an explicit query time, folding in job completions and
//! continuous income without mutating anything.
//!
//! Income is integrated piecewise-constant: a production level can change
//! mid-interval when an upgrade completes, so the interval is split at every
//! completion boundary and the rate re-evaluated per sub-interval. Naive
//! `rate(final_level) * elapsed` would over-credit.

use crate::checkpoint::Checkpoint;
use crate::curves::EconomyCurves;
use crate::error::{EconomyError, Result};
use crate::jobs::{PendingJob, ProductionJob};
use crate::math::{accrue, Wide};
use crate::state::{Balances, Fleet, Production, ProductionTier};
use crate::time::{DurationMs, Timestamp};

/// A player's derived current state.
///
/// `pending_jobs` is the *live view* of the still-pending queue: production
/// jobs appear verbatim, fleet jobs have already-delivered units folded out.
/// The underlying stored jobs are unchanged until a write consolidates the
/// checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveState {
    /// Balances including income accrued since the checkpoint.
    pub balances: Balances,
    /// Production levels including completed upgrades.
    pub production: Production,
    /// Fleet including units delivered by build orders.
    pub fleet: Fleet,
    /// Jobs still pending at the query time (live view).
    pub pending_jobs: Vec<PendingJob>,
}

/// Accrue income for every lane at its current level over one sub-interval.
fn accrue_interval(
    curves: &EconomyCurves<'_>,
    production: &Production,
    duration: DurationMs,
    accrued: &mut [Wide; 3],
) {
    if duration.is_zero() {
        return;
    }
    for (slot, tier) in ProductionTier::ALL.into_iter().enumerate() {
        let rate = curves.income_rate(tier, production.level(tier));
        accrued[slot] = accrued[slot].saturating_add(accrue(rate, duration));
    }
}

/// Derive the live state at `now` from a checkpoint.
///
/// Pure: identical inputs always produce identical output; the wall clock
/// is never consulted.
///
/// # Errors
///
/// Returns [`EconomyError::InvalidTimeOrdering`] if `now` precedes the
/// checkpoint time - an input-contract violation, never silently clamped.
pub fn compute_live_state(
    checkpoint: &Checkpoint,
    curves: &EconomyCurves<'_>,
    now: Timestamp,
) -> Result<LiveState> {
    if now < checkpoint.time {
        return Err(EconomyError::InvalidTimeOrdering {
            checkpoint: checkpoint.time,
            query: now,
        });
    }

    // Completed upgrades, in completion order. Ties break by tier so the
    // result is independent of storage order.
    let mut completions: Vec<&ProductionJob> = checkpoint
        .pending_jobs
        .iter()
        .filter_map(|job| match job {
            PendingJob::Production(p) if p.is_complete_by(now) => Some(p),
            _ => None,
        })
        .collect();
    completions.sort_by_key(|job| (job.end_time, job.tier));

    // Piecewise-constant integration over [checkpoint.time, now], split at
    // each completion boundary.
    let mut production = checkpoint.production;
    let mut accrued = [Wide::ZERO; 3];
    let mut cursor = checkpoint.time;
    for job in completions {
        accrue_interval(
            curves,
            &production,
            job.end_time.saturating_since(cursor),
            &mut accrued,
        );
        production.bump(job.tier);
        cursor = cursor.max(job.end_time);
    }
    accrue_interval(curves, &production, now.saturating_since(cursor), &mut accrued);

    let mut balances = checkpoint.balances;
    for (slot, tier) in ProductionTier::ALL.into_iter().enumerate() {
        let earned: u64 = accrued[slot].floor().saturating_to_num();
        balances.credit(tier.resource(), earned);
    }

    // Fleet deliveries and the live pending-job view.
    let mut fleet = checkpoint.fleet;
    let mut pending_jobs = Vec::new();
    for job in &checkpoint.pending_jobs {
        match job {
            PendingJob::Production(p) => {
                if !p.is_complete_by(now) {
                    pending_jobs.push(PendingJob::Production(*p));
                }
            }
            PendingJob::Fleet(f) => {
                let delivered = f.delivered_by(now);
                fleet.add(f.ship_type, u64::from(delivered));
                if let Some(rest) = f.advanced(delivered) {
                    pending_jobs.push(PendingJob::Fleet(rest));
                }
            }
        }
    }

    Ok(LiveState {
        balances,
        production,
        fleet,
        pending_jobs,
    })
}

// Tests that rely on the shared `balance_config` fixture live in
// `tests/live_tests.rs` (integration tests), to avoid pulling two copies of
// `armada_core` into the unit-test build via `armada_test_utils`.
