//! The persisted per-player snapshot.
//!
//! A checkpoint holds the balances/production/fleet values as of a snapshot
//! time, plus every job whose effects are not yet fully folded in. Reads
//! derive live state from it without mutation; writes consolidate it to the
//! current time first so debits apply against up-to-date balances.

use serde::{Deserialize, Serialize};

use crate::curves::EconomyCurves;
use crate::error::Result;
use crate::jobs::PendingJob;
use crate::live::compute_live_state;
use crate::state::{Balances, Fleet, Production, ProductionTier};
use crate::time::Timestamp;

/// Snapshot of a player's economy at a point in time.
///
/// `time` is monotonically non-decreasing across writes for a given player.
/// Jobs are appended with start times at or after the then-current
/// checkpoint time; after consolidation an in-flight job may straddle the
/// advanced snapshot time, which is fine because live derivation depends
/// only on completion boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// When this snapshot was taken.
    pub time: Timestamp,
    /// Balances as of `time`.
    pub balances: Balances,
    /// Production levels as of `time`.
    pub production: Production,
    /// Fleet as of `time`.
    pub fleet: Fleet,
    /// Jobs with effects landing after `time`.
    pub pending_jobs: Vec<PendingJob>,
}

impl Checkpoint {
    /// Create a fresh checkpoint with no production, fleet, or jobs.
    #[must_use]
    pub const fn new(time: Timestamp, balances: Balances) -> Self {
        Self {
            time,
            balances,
            production: Production {
                tier1: 0,
                tier2: 0,
                tier3: 0,
            },
            fleet: Fleet::EMPTY,
            pending_jobs: Vec::new(),
        }
    }

    /// Number of pending (not yet completed) upgrades queued for one lane.
    #[must_use]
    pub fn pending_production_count(&self, tier: ProductionTier) -> u32 {
        let count = self
            .pending_jobs
            .iter()
            .filter(|job| matches!(job, PendingJob::Production(p) if p.tier == tier))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Completion time of the last queued upgrade for one lane, if any.
    #[must_use]
    pub fn last_pending_production_end(&self, tier: ProductionTier) -> Option<Timestamp> {
        self.pending_jobs
            .iter()
            .filter_map(|job| match job {
                PendingJob::Production(p) if p.tier == tier => Some(p.end_time),
                _ => None,
            })
            .max()
    }

    /// Fold all effects up to `now` into the stored values and advance the
    /// snapshot time.
    ///
    /// Completed upgrades land in `production`, delivered units in `fleet`,
    /// accrued income in `balances` (sub-unit remainders truncate), and only
    /// still-pending jobs are retained. Called at the start of every write
    /// transaction so mutations always apply against current values.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::error::EconomyError::InvalidTimeOrdering`] if
    /// `now` precedes the snapshot time.
    pub fn consolidate(&mut self, curves: &EconomyCurves<'_>, now: Timestamp) -> Result<()> {
        let live = compute_live_state(self, curves, now)?;
        tracing::debug!(
            from = %self.time,
            to = %now,
            retained_jobs = live.pending_jobs.len(),
            "consolidating checkpoint"
        );
        self.time = now;
        self.balances = live.balances;
        self.production = live.production;
        self.fleet = live.fleet;
        self.pending_jobs = live.pending_jobs;
        Ok(())
    }
}

// Tests that rely on the shared `balance_config` fixture live in
// `tests/checkpoint_tests.rs` (integration tests), to avoid pulling two
// copies of `armada_core` into the unit-test build via `armada_test_utils`.
