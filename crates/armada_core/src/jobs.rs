//! Pending timed jobs: production upgrades and incremental fleet builds.
//!
//! A job is persisted once at enqueue time with a known completion schedule;
//! the live-state calculator folds completed effects in on demand. Jobs are
//! never cancelled; a queued job always runs to completion.

use serde::{Deserialize, Serialize};

use crate::state::{ProductionTier, ShipType};
use crate::time::{DurationMs, Timestamp};

/// One in-flight upgrade of one production lane by exactly one level.
///
/// Completes atomically at `end_time`. Jobs for the same tier are strictly
/// time-ordered and non-overlapping; each queued job's effective start level
/// is the prior job's completion level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionJob {
    /// The lane being upgraded.
    pub tier: ProductionTier,
    /// When the upgrade began (or will begin, if queued behind another).
    pub start_time: Timestamp,
    /// When the level increment lands.
    pub end_time: Timestamp,
}

impl ProductionJob {
    /// Whether the level increment has landed by `now`.
    #[must_use]
    pub fn is_complete_by(&self, now: Timestamp) -> bool {
        self.end_time <= now
    }
}

/// A build order producing units incrementally.
///
/// Unit *k* (1-based) is delivered at `start_time + k * per_unit_interval`;
/// completed units join the fleet as time passes rather than all at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetJob {
    /// The hull being built.
    pub ship_type: ShipType,
    /// Units not yet delivered.
    pub count_remaining: u32,
    /// Time to build one unit.
    pub per_unit_interval: DurationMs,
    /// When the order was placed (or last consolidated).
    pub start_time: Timestamp,
}

impl FleetJob {
    /// Units delivered by `now`, clamped to the remaining count.
    ///
    /// A zero interval delivers everything immediately.
    #[must_use]
    pub fn delivered_by(&self, now: Timestamp) -> u32 {
        let elapsed = now.saturating_since(self.start_time);
        match self.per_unit_interval.whole_intervals_in(elapsed) {
            Some(intervals) => {
                let capped = intervals.min(u64::from(self.count_remaining));
                u32::try_from(capped).unwrap_or(self.count_remaining)
            }
            None => self.count_remaining,
        }
    }

    /// When the final unit of this order is delivered.
    #[must_use]
    pub fn final_completion(&self) -> Timestamp {
        let total = self
            .per_unit_interval
            .checked_mul(u64::from(self.count_remaining))
            .unwrap_or(DurationMs::ZERO);
        self.start_time + total
    }

    /// The job with `delivered` units folded out, or `None` if exhausted.
    ///
    /// The start time advances by the delivered span so the next unit's
    /// completion time is preserved.
    #[must_use]
    pub fn advanced(&self, delivered: u32) -> Option<Self> {
        let delivered = delivered.min(self.count_remaining);
        let remaining = self.count_remaining - delivered;
        if remaining == 0 {
            return None;
        }
        let span = self
            .per_unit_interval
            .checked_mul(u64::from(delivered))
            .unwrap_or(DurationMs::ZERO);
        Some(Self {
            count_remaining: remaining,
            start_time: self.start_time + span,
            ..*self
        })
    }
}

/// A pending timed job of either kind.
///
/// The variants share the "timed effect" shape: a known final completion
/// time and a deterministic state delta, so the live-state calculator can
/// treat them uniformly where possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingJob {
    /// An in-flight production upgrade.
    Production(ProductionJob),
    /// An in-flight fleet build order.
    Fleet(FleetJob),
}

impl PendingJob {
    /// When this job's final effect lands.
    #[must_use]
    pub fn end_time(&self) -> Timestamp {
        match self {
            Self::Production(job) => job.end_time,
            Self::Fleet(job) => job.final_completion(),
        }
    }

    /// Whether every effect of this job has landed by `now`.
    #[must_use]
    pub fn is_complete_by(&self, now: Timestamp) -> bool {
        self.end_time() <= now
    }
}
