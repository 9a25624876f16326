//! Curve parameters for the production lanes.

use serde::{Deserialize, Serialize};

use crate::math::{fixed_serde, Fixed};
use crate::state::{Balances, ProductionTier};
use crate::time::DurationMs;

/// Income and upgrade curve parameters for one production lane.
///
/// Income is linear in level (`base_rate + rate_per_level * level`, units
/// per second); upgrade cost and duration grow exponentially
/// (`base * growth^level`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCurveData {
    /// Display name of the resource this lane produces.
    pub name: String,

    /// Units per second at level 0.
    #[serde(with = "fixed_serde")]
    pub base_rate: Fixed,

    /// Additional units per second per level.
    #[serde(with = "fixed_serde")]
    pub rate_per_level: Fixed,

    /// Upgrade cost from level 0 to level 1.
    pub base_upgrade_cost: Balances,

    /// Per-level cost multiplier. Must exceed 1.
    #[serde(with = "fixed_serde")]
    pub cost_growth: Fixed,

    /// Upgrade duration from level 0 to level 1.
    pub base_upgrade_duration: DurationMs,

    /// Per-level duration multiplier. Must be at least 1.
    #[serde(with = "fixed_serde")]
    pub duration_growth: Fixed,
}

/// Curve parameters for every production lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCurveTable {
    /// Tier-1 lane.
    pub tier1: ProductionCurveData,
    /// Tier-2 lane.
    pub tier2: ProductionCurveData,
    /// Tier-3 lane.
    pub tier3: ProductionCurveData,
}

impl ProductionCurveTable {
    /// Parameters for one lane.
    #[must_use]
    pub const fn get(&self, tier: ProductionTier) -> &ProductionCurveData {
        match tier {
            ProductionTier::Tier1 => &self.tier1,
            ProductionTier::Tier2 => &self.tier2,
            ProductionTier::Tier3 => &self.tier3,
        }
    }
}
