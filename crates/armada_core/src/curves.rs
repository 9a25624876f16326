//! Economy curves: income rates, upgrade costs, build costs.
//!
//! Pure functions over the immutable [`GameConfig`]. Each production lane
//! is independently parameterized. No state, no side effects; invalid
//! tier/ship keys are unrepresentable by construction.

use crate::data::GameConfig;
use crate::math::{Fixed, Wide};
use crate::raid::RaidDurationTier;
use crate::state::{Balances, ProductionTier, ShipType};
use crate::time::DurationMs;

/// `round(base * growth^level)` computed in wide fixed-point.
///
/// Saturates instead of overflowing at absurd levels; growth factors are
/// validated > 1 at config load, so the result is strictly increasing in
/// `level` for any non-zero base until saturation.
fn growth_scale(base: u64, growth: Fixed, level: u32) -> u64 {
    let mut acc = Wide::saturating_from_num(base);
    let factor = Wide::from_num(growth);
    for _ in 0..level {
        acc = acc.saturating_mul(factor);
    }
    acc.round().saturating_to_num::<u64>()
}

/// Curve evaluation over one loaded configuration.
#[derive(Debug, Clone, Copy)]
pub struct EconomyCurves<'a> {
    config: &'a GameConfig,
}

impl<'a> EconomyCurves<'a> {
    /// Create a curve view over a configuration.
    #[must_use]
    pub const fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Income rate of one lane at `level`, in units per second.
    ///
    /// Monotonically non-decreasing in `level`; deterministic.
    #[must_use]
    pub fn income_rate(&self, tier: ProductionTier, level: u32) -> Fixed {
        let curve = self.config.production(tier);
        let rate = curve.base_rate + curve.rate_per_level * Fixed::from_num(level);
        rate * self.config.income_scale
    }

    /// Cost of upgrading one lane from `level` to `level + 1`.
    ///
    /// Strictly increasing in `level` per the configured growth factor.
    #[must_use]
    pub fn upgrade_cost(&self, tier: ProductionTier, level: u32) -> Balances {
        let curve = self.config.production(tier);
        let base = curve.base_upgrade_cost;
        Balances {
            tier1: growth_scale(base.tier1, curve.cost_growth, level),
            tier2: growth_scale(base.tier2, curve.cost_growth, level),
            tier3: growth_scale(base.tier3, curve.cost_growth, level),
            special1: growth_scale(base.special1, curve.cost_growth, level),
        }
    }

    /// Duration of the upgrade from `level` to `level + 1`.
    #[must_use]
    pub fn upgrade_duration(&self, tier: ProductionTier, level: u32) -> DurationMs {
        let curve = self.config.production(tier);
        DurationMs::new(growth_scale(
            curve.base_upgrade_duration.as_millis(),
            curve.duration_growth,
            level,
        ))
    }

    /// Cost to build one unit of `ship`. Constant per type.
    #[must_use]
    pub fn build_cost(&self, ship: ShipType) -> Balances {
        self.config.ship(ship).cost
    }

    /// Time to build one unit of `ship`. Constant per type.
    #[must_use]
    pub fn build_time(&self, ship: ShipType) -> DurationMs {
        self.config.ship(ship).build_interval
    }

    /// Round-trip duration of a raid at `tier`.
    #[must_use]
    pub fn raid_duration(&self, tier: RaidDurationTier) -> DurationMs {
        self.config.raid_duration(tier)
    }
}


// Tests that rely on the shared `balance_config` fixture live in
// `tests/curves_tests.rs` (integration tests), to avoid pulling two copies
// of `armada_core` into the unit-test build via `armada_test_utils`.
