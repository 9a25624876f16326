//! Game-balance configuration tables.
//!
//! This module contains pure data structures that define resource lanes,
//! ship stats, and raid locations. All structs are designed to be
//! deserialized from RON files, loaded once at process start, and treated
//! as immutable for the process lifetime (shared by `Arc`, never a mutable
//! global).
//!
//! **Note:** This module contains no file IO - it only defines data types
//! and string parsing. File loading is handled by the embedding binary.

mod economy_data;
mod location_data;
mod ship_data;

pub use economy_data::{ProductionCurveData, ProductionCurveTable};
pub use location_data::{LocationData, LocationTable};
pub use ship_data::{ShipData, ShipTable};

use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, Result};
use crate::math::{fixed_serde, Fixed};
use crate::raid::{RaidDurationTier, RaidLocation};
use crate::state::{Balances, ProductionTier, ResourceTier, ShipType};
use crate::time::DurationMs;

/// Raid round-trip durations per tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidDurations {
    /// Short raid round trip.
    pub short: DurationMs,
    /// Medium raid round trip.
    pub medium: DurationMs,
    /// Long raid round trip.
    pub long: DurationMs,
}

/// The complete game-balance configuration table.
///
/// # Example RON
///
/// ```ron
/// GameConfig(
///     starting_balances: (tier1: 500, tier2: 0, tier3: 0, special1: 0),
///     income_scale: 4294967296, // Fixed-point for 1.0
///     production: (
///         tier1: (
///             name: "Ferrite",
///             base_rate: 4294967296,      // 1.0/sec at level 0
///             rate_per_level: 2147483648, // +0.5/sec per level
///             base_upgrade_cost: (tier1: 125, tier2: 0, tier3: 0, special1: 0),
///             cost_growth: 8589934592,    // x2.0 per level
///             base_upgrade_duration: 60000,
///             duration_growth: 5368709120, // x1.25 per level
///         ),
///         // tier2, tier3 ...
///     ),
///     // ships, locations, raid_durations ...
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Balances granted to a player on first contact.
    pub starting_balances: Balances,

    /// Global multiplier applied to every income rate.
    #[serde(with = "fixed_serde")]
    pub income_scale: Fixed,

    /// Display name of the special (non-mined) resource.
    pub special_resource_name: String,

    /// Income/upgrade curve parameters per production lane.
    pub production: ProductionCurveTable,

    /// Build cost and cadence per ship type.
    pub ships: ShipTable,

    /// Raid locations.
    pub locations: LocationTable,

    /// Raid round-trip durations per tier.
    pub raid_durations: RaidDurations,
}

impl GameConfig {
    /// Parse a configuration from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|err| EconomyError::InvalidConfig(err.to_string()))
    }

    /// Curve parameters for one production lane.
    #[must_use]
    pub const fn production(&self, tier: ProductionTier) -> &ProductionCurveData {
        self.production.get(tier)
    }

    /// Stats for one ship type.
    #[must_use]
    pub const fn ship(&self, ship: ShipType) -> &ShipData {
        self.ships.get(ship)
    }

    /// Data for one raid location.
    #[must_use]
    pub const fn location(&self, location: RaidLocation) -> &LocationData {
        self.locations.get(location)
    }

    /// Round-trip duration for one raid tier.
    #[must_use]
    pub const fn raid_duration(&self, tier: RaidDurationTier) -> DurationMs {
        match tier {
            RaidDurationTier::Short => self.raid_durations.short,
            RaidDurationTier::Medium => self.raid_durations.medium,
            RaidDurationTier::Long => self.raid_durations.long,
        }
    }

    /// Display name for a resource tier.
    #[must_use]
    pub fn resource_name(&self, tier: ResourceTier) -> &str {
        match tier {
            ResourceTier::Tier1 => &self.production.tier1.name,
            ResourceTier::Tier2 => &self.production.tier2.name,
            ResourceTier::Tier3 => &self.production.tier3.name,
            ResourceTier::Special1 => &self.special_resource_name,
        }
    }

    /// Resolve a production lane from its display name.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Absence (`None`) means "no such lane", which is distinct from any
    /// error condition.
    #[must_use]
    pub fn production_tier_by_name(&self, name: &str) -> Option<ProductionTier> {
        let wanted = name.trim().to_lowercase();
        ProductionTier::ALL
            .into_iter()
            .find(|tier| self.production.get(*tier).name.to_lowercase() == wanted)
    }

    /// Resolve a ship type from its display name.
    #[must_use]
    pub fn ship_type_by_name(&self, name: &str) -> Option<ShipType> {
        let wanted = name.trim().to_lowercase();
        ShipType::ALL
            .into_iter()
            .find(|ship| self.ships.get(*ship).name.to_lowercase() == wanted)
    }

    /// Resolve a raid location from its display name.
    #[must_use]
    pub fn location_by_name(&self, name: &str) -> Option<RaidLocation> {
        let wanted = name.trim().to_lowercase();
        RaidLocation::ALL
            .into_iter()
            .find(|loc| self.locations.get(*loc).name.to_lowercase() == wanted)
    }

    /// Validate the whole table.
    ///
    /// Rejects curves that would violate the economy invariants: income
    /// must be monotonically non-decreasing in level, upgrade costs must be
    /// strictly increasing, and build cadences must be non-instant.
    pub fn validate(&self) -> Result<()> {
        if self.income_scale <= Fixed::ZERO {
            return Err(EconomyError::InvalidConfig(
                "income_scale must be positive".into(),
            ));
        }

        for tier in ProductionTier::ALL {
            let curve = self.production.get(tier);
            let label = curve.name.as_str();
            if curve.base_rate < Fixed::ZERO || curve.rate_per_level < Fixed::ZERO {
                return Err(EconomyError::InvalidConfig(format!(
                    "{label}: income rates must be non-negative"
                )));
            }
            if curve.base_upgrade_cost.is_zero() {
                return Err(EconomyError::InvalidConfig(format!(
                    "{label}: base upgrade cost must be non-zero"
                )));
            }
            if curve.cost_growth <= Fixed::ONE {
                return Err(EconomyError::InvalidConfig(format!(
                    "{label}: cost_growth must exceed 1 for strictly increasing costs"
                )));
            }
            if curve.duration_growth < Fixed::ONE {
                return Err(EconomyError::InvalidConfig(format!(
                    "{label}: duration_growth must be at least 1"
                )));
            }
            if curve.base_upgrade_duration.is_zero() {
                return Err(EconomyError::InvalidConfig(format!(
                    "{label}: base_upgrade_duration must be non-zero"
                )));
            }
        }

        for ship in ShipType::ALL {
            let data = self.ships.get(ship);
            if data.build_interval.is_zero() {
                return Err(EconomyError::InvalidConfig(format!(
                    "{}: build_interval must be non-zero",
                    data.name
                )));
            }
            if data.cost.is_zero() {
                return Err(EconomyError::InvalidConfig(format!(
                    "{}: build cost must be non-zero",
                    data.name
                )));
            }
        }

        if !(self.raid_durations.short < self.raid_durations.medium
            && self.raid_durations.medium < self.raid_durations.long)
        {
            return Err(EconomyError::InvalidConfig(
                "raid durations must be strictly increasing short < medium < long".into(),
            ));
        }

        if !RaidLocation::ALL
            .into_iter()
            .any(|loc| self.locations.get(loc).unlocked_by_default)
        {
            return Err(EconomyError::InvalidConfig(
                "at least one raid location must be unlocked by default".into(),
            ));
        }

        Ok(())
    }

    /// Raid locations unlocked for every new player.
    pub fn default_unlocked_locations(&self) -> impl Iterator<Item = RaidLocation> + '_ {
        RaidLocation::ALL
            .into_iter()
            .filter(|loc| self.locations.get(*loc).unlocked_by_default)
    }
}

// Tests that rely on the shared `balance_config` fixture live in
// `tests/data_tests.rs` (integration tests), to avoid pulling two copies of
// `armada_core` into the unit-test build via `armada_test_utils`.
