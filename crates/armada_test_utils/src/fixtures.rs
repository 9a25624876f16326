//! Test fixtures and helpers.
//!
//! A deterministic game-balance configuration plus engine and record
//! builders for consistent testing. The curve constants here are chosen so
//! hand-computed expectations stay small: tier-1 upgrades cost
//! `125 * 2^level` and tier-1 income is `1.0 + 0.5 * level` units/sec.

use std::sync::Arc;

use armada_core::checkpoint::Checkpoint;
use armada_core::data::{
    GameConfig, LocationData, LocationTable, ProductionCurveData, ProductionCurveTable,
    RaidDurations, ShipData, ShipTable,
};
use armada_core::math::Fixed;
use armada_core::state::Balances;
use armada_core::time::DurationMs;
use armada_engine::engine::EconomyEngine;
use armada_engine::reminder::RecordingScheduler;
use armada_engine::store::PlayerRecord;

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> Fixed {
    Fixed::from_num(n)
}

/// Create a fixed-point number from a float (for tests only).
///
/// Note: In real simulation code, never use floats.
/// This is only for convenient test setup.
#[must_use]
pub fn fixed_f(n: f64) -> Fixed {
    Fixed::from_num(n)
}

fn lane(
    name: &str,
    base_rate: f64,
    rate_per_level: f64,
    base_cost: Balances,
    cost_growth: f64,
    base_duration_secs: u64,
    duration_growth: f64,
) -> ProductionCurveData {
    ProductionCurveData {
        name: name.into(),
        base_rate: fixed_f(base_rate),
        rate_per_level: fixed_f(rate_per_level),
        base_upgrade_cost: base_cost,
        cost_growth: fixed_f(cost_growth),
        base_upgrade_duration: DurationMs::from_secs(base_duration_secs),
        duration_growth: fixed_f(duration_growth),
    }
}

/// The standard test game-balance configuration.
#[must_use]
pub fn balance_config() -> GameConfig {
    GameConfig {
        starting_balances: Balances {
            tier1: 500,
            ..Balances::ZERO
        },
        income_scale: Fixed::ONE,
        special_resource_name: "Relic Shards".into(),
        production: ProductionCurveTable {
            tier1: lane(
                "Ferrite",
                1.0,
                0.5,
                Balances {
                    tier1: 125,
                    ..Balances::ZERO
                },
                2.0,
                60,
                1.25,
            ),
            tier2: lane(
                "Cobalt",
                0.5,
                0.25,
                Balances {
                    tier1: 150,
                    tier2: 40,
                    ..Balances::ZERO
                },
                1.75,
                120,
                1.25,
            ),
            tier3: lane(
                "Iridium",
                0.25,
                0.125,
                Balances {
                    tier1: 200,
                    tier2: 75,
                    ..Balances::ZERO
                },
                1.5,
                240,
                1.5,
            ),
        },
        ships: ShipTable {
            ship1: ShipData {
                name: "Corvette".into(),
                cost: Balances {
                    tier1: 50,
                    ..Balances::ZERO
                },
                build_interval: DurationMs::from_secs(30),
            },
            ship2: ShipData {
                name: "Frigate".into(),
                cost: Balances {
                    tier1: 100,
                    tier2: 25,
                    ..Balances::ZERO
                },
                build_interval: DurationMs::from_secs(60),
            },
            ship3: ShipData {
                name: "Cruiser".into(),
                cost: Balances {
                    tier2: 150,
                    ..Balances::ZERO
                },
                build_interval: DurationMs::from_secs(120),
            },
            ship4: ShipData {
                name: "Dreadnought".into(),
                cost: Balances {
                    tier1: 500,
                    tier3: 60,
                    ..Balances::ZERO
                },
                build_interval: DurationMs::from_secs(300),
            },
            ship_special1: ShipData {
                name: "Relic Ark".into(),
                cost: Balances {
                    special1: 5,
                    ..Balances::ZERO
                },
                build_interval: DurationMs::from_secs(600),
            },
        },
        locations: LocationTable {
            location1: LocationData {
                name: "Shattered Belt".into(),
                unlocked_by_default: true,
            },
            location2: LocationData {
                name: "Drifting Graveyard".into(),
                unlocked_by_default: false,
            },
            location3: LocationData {
                name: "Maw Nebula".into(),
                unlocked_by_default: false,
            },
        },
        raid_durations: RaidDurations {
            short: DurationMs::from_secs(30 * 60),
            medium: DurationMs::from_secs(60 * 60),
            long: DurationMs::from_secs(4 * 60 * 60),
        },
    }
}

/// An engine over the standard config with a recording reminder scheduler.
#[must_use]
pub fn test_engine() -> (EconomyEngine, Arc<RecordingScheduler>) {
    let scheduler = Arc::new(RecordingScheduler::new());
    let engine = EconomyEngine::new(Arc::new(balance_config()), scheduler.clone());
    (engine, scheduler)
}

/// A player record around `checkpoint` with the standard config's default
/// unlocks and no raid history.
#[must_use]
pub fn player_record(checkpoint: Checkpoint) -> PlayerRecord {
    let config = balance_config();
    PlayerRecord {
        checkpoint,
        raid: None,
        unlocked_locations: config.default_unlocked_locations().collect(),
        inventory: Vec::new(),
        version: 0,
    }
}
