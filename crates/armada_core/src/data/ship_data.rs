//! Ship build costs and cadences.

use serde::{Deserialize, Serialize};

use crate::state::{Balances, ShipType};
use crate::time::DurationMs;

/// Build parameters for one ship type. Constant per type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipData {
    /// Display name of the hull.
    pub name: String,

    /// Cost to build one unit.
    pub cost: Balances,

    /// Time to build one unit; a build order of N units delivers one unit
    /// every interval.
    pub build_interval: DurationMs,
}

/// Build parameters for every ship type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipTable {
    /// Light hull.
    pub ship1: ShipData,
    /// Escort hull.
    pub ship2: ShipData,
    /// Heavy hull.
    pub ship3: ShipData,
    /// Capital hull.
    pub ship4: ShipData,
    /// Special hull.
    pub ship_special1: ShipData,
}

impl ShipTable {
    /// Parameters for one ship type.
    #[must_use]
    pub const fn get(&self, ship: ShipType) -> &ShipData {
        match ship {
            ShipType::Ship1 => &self.ship1,
            ShipType::Ship2 => &self.ship2,
            ShipType::Ship3 => &self.ship3,
            ShipType::Ship4 => &self.ship4,
            ShipType::ShipSpecial1 => &self.ship_special1,
        }
    }
}
