//! Raid location data.

use serde::{Deserialize, Serialize};

use crate::raid::RaidLocation;

/// Static data for one raid location.
///
/// Unlocks beyond the defaults are driven by the (external) inventory
/// subsystem; this table only says where every new player may start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationData {
    /// Display name of the location.
    pub name: String,

    /// Whether every new player starts with this location unlocked.
    #[serde(default)]
    pub unlocked_by_default: bool,
}

/// Data for every raid location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTable {
    /// First location.
    pub location1: LocationData,
    /// Second location.
    pub location2: LocationData,
    /// Third location.
    pub location3: LocationData,
}

impl LocationTable {
    /// Data for one location.
    #[must_use]
    pub const fn get(&self, location: RaidLocation) -> &LocationData {
        match location {
            RaidLocation::Location1 => &self.location1,
            RaidLocation::Location2 => &self.location2,
            RaidLocation::Location3 => &self.location3,
        }
    }
}
