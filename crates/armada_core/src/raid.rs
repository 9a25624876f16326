//! Raid rows and reward items.
//!
//! A raid embarks the player's entire live fleet to a location for a fixed
//! duration. The row is created at dispatch with rewards unresolved;
//! resolution (reward computation) is performed by an external collaborator
//! at or after the return time. At most one non-returned raid may exist per
//! player at any time.

use serde::{Deserialize, Serialize};

use crate::state::Fleet;
use crate::time::Timestamp;

/// How long a raid stays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RaidDurationTier {
    /// Quick sortie.
    Short,
    /// Standard expedition.
    Medium,
    /// Extended campaign.
    Long,
}

impl RaidDurationTier {
    /// All duration tiers, in canonical order.
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Stable key string for logs and reminder payloads.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

/// A raid destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RaidLocation {
    /// First destination.
    Location1,
    /// Second destination.
    Location2,
    /// Third destination.
    Location3,
}

impl RaidLocation {
    /// All locations, in canonical order.
    pub const ALL: [Self; 3] = [Self::Location1, Self::Location2, Self::Location3];

    /// Stable key string for logs and reminder payloads.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Location1 => "location1",
            Self::Location2 => "location2",
            Self::Location3 => "location3",
        }
    }
}

/// Lifecycle state of a raid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaidStatus {
    /// Fleet is out; rewards unresolved.
    Dispatched,
    /// Fleet returned and rewards attached.
    Returned,
}

/// An opaque reward unit minted by the inventory subsystem.
///
/// This core only moves items into and out of player inventories; it never
/// interprets their contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item(pub String);

/// A persisted raid row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raid {
    /// Where the fleet was sent.
    pub location: RaidLocation,
    /// How long the round trip takes.
    pub duration_tier: RaidDurationTier,
    /// When the fleet embarked.
    pub departure_time: Timestamp,
    /// When the fleet is due back.
    pub return_time: Timestamp,
    /// The full live fleet captured at dispatch.
    pub fleet_snapshot: Fleet,
    /// Rewards attached at resolution; `None` while the raid is out.
    pub reward_items: Option<Vec<Item>>,
    /// Ships lost, recorded at resolution.
    pub fleet_losses: Option<Fleet>,
}

impl Raid {
    /// Current lifecycle state, derived from reward attachment.
    #[must_use]
    pub const fn status(&self) -> RaidStatus {
        if self.reward_items.is_some() {
            RaidStatus::Returned
        } else {
            RaidStatus::Dispatched
        }
    }

    /// Whether the raid has been resolved.
    #[must_use]
    pub const fn is_returned(&self) -> bool {
        matches!(self.status(), RaidStatus::Returned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Timestamp;

    #[test]
    fn test_status_follows_reward_attachment() {
        let mut raid = Raid {
            location: RaidLocation::Location1,
            duration_tier: RaidDurationTier::Medium,
            departure_time: Timestamp::from_millis(100),
            return_time: Timestamp::from_millis(3_600_100),
            fleet_snapshot: Fleet {
                ship1: 10,
                ..Fleet::EMPTY
            },
            reward_items: None,
            fleet_losses: None,
        };

        assert_eq!(raid.status(), RaidStatus::Dispatched);
        assert!(!raid.is_returned());

        raid.reward_items = Some(vec![Item("salvage:raw".into())]);
        assert_eq!(raid.status(), RaidStatus::Returned);
        assert!(raid.is_returned());
    }

    #[test]
    fn test_empty_reward_list_still_returns() {
        let raid = Raid {
            location: RaidLocation::Location2,
            duration_tier: RaidDurationTier::Short,
            departure_time: Timestamp::EPOCH,
            return_time: Timestamp::from_millis(1),
            fleet_snapshot: Fleet::EMPTY,
            reward_items: Some(Vec::new()),
            fleet_losses: None,
        };
        assert!(raid.is_returned());
    }
}
