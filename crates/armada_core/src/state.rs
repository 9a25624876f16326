//! Player economy state: resource balances, production levels, fleet counts.
//!
//! All amounts are unsigned integers; a balance can never go negative by
//! construction. Debits are all-or-nothing via [`Balances::checked_sub_all`].

use serde::{Deserialize, Serialize};

/// Identifier for one of the parallel resource lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceTier {
    /// Primary resource.
    Tier1,
    /// Mid-tier resource.
    Tier2,
    /// High-tier resource.
    Tier3,
    /// Special resource, earned rather than mined.
    Special1,
}

impl ResourceTier {
    /// All resource tiers, in canonical order.
    pub const ALL: [Self; 4] = [Self::Tier1, Self::Tier2, Self::Tier3, Self::Special1];

    /// Stable key string for logs and reminder payloads.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Tier1 => "tier1",
            Self::Tier2 => "tier2",
            Self::Tier3 => "tier3",
            Self::Special1 => "special1",
        }
    }
}

/// Identifier for a production lane. Only the mined tiers have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductionTier {
    /// Produces [`ResourceTier::Tier1`].
    Tier1,
    /// Produces [`ResourceTier::Tier2`].
    Tier2,
    /// Produces [`ResourceTier::Tier3`].
    Tier3,
}

impl ProductionTier {
    /// All production tiers, in canonical order.
    pub const ALL: [Self; 3] = [Self::Tier1, Self::Tier2, Self::Tier3];

    /// The resource this lane produces.
    #[must_use]
    pub const fn resource(self) -> ResourceTier {
        match self {
            Self::Tier1 => ResourceTier::Tier1,
            Self::Tier2 => ResourceTier::Tier2,
            Self::Tier3 => ResourceTier::Tier3,
        }
    }

    /// Stable key string for logs and reminder payloads.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Tier1 => "tier1",
            Self::Tier2 => "tier2",
            Self::Tier3 => "tier3",
        }
    }
}

/// Identifier for a ship type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShipType {
    /// Light hull.
    Ship1,
    /// Escort hull.
    Ship2,
    /// Heavy hull.
    Ship3,
    /// Capital hull.
    Ship4,
    /// Special hull, built from the special resource.
    ShipSpecial1,
}

impl ShipType {
    /// All ship types, in canonical order.
    pub const ALL: [Self; 5] = [
        Self::Ship1,
        Self::Ship2,
        Self::Ship3,
        Self::Ship4,
        Self::ShipSpecial1,
    ];

    /// Stable key string for logs and reminder payloads.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Ship1 => "ship1",
            Self::Ship2 => "ship2",
            Self::Ship3 => "ship3",
            Self::Ship4 => "ship4",
            Self::ShipSpecial1 => "ship_special1",
        }
    }
}

/// Per-tier resource balances.
///
/// Invariant: fields are never negative (unsigned), and every debit is
/// validated field-wise before any field is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balances {
    /// Primary resource amount.
    pub tier1: u64,
    /// Mid-tier resource amount.
    pub tier2: u64,
    /// High-tier resource amount.
    pub tier3: u64,
    /// Special resource amount.
    pub special1: u64,
}

impl Balances {
    /// All-zero balances.
    pub const ZERO: Self = Self {
        tier1: 0,
        tier2: 0,
        tier3: 0,
        special1: 0,
    };

    /// Amount held for one tier.
    #[must_use]
    pub const fn amount(&self, tier: ResourceTier) -> u64 {
        match tier {
            ResourceTier::Tier1 => self.tier1,
            ResourceTier::Tier2 => self.tier2,
            ResourceTier::Tier3 => self.tier3,
            ResourceTier::Special1 => self.special1,
        }
    }

    /// Mutable amount for one tier.
    pub fn amount_mut(&mut self, tier: ResourceTier) -> &mut u64 {
        match tier {
            ResourceTier::Tier1 => &mut self.tier1,
            ResourceTier::Tier2 => &mut self.tier2,
            ResourceTier::Tier3 => &mut self.tier3,
            ResourceTier::Special1 => &mut self.special1,
        }
    }

    /// Add `amount` of one tier, saturating at the type limit.
    pub fn credit(&mut self, tier: ResourceTier, amount: u64) {
        let field = self.amount_mut(tier);
        *field = field.saturating_add(amount);
    }

    /// Field-wise `self >= cost`.
    #[must_use]
    pub const fn covers(&self, cost: &Self) -> bool {
        self.tier1 >= cost.tier1
            && self.tier2 >= cost.tier2
            && self.tier3 >= cost.tier3
            && self.special1 >= cost.special1
    }

    /// Subtract `cost` from every field, or `None` if any field would go
    /// negative. No field is mutated on failure.
    #[must_use]
    pub fn checked_sub_all(&self, cost: &Self) -> Option<Self> {
        Some(Self {
            tier1: self.tier1.checked_sub(cost.tier1)?,
            tier2: self.tier2.checked_sub(cost.tier2)?,
            tier3: self.tier3.checked_sub(cost.tier3)?,
            special1: self.special1.checked_sub(cost.special1)?,
        })
    }

    /// Field-wise saturating addition.
    #[must_use]
    pub fn saturating_add(&self, other: &Self) -> Self {
        Self {
            tier1: self.tier1.saturating_add(other.tier1),
            tier2: self.tier2.saturating_add(other.tier2),
            tier3: self.tier3.saturating_add(other.tier3),
            special1: self.special1.saturating_add(other.special1),
        }
    }

    /// Multiply every field by `count`, or `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, count: u64) -> Option<Self> {
        Some(Self {
            tier1: self.tier1.checked_mul(count)?,
            tier2: self.tier2.checked_mul(count)?,
            tier3: self.tier3.checked_mul(count)?,
            special1: self.special1.checked_mul(count)?,
        })
    }

    /// Whether every field is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.tier1 == 0 && self.tier2 == 0 && self.tier3 == 0 && self.special1 == 0
    }
}

impl std::ops::Add for Balances {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(&rhs)
    }
}

impl std::ops::AddAssign for Balances {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(&rhs);
    }
}

/// Per-tier production levels. Level determines income rate and the cost of
/// the next upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Production {
    /// Level of the tier-1 lane.
    pub tier1: u32,
    /// Level of the tier-2 lane.
    pub tier2: u32,
    /// Level of the tier-3 lane.
    pub tier3: u32,
}

impl Production {
    /// Current level of one lane.
    #[must_use]
    pub const fn level(&self, tier: ProductionTier) -> u32 {
        match tier {
            ProductionTier::Tier1 => self.tier1,
            ProductionTier::Tier2 => self.tier2,
            ProductionTier::Tier3 => self.tier3,
        }
    }

    /// Increment one lane by exactly one level.
    pub fn bump(&mut self, tier: ProductionTier) {
        match tier {
            ProductionTier::Tier1 => self.tier1 += 1,
            ProductionTier::Tier2 => self.tier2 += 1,
            ProductionTier::Tier3 => self.tier3 += 1,
        }
    }
}

/// Per-type fleet counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fleet {
    /// Light hull count.
    pub ship1: u64,
    /// Escort hull count.
    pub ship2: u64,
    /// Heavy hull count.
    pub ship3: u64,
    /// Capital hull count.
    pub ship4: u64,
    /// Special hull count.
    pub ship_special1: u64,
}

impl Fleet {
    /// The empty fleet.
    pub const EMPTY: Self = Self {
        ship1: 0,
        ship2: 0,
        ship3: 0,
        ship4: 0,
        ship_special1: 0,
    };

    /// Count of one ship type.
    #[must_use]
    pub const fn count(&self, ship: ShipType) -> u64 {
        match ship {
            ShipType::Ship1 => self.ship1,
            ShipType::Ship2 => self.ship2,
            ShipType::Ship3 => self.ship3,
            ShipType::Ship4 => self.ship4,
            ShipType::ShipSpecial1 => self.ship_special1,
        }
    }

    /// Add `count` ships of one type, saturating at the type limit.
    pub fn add(&mut self, ship: ShipType, count: u64) {
        let field = match ship {
            ShipType::Ship1 => &mut self.ship1,
            ShipType::Ship2 => &mut self.ship2,
            ShipType::Ship3 => &mut self.ship3,
            ShipType::Ship4 => &mut self.ship4,
            ShipType::ShipSpecial1 => &mut self.ship_special1,
        };
        *field = field.saturating_add(count);
    }

    /// Total hull count across all types.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.ship1 + self.ship2 + self.ship3 + self.ship4 + self.ship_special1
    }

    /// Whether the fleet has no ships at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Field-wise saturating addition.
    #[must_use]
    pub fn saturating_add(&self, other: &Self) -> Self {
        Self {
            ship1: self.ship1.saturating_add(other.ship1),
            ship2: self.ship2.saturating_add(other.ship2),
            ship3: self.ship3.saturating_add(other.ship3),
            ship4: self.ship4.saturating_add(other.ship4),
            ship_special1: self.ship_special1.saturating_add(other.ship_special1),
        }
    }

    /// Field-wise saturating subtraction (losses clamp at zero).
    #[must_use]
    pub fn saturating_sub(&self, other: &Self) -> Self {
        Self {
            ship1: self.ship1.saturating_sub(other.ship1),
            ship2: self.ship2.saturating_sub(other.ship2),
            ship3: self.ship3.saturating_sub(other.ship3),
            ship4: self.ship4.saturating_sub(other.ship4),
            ship_special1: self.ship_special1.saturating_sub(other.ship_special1),
        }
    }
}

impl std::ops::AddAssign for Fleet {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(&rhs);
    }
}
