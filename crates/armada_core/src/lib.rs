//! # Armada Core
//!
//! Deterministic economy core for the Armada persistent fleet game.
//!
//! This crate contains **only** deterministic logic:
//! - No IO
//! - No wall-clock reads (every query takes an explicit timestamp)
//! - No floating-point math (uses fixed-point)
//!
//! Player state is stored as a periodic [`checkpoint::Checkpoint`] plus a
//! queue of pending timed jobs. The current ("live") state is never stored;
//! it is derived on demand by [`live::compute_live_state`], which combines
//! the checkpoint with elapsed time and job completions. This keeps storage
//! writes rare while supporting unbounded gaps between checkpoints.
//!
//! ## Crate Structure
//!
//! - [`state`] - balances, production levels, fleet composition
//! - [`jobs`] - pending timed jobs (production upgrades, fleet builds)
//! - [`checkpoint`] - the persisted snapshot and its consolidation
//! - [`live`] - checkpoint + jobs + time -> live state derivation
//! - [`curves`] - income, upgrade-cost and build-cost curves
//! - [`raid`] - raid rows and reward items
//! - [`data`] - game-balance configuration tables
//! - [`math`] - fixed-point math utilities

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod checkpoint;
pub mod curves;
pub mod data;
pub mod error;
pub mod jobs;
pub mod live;
pub mod math;
pub mod raid;
pub mod state;
pub mod time;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::checkpoint::Checkpoint;
    pub use crate::curves::EconomyCurves;
    pub use crate::data::GameConfig;
    pub use crate::error::{EconomyError, Result};
    pub use crate::jobs::{FleetJob, PendingJob, ProductionJob};
    pub use crate::live::{compute_live_state, LiveState};
    pub use crate::math::Fixed;
    pub use crate::raid::{Item, Raid, RaidDurationTier, RaidLocation, RaidStatus};
    pub use crate::state::{Balances, Fleet, Production, ProductionTier, ResourceTier, ShipType};
    pub use crate::time::{DurationMs, Timestamp};
}
