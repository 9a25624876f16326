//! # Armada Engine
//!
//! Stateful economy engine for the Armada persistent fleet game.
//!
//! Sits on top of [`armada_core`]'s pure checkpoint/live-state model and
//! adds the parts that touch shared state: a per-player transactional
//! store, the job-queue engine that enqueues upgrades and build orders
//! under balance constraints, and the raid dispatch state machine.
//!
//! Per-player state is the unit of mutual exclusion: every write runs as a
//! single transaction scoped to one player's row, so two concurrent
//! requests for the same player cannot both pass a balance check against
//! the same pre-debit snapshot. Cross-player parallelism is unconstrained.
//!
//! Expected business-rule failures (insufficient funds, raid already
//! active, ...) are returned as typed [`error::Rejection`] values inside
//! [`error::Outcome`]; only storage and contract faults propagate as
//! [`error::EngineError`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod engine;
pub mod error;
pub mod reminder;
pub mod store;

pub use engine::{BuildReceipt, EconomyEngine, RaidReceipt, RaidResolution, UpgradeReceipt};
pub use error::{EngineError, Outcome, Rejection};
pub use reminder::{Reminder, ReminderKind, ReminderScheduler, ScheduleError};
pub use store::{MemoryStore, PlayerId, PlayerRecord, StoreError, Transaction};
