//! Engine error taxonomy.
//!
//! Three layers, kept strictly apart:
//!
//! - [`Rejection`] - expected business-rule failures, returned as data
//!   inside [`Outcome`] and never as `Err`. They carry enough structure
//!   (required vs. available balances, return times) for a presentation
//!   layer to format a message; the engine itself never formats user text.
//! - [`EngineError`] - consistency and infrastructure faults that abort
//!   the call: storage failures, exhausted commit retries, time-ordering
//!   contract violations.
//! - [`crate::store::StoreError`] - raised by the storage layer and wrapped
//!   into [`EngineError`].

use thiserror::Error;

use armada_core::error::EconomyError;
use armada_core::raid::RaidLocation;
use armada_core::state::Balances;
use armada_core::time::Timestamp;

use crate::store::StoreError;

/// An expected, user-facing business-rule failure.
///
/// Returned as a typed result, never thrown; the transaction that produced
/// it is rolled back in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The live balances do not cover the cost.
    InsufficientResources {
        /// What the operation would have debited.
        required: Balances,
        /// What the player actually had.
        available: Balances,
    },
    /// A build order for zero units (or one whose total overflows).
    InvalidCount {
        /// The offending count.
        count: u32,
    },
    /// A raid is already out for this player.
    RaidAlreadyActive {
        /// When the active raid is due back.
        return_time: Timestamp,
    },
    /// The target location is not in the player's unlocked set.
    LocationUnavailable {
        /// The locked location.
        location: RaidLocation,
    },
    /// The player has no ships to send.
    NoFleetAvailable,
    /// No dispatched raid exists to resolve.
    NoActiveRaid,
    /// The raid cannot be resolved before its return time.
    RaidNotReturned {
        /// When the raid is due back.
        return_time: Timestamp,
    },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientResources {
                required,
                available,
            } => write!(
                f,
                "insufficient resources: required {required:?}, available {available:?}"
            ),
            Self::InvalidCount { count } => write!(f, "invalid build count {count}"),
            Self::RaidAlreadyActive { return_time } => {
                write!(f, "a raid is already out, due back at {return_time}")
            }
            Self::LocationUnavailable { location } => {
                write!(f, "location {} is not unlocked", location.as_key())
            }
            Self::NoFleetAvailable => write!(f, "no fleet available to dispatch"),
            Self::NoActiveRaid => write!(f, "no active raid to resolve"),
            Self::RaidNotReturned { return_time } => {
                write!(f, "raid has not returned yet, due back at {return_time}")
            }
        }
    }
}

impl std::error::Error for Rejection {}

/// Result of a write operation: a success payload or a typed rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation committed; payload describes what was queued/changed.
    Accepted(T),
    /// A business rule rejected the operation; nothing was mutated.
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    /// Whether the operation committed.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The rejection, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }

    /// Convert into a plain `Result` over the payload.
    pub fn into_accepted(self) -> Result<T, Rejection> {
        match self {
            Self::Accepted(payload) => Ok(payload),
            Self::Rejected(rejection) => Err(rejection),
        }
    }
}

/// Faults that abort an engine call.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A core contract violation (e.g. query time before checkpoint time).
    #[error(transparent)]
    Economy(#[from] EconomyError),

    /// The storage layer failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A commit conflict persisted through every bounded retry.
    #[error("player state conflict persisted after {attempts} attempts")]
    Conflict {
        /// How many commits were attempted.
        attempts: u32,
    },
}
