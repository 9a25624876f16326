//! Error types for the economy core.

use thiserror::Error;

use crate::time::Timestamp;

/// Result type alias using [`EconomyError`].
pub type Result<T> = std::result::Result<T, EconomyError>;

/// Faults raised by the economy core.
///
/// These are caller or configuration bugs, not business-rule outcomes;
/// expected rejections (insufficient funds, raid already active, ...) are
/// typed results at the engine layer and never appear here.
#[derive(Debug, Error)]
pub enum EconomyError {
    /// A live-state query was made for a time before the checkpoint time.
    /// Indicates a clock or caller bug; always fatal for that call.
    #[error("query time {query} precedes checkpoint time {checkpoint}")]
    InvalidTimeOrdering {
        /// The checkpoint's snapshot time.
        checkpoint: Timestamp,
        /// The offending query time.
        query: Timestamp,
    },

    /// The game-balance configuration failed validation or parsing.
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}
