//! # Armada Development Tools
//!
//! Offline validators for game-balance configuration files.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod validate;
