//! Fixed-point math utilities for deterministic economy calculations.
//!
//! All income and growth-curve math uses fixed-point arithmetic to ensure
//! deterministic behavior across platforms. Floating-point operations can
//! produce different results on different CPUs, which would make live-state
//! derivation non-reproducible.

use fixed::types::{I32F32, I64F64};

use crate::time::DurationMs;

/// Fixed-point number type for configured rates and growth factors.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
pub type Fixed = I32F32;

/// Wide fixed-point type for accumulation over long intervals.
///
/// Income is integrated over gaps that can span months of wall time;
/// the intermediate products exceed the range of [`Fixed`], so all
/// accumulation happens in this 128-bit type.
pub type Wide = I64F64;

/// Income earned at `rate` (units per second) over `duration`.
///
/// The result is exact in fixed-point; callers floor once at the end of a
/// full integration rather than per sub-interval.
#[must_use]
pub fn accrue(rate: Fixed, duration: DurationMs) -> Wide {
    Wide::from_num(rate) * (Wide::from_num(duration.as_millis()) / 1000)
}

/// Serde support for fixed-point numbers.
///
/// Serializes fixed-point numbers as their raw bit representation (i64)
/// to preserve exact precision across serialization boundaries.
pub mod fixed_serde {
    use super::Fixed;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a fixed-point number as its raw bit representation.
    pub fn serialize<S>(value: &Fixed, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_bits().serialize(serializer)
    }

    /// Deserialize a fixed-point number from its raw bit representation.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fixed, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = i64::deserialize(deserializer)?;
        Ok(Fixed::from_bits(bits))
    }
}
