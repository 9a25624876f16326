//! Game-balance data validation.
//!
//! Beyond the structural checks in [`GameConfig::validate`], this samples
//! each curve over a range of levels and verifies the economy invariants
//! hold numerically: upgrade costs strictly increase, income and durations
//! never decrease. Catches growth factors that round away to nothing.

use std::path::Path;

use armada_core::curves::EconomyCurves;
use armada_core::data::GameConfig;
use armada_core::error::{EconomyError, Result};
use armada_core::state::ProductionTier;

/// Levels sampled per curve.
const SAMPLE_LEVELS: u32 = 32;

/// Load a RON config file and run the full validation suite.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails any
/// validation check.
pub fn validate_config_file(path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| EconomyError::InvalidConfig(format!("{}: {err}", path.display())))?;
    let config = GameConfig::from_ron_str(&text)?;
    validate_config(&config)
}

/// Run structural validation plus sampled curve checks.
///
/// # Errors
///
/// Returns an error if any invariant fails.
pub fn validate_config(config: &GameConfig) -> Result<()> {
    config.validate()?;

    let curves = EconomyCurves::new(config);
    for tier in ProductionTier::ALL {
        let lane = &config.production(tier).name;
        for level in 0..SAMPLE_LEVELS {
            let cost = curves.upgrade_cost(tier, level);
            let next_cost = curves.upgrade_cost(tier, level + 1);
            if !(next_cost.covers(&cost) && next_cost != cost) {
                return Err(EconomyError::InvalidConfig(format!(
                    "{lane}: upgrade cost not strictly increasing at level {level}"
                )));
            }

            if curves.income_rate(tier, level + 1) < curves.income_rate(tier, level) {
                return Err(EconomyError::InvalidConfig(format!(
                    "{lane}: income rate decreases at level {level}"
                )));
            }

            if curves.upgrade_duration(tier, level + 1) < curves.upgrade_duration(tier, level) {
                return Err(EconomyError::InvalidConfig(format!(
                    "{lane}: upgrade duration decreases at level {level}"
                )));
            }
        }
        tracing::info!(%lane, "curves validated");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use armada_core::math::Fixed;
    use armada_test_utils::fixtures::balance_config;

    #[test]
    fn test_fixture_config_passes() {
        validate_config(&balance_config()).unwrap();
    }

    #[test]
    fn test_shipped_sample_config_passes() {
        let path = Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../assets/data/game_config.ron"
        ));
        validate_config_file(path).unwrap();
    }

    #[test]
    fn test_rejects_degenerate_growth() {
        let mut config = balance_config();
        // Barely above 1: rounding flattens the cost curve for small bases.
        config.production.tier1.base_upgrade_cost.tier1 = 1;
        config.production.tier1.cost_growth = Fixed::from_bits((1i64 << 32) + 1);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(validate_config_file(Path::new("/nonexistent/config.ron")).is_err());
    }
}
