//! Engine configuration: installation limits and search bounds.
//!
//! Every calculation receives a `CalcConfig` by reference instead of reading
//! globals, so tests and deployments can run side by side with different
//! limits. Missing fields in a serialized config fall back to the defaults
//! in [`crate::constants`].
//!
//! ```
//! use hbcalc_logic::config::CalcConfig;
//!
//! let config = CalcConfig {
//!     min_spacing: 4.0,
//!     ..CalcConfig::default()
//! };
//! assert_eq!(config.modified_shr(1.0), 1.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{CalcError, Violation};
use crate::validation::{check_positive, check_value};

/// Tunable limits for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Minimum spacing between neighbouring fixtures (meters).
    pub min_spacing: f64,
    /// Multiplier turning the nominal SHR into the search ceiling.
    pub shr_factor: f64,
    /// K values within this distance of a table row use that row directly.
    pub k_match_tolerance: f64,
    /// Fixture counts above this skip the layout search entirely.
    pub max_layout_fixtures: u32,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            min_spacing: constants::MIN_SPACING,
            shr_factor: constants::SHR_FACTOR,
            k_match_tolerance: constants::K_MATCH_TOLERANCE,
            max_layout_fixtures: constants::MAX_LAYOUT_FIXTURES,
        }
    }
}

impl CalcConfig {
    /// SHR ceiling derived from a manufacturer's nominal SHR.
    pub fn modified_shr(&self, shr_nominal: f64) -> f64 {
        shr_nominal * self.shr_factor
    }

    /// Reject limits that would disable a check or unbound the search.
    pub fn validate(&self) -> Result<(), CalcError> {
        check_value(self.min_spacing, "min_spacing", Some(0.0), None)?;
        check_positive(self.shr_factor, "shr_factor")?;
        check_value(self.k_match_tolerance, "k_match_tolerance", Some(0.0), None)?;
        if self.max_layout_fixtures > constants::LAYOUT_FIXTURES_CEILING {
            return Err(CalcError::invalid_input(
                "max_layout_fixtures",
                Violation::AboveMaximum(constants::LAYOUT_FIXTURES_CEILING as f64),
            ));
        }
        Ok(())
    }
}
