//! Lumen-method fixture count and the fixture data it needs.
//!
//! `N = ceil(E·A / (Φ·Uf·MF))`. The count always rounds up: a fractional
//! fixture cannot be installed and rounding down would under-light the room.

use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::uf_table::UfTable;

/// Manufacturer data for one high-bay fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureSpec {
    pub name: String,
    /// Rated output in lumens.
    pub luminous_flux: f64,
    pub wattage: f64,
    /// Manufacturer's nominal spacing-to-height ratio.
    pub shr_nominal: f64,
    pub uf_table: UfTable,
}

impl FixtureSpec {
    /// Reject non-positive or non-finite photometric constants.
    pub fn validate(&self) -> Result<(), CalcError> {
        for (field, value) in [
            ("luminous flux", self.luminous_flux),
            ("wattage", self.wattage),
            ("nominal SHR", self.shr_nominal),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::InvalidFixtureParameters(format!(
                    "{field} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Luminous efficacy in lumens per watt.
    pub fn efficacy(&self) -> f64 {
        self.luminous_flux / self.wattage
    }
}

/// Number of fixtures needed to reach `illuminance` lux over `area` m².
pub fn number_of_fixtures(
    illuminance: f64,
    area: f64,
    luminous_flux: f64,
    uf: f64,
    maintenance_factor: f64,
) -> Result<u32, CalcError> {
    if !(luminous_flux > 0.0 && uf > 0.0 && maintenance_factor > 0.0) {
        return Err(CalcError::InvalidFixtureParameters(format!(
            "luminous flux ({luminous_flux}), utilisation factor ({uf}) and maintenance \
             factor ({maintenance_factor}) must all be greater than 0"
        )));
    }
    let exact = (illuminance * area) / (luminous_flux * uf * maintenance_factor);
    if !exact.is_finite() || exact > u32::MAX as f64 {
        return Err(CalcError::InvalidFixtureParameters(format!(
            "fixture count {exact} is not representable"
        )));
    }
    Ok(exact.ceil() as u32)
}

/// Illuminance delivered when `actual` fixtures are installed instead of `required`.
pub fn adjusted_light_level(illuminance: f64, required: u32, actual: u32) -> f64 {
    if required == 0 {
        return illuminance;
    }
    illuminance * (actual as f64 / required as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn table() -> UfTable {
        UfTable::from_rows(&[
            vec!["K", "Rc0_Rw0_Rf0"],
            vec!["1", "0.5"],
            vec!["2", "0.7"],
        ])
        .unwrap()
    }

    #[test]
    fn test_count_matches_formula() {
        let n = number_of_fixtures(300.0, 300.0, 19_000.0, 0.715, 0.8).unwrap();
        let exact: f64 = (300.0 * 300.0) / (19_000.0 * 0.715 * 0.8);
        assert_eq!(n, exact.ceil() as u32);
        assert_eq!(n, 9);
    }

    #[test]
    fn test_count_rounds_up() {
        // exactly 2.0 stays 2, anything above goes to 3
        let count = |e: f64| number_of_fixtures(e, 100.0, 10_000.0, 0.5, 1.0).unwrap();
        assert_eq!(count(100.0), 2);
        assert_eq!(count(100.1), 3);
        // tiny demand still needs one fixture
        assert_eq!(number_of_fixtures(3.0, 300.0, 19_000.0, 0.7, 0.8), Ok(1));
    }

    #[test]
    fn test_non_positive_parameters_rejected() {
        let cases = [
            (0.0, 0.7, 0.8),
            (19_000.0, 0.0, 0.8),
            (19_000.0, 0.7, 0.0),
        ];
        for (flux, uf, mf) in cases {
            let err = number_of_fixtures(300.0, 300.0, flux, uf, mf).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFixtureParameters);
        }
        assert!(number_of_fixtures(300.0, 300.0, f64::NAN, 0.7, 0.8).is_err());
    }

    #[test]
    fn test_adjusted_light_level() {
        assert!((adjusted_light_level(300.0, 9, 12) - 400.0).abs() < 1e-9);
        assert_eq!(adjusted_light_level(300.0, 9, 9), 300.0);
        assert_eq!(adjusted_light_level(300.0, 0, 4), 300.0);
    }

    #[test]
    fn test_fixture_validation() {
        let fixture = FixtureSpec {
            name: "HB150".into(),
            luminous_flux: 19_000.0,
            wattage: 150.0,
            shr_nominal: 1.25,
            uf_table: table(),
        };
        assert!(fixture.validate().is_ok());
        assert!((fixture.efficacy() - 126.666).abs() < 0.001);

        let dark = FixtureSpec {
            wattage: -1.0,
            ..fixture
        };
        let err = dark.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFixtureParameters);
        assert!(err.to_string().contains("wattage"));
    }
}
