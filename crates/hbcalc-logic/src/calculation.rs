//! Calculation entry point: request in, report or failure out.
//!
//! Stages run in a fixed order and each one is a pure function:
//!
//! 1. validate the request and resolve defaults
//! 2. Room Cavity Index and mounting height ([`crate::geometry`])
//! 3. utilization factor ([`crate::uf_table`])
//! 4. lumen-method fixture count ([`crate::lumen`])
//! 5. even/odd array search ([`crate::layout`])
//! 6. report assembly ([`crate::report`])
//!
//! The first failing stage ends the calculation. [`calculate`] folds that
//! error into [`CalculationResult::Failure`]; [`try_calculate`] returns it
//! as a `Result` for callers that prefer `?`. An empty layout search is a
//! successful result with both layout slots empty.
//!
//! ```
//! use hbcalc_logic::calculation::{calculate, CalculationRequest, CalculationResult};
//! use hbcalc_logic::config::CalcConfig;
//! use hbcalc_logic::uf_table::UfTable;
//!
//! let table = UfTable::from_rows(&[
//!     vec!["K", "Rc0_Rw0_Rf0"],
//!     vec!["1.5", "0.65"],
//!     vec!["2.0", "0.73"],
//! ])
//! .unwrap();
//! let mut request = CalculationRequest::new(20.0, 15.0, 7.5, 19_000.0, 150.0, 1.25, table);
//! request.required_illuminance = Some(300.0);
//!
//! match calculate(&request, &CalcConfig::default()) {
//!     CalculationResult::Success(report) => assert_eq!(report.scalars.num_fixtures, 9),
//!     CalculationResult::Failure { message, .. } => panic!("{message}"),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::CalcConfig;
use crate::constants::{bounds, defaults, labels};
use crate::error::{CalcError, ErrorKind};
use crate::geometry::RoomGeometry;
use crate::layout::{find_valid_arrays, LayoutPair, LayoutParams};
use crate::lumen::{adjusted_light_level, number_of_fixtures, FixtureSpec};
use crate::report::{self, ReportRow};
use crate::uf_table::{interpolate_uf, SurfaceReflectances, UfTable};
use crate::validation::{check_positive, check_value, value_or_default};

/// One calculation request. Optional fields fall back to [`defaults`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub room_length: f64,
    pub room_width: f64,
    pub room_height: f64,
    pub working_plane_height: Option<f64>,
    pub suspension_distance: Option<f64>,
    pub ceiling_reflectance: Option<f64>,
    pub walls_reflectance: Option<f64>,
    pub floor_reflectance: Option<f64>,
    /// Target illuminance in lux.
    pub required_illuminance: Option<f64>,
    pub maintenance_factor: Option<f64>,
    pub luminous_flux: f64,
    pub wattage: f64,
    pub shr_nom: f64,
    /// Overrides `shr_nom × shr_factor` when set.
    pub shr_nom_modified: Option<f64>,
    pub fixture_name: Option<String>,
    pub uf_table: UfTable,
}

impl CalculationRequest {
    /// Request with every optional field left at its default.
    pub fn new(
        room_length: f64,
        room_width: f64,
        room_height: f64,
        luminous_flux: f64,
        wattage: f64,
        shr_nom: f64,
        uf_table: UfTable,
    ) -> Self {
        Self {
            room_length,
            room_width,
            room_height,
            working_plane_height: None,
            suspension_distance: None,
            ceiling_reflectance: None,
            walls_reflectance: None,
            floor_reflectance: None,
            required_illuminance: None,
            maintenance_factor: None,
            luminous_flux,
            wattage,
            shr_nom,
            shr_nom_modified: None,
            fixture_name: None,
            uf_table,
        }
    }

    /// Request for a loaded fixture in a room of the given size.
    pub fn for_fixture(fixture: &FixtureSpec, length: f64, width: f64, height: f64) -> Self {
        Self {
            fixture_name: Some(fixture.name.clone()),
            ..Self::new(
                length,
                width,
                height,
                fixture.luminous_flux,
                fixture.wattage,
                fixture.shr_nominal,
                fixture.uf_table.clone(),
            )
        }
    }

    /// Check every field and resolve defaults.
    pub fn validate(&self, config: &CalcConfig) -> Result<ValidatedInputs, CalcError> {
        let min_dim = Some(bounds::MIN_DIMENSION);
        let reflectance = |value: Option<f64>, field: &str| {
            value_or_default(
                value,
                defaults::REFLECTANCE,
                field,
                Some(bounds::MIN_REFLECTANCE),
                Some(bounds::MAX_REFLECTANCE),
            )
        };

        let room = RoomGeometry {
            length: check_value(self.room_length, labels::ROOM_LENGTH, min_dim, None)?,
            width: check_value(self.room_width, labels::ROOM_WIDTH, min_dim, None)?,
            height: check_value(self.room_height, labels::ROOM_HEIGHT, min_dim, None)?,
            working_plane_height: value_or_default(
                self.working_plane_height,
                defaults::WORKING_PLANE_HEIGHT,
                labels::WORKING_PLANE_HEIGHT,
                min_dim,
                None,
            )?,
            suspension_distance: value_or_default(
                self.suspension_distance,
                defaults::SUSPENSION_DISTANCE,
                labels::SUSPENSION_DISTANCE,
                Some(bounds::MIN_SUSPENSION),
                None,
            )?,
        };
        let reflectances = SurfaceReflectances {
            ceiling: reflectance(self.ceiling_reflectance, labels::CEILING_REFLECTANCE)?,
            walls: reflectance(self.walls_reflectance, labels::WALLS_REFLECTANCE)?,
            floor: reflectance(self.floor_reflectance, labels::FLOOR_REFLECTANCE)?,
        };
        let required_illuminance = check_positive(
            self.required_illuminance
                .unwrap_or(defaults::REQUIRED_ILLUMINANCE),
            labels::REQUIRED_LUX,
        )?;
        let maintenance_factor = value_or_default(
            self.maintenance_factor,
            defaults::MAINTENANCE_FACTOR,
            labels::MAINTENANCE_FACTOR,
            Some(bounds::MIN_MAINTENANCE_FACTOR),
            Some(bounds::MAX_MAINTENANCE_FACTOR),
        )?;

        let shr_modified = self
            .shr_nom_modified
            .unwrap_or_else(|| config.modified_shr(self.shr_nom));
        for (field, value) in [
            ("luminous flux", self.luminous_flux),
            ("wattage", self.wattage),
            ("nominal SHR", self.shr_nom),
            ("modified SHR", shr_modified),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::InvalidFixtureParameters(format!(
                    "{field} must be a positive number, got {value}"
                )));
            }
        }

        Ok(ValidatedInputs {
            room,
            reflectances,
            required_illuminance,
            maintenance_factor,
            fixture_name: self
                .fixture_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| defaults::FIXTURE_NAME.to_string()),
            luminous_flux: self.luminous_flux,
            wattage: self.wattage,
            shr_nominal: self.shr_nom,
            shr_modified,
        })
    }
}

/// A request after validation, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedInputs {
    pub room: RoomGeometry,
    pub reflectances: SurfaceReflectances,
    pub required_illuminance: f64,
    pub maintenance_factor: f64,
    pub fixture_name: String,
    pub luminous_flux: f64,
    pub wattage: f64,
    pub shr_nominal: f64,
    pub shr_modified: f64,
}

/// Computed scalar quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scalars {
    /// Room Cavity Index (K).
    pub room_cavity_index: f64,
    pub utilisation_factor: f64,
    pub num_fixtures: u32,
    pub mounting_height: f64,
    pub aspect_ratio: f64,
}

/// Everything a successful calculation produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    pub inputs: ValidatedInputs,
    pub scalars: Scalars,
    pub layouts: LayoutPair,
    pub report_rows: Vec<ReportRow>,
}

impl CalculationReport {
    /// Report rows as `label: value` lines.
    pub fn to_text(&self) -> String {
        report::rows_to_text(&self.report_rows)
    }

    /// Illuminance delivered by the even layout, if there is one.
    pub fn even_lux(&self) -> Option<f64> {
        self.layout_lux(self.layouts.even.as_ref().map(|c| c.fixture_count))
    }

    pub fn odd_lux(&self) -> Option<f64> {
        self.layout_lux(self.layouts.odd.as_ref().map(|c| c.fixture_count))
    }

    fn layout_lux(&self, actual: Option<u32>) -> Option<f64> {
        actual.map(|n| {
            adjusted_light_level(
                self.inputs.required_illuminance,
                self.scalars.num_fixtures,
                n,
            )
        })
    }
}

/// Outcome of [`calculate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculationResult {
    Success(CalculationReport),
    Failure { kind: ErrorKind, message: String },
}

impl CalculationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CalculationResult::Success(_))
    }

    pub fn report(&self) -> Option<&CalculationReport> {
        match self {
            CalculationResult::Success(report) => Some(report),
            CalculationResult::Failure { .. } => None,
        }
    }
}

impl From<Result<CalculationReport, CalcError>> for CalculationResult {
    fn from(result: Result<CalculationReport, CalcError>) -> Self {
        match result {
            Ok(report) => CalculationResult::Success(report),
            Err(e) => CalculationResult::Failure {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

/// Run every stage, stopping at the first error.
pub fn try_calculate(
    request: &CalculationRequest,
    config: &CalcConfig,
) -> Result<CalculationReport, CalcError> {
    let inputs = request.validate(config)?;

    let k = inputs.room.room_cavity_index()?;
    let uf = interpolate_uf(k, &inputs.reflectances, &request.uf_table, config)?;
    let num_fixtures = number_of_fixtures(
        inputs.required_illuminance,
        inputs.room.floor_area(),
        inputs.luminous_flux,
        uf,
        inputs.maintenance_factor,
    )?;
    log::debug!("K={k:.3} Uf={uf:.3} fixtures={num_fixtures}");

    let scalars = Scalars {
        room_cavity_index: k,
        utilisation_factor: uf,
        num_fixtures,
        mounting_height: inputs.room.mounting_height(),
        aspect_ratio: inputs.room.aspect_ratio(),
    };
    let layouts = find_valid_arrays(
        &LayoutParams {
            num_fixtures,
            aspect_ratio: scalars.aspect_ratio,
            room_length: inputs.room.length,
            room_width: inputs.room.width,
            mounting_height: scalars.mounting_height,
            shr_max: inputs.shr_modified,
        },
        config,
    );

    let report_rows = report::report_rows(&inputs, &scalars, &layouts, config);
    Ok(CalculationReport {
        inputs,
        scalars,
        layouts,
        report_rows,
    })
}

/// Run a calculation and fold any error into [`CalculationResult::Failure`].
pub fn calculate(request: &CalculationRequest, config: &CalcConfig) -> CalculationResult {
    let result = try_calculate(request, config);
    match &result {
        Ok(report) => log::info!(
            "Calculation completed: {} fixtures, even={}, odd={}",
            report.scalars.num_fixtures,
            report.layouts.even.is_some(),
            report.layouts.odd.is_some()
        ),
        Err(e) => log::error!("Error during calculation: {e}"),
    }
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> UfTable {
        UfTable::from_rows(&[
            vec!["K", "Rc50_Rw30_Rf10", "Rc0_Rw0_Rf0"],
            vec!["0.6", "0.40", "0.33"],
            vec!["1.5", "0.70", "0.65"],
            vec!["2.0", "0.78", "0.73"],
            vec!["5.0", "0.95", "0.88"],
        ])
        .unwrap()
    }

    fn request() -> CalculationRequest {
        CalculationRequest::new(20.0, 15.0, 7.5, 19_000.0, 150.0, 1.25, table())
    }

    #[test]
    fn test_defaults_resolved() {
        let inputs = request().validate(&CalcConfig::default()).unwrap();
        assert_eq!(inputs.room.working_plane_height, 3.0);
        assert_eq!(inputs.room.suspension_distance, 0.0);
        assert_eq!(inputs.reflectances, SurfaceReflectances::default());
        assert_eq!(inputs.required_illuminance, 3.0);
        assert_eq!(inputs.maintenance_factor, 0.8);
        assert!((inputs.shr_modified - 1.875).abs() < 1e-12);
        assert_eq!(inputs.fixture_name, "Unnamed fixture");
    }

    #[test]
    fn test_explicit_modified_shr_wins() {
        let mut req = request();
        req.shr_nom_modified = Some(2.0);
        let inputs = req.validate(&CalcConfig::default()).unwrap();
        assert_eq!(inputs.shr_modified, 2.0);
    }

    #[test]
    fn test_validation_errors() {
        let mut req = request();
        req.room_width = 0.0;
        let err = req.validate(&CalcConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("Room Width"));

        let mut req = request();
        req.walls_reflectance = Some(120.0);
        let err = req.validate(&CalcConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Walls Reflectance"));

        let mut req = request();
        req.required_illuminance = Some(0.0);
        assert_eq!(
            req.validate(&CalcConfig::default()).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );

        let mut req = request();
        req.wattage = 0.0;
        assert_eq!(
            req.validate(&CalcConfig::default()).unwrap_err().kind(),
            ErrorKind::InvalidFixtureParameters
        );
    }

    #[test]
    fn test_scenario_a() {
        let mut req = request();
        req.required_illuminance = Some(300.0);
        let report = try_calculate(&req, &CalcConfig::default()).unwrap();
        let s = report.scalars;
        assert!((s.mounting_height - 4.5).abs() < 1e-12);
        assert!((s.room_cavity_index - 1.905).abs() < 0.001);
        assert!((s.utilisation_factor - 0.715).abs() < 0.002);
        let exact = (300.0 * 300.0) / (19_000.0 * s.utilisation_factor * 0.8);
        assert_eq!(s.num_fixtures, exact.ceil() as u32);
        assert!(!report.layouts.is_empty());
    }

    #[test]
    fn test_failure_carries_kind_and_message() {
        let mut req = request();
        req.room_height = 3.0;
        match calculate(&req, &CalcConfig::default()) {
            CalculationResult::Failure { kind, message } => {
                assert_eq!(kind, ErrorKind::InvalidGeometry);
                assert!(message.contains("mounting height"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_layout_lux() {
        let mut req = request();
        req.required_illuminance = Some(300.0);
        let report = try_calculate(&req, &CalcConfig::default()).unwrap();
        let n = report.scalars.num_fixtures as f64;
        if let Some(even) = &report.layouts.even {
            let lux = report.even_lux().unwrap();
            assert!((lux - 300.0 * even.fixture_count as f64 / n).abs() < 1e-9);
            assert!(lux >= 300.0);
        }
        if let Some(odd) = &report.layouts.odd {
            assert!(report.odd_lux().unwrap() >= 300.0 - 1e-9);
            assert!(odd.fixture_count >= report.scalars.num_fixtures);
        }
    }

    #[test]
    fn test_result_json_is_tagged() {
        let result = calculate(&request(), &CalcConfig::default());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json["scalars"]["num_fixtures"].as_u64().unwrap() >= 1);

        let back: CalculationResult = serde_json::from_value(json).unwrap();
        assert!(back.is_success());

        let failure: CalculationResult =
            Err::<CalculationReport, _>(CalcError::MalformedTable("empty".into())).into();
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["kind"], "MalformedTable");
    }
}
