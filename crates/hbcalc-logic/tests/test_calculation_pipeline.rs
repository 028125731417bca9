//! Integration tests for the full calculation pipeline.
//!
//! Exercises: CalculationRequest → validation → K → Uf → fixture count
//! → array search → report, against the sample fixture in `data/`.

use hbcalc_logic::calculation::{calculate, try_calculate, CalculationRequest, CalculationResult};
use hbcalc_logic::config::CalcConfig;
use hbcalc_logic::error::ErrorKind;
use hbcalc_logic::layout::{shr, spacing, LayoutCandidate, Parity};
use hbcalc_logic::report::NO_VALID_ARRAY;
use hbcalc_logic::uf_table::UfTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLE_CSV: &str = include_str!("../../../data/sample_highbay.csv");

// ── Helpers ────────────────────────────────────────────────────────────

/// The Uf table part of the sample file (everything after the metadata block).
fn sample_table() -> UfTable {
    let rows: Vec<Vec<&str>> = SAMPLE_CSV
        .lines()
        .skip(7)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.split(',').map(str::trim).collect())
        .collect();
    UfTable::from_rows(&rows).unwrap()
}

fn warehouse() -> CalculationRequest {
    let mut req = CalculationRequest::new(20.0, 15.0, 7.5, 19_000.0, 150.0, 1.25, sample_table());
    req.working_plane_height = Some(3.0);
    req.suspension_distance = Some(0.0);
    req.ceiling_reflectance = Some(0.0);
    req.walls_reflectance = Some(0.0);
    req.floor_reflectance = Some(0.0);
    req.required_illuminance = Some(300.0);
    req.fixture_name = Some("HB150 LED High Bay 150W".into());
    req
}

fn failure_kind(result: CalculationResult) -> ErrorKind {
    match result {
        CalculationResult::Failure { kind, .. } => kind,
        CalculationResult::Success(_) => panic!("expected a failure"),
    }
}

fn assert_candidate_invariants(
    c: &LayoutCandidate,
    req: &CalculationRequest,
    n: u32,
    shr_max: f64,
) {
    assert!(c.fixture_count >= n, "{c:?} holds fewer than {n}");
    assert_eq!(c.fixture_count, c.along_length * c.across_width);
    assert!(c.shr_length <= shr_max && c.shr_width <= shr_max);

    let mh = req.room_height
        - req.working_plane_height.unwrap_or(3.0)
        - req.suspension_distance.unwrap_or(0.0);
    let sl = spacing(req.room_length, c.along_length);
    let sw = spacing(req.room_width, c.across_width);
    assert_eq!(c.spacing_length, sl);
    assert_eq!(c.spacing_width, sw);
    assert_eq!(c.shr_length, shr(sl, mh));
    assert_eq!(c.shr_width, shr(sw, mh));
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn scenario_a_warehouse() {
    let report = try_calculate(&warehouse(), &CalcConfig::default()).unwrap();
    let s = report.scalars;

    assert!((s.mounting_height - 4.5).abs() < 1e-12);
    assert!((s.room_cavity_index - 300.0 / (4.5 * 35.0)).abs() < 1e-12);
    assert!((s.utilisation_factor - 0.715).abs() < 0.002);
    assert_eq!(s.num_fixtures, 9);

    let odd = report.layouts.odd.as_ref().unwrap();
    assert_eq!((odd.along_length, odd.across_width), (3, 3));
    let even = report.layouts.even.as_ref().unwrap();
    assert_eq!((even.along_length, even.across_width), (5, 2));

    let text = report.to_text();
    assert!(text.starts_with("Fixture Name: HB150 LED High Bay 150W\n"));
    assert!(text.contains("Room Cavity Index (K): 1.90"));
    assert!(text.contains("Number of Fixtures: 9"));
    assert!(text.contains("Valid Array (Odd): 3 along length, 3 across width"));
}

#[test]
fn scenario_b_no_mounting_height() {
    let mut req = warehouse();
    req.room_height = 3.0;
    assert_eq!(
        failure_kind(calculate(&req, &CalcConfig::default())),
        ErrorKind::InvalidGeometry
    );
}

#[test]
fn scenario_c_index_beyond_table() {
    // 500 × 500 room at 5 m mounting height → K = 50
    let mut req = warehouse();
    req.room_length = 500.0;
    req.room_width = 500.0;
    req.room_height = 8.0;
    assert_eq!(
        failure_kind(calculate(&req, &CalcConfig::default())),
        ErrorKind::OutOfRange
    );
}

#[test]
fn scenario_d_single_fixture() {
    let mut req = warehouse();
    req.room_length = 6.0;
    req.room_width = 6.0;
    req.required_illuminance = Some(3.0);

    let report = try_calculate(&req, &CalcConfig::default()).unwrap();
    assert_eq!(report.scalars.num_fixtures, 1);
    let odd = report.layouts.odd.as_ref().unwrap();
    assert_eq!((odd.along_length, odd.across_width), (1, 1));
    if let Some(even) = &report.layouts.even {
        assert_eq!(even.across_width % 2, 0);
    }
}

#[test]
fn scenario_d_room_narrower_than_min_spacing() {
    // 2.8 × 2.8 m at 2 m mounting height: K = 0.70, one fixture, SHR 1.4
    let mut req = warehouse();
    req.room_length = 2.8;
    req.room_width = 2.8;
    req.room_height = 5.0;
    req.required_illuminance = Some(3.0);

    let report = try_calculate(&req, &CalcConfig::default()).unwrap();
    assert_eq!(report.scalars.num_fixtures, 1);
    let odd = report.layouts.odd.as_ref().unwrap();
    assert_eq!((odd.along_length, odd.across_width), (1, 1));
    assert_eq!(odd.spacing_length, 2.8);
    assert!(report.layouts.even.is_none());
}

#[test]
fn low_ceiling_gives_empty_layouts_not_failure() {
    // 0.6 m mounting height: SHR ceiling allows < 1.2 m spacing, floor needs 3 m.
    let mut req = warehouse();
    req.room_length = 4.0;
    req.room_width = 4.0;
    req.room_height = 3.6;
    req.required_illuminance = Some(300.0);

    let result = calculate(&req, &CalcConfig::default());
    let report = result.report().expect("empty search is still a success");
    assert!(report.layouts.is_empty());
    assert!(report.to_text().contains(NO_VALID_ARRAY));
}

#[test]
fn config_changes_the_search() {
    let strict = CalcConfig {
        min_spacing: 6.0,
        ..CalcConfig::default()
    };
    let report = try_calculate(&warehouse(), &strict).unwrap();
    for c in [&report.layouts.even, &report.layouts.odd].into_iter().flatten() {
        if c.along_length > 1 {
            assert!(c.spacing_length >= 6.0);
        }
        if c.across_width > 1 {
            assert!(c.spacing_width >= 6.0);
        }
    }
    assert!(report.to_text().contains("Minimum Spacing: 6.0 m"));
}

#[test]
fn invalid_input_names_the_field() {
    let mut req = warehouse();
    req.maintenance_factor = Some(1.5);
    match calculate(&req, &CalcConfig::default()) {
        CalculationResult::Failure { kind, message } => {
            assert_eq!(kind, ErrorKind::InvalidInput);
            assert!(message.contains("Maintenance Factor"), "{message}");
        }
        CalculationResult::Success(_) => panic!("MF above 1 must fail"),
    }
}

#[test]
fn deterministic_output() {
    let config = CalcConfig::default();
    assert_eq!(
        calculate(&warehouse(), &config),
        calculate(&warehouse(), &config)
    );
}

// ── Property sweep ─────────────────────────────────────────────────────

#[test]
fn seeded_sweep_holds_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let config = CalcConfig::default();
    let reflectances = [0.0, 10.0, 30.0, 50.0, 70.0];
    let mut successes = 0;

    for _ in 0..150 {
        let mut req = warehouse();
        req.room_length = rng.gen_range(5.0..60.0);
        req.room_width = rng.gen_range(5.0..60.0);
        req.room_height = rng.gen_range(5.0..14.0);
        req.working_plane_height = Some(rng.gen_range(0.5..3.0));
        req.suspension_distance = Some(rng.gen_range(0.0..1.5));
        req.ceiling_reflectance = Some(reflectances[rng.gen_range(0..reflectances.len())]);
        req.walls_reflectance = Some(reflectances[rng.gen_range(0..reflectances.len())]);
        req.floor_reflectance = Some(reflectances[rng.gen_range(0..3)]);
        req.required_illuminance = Some(rng.gen_range(50.0..400.0));

        let report = match try_calculate(&req, &config) {
            Ok(report) => report,
            Err(e) => {
                assert_eq!(e.kind(), ErrorKind::OutOfRange, "unexpected {e}");
                continue;
            }
        };
        successes += 1;

        let s = report.scalars;
        let e = req.required_illuminance.unwrap();
        let area = req.room_length * req.room_width;
        let exact = (e * area) / (19_000.0 * s.utilisation_factor * 0.8);
        assert!(s.num_fixtures >= 1);
        assert_eq!(s.num_fixtures, exact.ceil() as u32);
        assert!(s.utilisation_factor > 0.0 && s.utilisation_factor <= 1.2);

        let shr_max = report.inputs.shr_modified;
        if let Some(even) = &report.layouts.even {
            assert_eq!(even.parity, Parity::Even);
            assert_eq!(even.across_width % 2, 0);
            assert_candidate_invariants(even, &req, s.num_fixtures, shr_max);
        }
        if let Some(odd) = &report.layouts.odd {
            assert_eq!(odd.parity, Parity::Odd);
            assert_eq!(odd.across_width % 2, 1);
            assert_candidate_invariants(odd, &req, s.num_fixtures, shr_max);
        }
    }

    assert!(successes > 50, "only {successes} rooms inside the table");
}
