//! Calculation constants: installation limits, request defaults, field bounds.
//!
//! Plain `f64` constants with no runtime state. [`crate::config::CalcConfig`]
//! takes its defaults from here, so a deployment overrides them through
//! configuration instead of editing these values.

/// Minimum clear distance between neighbouring fixtures, in meters.
pub const MIN_SPACING: f64 = 3.0;

/// Multiplier applied to the manufacturer's nominal SHR before layout search.
/// Tuned empirically against a third-party reference tool.
pub const SHR_FACTOR: f64 = 1.5;

/// Two K values closer than this are treated as the same table row.
pub const K_MATCH_TOLERANCE: f64 = 0.001;

/// Keeps inverse-distance weights finite when a reflectance column matches exactly.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Layout search is skipped above this many fixtures.
pub const MAX_LAYOUT_FIXTURES: u32 = 5_000;

/// Highest `max_layout_fixtures` a configuration may set. The search visits
/// (N+3)² grids, so this keeps one request bounded.
pub const LAYOUT_FIXTURES_CEILING: u32 = 10_000;

/// Extra rows/columns searched beyond the required fixture count.
pub const SEARCH_MARGIN: u32 = 3;

pub mod defaults {
    pub const WORKING_PLANE_HEIGHT: f64 = 3.0;
    pub const SUSPENSION_DISTANCE: f64 = 0.0;
    pub const REFLECTANCE: f64 = 0.0;
    pub const REQUIRED_ILLUMINANCE: f64 = 3.0;
    pub const MAINTENANCE_FACTOR: f64 = 0.8;
    pub const FIXTURE_NAME: &str = "Unnamed fixture";
}

/// Lower/upper bounds applied to request fields.
pub mod bounds {
    pub const MIN_DIMENSION: f64 = 0.1;
    pub const MIN_SUSPENSION: f64 = 0.0;
    pub const MIN_REFLECTANCE: f64 = 0.0;
    pub const MAX_REFLECTANCE: f64 = 100.0;
    pub const MIN_MAINTENANCE_FACTOR: f64 = 0.0;
    pub const MAX_MAINTENANCE_FACTOR: f64 = 1.0;
}

/// Report row labels, in report order.
pub mod labels {
    pub const FIXTURE_NAME: &str = "Fixture Name";
    pub const LUMINOUS_FLUX: &str = "Luminous Flux";
    pub const WATTAGE: &str = "Wattage";
    pub const SHR_NOMINAL: &str = "SHRNOM (CSV)";
    pub const SHR_MODIFIED: &str = "SHRNOM (Modified)";
    pub const MIN_SPACING: &str = "Minimum Spacing";
    pub const ROOM_LENGTH: &str = "Room Length";
    pub const ROOM_WIDTH: &str = "Room Width";
    pub const ROOM_HEIGHT: &str = "Room Height";
    pub const WORKING_PLANE_HEIGHT: &str = "Working Plane Height";
    pub const SUSPENSION_DISTANCE: &str = "Suspension Distance";
    pub const MOUNTING_HEIGHT: &str = "Mounting Height";
    pub const CEILING_REFLECTANCE: &str = "Ceiling Reflectance";
    pub const WALLS_REFLECTANCE: &str = "Walls Reflectance";
    pub const FLOOR_REFLECTANCE: &str = "Floor Reflectance";
    pub const REQUIRED_LUX: &str = "Required Lux Level";
    pub const MAINTENANCE_FACTOR: &str = "Maintenance Factor";
    pub const ROOM_CAVITY_INDEX: &str = "Room Cavity Index (K)";
    pub const UTILISATION_FACTOR: &str = "Utilisation Factor (Uf)";
    pub const NUM_FIXTURES: &str = "Number of Fixtures";
    pub const EVEN_ARRAY: &str = "Valid Array (Even)";
    pub const ODD_ARRAY: &str = "Valid Array (Odd)";
}
