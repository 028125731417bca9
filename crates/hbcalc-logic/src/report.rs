//! Report rows: the human-readable echo of a calculation.

use serde::{Deserialize, Serialize};

use crate::calculation::{Scalars, ValidatedInputs};
use crate::config::CalcConfig;
use crate::constants::labels;
use crate::layout::{LayoutCandidate, LayoutPair};
use crate::lumen::adjusted_light_level;

/// Shown in place of a layout when a parity family has no valid grid.
pub const NO_VALID_ARRAY: &str = "No valid array found (spacing or SHR constraints not met)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

impl ReportRow {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// One-line description of a layout, or [`NO_VALID_ARRAY`].
pub fn format_array(
    candidate: Option<&LayoutCandidate>,
    illuminance: f64,
    num_fixtures: u32,
    min_spacing: f64,
) -> String {
    let Some(c) = candidate else {
        return NO_VALID_ARRAY.to_string();
    };
    let issues = c.spacing_issues(min_spacing);
    let note = if issues.is_empty() {
        " | Spacing OK".to_string()
    } else {
        format!(" | Spacing issues: {}", issues.join(", "))
    };
    let lux = adjusted_light_level(illuminance, num_fixtures, c.fixture_count);
    format!(
        "{} along length, {} across width | Spacing: {:.2}m (L), {:.2}m (W){} | \
         SHR: {:.2} (L), {:.2} (W) | Fixtures: {}, Lux: {:.0}",
        c.along_length,
        c.across_width,
        c.spacing_length,
        c.spacing_width,
        note,
        c.shr_length,
        c.shr_width,
        c.fixture_count,
        lux
    )
}

/// Every input, derived scalar and layout, in display order.
pub fn report_rows(
    inputs: &ValidatedInputs,
    scalars: &Scalars,
    layouts: &LayoutPair,
    config: &CalcConfig,
) -> Vec<ReportRow> {
    let room = &inputs.room;
    let e = inputs.required_illuminance;
    let array =
        |c: Option<&LayoutCandidate>| format_array(c, e, scalars.num_fixtures, config.min_spacing);

    vec![
        ReportRow::new(labels::FIXTURE_NAME, inputs.fixture_name.as_str()),
        ReportRow::new(
            labels::LUMINOUS_FLUX,
            format!("{:.0} lumens", inputs.luminous_flux),
        ),
        ReportRow::new(labels::WATTAGE, format!("{:.0} W", inputs.wattage)),
        ReportRow::new(labels::SHR_NOMINAL, format!("{:.2}", inputs.shr_nominal)),
        ReportRow::new(labels::SHR_MODIFIED, format!("{:.2}", inputs.shr_modified)),
        ReportRow::new(labels::MIN_SPACING, format!("{:.1} m", config.min_spacing)),
        ReportRow::new(labels::ROOM_LENGTH, format!("{:.1} m", room.length)),
        ReportRow::new(labels::ROOM_WIDTH, format!("{:.1} m", room.width)),
        ReportRow::new(labels::ROOM_HEIGHT, format!("{:.1} m", room.height)),
        ReportRow::new(
            labels::WORKING_PLANE_HEIGHT,
            format!("{:.1} m", room.working_plane_height),
        ),
        ReportRow::new(
            labels::SUSPENSION_DISTANCE,
            format!("{:.1} m", room.suspension_distance),
        ),
        ReportRow::new(
            labels::MOUNTING_HEIGHT,
            format!("{:.1} m", scalars.mounting_height),
        ),
        ReportRow::new(
            labels::CEILING_REFLECTANCE,
            format!("{:.0} %", inputs.reflectances.ceiling),
        ),
        ReportRow::new(
            labels::WALLS_REFLECTANCE,
            format!("{:.0} %", inputs.reflectances.walls),
        ),
        ReportRow::new(
            labels::FLOOR_REFLECTANCE,
            format!("{:.0} %", inputs.reflectances.floor),
        ),
        ReportRow::new(labels::REQUIRED_LUX, format!("{e:.0} lux")),
        ReportRow::new(
            labels::MAINTENANCE_FACTOR,
            format!("{:.2}", inputs.maintenance_factor),
        ),
        ReportRow::new(
            labels::ROOM_CAVITY_INDEX,
            format!("{:.2}", scalars.room_cavity_index),
        ),
        ReportRow::new(
            labels::UTILISATION_FACTOR,
            format!("{:.2}", scalars.utilisation_factor),
        ),
        ReportRow::new(labels::NUM_FIXTURES, scalars.num_fixtures.to_string()),
        ReportRow::new(labels::EVEN_ARRAY, array(layouts.even.as_ref())),
        ReportRow::new(labels::ODD_ARRAY, array(layouts.odd.as_ref())),
    ]
}

/// Rows joined as `label: value` lines.
pub fn rows_to_text(rows: &[ReportRow]) -> String {
    rows.iter()
        .map(|r| format!("{}: {}", r.label, r.value))
        .collect::<Vec<_>>()
        .join("\n")
}
