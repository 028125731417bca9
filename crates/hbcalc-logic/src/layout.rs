//! Fixture array search: rows × columns grids under SHR and spacing limits.
//!
//! Every grid from 1×1 up to (N+3)×(N+3) that holds at least N fixtures is
//! oriented to the room (more positions along the longer side), checked
//! against the SHR ceiling and the minimum-spacing floor, and ranked by how
//! close its fixture count is to N. The best grid with an even number of
//! fixtures across the width and the best with an odd number are returned
//! side by side; installers pick by preference (even counts give symmetric
//! aisles, odd counts centre a row).
//!
//! ```
//! use hbcalc_logic::config::CalcConfig;
//! use hbcalc_logic::layout::{find_valid_arrays, LayoutParams};
//!
//! let params = LayoutParams {
//!     num_fixtures: 9,
//!     aspect_ratio: 20.0 / 15.0,
//!     room_length: 20.0,
//!     room_width: 15.0,
//!     mounting_height: 4.5,
//!     shr_max: 1.875,
//! };
//! let pair = find_valid_arrays(&params, &CalcConfig::default());
//! assert!(pair.even.is_some() || pair.odd.is_some());
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::CalcConfig;
use crate::constants::SEARCH_MARGIN;

/// Whether a grid has an even or odd number of fixtures across the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn of(count: u32) -> Self {
        if count % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

/// One accepted fixture grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutCandidate {
    pub along_length: u32,
    pub across_width: u32,
    /// Meters between fixtures along the room length.
    pub spacing_length: f64,
    pub spacing_width: f64,
    pub shr_length: f64,
    pub shr_width: f64,
    pub fixture_count: u32,
    pub parity: Parity,
}

impl LayoutCandidate {
    /// Build a candidate for a grid, deriving spacing and SHR from the room.
    pub fn new(
        along_length: u32,
        across_width: u32,
        room_length: f64,
        room_width: f64,
        mounting_height: f64,
    ) -> Self {
        let spacing_length = spacing(room_length, along_length);
        let spacing_width = spacing(room_width, across_width);
        Self {
            along_length,
            across_width,
            spacing_length,
            spacing_width,
            shr_length: shr(spacing_length, mounting_height),
            shr_width: shr(spacing_width, mounting_height),
            fixture_count: along_length * across_width,
            parity: Parity::of(across_width),
        }
    }

    /// Distance from the end walls to the first and last fixture along the length.
    pub fn edge_distance_length(&self, room_length: f64) -> f64 {
        edge_distance(room_length, self.along_length, self.spacing_length)
    }

    pub fn edge_distance_width(&self, room_width: f64) -> f64 {
        edge_distance(room_width, self.across_width, self.spacing_width)
    }

    /// Fixture centres as `(x along length, y across width)` in meters from
    /// the room corner, length-major.
    pub fn positions(&self, room_length: f64, room_width: f64) -> Vec<(f64, f64)> {
        let edge_l = self.edge_distance_length(room_length);
        let edge_w = self.edge_distance_width(room_width);
        let mut out = Vec::with_capacity(self.fixture_count as usize);
        for i in 0..self.along_length {
            for j in 0..self.across_width {
                out.push((
                    edge_l + i as f64 * self.spacing_length,
                    edge_w + j as f64 * self.spacing_width,
                ));
            }
        }
        out
    }

    /// Axes whose spacing falls under the minimum, e.g. `["Length spacing < 3m"]`.
    /// An axis holding a single fixture has no spacing to violate.
    pub fn spacing_issues(&self, min_spacing: f64) -> Vec<String> {
        let mut issues = Vec::new();
        if self.along_length > 1 && self.spacing_length < min_spacing {
            issues.push(format!("Length spacing < {min_spacing}m"));
        }
        if self.across_width > 1 && self.spacing_width < min_spacing {
            issues.push(format!("Width spacing < {min_spacing}m"));
        }
        issues
    }

    fn meets_shr(&self, shr_max: f64) -> bool {
        self.shr_length <= shr_max && self.shr_width <= shr_max
    }

    fn meets_spacing(&self, min_spacing: f64) -> bool {
        match (self.along_length, self.across_width) {
            (1, 1) => true,
            (1, _) => self.spacing_width >= min_spacing,
            (_, 1) => self.spacing_length >= min_spacing,
            _ => self.spacing_length >= min_spacing && self.spacing_width >= min_spacing,
        }
    }
}

/// Spacing between fixtures along one dimension. A single fixture spans the
/// whole dimension.
pub fn spacing(room_dim: f64, count: u32) -> f64 {
    if count <= 1 {
        room_dim
    } else {
        room_dim / count as f64
    }
}

/// Spacing-to-height ratio; infinite when the mounting height is not positive.
pub fn shr(spacing: f64, mounting_height: f64) -> f64 {
    if mounting_height <= 0.0 {
        f64::INFINITY
    } else {
        spacing / mounting_height
    }
}

fn edge_distance(room_dim: f64, count: u32, spacing: f64) -> f64 {
    (room_dim - count.saturating_sub(1) as f64 * spacing) / 2.0
}

/// Inputs to the array search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Fixture count from the lumen method.
    pub num_fixtures: u32,
    pub aspect_ratio: f64,
    pub room_length: f64,
    pub room_width: f64,
    pub mounting_height: f64,
    /// SHR ceiling (the modified SHR).
    pub shr_max: f64,
}

/// Best even and odd layouts; either slot may be empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutPair {
    pub even: Option<LayoutCandidate>,
    pub odd: Option<LayoutCandidate>,
}

impl LayoutPair {
    pub fn is_empty(&self) -> bool {
        self.even.is_none() && self.odd.is_none()
    }
}

/// All accepted grids, best first, one entry per (along, across) pair.
pub fn valid_arrays(params: &LayoutParams, config: &CalcConfig) -> Vec<LayoutCandidate> {
    let target = params.num_fixtures;
    let max_dim = target.saturating_add(SEARCH_MARGIN);
    let mut accepted = Vec::new();

    for rows in 1..=max_dim {
        for cols in 1..=max_dim {
            if (rows as u64) * (cols as u64) < target as u64 {
                continue;
            }
            let (along, across) = if params.aspect_ratio >= 1.0 {
                (rows.max(cols), rows.min(cols))
            } else {
                (rows.min(cols), rows.max(cols))
            };
            let candidate = LayoutCandidate::new(
                along,
                across,
                params.room_length,
                params.room_width,
                params.mounting_height,
            );
            if candidate.meets_shr(params.shr_max) && candidate.meets_spacing(config.min_spacing) {
                accepted.push(candidate);
            }
        }
    }

    // stable: equal keys keep enumeration order
    accepted.sort_by_key(|c| (c.fixture_count.abs_diff(target), c.fixture_count));
    let mut seen = HashSet::new();
    accepted.retain(|c| seen.insert((c.along_length, c.across_width)));
    accepted
}

/// Pick the best even and best odd grid for the room.
pub fn find_valid_arrays(params: &LayoutParams, config: &CalcConfig) -> LayoutPair {
    if params.num_fixtures > config.max_layout_fixtures {
        log::warn!(
            "Skipping layout search: {} fixtures exceeds the limit of {}",
            params.num_fixtures,
            config.max_layout_fixtures
        );
        return LayoutPair::default();
    }

    let ranked = valid_arrays(params, config);
    log::debug!(
        "{} valid arrays for {} fixtures",
        ranked.len(),
        params.num_fixtures
    );
    LayoutPair {
        even: ranked.iter().find(|c| c.parity == Parity::Even).cloned(),
        odd: ranked.iter().find(|c| c.parity == Parity::Odd).cloned(),
    }
}
