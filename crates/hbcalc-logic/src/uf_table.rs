//! Utilization factor tables and Uf interpolation.
//!
//! Manufacturers publish Uf as a grid: one row per Room Cavity Index (K),
//! one column per surface-reflectance combination named `Rc{c}_Rw{w}_Rf{f}`.
//! The grid arrives as string rows (header first) and is parsed once into a
//! [`UfTable`]; lookups then never touch strings again.
//!
//! Reflectance combinations are discrete lab measurements, so there is no
//! true second interpolation axis. [`interpolate_uf`] interpolates linearly
//! over K inside the two reflectance columns closest to the request (L1
//! distance) and blends the two results by inverse distance.

use serde::{Deserialize, Serialize};

use crate::config::CalcConfig;
use crate::constants::WEIGHT_EPSILON;
use crate::error::CalcError;

/// Ceiling, wall and floor reflectance percentages (0–100).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceReflectances {
    pub ceiling: f64,
    pub walls: f64,
    pub floor: f64,
}

impl SurfaceReflectances {
    pub fn new(ceiling: f64, walls: f64, floor: f64) -> Self {
        Self {
            ceiling,
            walls,
            floor,
        }
    }
}

/// One reflectance combination parsed from a header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectanceColumn {
    pub label: String,
    pub ceiling: i32,
    pub walls: i32,
    pub floor: i32,
}

impl ReflectanceColumn {
    /// Parse `Rc<int>_Rw<int>_Rf<int>`; anything else is `None`.
    pub fn parse(label: &str) -> Option<Self> {
        let mut parts = label.trim().split('_');
        let ceiling = parse_tagged(parts.next()?, "Rc")?;
        let walls = parse_tagged(parts.next()?, "Rw")?;
        let floor = parse_tagged(parts.next()?, "Rf")?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            label: label.trim().to_string(),
            ceiling,
            walls,
            floor,
        })
    }

    /// L1 distance between this column and requested reflectances.
    pub fn distance(&self, requested: &SurfaceReflectances) -> f64 {
        (self.ceiling as f64 - requested.ceiling).abs()
            + (self.walls as f64 - requested.walls).abs()
            + (self.floor as f64 - requested.floor).abs()
    }
}

fn parse_tagged(part: &str, tag: &str) -> Option<i32> {
    part.strip_prefix(tag)?.parse().ok()
}

/// A parsed manufacturer Uf table.
///
/// Rows are sorted by ascending K. When the source repeats a K value the
/// first occurrence wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<TableCell>>", into = "Vec<Vec<String>>")]
pub struct UfTable {
    k_values: Vec<f64>,
    columns: Vec<ReflectanceColumn>,
    /// `cells[row][column]`; `None` where the source cell was blank or non-numeric.
    cells: Vec<Vec<Option<f64>>>,
}

impl UfTable {
    /// Parse a header row followed by data rows.
    ///
    /// Header cells that are not reflectance combinations are skipped, as are
    /// data rows whose first cell is not a number.
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self, CalcError> {
        let (header, data) = rows
            .split_first()
            .ok_or_else(|| CalcError::MalformedTable("table has no header row".into()))?;

        // (source cell index, parsed column)
        let parsed: Vec<(usize, ReflectanceColumn)> = header
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(i, cell)| ReflectanceColumn::parse(cell.as_ref()).map(|c| (i, c)))
            .collect();
        if parsed.is_empty() {
            return Err(CalcError::MalformedTable(
                "no valid reflectance columns found".into(),
            ));
        }

        let mut entries: Vec<(f64, Vec<Option<f64>>)> = Vec::new();
        for row in data {
            let Some(k) = row.first().and_then(|c| parse_number(c.as_ref())) else {
                continue;
            };
            let cells = parsed
                .iter()
                .map(|(i, _)| row.get(*i).and_then(|c| parse_number(c.as_ref())))
                .collect();
            entries.push((k, cells));
        }
        if entries.is_empty() {
            return Err(CalcError::MalformedTable("no numeric K rows found".into()));
        }

        entries.sort_by(|a, b| a.0.total_cmp(&b.0));
        entries.dedup_by(|later, earlier| later.0 == earlier.0);

        let (k_values, cells): (Vec<f64>, Vec<Vec<Option<f64>>>) = entries.into_iter().unzip();
        Ok(Self {
            k_values,
            columns: parsed.into_iter().map(|(_, c)| c).collect(),
            cells,
        })
    }

    pub fn k_values(&self) -> &[f64] {
        &self.k_values
    }

    pub fn columns(&self) -> &[ReflectanceColumn] {
        &self.columns
    }

    /// Smallest and largest tabulated K.
    pub fn k_range(&self) -> (f64, f64) {
        // from_rows guarantees at least one row
        let min = self.k_values.first().copied().unwrap_or(f64::NAN);
        let max = self.k_values.last().copied().unwrap_or(f64::NAN);
        (min, max)
    }

    /// Stored value at a row/column position.
    pub fn cell(&self, row: usize, column: usize) -> Result<f64, CalcError> {
        self.cells
            .get(row)
            .and_then(|r| r.get(column).copied().flatten())
            .ok_or_else(|| {
                let k = self.k_values.get(row).copied().unwrap_or(f64::NAN);
                let label = self.columns.get(column).map_or("?", |c| c.label.as_str());
                CalcError::MalformedTable(format!("missing Uf value at K={k} in column {label}"))
            })
    }

    /// Header row plus data rows, the inverse of [`UfTable::from_rows`].
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.k_values.len() + 1);
        let mut header = vec!["K".to_string()];
        header.extend(self.columns.iter().map(|c| c.label.clone()));
        rows.push(header);
        for (k, cells) in self.k_values.iter().zip(&self.cells) {
            let mut row = vec![k.to_string()];
            let values = cells.iter().map(|c| c.map(|v| v.to_string()));
            row.extend(values.map(Option::unwrap_or_default));
            rows.push(row);
        }
        rows
    }

    /// Rows that bracket `k`: the same row twice when `k` is within
    /// `tolerance` of a tabulated value.
    fn bracket(&self, k: f64, tolerance: f64) -> (usize, usize) {
        let above = self.k_values.partition_point(|&v| v <= k);
        let lower = above.saturating_sub(1);
        let upper = above.min(self.k_values.len() - 1);
        if (self.k_values[lower] - k).abs() <= tolerance {
            (lower, lower)
        } else if (self.k_values[upper] - k).abs() <= tolerance {
            (upper, upper)
        } else {
            (lower, upper)
        }
    }

    /// Uf in one column at `k`, linear between the bracketing rows.
    fn interpolate_column(&self, k: f64, column: usize, tolerance: f64) -> Result<f64, CalcError> {
        let (lower, upper) = self.bracket(k, tolerance);
        let uf_lower = self.cell(lower, column)?;
        if lower == upper {
            return Ok(uf_lower);
        }
        let uf_upper = self.cell(upper, column)?;
        let (k_lower, k_upper) = (self.k_values[lower], self.k_values[upper]);
        Ok(uf_lower + (k - k_lower) * (uf_upper - uf_lower) / (k_upper - k_lower))
    }
}

/// A serialized table cell. Tables read from files carry text; tables built
/// by programs may carry K and Uf as plain numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TableCell {
    Number(f64),
    Text(String),
}

impl From<TableCell> for String {
    fn from(cell: TableCell) -> Self {
        match cell {
            TableCell::Number(v) => v.to_string(),
            TableCell::Text(s) => s,
        }
    }
}

impl TryFrom<Vec<Vec<TableCell>>> for UfTable {
    type Error = CalcError;

    fn try_from(rows: Vec<Vec<TableCell>>) -> Result<Self, Self::Error> {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(String::from).collect())
            .collect();
        UfTable::from_rows(&rows)
    }
}

impl From<UfTable> for Vec<Vec<String>> {
    fn from(table: UfTable) -> Self {
        table.to_rows()
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Interpolate a utilization factor for room index `k` and the requested reflectances.
pub fn interpolate_uf(
    k: f64,
    reflectances: &SurfaceReflectances,
    table: &UfTable,
    config: &CalcConfig,
) -> Result<f64, CalcError> {
    let (min, max) = table.k_range();
    if !(min..=max).contains(&k) {
        return Err(CalcError::OutOfRange { k, min, max });
    }

    let mut distances: Vec<(f64, usize)> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, c)| (c.distance(reflectances), i))
        .collect();
    distances.sort_by(|a, b| a.0.total_cmp(&b.0));

    let (first, second) = match distances.as_slice() {
        [] => {
            return Err(CalcError::MalformedTable(
                "no valid reflectance columns found".into(),
            ))
        }
        // A single column is used twice.
        [only] => (*only, *only),
        [a, b, ..] => (*a, *b),
    };

    let uf1 = table.interpolate_column(k, first.1, config.k_match_tolerance)?;
    let uf2 = table.interpolate_column(k, second.1, config.k_match_tolerance)?;

    let w1 = 1.0 / (first.0 + WEIGHT_EPSILON);
    let w2 = 1.0 / (second.0 + WEIGHT_EPSILON);
    let uf = (uf1 * w1 + uf2 * w2) / (w1 + w2);

    log::debug!(
        "Uf {:.4} at K={:.3}: {} ({:.4}, d={}) + {} ({:.4}, d={})",
        uf,
        k,
        table.columns()[first.1].label,
        uf1,
        first.0,
        table.columns()[second.1].label,
        uf2,
        second.0
    );
    Ok(uf)
}
