//! Fixture CSV loading.
//!
//! A fixture file starts with a block of `key,value` metadata lines,
//! followed by the manufacturer's Uf table (header row, then one row per K):
//!
//! ```text
//! Fixture Name,HB150 LED High Bay 150W
//! Luminous Flux,19000
//! Wattage,150W
//! SHRNOM,1.25
//! ...                      (7 metadata lines in total)
//! K,Rc70_Rw50_Rf20,...,Rc0_Rw0_Rf0
//! 0.60,0.45,...,0.33
//! ```
//!
//! Unknown metadata keys are ignored. Blank rows are dropped and every cell
//! is whitespace-trimmed.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use hbcalc_logic::lumen::FixtureSpec;
use hbcalc_logic::uf_table::UfTable;
use hbcalc_logic::CalcError;
use thiserror::Error;

/// Number of metadata lines before the Uf table header.
pub const METADATA_LINES: u64 = 7;

const KEY_NAME: &str = "Fixture Name";
const KEY_FLUX: &str = "Luminous Flux";
const KEY_WATTAGE: &str = "Wattage";
const KEY_SHR: &str = "SHRNOM";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Error parsing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Fixture file is missing the '{0}' metadata line")]
    MissingField(&'static str),
    #[error("Invalid {field} in fixture metadata: '{value}'")]
    InvalidMetadata { field: &'static str, value: String },
    #[error("Invalid fixture data: {0}")]
    Fixture(#[from] CalcError),
}

/// Read and parse a fixture file from disk.
pub fn load_fixture(path: &Path) -> Result<FixtureSpec, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let fixture = parse_fixture(&text)?;
    log::info!(
        "Fixture file loaded: {} ({}, {} lm, {} W, SHRNOM {})",
        path.display(),
        fixture.name,
        fixture.luminous_flux,
        fixture.wattage,
        fixture.shr_nominal
    );
    Ok(fixture)
}

/// Parse the contents of a fixture file.
pub fn parse_fixture(text: &str) -> Result<FixtureSpec, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut metadata = Vec::new();
    let mut table: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line());
        if line <= METADATA_LINES {
            metadata.push(record);
        } else {
            table.push(record.iter().map(str::to_string).collect());
        }
    }

    let fixture = FixtureSpec {
        name: metadata_value(&metadata, KEY_NAME)?.to_string(),
        luminous_flux: metadata_number(&metadata, KEY_FLUX, |v| v)?,
        wattage: metadata_number(&metadata, KEY_WATTAGE, |v| {
            v.trim_end_matches(['W', 'w']).trim_end()
        })?,
        shr_nominal: metadata_number(&metadata, KEY_SHR, |v| v)?,
        uf_table: UfTable::from_rows(&table)?,
    };
    fixture.validate()?;
    Ok(fixture)
}

fn metadata_value<'a>(
    metadata: &'a [StringRecord],
    key: &'static str,
) -> Result<&'a str, LoadError> {
    metadata
        .iter()
        .find(|r| r.get(0) == Some(key))
        .and_then(|r| r.get(1))
        .ok_or(LoadError::MissingField(key))
}

fn metadata_number(
    metadata: &[StringRecord],
    key: &'static str,
    clean: impl Fn(&str) -> &str,
) -> Result<f64, LoadError> {
    let raw = metadata_value(metadata, key)?;
    clean(raw)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::InvalidMetadata {
            field: key,
            value: raw.to_string(),
        })
}
