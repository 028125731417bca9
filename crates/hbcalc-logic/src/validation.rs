//! Input validation for request fields.
//!
//! Raw form values arrive as strings (CLI arguments, form fields) or as
//! already-parsed numbers (JSON requests). Both paths end in [`check_value`],
//! which rejects non-finite numbers and enforces inclusive bounds.

use crate::error::{CalcError, Violation};

/// Parse a raw string and check it against optional inclusive bounds.
pub fn parse_input(
    raw: &str,
    field: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<f64, CalcError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CalcError::invalid_input(field, Violation::NotNumeric))?;
    check_value(value, field, min, max)
}

/// Check an already-parsed number against optional inclusive bounds.
/// NaN and infinities are rejected as non-numeric regardless of bounds.
pub fn check_value(
    value: f64,
    field: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<f64, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, Violation::NotNumeric));
    }
    if let Some(min) = min {
        if value < min {
            return Err(CalcError::invalid_input(
                field,
                Violation::BelowMinimum(min),
            ));
        }
    }
    if let Some(max) = max {
        if value > max {
            return Err(CalcError::invalid_input(
                field,
                Violation::AboveMaximum(max),
            ));
        }
    }
    Ok(value)
}

/// Like [`check_value`] without bounds, but the value must be strictly positive.
pub fn check_positive(value: f64, field: &str) -> Result<f64, CalcError> {
    let value = check_value(value, field, None, None)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, Violation::NotPositive));
    }
    Ok(value)
}

/// Resolve an optional field to its default, then check bounds.
pub fn value_or_default(
    value: Option<f64>,
    default: f64,
    field: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<f64, CalcError> {
    check_value(value.unwrap_or(default), field, min, max)
}
