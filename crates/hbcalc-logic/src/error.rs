//! Calculation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which bound a rejected input value violated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("please enter a numeric value")]
    NotNumeric,
    #[error("must be greater than or equal to {0}")]
    BelowMinimum(f64),
    #[error("must be less than or equal to {0}")]
    AboveMaximum(f64),
    #[error("must be greater than 0")]
    NotPositive,
}

/// Any failure raised by a calculation stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Invalid input for {field}: {violation}")]
    InvalidInput { field: String, violation: Violation },

    #[error(
        "Invalid geometry: mounting height is {mounting_height:.2} m; working plane height \
         plus suspension distance must be less than the room height"
    )]
    InvalidGeometry { mounting_height: f64 },

    #[error("Room Cavity Index (K) {k:.3} must be between {min} and {max}")]
    OutOfRange { k: f64, min: f64, max: f64 },

    #[error("Malformed Uf table: {0}")]
    MalformedTable(String),

    #[error("Invalid fixture parameters: {0}")]
    InvalidFixtureParameters(String),
}

/// Fieldless discriminant of [`CalcError`], for programmatic consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidInput,
    InvalidGeometry,
    OutOfRange,
    MalformedTable,
    InvalidFixtureParameters,
}

impl CalcError {
    pub fn invalid_input(field: impl Into<String>, violation: Violation) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            violation,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::InvalidInput { .. } => ErrorKind::InvalidInput,
            CalcError::InvalidGeometry { .. } => ErrorKind::InvalidGeometry,
            CalcError::OutOfRange { .. } => ErrorKind::OutOfRange,
            CalcError::MalformedTable(_) => ErrorKind::MalformedTable,
            CalcError::InvalidFixtureParameters(_) => ErrorKind::InvalidFixtureParameters,
        }
    }
}
