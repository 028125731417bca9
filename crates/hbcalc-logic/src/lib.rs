//! Lumen-method calculation engine for high-bay lighting layouts.
//!
//! This crate contains the calculation logic only. It has no file formats, UI or
//! global state. Functions take plain data and return results, so a
//! calculation is deterministic and independent requests can run in
//! parallel without coordination.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`calculation`] | Entry point: request validation, stage pipeline, success/failure result |
//! | [`config`] | Tunable limits (minimum spacing, SHR factor, search bound) |
//! | [`constants`] | Default values, field bounds, report labels |
//! | [`error`] | `CalcError` and its fieldless `ErrorKind` |
//! | [`geometry`] | Mounting height, Room Cavity Index (K), aspect ratio |
//! | [`layout`] | Rows × columns array search under SHR and spacing limits |
//! | [`lumen`] | Fixture data and the lumen-method fixture count |
//! | [`report`] | Human-readable report rows |
//! | [`uf_table`] | Utilization factor table parsing and interpolation |
//! | [`validation`] | Numeric input checks with inclusive bounds |

pub mod calculation;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod lumen;
pub mod report;
pub mod uf_table;
pub mod validation;

pub use calculation::{calculate, try_calculate, CalculationRequest, CalculationResult};
pub use config::CalcConfig;
pub use error::{CalcError, ErrorKind};
