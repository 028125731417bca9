//! HBCalc command-line calculator
//!
//! Loads a fixture CSV file, runs one lumen-method calculation and prints
//! the report. Everything after loading is handled by `hbcalc-logic`.
//!
//! Usage:
//!   cargo run -p hbcalc-cli -- --fixture data/sample_highbay.csv \
//!       --length 20 --width 15 --height 7.5 --lux 300
//!   cargo run -p hbcalc-cli -- ... --json
//!   cargo run -p hbcalc-cli -- ... --config limits.json --verbose

mod loader;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use hbcalc_logic::calculation::{
    calculate, CalculationReport, CalculationRequest, CalculationResult,
};
use hbcalc_logic::config::CalcConfig;
use hbcalc_logic::constants::labels;
use hbcalc_logic::layout::LayoutCandidate;
use hbcalc_logic::lumen::FixtureSpec;
use hbcalc_logic::validation::parse_input;
use hbcalc_logic::CalcError;
use thiserror::Error;

use crate::loader::LoadError;

/// Numeric options stay strings until the calculator's own validation sees
/// them, so a bad value is reported with its field name like any other input error.
#[derive(Debug, Parser)]
#[command(
    name = "hbcalc",
    version,
    about = "High-bay lighting layout calculator (lumen method)"
)]
struct Args {
    /// Fixture CSV file: 7 metadata lines followed by the Uf table
    #[arg(short, long)]
    fixture: PathBuf,

    /// Room length (m)
    #[arg(long, allow_negative_numbers = true)]
    length: String,

    /// Room width (m)
    #[arg(long, allow_negative_numbers = true)]
    width: String,

    /// Room height (m)
    #[arg(long, allow_negative_numbers = true)]
    height: String,

    /// Working plane height (m) [default: 3]
    #[arg(long = "working-plane", allow_negative_numbers = true)]
    working_plane_height: Option<String>,

    /// Suspension distance from the ceiling (m) [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    suspension: Option<String>,

    /// Ceiling reflectance (%) [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    ceiling: Option<String>,

    /// Walls reflectance (%) [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    walls: Option<String>,

    /// Floor reflectance (%) [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    floor: Option<String>,

    /// Required illuminance (lux) [default: 3]
    #[arg(long, allow_negative_numbers = true)]
    lux: Option<String>,

    /// Maintenance factor, 0–1 [default: 0.8]
    #[arg(long = "mf", allow_negative_numbers = true)]
    maintenance_factor: Option<String>,

    /// Override the modified SHR instead of deriving it from SHRNOM
    #[arg(long, allow_negative_numbers = true)]
    shr_modified: Option<String>,

    /// JSON file overriding calculation limits (min_spacing, shr_factor, ...)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging and fixture positions in the text report
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Error reading config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid config {path}: {source}")]
    ConfigInvalid {
        path: String,
        #[source]
        source: CalcError,
    },
    #[error("Error writing JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(result) if result.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    env_logger::Builder::from_env(env).init();
}

fn run(args: &Args) -> Result<CalculationResult, CliError> {
    let config = load_config(args.config.as_deref())?;
    let fixture = loader::load_fixture(&args.fixture)?;

    let result = calculate_args(args, &fixture, &config);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_text(&result, &config, args.verbose);
    }
    Ok(result)
}

fn load_config(path: Option<&Path>) -> Result<CalcConfig, CliError> {
    let Some(path) = path else {
        return Ok(CalcConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigIo {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config(&text, &path.display().to_string())?;
    log::debug!("Loaded config {}: {:?}", path.display(), config);
    Ok(config)
}

fn parse_config(text: &str, path: &str) -> Result<CalcConfig, CliError> {
    let config: CalcConfig = serde_json::from_str(text).map_err(|source| CliError::ConfigParse {
        path: path.to_string(),
        source,
    })?;
    config.validate().map_err(|source| CliError::ConfigInvalid {
        path: path.to_string(),
        source,
    })?;
    Ok(config)
}

/// Build the request from the command line and run it. A value that does not
/// parse ends the calculation the same way a failed stage does.
fn calculate_args(args: &Args, fixture: &FixtureSpec, config: &CalcConfig) -> CalculationResult {
    match build_request(args, fixture) {
        Ok(request) => calculate(&request, config),
        Err(e) => {
            log::error!("Error during calculation: {e}");
            let failed: Result<CalculationReport, CalcError> = Err(e);
            failed.into()
        }
    }
}

fn build_request(args: &Args, fixture: &FixtureSpec) -> Result<CalculationRequest, CalcError> {
    let number = |raw: &str, field: &str| parse_input(raw, field, None, None);
    let optional = |raw: &Option<String>, field: &str| {
        raw.as_deref().map(|r| number(r, field)).transpose()
    };

    let mut request = CalculationRequest::for_fixture(
        fixture,
        number(&args.length, labels::ROOM_LENGTH)?,
        number(&args.width, labels::ROOM_WIDTH)?,
        number(&args.height, labels::ROOM_HEIGHT)?,
    );
    request.working_plane_height =
        optional(&args.working_plane_height, labels::WORKING_PLANE_HEIGHT)?;
    request.suspension_distance = optional(&args.suspension, labels::SUSPENSION_DISTANCE)?;
    request.ceiling_reflectance = optional(&args.ceiling, labels::CEILING_REFLECTANCE)?;
    request.walls_reflectance = optional(&args.walls, labels::WALLS_REFLECTANCE)?;
    request.floor_reflectance = optional(&args.floor, labels::FLOOR_REFLECTANCE)?;
    request.required_illuminance = optional(&args.lux, labels::REQUIRED_LUX)?;
    request.maintenance_factor = optional(&args.maintenance_factor, labels::MAINTENANCE_FACTOR)?;
    request.shr_nom_modified = optional(&args.shr_modified, labels::SHR_MODIFIED)?;
    Ok(request)
}

fn print_text(result: &CalculationResult, config: &CalcConfig, verbose: bool) {
    match result {
        CalculationResult::Success(report) => {
            println!("{}", report.to_text());
            if verbose {
                let room = &report.inputs.room;
                let layouts = [
                    ("Even", &report.layouts.even),
                    ("Odd", &report.layouts.odd),
                ];
                for (title, layout) in layouts {
                    if let Some(c) = layout {
                        println!();
                        print_layout(title, c, room.length, room.width, config);
                    }
                }
            }
        }
        CalculationResult::Failure { message, .. } => eprintln!("Error: {message}"),
    }
}

fn print_layout(title: &str, c: &LayoutCandidate, length: f64, width: f64, config: &CalcConfig) {
    let (along, across) = (c.along_length, c.across_width);
    println!("{title} Array: {along}×{across} Fixtures");
    let edge_l = c.edge_distance_length(length);
    let edge_w = c.edge_distance_width(width);
    println!(
        "  Fixture Spacing: {:.2}m (L) × {:.2}m (W)",
        c.spacing_length, c.spacing_width
    );
    println!("  Edge Distance: {edge_l:.2}m (L) × {edge_w:.2}m (W)");
    for issue in c.spacing_issues(config.min_spacing) {
        println!("  ! {issue}");
    }
    for (x, y) in c.positions(length, width) {
        println!("  ({x:.2}, {y:.2})");
    }
}
