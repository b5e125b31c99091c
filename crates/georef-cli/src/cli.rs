//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// georef: georeference quality control for occurrence records
#[derive(Parser)]
#[command(name = "georef")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub data: DataOptions,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Boundary data and engine settings shared by every command.
#[derive(Args, Clone, Debug, Default)]
pub struct DataOptions {
    /// Country boundaries (GeoJSON FeatureCollection)
    #[arg(long, global = true, value_name = "GEOJSON")]
    pub regions: Option<PathBuf>,

    /// State/province boundaries (GeoJSON, features carry country and name)
    #[arg(long, global = true, value_name = "GEOJSON")]
    pub subregions: Option<PathBuf>,

    /// Land polygons for water body checks (GeoJSON)
    #[arg(long, global = true, value_name = "GEOJSON")]
    pub land: Option<PathBuf>,

    /// QC configuration file (JSON)
    #[arg(long, global = true, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Don't contact the geocoding service
    #[arg(long, global = true)]
    pub offline: bool,

    /// Distance within which a geocoded candidate matches, in kilometers
    #[arg(long, global = true)]
    pub threshold_km: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check every record in an occurrence file (CSV/TSV)
    Check {
        /// Path to the occurrence file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a single record given on the command line
    Record(RecordArgs),

    /// Great-circle distance between two points
    Distance {
        #[arg(allow_hyphen_values = true)]
        lat1: f64,
        #[arg(allow_hyphen_values = true)]
        lon1: f64,
        #[arg(allow_hyphen_values = true)]
        lat2: f64,
        #[arg(allow_hyphen_values = true)]
        lon2: f64,
    },
}

/// Darwin Core fields of a single record.
#[derive(Args, Clone, Debug, Default)]
pub struct RecordArgs {
    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub country_code: Option<String>,

    #[arg(long)]
    pub state_province: Option<String>,

    #[arg(long)]
    pub county: Option<String>,

    #[arg(long)]
    pub water_body: Option<String>,

    #[arg(long)]
    pub locality: Option<String>,

    /// Decimal latitude, as recorded
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// Decimal longitude, as recorded
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<String>,

    /// Datum or EPSG code of the coordinate (e.g. EPSG:4326)
    #[arg(long)]
    pub geodetic_datum: Option<String>,

    #[arg(long)]
    pub data_generalizations: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use text or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
