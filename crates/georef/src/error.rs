//! Error types for the georef library.
//!
//! The validation rules and amendment engine never return these: they report
//! problems as outcome states. Errors only surface at the edges (reading
//! files, loading boundary data, building HTTP clients).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for georef operations.
#[derive(Debug, Error)]
pub enum GeorefError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error talking to a remote service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Boundary data could not be interpreted.
    #[error("Boundary data error: {0}")]
    BoundaryData(String),

    /// No land/sea polygons are loaded, so land membership cannot be decided.
    #[error("Land polygon data is not available")]
    LandDataUnavailable,

    /// No country polygons are loaded.
    #[error("Country boundary data is not available")]
    CountryDataUnavailable,

    /// No state/province polygons are loaded.
    #[error("State/province boundary data is not available")]
    SubregionDataUnavailable,

    /// Empty file or no records to check.
    #[error("Empty data: {0}")]
    EmptyData(String),
}

impl GeorefError {
    /// Wrap an IO error with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeorefError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for georef operations.
pub type Result<T> = std::result::Result<T, GeorefError>;
