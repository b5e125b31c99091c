//! georef: georeference quality control for biodiversity occurrence records.
//!
//! Checks that the coordinates of an occurrence agree with its stated
//! country, state/province and water body, and proposes corrections for
//! missing, sign-flipped or swapped coordinates.
//!
//! # Core Principles
//!
//! - **Non-destructive**: Records are never modified; corrections are proposals
//! - **Total**: Every record yields an outcome with comments, never an error
//! - **Pluggable data**: Boundaries and geocoding sit behind oracle traits
//!
//! # Example
//!
//! ```no_run
//! use georef::{GeorefQc, OccurrenceRecord, PolygonRegionOracle, StaticGeocoder};
//!
//! let regions = PolygonRegionOracle::new()
//!     .load_countries_geojson("countries.geojson")
//!     .unwrap();
//! let qc = GeorefQc::new(regions, StaticGeocoder::default());
//!
//! let record = OccurrenceRecord::new()
//!     .with_country("Uganda")
//!     .with_coordinates("1.37", "32.29");
//! let report = qc.assess(&record, 0);
//! println!("Issues: {}", report.has_issues());
//! ```

pub mod amendment;
pub mod error;
pub mod geocode;
pub mod geodesy;
pub mod input;
pub mod record;
pub mod region;
pub mod validation;

mod qc;

pub use crate::qc::{BatchReport, BatchSummary, GeorefQc, QcConfig, RecordReport};
pub use amendment::{AmendmentEngine, AmendmentOutcome, AmendmentState, EngineConfig};
pub use error::{GeorefError, Result};
pub use geocode::{
    CachedGeocoder, GeoLocateClient, GeoLocateConfig, GeocodeCandidate, GeocodeOracle, GeocodeQuery,
    GeocodeResponse, StaticGeocoder,
};
pub use geodesy::{
    great_circle_distance_km, great_circle_distance_meters, range_valid, Coordinate, GeodeticDatum,
};
pub use input::SourceMetadata;
pub use record::{LocalityDescriptor, OccurrenceRecord};
pub use region::{canonical_country_name, Polygon, PolygonRegionOracle, RegionOracle};
pub use validation::{Compliance, ValidationOutcome, ValidationState};
