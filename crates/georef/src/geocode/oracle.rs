//! Geocode oracle trait and types.

use serde::{Deserialize, Serialize};

use crate::geodesy::Coordinate;
use crate::record::OccurrenceRecord;

/// Locality terms sent to a geocoding service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    /// Original latitude text, passed through unchanged as a hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_latitude: Option<String>,
    /// Original longitude text, passed through unchanged as a hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_longitude: Option<String>,
}

impl GeocodeQuery {
    /// Build a query from the locality fields of a record, with its
    /// coordinate text as hints.
    pub fn from_record(record: &OccurrenceRecord) -> Self {
        Self {
            country: record.country().map(str::to_string),
            state_province: record.state_province().map(str::to_string),
            county: record.county().map(str::to_string),
            locality: record.locality().map(str::to_string),
            hint_latitude: record.latitude_text().map(str::to_string),
            hint_longitude: record.longitude_text().map(str::to_string),
        }
    }

    /// Whether the query has any locality terms at all.
    pub fn has_terms(&self) -> bool {
        self.country.is_some()
            || self.state_province.is_some()
            || self.county.is_some()
            || self.locality.is_some()
    }
}

/// A ranked coordinate proposal returned by a geocoding service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub coordinate: Coordinate,
    /// Match confidence, 0-100.
    pub confidence: f64,
    /// How the service arrived at the match (e.g. its parse pattern).
    pub origin: String,
    /// Radius of the georeference uncertainty, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertainty_radius_meters: Option<f64>,
}

impl GeocodeCandidate {
    pub fn new(latitude: f64, longitude: f64, confidence: f64, origin: impl Into<String>) -> Self {
        Self {
            coordinate: Coordinate::new(latitude, longitude),
            confidence,
            origin: origin.into(),
            uncertainty_radius_meters: None,
        }
    }

    /// Set the uncertainty radius.
    pub fn with_uncertainty(mut self, meters: f64) -> Self {
        self.uncertainty_radius_meters = Some(meters);
        self
    }
}

/// Candidates from one geocode query, best match first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub candidates: Vec<GeocodeCandidate>,
    /// The service could not be reached or returned something unreadable.
    /// `candidates` is empty whenever this is set.
    pub service_failed: bool,
}

impl GeocodeResponse {
    /// A successful response (possibly with no matches).
    pub fn found(candidates: Vec<GeocodeCandidate>) -> Self {
        Self {
            candidates,
            service_failed: false,
        }
    }

    /// A failed lookup.
    pub fn failed() -> Self {
        Self {
            candidates: Vec::new(),
            service_failed: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The best-ranked candidate.
    pub fn top(&self) -> Option<&GeocodeCandidate> {
        self.candidates.first()
    }

    /// The first candidate within `threshold_meters` of the coordinate.
    pub fn nearest_within(&self, coordinate: &Coordinate, threshold_meters: i64) -> Option<&GeocodeCandidate> {
        self.candidates
            .iter()
            .find(|c| coordinate.distance_meters_to(&c.coordinate) <= threshold_meters)
    }

    /// Whether the coordinate lies within `threshold_meters` of any candidate.
    pub fn is_near_any(&self, coordinate: &Coordinate, threshold_meters: i64) -> bool {
        self.nearest_within(coordinate, threshold_meters).is_some()
    }
}

/// A locality geocoding service.
///
/// Implementations must be thread-safe (Send + Sync) and must not panic or
/// return errors for service problems: a failure is reported as
/// [`GeocodeResponse::failed`].
pub trait GeocodeOracle: Send + Sync {
    /// Look up ranked candidate coordinates for the locality terms.
    fn query_candidates(&self, query: &GeocodeQuery) -> GeocodeResponse;

    /// Short name for logs and reports.
    fn name(&self) -> &str;

    /// Whether replies depend on the query's hint coordinates as well as
    /// its locality terms.
    fn uses_hints(&self) -> bool {
        false
    }
}

impl<T: GeocodeOracle + ?Sized> GeocodeOracle for std::sync::Arc<T> {
    fn query_candidates(&self, query: &GeocodeQuery) -> GeocodeResponse {
        (**self).query_candidates(query)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn uses_hints(&self) -> bool {
        (**self).uses_hints()
    }
}
