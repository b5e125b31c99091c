//! GEOLocate web service client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GeorefError, Result};

use super::oracle::{GeocodeCandidate, GeocodeOracle, GeocodeQuery, GeocodeResponse};

/// GEOLocate GeoJSON wrapper endpoint.
const API_URL: &str = "https://www.geo-locate.org/webservices/geolocatesvcv2/glcwrap.aspx";

/// Configuration for the GEOLocate client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoLocateConfig {
    /// Service endpoint.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// GEOLocate language library key (0 = basic English).
    pub language_key: u32,
    /// Ask the service to compute uncertainty radii.
    pub do_uncertainty: bool,
}

impl Default for GeoLocateConfig {
    fn default() -> Self {
        Self {
            endpoint: API_URL.to_string(),
            timeout_secs: 30,
            language_key: 0,
            do_uncertainty: true,
        }
    }
}

/// Blocking client for the GEOLocate locality georeferencing service.
pub struct GeoLocateClient {
    client: Client,
    config: GeoLocateConfig,
}

impl GeoLocateClient {
    /// Create a client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(GeoLocateConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: GeoLocateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeorefError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Query string for a lookup. The `glcwrap` endpoint takes no reference
    /// coordinate, so the query's hints are not sent.
    fn request_params(&self, query: &GeocodeQuery) -> Vec<(&'static str, String)> {
        let term = |value: &Option<String>| value.clone().unwrap_or_default();
        vec![
            ("country", term(&query.country)),
            ("state", term(&query.state_province)),
            ("county", term(&query.county)),
            ("locality", term(&query.locality)),
            ("hwyx", "false".to_string()),
            ("enableH2O", "false".to_string()),
            ("doUncert", self.config.do_uncertainty.to_string()),
            ("doPoly", "false".to_string()),
            ("displacePoly", "false".to_string()),
            ("restrictAdmin", "false".to_string()),
            ("languageKey", self.config.language_key.to_string()),
            ("fmt", "geojson".to_string()),
        ]
    }

    /// Send the query and parse the GeoJSON reply.
    fn fetch(&self, query: &GeocodeQuery) -> Result<Vec<GeocodeCandidate>> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&self.request_params(query))
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(GeorefError::Config(format!(
                "GEOLocate error ({}): {}",
                status, error_text
            )));
        }

        let body: GeoLocateResponse = response.json()?;
        Ok(body.into_candidates())
    }
}

impl GeocodeOracle for GeoLocateClient {
    fn query_candidates(&self, query: &GeocodeQuery) -> GeocodeResponse {
        if !query.has_terms() {
            return GeocodeResponse::found(Vec::new());
        }
        match self.fetch(query) {
            Ok(candidates) => {
                debug!(
                    locality = query.locality.as_deref().unwrap_or_default(),
                    candidates = candidates.len(),
                    "GEOLocate lookup"
                );
                GeocodeResponse::found(candidates)
            }
            Err(e) => {
                warn!(error = %e, "GEOLocate lookup failed");
                GeocodeResponse::failed()
            }
        }
    }

    fn name(&self) -> &str {
        "geolocate"
    }
}

/// GeoJSON reply from the `glcwrap` endpoint.
#[derive(Debug, Deserialize)]
struct GeoLocateResponse {
    #[serde(default)]
    features: Vec<GeoLocateFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoLocateFeature {
    geometry: GeoLocatePoint,
    #[serde(default)]
    properties: GeoLocateProperties,
}

#[derive(Debug, Deserialize)]
struct GeoLocatePoint {
    /// `[longitude, latitude]`
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoLocateProperties {
    #[serde(default)]
    parse_pattern: Option<String>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    uncertainty_radius_meters: Option<serde_json::Value>,
}

impl GeoLocateResponse {
    /// Convert features to candidates, keeping the service's ranking and
    /// dropping any feature without a usable point.
    fn into_candidates(self) -> Vec<GeocodeCandidate> {
        self.features
            .into_iter()
            .filter_map(|feature| {
                let [lon, lat] = feature.geometry.coordinates[..] else {
                    return None;
                };
                let props = feature.properties;
                let mut candidate = GeocodeCandidate::new(
                    lat,
                    lon,
                    props.score.unwrap_or(0.0).clamp(0.0, 100.0),
                    props.parse_pattern.unwrap_or_else(|| "geolocate".to_string()),
                );
                // The service reports "Unavailable" rather than a number at times.
                if let Some(radius) = props.uncertainty_radius_meters.as_ref().and_then(|v| {
                    v.as_f64().or_else(|| v.as_str().and_then(|s| s.parse().ok()))
                }) {
                    candidate = candidate.with_uncertainty(radius);
                }
                Some(candidate)
            })
            .collect()
    }
}
