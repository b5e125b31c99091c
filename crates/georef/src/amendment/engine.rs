//! The amendment engine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geocode::{GeocodeOracle, GeocodeQuery, GeocodeResponse};
use crate::geodesy::{Coordinate, GeodeticDatum, NEARSHORE_BUFFER_KM};
use crate::record::OccurrenceRecord;
use crate::region::{
    canonical_country_name, canonical_subregion_name, country_code_for_name, is_iso_alpha2_code,
    is_marine_water_body, RegionOracle,
};

use super::alternatives::{alternatives, CoordinateAlternative};
use super::outcome::AmendmentOutcome;

/// Change-map key for a proposed latitude.
pub const LATITUDE: &str = "latitude";
/// Change-map key for a proposed longitude.
pub const LONGITUDE: &str = "longitude";
/// Change-map key for a proposed country code.
pub const COUNTRY_CODE: &str = "countryCode";

/// Tunables for the amendment engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum distance between a coordinate and a geocoder candidate for
    /// the two to count as the same place, in kilometers.
    pub threshold_km: f64,
    /// The top candidate's confidence must exceed this to fill in values.
    pub min_confidence: f64,
    /// Buffer around a country for nearshore marine localities, in kilometers.
    pub nearshore_buffer_km: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold_km: 20.0,
            min_confidence: 80.0,
            nearshore_buffer_km: NEARSHORE_BUFFER_KM,
        }
    }
}

impl EngineConfig {
    /// The proximity threshold in whole meters.
    pub fn threshold_meters(&self) -> i64 {
        (self.threshold_km * 1000.0).round() as i64
    }
}

/// Proposes coordinate corrections using a region oracle and a geocoder.
///
/// The engine holds no mutable state; one instance can serve many threads.
#[derive(Clone)]
pub struct AmendmentEngine {
    regions: Arc<dyn RegionOracle>,
    geocoder: Arc<dyn GeocodeOracle>,
    config: EngineConfig,
}

impl AmendmentEngine {
    /// Create an engine with the default configuration.
    pub fn new(regions: impl RegionOracle + 'static, geocoder: impl GeocodeOracle + 'static) -> Self {
        Self::from_shared(Arc::new(regions), Arc::new(geocoder))
    }

    /// Create an engine over oracles that are shared with other components.
    pub fn from_shared(regions: Arc<dyn RegionOracle>, geocoder: Arc<dyn GeocodeOracle>) -> Self {
        Self {
            regions,
            geocoder,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn regions(&self) -> &dyn RegionOracle {
        self.regions.as_ref()
    }

    fn geocode(&self, record: &OccurrenceRecord) -> GeocodeResponse {
        let query = GeocodeQuery::from_record(record);
        let response = self.geocoder.query_candidates(&query);
        debug!(
            geocoder = self.geocoder.name(),
            candidates = response.candidates.len(),
            failed = response.service_failed,
            "geocode lookup"
        );
        response
    }

    /// Propose values for a missing latitude and/or longitude from the
    /// geocoder. A field that holds any non-blank text is never overwritten,
    /// whether or not the text parses as a number.
    pub fn fill_missing(&self, record: &OccurrenceRecord) -> AmendmentOutcome {
        let response = self.geocode(record);
        let Some(top) = response.top() else {
            let outcome = AmendmentOutcome::external_prerequisites_not_met(
                "Geocoding service can't find coordinates of locality.",
            );
            return if response.service_failed {
                outcome.with_leading_comment("Geocoding service could not be reached.")
            } else {
                outcome
            };
        };

        let (lat_text, lon_text) = (record.latitude_text(), record.longitude_text());
        if lat_text.is_some() && lon_text.is_some() {
            return AmendmentOutcome::no_change("latitude and longitude contain values, not changing.");
        }

        if top.confidence <= self.config.min_confidence {
            return AmendmentOutcome::external_prerequisites_not_met(format!(
                "No latitude and/or longitude provided, and the best geocoder match has confidence {} (needs more than {}).",
                top.confidence, self.config.min_confidence
            ));
        }

        let threshold = self.config.threshold_meters();
        match (lat_text, lon_text) {
            (Some(text), None) => {
                let Some(lat) = record.latitude() else {
                    return AmendmentOutcome::internal_prerequisites_not_met(format!(
                        "longitude is missing and latitude {:?} is not a number, can't place a longitude.",
                        text
                    ));
                };
                let candidate = Coordinate::new(lat, top.coordinate.longitude);
                if response.is_near_any(&candidate, threshold) {
                    return AmendmentOutcome::filled_in(
                        [(LONGITUDE, degrees_text(top.coordinate.longitude))],
                        "Added a longitude from the geocoder as longitude was missing and the geocoder had a confident match near the original line of latitude.",
                    );
                }
            }
            (None, Some(text)) => {
                let Some(lon) = record.longitude() else {
                    return AmendmentOutcome::internal_prerequisites_not_met(format!(
                        "latitude is missing and longitude {:?} is not a number, can't place a latitude.",
                        text
                    ));
                };
                let candidate = Coordinate::new(top.coordinate.latitude, lon);
                if response.is_near_any(&candidate, threshold) {
                    return AmendmentOutcome::filled_in(
                        [(LATITUDE, degrees_text(top.coordinate.latitude))],
                        "Added a latitude from the geocoder as latitude was missing and the geocoder had a confident match near the original line of longitude.",
                    );
                }
            }
            (None, None) => {
                return AmendmentOutcome::filled_in(
                    [
                        (LATITUDE, degrees_text(top.coordinate.latitude)),
                        (LONGITUDE, degrees_text(top.coordinate.longitude)),
                    ],
                    "Added a georeference from the geocoder since the original coordinates are missing and the geocoder had a confident match.",
                );
            }
            (Some(_), Some(_)) => {}
        }

        AmendmentOutcome::external_prerequisites_not_met(
            "No latitude and/or longitude provided, and the geocoder didn't return a good match.",
        )
    }

    /// Detect a sign-flipped or swapped coordinate and propose the corrected
    /// one.
    pub fn coordinate_transposition(&self, record: &OccurrenceRecord) -> AmendmentOutcome {
        let (Some(lat_text), Some(lon_text)) = (record.latitude_text(), record.longitude_text()) else {
            return AmendmentOutcome::internal_prerequisites_not_met("Either latitude or longitude is empty.");
        };
        let Some(original) = Coordinate::parse(lat_text, lon_text) else {
            return AmendmentOutcome::internal_prerequisites_not_met(
                "The value for either latitude or longitude is non numeric.",
            );
        };

        let locality = Locality::of(record, self.regions.as_ref());
        let candidates = alternatives(&original);

        if self.is_acceptable(&locality, &original) {
            debug!(%original, marine = locality.marine, "original coordinate consistent with locality");
            return AmendmentOutcome::no_change(if locality.marine {
                "Coordinate is consistent with a marine locality, not changing."
            } else {
                "latitude and longitude are within range and inside the stated country and state/province, not changing."
            });
        }

        let response = self.geocode(record);
        let threshold = self.config.threshold_meters();
        let threshold_km = self.config.threshold_km;

        if !response.is_empty() {
            if response.is_near_any(&original, threshold) {
                return AmendmentOutcome::no_change(format!(
                    "Original coordinates are near (within {} km) the georeference for the locality text from the geocoder. Accepting the original coordinates.",
                    threshold_km
                ));
            }

            let not_near = format!(
                "Original coordinates are not near (within {} km) the georeference for the locality text from the geocoder.",
                threshold_km
            );
            return match candidates.iter().find(|alt| response.is_near_any(&alt.coordinate, threshold)) {
                Some(alt) => {
                    debug!(%original, alternative = %alt.coordinate, label = alt.label(), "transposition matched geocoder");
                    transposed(
                        alt,
                        format!(
                            "Modified coordinates ({}) are near (within {} km) the georeference for the locality text from the geocoder. Accepting the {} coordinates.",
                            alt.label(),
                            threshold_km,
                            alt.label()
                        ),
                    )
                    .with_leading_comment(not_near)
                }
                None => AmendmentOutcome::not_amended(
                    "No sign change or interchange of latitude and longitude is near the georeference from the geocoder.",
                )
                .with_leading_comment(not_near),
            };
        }

        let outcome = self.geometric_fallback(&locality, &original, &candidates);
        if response.service_failed {
            outcome.with_leading_comment("Geocoding service could not be reached; using boundary data only.")
        } else {
            outcome
        }
    }

    /// Propose a country code for a record that has none, from the country
    /// whose boundary contains the coordinate.
    ///
    /// Boundaries are WGS84. A coordinate on a datum that differs from WGS84
    /// by more than a few meters is not placed.
    pub fn country_code_from_coordinates(&self, record: &OccurrenceRecord) -> AmendmentOutcome {
        if let Some(code) = record.country_code() {
            return AmendmentOutcome::internal_prerequisites_not_met(format!(
                "countryCode already contains a value ({}), not changing.",
                code
            ));
        }
        let (Some(lat_text), Some(lon_text)) = (record.latitude_text(), record.longitude_text()) else {
            return AmendmentOutcome::internal_prerequisites_not_met("Either latitude or longitude is empty.");
        };
        let Some(point) = Coordinate::parse(lat_text, lon_text).filter(Coordinate::is_in_range) else {
            return AmendmentOutcome::internal_prerequisites_not_met(
                "The value for either latitude or longitude is non numeric or out of range.",
            );
        };
        if let Some(text) = record.geodetic_datum() {
            match GeodeticDatum::parse(text) {
                None => {
                    return AmendmentOutcome::internal_prerequisites_not_met(format!(
                        "geodeticDatum {:?} is not recognized, can't place the coordinate.",
                        text
                    ));
                }
                Some(datum) if !datum.is_wgs84_compatible() => {
                    return AmendmentOutcome::internal_prerequisites_not_met(format!(
                        "Coordinate is on {}; transforming it to WGS84 is not supported.",
                        datum
                    ));
                }
                Some(_) => {}
            }
        }

        let countries = match self.regions.countries_containing(point.latitude, point.longitude) {
            Ok(countries) => countries,
            Err(e) => {
                return AmendmentOutcome::external_prerequisites_not_met("Country boundaries are not available.")
                    .with_comment(e.to_string());
            }
        };
        debug!(%point, matches = countries.len(), "countries containing coordinate");

        match countries.as_slice() {
            [] => AmendmentOutcome::not_amended("Coordinate is not inside any known country."),
            [country] => match country_code_for_name(country) {
                Some(code) => AmendmentOutcome::filled_in(
                    [(COUNTRY_CODE, code)],
                    format!("Added countryCode {} from the country containing the coordinate ({}).", code, country),
                ),
                None => AmendmentOutcome::not_amended(format!(
                    "Coordinate is inside {}, which has no known ISO 3166-1 alpha-2 code.",
                    country
                )),
            },
            many => AmendmentOutcome::not_amended(format!(
                "Coordinate is inside more than one country ({}).",
                many.join(", ")
            )),
        }
    }

    /// Whether the original coordinate needs no further checking.
    fn is_acceptable(&self, locality: &Locality, original: &Coordinate) -> bool {
        let (lat, lon) = (original.latitude, original.longitude);
        if locality.marine {
            let off_land = matches!(self.regions.point_on_land(lat, lon), Ok(false));
            off_land || locality.near_country(self.regions.as_ref(), original, self.config.nearshore_buffer_km)
        } else {
            original.is_in_range()
                && locality.in_country(self.regions.as_ref(), original)
                && locality.in_state(self.regions.as_ref(), original)
        }
    }

    /// Try the alternatives against boundary data alone.
    fn geometric_fallback(
        &self,
        locality: &Locality,
        original: &Coordinate,
        candidates: &[CoordinateAlternative],
    ) -> AmendmentOutcome {
        let regions = self.regions.as_ref();
        let buffer_km = self.config.nearshore_buffer_km;

        if locality.marine {
            if locality.country_known {
                if let Some(alt) = candidates
                    .iter()
                    .find(|alt| locality.near_country(regions, &alt.coordinate, buffer_km))
                {
                    return transposed(
                        alt,
                        format!(
                            "Modified coordinate ({}) is within {} km of country boundary.",
                            alt.label(),
                            buffer_km
                        ),
                    );
                }
            }
        } else if locality.country_known && locality.state_known {
            if let Some(alt) = candidates.iter().find(|alt| {
                locality.in_country(regions, &alt.coordinate) && locality.in_state(regions, &alt.coordinate)
            }) {
                return transposed(
                    alt,
                    format!(
                        "Modified coordinate ({}) is inside stateProvince ({}).",
                        alt.label(),
                        locality.state_province.as_deref().unwrap_or_default()
                    ),
                );
            }
        }

        let outside_country = locality.country_known && !locality.in_country(regions, original);
        let outside_state = locality.state_known && !locality.in_state(regions, original);
        let marine_on_land = locality.marine
            && matches!(regions.point_on_land(original.latitude, original.longitude), Ok(true));

        if outside_country || outside_state || marine_on_land {
            AmendmentOutcome::not_amended(
                "Original coordinate conflicts with the stated locality and no sign change or interchange of latitude and longitude resolves it.",
            )
        } else {
            AmendmentOutcome::no_change(
                "No georeference from the geocoder and no conflicting boundary evidence, not changing.",
            )
        }
    }
}

/// Canonical locality terms of a record, resolved against a region oracle once.
struct Locality {
    country: Option<String>,
    state_province: Option<String>,
    country_known: bool,
    state_known: bool,
    marine: bool,
}

impl Locality {
    fn of(record: &OccurrenceRecord, regions: &dyn RegionOracle) -> Self {
        let descriptor = record.locality_descriptor();
        let country = descriptor.country.map(canonical_country_name);
        let state_province = descriptor.state_province.map(canonical_subregion_name);
        let country_known = country.as_deref().is_some_and(|c| regions.region_known(c));
        let state_known = match (&country, &state_province) {
            (Some(c), Some(s)) => regions.subregion_known(c, s),
            _ => false,
        };
        let marine = descriptor.lacks_administrative_terms()
            || descriptor.water_body.is_some_and(is_marine_water_body);

        Self {
            country,
            state_province,
            country_known,
            state_known,
            marine,
        }
    }

    fn in_country(&self, regions: &dyn RegionOracle, point: &Coordinate) -> bool {
        self.country
            .as_deref()
            .is_some_and(|c| regions.point_in_region(c, point.latitude, point.longitude))
    }

    fn near_country(&self, regions: &dyn RegionOracle, point: &Coordinate, buffer_km: f64) -> bool {
        self.country
            .as_deref()
            .is_some_and(|c| regions.point_near_region(c, point.latitude, point.longitude, buffer_km))
    }

    fn in_state(&self, regions: &dyn RegionOracle, point: &Coordinate) -> bool {
        match (&self.country, &self.state_province) {
            (Some(c), Some(s)) => regions.point_in_subregion(c, s, point.latitude, point.longitude),
            _ => false,
        }
    }
}

fn transposed(alt: &CoordinateAlternative, comment: String) -> AmendmentOutcome {
    AmendmentOutcome::transposed(
        [
            (LATITUDE, degrees_text(alt.coordinate.latitude)),
            (LONGITUDE, degrees_text(alt.coordinate.longitude)),
        ],
        comment,
    )
}

/// Format a proposed degree value. Negative zero prints as "0".
fn degrees_text(degrees: f64) -> String {
    (degrees + 0.0).to_string()
}

/// Propose the ISO 3166-1 alpha-2 form of a country code that differs only
/// in case or surrounding whitespace.
pub fn country_code_standardized(record: &OccurrenceRecord) -> AmendmentOutcome {
    let Some(raw) = record.country_code.as_deref().filter(|c| !c.trim().is_empty()) else {
        return AmendmentOutcome::internal_prerequisites_not_met("No value provided for countryCode.");
    };

    if is_iso_alpha2_code(raw) {
        return AmendmentOutcome::no_change(format!("{} is already an ISO 3166-1 alpha-2 code.", raw));
    }

    let normalized = raw.trim().to_uppercase();
    if is_iso_alpha2_code(&normalized) {
        AmendmentOutcome::amended(
            [(COUNTRY_CODE, normalized.clone())],
            format!("Standardized countryCode {:?} to {}.", raw, normalized),
        )
    } else {
        AmendmentOutcome::not_amended(format!(
            "{:?} can't be matched to an ISO 3166-1 alpha-2 code.",
            raw
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amendment::{AmendmentState, Transform};
    use crate::geocode::{GeocodeCandidate, StaticGeocoder};
    use crate::region::{Polygon, PolygonRegionOracle};

    fn uganda() -> PolygonRegionOracle {
        PolygonRegionOracle::new()
            .with_country("Uganda", vec![Polygon::rectangle(-1.5, 29.5, 4.2, 35.0)])
            .with_subregion("Uganda", "Central", vec![Polygon::rectangle(-1.0, 31.0, 1.5, 33.0)])
            .with_land(vec![Polygon::rectangle(-35.0, -20.0, 37.0, 52.0)])
    }

    fn engine(geocoder: StaticGeocoder) -> AmendmentEngine {
        AmendmentEngine::new(uganda(), geocoder)
    }

    fn kampala_candidate() -> GeocodeCandidate {
        GeocodeCandidate::new(1.37, 32.40, 90.0, "CENTRAL REGION")
    }

    // ===== fill_missing =====

    #[test]
    fn test_fill_latitude() {
        let record = OccurrenceRecord::new().with_country("Uganda").with_longitude("32.29");
        let outcome = engine(StaticGeocoder::new(vec![kampala_candidate()])).fill_missing(&record);
        assert_eq!(outcome.state(), AmendmentState::FilledIn);
        assert_eq!(outcome.change(LATITUDE), Some("1.37"));
        assert_eq!(outcome.changes().len(), 1);
    }

    #[test]
    fn test_fill_longitude() {
        let record = OccurrenceRecord::new().with_country("Uganda").with_latitude("1.30");
        let outcome = engine(StaticGeocoder::new(vec![kampala_candidate()])).fill_missing(&record);
        assert_eq!(outcome.state(), AmendmentState::FilledIn);
        assert_eq!(outcome.change(LONGITUDE), Some("32.4"));
    }

    #[test]
    fn test_fill_longitude_too_far() {
        let record = OccurrenceRecord::new().with_country("Uganda").with_latitude("3.0");
        let outcome = engine(StaticGeocoder::new(vec![kampala_candidate()])).fill_missing(&record);
        assert_eq!(outcome.state(), AmendmentState::ExternalPrerequisitesNotMet);
    }

    #[test]
    fn test_fill_both() {
        let record = OccurrenceRecord::new().with_country("Uganda").with_locality("Kampala");
        let outcome = engine(StaticGeocoder::new(vec![kampala_candidate()])).fill_missing(&record);
        assert_eq!(outcome.state(), AmendmentState::FilledIn);
        let keys: Vec<&str> = outcome.changes().keys().map(String::as_str).collect();
        assert_eq!(keys, [LATITUDE, LONGITUDE]);
    }

    #[test]
    fn test_fill_keeps_non_numeric_values() {
        let record = OccurrenceRecord::new().with_coordinates("unknown", "n/a");
        let outcome = engine(StaticGeocoder::new(vec![kampala_candidate()])).fill_missing(&record);
        assert_eq!(outcome.state(), AmendmentState::NoChange);
        assert!(outcome.changes().is_empty());

        let record = OccurrenceRecord::new()
            .with_country("Uganda")
            .with_coordinates("abc", "32.40");
        let outcome = engine(StaticGeocoder::new(vec![kampala_candidate()])).fill_missing(&record);
        assert_eq!(outcome.state(), AmendmentState::NoChange);
        assert!(outcome.changes().is_empty());
    }

    #[test]
    fn test_fill_other_axis_non_numeric() {
        let record = OccurrenceRecord::new().with_country("Uganda").with_latitude("north");
        let outcome = engine(StaticGeocoder::new(vec![kampala_candidate()])).fill_missing(&record);
        assert_eq!(outcome.state(), AmendmentState::InternalPrerequisitesNotMet);
        assert!(outcome.changes().is_empty());
    }

    #[test]
    fn test_fill_low_confidence() {
        let record = OccurrenceRecord::new().with_locality("Kampala");
        let geocoder = StaticGeocoder::new(vec![GeocodeCandidate::new(1.37, 32.40, 80.0, "x")]);
        let outcome = engine(geocoder).fill_missing(&record);
        assert_eq!(outcome.state(), AmendmentState::ExternalPrerequisitesNotMet);
    }

    #[test]
    fn test_fill_populated_no_change() {
        let record = OccurrenceRecord::new().with_coordinates("1.0", "32.0");
        let outcome = engine(StaticGeocoder::new(vec![kampala_candidate()])).fill_missing(&record);
        assert_eq!(outcome.state(), AmendmentState::NoChange);
        assert!(outcome.changes().is_empty());
    }

    #[test]
    fn test_fill_nothing_found() {
        let record = OccurrenceRecord::new().with_locality("Nowhere");
        let outcome = engine(StaticGeocoder::new(Vec::new())).fill_missing(&record);
        assert_eq!(outcome.state(), AmendmentState::ExternalPrerequisitesNotMet);
        assert_eq!(outcome.comments().len(), 1);

        let outcome = engine(StaticGeocoder::failing()).fill_missing(&record);
        assert_eq!(outcome.state(), AmendmentState::ExternalPrerequisitesNotMet);
        assert_eq!(outcome.comments().len(), 2);
    }

    // ===== coordinate_transposition =====

    #[test]
    fn test_transposition_consistent_short_circuit() {
        let geocoder = Arc::new(StaticGeocoder::new(vec![GeocodeCandidate::new(50.0, 50.0, 99.0, "x")]));
        let engine = AmendmentEngine::from_shared(Arc::new(uganda()), geocoder.clone());
        let record = OccurrenceRecord::new()
            .with_country("Uganda")
            .with_state_province("Central")
            .with_coordinates("0.5", "32.0");
        let outcome = engine.coordinate_transposition(&record);
        assert_eq!(outcome.state(), AmendmentState::NoChange);
        assert_eq!(geocoder.call_count(), 0);
    }

    #[test]
    fn test_transposition_swap_matches_candidate() {
        let record = OccurrenceRecord::new()
            .with_country("Uganda")
            .with_state_province("Central")
            .with_coordinates("32.29", "1.37");
        let outcome = engine(StaticGeocoder::new(vec![kampala_candidate()])).coordinate_transposition(&record);
        assert_eq!(outcome.state(), AmendmentState::Transposed);
        assert_eq!(outcome.change(LATITUDE), Some("1.37"));
        assert_eq!(outcome.change(LONGITUDE), Some("32.29"));
        assert!(outcome.comments().iter().any(|c| c.contains("swap latitude/longitude")));
    }

    #[test]
    fn test_transposition_original_near_candidate() {
        let record = OccurrenceRecord::new()
            .with_country("Uganda")
            .with_coordinates("1.37", "32.29");
        let outcome = engine(StaticGeocoder::new(vec![kampala_candidate()])).coordinate_transposition(&record);
        assert_eq!(outcome.state(), AmendmentState::NoChange);
    }

    #[test]
    fn test_transposition_no_alternative_near_candidate() {
        let record = OccurrenceRecord::new()
            .with_country("Uganda")
            .with_coordinates("20.0", "10.0");
        let outcome = engine(StaticGeocoder::new(vec![kampala_candidate()])).coordinate_transposition(&record);
        assert_eq!(outcome.state(), AmendmentState::NotAmended);
        assert_eq!(outcome.comments().len(), 2);
    }

    #[test]
    fn test_transposition_fallback_sign_flip() {
        let record = OccurrenceRecord::new()
            .with_country("Uganda")
            .with_state_province("Central")
            .with_coordinates("0.5", "-32.0");
        let outcome = engine(StaticGeocoder::new(Vec::new())).coordinate_transposition(&record);
        assert_eq!(outcome.state(), AmendmentState::Transposed);
        assert_eq!(outcome.change(LONGITUDE), Some("32"));
    }

    #[test]
    fn test_transposition_fallback_no_match() {
        let record = OccurrenceRecord::new()
            .with_country("Uganda")
            .with_state_province("Central")
            .with_coordinates("60.0", "-80.0");
        let outcome = engine(StaticGeocoder::failing()).coordinate_transposition(&record);
        assert_eq!(outcome.state(), AmendmentState::NotAmended);
        assert!(outcome.comments()[0].contains("could not be reached"));
    }

    #[test]
    fn test_transposition_unknown_region_no_change() {
        let record = OccurrenceRecord::new()
            .with_country("Freedonia")
            .with_coordinates("10.0", "10.0");
        let outcome = engine(StaticGeocoder::new(Vec::new())).coordinate_transposition(&record);
        assert_eq!(outcome.state(), AmendmentState::NoChange);
    }

    #[test]
    fn test_transposition_marine_off_land() {
        let record = OccurrenceRecord::new()
            .with_water_body("Pacific Ocean")
            .with_coordinates("0.0", "-150.0");
        let outcome = engine(StaticGeocoder::failing()).coordinate_transposition(&record);
        assert_eq!(outcome.state(), AmendmentState::NoChange);
    }

    #[test]
    fn test_transposition_marine_on_land_not_amended() {
        let record = OccurrenceRecord::new()
            .with_water_body("Indian Ocean")
            .with_coordinates("1.0", "32.0");
        let outcome = engine(StaticGeocoder::new(Vec::new())).coordinate_transposition(&record);
        assert_eq!(outcome.state(), AmendmentState::NotAmended);
    }

    #[test]
    fn test_transposition_missing_coordinate() {
        let record = OccurrenceRecord::new().with_latitude("1.0");
        let outcome = engine(StaticGeocoder::default()).coordinate_transposition(&record);
        assert_eq!(outcome.state(), AmendmentState::InternalPrerequisitesNotMet);

        let record = OccurrenceRecord::new().with_coordinates("1.0", "east");
        let outcome = engine(StaticGeocoder::default()).coordinate_transposition(&record);
        assert_eq!(outcome.state(), AmendmentState::InternalPrerequisitesNotMet);
    }

    // ===== country_code_standardized =====

    #[test]
    fn test_country_code_standardized() {
        let exact = OccurrenceRecord::new().with_country_code("UG");
        assert_eq!(country_code_standardized(&exact).state(), AmendmentState::NoChange);

        let lower = OccurrenceRecord::new().with_country_code(" ug ");
        let outcome = country_code_standardized(&lower);
        assert_eq!(outcome.state(), AmendmentState::Amended);
        assert_eq!(outcome.change(COUNTRY_CODE), Some("UG"));

        let bogus = OccurrenceRecord::new().with_country_code("Uganda");
        assert_eq!(country_code_standardized(&bogus).state(), AmendmentState::NotAmended);

        let empty = OccurrenceRecord::new().with_country_code("  ");
        assert_eq!(
            country_code_standardized(&empty).state(),
            AmendmentState::InternalPrerequisitesNotMet
        );
    }

    // ===== country_code_from_coordinates =====

    #[test]
    fn test_country_code_from_coordinates_filled_in() {
        let record = OccurrenceRecord::new()
            .with_coordinates("1.37", "32.29")
            .with_geodetic_datum("EPSG:4326");
        let outcome = engine(StaticGeocoder::default()).country_code_from_coordinates(&record);
        assert_eq!(outcome.state(), AmendmentState::FilledIn);
        assert_eq!(outcome.changes().len(), 1);
        assert_eq!(outcome.change(COUNTRY_CODE), Some("UG"));
        assert!(!outcome.comments()[0].is_empty());
    }

    #[test]
    fn test_country_code_from_coordinates_code_present() {
        let record = OccurrenceRecord::new()
            .with_country_code("US")
            .with_coordinates("1.37", "32.29");
        let outcome = engine(StaticGeocoder::default()).country_code_from_coordinates(&record);
        assert_eq!(outcome.state(), AmendmentState::InternalPrerequisitesNotMet);
        assert!(outcome.changes().is_empty());
    }

    #[test]
    fn test_country_code_from_coordinates_bad_coordinates() {
        let engine = engine(StaticGeocoder::default());
        for record in [
            OccurrenceRecord::new().with_latitude("1.37"),
            OccurrenceRecord::new().with_coordinates("north", "32.29"),
            OccurrenceRecord::new().with_coordinates("91", "32.29"),
        ] {
            assert_eq!(
                engine.country_code_from_coordinates(&record).state(),
                AmendmentState::InternalPrerequisitesNotMet
            );
        }
    }

    #[test]
    fn test_country_code_from_coordinates_datum_guard() {
        let engine = engine(StaticGeocoder::default());
        let nad27 = OccurrenceRecord::new()
            .with_coordinates("1.37", "32.29")
            .with_geodetic_datum("NAD27");
        let outcome = engine.country_code_from_coordinates(&nad27);
        assert_eq!(outcome.state(), AmendmentState::InternalPrerequisitesNotMet);
        assert!(outcome.comments()[0].contains("EPSG:4267"));

        let unknown = nad27.clone().with_geodetic_datum("local grid");
        assert_eq!(
            engine.country_code_from_coordinates(&unknown).state(),
            AmendmentState::InternalPrerequisitesNotMet
        );

        let nad83 = nad27.with_geodetic_datum("NAD83");
        assert_eq!(engine.country_code_from_coordinates(&nad83).state(), AmendmentState::FilledIn);
    }

    #[test]
    fn test_country_code_from_coordinates_no_country() {
        let record = OccurrenceRecord::new().with_coordinates("0.0", "-150.0");
        let outcome = engine(StaticGeocoder::default()).country_code_from_coordinates(&record);
        assert_eq!(outcome.state(), AmendmentState::NotAmended);
    }

    #[test]
    fn test_country_code_from_coordinates_ambiguous() {
        let regions = uganda().with_country("Kenya", vec![Polygon::rectangle(-4.7, 33.9, 5.0, 41.9)]);
        let record = OccurrenceRecord::new().with_coordinates("1.0", "34.5");
        let outcome = AmendmentEngine::new(regions, StaticGeocoder::default()).country_code_from_coordinates(&record);
        assert_eq!(outcome.state(), AmendmentState::NotAmended);
        assert!(outcome.comments()[0].contains("KENYA, UGANDA"));
    }

    #[test]
    fn test_country_code_from_coordinates_without_boundaries() {
        let record = OccurrenceRecord::new().with_coordinates("1.37", "32.29");
        let outcome = AmendmentEngine::new(PolygonRegionOracle::new(), StaticGeocoder::default())
            .country_code_from_coordinates(&record);
        assert_eq!(outcome.state(), AmendmentState::ExternalPrerequisitesNotMet);
        assert_eq!(outcome.comments().len(), 2);
    }

    #[test]
    fn test_transposed_zero_has_no_sign() {
        let alt = CoordinateAlternative {
            coordinate: Coordinate::new(-0.0, -32.29),
            transform: Transform::FlipBoth,
        };
        let outcome = transposed(&alt, "flipped".to_string());
        assert_eq!(outcome.change(LATITUDE), Some("0"));
        assert_eq!(outcome.change(LONGITUDE), Some("-32.29"));
        assert_eq!(degrees_text(-0.0), "0");
        assert_eq!(degrees_text(1.37), "1.37");
    }

    #[test]
    fn test_threshold_meters() {
        assert_eq!(EngineConfig::default().threshold_meters(), 20_000);
    }
}
