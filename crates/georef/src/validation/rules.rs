//! Validation rules over occurrence records.
//!
//! Each rule is a plain function of the record fields (and, where needed, a
//! region oracle). Rules never call a geocoder and never fail: every input
//! problem is reported through the outcome state.

use crate::geodesy::{parse_decimal, Coordinate, GeodeticDatum, NEARSHORE_BUFFER_KM};
use crate::record::OccurrenceRecord;
use crate::region::{
    canonical_country_name, canonical_subregion_name, country_code_for_name, is_iso_alpha2_code,
    is_marine_water_body, RegionOracle,
};

use super::outcome::{IssueOutcome, ValidationOutcome};

/// Default shallowest accepted depth, in metres.
pub const DEFAULT_MIN_DEPTH_METERS: f64 = 0.0;

/// Default deepest accepted depth, in metres (just past the Challenger Deep).
pub const DEFAULT_MAX_DEPTH_METERS: f64 = 11_000.0;

const COORDINATE_EMPTY: &str = "Either latitude or longitude is empty.";
const COORDINATE_NON_NUMERIC: &str = "The value for either latitude or longitude is non numeric.";
const NEARSHORE: &str =
    "Coordinate is within 24 nautical miles of country boundary, could be a nearshore marine locality.";

/// The record's coordinate, or the prerequisite outcome explaining why
/// there is none.
fn require_coordinate(record: &OccurrenceRecord) -> Result<Coordinate, ValidationOutcome> {
    let (Some(lat), Some(lon)) = (record.latitude_text(), record.longitude_text()) else {
        return Err(ValidationOutcome::internal_prerequisites_not_met(COORDINATE_EMPTY));
    };
    Coordinate::parse(lat, lon)
        .ok_or_else(|| ValidationOutcome::internal_prerequisites_not_met(COORDINATE_NON_NUMERIC))
}

/// Check that latitude is within ±90 and longitude within ±180.
pub fn coordinate_in_range(record: &OccurrenceRecord) -> ValidationOutcome {
    let coordinate = match require_coordinate(record) {
        Ok(c) => c,
        Err(outcome) => return outcome,
    };

    let lat_ok = coordinate.latitude.abs() <= 90.0;
    let lon_ok = coordinate.longitude.abs() <= 180.0;
    match (lat_ok, lon_ok) {
        (true, true) => ValidationOutcome::compliant(
            "Latitude is within +/-90 and longitude is within +/-180.",
        ),
        (false, true) => ValidationOutcome::not_compliant("The original latitude is out of range."),
        (true, false) => ValidationOutcome::not_compliant("The original longitude is out of range."),
        (false, false) => ValidationOutcome::not_compliant("The original latitude is out of range.")
            .with_comment("The original longitude is out of range."),
    }
}

/// Check that the coordinate is inside the stated country, or close enough
/// to its boundary to be a nearshore marine locality.
pub fn country_is_consistent(record: &OccurrenceRecord, regions: &dyn RegionOracle) -> ValidationOutcome {
    let Some(country) = record.country() else {
        if record.water_body().is_some() {
            return ValidationOutcome::not_run(
                "No value provided for country and a water body is given; treating as a marine locality.",
            );
        }
        return ValidationOutcome::internal_prerequisites_not_met("No value provided for country.");
    };
    let coordinate = match require_coordinate(record) {
        Ok(c) => c,
        Err(outcome) => return outcome,
    };

    let canonical = canonical_country_name(country);
    let (lat, lon) = (coordinate.latitude, coordinate.longitude);
    if regions.point_in_region(&canonical, lat, lon) {
        ValidationOutcome::compliant(format!("Original coordinate is inside country ({}).", country))
    } else if regions.point_near_region(&canonical, lat, lon, NEARSHORE_BUFFER_KM) {
        ValidationOutcome::compliant(NEARSHORE)
    } else if !regions.region_known(&canonical) {
        ValidationOutcome::not_compliant(format!("Can't find country: {} in country name list.", country))
    } else {
        ValidationOutcome::not_compliant(format!(
            "Original coordinate is not inside country ({}).",
            country
        ))
    }
}

/// Check that the coordinate is inside the stated state/province.
pub fn state_province_is_consistent(
    record: &OccurrenceRecord,
    regions: &dyn RegionOracle,
) -> ValidationOutcome {
    let (Some(country), Some(state_province)) = (record.country(), record.state_province()) else {
        return ValidationOutcome::internal_prerequisites_not_met(
            "No value provided for either country or state.",
        );
    };
    let coordinate = match require_coordinate(record) {
        Ok(c) => c,
        Err(outcome) => return outcome,
    };

    let country_key = canonical_country_name(country);
    let state_key = canonical_subregion_name(state_province);
    if !regions.subregion_known(&country_key, &state_key) {
        return ValidationOutcome::not_compliant(format!(
            "Can't find state/province: {} in primary division name list.",
            state_province
        ));
    }

    if regions.point_in_subregion(&country_key, &state_key, coordinate.latitude, coordinate.longitude) {
        ValidationOutcome::compliant(format!(
            "Original coordinate is inside primary division ({}).",
            state_province
        ))
    } else {
        ValidationOutcome::not_compliant(format!(
            "Original coordinate is not inside primary division ({}).",
            state_province
        ))
    }
}

/// Check that a stated water body is an ocean or sea and that the
/// coordinate is off land.
pub fn water_body_is_consistent(record: &OccurrenceRecord, regions: &dyn RegionOracle) -> ValidationOutcome {
    let Some(water_body) = record.water_body() else {
        return ValidationOutcome::not_run("No value provided for water body.");
    };
    let coordinate = match require_coordinate(record) {
        Ok(c) => c,
        Err(outcome) => return outcome,
    };

    let on_land = match regions.point_on_land(coordinate.latitude, coordinate.longitude) {
        Ok(on_land) => on_land,
        Err(e) => {
            return ValidationOutcome::internal_prerequisites_not_met("Could not load land data.")
                .with_comment(e.to_string());
        }
    };

    if !is_marine_water_body(water_body) {
        return ValidationOutcome::not_compliant("Water body doesn't appear to be an ocean or a sea.");
    }
    if on_land {
        return ValidationOutcome::not_compliant("Coordinate is on land for a supposedly marine locality.");
    }

    let nearshore = record.country().is_some_and(|country| {
        regions.point_near_region(
            &canonical_country_name(country),
            coordinate.latitude,
            coordinate.longitude,
            NEARSHORE_BUFFER_KM,
        )
    });
    if nearshore {
        ValidationOutcome::compliant(NEARSHORE)
    } else {
        ValidationOutcome::compliant("Coordinate is further than 24 nautical miles of country boundary.")
    }
}

/// Check that the coordinate is not the (0, 0) placeholder.
pub fn coordinates_not_zero(record: &OccurrenceRecord) -> ValidationOutcome {
    let coordinate = match require_coordinate(record) {
        Ok(c) => c,
        Err(outcome) => return outcome,
    };

    if coordinate.latitude == 0.0 && coordinate.longitude == 0.0 {
        ValidationOutcome::not_compliant("Both latitude and longitude are zero.")
    } else {
        ValidationOutcome::compliant("At least one of latitude or longitude is non-zero.")
    }
}

/// Check that the country code is an ISO 3166-1 alpha-2 code.
pub fn country_code_standard(record: &OccurrenceRecord) -> ValidationOutcome {
    let Some(code) = record.country_code.as_deref().filter(|c| !c.trim().is_empty()) else {
        return ValidationOutcome::internal_prerequisites_not_met("No value provided for countryCode.");
    };

    if is_iso_alpha2_code(code) {
        ValidationOutcome::compliant(format!("{} is an ISO 3166-1 alpha-2 country code.", code))
    } else {
        ValidationOutcome::not_compliant(format!(
            "{} is not an ISO 3166-1 alpha-2 country code.",
            code
        ))
    }
}

/// Check that the stated country exists in the boundary data.
pub fn country_found(record: &OccurrenceRecord, regions: &dyn RegionOracle) -> ValidationOutcome {
    let Some(country) = record.country() else {
        return ValidationOutcome::internal_prerequisites_not_met("No value provided for country.");
    };

    if regions.region_known(&canonical_country_name(country)) {
        ValidationOutcome::compliant(format!("Country ({}) found in country name list.", country))
    } else {
        ValidationOutcome::not_compliant(format!("Can't find country: {} in country name list.", country))
    }
}

/// Check that the country name and the country code refer to the same
/// country. Values are compared as given, so surrounding whitespace on
/// either field fails the check.
pub fn country_countrycode_consistent(record: &OccurrenceRecord) -> ValidationOutcome {
    let country = record.country.as_deref().filter(|c| !c.trim().is_empty());
    let code = record.country_code.as_deref().filter(|c| !c.trim().is_empty());
    let (Some(country), Some(code)) = (country, code) else {
        return ValidationOutcome::internal_prerequisites_not_met(
            "No value provided for either country or countryCode.",
        );
    };

    if !is_iso_alpha2_code(code) {
        return ValidationOutcome::not_compliant(format!(
            "{:?} is not an ISO 3166-1 alpha-2 country code.",
            code
        ));
    }
    match country_code_for_name(country) {
        None => ValidationOutcome::not_compliant(format!(
            "Can't find country {:?} in the country name list.",
            country
        )),
        Some(expected) if expected == code => ValidationOutcome::compliant(format!(
            "Country ({}) and countryCode ({}) are consistent.",
            country, code
        )),
        Some(expected) => ValidationOutcome::not_compliant(format!(
            "countryCode {} does not match country {} ({}).",
            code, country, expected
        )),
    }
}

/// Check that the state/province is a known primary division of some
/// country.
pub fn state_province_found(record: &OccurrenceRecord, regions: &dyn RegionOracle) -> ValidationOutcome {
    let Some(state_province) = record.state_province() else {
        return ValidationOutcome::internal_prerequisites_not_met("No value provided for stateProvince.");
    };

    match regions.subregion_name_known(state_province) {
        Ok(true) => ValidationOutcome::compliant(format!(
            "State/province ({}) found in primary division name list.",
            state_province
        )),
        Ok(false) => ValidationOutcome::not_compliant(format!(
            "Can't find state/province: {} in primary division name list.",
            state_province
        )),
        Err(e) => ValidationOutcome::external_prerequisites_not_met(
            "Primary division name list is not available.",
        )
        .with_comment(e.to_string()),
    }
}

/// Check that the geodetic datum is a recognized datum name or EPSG code.
pub fn geodetic_datum_known(record: &OccurrenceRecord) -> ValidationOutcome {
    let Some(text) = record.geodetic_datum() else {
        return ValidationOutcome::internal_prerequisites_not_met("No value provided for geodeticDatum.");
    };

    match GeodeticDatum::parse(text) {
        Some(datum) => ValidationOutcome::compliant(format!("{} is recognized as {}.", text, datum)),
        None => ValidationOutcome::not_compliant(format!(
            "{:?} is not a recognized geodetic datum or EPSG code.",
            text
        )),
    }
}

/// Flag records whose data generalizations say the coordinates were made
/// less precise.
pub fn data_generalizations_not_empty(record: &OccurrenceRecord) -> IssueOutcome {
    match record.data_generalizations() {
        Some(text) => IssueOutcome::potential_problem(format!(
            "dataGeneralizations is not empty ({}); the georeference may have been generalized.",
            text
        )),
        None => IssueOutcome::not_problem("dataGeneralizations is empty."),
    }
}

/// Check that the maximum depth lies within `[min, max]` metres. A missing
/// bound is unbounded on that side.
pub fn max_depth_in_range(
    record: &OccurrenceRecord,
    min_meters: Option<f64>,
    max_meters: Option<f64>,
) -> ValidationOutcome {
    let Some(text) = record.maximum_depth_text() else {
        return ValidationOutcome::internal_prerequisites_not_met(
            "No value provided for maximumDepthInMeters.",
        );
    };
    let Some(depth) = parse_decimal(text) else {
        return ValidationOutcome::internal_prerequisites_not_met(
            "The value for maximumDepthInMeters is non numeric.",
        );
    };

    let above_min = min_meters.is_none_or(|min| depth >= min);
    let below_max = max_meters.is_none_or(|max| depth <= max);
    if above_min && below_max {
        ValidationOutcome::compliant(format!("Maximum depth {} m is within range.", depth))
    } else {
        ValidationOutcome::not_compliant(format!(
            "Maximum depth {} m is outside the range {} to {} m.",
            depth,
            min_meters.map_or("-inf".to_string(), |m| m.to_string()),
            max_meters.map_or("inf".to_string(), |m| m.to_string()),
        ))
    }
}
