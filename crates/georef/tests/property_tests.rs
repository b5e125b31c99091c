//! Property-based tests for georef.
//!
//! These tests use proptest to generate random coordinates and field text
//! and verify that rules and amendments keep their invariants.
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p georef --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p georef --test property_tests
//! ```

use proptest::prelude::*;

use georef::amendment::alternatives;
use georef::geodesy::{great_circle_distance_km, parse_decimal};
use georef::validation::coordinate_in_range;
use georef::{
    canonical_country_name, great_circle_distance_meters, AmendmentEngine, AmendmentState,
    Compliance, Coordinate, GeocodeCandidate, OccurrenceRecord, Polygon, PolygonRegionOracle,
    StaticGeocoder, ValidationState,
};

// =============================================================================
// Test Strategies
// =============================================================================

fn valid_latitude() -> impl Strategy<Value = f64> {
    -90.0f64..=90.0
}

fn valid_longitude() -> impl Strategy<Value = f64> {
    -180.0f64..=180.0
}

/// Any text with at least one visible character, numeric or not.
fn populated_field() -> impl Strategy<Value = String> {
    prop_oneof![
        valid_latitude().prop_map(|v| v.to_string()),
        "\\PC{0,4}[^\\s\\p{C}]\\PC{0,4}",
    ]
}

/// Text that is never a decimal number.
fn non_numeric() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z]{1,10}",
        "[0-9]{1,3}[NSEW]",
        "[0-9]{1,2}° ?[0-9]{1,2}'",
        Just("".to_string()),
        Just("   ".to_string()),
    ]
}

fn regions() -> PolygonRegionOracle {
    PolygonRegionOracle::new()
        .with_country("Uganda", vec![Polygon::rectangle(-1.5, 29.5, 4.2, 35.0)])
        .with_subregion("Uganda", "Central", vec![Polygon::rectangle(-1.0, 31.0, 1.5, 33.0)])
        .with_land(vec![Polygon::rectangle(-35.0, -20.0, 37.0, 52.0)])
}

// =============================================================================
// Range Check Properties
// =============================================================================

mod range_tests {
    use super::*;

    proptest! {
        /// Any numeric in-range coordinate is compliant.
        #[test]
        fn in_range_is_compliant(lat in valid_latitude(), lon in valid_longitude()) {
            let record = OccurrenceRecord::new().with_coordinates(lat.to_string(), lon.to_string());
            let outcome = coordinate_in_range(&record);
            prop_assert_eq!(outcome.compliance(), Some(Compliance::Compliant));
        }

        /// Any latitude beyond ±90 is not compliant.
        #[test]
        fn latitude_out_of_range(lat in 90.0001f64..1000.0, sign in prop::bool::ANY, lon in valid_longitude()) {
            let lat = if sign { lat } else { -lat };
            let record = OccurrenceRecord::new().with_coordinates(lat.to_string(), lon.to_string());
            let outcome = coordinate_in_range(&record);
            prop_assert_eq!(outcome.compliance(), Some(Compliance::NotCompliant));
            prop_assert!(outcome.comments().iter().any(|c| c.contains("latitude")));
        }

        /// Any longitude beyond ±180 is not compliant.
        #[test]
        fn longitude_out_of_range(lat in valid_latitude(), lon in 180.0001f64..1000.0) {
            let record = OccurrenceRecord::new().with_coordinates(lat.to_string(), (-lon).to_string());
            let outcome = coordinate_in_range(&record);
            prop_assert_eq!(outcome.compliance(), Some(Compliance::NotCompliant));
        }

        /// Non-numeric or blank text never yields a compliance value.
        #[test]
        fn non_numeric_is_prerequisite(text in non_numeric(), lon in valid_longitude()) {
            let record = OccurrenceRecord::new().with_coordinates(text, lon.to_string());
            let outcome = coordinate_in_range(&record);
            prop_assert_eq!(outcome.state(), ValidationState::InternalPrerequisitesNotMet);
            prop_assert_eq!(outcome.compliance(), None);
            prop_assert!(!outcome.comments().is_empty());
        }
    }
}

// =============================================================================
// Geodesy Properties
// =============================================================================

mod geodesy_tests {
    use super::*;

    proptest! {
        /// Distance from a point to itself is zero.
        #[test]
        fn distance_reflexive(lat in valid_latitude(), lon in valid_longitude()) {
            prop_assert_eq!(great_circle_distance_meters(lat, lon, lat, lon), 0);
            prop_assert_eq!(great_circle_distance_km(lat, lon, lat, lon), 0.0);
        }

        /// Distance is symmetric.
        #[test]
        fn distance_symmetric(
            lat1 in valid_latitude(), lon1 in valid_longitude(),
            lat2 in valid_latitude(), lon2 in valid_longitude(),
        ) {
            prop_assert_eq!(
                great_circle_distance_meters(lat1, lon1, lat2, lon2),
                great_circle_distance_meters(lat2, lon2, lat1, lon1)
            );
        }

        /// No two points are further apart than half the circumference.
        #[test]
        fn distance_bounded(
            lat1 in valid_latitude(), lon1 in valid_longitude(),
            lat2 in valid_latitude(), lon2 in valid_longitude(),
        ) {
            let d = great_circle_distance_meters(lat1, lon1, lat2, lon2);
            prop_assert!(d >= 0);
            prop_assert!(d <= 20_016_000);
        }

        /// Numbers round-trip through text.
        #[test]
        fn parse_decimal_round_trip(value in -1.0e6f64..1.0e6) {
            prop_assert_eq!(parse_decimal(&value.to_string()), Some(value));
        }

        /// Alternatives are always valid and never the original.
        #[test]
        fn alternatives_valid(lat in valid_latitude(), lon in valid_longitude()) {
            let original = Coordinate::new(lat, lon);
            let alts = alternatives(&original);
            prop_assert!(alts.len() <= 7);
            for alt in alts {
                prop_assert!(alt.coordinate.is_in_range());
                prop_assert_ne!(alt.coordinate, original);
            }
        }
    }
}

// =============================================================================
// Country Name Properties
// =============================================================================

mod country_name_tests {
    use super::*;

    proptest! {
        /// Canonicalization is idempotent.
        #[test]
        fn canonical_idempotent(name in "[A-Za-z .]{0,30}") {
            let once = canonical_country_name(&name);
            prop_assert_eq!(canonical_country_name(&once), once.clone());
        }

        /// Canonical names have no surrounding whitespace or lowercase letters.
        #[test]
        fn canonical_is_trimmed_upper(name in "\\s{0,3}[A-Za-z ]{0,20}\\s{0,3}") {
            let canonical = canonical_country_name(&name);
            prop_assert_eq!(canonical.trim(), canonical.as_str());
            prop_assert!(!canonical.chars().any(|c| c.is_lowercase()));
        }
    }
}

// =============================================================================
// Amendment Properties
// =============================================================================

mod amendment_tests {
    use super::*;

    proptest! {
        /// Fill-missing never touches a populated record.
        #[test]
        fn fill_missing_keeps_populated(
            lat in valid_latitude(), lon in valid_longitude(),
            cand_lat in valid_latitude(), cand_lon in valid_longitude(),
            confidence in 0.0f64..=100.0,
        ) {
            let geocoder = StaticGeocoder::new(vec![GeocodeCandidate::new(cand_lat, cand_lon, confidence, "x")]);
            let engine = AmendmentEngine::new(regions(), geocoder);
            let record = OccurrenceRecord::new()
                .with_country("Uganda")
                .with_coordinates(lat.to_string(), lon.to_string());
            let outcome = engine.fill_missing(&record);
            prop_assert_eq!(outcome.state(), AmendmentState::NoChange);
            prop_assert!(outcome.changes().is_empty());
        }

        /// Fill-missing never overwrites a populated field, even one that
        /// does not hold a number.
        #[test]
        fn fill_missing_keeps_any_populated_text(
            lat in populated_field(), lon in populated_field(),
            confidence in 0.0f64..=100.0,
        ) {
            let geocoder = StaticGeocoder::new(vec![GeocodeCandidate::new(1.37, 32.40, confidence, "x")]);
            let engine = AmendmentEngine::new(regions(), geocoder);
            let record = OccurrenceRecord::new()
                .with_country("Uganda")
                .with_coordinates(lat, lon);
            let outcome = engine.fill_missing(&record);
            prop_assert_eq!(outcome.state(), AmendmentState::NoChange);
            prop_assert!(outcome.changes().is_empty());
        }

        /// With one axis populated, only the other axis may be filled in.
        #[test]
        fn fill_missing_only_fills_blank_axis(lat in populated_field()) {
            let geocoder = StaticGeocoder::new(vec![GeocodeCandidate::new(1.37, 32.40, 95.0, "x")]);
            let engine = AmendmentEngine::new(regions(), geocoder);
            let record = OccurrenceRecord::new().with_country("Uganda").with_latitude(lat);
            let outcome = engine.fill_missing(&record);
            prop_assert!(outcome.change(georef::amendment::LATITUDE).is_none());
        }

        /// A point inside its stated country and state is never changed,
        /// whatever the geocoder says.
        #[test]
        fn consistent_point_short_circuits(
            lat in -0.99f64..1.49, lon in 31.01f64..32.99,
            cand_lat in valid_latitude(), cand_lon in valid_longitude(),
        ) {
            let geocoder = StaticGeocoder::new(vec![GeocodeCandidate::new(cand_lat, cand_lon, 99.0, "x")]);
            let engine = AmendmentEngine::new(regions(), geocoder);
            let record = OccurrenceRecord::new()
                .with_country("Uganda")
                .with_state_province("Central")
                .with_coordinates(lat.to_string(), lon.to_string());
            prop_assert_eq!(engine.coordinate_transposition(&record).state(), AmendmentState::NoChange);
        }

        /// Proposed changes only appear with a proposing state.
        #[test]
        fn changes_match_state(
            lat in valid_latitude(), lon in valid_longitude(),
            cand_lat in valid_latitude(), cand_lon in valid_longitude(),
        ) {
            let geocoder = StaticGeocoder::new(vec![GeocodeCandidate::new(cand_lat, cand_lon, 95.0, "x")]);
            let engine = AmendmentEngine::new(regions(), geocoder);
            let record = OccurrenceRecord::new()
                .with_country("Uganda")
                .with_state_province("Central")
                .with_coordinates(lat.to_string(), lon.to_string());
            let outcome = engine.coordinate_transposition(&record);
            prop_assert_eq!(outcome.state().proposes_changes(), !outcome.changes().is_empty());
            prop_assert!(!outcome.comments().is_empty());
        }

        /// A swapped coordinate whose swap lands on the geocoder match is
        /// transposed, and the comment names the swap.
        #[test]
        fn swapped_point_names_swap(lat in -0.99f64..1.49, lon in 31.01f64..32.99) {
            let geocoder = StaticGeocoder::new(vec![GeocodeCandidate::new(lat, lon, 95.0, "x")]);
            let engine = AmendmentEngine::new(regions(), geocoder);
            let record = OccurrenceRecord::new()
                .with_country("Uganda")
                .with_state_province("Central")
                .with_coordinates(lon.to_string(), lat.to_string());
            let outcome = engine.coordinate_transposition(&record);
            prop_assert_eq!(outcome.state(), AmendmentState::Transposed);
            prop_assert!(outcome.comments().iter().any(|c| c.contains("swap latitude/longitude")));
        }
    }
}
