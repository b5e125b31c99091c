//! Fuzz target for coordinate text.
//!
//! Every rule and amendment must return an outcome for arbitrary latitude,
//! longitude and geodetic datum strings.

#![no_main]

use georef::{GeocodeCandidate, GeorefQc, OccurrenceRecord, Polygon, PolygonRegionOracle, StaticGeocoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let mut fields = input.splitn(3, '|');
    let lat = fields.next().unwrap_or_default();
    let lon = fields.next().unwrap_or(lat);
    let datum = fields.next().unwrap_or_default();

    let regions = PolygonRegionOracle::new()
        .with_country("Uganda", vec![Polygon::rectangle(-1.5, 29.5, 4.2, 35.0)])
        .with_land(vec![Polygon::rectangle(-35.0, -20.0, 37.0, 52.0)]);
    let geocoder = StaticGeocoder::new(vec![GeocodeCandidate::new(1.37, 32.40, 90.0, "fuzz")]);
    let qc = GeorefQc::new(regions, geocoder);

    let record = OccurrenceRecord::new()
        .with_country("Uganda")
        .with_water_body("Lake Victoria")
        .with_coordinates(lat, lon)
        .with_geodetic_datum(datum);
    let report = qc.assess(&record, 0);
    let _ = report.has_issues();
});
