//! Occurrence records as flat text fields.
//!
//! Field names follow Darwin Core so that records deserialize directly from
//! CSV/TSV exports. All values are kept as the original text; numeric parsing
//! happens inside the rules.

use serde::{Deserialize, Serialize};

use crate::amendment::{Changes, COUNTRY_CODE, LATITUDE, LONGITUDE};
use crate::geodesy::{parse_decimal, Coordinate};

/// A single occurrence record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceRecord {
    #[serde(default, rename = "occurrenceID", skip_serializing_if = "Option::is_none")]
    pub occurrence_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, alias = "latitude", skip_serializing_if = "Option::is_none")]
    pub decimal_latitude: Option<String>,
    #[serde(default, alias = "longitude", skip_serializing_if = "Option::is_none")]
    pub decimal_longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geodetic_datum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_depth_in_meters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_generalizations: Option<String>,
}

/// The textual geography of a record. Blank values are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalityDescriptor<'a> {
    pub country: Option<&'a str>,
    pub state_province: Option<&'a str>,
    pub county: Option<&'a str>,
    pub water_body: Option<&'a str>,
    pub locality: Option<&'a str>,
}

impl LocalityDescriptor<'_> {
    /// Whether none of country, state/province and county are given.
    pub fn lacks_administrative_terms(&self) -> bool {
        self.country.is_none() && self.state_province.is_none() && self.county.is_none()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl OccurrenceRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.occurrence_id = Some(id.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    pub fn with_state_province(mut self, state_province: impl Into<String>) -> Self {
        self.state_province = Some(state_province.into());
        self
    }

    pub fn with_county(mut self, county: impl Into<String>) -> Self {
        self.county = Some(county.into());
        self
    }

    pub fn with_water_body(mut self, water_body: impl Into<String>) -> Self {
        self.water_body = Some(water_body.into());
        self
    }

    pub fn with_locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = Some(locality.into());
        self
    }

    pub fn with_latitude(mut self, latitude: impl Into<String>) -> Self {
        self.decimal_latitude = Some(latitude.into());
        self
    }

    pub fn with_longitude(mut self, longitude: impl Into<String>) -> Self {
        self.decimal_longitude = Some(longitude.into());
        self
    }

    /// Set both coordinate fields.
    pub fn with_coordinates(self, latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        self.with_latitude(latitude).with_longitude(longitude)
    }

    pub fn with_maximum_depth(mut self, depth: impl Into<String>) -> Self {
        self.maximum_depth_in_meters = Some(depth.into());
        self
    }

    pub fn with_geodetic_datum(mut self, datum: impl Into<String>) -> Self {
        self.geodetic_datum = Some(datum.into());
        self
    }

    pub fn with_data_generalizations(mut self, generalizations: impl Into<String>) -> Self {
        self.data_generalizations = Some(generalizations.into());
        self
    }

    pub fn country(&self) -> Option<&str> {
        non_blank(&self.country)
    }

    pub fn country_code(&self) -> Option<&str> {
        non_blank(&self.country_code)
    }

    pub fn state_province(&self) -> Option<&str> {
        non_blank(&self.state_province)
    }

    pub fn county(&self) -> Option<&str> {
        non_blank(&self.county)
    }

    pub fn water_body(&self) -> Option<&str> {
        non_blank(&self.water_body)
    }

    pub fn locality(&self) -> Option<&str> {
        non_blank(&self.locality)
    }

    /// Latitude text, if not blank.
    pub fn latitude_text(&self) -> Option<&str> {
        non_blank(&self.decimal_latitude)
    }

    /// Longitude text, if not blank.
    pub fn longitude_text(&self) -> Option<&str> {
        non_blank(&self.decimal_longitude)
    }

    pub fn maximum_depth_text(&self) -> Option<&str> {
        non_blank(&self.maximum_depth_in_meters)
    }

    pub fn geodetic_datum(&self) -> Option<&str> {
        non_blank(&self.geodetic_datum)
    }

    pub fn data_generalizations(&self) -> Option<&str> {
        non_blank(&self.data_generalizations)
    }

    /// Parsed latitude, if present and numeric.
    pub fn latitude(&self) -> Option<f64> {
        self.latitude_text().and_then(parse_decimal)
    }

    /// Parsed longitude, if present and numeric.
    pub fn longitude(&self) -> Option<f64> {
        self.longitude_text().and_then(parse_decimal)
    }

    /// Parsed coordinate, if both axes are present and numeric.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.latitude()?, self.longitude()?))
    }

    /// The record's textual geography.
    pub fn locality_descriptor(&self) -> LocalityDescriptor<'_> {
        LocalityDescriptor {
            country: self.country(),
            state_province: self.state_province(),
            county: self.county(),
            water_body: self.water_body(),
            locality: self.locality(),
        }
    }

    /// A copy with proposed changes applied. Unknown keys are ignored.
    pub fn with_changes_applied(&self, changes: &Changes) -> Self {
        let mut record = self.clone();
        for (field, value) in changes {
            match field.as_str() {
                LATITUDE => record.decimal_latitude = Some(value.clone()),
                LONGITUDE => record.decimal_longitude = Some(value.clone()),
                COUNTRY_CODE => record.country_code = Some(value.clone()),
                _ => {}
            }
        }
        record
    }

    /// A label for reports: the occurrence ID, or the row number if absent.
    pub fn label(&self, row: usize) -> String {
        self.occurrence_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("row {}", row + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_absent() {
        let record = OccurrenceRecord::new()
            .with_country("  ")
            .with_state_province("")
            .with_coordinates(" 1.37 ", "");
        assert_eq!(record.country(), None);
        assert_eq!(record.state_province(), None);
        assert_eq!(record.latitude(), Some(1.37));
        assert_eq!(record.longitude(), None);
        assert!(record.coordinate().is_none());
    }

    #[test]
    fn test_non_numeric_coordinate() {
        let record = OccurrenceRecord::new().with_coordinates("12N", "32.29");
        assert_eq!(record.latitude_text(), Some("12N"));
        assert_eq!(record.latitude(), None);
        assert!(record.coordinate().is_none());
    }

    #[test]
    fn test_descriptor_administrative_terms() {
        let marine = OccurrenceRecord::new().with_water_body("Pacific");
        assert!(marine.locality_descriptor().lacks_administrative_terms());
        let land = OccurrenceRecord::new().with_county("Douglas");
        assert!(!land.locality_descriptor().lacks_administrative_terms());
    }

    #[test]
    fn test_deserialize_darwin_core_json() {
        let json = r#"{"occurrenceID":"occ-1","country":"Uganda","stateProvince":"Central","decimalLatitude":"1.37","decimalLongitude":"32.29"}"#;
        let record: OccurrenceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.occurrence_id.as_deref(), Some("occ-1"));
        assert_eq!(record.state_province(), Some("Central"));
        assert_eq!(record.coordinate(), Some(Coordinate::new(1.37, 32.29)));
        assert_eq!(record.label(0), "occ-1");
        assert_eq!(OccurrenceRecord::new().label(4), "row 5");
    }

    #[test]
    fn test_deserialize_datum_and_generalizations() {
        let json = r#"{"geodeticDatum":"EPSG:4326","dataGeneralizations":" "}"#;
        let record: OccurrenceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.geodetic_datum(), Some("EPSG:4326"));
        assert_eq!(record.data_generalizations(), None);
    }

    #[test]
    fn test_apply_changes() {
        let mut changes = Changes::new();
        changes.insert(LATITUDE.to_string(), "1.37".to_string());
        changes.insert("unknownField".to_string(), "x".to_string());
        let record = OccurrenceRecord::new().with_longitude("32.29");
        let updated = record.with_changes_applied(&changes);
        assert_eq!(updated.coordinate(), Some(Coordinate::new(1.37, 32.29)));
        assert_eq!(record.latitude(), None);
    }
}
