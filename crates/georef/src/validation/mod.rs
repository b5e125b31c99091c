//! Validation of georeference fields.
//!
//! Rules report a [`ValidationOutcome`] and issue checks an [`IssueOutcome`];
//! none of them change the record.

mod outcome;
mod rules;

pub use outcome::{Compliance, Issue, IssueOutcome, ValidationOutcome, ValidationState};
pub use rules::{
    coordinate_in_range, coordinates_not_zero, country_code_standard, country_countrycode_consistent,
    country_found, country_is_consistent, data_generalizations_not_empty, geodetic_datum_known,
    max_depth_in_range, state_province_found, state_province_is_consistent,
    water_body_is_consistent, DEFAULT_MAX_DEPTH_METERS, DEFAULT_MIN_DEPTH_METERS,
};
