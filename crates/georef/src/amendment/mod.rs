//! Amendments: proposed corrections to georeference fields.
//!
//! [`AmendmentEngine::fill_missing`] proposes missing coordinates from a
//! geocoder. [`AmendmentEngine::coordinate_transposition`] detects
//! sign-flipped or swapped coordinates.
//! [`AmendmentEngine::country_code_from_coordinates`] fills in a missing
//! country code from boundary data. [`country_code_standardized`] normalizes
//! country codes. Proposals are returned as change maps; the
//! record itself is never modified.

mod alternatives;
mod engine;
mod outcome;

pub use alternatives::{alternatives, CoordinateAlternative, Transform};
pub use engine::{country_code_standardized, AmendmentEngine, EngineConfig, COUNTRY_CODE, LATITUDE, LONGITUDE};
pub use outcome::{AmendmentOutcome, AmendmentState, Changes};
