//! Region lookups against administrative and land boundaries.
//!
//! The engine only talks to boundaries through the [`RegionOracle`] trait.
//! [`PolygonRegionOracle`] is an in-memory implementation that can be loaded
//! from GeoJSON.
//!
//! Country names are canonicalized with [`canonical_country_name`] before
//! they reach an oracle.

mod names;
mod oracle;
mod polygon;

pub use names::{
    canonical_country_name, canonical_subregion_name, country_code_for_name, is_iso_alpha2_code,
    is_marine_water_body, iso_alpha2_codes, MARINE_TERMS, UNITED_STATES,
};
pub use oracle::RegionOracle;
pub use polygon::{Polygon, PolygonRegionOracle};
