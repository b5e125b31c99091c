//! Region oracle trait.

use crate::error::Result;

/// Answers containment and proximity questions about named administrative
/// regions and the land/sea boundary.
///
/// Country names passed in are expected to already be canonicalized with
/// [`canonical_country_name`](super::canonical_country_name); callers in this
/// crate always do so. Implementations must be thread-safe (Send + Sync) so
/// one oracle can serve many records concurrently.
pub trait RegionOracle: Send + Sync {
    /// Whether the country is present in the boundary data.
    fn region_known(&self, country: &str) -> bool;

    /// Whether the point lies inside the country.
    fn point_in_region(&self, country: &str, latitude: f64, longitude: f64) -> bool;

    /// Whether the point lies inside the country or within `buffer_km` of its
    /// boundary.
    fn point_near_region(&self, country: &str, latitude: f64, longitude: f64, buffer_km: f64) -> bool;

    /// Whether the state/province is known inside the country.
    fn subregion_known(&self, country: &str, subregion: &str) -> bool;

    /// Whether a state/province of this name is known in any country.
    ///
    /// Returns [`GeorefError::SubregionDataUnavailable`](crate::GeorefError::SubregionDataUnavailable)
    /// if no state/province boundaries are loaded.
    fn subregion_name_known(&self, subregion: &str) -> Result<bool>;

    /// Whether the point lies inside the state/province of the country.
    fn point_in_subregion(&self, country: &str, subregion: &str, latitude: f64, longitude: f64) -> bool;

    /// Whether the point lies inside the state/province or within
    /// `buffer_km` of its boundary.
    fn point_near_subregion(
        &self,
        country: &str,
        subregion: &str,
        latitude: f64,
        longitude: f64,
        buffer_km: f64,
    ) -> bool;

    /// Canonical names of every country whose boundary contains the point,
    /// sorted.
    ///
    /// Returns [`GeorefError::CountryDataUnavailable`](crate::GeorefError::CountryDataUnavailable)
    /// if no country boundaries are loaded.
    fn countries_containing(&self, latitude: f64, longitude: f64) -> Result<Vec<String>>;

    /// Whether the point falls on land.
    ///
    /// Returns [`GeorefError::LandDataUnavailable`](crate::GeorefError::LandDataUnavailable)
    /// if no land polygons are loaded.
    fn point_on_land(&self, latitude: f64, longitude: f64) -> Result<bool>;
}
