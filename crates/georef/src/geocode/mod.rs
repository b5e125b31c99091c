//! Locality geocoding.
//!
//! [`GeocodeOracle`] turns locality text into ranked candidate coordinates.
//! [`GeoLocateClient`] calls the GEOLocate web service, [`CachedGeocoder`]
//! memoizes any oracle, and [`StaticGeocoder`] serves fixed replies.

mod cache;
mod geolocate;
mod mock;
mod oracle;

pub use cache::{CacheStats, CachedGeocoder, GeocodeCacheConfig};
pub use geolocate::{GeoLocateClient, GeoLocateConfig};
pub use mock::StaticGeocoder;
pub use oracle::{GeocodeCandidate, GeocodeOracle, GeocodeQuery, GeocodeResponse};
