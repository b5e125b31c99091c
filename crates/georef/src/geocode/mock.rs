//! Static geocoder for tests and offline runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::oracle::{GeocodeCandidate, GeocodeOracle, GeocodeQuery, GeocodeResponse};

/// Geocoder that returns the same reply for every query.
///
/// `StaticGeocoder::new(Vec::new())` is the offline geocoder: every lookup
/// succeeds with no candidates.
pub struct StaticGeocoder {
    candidates: Vec<GeocodeCandidate>,
    fail: bool,
    calls: AtomicUsize,
}

impl StaticGeocoder {
    /// Reply with `candidates` to every query.
    pub fn new(candidates: Vec<GeocodeCandidate>) -> Self {
        Self {
            candidates,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A geocoder whose service is always unreachable.
    pub fn failing() -> Self {
        Self {
            candidates: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of queries answered so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Default for StaticGeocoder {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl GeocodeOracle for StaticGeocoder {
    fn query_candidates(&self, _query: &GeocodeQuery) -> GeocodeResponse {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            GeocodeResponse::failed()
        } else {
            GeocodeResponse::found(self.candidates.clone())
        }
    }

    fn name(&self) -> &str {
        "static"
    }
}
