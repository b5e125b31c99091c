//! In-memory polygon boundaries.
//!
//! A small [`RegionOracle`] backed by country, state/province and land
//! polygons held in memory. Boundaries can be built up programmatically or
//! loaded from GeoJSON feature collections such as the Natural Earth
//! `admin_0_countries`, `admin_1_states_provinces` and `land` layers.
//!
//! ```ignore
//! use georef::region::PolygonRegionOracle;
//!
//! let oracle = PolygonRegionOracle::new()
//!     .load_countries_geojson("ne_10m_admin_0_countries.geojson")?
//!     .load_subregions_geojson("ne_10m_admin_1_states_provinces.geojson")?
//!     .load_land_geojson("ne_10m_land.geojson")?;
//! ```
//!
//! Containment uses ray casting on lon/lat rings. Buffer distance is measured
//! from the point to each ring segment in a local equirectangular projection
//! scaled by the mean Earth radius, which is accurate well beyond the
//! nearshore buffer sizes the rules use.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{GeorefError, Result};
use crate::geodesy::EARTH_MEAN_RADIUS_METERS;

use super::names::{canonical_country_name, canonical_subregion_name};
use super::oracle::RegionOracle;

/// Kilometers per degree of arc on the mean-radius sphere.
const KM_PER_DEGREE: f64 = EARTH_MEAN_RADIUS_METERS / 1000.0 * std::f64::consts::PI / 180.0;

/// Property keys holding a country name in country layers.
const COUNTRY_NAME_KEYS: &[&str] = &["NAME", "name", "ADMIN", "admin"];

/// Property keys holding a state/province name in subregion layers.
const SUBREGION_NAME_KEYS: &[&str] = &["name", "NAME"];

/// Property keys holding the parent country in subregion layers.
const SUBREGION_COUNTRY_KEYS: &[&str] = &["admin", "ADMIN"];

/// A polygon with one exterior ring and optional holes, vertices as
/// `[longitude, latitude]`.
#[derive(Debug, Clone)]
pub struct Polygon {
    exterior: Vec<[f64; 2]>,
    holes: Vec<Vec<[f64; 2]>>,
    /// (min_lon, min_lat, max_lon, max_lat)
    bbox: (f64, f64, f64, f64),
}

impl Polygon {
    /// Create a polygon from an exterior ring of `[lon, lat]` vertices.
    pub fn new(exterior: Vec<[f64; 2]>) -> Self {
        Self::with_holes(exterior, Vec::new())
    }

    /// Create a polygon with holes.
    pub fn with_holes(exterior: Vec<[f64; 2]>, holes: Vec<Vec<[f64; 2]>>) -> Self {
        let bbox = bounding_box(&exterior);
        Self {
            exterior,
            holes,
            bbox,
        }
    }

    /// Axis-aligned lat/lon rectangle.
    pub fn rectangle(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(vec![
            [west, south],
            [east, south],
            [east, north],
            [west, north],
            [west, south],
        ])
    }

    /// Whether the point is strictly inside the exterior ring and outside
    /// every hole.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        let (min_lon, min_lat, max_lon, max_lat) = self.bbox;
        if longitude < min_lon || longitude > max_lon || latitude < min_lat || latitude > max_lat {
            return false;
        }
        ring_contains(&self.exterior, longitude, latitude)
            && !self
                .holes
                .iter()
                .any(|hole| ring_contains(hole, longitude, latitude))
    }

    /// Shortest distance in km from the point to any ring edge.
    pub fn boundary_distance_km(&self, latitude: f64, longitude: f64) -> f64 {
        std::iter::once(&self.exterior)
            .chain(self.holes.iter())
            .flat_map(|ring| ring.windows(2))
            .map(|edge| segment_distance_km(latitude, longitude, edge[0], edge[1]))
            .fold(f64::INFINITY, f64::min)
    }

    /// Inside, or within `buffer_km` of the boundary.
    pub fn is_near(&self, latitude: f64, longitude: f64, buffer_km: f64) -> bool {
        if self.contains(latitude, longitude) {
            return true;
        }
        // Cheap reject against the bounding box grown by the buffer.
        let lat_pad = buffer_km / KM_PER_DEGREE;
        let lon_pad = lat_pad / latitude.to_radians().cos().max(0.01);
        let (min_lon, min_lat, max_lon, max_lat) = self.bbox;
        let crosses_antimeridian = longitude - lon_pad < -180.0 || longitude + lon_pad > 180.0;
        if latitude < min_lat - lat_pad || latitude > max_lat + lat_pad {
            return false;
        }
        if !crosses_antimeridian && (longitude < min_lon - lon_pad || longitude > max_lon + lon_pad) {
            return false;
        }
        self.boundary_distance_km(latitude, longitude) <= buffer_km
    }
}

/// A [`RegionOracle`] over in-memory polygons.
#[derive(Debug, Clone, Default)]
pub struct PolygonRegionOracle {
    /// Canonical country name → polygons.
    countries: HashMap<String, Vec<Polygon>>,
    /// (canonical country, canonical subregion) → polygons.
    subregions: HashMap<(String, String), Vec<Polygon>>,
    /// Land polygons, if loaded.
    land: Option<Vec<Polygon>>,
}

impl PolygonRegionOracle {
    /// Create an empty oracle with no regions and no land data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or extend) a country.
    pub fn with_country(mut self, name: &str, polygons: Vec<Polygon>) -> Self {
        self.add_country(name, polygons);
        self
    }

    /// Add (or extend) a state/province of a country.
    pub fn with_subregion(mut self, country: &str, name: &str, polygons: Vec<Polygon>) -> Self {
        self.add_subregion(country, name, polygons);
        self
    }

    /// Add land polygons.
    pub fn with_land(mut self, polygons: Vec<Polygon>) -> Self {
        self.land.get_or_insert_with(Vec::new).extend(polygons);
        self
    }

    fn add_country(&mut self, name: &str, polygons: Vec<Polygon>) {
        self.countries
            .entry(canonical_country_name(name))
            .or_default()
            .extend(polygons);
    }

    fn add_subregion(&mut self, country: &str, name: &str, polygons: Vec<Polygon>) {
        self.subregions
            .entry((canonical_country_name(country), canonical_subregion_name(name)))
            .or_default()
            .extend(polygons);
    }

    /// Load country polygons from a GeoJSON feature collection.
    ///
    /// The country name is read from the first of `NAME`, `name`, `ADMIN`,
    /// `admin` present on each feature; features without one are skipped.
    pub fn load_countries_geojson(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let features = read_feature_collection(path.as_ref())?;
        let mut loaded = 0;
        for feature in features {
            if let Some(name) = first_string(&feature.properties, COUNTRY_NAME_KEYS) {
                self.add_country(&name, feature.polygons);
                loaded += 1;
            }
        }
        debug!(path = %path.as_ref().display(), features = loaded, "loaded country boundaries");
        Ok(self)
    }

    /// Load state/province polygons from a GeoJSON feature collection.
    ///
    /// Each feature needs a subregion name (`name`/`NAME`) and its country
    /// (`admin`/`ADMIN`).
    pub fn load_subregions_geojson(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let features = read_feature_collection(path.as_ref())?;
        let mut loaded = 0;
        for feature in features {
            let name = first_string(&feature.properties, SUBREGION_NAME_KEYS);
            let country = first_string(&feature.properties, SUBREGION_COUNTRY_KEYS);
            if let (Some(name), Some(country)) = (name, country) {
                self.add_subregion(&country, &name, feature.polygons);
                loaded += 1;
            }
        }
        debug!(path = %path.as_ref().display(), features = loaded, "loaded state/province boundaries");
        Ok(self)
    }

    /// Load land polygons from a GeoJSON feature collection. All features
    /// are treated as land.
    pub fn load_land_geojson(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let features = read_feature_collection(path.as_ref())?;
        let polygons: Vec<Polygon> = features.into_iter().flat_map(|f| f.polygons).collect();
        debug!(path = %path.as_ref().display(), polygons = polygons.len(), "loaded land polygons");
        Ok(self.with_land(polygons))
    }

    /// Number of distinct countries loaded.
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    /// Number of distinct states/provinces loaded.
    pub fn subregion_count(&self) -> usize {
        self.subregions.len()
    }

    /// Whether land polygons are available.
    pub fn has_land_data(&self) -> bool {
        self.land.is_some()
    }

    fn country_polygons(&self, country: &str) -> Option<&Vec<Polygon>> {
        self.countries.get(&canonical_country_name(country))
    }

    fn subregion_polygons(&self, country: &str, subregion: &str) -> Option<&Vec<Polygon>> {
        self.subregions.get(&(
            canonical_country_name(country),
            canonical_subregion_name(subregion),
        ))
    }
}

impl RegionOracle for PolygonRegionOracle {
    fn region_known(&self, country: &str) -> bool {
        self.country_polygons(country).is_some()
    }

    fn point_in_region(&self, country: &str, latitude: f64, longitude: f64) -> bool {
        self.country_polygons(country)
            .is_some_and(|polys| polys.iter().any(|p| p.contains(latitude, longitude)))
    }

    fn point_near_region(&self, country: &str, latitude: f64, longitude: f64, buffer_km: f64) -> bool {
        self.country_polygons(country)
            .is_some_and(|polys| polys.iter().any(|p| p.is_near(latitude, longitude, buffer_km)))
    }

    fn subregion_known(&self, country: &str, subregion: &str) -> bool {
        self.subregion_polygons(country, subregion).is_some()
    }

    fn subregion_name_known(&self, subregion: &str) -> Result<bool> {
        if self.subregions.is_empty() {
            return Err(GeorefError::SubregionDataUnavailable);
        }
        let key = canonical_subregion_name(subregion);
        Ok(self.subregions.keys().any(|(_, name)| *name == key))
    }

    fn point_in_subregion(&self, country: &str, subregion: &str, latitude: f64, longitude: f64) -> bool {
        self.subregion_polygons(country, subregion)
            .is_some_and(|polys| polys.iter().any(|p| p.contains(latitude, longitude)))
    }

    fn point_near_subregion(
        &self,
        country: &str,
        subregion: &str,
        latitude: f64,
        longitude: f64,
        buffer_km: f64,
    ) -> bool {
        self.subregion_polygons(country, subregion)
            .is_some_and(|polys| polys.iter().any(|p| p.is_near(latitude, longitude, buffer_km)))
    }

    fn countries_containing(&self, latitude: f64, longitude: f64) -> Result<Vec<String>> {
        if self.countries.is_empty() {
            return Err(GeorefError::CountryDataUnavailable);
        }
        let mut names: Vec<String> = self
            .countries
            .iter()
            .filter(|(_, polys)| polys.iter().any(|p| p.contains(latitude, longitude)))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    fn point_on_land(&self, latitude: f64, longitude: f64) -> Result<bool> {
        let land = self.land.as_ref().ok_or(GeorefError::LandDataUnavailable)?;
        Ok(land.iter().any(|p| p.contains(latitude, longitude)))
    }
}

/// A GeoJSON feature reduced to its properties and polygons.
struct Feature {
    properties: Map<String, Value>,
    polygons: Vec<Polygon>,
}

fn read_feature_collection(path: &Path) -> Result<Vec<Feature>> {
    let text = fs::read_to_string(path).map_err(|e| GeorefError::io(path, e))?;
    let root: Value = serde_json::from_str(&text)?;
    parse_feature_collection(&root)
}

fn parse_feature_collection(root: &Value) -> Result<Vec<Feature>> {
    let features = root
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| GeorefError::BoundaryData("expected a FeatureCollection".to_string()))?;

    let mut parsed = Vec::with_capacity(features.len());
    for feature in features {
        let properties = feature
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let Some(geometry) = feature.get("geometry").filter(|g| !g.is_null()) else {
            continue;
        };
        let polygons = parse_geometry(geometry)?;
        parsed.push(Feature {
            properties,
            polygons,
        });
    }
    Ok(parsed)
}

fn parse_geometry(geometry: &Value) -> Result<Vec<Polygon>> {
    let kind = geometry.get("type").and_then(Value::as_str).unwrap_or_default();
    let coordinates = geometry
        .get("coordinates")
        .ok_or_else(|| GeorefError::BoundaryData("geometry without coordinates".to_string()))?;

    match kind {
        "Polygon" => Ok(vec![parse_polygon(coordinates)?]),
        "MultiPolygon" => coordinates
            .as_array()
            .ok_or_else(|| GeorefError::BoundaryData("MultiPolygon coordinates must be an array".to_string()))?
            .iter()
            .map(parse_polygon)
            .collect(),
        other => Err(GeorefError::BoundaryData(format!(
            "unsupported geometry type '{}'",
            other
        ))),
    }
}

fn parse_polygon(rings: &Value) -> Result<Polygon> {
    let rings = rings
        .as_array()
        .ok_or_else(|| GeorefError::BoundaryData("polygon rings must be an array".to_string()))?;
    let mut parsed: Vec<Vec<[f64; 2]>> = rings.iter().map(parse_ring).collect::<Result<_>>()?;
    if parsed.is_empty() {
        return Err(GeorefError::BoundaryData("polygon without rings".to_string()));
    }
    let exterior = parsed.remove(0);
    Ok(Polygon::with_holes(exterior, parsed))
}

fn parse_ring(ring: &Value) -> Result<Vec<[f64; 2]>> {
    ring.as_array()
        .ok_or_else(|| GeorefError::BoundaryData("ring must be an array".to_string()))?
        .iter()
        .map(|position| {
            let lon = position.get(0).and_then(Value::as_f64);
            let lat = position.get(1).and_then(Value::as_f64);
            match (lon, lat) {
                (Some(lon), Some(lat)) => Ok([lon, lat]),
                _ => Err(GeorefError::BoundaryData(format!(
                    "invalid position {}",
                    position
                ))),
            }
        })
        .collect()
}

fn first_string(properties: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| properties.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn bounding_box(ring: &[[f64; 2]]) -> (f64, f64, f64, f64) {
    ring.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(min_lon, min_lat, max_lon, max_lat), [lon, lat]| {
            (min_lon.min(*lon), min_lat.min(*lat), max_lon.max(*lon), max_lat.max(*lat))
        },
    )
}

/// Even-odd ray casting test.
fn ring_contains(ring: &[[f64; 2]], x: f64, y: f64) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Distance in km from a point to the segment `a`-`b` (both `[lon, lat]`).
fn segment_distance_km(latitude: f64, longitude: f64, a: [f64; 2], b: [f64; 2]) -> f64 {
    let cos_lat = latitude.to_radians().cos();
    let project = |p: [f64; 2]| {
        let mut dlon = p[0] - longitude;
        if dlon > 180.0 {
            dlon -= 360.0;
        } else if dlon < -180.0 {
            dlon += 360.0;
        }
        (dlon * cos_lat * KM_PER_DEGREE, (p[1] - latitude) * KM_PER_DEGREE)
    };

    let (ax, ay) = project(a);
    let (bx, by) = project(b);
    let (dx, dy) = (bx - ax, by - ay);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (-(ax * dx + ay * dy) / len2).clamp(0.0, 1.0)
    };
    let (px, py) = (ax + t * dx, ay + t * dy);
    (px * px + py * py).sqrt()
}
