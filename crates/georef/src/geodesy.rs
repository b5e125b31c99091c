//! Numeric geodesy helpers: coordinate parsing, range checks, great-circle
//! distances and geodetic datum recognition.
//!
//! Two haversine variants are provided and they are deliberately kept apart.
//! [`great_circle_distance_meters`] uses the CRC mean Earth radius and is the
//! one every oracle proximity comparison goes through.
//! [`great_circle_distance_km`] uses the GRS80 equatorial radius; thresholds
//! tuned against one do not carry over to the other.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Mean radius of the Earth in meters (CRC).
pub const EARTH_MEAN_RADIUS_METERS: f64 = 6_370_949.0;

/// Equatorial radius of the Earth in kilometers (GRS80).
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.138;

/// Territorial sea plus contiguous zone: 24 nautical miles in kilometers.
pub const NEARSHORE_BUFFER_KM: f64 = 44.448;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a coordinate from two text fields.
    ///
    /// Returns `None` if either field is blank or not a number. Range is not
    /// checked here; see [`Coordinate::is_in_range`].
    pub fn parse(latitude: &str, longitude: &str) -> Option<Self> {
        Some(Self::new(parse_decimal(latitude)?, parse_decimal(longitude)?))
    }

    /// Whether both axes are inside their valid ranges.
    pub fn is_in_range(&self) -> bool {
        range_valid(self.latitude, self.longitude)
    }

    /// Great-circle distance to another coordinate in whole meters.
    pub fn distance_meters_to(&self, other: &Coordinate) -> i64 {
        great_circle_distance_meters(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    /// A copy with the latitude sign inverted.
    pub fn with_latitude_negated(&self) -> Self {
        Self::new(-self.latitude, self.longitude)
    }

    /// A copy with the longitude sign inverted.
    pub fn with_longitude_negated(&self) -> Self {
        Self::new(self.latitude, -self.longitude)
    }

    /// A copy with latitude and longitude exchanged.
    pub fn swapped(&self) -> Self {
        Self::new(self.longitude, self.latitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// True iff |lat| <= 90 and |lon| <= 180.
pub fn range_valid(latitude: f64, longitude: f64) -> bool {
    latitude.abs() <= 90.0 && longitude.abs() <= 180.0
}

/// Haversine distance in meters on a sphere with the CRC mean radius,
/// rounded to the nearest meter.
pub fn great_circle_distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> i64 {
    let lat1r = lat1.to_radians();
    let lat2r = lat2.to_radians();
    let delta_lat = lat2r - lat1r;
    let delta_lon = lon2.to_radians() - lon1.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1r.cos() * lat2r.cos() * (delta_lon / 2.0).sin().powi(2);
    // Floating point can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_MEAN_RADIUS_METERS * c).round() as i64
}

/// Haversine distance in kilometers using the GRS80 equatorial radius,
/// rounded to 4 decimal places.
pub fn great_circle_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let rad_lat1 = lat1.to_radians();
    let rad_lat2 = lat2.to_radians();
    let a = rad_lat1 - rad_lat2;
    let b = lon1.to_radians() - lon2.to_radians();

    let h = (a / 2.0).sin().powi(2) + rad_lat1.cos() * rad_lat2.cos() * (b / 2.0).sin().powi(2);
    let s = 2.0 * h.clamp(0.0, 1.0).sqrt().asin() * EARTH_EQUATORIAL_RADIUS_KM;

    (s * 10_000.0).round() / 10_000.0
}

/// Parse a decimal number from a text field.
///
/// Blank input, non-numeric text and non-finite values (`NaN`, `inf`) all
/// yield `None`.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

static EPSG_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:urn:ogc:def:crs:)?EPSG:{1,2}\s*(\d+)$").expect("valid EPSG code pattern")
});

/// Geodetic datums recognized in `geodeticDatum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeodeticDatum {
    Wgs84,
    Nad83,
    Nad27,
    Etrs89,
    Ed50,
    Gda94,
    Gda2020,
    Agd66,
    Sirgas2000,
    Osgb36,
    Tokyo,
}

impl GeodeticDatum {
    pub const ALL: [GeodeticDatum; 11] = [
        GeodeticDatum::Wgs84,
        GeodeticDatum::Nad83,
        GeodeticDatum::Nad27,
        GeodeticDatum::Etrs89,
        GeodeticDatum::Ed50,
        GeodeticDatum::Gda94,
        GeodeticDatum::Gda2020,
        GeodeticDatum::Agd66,
        GeodeticDatum::Sirgas2000,
        GeodeticDatum::Osgb36,
        GeodeticDatum::Tokyo,
    ];

    /// EPSG code of the datum's geographic 2D coordinate reference system.
    pub fn epsg_code(&self) -> u32 {
        match self {
            GeodeticDatum::Wgs84 => 4326,
            GeodeticDatum::Nad83 => 4269,
            GeodeticDatum::Nad27 => 4267,
            GeodeticDatum::Etrs89 => 4258,
            GeodeticDatum::Ed50 => 4230,
            GeodeticDatum::Gda94 => 4283,
            GeodeticDatum::Gda2020 => 7844,
            GeodeticDatum::Agd66 => 4202,
            GeodeticDatum::Sirgas2000 => 4674,
            GeodeticDatum::Osgb36 => 4277,
            GeodeticDatum::Tokyo => 4301,
        }
    }

    /// Names the datum goes by, compared ignoring case, spaces and punctuation.
    fn names(&self) -> &'static [&'static str] {
        match self {
            GeodeticDatum::Wgs84 => &["WGS84", "World Geodetic System 1984"],
            GeodeticDatum::Nad83 => &["NAD83", "North American Datum 1983"],
            GeodeticDatum::Nad27 => &["NAD27", "North American Datum 1927"],
            GeodeticDatum::Etrs89 => &["ETRS89", "European Terrestrial Reference System 1989"],
            GeodeticDatum::Ed50 => &["ED50", "European Datum 1950"],
            GeodeticDatum::Gda94 => &["GDA94", "Geocentric Datum of Australia 1994"],
            GeodeticDatum::Gda2020 => &["GDA2020", "Geocentric Datum of Australia 2020"],
            GeodeticDatum::Agd66 => &["AGD66", "Australian Geodetic Datum 1966"],
            GeodeticDatum::Sirgas2000 => &["SIRGAS2000", "SIRGAS 2000"],
            GeodeticDatum::Osgb36 => &["OSGB36", "OSGB 1936", "Ordnance Survey Great Britain 1936"],
            GeodeticDatum::Tokyo => &["Tokyo", "Tokyo Datum"],
        }
    }

    /// Whether coordinates on this datum agree with WGS84 to within a few
    /// meters, so boundary lookups need no transformation.
    pub fn is_wgs84_compatible(&self) -> bool {
        matches!(
            self,
            GeodeticDatum::Wgs84
                | GeodeticDatum::Nad83
                | GeodeticDatum::Etrs89
                | GeodeticDatum::Gda94
                | GeodeticDatum::Gda2020
                | GeodeticDatum::Sirgas2000
        )
    }

    /// Recognize a datum from an EPSG code (`EPSG:4326`,
    /// `urn:ogc:def:crs:EPSG::4326`) or a common name (`WGS84`, `WGS 84`,
    /// `North American Datum 1983`).
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if let Some(captures) = EPSG_CODE.captures(trimmed) {
            let code: u32 = captures[1].parse().ok()?;
            return Self::ALL.into_iter().find(|d| d.epsg_code() == code);
        }

        let key = datum_key(trimmed);
        if key.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|d| d.names().iter().any(|name| datum_key(name) == key))
    }
}

impl std::fmt::Display for GeodeticDatum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (EPSG:{})", self.names()[0], self.epsg_code())
    }
}

fn datum_key(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
