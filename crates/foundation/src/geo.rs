use serde::{Deserialize, Serialize};

pub const MIN_LAT_DEG: f64 = -90.0;
pub const MAX_LAT_DEG: f64 = 90.0;
pub const MIN_LON_DEG: f64 = -180.0;
pub const MAX_LON_DEG: f64 = 180.0;

/// Geographic position in decimal degrees (WGS84).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPoint {
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// Builds a point, rejecting non-finite or out-of-range coordinates.
    pub fn checked(lat_deg: f64, lon_deg: f64) -> Result<Self, String> {
        if !lat_deg.is_finite() || !(MIN_LAT_DEG..=MAX_LAT_DEG).contains(&lat_deg) {
            return Err(format!("latitude {lat_deg} outside [-90, 90]"));
        }
        if !lon_deg.is_finite() || !(MIN_LON_DEG..=MAX_LON_DEG).contains(&lon_deg) {
            return Err(format!("longitude {lon_deg} outside [-180, 180]"));
        }
        Ok(Self::new(lat_deg, lon_deg))
    }

    /// `[lon, lat]` order, as consumed by map renderers and GeoJSON.
    pub fn lon_lat(&self) -> [f64; 2] {
        [self.lon_deg, self.lat_deg]
    }
}

/// Arithmetic mean of latitudes and longitudes.
///
/// Plain degree averaging: good enough to center a map on a country, not a
/// true spherical centroid (it misbehaves across the antimeridian).
pub fn centroid(points: impl IntoIterator<Item = GeoPoint>) -> Option<GeoPoint> {
    let mut sum_lat = 0.0;
    let mut sum_lon = 0.0;
    let mut n = 0usize;
    for p in points {
        sum_lat += p.lat_deg;
        sum_lon += p.lon_deg;
        n += 1;
    }
    if n == 0 {
        return None;
    }
    Some(GeoPoint::new(sum_lat / n as f64, sum_lon / n as f64))
}
