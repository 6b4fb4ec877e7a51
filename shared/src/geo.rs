use serde::{Deserialize, Serialize};

use crate::error::InterpolationError;

/// A WGS84 position. Travels over the wire as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn interpolate(self, other: Self, t: f64) -> Self {
        Self {
            lon: self.lon + (other.lon - self.lon) * t,
            lat: self.lat + (other.lat - self.lat) * t,
        }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.lon, point.lat]
    }
}

/// Evenly spaced points from `start` to `end`, both included.
///
/// Longitude and latitude are interpolated independently (planar), which is
/// accurate enough along a single street. A count of one yields just `start`;
/// zero is rejected.
pub fn interpolate(
    start: GeoPoint,
    end: GeoPoint,
    num_points: usize,
) -> Result<Vec<GeoPoint>, InterpolationError> {
    match num_points {
        0 => Err(InterpolationError::InvalidPointCount(0)),
        1 => Ok(vec![start]),
        n => {
            let segments = (n - 1) as f64;
            let mut points: Vec<GeoPoint> = (0..n)
                .map(|i| start.interpolate(end, i as f64 / segments))
                .collect();
            if let Some(last) = points.last_mut() {
                *last = end;
            }
            tracing::debug!(num_points = n, "interpolated street points");
            Ok(points)
        }
    }
}

/// Parses `"lon,lat"` as typed on a command line or in a form field.
pub fn parse_lon_lat(value: &str) -> Option<GeoPoint> {
    let (lon, lat) = value.split_once(',')?;
    let lon = lon.trim().parse::<f64>().ok()?;
    let lat = lat.trim().parse::<f64>().ok()?;
    Some(GeoPoint { lon, lat })
}
