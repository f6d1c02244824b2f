use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Web Mercator projection constants
pub(crate) const EARTH_RADIUS: f64 = 6378137.0;
const MAX_LATITUDE: f64 = 85.0511287798;

/// A geographic point. Passed by copy, never mutated in place by the widget.
///
/// Equality is exact on both components; marker lookup by coordinate relies
/// on that, so only compare coordinates that came from the same source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Clamps latitude to the range Web Mercator can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Linear interpolation towards `other`; `t` is not clamped.
    pub fn lerp(&self, other: &LatLng, t: f64) -> LatLng {
        LatLng::new(
            self.lat + (other.lat - self.lat) * t,
            self.lng + (other.lng - self.lng) * t,
        )
    }

    /// Converts to Web Mercator projection (EPSG:3857)
    pub fn to_mercator(&self) -> Point {
        let lat = Self::clamp_lat(self.lat);
        let x = self.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;
        Point::new(x, y)
    }

    /// Creates LatLng from Web Mercator coordinates
    pub fn from_mercator(point: Point) -> Self {
        let lng = (point.x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        Self::new(lat, lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(8.947416086535465, 125.5451552207221);
        assert_eq!(coord.lat, 8.947416086535465);
        assert_eq!(coord.lng, 125.5451552207221);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_nan_is_not_valid() {
        assert!(!LatLng::new(f64::NAN, 125.0).is_valid());
        assert!(!LatLng::new(8.9, 181.0).is_valid());
    }

    #[test]
    fn test_mercator_round_trip_is_close() {
        let coord = LatLng::new(8.95, 125.56);
        let back = LatLng::from_mercator(coord.to_mercator());
        assert!((back.lat - coord.lat).abs() < 1e-9);
        assert!((back.lng - coord.lng).abs() < 1e-9);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(10.0, 20.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), LatLng::new(5.0, 10.0));
    }
}
