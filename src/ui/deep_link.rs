//! Startup deep links (`?lat=..&lng=..` or `?id=..`) that focus a marker

use crate::core::geo::LatLng;

/// Marker target read once from the page query string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeepLink {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Stable listing id; preferred over coordinates when present.
    pub listing_id: Option<String>,
}

impl DeepLink {
    /// Parses a query string, with or without the leading `?`.
    ///
    /// Non-numeric or non-finite coordinates are treated as absent.
    pub fn from_query(query: &str) -> Self {
        let mut link = DeepLink::default();

        let query = query.trim_start_matches('?');
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            match key.as_ref() {
                "lat" => link.lat = parse_coord(value),
                "lng" => link.lng = parse_coord(value),
                "id" if !value.is_empty() => link.listing_id = Some(value.to_string()),
                _ => {}
            }
        }

        link
    }

    pub fn coord(&self) -> Option<LatLng> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.coord().is_none() && self.listing_id.is_none()
    }
}

fn parse_coord(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_link() {
        let link = DeepLink::from_query("?lat=8.95&lng=125.56");
        assert_eq!(link.coord(), Some(LatLng::new(8.95, 125.56)));
        assert!(link.listing_id.is_none());
        assert!(!link.is_empty());
    }

    #[test]
    fn test_malformed_coordinates_are_absent() {
        let link = DeepLink::from_query("lat=abc&lng=125.56");
        assert_eq!(link.lat, None);
        assert_eq!(link.coord(), None);

        let link = DeepLink::from_query("lat=NaN&lng=inf");
        assert_eq!(link.coord(), None);
        assert!(link.is_empty());
    }

    #[test]
    fn test_listing_id_link() {
        let link = DeepLink::from_query("id=L-42&utm=x");
        assert_eq!(link.listing_id.as_deref(), Some("L-42"));
        assert!(!link.is_empty());
    }

    #[test]
    fn test_encoded_values_are_decoded() {
        let link = DeepLink::from_query("id=h%2D1");
        assert_eq!(link.listing_id.as_deref(), Some("h-1"));

        let link = DeepLink::from_query("lat=8%2E95&lng=125.56");
        assert_eq!(link.coord(), Some(LatLng::new(8.95, 125.56)));

        let link = DeepLink::from_query("?id=corner+shop%201");
        assert_eq!(link.listing_id.as_deref(), Some("corner shop 1"));
    }

    #[test]
    fn test_empty_query() {
        assert!(DeepLink::from_query("").is_empty());
        assert!(DeepLink::from_query("?").is_empty());
    }
}
