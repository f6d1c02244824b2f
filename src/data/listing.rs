//! Real-estate listings as published by the properties service

use crate::{core::geo::LatLng, MapError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Closed set of listing categories. Each one gets its own marker icon and layer group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Residential,
    Commercial,
    Industrial,
    Land,
}

impl PropertyType {
    /// Every category, in ordinal order.
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Residential,
        PropertyType::Commercial,
        PropertyType::Industrial,
        PropertyType::Land,
    ];

    pub fn index(self) -> usize {
        match self {
            PropertyType::Residential => 0,
            PropertyType::Commercial => 1,
            PropertyType::Industrial => 2,
            PropertyType::Land => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::Residential => "residential",
            PropertyType::Commercial => "commercial",
            PropertyType::Industrial => "industrial",
            PropertyType::Land => "land",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        PropertyType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| MapError::UnknownPropertyType(s.to_string()))
    }
}

/// A listing record. The widget only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Listings without a position are never placed on the map.
    #[serde(default)]
    pub position: Option<LatLng>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl Listing {
    pub fn new(id: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            property_type,
            position: None,
            address: None,
            price: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_position(mut self, position: LatLng) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

/// Parses a JSON array of listings.
pub fn listings_from_json(json: &str) -> crate::Result<Vec<Listing>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_ordinals_are_dense() {
        for (i, kind) in PropertyType::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_property_type_parsing() {
        assert_eq!("residential".parse::<PropertyType>().unwrap(), PropertyType::Residential);
        assert_eq!(" Land ".parse::<PropertyType>().unwrap(), PropertyType::Land);
        assert!(matches!(
            "castle".parse::<PropertyType>(),
            Err(MapError::UnknownPropertyType(name)) if name == "castle"
        ));
    }

    #[test]
    fn test_listing_json_shape() {
        let listings = listings_from_json(
            r#"[
                {"id": "a", "title": "Lot 4", "type": "land", "position": {"lat": 8.94, "lng": 125.54}},
                {"id": "b", "type": "commercial", "price": 1200000.0}
            ]"#,
        )
        .unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].property_type, PropertyType::Land);
        assert_eq!(listings[0].position, Some(LatLng::new(8.94, 125.54)));
        assert_eq!(listings[1].position, None);
        assert_eq!(listings[1].title, "");
        assert_eq!(listings[1].price, Some(1200000.0));
    }
}
