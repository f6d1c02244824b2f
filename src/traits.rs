//! Collaborator traits the listing map widget is composed from
//!
//! Each one is a seam a host can swap: where preferences live, how tiles and
//! markers are set up on the map, and how a listing's popup is rendered.

use crate::{
    core::{geo::LatLng, map::Map},
    data::listing::Listing,
    layers::marker::{Marker, MarkerOptions},
    ui::popup::PopupView,
    Result,
};
use async_trait::async_trait;

/// Async key-value lookups for the persisted map preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Last-known map center, if one was stored
    async fn center(&self) -> Result<Option<LatLng>>;

    /// Whether the dark basemap was chosen. Absent means light.
    async fn dark_theme(&self) -> Result<bool>;

    /// Persists the map center
    async fn set_center(&self, center: LatLng) -> Result<()>;

    /// Persists the theme flag
    async fn set_dark_theme(&self, dark: bool) -> Result<()>;
}

/// Tile-layer and marker setup against the map model
pub trait MapService: Send + Sync {
    /// Adds the basemap matching the theme flag
    fn add_tiles(&self, map: &mut Map, dark_mode: bool);

    /// Creates a marker without putting it on the map
    fn create_marker(&self, map: &mut Map, position: LatLng, options: MarkerOptions) -> Marker;

    /// Creates a marker and puts it on the map; returns its handle
    fn add_marker(
        &self,
        map: &mut Map,
        position: LatLng,
        options: MarkerOptions,
    ) -> crate::layers::marker::MarkerId {
        let marker = self.create_marker(map, position, options);
        let id = marker.id();
        map.add_marker(marker);
        id
    }
}

/// Factory producing the popup body shown for a listing's marker
pub trait PopupRenderer: Send + Sync {
    fn render(&self, listing: &Listing) -> PopupView;
}

impl<F> PopupRenderer for F
where
    F: Fn(&Listing) -> PopupView + Send + Sync,
{
    fn render(&self, listing: &Listing) -> PopupView {
        self(listing)
    }
}
