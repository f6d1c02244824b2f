use crate::{
    core::{geo::LatLng, map::Map},
    layers::{
        marker::{Marker, MarkerOptions},
        tile::{TileLayer, TileTheme},
    },
    traits::MapService,
};

/// Standard basemaps and plain marker creation
#[derive(Debug, Clone, Default)]
pub struct DefaultMapService {
    light: Option<TileLayer>,
    dark: Option<TileLayer>,
}

impl DefaultMapService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the basemap used for one theme
    pub fn with_tiles(mut self, theme: TileTheme, layer: TileLayer) -> Self {
        match theme {
            TileTheme::Light => self.light = Some(layer),
            TileTheme::Dark => self.dark = Some(layer),
        }
        self
    }
}

impl MapService for DefaultMapService {
    fn add_tiles(&self, map: &mut Map, dark_mode: bool) {
        let theme = TileTheme::from_dark_flag(dark_mode);
        let layer = match theme {
            TileTheme::Light => self.light.clone(),
            TileTheme::Dark => self.dark.clone(),
        }
        .unwrap_or_else(|| TileLayer::for_theme(theme));

        map.add_tile_layer(layer);
    }

    fn create_marker(&self, map: &mut Map, position: LatLng, options: MarkerOptions) -> Marker {
        Marker::new(map.next_marker_id(), position, options)
    }
}
