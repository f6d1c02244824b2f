use crate::layers::base::{LayerProperties, LayerType};
use serde::{Deserialize, Serialize};

/// Basemap flavour, picked from the persisted theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TileTheme {
    #[default]
    Light,
    Dark,
}

impl TileTheme {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            TileTheme::Dark
        } else {
            TileTheme::Light
        }
    }
}

/// A raster basemap source. The map model keeps the template; fetching is the host's job.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    properties: LayerProperties,
    pub url_template: String,
    pub attribution: String,
    pub subdomains: Vec<String>,
    pub max_zoom: u8,
    pub theme: TileTheme,
}

impl TileLayer {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>, theme: TileTheme) -> Self {
        Self {
            properties: LayerProperties::new(name.into(), LayerType::Tile),
            url_template: url_template.into(),
            attribution: String::new(),
            subdomains: Vec::new(),
            max_zoom: 19,
            theme,
        }
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    pub fn with_subdomains(mut self, subdomains: &[&str]) -> Self {
        self.subdomains = subdomains.iter().map(|s| s.to_string()).collect();
        self
    }

    /// OpenStreetMap standard tiles
    pub fn openstreetmap() -> Self {
        Self::new(
            "OpenStreetMap",
            "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            TileTheme::Light,
        )
        .with_attribution("© OpenStreetMap contributors")
    }

    /// CARTO dark-matter tiles
    pub fn carto_dark() -> Self {
        Self::new(
            "CARTO Dark Matter",
            "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png",
            TileTheme::Dark,
        )
        .with_attribution("© OpenStreetMap contributors © CARTO")
        .with_subdomains(&["a", "b", "c", "d"])
    }

    pub fn for_theme(theme: TileTheme) -> Self {
        match theme {
            TileTheme::Light => Self::openstreetmap(),
            TileTheme::Dark => Self::carto_dark(),
        }
    }

    pub fn name(&self) -> &str {
        &self.properties.name
    }

    /// Expands the template for one tile. Subdomains rotate on `x + y`.
    pub fn tile_url(&self, x: u32, y: u32, z: u8) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let index = (x as usize + y as usize) % self.subdomains.len();
            self.subdomains[index].as_str()
        };

        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}
