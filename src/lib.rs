//! # propmap
//!
//! A headless, Leaflet-style map widget for property listings.
//!
//! The crate is split the way a small map engine is: a `core` map model
//! (viewport, fly-to animation, attached layers), `layers` for markers and
//! layer groups, `services` for the collaborators the widget talks to
//! (preference storage, the listing stream, tile and marker setup) and `ui`
//! for the [`MapWidget`] itself, which ties them together.

pub mod background;
pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod services;
pub mod traits;
pub mod ui;
pub mod prelude;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::{MapViewOptions, PropmapConfig, TimingConfig, WidgetOptions},
    geo::{LatLng, Point},
    map::Map,
    viewport::Viewport,
};

pub use data::listing::{Listing, PropertyType};

pub use layers::{
    group::{ByCategory, LayerGroup, LayerGroupId},
    marker::{Marker, MarkerIcon, MarkerId},
    tile::TileLayer,
};

pub use input::events::{InputEvent, WidgetEvent};

pub use services::{
    map_service::DefaultMapService,
    properties::PropertyStore,
    storage::{JsonFilePreferenceStore, MemoryPreferenceStore},
};

pub use traits::{MapService, PopupRenderer, PreferenceStore};

pub use ui::{
    deep_link::DeepLink,
    popup::{ListingPopupRenderer, PopupView},
    widget::{MapWidget, PlacedMarker, WidgetState},
};

/// Installs `env_logger` with `info` as the default filter.
///
/// `RUST_LOG` still overrides it. Calling this more than once is harmless.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unknown property type: {0}")]
    UnknownPropertyType(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Map is not initialized")]
    NotReady,
}

/// Error type alias for convenience
pub type Error = MapError;
