//! Prelude module for common propmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use propmap::prelude::*;`

pub use crate::core::{
    config::{MapViewOptions, PropmapConfig, TimingConfig, WidgetOptions},
    geo::{LatLng, Point},
    map::Map,
    viewport::Viewport,
};

pub use crate::data::listing::{listings_from_json, Listing, PropertyType};

pub use crate::layers::{
    animation::EasingType,
    group::{ByCategory, LayerGroup, LayerGroupId},
    manager::LayerManager,
    marker::{Marker, MarkerIcon, MarkerId, MarkerOptions},
    tile::{TileLayer, TileTheme},
};

pub use crate::input::events::{InputEvent, MapEvent, MouseButton, WidgetEvent};

pub use crate::background::deferred::DeferredQueue;

pub use crate::services::{
    map_service::DefaultMapService,
    properties::{Listings, PropertyStore},
    storage::{JsonFilePreferenceStore, MemoryPreferenceStore},
};

pub use crate::traits::{MapService, PopupRenderer, PreferenceStore};

pub use crate::ui::{
    controls::{ControlPosition, ZoomControl},
    deep_link::DeepLink,
    popup::{ListingPopupRenderer, PopupView},
    widget::{MapWidget, PlacedMarker, WidgetState},
};

pub use crate::{MapError, Result};

// Fast hash maps keyed by small ids
pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use std::sync::Arc;
