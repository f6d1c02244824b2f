pub mod animation;
pub mod base;
pub mod group;
pub mod manager;
pub mod marker;
pub mod tile;

pub use group::{ByCategory, LayerGroup, LayerGroupId};
pub use manager::LayerManager;
pub use marker::{Marker, MarkerIcon, MarkerId, MarkerOptions};
pub use tile::{TileLayer, TileTheme};
