use crate::core::geo::{LatLng, Point};
use crate::layers::marker::MarkerId;
use serde::{Deserialize, Serialize};

/// Input events a host forwards to the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Single click/tap at a container pixel
    Click {
        position: Point,
        button: MouseButton,
    },
    /// The host container changed size
    Resize { size: Point },
    /// Zoom control "+" pressed
    ZoomIn,
    /// Zoom control "-" pressed
    ZoomOut,
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Events emitted by the map model
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Map reported ready after construction
    Ready { center: LatLng, zoom: f64 },
    /// Primary-button click, already projected to a coordinate
    Click { lat_lng: LatLng, pixel: Point },
    /// Container size was recalculated
    Resized { size: Point },
    /// A marker popup was opened
    PopupOpen { marker: MarkerId },
}

/// Output events of the listing map widget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WidgetEvent {
    /// A click-to-place was accepted at this coordinate
    ClickedAt(LatLng),
}
