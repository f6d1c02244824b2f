pub mod controls;
pub mod deep_link;
pub mod popup;
pub mod widget;

pub use controls::{ControlPosition, ZoomControl};
pub use deep_link::DeepLink;
pub use popup::{ListingPopupRenderer, PopupView};
pub use widget::{MapWidget, PlacedMarker, WidgetState};
