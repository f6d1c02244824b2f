//! Core constants for the listing map.
//! Keeping them in a single place makes it easier to tweak widget-wide magic numbers.

use crate::core::geo::LatLng;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Center used when no last-known center has been persisted.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 8.947416086535465,
    lng: 125.5451552207221,
};

/// Zoom the map is created at.
pub const INITIAL_ZOOM: f64 = 18.0;

/// Users cannot zoom out past street level.
pub const MIN_ZOOM: f64 = 16.0;

/// Upper zoom limit; fly-to targets this level.
pub const MAX_ZOOM: f64 = 19.0;

/// Zoom used by `set_center` and marker lookups.
pub const FLY_TO_ZOOM: f64 = 19.0;

/// Duration of the animated fly-to transition.
pub const FLY_DURATION_MS: u64 = 750;

/// Delay between a marker fly-to and opening its popup.
pub const POPUP_OPEN_DELAY_MS: u64 = 1000;

/// Delay between the map becoming ready and recalculating its container size.
pub const INVALIDATE_SIZE_DELAY_MS: u64 = 1000;

/// Container size assumed until the host reports a real one.
pub const DEFAULT_CONTAINER_SIZE: (f64, f64) = (1024.0, 768.0);

/// Base path marker icon assets are served from.
pub const MARKER_ASSET_BASE: &str = "assets/markers";

/// Icon used for pending markers and unknown categories.
pub const DEFAULT_MARKER_FILE: &str = "default-marker.svg";

/// Shadow image shared by every marker icon.
pub const MARKER_SHADOW_FILE: &str = "marker-shadow.png";

/// Marker icon size.
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);

/// Anchor inside the icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 41);

/// Popup offset relative to the icon anchor.
pub const MARKER_POPUP_ANCHOR: (i32, i32) = (1, -34);

/// Shadow image size.
pub const MARKER_SHADOW_SIZE: (u32, u32) = (41, 41);

/// Shadow anchor in pixel coords.
pub const MARKER_SHADOW_ANCHOR: (u32, u32) = (12, 41);

/// Preference key holding the last-known map center.
pub const CENTER_KEY: &str = "map.center";

/// Preference key holding the dark-theme flag.
pub const THEME_KEY: &str = "map.dark_theme";
