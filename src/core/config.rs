//! Configuration for the listing map widget
//!
//! Every section has a `Default` matching the constants in
//! [`crate::core::constants`], and every section deserializes from JSON so a
//! host can ship a partial config file and let the rest fall back.

use crate::core::constants::{
    DEFAULT_CENTER, DEFAULT_CONTAINER_SIZE, FLY_DURATION_MS, FLY_TO_ZOOM, INITIAL_ZOOM,
    INVALIDATE_SIZE_DELAY_MS, MARKER_ASSET_BASE, MAX_ZOOM, MIN_ZOOM, POPUP_OPEN_DELAY_MS,
};
use crate::core::geo::LatLng;
use crate::layers::animation::EasingType;
use crate::ui::controls::ControlPosition;
use serde::{Deserialize, Serialize};

/// Inputs a host binds on the widget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Accept map clicks and drop a pending marker at the clicked point.
    pub click_add_marker: bool,
    /// Render listing markers when the map becomes ready.
    pub show_property_markers: bool,
    /// Property type names currently visible. `None` leaves every group attached.
    pub visible_marker_types: Option<Vec<String>>,
}

/// How the map is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewOptions {
    /// Used when no last-known center is stored.
    pub fallback_center: LatLng,
    pub initial_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub fly_to_zoom: f64,
    pub zoom_control: bool,
    pub zoom_control_position: ControlPosition,
    pub container_size: (f64, f64),
    /// Root path that marker icon files are resolved against.
    pub marker_asset_base: String,
}

impl Default for MapViewOptions {
    fn default() -> Self {
        Self {
            fallback_center: DEFAULT_CENTER,
            initial_zoom: INITIAL_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            fly_to_zoom: FLY_TO_ZOOM,
            zoom_control: true,
            zoom_control_position: ControlPosition::BottomRight,
            container_size: DEFAULT_CONTAINER_SIZE,
            marker_asset_base: MARKER_ASSET_BASE.to_string(),
        }
    }
}

/// Animation and deferred-work timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub fly_duration_ms: u64,
    pub fly_easing: EasingType,
    pub popup_open_delay_ms: u64,
    pub invalidate_size_delay_ms: u64,
    /// Tick interval used by `MapWidget::run_for`.
    pub frame_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fly_duration_ms: FLY_DURATION_MS,
            fly_easing: EasingType::EaseInOut,
            popup_open_delay_ms: POPUP_OPEN_DELAY_MS,
            invalidate_size_delay_ms: INVALIDATE_SIZE_DELAY_MS,
            frame_interval_ms: 16,
        }
    }
}

/// Everything the widget needs, as loaded from a config file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropmapConfig {
    pub widget: WidgetOptions,
    pub view: MapViewOptions,
    pub timing: TimingConfig,
}

impl PropmapConfig {
    /// Parses a JSON config; missing sections and fields take their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let view = MapViewOptions::default();
        assert_eq!(view.initial_zoom, 18.0);
        assert_eq!(view.min_zoom, 16.0);
        assert_eq!(view.fly_to_zoom, 19.0);
        assert_eq!(view.fallback_center, DEFAULT_CENTER);
        assert_eq!(view.zoom_control_position, ControlPosition::BottomRight);

        let timing = TimingConfig::default();
        assert_eq!(timing.popup_open_delay_ms, 1000);
        assert_eq!(timing.invalidate_size_delay_ms, 1000);
    }

    #[test]
    fn test_partial_json_falls_back() {
        let config = PropmapConfig::from_json(
            r#"{ "widget": { "click_add_marker": true }, "timing": { "fly_duration_ms": 200 } }"#,
        )
        .unwrap();

        assert!(config.widget.click_add_marker);
        assert!(!config.widget.show_property_markers);
        assert_eq!(config.timing.fly_duration_ms, 200);
        assert_eq!(config.timing.popup_open_delay_ms, 1000);
        assert_eq!(config.view, MapViewOptions::default());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(PropmapConfig::from_json("{ not json").is_err());
    }
}
