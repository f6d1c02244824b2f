use serde::{Deserialize, Serialize};

/// Corner of the map container a control is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Default for ControlPosition {
    fn default() -> Self {
        ControlPosition::TopLeft
    }
}

/// "+" / "-" zoom buttons
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomControl {
    pub position: ControlPosition,
    /// Zoom change per button press
    pub delta: f64,
}

impl ZoomControl {
    pub fn new(position: ControlPosition) -> Self {
        Self {
            position,
            delta: 1.0,
        }
    }

    /// Zoom level after a "+" press, bounded by `max_zoom`
    pub fn zoom_in(&self, zoom: f64, max_zoom: f64) -> f64 {
        (zoom + self.delta).min(max_zoom)
    }

    /// Zoom level after a "-" press, bounded by `min_zoom`
    pub fn zoom_out(&self, zoom: f64, min_zoom: f64) -> f64 {
        (zoom - self.delta).max(min_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_buttons_respect_limits() {
        let control = ZoomControl::new(ControlPosition::BottomRight);
        assert_eq!(control.zoom_in(18.0, 19.0), 19.0);
        assert_eq!(control.zoom_in(19.0, 19.0), 19.0);
        assert_eq!(control.zoom_out(16.5, 16.0), 16.0);
    }
}
