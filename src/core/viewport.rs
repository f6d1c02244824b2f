use crate::core::constants::TILE_SIZE;
use crate::core::geo::{LatLng, Point, EARTH_RADIUS};
use crate::layers::animation::EasingType;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// In-flight fly-to transition, if any
    #[serde(skip)]
    animation: Option<FlyAnimation>,
}

/// Animated pan/zoom from one view to another.
///
/// Progress is driven by elapsed milliseconds fed through [`Viewport::update`],
/// so the transition is deterministic under test.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyAnimation {
    from_center: LatLng,
    from_zoom: f64,
    to_center: LatLng,
    to_zoom: f64,
    duration_ms: f64,
    elapsed_ms: f64,
    easing: EasingType,
}

impl FlyAnimation {
    pub fn target(&self) -> (LatLng, f64) {
        (self.to_center, self.to_zoom)
    }

    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).min(1.0)
        }
    }

    fn advance(&mut self, delta_ms: f64) -> (LatLng, f64) {
        self.elapsed_ms += delta_ms.max(0.0);
        if self.is_finished() {
            return self.target();
        }
        let t = self.easing.apply(self.progress());
        let center = self.from_center.lerp(&self.to_center, t);
        let zoom = self.from_zoom + (self.to_zoom - self.from_zoom) * t;
        (center, zoom)
    }

    fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, 19.0),
            size,
            min_zoom: 0.0,
            max_zoom: 19.0,
            animation: None,
        }
    }

    /// Sets the center of the viewport
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(LatLng::clamp_lat(center.lat), center.lng);
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Updates the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets zoom limits and re-clamps the current zoom
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom.max(min_zoom);
        self.set_zoom(self.zoom);
    }

    /// Starts an animated transition to `center` at `zoom`, replacing any
    /// transition already in flight. A zero duration jumps immediately.
    pub fn fly_to(&mut self, center: LatLng, zoom: f64, duration_ms: u64, easing: EasingType) {
        let to_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if duration_ms == 0 {
            self.animation = None;
            self.set_center(center);
            self.set_zoom(to_zoom);
            return;
        }

        self.animation = Some(FlyAnimation {
            from_center: self.center,
            from_zoom: self.zoom,
            to_center: center,
            to_zoom,
            duration_ms: duration_ms as f64,
            elapsed_ms: 0.0,
            easing,
        });
    }

    /// Advances any running transition. Returns true while still animating.
    pub fn update(&mut self, delta_ms: f64) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let (center, zoom) = animation.advance(delta_ms);
        let finished = animation.is_finished();
        self.set_center(center);
        self.set_zoom(zoom);

        if finished {
            self.animation = None;
        }
        !finished
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&FlyAnimation> {
        self.animation.as_ref()
    }

    /// Projects a LatLng to world pixel coordinates at the current zoom (EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        let scale = TILE_SIZE as f64 * 2_f64.powf(self.zoom);
        let mercator = lat_lng.to_mercator();
        let world = 2.0 * PI * EARTH_RADIUS;

        Point::new(
            (mercator.x + PI * EARTH_RADIUS) / world * scale,
            (-mercator.y + PI * EARTH_RADIUS) / world * scale,
        )
    }

    /// Unprojects world pixel coordinates back to LatLng at the current zoom
    pub fn unproject(&self, pixel: &Point) -> LatLng {
        let scale = TILE_SIZE as f64 * 2_f64.powf(self.zoom);
        let world = 2.0 * PI * EARTH_RADIUS;

        let x = (pixel.x / scale) * world - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - (pixel.y / scale) * world;
        LatLng::from_mercator(Point::new(x, y))
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let origin = self.project(&self.center);
        let half = Point::new(self.size.x / 2.0, self.size.y / 2.0);
        self.unproject(&pixel.subtract(&half).add(&origin))
    }
}
