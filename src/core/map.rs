use crate::{
    core::{
        config::MapViewOptions,
        geo::{LatLng, Point, EARTH_RADIUS},
        viewport::Viewport,
    },
    input::events::{InputEvent, MapEvent, MouseButton},
    layers::{
        animation::EasingType,
        group::{LayerGroup, LayerGroupId},
        manager::LayerManager,
        marker::{Marker, MarkerId},
        tile::TileLayer,
    },
    ui::controls::ZoomControl,
    Result,
};
use std::collections::VecDeque;
use std::f64::consts::PI;

/// Headless map model: the state a renderer would draw.
///
/// Holds the viewport, the registered layers and which of them are attached,
/// the open popup and queued map events. Nothing here fetches tiles or
/// paints pixels.
pub struct Map {
    viewport: Viewport,
    options: MapViewOptions,
    layers: LayerManager,
    zoom_control: Option<ZoomControl>,
    open_popup: Option<MarkerId>,
    click_enabled: bool,
    /// Last size the host reported; applied on `invalidate_size`
    container_size: Point,
    size_invalidations: u32,
    next_id: u64,
    event_queue: VecDeque<MapEvent>,
}

impl Map {
    /// Creates the map and queues its `Ready` event.
    pub fn new(center: LatLng, options: MapViewOptions) -> Self {
        let (width, height) = options.container_size;
        let size = Point::new(width, height);

        let mut viewport = Viewport::new(center, options.initial_zoom, size);
        viewport.set_zoom_limits(options.min_zoom, options.max_zoom);
        viewport.set_zoom(options.initial_zoom);

        let zoom_control = options
            .zoom_control
            .then(|| ZoomControl::new(options.zoom_control_position));

        let mut map = Self {
            viewport,
            options,
            layers: LayerManager::new(),
            zoom_control,
            open_popup: None,
            click_enabled: false,
            container_size: size,
            size_invalidations: 0,
            next_id: 1,
            event_queue: VecDeque::new(),
        };

        log::debug!(
            "map created at {} zoom {} (min {}, max {})",
            center,
            map.viewport.zoom,
            map.viewport.min_zoom,
            map.viewport.max_zoom
        );
        map.emit(MapEvent::Ready {
            center: map.viewport.center,
            zoom: map.viewport.zoom,
        });
        map
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn options(&self) -> &MapViewOptions {
        &self.options
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn zoom_control(&self) -> Option<&ZoomControl> {
        self.zoom_control.as_ref()
    }

    pub fn center(&self) -> LatLng {
        self.viewport.center
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom
    }

    /// Allocates a fresh marker handle.
    pub fn next_marker_id(&mut self) -> MarkerId {
        MarkerId(self.bump_id())
    }

    fn bump_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// URL of the first basemap's tile under the view center, at the rounded zoom.
    pub fn center_tile_url(&self) -> Option<String> {
        let layer = self.layers.tile_layers().first()?;
        let z = self.viewport.zoom.round().clamp(0.0, layer.max_zoom as f64) as u8;
        let tiles = 2_f64.powi(z as i32);
        let half_world = PI * EARTH_RADIUS;

        let mercator = self.viewport.center.to_mercator();
        let x = ((mercator.x + half_world) / (2.0 * half_world) * tiles).floor() as u32;
        let y = ((half_world - mercator.y) / (2.0 * half_world) * tiles).floor() as u32;
        Some(layer.tile_url(x, y, z))
    }

    pub fn add_tile_layer(&mut self, layer: TileLayer) {
        log::debug!("adding tile layer {}", layer.name());
        self.layers.add_tile_layer(layer);
    }

    /// Registers a group with the map, detached.
    pub fn register_group(&mut self, group: LayerGroup) -> Result<LayerGroupId> {
        let id = LayerGroupId(self.bump_id());
        self.layers.register_group(id, group)?;
        Ok(id)
    }

    /// Attaches a group. No-op if it is already attached.
    pub fn add_group(&mut self, id: LayerGroupId) -> Result<()> {
        self.layers.attach_group(id)
    }

    /// Detaches a group. No-op if it is not attached.
    pub fn remove_group(&mut self, id: LayerGroupId) {
        self.close_popup_if(|layers, open| {
            layers
                .group(id)
                .is_some_and(|g| g.marker(open).is_some())
        });
        self.layers.detach_group(id);
    }

    /// Detaches and forgets a group.
    pub fn drop_group(&mut self, id: LayerGroupId) -> Option<LayerGroup> {
        self.remove_group(id);
        self.layers.unregister_group(id)
    }

    pub fn has_group(&self, id: LayerGroupId) -> bool {
        self.layers.is_attached(id)
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.layers.add_marker(marker);
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> Option<Marker> {
        if self.open_popup == Some(id) {
            self.open_popup = None;
        }
        self.layers.remove_marker(id)
    }

    /// Starts an animated transition to `center` at `zoom`.
    pub fn fly_to(&mut self, center: LatLng, zoom: f64, duration_ms: u64, easing: EasingType) {
        log::debug!("flying to {} at zoom {}", center, zoom);
        self.viewport.fly_to(center, zoom, duration_ms, easing);
    }

    /// Advances animations. Returns true while the view is still moving.
    pub fn update(&mut self, delta_ms: f64) -> bool {
        self.viewport.update(delta_ms)
    }

    /// Opens the popup of a marker that is on the map. Opening closes any other popup.
    pub fn open_popup(&mut self, id: MarkerId) -> bool {
        if self.layers.visible_marker(id).is_none() {
            log::warn!("cannot open popup of {}: marker is not on the map", id);
            return false;
        }
        if let Some(marker) = self.layers.marker_mut(id) {
            marker.popup_mut().detect_changes();
        }
        self.open_popup = Some(id);
        self.emit(MapEvent::PopupOpen { marker: id });
        true
    }

    pub fn open_popup_marker(&self) -> Option<MarkerId> {
        self.open_popup
    }

    fn close_popup_if(&mut self, f: impl FnOnce(&LayerManager, MarkerId) -> bool) {
        if let Some(open) = self.open_popup {
            if f(&self.layers, open) {
                self.open_popup = None;
            }
        }
    }

    /// Turns emission of `MapEvent::Click` on or off.
    pub fn set_click_handler(&mut self, enabled: bool) {
        self.click_enabled = enabled;
    }

    /// Records the container size reported by the host; applied by `invalidate_size`.
    pub fn set_container_size(&mut self, size: Point) {
        self.container_size = size;
    }

    /// Recalculates the viewport size from the container.
    pub fn invalidate_size(&mut self) {
        self.size_invalidations += 1;
        if self.viewport.size != self.container_size {
            log::debug!(
                "container resized to {}x{}",
                self.container_size.x,
                self.container_size.y
            );
            self.viewport.set_size(self.container_size);
        }
        self.emit(MapEvent::Resized {
            size: self.viewport.size,
        });
    }

    pub fn size_invalidations(&self) -> u32 {
        self.size_invalidations
    }

    /// Applies host input. Returns the map event it produced, if any.
    pub fn handle_input(&mut self, input: InputEvent) -> Option<MapEvent> {
        let event = match input {
            InputEvent::Click {
                position,
                button: MouseButton::Left,
            } if self.click_enabled => {
                let lat_lng = self.viewport.pixel_to_lat_lng(&position);
                Some(MapEvent::Click {
                    lat_lng,
                    pixel: position,
                })
            }
            InputEvent::Click { .. } => None,
            InputEvent::Resize { size } => {
                self.set_container_size(size);
                None
            }
            InputEvent::ZoomIn | InputEvent::ZoomOut => {
                if let Some(control) = &self.zoom_control {
                    let zoom = match input {
                        InputEvent::ZoomIn => control.zoom_in(self.viewport.zoom, self.viewport.max_zoom),
                        _ => control.zoom_out(self.viewport.zoom, self.viewport.min_zoom),
                    };
                    self.viewport.set_zoom(zoom);
                }
                None
            }
        };

        if let Some(event) = &event {
            self.emit(event.clone());
        }
        event
    }

    fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Drains queued map events
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_queue.drain(..).collect()
    }
}
