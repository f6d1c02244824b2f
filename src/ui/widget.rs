//! The listing map widget
//!
//! Owns the map instance and the marker bookkeeping for a property catalog:
//! category layer groups rebuilt from the listing stream, visibility
//! toggling per category, click-to-place of a single pending marker, and
//! fly-to with a delayed popup for marker lookups and deep links.
//!
//! The widget is single-threaded. Async work is limited to the two
//! preference reads during [`MapWidget::initialize`]; everything else runs
//! synchronously inside the host's event callbacks and the
//! [`MapWidget::update`] tick.

use crate::{
    background::deferred::DeferredQueue,
    core::{
        config::{MapViewOptions, PropmapConfig, TimingConfig, WidgetOptions},
        geo::LatLng,
        map::Map,
    },
    data::listing::{Listing, PropertyType},
    input::events::{InputEvent, MapEvent, WidgetEvent},
    layers::{
        group::{ByCategory, LayerGroup, LayerGroupId},
        marker::{MarkerIcon, MarkerId, MarkerOptions},
    },
    prelude::HashSet,
    services::{map_service::DefaultMapService, properties::Listings, PropertyStore},
    traits::{MapService, PopupRenderer, PreferenceStore},
    ui::{
        deep_link::DeepLink,
        popup::{ListingPopupRenderer, PopupView},
    },
    MapError, Result,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// A listing marker as tracked by the widget, for lookup by coordinate or id.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub id: MarkerId,
    pub position: LatLng,
    pub listing_id: String,
    pub category: PropertyType,
}

/// Work that runs after a fixed delay on the widget's clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    InvalidateSize,
    OpenPopup(MarkerId),
}

/// Everything that only exists once the map does.
pub struct ReadyState {
    map: Map,
    markers: Vec<PlacedMarker>,
    /// `None` until the first marker build
    groups: Option<ByCategory<LayerGroupId>>,
    pending: Option<MarkerId>,
    deferred: DeferredQueue<DeferredAction>,
}

impl ReadyState {
    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn markers(&self) -> &[PlacedMarker] {
        &self.markers
    }

    pub fn groups(&self) -> Option<&ByCategory<LayerGroupId>> {
        self.groups.as_ref()
    }

    pub fn pending_marker(&self) -> Option<MarkerId> {
        self.pending
    }

    /// Runs map events through the widget: `Ready` schedules the size recalculation.
    fn pump_map_events(&mut self, timing: &TimingConfig) -> Vec<MapEvent> {
        let events = self.map.process_events();
        for event in &events {
            if let MapEvent::Ready { .. } = event {
                self.deferred
                    .schedule(timing.invalidate_size_delay_ms, DeferredAction::InvalidateSize);
            }
        }
        events
    }
}

/// Lifecycle of the widget. Marker and viewport operations need `Ready`.
pub enum WidgetState {
    Uninitialized,
    Ready(ReadyState),
}

impl WidgetState {
    pub fn is_ready(&self) -> bool {
        matches!(self, WidgetState::Ready(_))
    }
}

pub struct MapWidget {
    options: WidgetOptions,
    view: MapViewOptions,
    timing: TimingConfig,
    preferences: Arc<dyn PreferenceStore>,
    map_service: Box<dyn MapService>,
    popup_renderer: Box<dyn PopupRenderer>,
    /// Latest listing snapshot, kept even while uninitialized
    listings: Listings,
    listing_rx: Option<watch::Receiver<Listings>>,
    visible: Option<HashSet<PropertyType>>,
    deep_link: Option<DeepLink>,
    subscribers: Vec<Sender<WidgetEvent>>,
    state: WidgetState,
}

impl MapWidget {
    /// Widget fed by `properties`, reading preferences from `preferences`.
    pub fn new(preferences: Arc<dyn PreferenceStore>, properties: &PropertyStore) -> Self {
        let rx = properties.subscribe();
        let listings = rx.borrow().clone();
        Self {
            options: WidgetOptions::default(),
            view: MapViewOptions::default(),
            timing: TimingConfig::default(),
            preferences,
            map_service: Box::new(DefaultMapService::new()),
            popup_renderer: Box::new(ListingPopupRenderer),
            listings,
            listing_rx: Some(rx),
            visible: None,
            deep_link: None,
            subscribers: Vec::new(),
            state: WidgetState::Uninitialized,
        }
    }

    pub fn with_config(mut self, config: PropmapConfig) -> Self {
        self.view = config.view;
        self.timing = config.timing;
        self.with_options(config.widget)
    }

    pub fn with_options(mut self, options: WidgetOptions) -> Self {
        if let Some(types) = &options.visible_marker_types {
            self.visible = Some(parse_visible(types));
        }
        self.options = options;
        self
    }

    pub fn with_view_options(mut self, view: MapViewOptions) -> Self {
        self.view = view;
        self
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_map_service(mut self, service: impl MapService + 'static) -> Self {
        self.map_service = Box::new(service);
        self
    }

    pub fn with_popup_renderer(mut self, renderer: impl PopupRenderer + 'static) -> Self {
        self.popup_renderer = Box::new(renderer);
        self
    }

    /// Marker to focus once the widget is ready.
    pub fn with_deep_link(mut self, link: DeepLink) -> Self {
        self.deep_link = (!link.is_empty()).then_some(link);
        self
    }

    /// Reads the persisted center and theme, creates the map, and renders the
    /// initial markers. Calling it again once ready does nothing.
    pub async fn initialize(&mut self) -> Result<()> {
        if self.state.is_ready() {
            log::debug!("initialize called on a ready widget; ignoring");
            return Ok(());
        }

        let center = self.load_center().await;
        let mut ready = ReadyState {
            map: Map::new(center, self.view.clone()),
            markers: Vec::new(),
            groups: None,
            pending: None,
            deferred: DeferredQueue::new(),
        };
        ready.pump_map_events(&self.timing);

        let dark = self.load_dark_theme().await;
        self.map_service.add_tiles(&mut ready.map, dark);

        if self.options.click_add_marker {
            ready.map.set_click_handler(true);
        }

        self.state = WidgetState::Ready(ready);
        log::info!("map ready at {} (dark theme: {})", center, dark);

        // A snapshot taken here is already built by on_listings
        let synced = self.sync_properties();
        if self.options.show_property_markers {
            if !synced {
                self.build_markers()?;
            }
            self.apply_visibility();
        }
        self.follow_deep_link();

        Ok(())
    }

    /// Focuses the deep-link target. Stays pending until a build has markers.
    fn follow_deep_link(&mut self) {
        if self.markers().is_empty() {
            if self.deep_link.is_some() {
                log::debug!("no markers yet; keeping deep link pending");
            }
            return;
        }
        let Some(link) = self.deep_link.take() else {
            return;
        };

        let found = match &link.listing_id {
            Some(id) => self.find_marker_by_listing(id),
            None => link
                .coord()
                .and_then(|coord| self.find_marker(coord.lat, coord.lng)),
        };
        if found.is_none() {
            log::warn!("deep link {:?} did not match any marker", link);
        }
    }

    async fn load_center(&self) -> LatLng {
        match self.preferences.center().await {
            Ok(Some(center)) => center,
            Ok(None) => {
                log::debug!("no stored center; using {}", self.view.fallback_center);
                self.view.fallback_center
            }
            Err(e) => {
                log::warn!("failed to read stored center, using fallback: {}", e);
                self.view.fallback_center
            }
        }
    }

    async fn load_dark_theme(&self) -> bool {
        self.preferences.dark_theme().await.unwrap_or_else(|e| {
            log::warn!("failed to read theme preference, using light: {}", e);
            false
        })
    }

    /// Persists the current map center so the next session starts there.
    pub async fn persist_center(&self) -> Result<()> {
        let center = self.map().ok_or(MapError::NotReady)?.center();
        self.preferences.set_center(center).await
    }

    /// Applies the latest listing snapshot if the stream changed.
    /// Returns true when a new snapshot was taken.
    pub fn sync_properties(&mut self) -> bool {
        let Some(rx) = self.listing_rx.as_mut() else {
            return false;
        };
        match rx.has_changed() {
            Ok(true) => {
                let listings = rx.borrow_and_update().clone();
                self.on_listings(listings);
                true
            }
            Ok(false) => false,
            Err(_) => {
                log::debug!("listing stream closed");
                self.listing_rx = None;
                false
            }
        }
    }

    /// Waits for the next listing snapshot and applies it.
    /// Returns false once the stream is closed.
    pub async fn next_properties(&mut self) -> bool {
        let Some(rx) = self.listing_rx.as_mut() else {
            return false;
        };
        if rx.changed().await.is_err() {
            self.listing_rx = None;
            return false;
        }
        let listings = rx.borrow_and_update().clone();
        self.on_listings(listings);
        true
    }

    /// Caches a listing snapshot and rebuilds markers if the map exists.
    pub fn on_listings(&mut self, listings: Listings) {
        self.listings = listings;
        if !self.state.is_ready() {
            log::debug!(
                "cached {} listings; markers build once the map is ready",
                self.listings.len()
            );
            return;
        }
        if self.options.show_property_markers {
            if let Err(e) = self.build_markers() {
                log::warn!("failed to rebuild markers: {}", e);
            }
            self.follow_deep_link();
        }
    }

    /// Replaces every listing marker with fresh ones from the cached listings.
    ///
    /// The previous category groups are detached and dropped first. All four
    /// new groups are attached; visibility has to be re-applied afterwards.
    /// Returns the number of markers placed.
    pub fn build_markers(&mut self) -> Result<usize> {
        let Self {
            state,
            map_service,
            popup_renderer,
            listings,
            view,
            ..
        } = self;
        let WidgetState::Ready(ready) = state else {
            return Err(MapError::NotReady);
        };

        if let Some(old) = ready.groups.take() {
            for (_, id) in old.iter() {
                ready.map.drop_group(*id);
            }
        }
        ready.markers.clear();

        let mut buckets: ByCategory<Vec<&Listing>> = ByCategory::default();
        for listing in listings.iter() {
            buckets[listing.property_type].push(listing);
        }

        let mut group_ids = Vec::with_capacity(PropertyType::ALL.len());
        for kind in PropertyType::ALL {
            let mut group = LayerGroup::new(kind.as_str());
            for listing in &buckets[kind] {
                let Some(position) = listing.position else {
                    continue;
                };
                let options = MarkerOptions {
                    icon: MarkerIcon::for_type_in(&view.marker_asset_base, Some(kind)),
                    popup: popup_renderer.render(listing),
                    listing_id: Some(listing.id.clone()),
                };
                let marker = map_service.create_marker(&mut ready.map, position, options);
                ready.markers.push(PlacedMarker {
                    id: marker.id(),
                    position,
                    listing_id: listing.id.clone(),
                    category: kind,
                });
                group.add_marker(marker);
            }

            let id = ready.map.register_group(group)?;
            ready.map.add_group(id)?;
            group_ids.push(id);
        }

        // group_ids follows PropertyType::ALL
        ready.groups = Some(ByCategory::from_fn(|kind| group_ids[kind.index()]));

        log::debug!(
            "built {} markers from {} listings",
            ready.markers.len(),
            listings.len()
        );
        Ok(ready.markers.len())
    }

    /// Sets which categories are shown. Unknown names are ignored.
    pub fn set_visible_marker_types<S: AsRef<str>>(&mut self, types: &[S]) {
        self.visible = Some(parse_visible(types));
        self.apply_visibility();
    }

    fn apply_visibility(&mut self) {
        let (WidgetState::Ready(ready), Some(visible)) = (&mut self.state, &self.visible) else {
            return;
        };
        let Some(groups) = ready.groups else {
            return;
        };

        for (kind, id) in groups.iter() {
            if visible.contains(&kind) {
                if let Err(e) = ready.map.add_group(*id) {
                    log::warn!("failed to show {} markers: {}", kind, e);
                }
            } else {
                ready.map.remove_group(*id);
            }
        }
    }

    pub fn set_click_add_marker(&mut self, enabled: bool) {
        self.options.click_add_marker = enabled;
        if let WidgetState::Ready(ready) = &mut self.state {
            ready.map.set_click_handler(enabled);
        }
    }

    pub fn set_show_property_markers(&mut self, enabled: bool) {
        self.options.show_property_markers = enabled;
    }

    /// Flies to `coord` at the fly-to zoom. Returns false when not ready or
    /// when the coordinate is invalid.
    pub fn set_center(&mut self, coord: LatLng) -> bool {
        if !coord.is_valid() {
            log::warn!("ignoring center at invalid coordinate {:?}", coord);
            return false;
        }
        let WidgetState::Ready(ready) = &mut self.state else {
            log::debug!("set_center before the map is ready; ignoring");
            return false;
        };
        ready.map.fly_to(
            coord,
            self.view.fly_to_zoom,
            self.timing.fly_duration_ms,
            self.timing.fly_easing,
        );
        true
    }

    /// Finds the listing marker at exactly `(lat, lng)`, flies to it, and
    /// opens its popup once the flight has settled.
    ///
    /// Matching is exact float equality, so the coordinates must come from
    /// the same source the marker was created from.
    pub fn find_marker(&mut self, lat: f64, lng: f64) -> Option<MarkerId> {
        let found = self
            .ready()?
            .markers
            .iter()
            .find(|m| m.position.lat == lat && m.position.lng == lng)
            .cloned();

        match found {
            Some(marker) => {
                self.focus(&marker);
                Some(marker.id)
            }
            None => {
                log::debug!("no marker at ({}, {})", lat, lng);
                None
            }
        }
    }

    /// Like [`find_marker`](Self::find_marker), keyed by the listing id.
    pub fn find_marker_by_listing(&mut self, listing_id: &str) -> Option<MarkerId> {
        let found = self
            .ready()?
            .markers
            .iter()
            .find(|m| m.listing_id == listing_id)
            .cloned();

        match found {
            Some(marker) => {
                self.focus(&marker);
                Some(marker.id)
            }
            None => {
                log::debug!("no marker for listing {}", listing_id);
                None
            }
        }
    }

    fn focus(&mut self, marker: &PlacedMarker) {
        let WidgetState::Ready(ready) = &mut self.state else {
            return;
        };
        ready.map.fly_to(
            marker.position,
            self.view.fly_to_zoom,
            self.timing.fly_duration_ms,
            self.timing.fly_easing,
        );
        ready.deferred.schedule(
            self.timing.popup_open_delay_ms,
            DeferredAction::OpenPopup(marker.id),
        );
    }

    /// Drops a pending marker at `coord` and emits `ClickedAt`.
    ///
    /// Ignored unless click-to-place is enabled and the map is ready. Any
    /// previous pending marker is removed first.
    pub fn handle_click(&mut self, coord: LatLng) -> Option<LatLng> {
        if !self.options.click_add_marker {
            return None;
        }
        if !coord.is_valid() {
            log::warn!("ignoring click at invalid coordinate {:?}", coord);
            return None;
        }
        let WidgetState::Ready(ready) = &mut self.state else {
            return None;
        };

        if let Some(previous) = ready.pending.take() {
            ready.map.remove_marker(previous);
        }
        let options = MarkerOptions {
            icon: MarkerIcon::for_type_in(&self.view.marker_asset_base, None),
            popup: PopupView::empty(),
            listing_id: None,
        };
        ready.pending = Some(self.map_service.add_marker(&mut ready.map, coord, options));

        log::debug!("pending marker placed at {}", coord);
        self.emit(WidgetEvent::ClickedAt(coord));
        Some(coord)
    }

    /// Forwards host input to the map; accepted clicks go through `handle_click`.
    pub fn handle_input(&mut self, input: InputEvent) -> Option<LatLng> {
        let WidgetState::Ready(ready) = &mut self.state else {
            return None;
        };
        match ready.map.handle_input(input) {
            Some(MapEvent::Click { lat_lng, .. }) => self.handle_click(lat_lng),
            _ => None,
        }
    }

    /// Advances animations and deferred work by `delta_ms`.
    /// Returns true while either still has something to do.
    pub fn update(&mut self, delta_ms: f64) -> bool {
        let WidgetState::Ready(ready) = &mut self.state else {
            return false;
        };

        let animating = ready.map.update(delta_ms);
        ready.pump_map_events(&self.timing);

        for action in ready.deferred.advance(delta_ms) {
            match action {
                DeferredAction::InvalidateSize => ready.map.invalidate_size(),
                DeferredAction::OpenPopup(id) => {
                    ready.map.open_popup(id);
                }
            }
        }
        // Events raised by the actions above
        ready.pump_map_events(&self.timing);

        animating || !ready.deferred.is_empty()
    }

    /// Drives `update` and the listing stream on a fixed tick for `duration`.
    pub async fn run_for(&mut self, duration: Duration) {
        let frame = Duration::from_millis(self.timing.frame_interval_ms.max(1));
        let mut interval = tokio::time::interval(frame);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        let start = tokio::time::Instant::now();
        let mut last = start;
        loop {
            let now = interval.tick().await;
            self.sync_properties();
            self.update(now.duration_since(last).as_secs_f64() * 1000.0);
            last = now;
            if now.duration_since(start) >= duration {
                break;
            }
        }
    }

    /// Receiver for the widget's output events.
    pub fn subscribe(&mut self) -> Receiver<WidgetEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: WidgetEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    fn ready(&self) -> Option<&ReadyState> {
        match &self.state {
            WidgetState::Ready(ready) => Some(ready),
            WidgetState::Uninitialized => None,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    pub fn map(&self) -> Option<&Map> {
        self.ready().map(|r| &r.map)
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Listing markers from the last build
    pub fn markers(&self) -> &[PlacedMarker] {
        self.ready().map(|r| r.markers.as_slice()).unwrap_or(&[])
    }

    pub fn pending_marker(&self) -> Option<MarkerId> {
        self.ready().and_then(|r| r.pending)
    }

    /// Markers per category from the last build
    pub fn category_counts(&self) -> ByCategory<usize> {
        let mut counts = ByCategory::default();
        for marker in self.markers() {
            counts[marker.category] += 1;
        }
        counts
    }

    /// Whether a category's group is currently on the map
    pub fn is_category_visible(&self, kind: PropertyType) -> bool {
        self.ready()
            .and_then(|r| r.groups.map(|g| r.map.has_group(g[kind])))
            .unwrap_or(false)
    }
}

fn parse_visible<S: AsRef<str>>(types: &[S]) -> HashSet<PropertyType> {
    types
        .iter()
        .filter_map(|name| match name.as_ref().parse::<PropertyType>() {
            Ok(kind) => Some(kind),
            Err(e) => {
                log::warn!("ignoring visibility entry: {}", e);
                None
            }
        })
        .collect()
}
