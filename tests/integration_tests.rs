use propmap::{
    core::config::PropmapConfig, data::listing::listings_from_json, DeepLink, InputEvent,
    JsonFilePreferenceStore, LatLng, MapWidget, MemoryPreferenceStore, Point, PreferenceStore,
    PropertyStore, PropertyType, WidgetEvent,
};
use std::{path::PathBuf, sync::Arc, time::Duration};

/// Integration tests driving the widget the way a host page would
#[cfg(test)]
mod integration_tests {
    use super::*;

    const LISTINGS: &str = r#"[
        {"id": "h-1", "title": "Riverside house", "type": "residential",
         "position": {"lat": 8.9471, "lng": 125.5449}, "price": 4500000},
        {"id": "h-2", "title": "Hillside lot", "type": "land",
         "position": {"lat": 8.9502, "lng": 125.5391}},
        {"id": "s-1", "title": "Corner shop", "type": "commercial",
         "position": {"lat": 8.9455, "lng": 125.5470}, "address": "Montilla Blvd"},
        {"id": "w-1", "title": "Warehouse", "type": "industrial"}
    ]"#;

    const CONFIG: &str = r#"{
        "widget": {"click_add_marker": true, "show_property_markers": true},
        "timing": {"fly_duration_ms": 500}
    }"#;

    fn temp_prefs(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "propmap-it-{}-{}.json",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    fn config() -> PropmapConfig {
        PropmapConfig::from_json(CONFIG).unwrap()
    }

    #[tokio::test]
    async fn test_full_session_with_file_preferences() {
        let path = temp_prefs("session");
        let properties = PropertyStore::with_listings(listings_from_json(LISTINGS).unwrap());

        let prefs = Arc::new(JsonFilePreferenceStore::new(&path));
        let mut widget = MapWidget::new(prefs, &properties).with_config(config());
        widget.initialize().await.unwrap();

        // The warehouse has no position
        assert_eq!(widget.markers().len(), 3);
        let counts = widget.category_counts();
        assert_eq!(counts[PropertyType::Industrial], 0);
        assert_eq!(counts[PropertyType::Land], 1);

        widget.set_center(LatLng::new(8.9502, 125.5391));
        while widget.update(16.0) {}
        widget.persist_center().await.unwrap();

        // A second session starts where the first one left off
        let reopened = Arc::new(JsonFilePreferenceStore::new(&path));
        let mut next = MapWidget::new(reopened, &properties).with_config(config());
        next.initialize().await.unwrap();
        let center = next.map().unwrap().center();
        assert!((center.lat - 8.9502).abs() < 1e-9);
        assert!((center.lng - 125.5391).abs() < 1e-9);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_dark_theme_selects_dark_tiles() {
        let prefs = Arc::new(MemoryPreferenceStore::new());
        prefs.set_dark_theme(true).await.unwrap();

        let properties = PropertyStore::new();
        let mut widget = MapWidget::new(prefs, &properties);
        widget.initialize().await.unwrap();

        let tiles = widget.map().unwrap().layers().tile_layers();
        assert_eq!(tiles.len(), 1);
        assert!(tiles[0].url_template.contains("dark"));
    }

    #[tokio::test]
    async fn test_listing_updates_replace_markers() {
        let properties = PropertyStore::new();
        let mut widget =
            MapWidget::new(Arc::new(MemoryPreferenceStore::new()), &properties).with_config(config());
        widget.initialize().await.unwrap();
        assert!(widget.markers().is_empty());

        properties.publish(listings_from_json(LISTINGS).unwrap());
        assert!(widget.next_properties().await);
        assert_eq!(widget.markers().len(), 3);

        let ids_before: Vec<_> = widget.markers().iter().map(|m| m.id).collect();
        properties.publish(listings_from_json(LISTINGS).unwrap());
        assert!(widget.next_properties().await);

        // Same listings, fresh markers, no leftovers
        let ids_after: Vec<_> = widget.markers().iter().map(|m| m.id).collect();
        assert_eq!(ids_after.len(), 3);
        assert!(ids_after.iter().all(|id| !ids_before.contains(id)));
        let layers = widget.map().unwrap().layers();
        assert_eq!(layers.group_count(), 4);
        assert_eq!(layers.visible_marker_count(), 3);
    }

    #[tokio::test]
    async fn test_find_marker_then_popup_opens_after_delay() {
        let properties = PropertyStore::with_listings(listings_from_json(LISTINGS).unwrap());
        let mut widget =
            MapWidget::new(Arc::new(MemoryPreferenceStore::new()), &properties).with_config(config());
        widget.initialize().await.unwrap();

        let shop = widget.find_marker(8.9455, 125.5470).unwrap();
        assert!(widget.map().unwrap().viewport().is_animating());

        widget.update(500.0);
        assert!(!widget.map().unwrap().viewport().is_animating());
        assert_eq!(widget.map().unwrap().open_popup_marker(), None);

        widget.update(500.0);
        let map = widget.map().unwrap();
        assert_eq!(map.open_popup_marker(), Some(shop));
        assert_eq!(map.zoom(), 19.0);

        let popup = map.layers().visible_marker(shop).unwrap().popup();
        assert!(popup.content().contains("Corner shop"));
        assert!(popup.content().contains("Montilla Blvd"));
    }

    #[tokio::test]
    async fn test_hidden_category_popup_does_not_open() {
        let properties = PropertyStore::with_listings(listings_from_json(LISTINGS).unwrap());
        let mut widget =
            MapWidget::new(Arc::new(MemoryPreferenceStore::new()), &properties).with_config(config());
        widget.initialize().await.unwrap();

        widget.set_visible_marker_types(&["residential", "land"]);
        let shop = widget.find_marker(8.9455, 125.5470).unwrap();
        widget.update(1000.0);

        assert_eq!(widget.map().unwrap().open_popup_marker(), None);
        assert!(widget.map().unwrap().layers().visible_marker(shop).is_none());
    }

    #[tokio::test]
    async fn test_deep_link_by_listing_id() {
        let properties = PropertyStore::with_listings(listings_from_json(LISTINGS).unwrap());
        let mut widget = MapWidget::new(Arc::new(MemoryPreferenceStore::new()), &properties)
            .with_config(config())
            .with_deep_link(DeepLink::from_query("id=h-2"));
        widget.initialize().await.unwrap();

        let lot = widget
            .markers()
            .iter()
            .find(|m| m.listing_id == "h-2")
            .map(|m| m.id);
        widget.update(1000.0);
        assert_eq!(widget.map().unwrap().open_popup_marker(), lot);
    }

    #[tokio::test]
    async fn test_deep_link_applies_when_listings_arrive_later() {
        let properties = PropertyStore::new();
        let mut widget = MapWidget::new(Arc::new(MemoryPreferenceStore::new()), &properties)
            .with_config(config())
            .with_deep_link(DeepLink::from_query("?id=s%2D1"));
        widget.initialize().await.unwrap();

        properties.publish(listings_from_json(LISTINGS).unwrap());
        assert!(widget.next_properties().await);

        let shop = widget
            .markers()
            .iter()
            .find(|m| m.listing_id == "s-1")
            .map(|m| m.id);
        widget.update(1000.0);
        assert!(shop.is_some());
        assert_eq!(widget.map().unwrap().open_popup_marker(), shop);
    }

    #[tokio::test]
    async fn test_click_flow_emits_events() {
        let properties = PropertyStore::new();
        let mut widget =
            MapWidget::new(Arc::new(MemoryPreferenceStore::new()), &properties).with_config(config());
        let events = widget.subscribe();
        widget.initialize().await.unwrap();

        let clicked = widget
            .handle_input(InputEvent::Click {
                position: Point::new(100.0, 100.0),
                button: propmap::input::events::MouseButton::Left,
            })
            .unwrap();
        widget.handle_click(LatLng::new(8.95, 125.55));

        assert_eq!(events.try_recv().unwrap(), WidgetEvent::ClickedAt(clicked));
        assert_eq!(
            events.try_recv().unwrap(),
            WidgetEvent::ClickedAt(LatLng::new(8.95, 125.55))
        );
        assert_eq!(widget.map().unwrap().layers().standalone_markers().count(), 1);

        // Right clicks never place markers
        let ignored = widget.handle_input(InputEvent::Click {
            position: Point::new(10.0, 10.0),
            button: propmap::input::events::MouseButton::Right,
        });
        assert!(ignored.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_for_drives_deferred_work() {
        let properties = PropertyStore::with_listings(listings_from_json(LISTINGS).unwrap());
        let mut widget =
            MapWidget::new(Arc::new(MemoryPreferenceStore::new()), &properties).with_config(config());
        widget.initialize().await.unwrap();

        let house = widget.find_marker_by_listing("h-1").unwrap();
        widget.run_for(Duration::from_millis(1100)).await;

        let map = widget.map().unwrap();
        assert_eq!(map.size_invalidations(), 1);
        assert_eq!(map.open_popup_marker(), Some(house));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_for_picks_up_stream_updates() {
        let properties = PropertyStore::new();
        let mut widget =
            MapWidget::new(Arc::new(MemoryPreferenceStore::new()), &properties).with_config(config());
        widget.initialize().await.unwrap();

        properties.publish(listings_from_json(LISTINGS).unwrap());
        widget.run_for(Duration::from_millis(50)).await;
        assert_eq!(widget.markers().len(), 3);
    }
}
