use anyhow::Context;
use propmap::{
    core::config::PropmapConfig, data::listing::listings_from_json, DeepLink, LatLng,
    JsonFilePreferenceStore, MapWidget, PropertyStore, PropertyType, WidgetEvent,
};
use std::{sync::Arc, time::Duration};

struct Args {
    listings: Option<String>,
    config: Option<String>,
    prefs: String,
    query: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        listings: None,
        config: None,
        prefs: "propmap-prefs.json".to_string(),
        query: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| iter.next().with_context(|| format!("{} needs a value", flag));
        match arg.as_str() {
            "--config" => args.config = Some(value("--config")?),
            "--prefs" => args.prefs = value("--prefs")?,
            "--query" => args.query = Some(value("--query")?),
            _ if args.listings.is_none() => args.listings = Some(arg),
            other => anyhow::bail!("unexpected argument {}", other),
        }
    }
    Ok(args)
}

/// Headless listing map: loads listings, places markers, replays a click
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    propmap::init_logging();
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path))?;
            PropmapConfig::from_json(&json)?
        }
        None => {
            let mut config = PropmapConfig::default();
            config.widget.show_property_markers = true;
            config.widget.click_add_marker = true;
            config
        }
    };

    let listings = match &args.listings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading listings {}", path))?;
            listings_from_json(&json)?
        }
        None => Vec::new(),
    };

    let properties = PropertyStore::with_listings(listings);
    let preferences = Arc::new(JsonFilePreferenceStore::new(&args.prefs));
    let mut widget = MapWidget::new(preferences, &properties).with_config(config);
    if let Some(query) = &args.query {
        widget = widget.with_deep_link(DeepLink::from_query(query));
    }
    let events = widget.subscribe();

    widget.initialize().await?;
    widget.run_for(Duration::from_millis(1200)).await;

    let counts = widget.category_counts();
    for kind in PropertyType::ALL {
        log::info!("{:<12} {} markers", kind, counts[kind]);
    }

    if let Some(map) = widget.map() {
        let center = map.center();
        let clicked = LatLng::new(center.lat + 0.0005, center.lng + 0.0005);
        widget.handle_click(clicked);
    }
    for event in events.try_iter() {
        match event {
            WidgetEvent::ClickedAt(at) => log::info!("pending marker at {}", at),
        }
    }

    if let Some(map) = widget.map() {
        log::info!(
            "view {} zoom {} popup {:?}",
            map.center(),
            map.zoom(),
            map.open_popup_marker()
        );
        if let Some(url) = map.center_tile_url() {
            log::info!("center tile {}", url);
        }
    }
    widget.persist_center().await?;
    Ok(())
}
