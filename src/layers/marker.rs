use crate::{
    core::{
        constants::{
            DEFAULT_MARKER_FILE, MARKER_ASSET_BASE, MARKER_ICON_ANCHOR, MARKER_ICON_SIZE,
            MARKER_POPUP_ANCHOR, MARKER_SHADOW_ANCHOR, MARKER_SHADOW_FILE, MARKER_SHADOW_SIZE,
        },
        geo::LatLng,
    },
    data::listing::PropertyType,
    layers::base::{LayerProperties, LayerType},
    ui::popup::PopupView,
};

/// Handle to a marker, unique within one map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

/// Icon image and its fixed presentation offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    pub icon_url: String,
    pub icon_size: (u32, u32),
    pub icon_anchor: (u32, u32),
    pub popup_anchor: (i32, i32),
    pub shadow_url: String,
    pub shadow_size: (u32, u32),
    pub shadow_anchor: (u32, u32),
}

impl MarkerIcon {
    /// Icon for a category; `None` gives the default marker.
    pub fn for_type(kind: Option<PropertyType>) -> Self {
        Self::for_type_in(MARKER_ASSET_BASE, kind)
    }

    /// Icon for a category name. Unknown or missing names give the default marker.
    pub fn for_name(name: Option<&str>) -> Self {
        Self::for_type(name.and_then(|n| n.parse().ok()))
    }

    pub fn for_type_in(asset_base: &str, kind: Option<PropertyType>) -> Self {
        let file = match kind {
            Some(kind) => format!("marker-{}.svg", kind.as_str()),
            None => DEFAULT_MARKER_FILE.to_string(),
        };
        let base = asset_base.trim_end_matches('/');

        Self {
            icon_url: format!("{}/{}", base, file),
            icon_size: MARKER_ICON_SIZE,
            icon_anchor: MARKER_ICON_ANCHOR,
            popup_anchor: MARKER_POPUP_ANCHOR,
            shadow_url: format!("{}/{}", base, MARKER_SHADOW_FILE),
            shadow_size: MARKER_SHADOW_SIZE,
            shadow_anchor: MARKER_SHADOW_ANCHOR,
        }
    }

    /// File name part of the icon url.
    pub fn file_name(&self) -> &str {
        self.icon_url.rsplit('/').next().unwrap_or(&self.icon_url)
    }
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self::for_type(None)
    }
}

/// What a marker is created with.
#[derive(Debug, Clone, Default)]
pub struct MarkerOptions {
    pub icon: MarkerIcon,
    pub popup: PopupView,
    /// Listing the marker represents; `None` for click markers.
    pub listing_id: Option<String>,
}

pub struct Marker {
    properties: LayerProperties,
    id: MarkerId,
    position: LatLng,
    icon: MarkerIcon,
    popup: PopupView,
    listing_id: Option<String>,
}

impl Marker {
    pub fn new(id: MarkerId, position: LatLng, options: MarkerOptions) -> Self {
        let properties = LayerProperties::new(id.to_string(), LayerType::Marker);
        Self {
            properties,
            id,
            position,
            icon: options.icon,
            popup: options.popup,
            listing_id: options.listing_id,
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn icon(&self) -> &MarkerIcon {
        &self.icon
    }

    pub fn popup(&self) -> &PopupView {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut PopupView {
        &mut self.popup
    }

    pub fn listing_id(&self) -> Option<&str> {
        self.listing_id.as_deref()
    }

    pub fn properties(&self) -> &LayerProperties {
        &self.properties
    }
}

impl std::fmt::Debug for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marker")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("icon", &self.icon.file_name())
            .field("listing_id", &self.listing_id)
            .finish()
    }
}
