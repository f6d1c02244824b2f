#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    Marker,
    Group,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Marker => write!(f, "marker"),
            LayerType::Group => write!(f, "group"),
        }
    }
}

/// Pane stacking used for render order; mirrors Leaflet's tile and marker panes.
pub const TILE_PANE_Z: i32 = 200;
pub const MARKER_PANE_Z: i32 = 600;

#[derive(Debug, Clone, PartialEq)]
pub struct LayerProperties {
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
}

impl LayerProperties {
    pub fn new(name: String, layer_type: LayerType) -> Self {
        let z_index = match layer_type {
            LayerType::Tile => TILE_PANE_Z,
            LayerType::Marker | LayerType::Group => MARKER_PANE_Z,
        };
        Self {
            name,
            layer_type,
            z_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new("Residential".to_string(), LayerType::Group);

        assert_eq!(props.name, "Residential");
        assert_eq!(props.layer_type, LayerType::Group);
        assert_eq!(props.z_index, MARKER_PANE_Z);
    }

    #[test]
    fn test_tiles_render_below_markers() {
        let tile = LayerProperties::new("Basemap".to_string(), LayerType::Tile);
        let marker = LayerProperties::new("Pin".to_string(), LayerType::Marker);
        assert!(tile.z_index < marker.z_index);
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Tile.to_string(), "tile");
        assert_eq!(LayerType::Marker.to_string(), "marker");
        assert_eq!(LayerType::Group.to_string(), "group");
    }
}
