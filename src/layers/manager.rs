use crate::{
    layers::{
        group::{LayerGroup, LayerGroupId},
        marker::{Marker, MarkerId},
        tile::TileLayer,
    },
    MapError, Result,
};

use crate::prelude::{HashMap, HashSet};

/// Owns every layer registered with a map and tracks which ones are attached.
///
/// Groups are registered once and then attached or detached any number of
/// times; both operations are idempotent. Standalone markers are attached for
/// as long as they are registered.
pub struct LayerManager {
    tiles: Vec<TileLayer>,
    groups: HashMap<LayerGroupId, LayerGroup>,
    /// Attached group IDs in render order (sorted by z-index, then attach order)
    render_order: Vec<LayerGroupId>,
    attached: HashSet<LayerGroupId>,
    markers: HashMap<MarkerId, Marker>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            groups: HashMap::default(),
            render_order: Vec::new(),
            attached: HashSet::default(),
            markers: HashMap::default(),
        }
    }

    pub fn add_tile_layer(&mut self, layer: TileLayer) {
        self.tiles.push(layer);
    }

    pub fn tile_layers(&self) -> &[TileLayer] {
        &self.tiles
    }

    /// Registers a group without attaching it.
    pub fn register_group(&mut self, id: LayerGroupId, group: LayerGroup) -> Result<()> {
        if self.groups.contains_key(&id) {
            return Err(MapError::Layer(format!("layer group {:?} already registered", id)));
        }
        self.groups.insert(id, group);
        Ok(())
    }

    /// Detaches and drops a group. Returns it if it was registered.
    pub fn unregister_group(&mut self, id: LayerGroupId) -> Option<LayerGroup> {
        self.detach_group(id);
        self.groups.remove(&id)
    }

    /// Attaches a registered group. Attaching an attached group is a no-op.
    pub fn attach_group(&mut self, id: LayerGroupId) -> Result<()> {
        let z_index = self
            .groups
            .get(&id)
            .map(|g| g.z_index())
            .ok_or_else(|| MapError::Layer(format!("layer group {:?} is not registered", id)))?;

        if !self.attached.insert(id) {
            return Ok(());
        }

        // Insert in sorted order by z-index
        let insert_pos = self
            .render_order
            .iter()
            .position(|other| {
                self.groups
                    .get(other)
                    .map(|g| g.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, id);
        Ok(())
    }

    /// Detaches a group. Detaching an absent group is a no-op.
    pub fn detach_group(&mut self, id: LayerGroupId) {
        if self.attached.remove(&id) {
            self.render_order.retain(|other| *other != id);
        }
    }

    pub fn is_attached(&self, id: LayerGroupId) -> bool {
        self.attached.contains(&id)
    }

    pub fn group(&self, id: LayerGroupId) -> Option<&LayerGroup> {
        self.groups.get(&id)
    }

    /// Attached groups in render order
    pub fn attached_groups(&self) -> Vec<&LayerGroup> {
        self.render_order
            .iter()
            .filter_map(|id| self.groups.get(id))
            .collect()
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.insert(marker.id(), marker);
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> Option<Marker> {
        self.markers.remove(&id)
    }

    /// Finds a marker that is currently on the map, standalone or through an attached group.
    pub fn visible_marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id).or_else(|| {
            self.render_order
                .iter()
                .filter_map(|gid| self.groups.get(gid))
                .find_map(|g| g.marker(id))
        })
    }

    /// Like [`visible_marker`](Self::visible_marker) but also searches detached groups.
    pub fn marker_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        if self.markers.contains_key(&id) {
            return self.markers.get_mut(&id);
        }
        self.groups.values_mut().find_map(|g| g.marker_mut(id))
    }

    /// Number of markers currently on the map.
    pub fn visible_marker_count(&self) -> usize {
        self.markers.len() + self.attached_groups().iter().map(|g| g.len()).sum::<usize>()
    }

    pub fn standalone_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
