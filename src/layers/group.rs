use crate::{
    data::listing::PropertyType,
    layers::{
        base::{LayerProperties, LayerType},
        marker::{Marker, MarkerId},
    },
};
use std::ops::{Index, IndexMut};

/// Handle to a layer group registered with a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerGroupId(pub u64);

/// A collection of markers attached to or detached from the map as a unit.
#[derive(Debug)]
pub struct LayerGroup {
    properties: LayerProperties,
    markers: Vec<Marker>,
}

impl LayerGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            properties: LayerProperties::new(name.into(), LayerType::Group),
            markers: Vec::new(),
        }
    }

    pub fn with_markers(name: impl Into<String>, markers: Vec<Marker>) -> Self {
        let mut group = Self::new(name);
        group.markers = markers;
        group
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id() == id)
    }

    pub fn marker_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.markers.iter_mut().find(|m| m.id() == id)
    }

    pub fn name(&self) -> &str {
        &self.properties.name
    }

    pub fn z_index(&self) -> i32 {
        self.properties.z_index
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// One value per [`PropertyType`], indexed by the category's ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByCategory<T>([T; 4]);

impl<T> ByCategory<T> {
    pub fn from_fn(mut f: impl FnMut(PropertyType) -> T) -> Self {
        Self(PropertyType::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyType, &T)> {
        PropertyType::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<PropertyType> for ByCategory<T> {
    type Output = T;

    fn index(&self, kind: PropertyType) -> &T {
        &self.0[kind.index()]
    }
}

impl<T> IndexMut<PropertyType> for ByCategory<T> {
    fn index_mut(&mut self, kind: PropertyType) -> &mut T {
        &mut self.0[kind.index()]
    }
}
