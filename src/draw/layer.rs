//! Overlay container for user-drawn shapes.

use super::shape::Shape;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Identity of an overlay group registered with a map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerGroupId(pub(crate) u64);

impl fmt::Display for LayerGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-group#{}", self.0)
    }
}

/// Overlay group shared between the controller that owns it and the map
/// surface that renders it.
pub type SharedLayerGroup = Rc<RefCell<LayerGroup>>;

/// Container for shapes rendered above the base map.
///
/// Layers are kept in insertion order (first = bottom, last = top).
#[derive(Debug)]
pub struct LayerGroup {
    id: LayerGroupId,
    layers: Vec<Shape>,
}

impl Default for LayerGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerGroup {
    /// Creates an empty group with a fresh id.
    pub fn new() -> Self {
        Self {
            id: LayerGroupId(super::next_id()),
            layers: Vec::new(),
        }
    }

    /// Creates an empty group wrapped for sharing with a map surface.
    pub fn shared() -> SharedLayerGroup {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn id(&self) -> LayerGroupId {
        self.id
    }

    /// Removes every shape from the group.
    pub fn clear_layers(&mut self) {
        self.layers.clear();
    }

    /// Adds a shape on top of the existing ones.
    pub fn add_layer(&mut self, shape: Shape) {
        self.layers.push(shape);
    }

    pub fn layers(&self) -> &[Shape] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
