//! Map surface capabilities consumed by the draw controller.
//!
//! The map surface owns native-side registries (overlay layers, toolbar
//! controls, event listeners) that outlive any Rust value pointing at them.
//! Everything registered through [`MapSurface`] therefore has to be
//! unregistered explicitly; nothing is released by dropping a reference.

pub mod memory;

use crate::draw::{DrawTool, SharedLayerGroup, Shape};
use std::fmt;
use thiserror::Error;

pub use memory::{MemorySurface, TileLayer, Viewport};

/// Payload of the "shape created" event fired when a draw gesture completes.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCreatedEvent {
    pub shape: Shape,
}

/// Listener registered for shape-created events.
pub type ShapeCreatedHandler = Box<dyn FnMut(&ShapeCreatedEvent)>;

/// Receipt for an event subscription; hand it back to [`MapSurface::off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(pub(crate) u64);

impl fmt::Display for SubscriptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription#{}", self.0)
    }
}

/// Errors a map surface reports when asked to register something.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("overlay layer rejected: {0}")]
    OverlayRejected(String),

    #[error("drawing tool rejected: {0}")]
    ToolRejected(String),

    #[error("{0} is already registered with this map")]
    AlreadyRegistered(String),

    #[error("no drawing tool for {0} is attached to this map")]
    NoDrawingTool(String),
}

/// The subset of a map's API the draw controller relies on.
///
/// Methods take `&self`: a map instance is a shared handle onto mutable native
/// state, and the implementation decides how that state is guarded.
pub trait MapSurface {
    /// Registers an overlay group so its shapes render above the base map.
    fn add_overlay_layer(&self, group: &SharedLayerGroup) -> Result<(), SurfaceError>;

    /// Unregisters an overlay group. Unknown groups are ignored.
    fn remove_overlay_layer(&self, group: &SharedLayerGroup);

    /// Installs a drawing tool on the map's toolbar.
    fn add_drawing_tool(&self, tool: &DrawTool) -> Result<(), SurfaceError>;

    /// Removes a drawing tool. Unknown tools are ignored.
    fn remove_drawing_tool(&self, tool: &DrawTool);

    /// Subscribes to shape-created events.
    fn on_shape_created(&self, handler: ShapeCreatedHandler) -> SubscriptionToken;

    /// Cancels a subscription. Unknown tokens are ignored.
    fn off(&self, token: SubscriptionToken);
}
