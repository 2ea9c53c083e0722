//! Drawn shapes, the overlay group holding them, and the drawing tool.
//!
//! - [`Color`] / [`ShapeStyle`]: how a drawn rectangle is stroked and filled
//! - [`Shape`]: raw shapes a drawing tool can emit
//! - [`LayerGroup`]: overlay container for user-drawn shapes
//! - [`DrawTool`]: rectangle-only drawing tool options

pub mod color;
pub mod layer;
pub mod shape;
pub mod tool;

use std::sync::atomic::{AtomicU64, Ordering};

pub use color::Color;
pub use layer::{LayerGroup, LayerGroupId, SharedLayerGroup};
pub use shape::{Shape, ShapeError, ShapeKind, ShapeStyle};
pub use tool::{DrawTool, ToolId, ToolPosition};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Allocates a process-unique id for overlay groups and tools.
pub(crate) fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}
