//! Geographic primitives used by the draw controller.
//!
//! - [`Point`]: a validated latitude/longitude pair
//! - [`Bounds`]: an axis-aligned bounding rectangle built from two opposite corners
//! - [`AreaCoordinates`]: the closed five-point ring reported for a selected area

pub mod area;
pub mod bounds;
pub mod point;

pub use area::AreaCoordinates;
pub use bounds::Bounds;
pub use point::{GeoError, Point};
