//! Library exports for the mapselect area selector.
//!
//! A user drags a single rectangle on a map; the [`controller`] turns the
//! drawing tool's shape-created event into a closed ring of corner
//! coordinates and hands it to a callback, typically feeding the
//! [`presenter`]. The map itself is reached only through the
//! [`surface::MapSurface`] capability trait.

pub mod config;
pub mod controller;
pub mod draw;
pub mod geo;
pub mod presenter;
pub mod replay;
pub mod surface;

pub use config::Config;
pub use controller::{ControllerHandle, DrawController};
pub use geo::{AreaCoordinates, Point};
