//! The closed coordinate ring reported for a selected area.

use super::bounds::Bounds;
use super::point::Point;
use serde::{Serialize, Serializer};

/// Number of points in a reported ring: four corners plus the closing point.
pub const RING_LEN: usize = 5;

/// Closed rectangle ring in the fixed order `[NW, NE, SE, SW, NW]`.
///
/// The only constructor is [`AreaCoordinates::from_bounds`], which writes the
/// north-west corner into both the first and the last slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaCoordinates([Point; RING_LEN]);

impl AreaCoordinates {
    pub fn from_bounds(bounds: &Bounds) -> Self {
        let nw = bounds.north_west();
        Self([
            nw,
            bounds.north_east(),
            bounds.south_east(),
            bounds.south_west(),
            nw,
        ])
    }

    pub fn points(&self) -> &[Point; RING_LEN] {
        &self.0
    }

    /// Returns the ring as `[lat, lng]` pairs.
    pub fn to_pairs(&self) -> [[f64; 2]; RING_LEN] {
        self.0.map(Point::to_pair)
    }

    pub fn len(&self) -> usize {
        RING_LEN
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a AreaCoordinates {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for AreaCoordinates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
