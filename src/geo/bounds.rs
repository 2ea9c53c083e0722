//! Axis-aligned bounding rectangles.

use super::point::Point;

/// Axis-aligned rectangle described by its south-west and north-east corners.
///
/// The corners are normalized on construction, so `south <= north` and
/// `west <= east` always hold regardless of the drag direction that produced them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    south_west: Point,
    north_east: Point,
}

impl Bounds {
    /// Builds bounds from any two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            south_west: Point {
                lat: a.lat.min(b.lat),
                lng: a.lng.min(b.lng),
            },
            north_east: Point {
                lat: a.lat.max(b.lat),
                lng: a.lng.max(b.lng),
            },
        }
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn north_west(&self) -> Point {
        Point {
            lat: self.north(),
            lng: self.west(),
        }
    }

    pub fn north_east(&self) -> Point {
        self.north_east
    }

    pub fn south_east(&self) -> Point {
        Point {
            lat: self.south(),
            lng: self.east(),
        }
    }

    pub fn south_west(&self) -> Point {
        self.south_west
    }

    /// Returns `true` when the rectangle has no area (a line or a single point).
    pub fn is_degenerate(&self) -> bool {
        self.north() == self.south() || self.east() == self.west()
    }
}
