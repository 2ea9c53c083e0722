//! Shape definitions for drawn map overlays.

use super::color::{Color, DEFAULT_STROKE};
use crate::geo::{Bounds, GeoError, Point};
use std::fmt;
use thiserror::Error;

/// Stroke and fill options applied to a drawn rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    /// Outline color
    pub color: Color,
    /// Outline width in pixels
    pub weight: f64,
    /// Outline opacity (0.0 - 1.0)
    pub opacity: f64,
    /// Fill opacity (0.0 - 1.0)
    pub fill_opacity: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_STROKE,
            weight: 4.0,
            opacity: 0.5,
            fill_opacity: 0.2,
        }
    }
}

/// The kinds of shape a map drawing tool knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle,
    Polygon,
    Polyline,
    Circle,
    CircleMarker,
    Marker,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Rectangle,
        ShapeKind::Polygon,
        ShapeKind::Polyline,
        ShapeKind::Circle,
        ShapeKind::CircleMarker,
        ShapeKind::Marker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Polyline => "polyline",
            ShapeKind::Circle => "circle",
            ShapeKind::CircleMarker => "circle-marker",
            ShapeKind::Marker => "marker",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a drawn shape cannot be turned into a rectangle selection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("expected a rectangle, got a {0}")]
    UnexpectedKind(ShapeKind),

    #[error("rectangle has zero area")]
    Degenerate,

    #[error("invalid corner: {0}")]
    InvalidCoordinate(#[from] GeoError),
}

/// A raw shape as delivered by a drawing tool's creation event.
///
/// Geometry is carried as the tool reported it; nothing is validated until
/// [`Shape::rectangle_bounds`] is asked for.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle dragged between two opposite corners
    Rectangle {
        /// Drag start and drag end, in either order
        corners: [Point; 2],
        /// Stroke/fill options
        style: ShapeStyle,
    },
    /// Closed polygon through the given vertices
    Polygon { points: Vec<Point> },
    /// Open line through the given vertices
    Polyline { points: Vec<Point> },
    /// Circle with a ground radius
    Circle { center: Point, radius_m: f64 },
    /// Circle with a fixed on-screen radius
    CircleMarker { center: Point, radius_px: f64 },
    /// Single pin
    Marker { position: Point },
}

impl Shape {
    /// Convenience constructor for a default-styled rectangle.
    pub fn rectangle(a: Point, b: Point) -> Self {
        Shape::Rectangle {
            corners: [a, b],
            style: ShapeStyle::default(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
            Shape::Polygon { .. } => ShapeKind::Polygon,
            Shape::Polyline { .. } => ShapeKind::Polyline,
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::CircleMarker { .. } => ShapeKind::CircleMarker,
            Shape::Marker { .. } => ShapeKind::Marker,
        }
    }

    /// Replaces the style of a rectangle; other shapes carry no style and are left alone.
    pub fn apply_style(&mut self, new_style: ShapeStyle) {
        if let Shape::Rectangle { style, .. } = self {
            *style = new_style;
        }
    }

    pub fn style(&self) -> Option<&ShapeStyle> {
        match self {
            Shape::Rectangle { style, .. } => Some(style),
            _ => None,
        }
    }

    /// Computes the bounding rectangle of a drawn rectangle.
    ///
    /// Fails for any other shape kind, for corners that are not valid map
    /// coordinates, and for rectangles with zero width or height.
    pub fn rectangle_bounds(&self) -> Result<Bounds, ShapeError> {
        let Shape::Rectangle { corners, .. } = self else {
            return Err(ShapeError::UnexpectedKind(self.kind()));
        };
        let a = corners[0].validate()?;
        let b = corners[1].validate()?;
        let bounds = Bounds::from_corners(a, b);
        if bounds.is_degenerate() {
            return Err(ShapeError::Degenerate);
        }
        Ok(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> Point {
        Point::new(lat, lng).unwrap()
    }

    #[test]
    fn rectangle_bounds_normalizes_corners() {
        let shape = Shape::rectangle(point(10.5, 20.5), point(10.0, 20.0));
        let bounds = shape.rectangle_bounds().expect("rectangle should have bounds");
        assert_eq!(bounds.north_west(), point(10.5, 20.0));
        assert_eq!(bounds.south_east(), point(10.0, 20.5));
    }

    #[test]
    fn non_rectangles_are_rejected() {
        let shape = Shape::Polygon {
            points: vec![point(0.0, 0.0), point(1.0, 1.0), point(0.0, 1.0)],
        };
        assert_eq!(
            shape.rectangle_bounds(),
            Err(ShapeError::UnexpectedKind(ShapeKind::Polygon))
        );

        let marker = Shape::Marker {
            position: point(3.0, 4.0),
        };
        assert_eq!(
            marker.rectangle_bounds(),
            Err(ShapeError::UnexpectedKind(ShapeKind::Marker))
        );
    }

    #[test]
    fn zero_area_rectangle_is_degenerate() {
        let shape = Shape::rectangle(point(5.0, 5.0), point(5.0, 6.0));
        assert_eq!(shape.rectangle_bounds(), Err(ShapeError::Degenerate));
    }

    #[test]
    fn malformed_corner_is_reported() {
        let shape = Shape::Rectangle {
            corners: [
                Point {
                    lat: f64::NAN,
                    lng: 0.0,
                },
                point(1.0, 1.0),
            ],
            style: ShapeStyle::default(),
        };
        assert!(matches!(
            shape.rectangle_bounds(),
            Err(ShapeError::InvalidCoordinate(GeoError::NonFinite { .. }))
        ));
    }

    #[test]
    fn apply_style_only_touches_rectangles() {
        let style = ShapeStyle {
            weight: 9.0,
            ..ShapeStyle::default()
        };
        let mut rect = Shape::rectangle(point(0.0, 0.0), point(1.0, 1.0));
        rect.apply_style(style);
        assert_eq!(rect.style(), Some(&style));

        let mut marker = Shape::Marker {
            position: point(0.0, 0.0),
        };
        marker.apply_style(style);
        assert_eq!(marker.style(), None);
    }
}
