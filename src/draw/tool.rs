//! Drawing tool selection and options.

use super::shape::{ShapeKind, ShapeStyle};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a drawing tool registered with a map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToolId(pub(crate) u64);

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draw-tool#{}", self.0)
    }
}

/// Corner of the map the drawing toolbar is docked to.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ToolPosition {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A drawing tool instance bound to a map surface.
///
/// Only rectangles can be drawn with it; every other shape kind is disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawTool {
    id: ToolId,
    position: ToolPosition,
    rectangle: ShapeStyle,
}

impl DrawTool {
    /// Creates a tool that draws rectangles with `style` and nothing else.
    pub fn rectangle_only(style: ShapeStyle, position: ToolPosition) -> Self {
        Self {
            id: ToolId(super::next_id()),
            position,
            rectangle: style,
        }
    }

    pub fn id(&self) -> ToolId {
        self.id
    }

    pub fn position(&self) -> ToolPosition {
        self.position
    }

    /// Style stamped onto every rectangle the tool produces.
    pub fn rectangle_style(&self) -> ShapeStyle {
        self.rectangle
    }

    /// Whether the toolbar offers a button for `kind`.
    pub fn allows(&self, kind: ShapeKind) -> bool {
        kind == ShapeKind::Rectangle
    }

    pub fn enabled_kinds(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        ShapeKind::ALL.into_iter().filter(|kind| self.allows(*kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rectangles_are_enabled() {
        let tool = DrawTool::rectangle_only(ShapeStyle::default(), ToolPosition::TopLeft);
        let enabled: Vec<_> = tool.enabled_kinds().collect();
        assert_eq!(enabled, vec![ShapeKind::Rectangle]);
        assert!(!tool.allows(ShapeKind::Polygon));
        assert!(!tool.allows(ShapeKind::Circle));
        assert!(!tool.allows(ShapeKind::CircleMarker));
        assert!(!tool.allows(ShapeKind::Marker));
        assert!(!tool.allows(ShapeKind::Polyline));
    }

    #[test]
    fn position_uses_kebab_case() {
        let parsed: ToolPosition = serde_json::from_str("\"bottom-right\"").unwrap();
        assert_eq!(parsed, ToolPosition::BottomRight);
    }
}
