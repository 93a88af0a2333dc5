use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PaintError;

/// Every tool the drawing surface knows about.
///
/// Freehand tools extend one path for the whole stroke, shape tools redraw a
/// single shape between the anchor and the pointer on every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Triangle,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Brush,
        Tool::Eraser,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Triangle,
    ];

    pub const SHAPES: [Tool; 3] = [Tool::Rectangle, Tool::Circle, Tool::Triangle];

    pub const FREEHAND: [Tool; 2] = [Tool::Brush, Tool::Eraser];

    /// Stable identifier used in settings and by `FromStr`
    pub fn id(self) -> &'static str {
        match self {
            Tool::Brush => "brush",
            Tool::Eraser => "eraser",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Triangle => "triangle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Brush => "Brush",
            Tool::Eraser => "Eraser",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
            Tool::Triangle => "Triangle",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tool::Brush => "🖌",
            Tool::Eraser => "⌫",
            Tool::Rectangle => "☐",
            Tool::Circle => "○",
            Tool::Triangle => "△",
        }
    }

    /// True for tools whose output honors the fill toggle
    pub fn is_shape(self) -> bool {
        matches!(self, Tool::Rectangle | Tool::Circle | Tool::Triangle)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tool {
    type Err = PaintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| PaintError::UnknownTool(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool_is_brush() {
        assert_eq!(Tool::default(), Tool::Brush);
    }

    #[test]
    fn test_parse_tool_ids() {
        for tool in Tool::ALL {
            assert_eq!(tool.id().parse::<Tool>().unwrap(), tool);
        }
        assert_eq!(" Circle ".parse::<Tool>().unwrap(), Tool::Circle);
    }

    #[test]
    fn test_unknown_tool_is_rejected() {
        let err = "lasso".parse::<Tool>().unwrap_err();
        assert!(matches!(err, PaintError::UnknownTool(id) if id == "lasso"));
    }

    #[test]
    fn test_shape_classification() {
        assert!(Tool::SHAPES.iter().all(|tool| tool.is_shape()));
        assert!(Tool::FREEHAND.iter().all(|tool| !tool.is_shape()));
    }

    #[test]
    fn test_serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&Tool::Triangle).unwrap();
        assert_eq!(json, "\"triangle\"");
        let tool: Tool = serde_json::from_str("\"eraser\"").unwrap();
        assert_eq!(tool, Tool::Eraser);
    }
}
