//! Draw commands for rendering backends.
//!
//! All painting reduces to these primitives. A backend replays the command
//! list; tests compare command lists directly.

use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Font weight for text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal weight
    #[default]
    Normal,
    /// Semi-bold weight
    SemiBold,
    /// Bold weight
    Bold,
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
    /// Italic text
    pub italic: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
            italic: false,
        }
    }
}

/// A single draw operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled rectangle, optionally with rounded corners.
    Rect {
        /// Bounds
        rect: Rect,
        /// Fill color
        color: Color,
        /// Corner radius (0.0 = square)
        corner_radius: f32,
    },
    /// Stroked rectangle outline.
    StrokeRect {
        /// Bounds
        rect: Rect,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f32,
    },
    /// Filled circle.
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Fill color
        color: Color,
    },
    /// Text run.
    Text {
        /// Text content
        text: String,
        /// Baseline position
        position: Point,
        /// Style
        style: TextStyle,
    },
    /// Push a clip region; subsequent commands are clipped to it.
    PushClip {
        /// Clip bounds
        rect: Rect,
    },
    /// Pop the most recent clip region.
    PopClip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_style_default() {
        let style = TextStyle::default();
        assert_eq!(style.size, 14.0);
        assert_eq!(style.weight, FontWeight::Normal);
        assert!(!style.italic);
    }

    #[test]
    fn test_draw_command_equality() {
        let a = DrawCommand::Rect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            color: Color::BLACK,
            corner_radius: 6.0,
        };
        let b = a.clone();
        assert_eq!(a, b);
    }
}
