//! Cursor-anchored tooltip for segment hover information.

use balancebar_core::{
    widget::{LayoutResult, TypeId},
    Canvas, Color, Constraints, Event, FontWeight, Point, Rect, Size, TextStyle, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Vertical rise above the cursor, in pixels.
const CURSOR_RISE: f32 = 45.0;

/// Approximate glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Tooltip shown while hovering a bar segment.
///
/// Content is three lines: a bold header (`"Q1 (Current)"`), the raw value,
/// and the one-decimal share. Hiding only flips the visibility flag; the
/// tooltip stays allocated so rapid enter/leave cannot flicker or leave a
/// stuck-visible state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tooltip {
    header: String,
    value_line: String,
    share_line: String,
    visible: bool,
    background: Color,
    text_color: Color,
    padding: f32,
    corner_radius: f32,
    text_size: f32,
    /// Top-left corner, derived from the cursor position
    #[serde(skip)]
    position: Point,
    #[serde(skip)]
    bounds: Rect,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            header: String::new(),
            value_line: String::new(),
            share_line: String::new(),
            visible: false,
            background: Color::new(0.157, 0.157, 0.157, 0.95),
            text_color: Color::WHITE,
            padding: 8.0,
            corner_radius: 4.0,
            text_size: 12.0,
            position: Point::ORIGIN,
            bounds: Rect::default(),
        }
    }
}

impl Tooltip {
    /// Create a new hidden tooltip.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the three content lines.
    pub fn set_lines(
        &mut self,
        header: impl Into<String>,
        value_line: impl Into<String>,
        share_line: impl Into<String>,
    ) {
        self.header = header.into();
        self.value_line = value_line.into();
        self.share_line = share_line.into();
    }

    /// Track the pointer: anchor the tooltip a fixed offset above the cursor.
    pub fn follow_cursor(&mut self, cursor: Point) {
        self.position = cursor.offset(0.0, -CURSOR_RISE);
    }

    /// Make the tooltip visible.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the tooltip. The content and position are retained.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Check if visible.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Get the header line.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Current anchor position (top-left).
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    fn line_height(&self) -> f32 {
        self.text_size * 1.3
    }

    fn calculate_size(&self) -> Size {
        let widest = [&self.header, &self.value_line, &self.share_line]
            .into_iter()
            .map(|line| line.len() as f32 * self.text_size * CHAR_WIDTH_FACTOR)
            .fold(0.0, f32::max);
        Size::new(
            widest + self.padding * 2.0,
            self.line_height() * 3.0 + self.padding * 2.0,
        )
    }
}

impl Widget for Tooltip {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        if !self.visible || self.header.is_empty() {
            return Size::ZERO;
        }
        constraints.constrain(self.calculate_size())
    }

    fn layout(&mut self, _bounds: Rect) -> LayoutResult {
        // Positioned against the cursor, not the container; deliberately not
        // clipped to the chart bounds.
        if !self.visible || self.header.is_empty() {
            self.bounds = Rect::default();
            return LayoutResult { size: Size::ZERO };
        }
        let size = self.calculate_size();
        self.bounds = Rect::from_point_size(self.position, size);
        LayoutResult { size }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.visible || self.header.is_empty() {
            return;
        }

        let size = self.calculate_size();
        let bounds = Rect::from_point_size(self.position, size);
        canvas.fill_rounded_rect(bounds, self.corner_radius, self.background);

        let line_height = self.line_height();
        let x = bounds.x + self.padding;
        let mut y = bounds.y + self.padding + self.text_size;

        canvas.draw_text(
            &self.header,
            Point::new(x, y),
            &TextStyle {
                size: self.text_size,
                color: self.text_color,
                weight: FontWeight::Bold,
                italic: false,
            },
        );
        y += line_height;
        canvas.draw_text(
            &self.value_line,
            Point::new(x, y),
            &TextStyle {
                size: self.text_size,
                color: self.text_color,
                weight: FontWeight::Normal,
                italic: false,
            },
        );
        y += line_height;
        canvas.draw_text(
            &self.share_line,
            Point::new(x, y),
            &TextStyle {
                size: self.text_size - 1.0,
                color: self.text_color.with_alpha(0.8),
                weight: FontWeight::Normal,
                italic: false,
            },
        );
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        // Visibility is driven by the chart's hit testing; the tooltip only
        // reacts to the pointer leaving entirely.
        if matches!(event, Event::MouseLeave) {
            self.hide();
        }
        None
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balancebar_core::RecordingCanvas;

    fn hover_tooltip() -> Tooltip {
        let mut tooltip = Tooltip::new();
        tooltip.set_lines("Q1 (Current)", "Value: 70 Bln", "70.0% Share");
        tooltip
    }

    #[test]
    fn test_starts_hidden() {
        let tooltip = Tooltip::new();
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_show_hide_round_trips() {
        let mut tooltip = hover_tooltip();
        tooltip.show();
        assert!(tooltip.is_visible());
        tooltip.hide();
        assert!(!tooltip.is_visible());
        // Rapid re-enter must come back cleanly.
        tooltip.show();
        assert!(tooltip.is_visible());
        assert_eq!(tooltip.header(), "Q1 (Current)");
    }

    #[test]
    fn test_follow_cursor_rises_above_pointer() {
        let mut tooltip = hover_tooltip();
        tooltip.follow_cursor(Point::new(200.0, 300.0));
        assert_eq!(tooltip.position(), Point::new(200.0, 255.0));
    }

    #[test]
    fn test_hidden_tooltip_paints_nothing() {
        let tooltip = hover_tooltip();
        let mut canvas = RecordingCanvas::new();
        tooltip.paint(&mut canvas);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_visible_tooltip_paints_three_lines() {
        let mut tooltip = hover_tooltip();
        tooltip.show();
        tooltip.follow_cursor(Point::new(100.0, 100.0));
        let mut canvas = RecordingCanvas::new();
        tooltip.paint(&mut canvas);
        let runs: Vec<&str> = canvas.text_runs().collect();
        assert_eq!(runs, vec!["Q1 (Current)", "Value: 70 Bln", "70.0% Share"]);
        // Background plus three text runs.
        assert_eq!(canvas.command_count(), 4);
    }

    #[test]
    fn test_measure_zero_when_hidden() {
        let tooltip = hover_tooltip();
        let size = tooltip.measure(Constraints::loose(Size::new(500.0, 500.0)));
        assert_eq!(size, Size::ZERO);
    }

    #[test]
    fn test_mouse_leave_hides() {
        let mut tooltip = hover_tooltip();
        tooltip.show();
        tooltip.event(&Event::MouseLeave);
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_layout_tracks_position() {
        let mut tooltip = hover_tooltip();
        tooltip.show();
        tooltip.follow_cursor(Point::new(50.0, 100.0));
        let result = tooltip.layout(Rect::new(0.0, 0.0, 400.0, 400.0));
        assert!(result.size.width > 0.0);
        assert_eq!(tooltip.bounds().x, 50.0);
        assert_eq!(tooltip.bounds().y, 55.0);
    }
}
