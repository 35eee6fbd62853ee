//! Configuration panel: a single-field form for the widget title.
//!
//! Submitting (Enter in the field, or clicking the update button) emits
//! [`PropertiesChanged`]; the panel never mutates the chart itself. The host
//! propagates the new title back through its property lifecycle.

use balancebar_core::{
    widget::{LayoutResult, TypeId},
    Canvas, Color, Constraints, Event, FontWeight, Key, MouseButton, Point, Rect, Size, TextStyle,
    Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Message emitted when the form is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertiesChanged {
    /// The edited title
    pub widget_title: String,
}

const PANEL_PADDING: f32 = 15.0;
const LABEL_SIZE: f32 = 12.0;
const INPUT_TEXT_SIZE: f32 = 13.0;
const INPUT_HEIGHT: f32 = 32.0;
const BUTTON_HEIGHT: f32 = 36.0;
const FIELD_GAP: f32 = 15.0;
const HINT_SIZE: f32 = 11.0;

/// Single-field configuration form for the chart title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigPanel {
    /// Current field value
    value: String,
    /// Placeholder shown while the field is empty
    placeholder: String,
    /// Field label
    label: String,
    /// Submit button caption
    button_caption: String,
    /// Hint line under the button
    hint: String,
    #[serde(skip)]
    focused: bool,
    #[serde(skip)]
    cursor: usize,
    #[serde(skip)]
    button_pressed: bool,
    #[serde(skip)]
    bounds: Rect,
    #[serde(skip)]
    input_bounds: Rect,
    #[serde(skip)]
    button_bounds: Rect,
}

impl Default for ConfigPanel {
    fn default() -> Self {
        Self {
            value: String::new(),
            placeholder: "e.g. Current & Non-current".to_string(),
            label: "Widget Title".to_string(),
            button_caption: "Update Widget".to_string(),
            hint: "Click update to apply changes to the canvas.".to_string(),
            focused: false,
            cursor: 0,
            button_pressed: false,
            bounds: Rect::default(),
            input_bounds: Rect::default(),
            button_bounds: Rect::default(),
        }
    }
}

impl ConfigPanel {
    /// Create a new panel with an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field value (builder).
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.value.len();
        self
    }

    /// Get the field value.
    #[must_use]
    pub fn get_value(&self) -> &str {
        &self.value
    }

    /// Set the field value in place (host pushes the current title back in).
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Check if the field has keyboard focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    fn submit(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(PropertiesChanged {
            widget_title: self.value.clone(),
        }))
    }

    fn insert_text(&mut self, text: &str) {
        self.value.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut new_cursor = self.cursor - 1;
        while !self.value.is_char_boundary(new_cursor) {
            new_cursor -= 1;
        }
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    fn delete(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        let mut end = self.cursor + 1;
        while !self.value.is_char_boundary(end) {
            end += 1;
        }
        self.value.drain(self.cursor..end);
    }

    fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        while !self.value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn move_right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor += 1;
        while !self.value.is_char_boundary(self.cursor) {
            self.cursor += 1;
        }
    }
}

impl Widget for ConfigPanel {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let height = PANEL_PADDING * 2.0
            + LABEL_SIZE
            + 5.0
            + INPUT_HEIGHT
            + FIELD_GAP
            + BUTTON_HEIGHT
            + 5.0
            + HINT_SIZE;
        let width = if constraints.max_width.is_finite() {
            constraints.max_width
        } else {
            280.0
        };
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let inner_width = (bounds.width - PANEL_PADDING * 2.0).max(0.0);
        let x = bounds.x + PANEL_PADDING;
        let input_y = bounds.y + PANEL_PADDING + LABEL_SIZE + 5.0;
        self.input_bounds = Rect::new(x, input_y, inner_width, INPUT_HEIGHT);
        self.button_bounds = Rect::new(
            x,
            self.input_bounds.bottom() + FIELD_GAP,
            inner_width,
            BUTTON_HEIGHT,
        );
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let x = self.bounds.x + PANEL_PADDING;
        canvas.draw_text(
            &self.label,
            Point::new(x, self.bounds.y + PANEL_PADDING + LABEL_SIZE),
            &TextStyle {
                size: LABEL_SIZE,
                color: Color::new(0.2, 0.2, 0.2, 1.0),
                weight: FontWeight::Bold,
                italic: false,
            },
        );

        // Input box with either the value or the placeholder.
        canvas.fill_rect(self.input_bounds, Color::WHITE);
        canvas.stroke_rect(self.input_bounds, Color::new(0.8, 0.8, 0.8, 1.0), 1.0);
        let text_baseline = self.input_bounds.y + (INPUT_HEIGHT + INPUT_TEXT_SIZE) / 2.0;
        if self.value.is_empty() {
            canvas.draw_text(
                &self.placeholder,
                Point::new(x + 8.0, text_baseline),
                &TextStyle {
                    size: INPUT_TEXT_SIZE,
                    color: Color::new(0.6, 0.6, 0.6, 1.0),
                    weight: FontWeight::Normal,
                    italic: true,
                },
            );
        } else {
            canvas.draw_text(
                &self.value,
                Point::new(x + 8.0, text_baseline),
                &TextStyle {
                    size: INPUT_TEXT_SIZE,
                    color: Color::BLACK,
                    weight: FontWeight::Normal,
                    italic: false,
                },
            );
        }
        if self.focused {
            let caret_x = x
                + 8.0
                + self.value[..self.cursor].chars().count() as f32 * INPUT_TEXT_SIZE * 0.6;
            canvas.fill_rect(
                Rect::new(caret_x, self.input_bounds.y + 6.0, 1.0, INPUT_HEIGHT - 12.0),
                Color::BLACK,
            );
        }

        // Submit button.
        let button_color = if self.button_pressed {
            Color::new(0.031, 0.329, 0.627, 1.0) // #0854a0
        } else {
            Color::new(0.039, 0.431, 0.82, 1.0) // #0a6ed1
        };
        canvas.fill_rounded_rect(self.button_bounds, 4.0, button_color);
        let caption_width =
            self.button_caption.len() as f32 * INPUT_TEXT_SIZE * 0.6;
        canvas.draw_text(
            &self.button_caption,
            Point::new(
                self.button_bounds.x + (self.button_bounds.width - caption_width) / 2.0,
                self.button_bounds.y + (BUTTON_HEIGHT + INPUT_TEXT_SIZE) / 2.0,
            ),
            &TextStyle {
                size: INPUT_TEXT_SIZE,
                color: Color::WHITE,
                weight: FontWeight::Bold,
                italic: false,
            },
        );

        canvas.draw_text(
            &self.hint,
            Point::new(x, self.button_bounds.bottom() + 5.0 + HINT_SIZE),
            &TextStyle {
                size: HINT_SIZE,
                color: Color::new(0.4, 0.4, 0.4, 1.0),
                weight: FontWeight::Normal,
                italic: true,
            },
        );
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                self.focused = self.input_bounds.contains_point(position);
                if self.focused {
                    self.cursor = self.value.len();
                }
                self.button_pressed = self.button_bounds.contains_point(position);
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let was_pressed = self.button_pressed;
                self.button_pressed = false;
                if was_pressed && self.button_bounds.contains_point(position) {
                    self.submit()
                } else {
                    None
                }
            }
            Event::MouseLeave => {
                self.button_pressed = false;
                None
            }
            Event::FocusIn => {
                self.focused = true;
                None
            }
            Event::FocusOut => {
                self.focused = false;
                None
            }
            Event::TextInput { text } if self.focused => {
                self.insert_text(text);
                None
            }
            Event::KeyDown { key } if self.focused => match key {
                Key::Enter => self.submit(),
                Key::Backspace => {
                    self.backspace();
                    None
                }
                Key::Delete => {
                    self.delete();
                    None
                }
                Key::Left => {
                    self.move_left();
                    None
                }
                Key::Right => {
                    self.move_right();
                    None
                }
                Key::Home => {
                    self.cursor = 0;
                    None
                }
                Key::End => {
                    self.cursor = self.value.len();
                    None
                }
            },
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn is_focusable(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANEL_BOUNDS: Rect = Rect::new(0.0, 0.0, 280.0, 140.0);

    fn laid_out_panel() -> ConfigPanel {
        let mut panel = ConfigPanel::new();
        panel.layout(PANEL_BOUNDS);
        panel
    }

    fn point_in(rect: Rect) -> Point {
        Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    fn type_text(panel: &mut ConfigPanel, text: &str) {
        panel.event(&Event::MouseDown {
            position: point_in(panel.input_bounds),
            button: MouseButton::Left,
        });
        panel.event(&Event::TextInput {
            text: text.to_string(),
        });
    }

    #[test]
    fn test_submit_via_enter_emits_properties_changed() {
        let mut panel = laid_out_panel();
        type_text(&mut panel, "Balance Sheet");
        let message = panel
            .event(&Event::KeyDown { key: Key::Enter })
            .expect("enter should submit");
        let changed = message.downcast::<PropertiesChanged>().expect("downcast");
        assert_eq!(changed.widget_title, "Balance Sheet");
    }

    #[test]
    fn test_submit_via_button_click() {
        let mut panel = laid_out_panel();
        type_text(&mut panel, "Quarterly");
        let button_center = point_in(panel.button_bounds);
        panel.event(&Event::MouseDown {
            position: button_center,
            button: MouseButton::Left,
        });
        let message = panel
            .event(&Event::MouseUp {
                position: button_center,
                button: MouseButton::Left,
            })
            .expect("button release should submit");
        let changed = message.downcast::<PropertiesChanged>().expect("downcast");
        assert_eq!(changed.widget_title, "Quarterly");
    }

    #[test]
    fn test_release_off_button_does_not_submit() {
        let mut panel = laid_out_panel();
        panel.event(&Event::MouseDown {
            position: point_in(panel.button_bounds),
            button: MouseButton::Left,
        });
        assert!(panel
            .event(&Event::MouseUp {
                position: Point::new(-10.0, -10.0),
                button: MouseButton::Left,
            })
            .is_none());
    }

    #[test]
    fn test_typing_requires_focus() {
        let mut panel = laid_out_panel();
        panel.event(&Event::TextInput {
            text: "ignored".to_string(),
        });
        assert_eq!(panel.get_value(), "");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut panel = laid_out_panel();
        type_text(&mut panel, "abc");
        panel.event(&Event::KeyDown {
            key: Key::Backspace,
        });
        assert_eq!(panel.get_value(), "ab");
        panel.event(&Event::KeyDown { key: Key::Home });
        panel.event(&Event::KeyDown { key: Key::Delete });
        assert_eq!(panel.get_value(), "b");
    }

    #[test]
    fn test_cursor_movement_and_insert() {
        let mut panel = laid_out_panel();
        type_text(&mut panel, "ac");
        panel.event(&Event::KeyDown { key: Key::Left });
        panel.event(&Event::TextInput {
            text: "b".to_string(),
        });
        assert_eq!(panel.get_value(), "abc");
        panel.event(&Event::KeyDown { key: Key::End });
        panel.event(&Event::TextInput {
            text: "d".to_string(),
        });
        assert_eq!(panel.get_value(), "abcd");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut panel = laid_out_panel();
        type_text(&mut panel, "é€");
        panel.event(&Event::KeyDown {
            key: Key::Backspace,
        });
        assert_eq!(panel.get_value(), "é");
        panel.event(&Event::KeyDown { key: Key::Left });
        panel.event(&Event::KeyDown { key: Key::Right });
        assert_eq!(panel.get_value(), "é");
    }

    #[test]
    fn test_set_value_round_trip() {
        let mut panel = ConfigPanel::new();
        panel.set_value("Current & Non-current");
        assert_eq!(panel.get_value(), "Current & Non-current");
    }

    #[test]
    fn test_placeholder_painted_when_empty() {
        let panel = laid_out_panel();
        let mut canvas = balancebar_core::RecordingCanvas::new();
        panel.paint(&mut canvas);
        let runs: Vec<&str> = canvas.text_runs().collect();
        assert!(runs.contains(&"e.g. Current & Non-current"));
        assert!(runs.contains(&"Widget Title"));
        assert!(runs.contains(&"Update Widget"));
    }

    #[test]
    fn test_submit_does_not_mutate_value() {
        let mut panel = laid_out_panel();
        type_text(&mut panel, "T");
        panel.event(&Event::KeyDown { key: Key::Enter });
        assert_eq!(panel.get_value(), "T");
    }
}
