//! Two-segment balance bar chart widget.
//!
//! Each record renders as one row: a labels line (current value, category,
//! non-current value) above a pill-shaped bar split into a current and a
//! non-current segment, widths proportional to the record's shares. Hovering
//! a segment drives the tooltip; releasing a click on a segment emits
//! [`SegmentClicked`] for the host.

use crate::data::{normalize, RawData};
use crate::formats::{tooltip_share_line, tooltip_value_line};
use crate::rows::{build_rows, RowView, SegmentKind};
use crate::tooltip::Tooltip;
use balancebar_core::{
    widget::{LayoutResult, TypeId},
    Canvas, Color, Constraints, Event, FontWeight, MouseButton, Point, Rect, Size, TextStyle,
    Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Message emitted when a bar segment is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentClicked {
    /// Category label of the clicked row
    pub category: String,
    /// Which segment was clicked
    pub kind: SegmentKind,
    /// Raw value carried by that segment
    pub value: f64,
}

/// Inline message shown when the dataset string fails to parse.
const PARSE_ERROR_TEXT: &str = "Error parsing JSON data";

/// Placeholder shown for an empty dataset.
const NO_DATA_TEXT: &str = "No data configured.";

/// Default title, matching the host-side property default.
pub const DEFAULT_TITLE: &str = "Current & Non-current";

// Layout constants (pixel values from the widget this replaces).
const PADDING: f32 = 10.0;
const TITLE_SIZE: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;
const HEADER_GAP: f32 = 25.0;
const LABEL_SIZE: f32 = 14.0;
const LABEL_GAP: f32 = 8.0;
const BAR_HEIGHT: f32 = 12.0;
const ROW_GAP: f32 = 25.0;
const LEGEND_SIZE: f32 = 13.0;
const LEGEND_DOT_RADIUS: f32 = 4.0;
const LEGEND_ITEM_GAP: f32 = 15.0;
const DEFAULT_WIDTH: f32 = 400.0;
const CHAR_WIDTH_FACTOR: f32 = 0.6;

const ROW_HEIGHT: f32 = LABEL_SIZE + LABEL_GAP + BAR_HEIGHT;

/// What the chart body currently renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderState {
    /// No dataset configured; placeholder text is shown.
    Empty,
    /// The dataset string failed to parse; an inline error is shown and no
    /// prior chart content is retained.
    DataError(String),
    /// One view model per record, in input order.
    Rows(Vec<RowView>),
}

/// Hit region for one rendered segment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SegmentHit {
    rect: Rect,
    row: usize,
    segment: usize,
}

/// The balance bar chart widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceBarChart {
    /// Chart title shown in the header
    title: String,
    /// Current body content
    state: RenderState,
    /// Fill for current segments
    current_color: Color,
    /// Fill for non-current segments
    non_current_color: Color,
    /// Bar track (background) color
    track_color: Color,
    /// Header and label text color
    text_color: Color,
    /// Placeholder/legend text color
    muted_color: Color,
    /// Show the header legend
    show_legend: bool,
    #[serde(skip)]
    bounds: Rect,
    #[serde(skip)]
    hits: Vec<SegmentHit>,
    #[serde(skip)]
    hovered: Option<(usize, usize)>,
    #[serde(skip)]
    pressed: Option<(usize, usize)>,
    #[serde(skip)]
    tooltip: Tooltip,
}

impl Default for BalanceBarChart {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            state: RenderState::Empty,
            current_color: Color::new(0.196, 0.212, 0.227, 1.0), // #32363a
            non_current_color: Color::new(0.69, 0.69, 0.69, 1.0), // #b0b0b0
            track_color: Color::new(0.937, 0.937, 0.937, 1.0),   // #efefef
            text_color: Color::new(0.196, 0.212, 0.227, 1.0),    // #32363a
            muted_color: Color::new(0.6, 0.6, 0.6, 1.0),         // #999999
            show_legend: true,
            bounds: Rect::default(),
            hits: Vec::new(),
            hovered: None,
            pressed: None,
            tooltip: Tooltip::new(),
        }
    }
}

impl BalanceBarChart {
    /// Create a new chart with the default title and an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the current-segment color.
    #[must_use]
    pub const fn current_color(mut self, color: Color) -> Self {
        self.current_color = color;
        self
    }

    /// Set the non-current-segment color.
    #[must_use]
    pub const fn non_current_color(mut self, color: Color) -> Self {
        self.non_current_color = color;
        self
    }

    /// Set the bar track color.
    #[must_use]
    pub const fn track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    /// Set whether the header legend is drawn.
    #[must_use]
    pub const fn show_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// Get the title.
    #[must_use]
    pub fn get_title(&self) -> &str {
        &self.title
    }

    /// Update the title in place.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Current render state.
    #[must_use]
    pub const fn render_state(&self) -> &RenderState {
        &self.state
    }

    /// Rendered rows (empty when the body shows a placeholder or error).
    #[must_use]
    pub fn rows(&self) -> &[RowView] {
        match &self.state {
            RenderState::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// Inline parse error text, if the chart is in the error state.
    #[must_use]
    pub fn data_error(&self) -> Option<&str> {
        match &self.state {
            RenderState::DataError(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// The hover tooltip.
    #[must_use]
    pub const fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Replace the dataset and rebuild the body from scratch.
    ///
    /// Prior visual content is never retained: a parse failure swaps the body
    /// to an inline error, an empty dataset to the no-data placeholder. Hover
    /// and pressed state are cleared so regenerated rows never see stale
    /// interactions.
    pub fn set_data(&mut self, raw: &RawData) {
        self.state = match normalize(raw) {
            Ok(records) if records.is_empty() => RenderState::Empty,
            Ok(records) => RenderState::Rows(build_rows(&records)),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "chart dataset failed to parse");
                RenderState::DataError(PARSE_ERROR_TEXT.to_string())
            }
        };
        self.hovered = None;
        self.pressed = None;
        self.tooltip.hide();
        self.rebuild_hits();
    }

    /// Inner content rect, inset by the container padding.
    fn content_rect(&self) -> Rect {
        Rect::new(
            self.bounds.x + PADDING,
            self.bounds.y + PADDING,
            (self.bounds.width - PADDING * 2.0).max(0.0),
            (self.bounds.height - PADDING * 2.0).max(0.0),
        )
    }

    /// Body rect below the header.
    fn body_rect(&self) -> Rect {
        let content = self.content_rect();
        let header = HEADER_HEIGHT + HEADER_GAP;
        Rect::new(
            content.x,
            content.y + header,
            content.width,
            (content.height - header).max(0.0),
        )
    }

    /// Bar rect for row `index`.
    fn bar_rect(&self, index: usize) -> Rect {
        let body = self.body_rect();
        let y = body.y + index as f32 * (ROW_HEIGHT + ROW_GAP) + LABEL_SIZE + LABEL_GAP;
        Rect::new(body.x, y, body.width, BAR_HEIGHT)
    }

    /// Recompute per-segment hit regions from the current rows and bounds.
    /// Runs on every layout and every dataset swap, so hit testing always
    /// matches the rows actually on screen.
    fn rebuild_hits(&mut self) {
        self.hits.clear();
        let RenderState::Rows(rows) = &self.state else {
            return;
        };
        for (row_index, row) in rows.iter().enumerate() {
            let bar = self.bar_rect(row_index);
            let mut x = bar.x;
            let hits: Vec<SegmentHit> = row
                .segments
                .iter()
                .enumerate()
                .map(|(segment_index, segment)| {
                    let width = (segment.width_pct / 100.0) as f32 * bar.width;
                    let rect = Rect::new(x, bar.y, width, bar.height);
                    x += width;
                    SegmentHit {
                        rect,
                        row: row_index,
                        segment: segment_index,
                    }
                })
                .collect();
            self.hits.extend(hits);
        }
    }

    fn hit_at(&self, point: &Point) -> Option<(usize, usize)> {
        self.hits
            .iter()
            .find(|hit| hit.rect.contains_point(point))
            .map(|hit| (hit.row, hit.segment))
    }

    fn segment_color(&self, kind: SegmentKind) -> Color {
        match kind {
            SegmentKind::Current => self.current_color,
            SegmentKind::NonCurrent => self.non_current_color,
        }
    }

    fn estimate_width(text: &str, size: f32) -> f32 {
        text.len() as f32 * size * CHAR_WIDTH_FACTOR
    }

    fn paint_header(&self, canvas: &mut dyn Canvas) {
        let content = self.content_rect();
        canvas.draw_text(
            &self.title,
            Point::new(content.x, content.y + TITLE_SIZE),
            &TextStyle {
                size: TITLE_SIZE,
                color: self.text_color,
                weight: FontWeight::Bold,
                italic: false,
            },
        );

        if !self.show_legend {
            return;
        }
        let legend_style = TextStyle {
            size: LEGEND_SIZE,
            color: self.muted_color,
            weight: FontWeight::Normal,
            italic: false,
        };
        let dot_gap = LEGEND_DOT_RADIUS * 2.0 + 6.0;
        let items = [
            (SegmentKind::Current.label(), self.current_color),
            (SegmentKind::NonCurrent.label(), self.non_current_color),
        ];
        // Lay the legend out right-to-left from the content edge.
        let mut x = content.right();
        for (label, color) in items.iter().rev() {
            x -= Self::estimate_width(label, LEGEND_SIZE) + dot_gap;
            canvas.fill_circle(
                Point::new(x + LEGEND_DOT_RADIUS, content.y + LEGEND_SIZE / 2.0 + 2.0),
                LEGEND_DOT_RADIUS,
                *color,
            );
            canvas.draw_text(
                label,
                Point::new(x + dot_gap, content.y + LEGEND_SIZE),
                &legend_style,
            );
            x -= LEGEND_ITEM_GAP;
        }
    }

    fn paint_placeholder(&self, canvas: &mut dyn Canvas, text: &str, color: Color) {
        let body = self.body_rect();
        canvas.draw_text(
            text,
            Point::new(body.x, body.y + LABEL_SIZE),
            &TextStyle {
                size: LABEL_SIZE,
                color,
                weight: FontWeight::Normal,
                italic: true,
            },
        );
    }

    fn paint_rows(&self, canvas: &mut dyn Canvas, rows: &[RowView]) {
        let label_style = TextStyle {
            size: LABEL_SIZE,
            color: self.text_color,
            weight: FontWeight::Normal,
            italic: false,
        };
        let category_style = TextStyle {
            size: LABEL_SIZE,
            color: Color::new(0.333, 0.333, 0.333, 1.0), // #555555
            weight: FontWeight::SemiBold,
            italic: false,
        };

        for (row_index, row) in rows.iter().enumerate() {
            let bar = self.bar_rect(row_index);
            let label_baseline = bar.y - LABEL_GAP;

            canvas.draw_text(
                &row.left_label,
                Point::new(bar.x, label_baseline),
                &label_style,
            );
            let category_width = Self::estimate_width(&row.category, LABEL_SIZE);
            canvas.draw_text(
                &row.category,
                Point::new(bar.x + (bar.width - category_width) / 2.0, label_baseline),
                &category_style,
            );
            let right_width = Self::estimate_width(&row.right_label, LABEL_SIZE);
            canvas.draw_text(
                &row.right_label,
                Point::new(bar.right() - right_width, label_baseline),
                &label_style,
            );

            // Pill-shaped track; segments are clipped to it.
            canvas.fill_rounded_rect(bar, BAR_HEIGHT / 2.0, self.track_color);
            canvas.push_clip(bar);
            let mut x = bar.x;
            for (segment_index, segment) in row.segments.iter().enumerate() {
                let width = (segment.width_pct / 100.0) as f32 * bar.width;
                let rect = Rect::new(x, bar.y, width, bar.height);
                x += width;
                if rect.width <= 0.0 {
                    continue;
                }
                let mut color = self.segment_color(segment.kind);
                // Hovering a bar dims its sibling segment.
                if let Some((hovered_row, hovered_segment)) = self.hovered {
                    if hovered_row == row_index && hovered_segment != segment_index {
                        color = color.with_alpha(0.85);
                    }
                }
                canvas.fill_rect(rect, color);
            }
            canvas.pop_clip();
        }
    }

    fn update_tooltip(&mut self, row: usize, segment: usize, cursor: Point) {
        let RenderState::Rows(rows) = &self.state else {
            return;
        };
        let view = &rows[row];
        let seg = &view.segments[segment];
        self.tooltip.set_lines(
            format!("{} ({})", view.category, seg.kind.label()),
            tooltip_value_line(seg.value),
            tooltip_share_line(seg.width_pct),
        );
        self.tooltip.follow_cursor(cursor);
        self.tooltip.show();
    }
}

impl Widget for BalanceBarChart {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = if constraints.max_width.is_finite() {
            constraints.max_width
        } else {
            DEFAULT_WIDTH
        };
        let body_height = match &self.state {
            RenderState::Rows(rows) => rows.len() as f32 * (ROW_HEIGHT + ROW_GAP),
            _ => LABEL_SIZE + LABEL_GAP,
        };
        let height = PADDING * 2.0 + HEADER_HEIGHT + HEADER_GAP + body_height;
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.rebuild_hits();
        self.tooltip.layout(bounds);
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("chart_paint", rows = self.rows().len()).entered();

        self.paint_header(canvas);

        let body = self.body_rect();
        canvas.push_clip(body);
        match &self.state {
            RenderState::Empty => {
                self.paint_placeholder(canvas, NO_DATA_TEXT, self.muted_color);
            }
            RenderState::DataError(msg) => {
                self.paint_placeholder(canvas, msg, Color::new(0.8, 0.1, 0.1, 1.0));
            }
            RenderState::Rows(rows) => self.paint_rows(canvas, rows),
        }
        canvas.pop_clip();

        // Painted last and outside the body clip: the tooltip is fixed to the
        // viewport, not the scrolling body.
        self.tooltip.paint(canvas);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseMove { position } => {
                match self.hit_at(position) {
                    Some((row, segment)) => {
                        self.hovered = Some((row, segment));
                        self.update_tooltip(row, segment, *position);
                    }
                    None => {
                        self.hovered = None;
                        self.tooltip.hide();
                    }
                }
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                self.pressed = self.hit_at(position);
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let pressed = self.pressed.take();
                let hit = self.hit_at(position)?;
                if pressed != Some(hit) {
                    return None;
                }
                let (row, segment) = hit;
                let rows = self.rows();
                let view = &rows[row];
                let seg = &view.segments[segment];
                Some(Box::new(SegmentClicked {
                    category: view.category.clone(),
                    kind: seg.kind,
                    value: seg.value,
                }))
            }
            Event::MouseLeave => {
                self.hovered = None;
                self.pressed = None;
                self.tooltip.hide();
                None
            }
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
