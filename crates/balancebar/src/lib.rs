//! Balancebar: a two-segment (current / non-current) balance bar chart
//! widget for analytics dashboard hosts.
//!
//! The host supplies a dataset (structured records or a JSON-encoded string)
//! and a title; the chart renders one proportional bar row per record and
//! reports segment clicks back. A small configuration panel edits the title.
//!
//! # Example
//!
//! ```
//! use balancebar::{ChartBinding, PropertyPatch, RawData};
//! use balancebar::{RecordingCanvas, Rect, Widget};
//!
//! let mut binding = ChartBinding::new();
//! binding.on_state_staged(PropertyPatch::data(RawData::json(
//!     r#"[{"label":"Q1","current":70,"nonCurrent":30}]"#,
//! )));
//! binding.on_state_committed();
//!
//! binding.chart_mut().layout(Rect::new(0.0, 0.0, 420.0, 300.0));
//! let mut canvas = RecordingCanvas::new();
//! binding.chart().paint(&mut canvas);
//! assert!(canvas.command_count() > 0);
//! ```

pub use balancebar_core::{
    Canvas, Color, ColorParseError, Constraints, DrawCommand, Event, FontWeight, Key, LayoutResult,
    MouseButton, Point, RecordingCanvas, Rect, Size, TextStyle, TypeId, Widget, WidgetId,
};
pub use balancebar_host::{ChartBinding, HostNotification, PropertyPatch, WidgetState};
pub use balancebar_widgets::{
    build_rows, normalize, BalanceBarChart, ChartRecord, ConfigPanel, DataFormatError, DerivedRow,
    PropertiesChanged, RawData, RenderState, RowView, SegmentClicked, SegmentKind, SegmentView,
    Tooltip, DEFAULT_TITLE,
};

/// Widget implementations, re-exported as a module for qualified access.
pub mod widgets {
    pub use balancebar_widgets::*;
}
