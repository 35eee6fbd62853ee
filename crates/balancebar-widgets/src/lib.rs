//! Widgets for the balancebar chart: the two-segment balance bar chart, its
//! hover tooltip, and the title configuration panel.

pub mod chart;
pub mod data;
pub mod formats;
pub mod panel;
pub mod proportion;
pub mod rows;
pub mod tooltip;

pub use chart::{BalanceBarChart, RenderState, SegmentClicked, DEFAULT_TITLE};
pub use data::{normalize, ChartRecord, DataFormatError, RawData};
pub use panel::{ConfigPanel, PropertiesChanged};
pub use proportion::{round1, DerivedRow};
pub use rows::{build_rows, RowView, SegmentKind, SegmentView};
pub use tooltip::Tooltip;
