//! Pure row construction: dataset in, view models out.
//!
//! This is the swappable seam between chart semantics and the drawing
//! backend: everything worth testing lives here, the canvas only replays it.

use crate::data::ChartRecord;
use crate::formats::value_label;
use crate::proportion::DerivedRow;
use serde::{Deserialize, Serialize};

/// Which of the two fixed segments a view belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// The current portion, always drawn first (left).
    Current,
    /// The non-current portion, drawn second.
    NonCurrent,
}

impl SegmentKind {
    /// Human-readable name used in tooltips and click notifications.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::NonCurrent => "Non-current",
        }
    }
}

/// One proportional sub-bar of a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentView {
    /// Segment type
    pub kind: SegmentKind,
    /// Raw value for this segment
    pub value: f64,
    /// Width as a share of the full bar, one decimal place (0..=100)
    pub width_pct: f64,
}

/// View model for one rendered row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowView {
    /// Category label shown in the center of the labels row
    pub category: String,
    /// Left label: current value and integer percent
    pub left_label: String,
    /// Right label: non-current value and integer percent
    pub right_label: String,
    /// Current-then-non-current, always in that order
    pub segments: [SegmentView; 2],
}

impl RowView {
    fn from_record(record: &ChartRecord) -> Self {
        let derived = DerivedRow::from_record(record);
        Self {
            category: record.label.clone(),
            left_label: value_label(record.current, derived.current_display_pct),
            right_label: value_label(record.non_current, derived.non_current_display_pct),
            segments: [
                SegmentView {
                    kind: SegmentKind::Current,
                    value: record.current,
                    width_pct: derived.current_pct,
                },
                SegmentView {
                    kind: SegmentKind::NonCurrent,
                    value: record.non_current,
                    width_pct: derived.non_current_pct,
                },
            ],
        }
    }
}

/// Build one row per record, in input order.
#[must_use]
pub fn build_rows(records: &[ChartRecord]) -> Vec<RowView> {
    records.iter().map(RowView::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_kind_labels() {
        assert_eq!(SegmentKind::Current.label(), "Current");
        assert_eq!(SegmentKind::NonCurrent.label(), "Non-current");
    }

    #[test]
    fn test_build_rows_order_and_labels() {
        let rows = build_rows(&[
            ChartRecord::new("Q1", 70.0, 30.0),
            ChartRecord::new("Q2", 10.0, 90.0),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Q1");
        assert_eq!(rows[0].left_label, "70Bln (70%)");
        assert_eq!(rows[0].right_label, "30Bln (30%)");
        assert_eq!(rows[1].category, "Q2");
        assert_eq!(rows[1].left_label, "10Bln (10%)");
    }

    #[test]
    fn test_segment_order_is_current_then_non_current() {
        let rows = build_rows(&[ChartRecord::new("A", 1.0, 3.0)]);
        assert_eq!(rows[0].segments[0].kind, SegmentKind::Current);
        assert_eq!(rows[0].segments[1].kind, SegmentKind::NonCurrent);
        assert_eq!(rows[0].segments[0].width_pct, 25.0);
        assert_eq!(rows[0].segments[1].width_pct, 75.0);
    }

    #[test]
    fn test_all_zero_record_renders_zero_width_pair() {
        let rows = build_rows(&[ChartRecord::new("Z", 0.0, 0.0)]);
        assert_eq!(rows[0].segments[0].width_pct, 0.0);
        assert_eq!(rows[0].segments[1].width_pct, 0.0);
        assert_eq!(rows[0].left_label, "0Bln (0%)");
        assert_eq!(rows[0].right_label, "0Bln (0%)");
    }

    #[test]
    fn test_empty_dataset_builds_no_rows() {
        assert!(build_rows(&[]).is_empty());
    }

    #[test]
    fn test_duplicate_labels_allowed() {
        let rows = build_rows(&[
            ChartRecord::new("Q1", 1.0, 1.0),
            ChartRecord::new("Q1", 2.0, 2.0),
        ]);
        assert_eq!(rows[0].category, rows[1].category);
    }

    #[test]
    fn test_build_rows_is_pure() {
        let records = vec![ChartRecord::new("P", 33.0, 67.0)];
        assert_eq!(build_rows(&records), build_rows(&records));
    }
}
