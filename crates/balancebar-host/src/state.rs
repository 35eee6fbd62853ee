//! Widget state and the host property patch.

use balancebar_widgets::{ChartRecord, RawData, DEFAULT_TITLE};
use serde::{Deserialize, Serialize};

/// The in-memory title + dataset pair driving rendering.
///
/// Owned exclusively by the binding; mutated only through host-issued
/// property updates or the direct data-set call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetState {
    /// Chart title
    pub title: String,
    /// Normalized dataset; empty is the valid "no data" state
    pub dataset: Vec<ChartRecord>,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            dataset: Vec::new(),
        }
    }
}

/// Partial-state patch delivered by the host.
///
/// `None` fields are untouched by a merge. The dataset travels raw because
/// the host may hand over a JSON string; normalization happens at commit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyPatch {
    /// New widget title, if changed
    #[serde(rename = "widgetTitle", skip_serializing_if = "Option::is_none")]
    pub widget_title: Option<String>,
    /// New raw dataset, if changed
    #[serde(rename = "chartData", skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<RawData>,
}

impl PropertyPatch {
    /// Patch that only changes the title.
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            widget_title: Some(title.into()),
            chart_data: None,
        }
    }

    /// Patch that only changes the dataset.
    #[must_use]
    pub fn data(raw: impl Into<RawData>) -> Self {
        Self {
            widget_title: None,
            chart_data: Some(raw.into()),
        }
    }

    /// Check if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.widget_title.is_none() && self.chart_data.is_none()
    }

    /// Overlay another patch on top of this one; later fields win.
    pub fn merge(&mut self, other: Self) {
        if other.widget_title.is_some() {
            self.widget_title = other.widget_title;
        }
        if other.chart_data.is_some() {
            self.chart_data = other.chart_data;
        }
    }
}
