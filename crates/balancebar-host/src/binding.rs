//! The host-facing binding around the chart and its configuration panel.
//!
//! Property updates arrive in two phases: [`ChartBinding::on_state_staged`]
//! merges partial patches into a pending buffer, and
//! [`ChartBinding::on_state_committed`] applies the whole buffer atomically,
//! state first and visuals second, so nothing ever observes a half-applied
//! update. [`ChartBinding::set_chart_data`] bypasses the two-phase path.

use crate::state::{PropertyPatch, WidgetState};
use balancebar_core::{Event, Widget};
use balancebar_widgets::{
    normalize, BalanceBarChart, ConfigPanel, PropertiesChanged, RawData, SegmentClicked,
    SegmentKind,
};
use serde::{Deserialize, Serialize};

/// A notification produced for the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostNotification {
    /// The configuration panel submitted a new title.
    PropertiesChanged {
        /// The edited title
        widget_title: String,
    },
    /// A bar segment was clicked.
    SegmentClicked {
        /// Category label of the clicked row
        category: String,
        /// Which segment was clicked
        kind: SegmentKind,
        /// Raw value carried by that segment
        value: f64,
    },
}

type PropertyChangeCallback = Box<dyn FnMut(&PropertiesChanged) + Send>;
type SegmentClickCallback = Box<dyn FnMut(&SegmentClicked) + Send>;

/// Binding between the host's extension contract and the widgets.
#[derive(Default)]
pub struct ChartBinding {
    state: WidgetState,
    staged: PropertyPatch,
    chart: BalanceBarChart,
    panel: ConfigPanel,
    notifications: Vec<HostNotification>,
    on_property_change: Option<PropertyChangeCallback>,
    on_segment_click: Option<SegmentClickCallback>,
}

impl ChartBinding {
    /// Create a binding with default state (default title, empty dataset).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed widget state.
    #[must_use]
    pub const fn state(&self) -> &WidgetState {
        &self.state
    }

    /// The chart widget.
    #[must_use]
    pub const fn chart(&self) -> &BalanceBarChart {
        &self.chart
    }

    /// Mutable access to the chart (layout, painting).
    pub fn chart_mut(&mut self) -> &mut BalanceBarChart {
        &mut self.chart
    }

    /// The configuration panel widget.
    #[must_use]
    pub const fn panel(&self) -> &ConfigPanel {
        &self.panel
    }

    /// Mutable access to the panel (layout, painting).
    pub fn panel_mut(&mut self) -> &mut ConfigPanel {
        &mut self.panel
    }

    /// Register a callback for panel title submissions.
    pub fn on_property_change(
        &mut self,
        callback: impl FnMut(&PropertiesChanged) + Send + 'static,
    ) {
        self.on_property_change = Some(Box::new(callback));
    }

    /// Register a callback for segment clicks.
    pub fn on_segment_click(&mut self, callback: impl FnMut(&SegmentClicked) + Send + 'static) {
        self.on_segment_click = Some(Box::new(callback));
    }

    /// Stage a partial-state patch ahead of a commit. Staged changes are not
    /// visible anywhere until [`Self::on_state_committed`] runs.
    pub fn on_state_staged(&mut self, patch: PropertyPatch) {
        self.staged.merge(patch);
    }

    /// Commit the staged patch: merge it into [`WidgetState`] in one step,
    /// then re-render only the parts whose keys were staged.
    pub fn on_state_committed(&mut self) {
        let patch = std::mem::take(&mut self.staged);
        if patch.is_empty() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            title_changed = patch.widget_title.is_some(),
            data_changed = patch.chart_data.is_some(),
            "committing staged properties"
        );

        // State first, atomically; visual updates only afterwards.
        if let Some(title) = &patch.widget_title {
            self.state.title.clone_from(title);
        }
        if let Some(raw) = &patch.chart_data {
            self.state.dataset = normalize(raw).unwrap_or_default();
        }

        if let Some(title) = patch.widget_title {
            self.chart.set_title(title.clone());
            self.panel.set_value(title);
        }
        if let Some(raw) = patch.chart_data {
            self.chart.set_data(&raw);
        }
    }

    /// Direct data entry point, bypassing the staged/committed path.
    pub fn set_chart_data(&mut self, raw: &RawData) {
        self.state.dataset = normalize(raw).unwrap_or_default();
        self.chart.set_data(raw);
    }

    /// Forward an input event to the chart, converting any emitted message
    /// into a host notification. Fire-and-forget: the host owes no response.
    pub fn dispatch_chart(&mut self, event: &Event) -> Option<HostNotification> {
        let message = self.chart.event(event)?;
        let clicked = message.downcast::<SegmentClicked>().ok()?;
        if let Some(callback) = &mut self.on_segment_click {
            callback(&clicked);
        }
        let notification = HostNotification::SegmentClicked {
            category: clicked.category,
            kind: clicked.kind,
            value: clicked.value,
        };
        self.notifications.push(notification.clone());
        Some(notification)
    }

    /// Forward an input event to the configuration panel, converting a form
    /// submission into a host notification.
    pub fn dispatch_panel(&mut self, event: &Event) -> Option<HostNotification> {
        let message = self.panel.event(event)?;
        let changed = message.downcast::<PropertiesChanged>().ok()?;
        if let Some(callback) = &mut self.on_property_change {
            callback(&changed);
        }
        let notification = HostNotification::PropertiesChanged {
            widget_title: changed.widget_title,
        };
        self.notifications.push(notification.clone());
        Some(notification)
    }

    /// Drain queued notifications, oldest first, for hosts that poll.
    pub fn drain_notifications(&mut self) -> Vec<HostNotification> {
        std::mem::take(&mut self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balancebar_core::{Key, MouseButton, Point, Rect};
    use balancebar_widgets::ChartRecord;
    use std::sync::{Arc, Mutex};

    const CHART_BOUNDS: Rect = Rect::new(0.0, 0.0, 420.0, 300.0);
    // Q1 70/30 in the 420x300 layout: current segment covers x in [10, 290)
    // at bar y 79..91.
    const INSIDE_CURRENT: Point = Point::new(50.0, 85.0);

    fn q1_patch() -> PropertyPatch {
        PropertyPatch::data(vec![ChartRecord::new("Q1", 70.0, 30.0)])
    }

    #[test]
    fn test_defaults() {
        let binding = ChartBinding::new();
        assert_eq!(binding.state().title, "Current & Non-current");
        assert!(binding.state().dataset.is_empty());
        assert_eq!(binding.chart().get_title(), "Current & Non-current");
    }

    #[test]
    fn test_staged_patch_is_not_visible_before_commit() {
        let mut binding = ChartBinding::new();
        binding.on_state_staged(PropertyPatch::title("Pending"));
        assert_eq!(binding.chart().get_title(), "Current & Non-current");
        assert_eq!(binding.state().title, "Current & Non-current");
    }

    #[test]
    fn test_commit_applies_staged_patch_atomically() {
        let mut binding = ChartBinding::new();
        binding.on_state_staged(PropertyPatch::title("Balance"));
        binding.on_state_staged(q1_patch());
        binding.on_state_committed();
        assert_eq!(binding.state().title, "Balance");
        assert_eq!(binding.state().dataset.len(), 1);
        assert_eq!(binding.chart().get_title(), "Balance");
        assert_eq!(binding.chart().rows().len(), 1);
        // Committed title flows back into the panel field.
        assert_eq!(binding.panel().get_value(), "Balance");
    }

    #[test]
    fn test_commit_without_staged_patch_is_noop() {
        let mut binding = ChartBinding::new();
        binding.on_state_committed();
        assert_eq!(binding.state().title, "Current & Non-current");
    }

    #[test]
    fn test_title_commit_does_not_touch_dataset() {
        let mut binding = ChartBinding::new();
        binding.on_state_staged(q1_patch());
        binding.on_state_committed();
        binding.on_state_staged(PropertyPatch::title("Renamed"));
        binding.on_state_committed();
        assert_eq!(binding.chart().rows().len(), 1);
        assert_eq!(binding.chart().get_title(), "Renamed");
    }

    #[test]
    fn test_repeated_staging_merges() {
        let mut binding = ChartBinding::new();
        binding.on_state_staged(PropertyPatch::title("first"));
        binding.on_state_staged(PropertyPatch::title("second"));
        binding.on_state_committed();
        assert_eq!(binding.state().title, "second");
    }

    #[test]
    fn test_set_chart_data_bypasses_staging() {
        let mut binding = ChartBinding::new();
        binding.set_chart_data(&RawData::json(
            r#"[{"label":"Q1","current":70,"nonCurrent":30}]"#,
        ));
        assert_eq!(binding.chart().rows().len(), 1);
        assert_eq!(binding.state().dataset[0].label, "Q1");
    }

    #[test]
    fn test_invalid_json_leaves_no_residual_dataset() {
        let mut binding = ChartBinding::new();
        binding.set_chart_data(&RawData::records([ChartRecord::new("Q1", 1.0, 1.0)]));
        binding.set_chart_data(&RawData::json("{oops"));
        assert!(binding.state().dataset.is_empty());
        assert!(binding.chart().data_error().is_some());
    }

    #[test]
    fn test_segment_click_produces_notification_and_callback() {
        let mut binding = ChartBinding::new();
        binding.set_chart_data(&RawData::records([ChartRecord::new("Q1", 70.0, 30.0)]));
        binding.chart_mut().layout(CHART_BOUNDS);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        binding.on_segment_click(move |clicked| {
            sink.lock().expect("lock").push(clicked.clone());
        });

        binding.dispatch_chart(&Event::MouseDown {
            position: INSIDE_CURRENT,
            button: MouseButton::Left,
        });
        let notification = binding
            .dispatch_chart(&Event::MouseUp {
                position: INSIDE_CURRENT,
                button: MouseButton::Left,
            })
            .expect("click should notify");

        assert_eq!(
            notification,
            HostNotification::SegmentClicked {
                category: "Q1".to_string(),
                kind: SegmentKind::Current,
                value: 70.0,
            }
        );
        assert_eq!(seen.lock().expect("lock").len(), 1);
        assert_eq!(binding.drain_notifications().len(), 1);
        assert!(binding.drain_notifications().is_empty());
    }

    #[test]
    fn test_panel_submit_produces_property_notification() {
        let mut binding = ChartBinding::new();
        binding.panel_mut().layout(Rect::new(0.0, 0.0, 280.0, 140.0));
        binding.panel_mut().set_value("New Title");
        binding.dispatch_panel(&Event::FocusIn);
        let notification = binding
            .dispatch_panel(&Event::KeyDown { key: Key::Enter })
            .expect("submit should notify");
        assert_eq!(
            notification,
            HostNotification::PropertiesChanged {
                widget_title: "New Title".to_string(),
            }
        );
        // The panel does not mutate the chart; the host closes that loop.
        assert_eq!(binding.chart().get_title(), "Current & Non-current");
    }

    #[test]
    fn test_hover_does_not_notify() {
        let mut binding = ChartBinding::new();
        binding.set_chart_data(&RawData::records([ChartRecord::new("Q1", 70.0, 30.0)]));
        binding.chart_mut().layout(CHART_BOUNDS);
        assert!(binding
            .dispatch_chart(&Event::MouseMove {
                position: INSIDE_CURRENT,
            })
            .is_none());
        assert!(binding.chart().tooltip().is_visible());
    }
}
