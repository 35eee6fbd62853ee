//! Host-facing binding for the balancebar widget: widget state, the
//! staged/committed property lifecycle, and host notifications.

mod binding;
mod state;

pub use binding::{ChartBinding, HostNotification};
pub use state::{PropertyPatch, WidgetState};
