//! Label formatting helpers.

/// Format a raw value the way the row labels show it: integral values print
/// with no decimal point (`70`, not `70.0`).
#[must_use]
pub fn fmt_value(value: f64) -> String {
    format!("{value}")
}

/// Row label for one side of a bar: `"70Bln (70%)"`.
#[must_use]
pub fn value_label(value: f64, display_pct: i64) -> String {
    format!("{}Bln ({display_pct}%)", fmt_value(value))
}

/// Tooltip value line: `"Value: 70 Bln"`.
#[must_use]
pub fn tooltip_value_line(value: f64) -> String {
    format!("Value: {} Bln", fmt_value(value))
}

/// Tooltip share line, always one decimal: `"70.0% Share"`.
#[must_use]
pub fn tooltip_share_line(pct: f64) -> String {
    format!("{pct:.1}% Share")
}
