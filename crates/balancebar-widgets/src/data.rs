//! Dataset records and the host-input normalizer.
//!
//! The host hands the chart either structured records or a JSON-encoded
//! string. Numeric fields tolerate junk: a string is parsed as a leading
//! decimal prefix, anything unusable coerces to 0 so one bad record never
//! blocks the rest of the dataset.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Error for a raw dataset string that is not valid JSON.
#[derive(Debug, Error)]
pub enum DataFormatError {
    /// The JSON-encoded dataset string failed to parse.
    #[error("error parsing JSON data: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// One category's balance breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    /// Display name for the category. Rendering order = input order.
    #[serde(default)]
    pub label: String,
    /// Current portion of the balance.
    #[serde(default, deserialize_with = "coerce_numeric")]
    pub current: f64,
    /// Non-current portion of the balance.
    #[serde(
        rename = "nonCurrent",
        default,
        deserialize_with = "coerce_numeric"
    )]
    pub non_current: f64,
}

impl ChartRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(label: impl Into<String>, current: f64, non_current: f64) -> Self {
        Self {
            label: label.into(),
            current,
            non_current,
        }
    }
}

/// Raw dataset as delivered by the host.
///
/// Models the host contract of "a JSON string, a structured sequence, or
/// nothing at all". Untagged on the wire: a bare string, a bare array of
/// records, or `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawData {
    /// A JSON-encoded string of records.
    Json(String),
    /// Already-structured records.
    Records(Vec<ChartRecord>),
    /// No dataset supplied.
    #[default]
    Empty,
}

impl RawData {
    /// Wrap a JSON-encoded dataset string.
    #[must_use]
    pub fn json(text: impl Into<String>) -> Self {
        Self::Json(text.into())
    }

    /// Wrap structured records.
    #[must_use]
    pub fn records(records: impl IntoIterator<Item = ChartRecord>) -> Self {
        Self::Records(records.into_iter().collect())
    }
}

impl From<Vec<ChartRecord>> for RawData {
    fn from(records: Vec<ChartRecord>) -> Self {
        Self::Records(records)
    }
}

/// Convert raw host input into an ordered dataset.
///
/// An empty vector is the explicit "no data" state, not an error. A JSON
/// `null` also normalizes to "no data".
///
/// # Errors
///
/// Returns [`DataFormatError`] when a JSON string fails to parse. The caller
/// is expected to render a visible inline error and carry on.
pub fn normalize(raw: &RawData) -> Result<Vec<ChartRecord>, DataFormatError> {
    match raw {
        RawData::Json(text) => {
            let records: Option<Vec<ChartRecord>> = serde_json::from_str(text)?;
            Ok(records.unwrap_or_default())
        }
        RawData::Records(records) => Ok(records.clone()),
        RawData::Empty => Ok(Vec::new()),
    }
}

fn coerce_numeric<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

/// Lenient numeric coercion: number as-is, string by leading decimal prefix,
/// everything else (and non-finite results) 0.
fn coerce_f64(value: &serde_json::Value) -> f64 {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => parse_float_prefix(s),
        _ => 0.0,
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Parse the longest leading float prefix of a string: optional sign, digits,
/// optional fraction, optional exponent. `"12.5bn"` gives 12.5, `"abc"` 0.
fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    // A bare sign or dot is not a number.
    if s[int_start..end].chars().all(|c| !c.is_ascii_digit()) {
        return 0.0;
    }
    // Optional exponent, only kept if well-formed.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_structured_records() {
        let raw = RawData::records([ChartRecord::new("Q1", 70.0, 30.0)]);
        let records = normalize(&raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "Q1");
        assert_eq!(records[0].current, 70.0);
        assert_eq!(records[0].non_current, 30.0);
    }

    #[test]
    fn test_normalize_json_string() {
        let raw = RawData::json(r#"[{"label":"Q1","current":70,"nonCurrent":30}]"#);
        let records = normalize(&raw).unwrap();
        assert_eq!(records, vec![ChartRecord::new("Q1", 70.0, 30.0)]);
    }

    #[test]
    fn test_normalize_json_matches_structured() {
        let json = RawData::json(r#"[{"label":"A","current":1,"nonCurrent":2}]"#);
        let structured = RawData::records([ChartRecord::new("A", 1.0, 2.0)]);
        assert_eq!(normalize(&json).unwrap(), normalize(&structured).unwrap());
    }

    #[test]
    fn test_normalize_invalid_json_is_error() {
        let raw = RawData::json("{not json");
        assert!(matches!(
            normalize(&raw),
            Err(DataFormatError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_normalize_empty_states() {
        assert!(normalize(&RawData::Empty).unwrap().is_empty());
        assert!(normalize(&RawData::json("[]")).unwrap().is_empty());
        assert!(normalize(&RawData::json("null")).unwrap().is_empty());
        assert!(normalize(&RawData::records([])).unwrap().is_empty());
    }

    #[test]
    fn test_numeric_from_string() {
        let raw = RawData::json(r#"[{"label":"Q2","current":"abc","nonCurrent":"50"}]"#);
        let records = normalize(&raw).unwrap();
        assert_eq!(records[0].current, 0.0);
        assert_eq!(records[0].non_current, 50.0);
    }

    #[test]
    fn test_numeric_leading_prefix() {
        let raw = RawData::json(r#"[{"label":"Q","current":"12.5bn","nonCurrent":"-3e2x"}]"#);
        let records = normalize(&raw).unwrap();
        assert_eq!(records[0].current, 12.5);
        assert_eq!(records[0].non_current, -300.0);
    }

    #[test]
    fn test_numeric_from_null_and_missing() {
        let raw = RawData::json(r#"[{"label":"Q","current":null}]"#);
        let records = normalize(&raw).unwrap();
        assert_eq!(records[0].current, 0.0);
        assert_eq!(records[0].non_current, 0.0);
    }

    #[test]
    fn test_numeric_from_bool_and_object() {
        let raw = RawData::json(r#"[{"label":"Q","current":true,"nonCurrent":{"x":1}}]"#);
        let records = normalize(&raw).unwrap();
        assert_eq!(records[0].current, 0.0);
        assert_eq!(records[0].non_current, 0.0);
    }

    #[test]
    fn test_missing_label_defaults_empty() {
        let raw = RawData::json(r#"[{"current":1,"nonCurrent":2}]"#);
        let records = normalize(&raw).unwrap();
        assert_eq!(records[0].label, "");
    }

    #[test]
    fn test_bad_record_does_not_block_dataset() {
        let raw = RawData::json(
            r#"[{"label":"ok","current":1,"nonCurrent":1},
                {"label":"junk","current":"??","nonCurrent":[1,2]}]"#,
        );
        let records = normalize(&raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].current, 0.0);
        assert_eq!(records[1].non_current, 0.0);
    }

    #[test]
    fn test_raw_data_wire_shapes() {
        // The host delivers a bare string, a bare record array, or null.
        let from_string: RawData = serde_json::from_str(r#""[{\"label\":\"Q1\"}]""#).unwrap();
        assert_eq!(from_string, RawData::json(r#"[{"label":"Q1"}]"#));

        let from_array: RawData =
            serde_json::from_str(r#"[{"label":"Q1","current":70,"nonCurrent":30}]"#).unwrap();
        assert_eq!(
            from_array,
            RawData::records([ChartRecord::new("Q1", 70.0, 30.0)])
        );

        let from_null: RawData = serde_json::from_str("null").unwrap();
        assert_eq!(from_null, RawData::Empty);
        assert_eq!(serde_json::to_string(&RawData::Empty).unwrap(), "null");
    }

    #[test]
    fn test_parse_float_prefix_edge_cases() {
        assert_eq!(parse_float_prefix(""), 0.0);
        assert_eq!(parse_float_prefix("   42  "), 42.0);
        assert_eq!(parse_float_prefix("-"), 0.0);
        assert_eq!(parse_float_prefix("."), 0.0);
        assert_eq!(parse_float_prefix(".5"), 0.5);
        assert_eq!(parse_float_prefix("1e"), 1.0);
        assert_eq!(parse_float_prefix("1e3"), 1000.0);
        assert_eq!(parse_float_prefix("+2.5%"), 2.5);
    }
}
