use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.?[0-9]*").expect("number pattern"));

/// Returns the first decimal number embedded in `text`.
///
/// Matches a run of ASCII digits, optionally followed by a `.` and further
/// digits. Signs and thousands separators are not understood: `"1,197 cc"`
/// yields `1.0`.
pub fn extract_number(text: &str) -> Option<f64> {
    let matched = NUMBER.find(text)?;
    matched.as_str().trim_end_matches('.').parse().ok()
}

/// Like [`extract_number`], but also accepts values that are already numbers.
pub fn extract_number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => extract_number(s),
        Value::Null => None,
        other => extract_number(&other.to_string()),
    }
}
