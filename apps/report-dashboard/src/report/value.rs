//! Display formatting for raw report values.

use serde_json::{Map, Number, Value};

/// Placeholder shown for null or absent values.
pub const MISSING: &str = "-";

/// Format a report value for display.
///
/// - absent or `null` → `"-"`
/// - object with a non-null `display` field → that field, verbatim
/// - object with a `raw` field (producer `{raw, kind}` shape) → `raw`, formatted
/// - numbers, booleans and strings → their canonical string form
/// - arrays → elements joined with `,`
///
/// Never panics.
#[must_use]
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => format_number(number),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(format_element)
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(map)) => format_object(map),
    }
}

/// Whether a value counts as present (not absent, not `null`).
#[must_use]
pub const fn is_present(value: Option<&Value>) -> bool {
    !matches!(value, None | Some(Value::Null))
}

fn format_object(map: &Map<String, Value>) -> String {
    if let Some(display) = map.get("display").filter(|v| !v.is_null()) {
        return display_value(Some(display));
    }
    if let Some(raw) = map.get("raw") {
        return display_value(Some(raw));
    }
    serde_json::to_string(map).unwrap_or_default()
}

// Array elements: null renders empty, nested arrays flatten.
fn format_element(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => display_value(Some(other)),
    }
}

fn format_number(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => number.to_string(),
    }
}
