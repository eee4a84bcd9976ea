use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::types::DataType;

/// True for anything that is not an object or array.
pub fn is_primitive(value: &Value) -> bool {
    !value.is_object() && !value.is_array()
}

fn iso_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}:\d{2}(\.\d{3})?(Z|[+-]\d{2}:\d{2})?)?$")
            .expect("ISO-8601 pattern is valid")
    })
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// An ISO-8601 shaped string that also names a real calendar instant.
/// The shape check alone would accept dates like `2024-02-30`.
pub fn is_date_string(s: &str) -> bool {
    if !iso_date_re().is_match(s) {
        return false;
    }
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// An absolute http/https URL.
pub fn is_url_string(s: &str) -> bool {
    Url::parse(s)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

pub fn is_email_string(s: &str) -> bool {
    email_re().is_match(s)
}

/// Classify a value for type-aware display. Strings are refined in a fixed
/// order: date, then url, then email; a value gets at most one refined type.
pub fn detect_data_type(value: &Value) -> DataType {
    match value {
        Value::Null => DataType::Null,
        Value::Bool(_) => DataType::Boolean,
        Value::Number(_) => DataType::Number,
        Value::Object(_) => DataType::Object,
        Value::Array(_) => DataType::Array,
        Value::String(s) => {
            if is_date_string(s) {
                DataType::Date
            } else if is_url_string(s) {
                DataType::Url
            } else if is_email_string(s) {
                DataType::Email
            } else {
                DataType::String
            }
        }
    }
}

/// Whether an array of objects is uniform enough to render as a
/// multi-column table. Every element must be an object, and each of the
/// first five elements must share at least half of the first element's
/// keys. Elements past the fifth are not inspected.
pub fn is_table_compatible(items: &[Value]) -> bool {
    let Some(first) = items.first().and_then(Value::as_object) else {
        return false;
    };
    if first.is_empty() || !items.iter().all(Value::is_object) {
        return false;
    }
    for item in items.iter().take(5).skip(1) {
        let Some(obj) = item.as_object() else {
            return false;
        };
        let overlap = obj.keys().filter(|k| first.contains_key(k.as_str())).count();
        if overlap * 2 < first.len() {
            return false;
        }
    }
    true
}

/// Union of the member objects' keys, in first-seen order.
pub fn table_columns(items: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for item in items {
        if let Some(obj) = item.as_object() {
            for key in obj.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

/// Element count for arrays, key count for objects, 0 for primitives.
pub fn count_items(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        _ => 0,
    }
}

/// Display form of a value: primitives as their bare text, containers as a
/// size summary. Strings are unquoted.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("Array({})", items.len()),
        Value::Object(map) => format!("Object({})", map.len()),
    }
}

/// Reformat an ISO date string into a fixed human-readable form; strings
/// that fail to parse come back unchanged.
pub fn format_date(s: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.format("%Y-%m-%d %H:%M:%S%:z").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    s.to_string()
}

/// Cap long display text, appending `...` past the limit.
pub fn truncate_display(s: &str, max_length: usize) -> String {
    if s.chars().count() <= max_length {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_length).collect();
    format!("{truncated}...")
}
