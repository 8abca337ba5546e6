//! Plain-text entry cards.

use chrono::DateTime;
use contentful_core::Entry;
use serde_json::Value;

/// Fields shown on a collapsed card.
const PREVIEW_FIELDS: usize = 3;

/// Longest value shown on a collapsed card before "...".
const PREVIEW_LEN: usize = 100;

/// Render a field value: strings as-is, `null` as `null`, scalars via
/// JSON, objects and arrays pretty-printed.
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

/// Single-line variant of [`format_value`] for previews.
fn format_inline(value: &Value) -> String {
    match value {
        Value::Object(_) | Value::Array(_) => value.to_string(),
        other => format_value(other),
    }
}

pub(crate) fn truncate(value: &str, max_len: usize) -> String {
    match value.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_owned(),
    }
}

pub(crate) fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((cut, _)) => &id[..cut],
        None => id,
    }
}

/// Calendar date of an RFC 3339 timestamp; unparseable input is echoed.
pub(crate) fn format_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| timestamp.to_owned())
}

/// Lines of one entry card.
pub(crate) fn entry_card(entry: &Entry, expanded: bool) -> Vec<String> {
    let mut lines = vec![
        format!("{}  [{}]", entry.content_type, short_id(&entry.id)),
        format!(
            "  Created: {} | Updated: {}",
            format_date(&entry.created_at),
            format_date(&entry.updated_at)
        ),
        format!("  Fields ({})", entry.fields.len()),
    ];

    if entry.fields.is_empty() {
        lines.push("    No fields".to_owned());
    } else if expanded {
        for (key, value) in &entry.fields {
            lines.push(format!("    {key}"));
            for line in format_value(value).lines() {
                lines.push(format!("      {line}"));
            }
        }
    } else {
        for (key, value) in entry.fields.iter().take(PREVIEW_FIELDS) {
            lines.push(format!(
                "    {key}: {}",
                truncate(&format_inline(value), PREVIEW_LEN)
            ));
        }
        if entry.fields.len() > PREVIEW_FIELDS {
            lines.push(format!(
                "    +{} more fields",
                entry.fields.len() - PREVIEW_FIELDS
            ));
        }
    }
    lines
}
