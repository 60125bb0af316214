//! `sx` prop serialization.

use indexmap::IndexMap;
use kiln_core::PropValue;

/// `sx={{ key: value, ... }}`, or `None` for an empty style map.
pub fn sx_attribute(style: &IndexMap<String, PropValue>) -> Option<String> {
    if style.is_empty() {
        return None;
    }
    let entries = style
        .iter()
        .filter_map(|(key, value)| Some(format!("{}: {}", object_key(key), js_value(value)?)))
        .collect::<Vec<_>>();
    if entries.is_empty() {
        return None;
    }
    Some(format!("sx={{{{ {} }}}}", entries.join(", ")))
}

/// A JS literal for a style value. Icons have no style form.
pub fn js_value(value: &PropValue) -> Option<String> {
    match value {
        PropValue::String(s) | PropValue::Keyword(s) => Some(js_string(s)),
        PropValue::Number(n) => Some(n.to_string()),
        PropValue::Boolean(b) => Some(b.to_string()),
        PropValue::Color(color) => Some(js_string(color.as_str())),
        PropValue::Icon(_) => None,
    }
}

/// Single-quoted JS string.
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

fn object_key(key: &str) -> String {
    let is_identifier = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        key.to_string()
    } else {
        js_string(key)
    }
}
