//! Property schemas of component descriptors.

use std::fmt;

use kiln_core::{property_key_matches, unwrap_value, DesignNode, PaintSlot, PropValue};
use serde_json::Value;

/// Expected kind of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free text, kept verbatim.
    Text,
    /// Keyword from a closed set, lower-cased.
    Enum,
    Number,
    Bool,
    /// A color read from one of the node's paint slots.
    Color(PaintSlot),
}

/// Declared default of a property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Str(&'static str),
    Number(f64),
    Bool(bool),
}

impl DefaultValue {
    /// Whether `value` equals this default (case-insensitive for strings).
    pub fn matches(&self, value: &PropValue) -> bool {
        match (self, value) {
            (Self::Str(default), PropValue::String(s) | PropValue::Keyword(s)) => {
                default.eq_ignore_ascii_case(s)
            }
            (Self::Str(default), PropValue::Color(color)) => {
                default.eq_ignore_ascii_case(color.as_str())
            }
            (Self::Number(default), PropValue::Number(n)) => (default - n).abs() < f64::EPSILON,
            (Self::Bool(default), PropValue::Boolean(b)) => default == b,
            _ => false,
        }
    }
}

/// Custom property extractor.
pub type ExtractFn = fn(&NodeView<'_>) -> Option<PropValue>;

/// Post-extraction transform; returning `None` drops the property.
pub type TransformFn = fn(PropValue) -> Option<PropValue>;

/// Schema of one component property.
#[derive(Clone)]
pub struct PropSchema {
    pub name: &'static str,
    pub kind: ValueKind,
    pub allowed: &'static [&'static str],
    pub default: Option<DefaultValue>,
    pub extract: Option<ExtractFn>,
    pub transform: Option<TransformFn>,
    /// Emitted as an element attribute; otherwise only the template reads it.
    pub attribute: bool,
}

impl PropSchema {
    pub fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            allowed: &[],
            default: None,
            extract: None,
            transform: None,
            attribute: true,
        }
    }

    pub fn text(name: &'static str) -> Self {
        Self::new(name, ValueKind::Text)
    }

    pub fn enumeration(name: &'static str, allowed: &'static [&'static str]) -> Self {
        Self {
            allowed,
            ..Self::new(name, ValueKind::Enum)
        }
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, ValueKind::Number)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, ValueKind::Bool)
    }

    pub fn color(name: &'static str, slot: PaintSlot) -> Self {
        Self::new(name, ValueKind::Color(slot))
    }

    pub fn default_str(mut self, value: &'static str) -> Self {
        self.default = Some(DefaultValue::Str(value));
        self
    }

    pub fn default_number(mut self, value: f64) -> Self {
        self.default = Some(DefaultValue::Number(value));
        self
    }

    pub fn default_bool(mut self, value: bool) -> Self {
        self.default = Some(DefaultValue::Bool(value));
        self
    }

    pub fn extractor(mut self, extract: ExtractFn) -> Self {
        self.extract = Some(extract);
        self
    }

    pub fn transform(mut self, transform: TransformFn) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Read only by the render template, never emitted as an attribute.
    pub fn consumed(mut self) -> Self {
        self.attribute = false;
        self
    }

    /// Whether `value` is one of the allowed keywords (any value if none are declared).
    pub fn allows(&self, value: &str) -> bool {
        self.allowed.is_empty() || self.allowed.iter().any(|a| a.eq_ignore_ascii_case(value))
    }

    /// Whether `value` equals the declared default.
    pub fn is_default(&self, value: &PropValue) -> bool {
        self.default.map(|d| d.matches(value)).unwrap_or(false)
    }
}

impl fmt::Debug for PropSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropSchema")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("allowed", &self.allowed)
            .field("default", &self.default)
            .field("custom_extractor", &self.extract.is_some())
            .field("attribute", &self.attribute)
            .finish()
    }
}

/// A node together with the variant pairs of the library component it
/// instantiates. This is the raw property bag extractors read from.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    pub node: &'a DesignNode,
    pub variants: &'a [(String, String)],
}

impl<'a> NodeView<'a> {
    pub fn new(node: &'a DesignNode) -> Self {
        Self { node, variants: &[] }
    }

    pub fn with_variants(node: &'a DesignNode, variants: &'a [(String, String)]) -> Self {
        Self { node, variants }
    }

    /// Raw property by case-insensitive key, `{ value }` wrapper removed.
    ///
    /// Component properties take precedence over variant pairs.
    pub fn raw(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.node.raw_property(key) {
            return Some(unwrap_value(value).clone());
        }
        self.variants
            .iter()
            .find(|(name, _)| property_key_matches(name, key))
            .map(|(_, value)| Value::String(value.clone()))
    }

    /// Raw property rendered as a string.
    pub fn raw_str(&self, key: &str) -> Option<String> {
        match self.raw(key)? {
            Value::String(s) => Some(s),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Raw property coerced to a boolean.
    pub fn raw_bool(&self, key: &str) -> Option<bool> {
        match self.raw(key)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" => Some(true),
                "false" | "no" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::ResolvedColor;
    use serde_json::json;

    #[test]
    fn test_default_matches_case_insensitive() {
        let default = DefaultValue::Str("text");
        assert!(default.matches(&PropValue::Keyword("Text".into())));
        assert!(!default.matches(&PropValue::Keyword("contained".into())));
        assert!(DefaultValue::Bool(false).matches(&PropValue::Boolean(false)));
        assert!(DefaultValue::Number(0.0).matches(&PropValue::Number(0.0)));
        assert!(DefaultValue::Str("inherit")
            .matches(&PropValue::Color(ResolvedColor::Path("inherit".into()))));
    }

    #[test]
    fn test_allows() {
        let schema = PropSchema::enumeration("size", &["small", "medium", "large"]);
        assert!(schema.allows("Small"));
        assert!(!schema.allows("huge"));
        assert!(PropSchema::text("label").allows("anything"));
    }

    #[test]
    fn test_node_view_prefers_component_properties() {
        let node = DesignNode::instance("1", "Button", "10:1")
            .with_property("Size#1:2", json!({ "type": "VARIANT", "value": "Large" }));
        let variants = vec![
            ("Size".to_string(), "Small".to_string()),
            ("Variant".to_string(), "Outlined".to_string()),
        ];
        let view = NodeView::with_variants(&node, &variants);

        assert_eq!(view.raw_str("size").as_deref(), Some("Large"));
        assert_eq!(view.raw_str("variant").as_deref(), Some("Outlined"));
        assert_eq!(view.raw("color"), None);
    }

    #[test]
    fn test_raw_bool() {
        let node = DesignNode::frame("1", "Switch")
            .with_property("Checked", json!({ "type": "BOOLEAN", "value": true }))
            .with_property("Disabled", json!("False"));
        let view = NodeView::new(&node);

        assert_eq!(view.raw_bool("checked"), Some(true));
        assert_eq!(view.raw_bool("disabled"), Some(false));
        assert_eq!(view.raw_bool("missing"), None);
    }
}
