//! Extracted component tree.
//!
//! This is the classified, normalized view of a design subtree that the
//! code generator consumes. It owns its children and carries no back
//! references to the source document.

use indexmap::IndexMap;
use serde::Serialize;

use crate::category::Category;

/// Result of resolving a paint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResolvedColor {
    /// Theme-relative path such as `primary.main`.
    Path(String),
    /// Concrete `#rrggbbaa` color.
    Literal(String),
}

impl ResolvedColor {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Path(path) => path,
            Self::Literal(hex) => hex,
        }
    }

    pub fn is_path(&self) -> bool {
        matches!(self, Self::Path(_))
    }
}

/// An icon resolved from a library component instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconRef {
    /// Icon identifier in the icon package (e.g. `AddCircle`).
    pub name: String,
    /// Library component the icon was instantiated from.
    pub component_id: Option<String>,
}

/// A normalized property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    String(String),
    Keyword(String),
    Number(f64),
    Boolean(bool),
    Color(ResolvedColor),
    Icon(IconRef),
}

impl PropValue {
    /// Get as string if it's a string or keyword value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) | PropValue::Keyword(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&ResolvedColor> {
        match self {
            PropValue::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_icon(&self) -> Option<&IconRef> {
        match self {
            PropValue::Icon(icon) => Some(icon),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Boolean(b)
    }
}

impl From<ResolvedColor> for PropValue {
    fn from(c: ResolvedColor) -> Self {
        PropValue::Color(c)
    }
}

/// A classified design node with its resolved properties and children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedComponent {
    pub category: Category,
    pub source_id: String,
    pub source_name: String,
    /// Non-default properties, keyed by schema property name.
    pub properties: IndexMap<String, PropValue>,
    /// Generator-only values such as resolved icons.
    pub auxiliary: IndexMap<String, PropValue>,
    /// Inline style entries derived from layout and paint.
    pub style: IndexMap<String, PropValue>,
    pub children: Vec<ExtractedComponent>,
    pub variants: Vec<String>,
}

impl ExtractedComponent {
    pub fn new(category: Category, source_id: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            category,
            source_id: source_id.into(),
            source_name: source_name.into(),
            properties: IndexMap::new(),
            auxiliary: IndexMap::new(),
            style: IndexMap::new(),
            children: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_auxiliary(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.auxiliary.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: ExtractedComponent) -> Self {
        self.children.push(child);
        self
    }

    pub fn get_property(&self, key: &str) -> Option<&PropValue> {
        self.properties.get(key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Number of components in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(component) = stack.pop() {
            count += 1;
            stack.extend(component.children.iter());
        }
        count
    }

    /// Categories of this subtree in pre-order.
    pub fn categories(&self) -> Vec<Category> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(component) = stack.pop() {
            out.push(component.category);
            stack.extend(component.children.iter().rev());
        }
        out
    }
}
