//! Schema-driven property extraction.

use convert_case::{Case, Casing};
use indexmap::IndexMap;
use kiln_core::{DesignNode, IconRef, PaintSlot, PropValue, ResolvedColor};
use kiln_registry::{ComponentDescriptor, NodeView, PropSchema, ValueKind};
use kiln_resolver::{ColorResolver, ComponentInfo, RunContext};
use serde_json::Value;

use crate::error::Result;

/// Variant keys naming the icon of an icon-set component.
const ICON_VARIANT_KEYS: &[&str] = &["icon", "name", "type", "glyph"];

/// Extracts a descriptor's properties and icons from a node.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyExtractor {
    resolver: ColorResolver,
}

impl PropertyExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-default properties in schema order.
    ///
    /// `variants` are the `Prop=Value` pairs of the instance's library
    /// component, searched after the node's own component properties.
    pub fn properties(
        &self,
        node: &DesignNode,
        descriptor: &ComponentDescriptor,
        variants: &[(String, String)],
        ctx: &mut RunContext<'_>,
    ) -> Result<IndexMap<String, PropValue>> {
        let view = NodeView::with_variants(node, variants);
        let mut properties = IndexMap::new();

        for schema in &descriptor.props {
            let Some(raw) = self.raw_value(schema, &view, ctx)? else {
                continue;
            };
            let transformed = match schema.transform {
                Some(transform) => transform(raw),
                None => Some(raw),
            };
            let Some(value) = transformed.and_then(|value| normalize(schema, value)) else {
                tracing::trace!(node = %node.id, prop = schema.name, "value rejected by schema");
                continue;
            };
            if schema.is_default(&value) {
                continue;
            }
            properties.insert(schema.name.to_string(), value);
        }
        Ok(properties)
    }

    fn raw_value(
        &self,
        schema: &PropSchema,
        view: &NodeView<'_>,
        ctx: &mut RunContext<'_>,
    ) -> Result<Option<PropValue>> {
        if let Some(extract) = schema.extract {
            return Ok(extract(view));
        }
        if let ValueKind::Color(slot) = schema.kind {
            return self.paint_color(view.node, slot, ctx);
        }
        Ok(view.raw(schema.name).and_then(from_json))
    }

    /// Resolve the first visible paint of `slot`. Text fills are read from
    /// the node's primary text run.
    fn paint_color(
        &self,
        node: &DesignNode,
        slot: PaintSlot,
        ctx: &mut RunContext<'_>,
    ) -> Result<Option<PropValue>> {
        let source = match slot {
            PaintSlot::TextFill if !node.is_text() => match node.first_text_node() {
                Some(text) => text,
                None => return Ok(None),
            },
            _ => node,
        };
        let Some(paint) = source.first_visible_paint(slot) else {
            return Ok(None);
        };
        let color = self.resolver.resolve(paint, source.style_id(slot), ctx)?;
        Ok(Some(PropValue::Color(color)))
    }

    /// Icons named by the descriptor's icon hook, keyed by slot.
    pub fn icons(
        &self,
        node: &DesignNode,
        descriptor: &ComponentDescriptor,
        ctx: &mut RunContext<'_>,
    ) -> Result<IndexMap<String, PropValue>> {
        let mut icons = IndexMap::new();
        let Some(hook) = descriptor.icons else {
            return Ok(icons);
        };

        for (slot, icon_node) in hook(node) {
            match self.icon_ref(icon_node, ctx)? {
                Some(icon) => {
                    icons.insert(slot.to_string(), PropValue::Icon(icon));
                }
                None => tracing::debug!(node = %icon_node.id, slot, "icon name not resolvable"),
            }
        }
        Ok(icons)
    }

    fn icon_ref(&self, node: &DesignNode, ctx: &mut RunContext<'_>) -> Result<Option<IconRef>> {
        let source_name = match node.component_id.as_deref() {
            Some(id) => ctx.component_info(id)?.map(icon_source_name),
            None => None,
        };
        let source_name = source_name.unwrap_or_else(|| last_segment(&node.name).to_string());

        Ok(icon_identifier(&source_name).map(|name| IconRef {
            name,
            component_id: node.component_id.clone(),
        }))
    }
}

/// Normalize a raw value to the schema's kind. `None` drops the property.
pub fn normalize(schema: &PropSchema, value: PropValue) -> Option<PropValue> {
    match schema.kind {
        ValueKind::Enum => {
            let keyword = match value {
                PropValue::String(s) | PropValue::Keyword(s) => s.trim().to_lowercase(),
                PropValue::Boolean(b) => b.to_string(),
                PropValue::Number(n) => n.to_string(),
                _ => return None,
            };
            schema.allows(&keyword).then_some(PropValue::Keyword(keyword))
        }
        ValueKind::Number => match value {
            PropValue::Number(n) => Some(PropValue::Number(n)),
            PropValue::String(s) | PropValue::Keyword(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(PropValue::Number),
            _ => None,
        },
        ValueKind::Bool => match value {
            PropValue::Boolean(b) => Some(PropValue::Boolean(b)),
            PropValue::String(s) | PropValue::Keyword(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(PropValue::Boolean(true)),
                "false" => Some(PropValue::Boolean(false)),
                _ => None,
            },
            _ => None,
        },
        ValueKind::Text => match value {
            PropValue::String(s) | PropValue::Keyword(s) => Some(PropValue::String(s)),
            PropValue::Number(n) => Some(PropValue::Number(n)),
            _ => None,
        },
        ValueKind::Color(_) => match value {
            PropValue::Color(color) => Some(PropValue::Color(color)),
            PropValue::String(s) | PropValue::Keyword(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else if s.starts_with('#') {
                    Some(PropValue::Color(ResolvedColor::Literal(s.to_lowercase())))
                } else {
                    Some(PropValue::Color(ResolvedColor::Path(s.to_string())))
                }
            }
            _ => None,
        },
    }
}

fn from_json(value: Value) -> Option<PropValue> {
    match value {
        Value::String(s) => Some(PropValue::String(s)),
        Value::Bool(b) => Some(PropValue::Boolean(b)),
        Value::Number(n) => n.as_f64().map(PropValue::Number),
        _ => None,
    }
}

/// Name an icon component is published under: an icon-naming variant
/// value, else the last path segment of its canonical name.
fn icon_source_name(info: &ComponentInfo) -> String {
    info.variant_pairs()
        .into_iter()
        .find(|(key, _)| ICON_VARIANT_KEYS.iter().any(|k| key.eq_ignore_ascii_case(k)))
        .map(|(_, value)| value)
        .unwrap_or_else(|| last_segment(info.canonical_name()).to_string())
}

fn last_segment(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name).trim()
}

/// Icon-package identifier for a source name: `add-circle` becomes
/// `AddCircle`, a trailing `Icon` is dropped.
pub fn icon_identifier(source: &str) -> Option<String> {
    let pascal: String = source
        .to_case(Case::Pascal)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let name = match pascal.strip_suffix("Icon") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => pascal,
    };
    let valid = name
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic())
        && name != "Icon";
    valid.then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::{Category, Paint, Rgba, StaticClient};
    use kiln_registry::MappingRegistry;
    use kiln_resolver::LibraryMap;
    use serde_json::json;

    fn descriptor(category: Category) -> &'static ComponentDescriptor {
        MappingRegistry::standard().lookup_category(category).unwrap()
    }

    fn extract(node: &DesignNode, category: Category, variants: &[(String, String)]) -> IndexMap<String, PropValue> {
        let client = StaticClient::new();
        let mut ctx = RunContext::new(&client, "file");
        PropertyExtractor::new()
            .properties(node, descriptor(category), variants, &mut ctx)
            .unwrap()
    }

    #[test]
    fn test_enum_is_lowercased() {
        let node = DesignNode::instance("1", "Button", "10:1")
            .with_property("variant", json!({ "type": "VARIANT", "value": "Contained" }));
        let props = extract(&node, Category::Button, &[]);
        assert_eq!(props.get("variant"), Some(&PropValue::Keyword("contained".into())));
    }

    #[test]
    fn test_default_is_omitted() {
        let node = DesignNode::instance("1", "Button", "10:1")
            .with_property("Variant#4:2", json!("Text"))
            .with_child(DesignNode::text("2", "label", "Go"));
        let props = extract(&node, Category::Button, &[]);
        assert!(!props.contains_key("variant"));
        assert_eq!(props.get("label"), Some(&PropValue::String("Go".into())));
    }

    #[test]
    fn test_disallowed_enum_dropped() {
        let node = DesignNode::instance("1", "Button", "10:1").with_property("size", json!("Huge"));
        let props = extract(&node, Category::Button, &[]);
        assert!(!props.contains_key("size"));
    }

    #[test]
    fn test_variant_pairs_are_secondary_source() {
        let node = DesignNode::instance("1", "Button", "10:1").with_property("Size", json!("Small"));
        let variants = vec![
            ("Size".to_string(), "Large".to_string()),
            ("Variant".to_string(), "Outlined".to_string()),
        ];
        let props = extract(&node, Category::Button, &variants);
        assert_eq!(props.get("size"), Some(&PropValue::Keyword("small".into())));
        assert_eq!(props.get("variant"), Some(&PropValue::Keyword("outlined".into())));
    }

    #[test]
    fn test_label_found_two_levels_down() {
        let node = DesignNode::instance("1", "Button", "10:1").with_child(
            DesignNode::frame("2", "Content")
                .with_child(DesignNode::frame("3", "Inner").with_child(DesignNode::text("4", "Label", "Save")))
                .with_child(DesignNode::text("5", "Other", "Cancel")),
        );
        let props = extract(&node, Category::Button, &[]);
        assert_eq!(props.get("label"), Some(&PropValue::String("Save".into())));
    }

    #[test]
    fn test_bool_and_number_coercion() {
        let node = DesignNode::instance("1", "Checkbox", "10:1")
            .with_property("Checked", json!("true"))
            .with_property("Disabled", json!(false));
        let props = extract(&node, Category::Checkbox, &[]);
        assert_eq!(props.get("checked"), Some(&PropValue::Boolean(true)));
        assert!(!props.contains_key("disabled"));

        let list = DesignNode::frame("1", "List").with_property("dense", json!("yes"));
        assert!(extract(&list, Category::List, &[]).is_empty());
    }

    #[test]
    fn test_text_color_from_primary_run() {
        let client = StaticClient::new();
        let mut ctx = RunContext::new(&client, "file")
            .with_library(LibraryMap::new().with_entry("abc", "secondary.main"));
        let text = DesignNode::text("2", "t", "Hello")
            .with_fill(Paint::solid(Rgba::BLACK).bound_to("VariableID:abc/1:1"));
        let node = DesignNode::frame("1", "Typography").with_child(text);

        let props = PropertyExtractor::new()
            .properties(&node, descriptor(Category::Typography), &[], &mut ctx)
            .unwrap();
        assert_eq!(
            props.get("color"),
            Some(&PropValue::Color(ResolvedColor::Path("secondary.main".into())))
        );
        assert_eq!(props.get("text"), Some(&PropValue::String("Hello".into())));
    }

    #[test]
    fn test_default_color_path_omitted() {
        let client = StaticClient::new();
        let mut ctx = RunContext::new(&client, "file")
            .with_library(LibraryMap::new().with_entry("abc", "text.primary"));
        let node = DesignNode::text("1", "Body", "Hello")
            .with_fill(Paint::solid(Rgba::BLACK).bound_to("VariableID:abc"));

        let props = PropertyExtractor::new()
            .properties(&node, descriptor(Category::Typography), &[], &mut ctx)
            .unwrap();
        assert!(!props.contains_key("color"));
    }

    #[test]
    fn test_button_icons() {
        let client = StaticClient::new();
        let mut ctx = RunContext::new(&client, "file");
        ctx.components.insert(
            "30:1",
            ComponentInfo::new("Icon=add-circle", Some("Material Icons".into())),
        );
        let node = DesignNode::instance("1", "Button", "10:1")
            .with_child(DesignNode::instance("2", "icon-left", "30:1"))
            .with_child(DesignNode::text("3", "label", "Add"))
            .with_child(DesignNode::new("4", "Arrow Forward Icon", kiln_core::NodeType::Vector));

        let icons = PropertyExtractor::new()
            .icons(&node, descriptor(Category::Button), &mut ctx)
            .unwrap();
        let start = icons.get("startIcon").and_then(PropValue::as_icon).unwrap();
        assert_eq!(start.name, "AddCircle");
        assert_eq!(start.component_id.as_deref(), Some("30:1"));
        let end = icons.get("endIcon").and_then(PropValue::as_icon).unwrap();
        assert_eq!(end.name, "ArrowForward");
        assert_eq!(end.component_id, None);
        assert_eq!(client.total_calls(), 0);
    }

    #[test]
    fn test_icon_identifier() {
        assert_eq!(icon_identifier("add-circle").as_deref(), Some("AddCircle"));
        assert_eq!(icon_identifier("Settings Icon").as_deref(), Some("Settings"));
        assert_eq!(icon_identifier("home_outlined").as_deref(), Some("HomeOutlined"));
        assert_eq!(icon_identifier("Icon"), None);
        assert_eq!(icon_identifier("360"), None);
        assert_eq!(icon_identifier(""), None);
    }
}
