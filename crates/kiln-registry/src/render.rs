//! Markup building blocks shared by render templates and the generator.

use kiln_core::{ExtractedComponent, IconRef, PropValue};
use serde_json::Value;

use crate::descriptor::ComponentDescriptor;

/// Module prefix of icon default imports.
pub const ICON_MODULE: &str = "@mui/icons-material";

/// One imported symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Import {
    pub module: String,
    pub symbol: String,
    /// Default import rather than a named one.
    pub default: bool,
}

impl Import {
    pub fn named(module: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbol: symbol.into(),
            default: false,
        }
    }

    pub fn default_export(module: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbol: symbol.into(),
            default: true,
        }
    }
}

/// Output of a render template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub markup: String,
    pub imports: Vec<Import>,
}

impl Rendered {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            imports: Vec::new(),
        }
    }

    pub fn with_import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }
}

/// Prepared parts handed to a render template.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub component: &'a ExtractedComponent,
    pub descriptor: &'a ComponentDescriptor,
    /// Serialized non-default property attributes.
    pub attributes: &'a [String],
    /// Serialized icon attributes (`startIcon={<AddIcon />}`).
    pub icon_attributes: &'a [String],
    /// Serialized `sx={{ ... }}` attribute.
    pub sx: Option<&'a str>,
    /// Escaped text content.
    pub content: Option<&'a str>,
    /// Rendered child markup, in order.
    pub children: &'a [String],
}

impl<'a> RenderInput<'a> {
    pub fn symbol(&self) -> &'static str {
        self.descriptor.symbol()
    }

    pub fn symbol_import(&self) -> Import {
        Import::named(self.descriptor.module, self.symbol())
    }

    /// Property attributes followed by `sx`, without icon attributes.
    pub fn base_attributes(&self) -> String {
        join_attributes(self.attributes.iter().map(String::as_str).chain(self.sx))
    }

    /// Property, icon, and `sx` attributes.
    pub fn all_attributes(&self) -> String {
        join_attributes(
            self.attributes
                .iter()
                .chain(self.icon_attributes)
                .map(String::as_str)
                .chain(self.sx),
        )
    }

    /// A text property of the component.
    pub fn text(&self, key: &str) -> Option<&'a str> {
        self.component.get_property(key).and_then(PropValue::as_str)
    }

    /// A boolean property of the component; absent means false.
    pub fn flag(&self, key: &str) -> bool {
        self.component
            .get_property(key)
            .and_then(PropValue::as_bool)
            .unwrap_or(false)
    }

    /// A resolved icon from the auxiliary map.
    pub fn icon(&self, key: &str) -> Option<&'a IconRef> {
        self.component.auxiliary.get(key).and_then(PropValue::as_icon)
    }
}

/// The generic template: the symbol with every attribute, content and children.
pub fn render_generic(input: &RenderInput<'_>) -> Rendered {
    let markup = element(
        input.symbol(),
        &input.all_attributes(),
        input.content,
        input.children,
        input.descriptor.self_closing,
    );
    Rendered::new(markup).with_import(input.symbol_import())
}

/// Build one element. Children are placed on their own lines, indented two
/// spaces; a lone text content stays inline.
pub fn element(
    symbol: &str,
    attributes: &str,
    content: Option<&str>,
    children: &[String],
    self_closing: bool,
) -> String {
    let open = if attributes.is_empty() {
        format!("<{}", symbol)
    } else {
        format!("<{} {}", symbol, attributes)
    };

    if self_closing || (content.is_none() && children.is_empty()) {
        return format!("{} />", open);
    }

    if children.is_empty() {
        return format!("{}>{}</{}>", open, content.unwrap_or_default(), symbol);
    }

    let mut lines = vec![format!("{}>", open)];
    if let Some(text) = content {
        lines.push(indent(text, 2));
    }
    for child in children {
        lines.push(indent(child, 2));
    }
    lines.push(format!("</{}>", symbol));
    lines.join("\n")
}

/// Indent every non-empty line of `markup`.
pub fn indent(markup: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    markup
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_attributes<'s>(attributes: impl Iterator<Item = &'s str>) -> String {
    attributes
        .filter(|attribute| !attribute.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Serialize one property as a JSX attribute.
pub fn attribute(name: &str, value: &PropValue) -> String {
    match value {
        PropValue::String(s) | PropValue::Keyword(s) => string_attribute(name, s),
        PropValue::Number(n) => format!("{}={{{}}}", name, n),
        PropValue::Boolean(true) => name.to_string(),
        PropValue::Boolean(false) => format!("{}={{false}}", name),
        PropValue::Color(color) => string_attribute(name, color.as_str()),
        PropValue::Icon(icon) => format!("{}={{{}}}", name, icon_element(icon)),
    }
}

/// A string attribute, switching to a JS string expression when the value
/// cannot sit inside plain quotes.
pub fn string_attribute(name: &str, value: &str) -> String {
    if value.contains(['"', '{', '}', '\\', '\n']) {
        format!("{}={{{}}}", name, Value::String(value.to_string()))
    } else {
        format!("{}=\"{}\"", name, value)
    }
}

/// Escape text for use as JSX element content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '{' => out.push_str("{'{'}"),
            '}' => out.push_str("{'}'}"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Component symbol of an icon (`Add` -> `AddIcon`).
pub fn icon_symbol(icon: &IconRef) -> String {
    format!("{}Icon", icon.name)
}

/// Self-closing icon element.
pub fn icon_element(icon: &IconRef) -> String {
    format!("<{} />", icon_symbol(icon))
}

/// Default import of an icon from its own module.
pub fn icon_import(icon: &IconRef) -> Import {
    Import::default_export(format!("{}/{}", ICON_MODULE, icon.name), icon_symbol(icon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::{Category, ResolvedColor};

    fn add_icon() -> IconRef {
        IconRef {
            name: "Add".into(),
            component_id: Some("5:5".into()),
        }
    }

    #[test]
    fn test_attribute_serialization() {
        assert_eq!(attribute("variant", &PropValue::Keyword("contained".into())), "variant=\"contained\"");
        assert_eq!(attribute("spacing", &PropValue::Number(2.0)), "spacing={2}");
        assert_eq!(attribute("spacing", &PropValue::Number(1.5)), "spacing={1.5}");
        assert_eq!(attribute("disabled", &PropValue::Boolean(true)), "disabled");
        assert_eq!(attribute("checked", &PropValue::Boolean(false)), "checked={false}");
        assert_eq!(
            attribute("color", &PropValue::Color(ResolvedColor::Path("primary.main".into()))),
            "color=\"primary.main\""
        );
        assert_eq!(attribute("startIcon", &PropValue::Icon(add_icon())), "startIcon={<AddIcon />}");
    }

    #[test]
    fn test_string_attribute_quotes() {
        assert_eq!(string_attribute("label", "Say \"hi\""), "label={\"Say \\\"hi\\\"\"}");
        assert_eq!(string_attribute("label", "plain"), "label=\"plain\"");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b {c}"), "a &lt; b {'{'}c{'}'}");
        assert_eq!(escape_text("Save"), "Save");
    }

    #[test]
    fn test_element_shapes() {
        assert_eq!(element("Divider", "", None, &[], true), "<Divider />");
        assert_eq!(element("Box", "sx={{ gap: 2 }}", None, &[], false), "<Box sx={{ gap: 2 }} />");
        assert_eq!(
            element("Button", "variant=\"contained\"", Some("Save"), &[], false),
            "<Button variant=\"contained\">Save</Button>"
        );

        let children = vec!["<Typography>Hi</Typography>".to_string(), "<Box>\n  <Divider />\n</Box>".to_string()];
        assert_eq!(
            element("Stack", "", None, &children, false),
            "<Stack>\n  <Typography>Hi</Typography>\n  <Box>\n    <Divider />\n  </Box>\n</Stack>"
        );
    }

    #[test]
    fn test_icon_import() {
        let import = icon_import(&add_icon());
        assert_eq!(import.module, "@mui/icons-material/Add");
        assert_eq!(import.symbol, "AddIcon");
        assert!(import.default);
    }

    #[test]
    fn test_render_generic() {
        let descriptor = ComponentDescriptor::new(Category::Chip);
        let component = ExtractedComponent::new(Category::Chip, "1", "Chip");
        let attributes = vec!["label=\"New\"".to_string()];
        let icons = vec!["icon={<AddIcon />}".to_string()];
        let input = RenderInput {
            component: &component,
            descriptor: &descriptor,
            attributes: &attributes,
            icon_attributes: &icons,
            sx: Some("sx={{ p: 1 }}"),
            content: None,
            children: &[],
        };

        let rendered = render_generic(&input);
        assert_eq!(rendered.markup, "<Chip label=\"New\" icon={<AddIcon />} sx={{ p: 1 }} />");
        assert_eq!(rendered.imports, vec![Import::named("@mui/material", "Chip")]);
        assert_eq!(input.base_attributes(), "label=\"New\" sx={{ p: 1 }}");
    }
}
