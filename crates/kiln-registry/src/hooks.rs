//! Per-category hooks: custom extractors, slot and icon finders, and render
//! templates for composites the generic template cannot express.

use kiln_core::{Category, DesignNode, LayoutMode, NodeType, PropValue, SizingMode};

use crate::descriptor::Slot;
use crate::render::{
    element, escape_text, icon_element, icon_import, icon_symbol, string_attribute, Import,
    RenderInput, Rendered,
};
use crate::schema::NodeView;

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// First visible text node whose name contains `needle` (case-insensitive).
fn text_named<'n>(node: &'n DesignNode, needle: &str) -> Option<&'n str> {
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if !current.visible {
            continue;
        }
        if current.is_text() && current.name.to_lowercase().contains(needle) {
            return current.characters.as_deref();
        }
        stack.extend(current.children.iter().rev());
    }
    None
}

fn raw_text(view: &NodeView<'_>, keys: &[&str]) -> Option<PropValue> {
    keys.iter()
        .find_map(|key| view.raw_str(key))
        .filter(|s| !s.is_empty())
        .map(PropValue::String)
}

fn own_text(node: &DesignNode) -> Option<PropValue> {
    node.first_text().map(|text| PropValue::String(text.to_string()))
}

/// Label of a button-like component: an exposed text property, else the
/// first text run.
pub fn label(view: &NodeView<'_>) -> Option<PropValue> {
    raw_text(view, &["label", "text"]).or_else(|| own_text(view.node))
}

/// Text of a typography node: its own characters, else every text run
/// beneath it joined by spaces.
pub fn typography_text(view: &NodeView<'_>) -> Option<PropValue> {
    if let Some(text) = &view.node.characters {
        return Some(PropValue::String(text.clone()));
    }

    let runs: Vec<&str> = view.node.texts().collect();
    if runs.len() > 1 {
        tracing::debug!(node = %view.node.id, runs = runs.len(), "joining text runs");
    }
    (!runs.is_empty()).then(|| PropValue::String(runs.join(" ")))
}

const TYPOGRAPHY_VARIANTS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "subtitle1", "subtitle2", "body1", "body2", "caption",
    "overline", "button",
];

/// Typography variant from an exposed property, else from the font size.
pub fn typography_variant(view: &NodeView<'_>) -> Option<PropValue> {
    if let Some(raw) = view.raw_str("variant").or_else(|| view.raw_str("style")) {
        let lowered = raw.to_lowercase();
        if TYPOGRAPHY_VARIANTS.contains(&lowered.as_str()) {
            return Some(PropValue::Keyword(lowered));
        }
    }

    let size = view
        .node
        .first_text_node()
        .and_then(|text| text.style.as_ref())
        .and_then(|style| style.font_size)?;
    let variant = match size {
        s if s >= 96.0 => "h1",
        s if s >= 60.0 => "h2",
        s if s >= 48.0 => "h3",
        s if s >= 34.0 => "h4",
        s if s >= 24.0 => "h5",
        s if s >= 20.0 => "h6",
        s if s >= 16.0 => "body1",
        s if s >= 14.0 => "body2",
        _ => "caption",
    };
    Some(PropValue::Keyword(variant.to_string()))
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

fn state(view: &NodeView<'_>) -> Option<String> {
    view.raw_str("state").map(|s| s.trim().to_lowercase())
}

pub fn disabled(view: &NodeView<'_>) -> Option<PropValue> {
    view.raw_bool("disabled")
        .or_else(|| state(view).map(|s| s == "disabled"))
        .map(PropValue::Boolean)
}

pub fn checked(view: &NodeView<'_>) -> Option<PropValue> {
    view.raw_bool("checked")
        .or_else(|| view.raw_bool("selected"))
        .or_else(|| {
            state(view).map(|s| matches!(s.as_str(), "checked" | "on" | "selected" | "active"))
        })
        .map(PropValue::Boolean)
}

pub fn error(view: &NodeView<'_>) -> Option<PropValue> {
    view.raw_bool("error")
        .or_else(|| state(view).map(|s| s == "error"))
        .map(PropValue::Boolean)
}

pub fn closable(view: &NodeView<'_>) -> Option<PropValue> {
    ["closable", "close", "dismissible", "action"]
        .iter()
        .find_map(|key| view.raw_bool(key))
        .map(PropValue::Boolean)
}

/// `fullWidth` when the node fills its parent horizontally.
pub fn full_width(view: &NodeView<'_>) -> Option<PropValue> {
    view.raw_bool("fullWidth")
        .or_else(|| {
            view.node
                .layout_sizing_horizontal
                .map(|sizing| sizing == SizingMode::Fill)
        })
        .map(PropValue::Boolean)
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

pub fn stack_direction(view: &NodeView<'_>) -> Option<PropValue> {
    let direction = match view.node.layout_mode? {
        LayoutMode::Horizontal => "row",
        LayoutMode::Vertical => "column",
        _ => return None,
    };
    Some(PropValue::Keyword(direction.to_string()))
}

/// Auto-layout spacing in theme units.
pub fn stack_spacing(view: &NodeView<'_>) -> Option<PropValue> {
    view.node
        .item_spacing
        .filter(|spacing| *spacing > 0.0)
        .map(|spacing| PropValue::Number(spacing / 8.0))
}

// ---------------------------------------------------------------------------
// Composite texts
// ---------------------------------------------------------------------------

pub fn card_title(view: &NodeView<'_>) -> Option<PropValue> {
    raw_text(view, &["title"]).or_else(|| {
        view.node
            .texts()
            .next()
            .map(|text| PropValue::String(text.to_string()))
    })
}

pub fn card_subheader(view: &NodeView<'_>) -> Option<PropValue> {
    raw_text(view, &["subheader", "subtitle"]).or_else(|| {
        view.node
            .texts()
            .nth(1)
            .map(|text| PropValue::String(text.to_string()))
    })
}

pub fn field_label(view: &NodeView<'_>) -> Option<PropValue> {
    raw_text(view, &["label"])
        .or_else(|| text_named(view.node, "label").map(|text| PropValue::String(text.to_string())))
}

pub fn placeholder(view: &NodeView<'_>) -> Option<PropValue> {
    raw_text(view, &["placeholder"]).or_else(|| {
        text_named(view.node, "placeholder").map(|text| PropValue::String(text.to_string()))
    })
}

pub fn helper_text(view: &NodeView<'_>) -> Option<PropValue> {
    raw_text(view, &["helperText", "helper text", "helper"])
        .or_else(|| text_named(view.node, "helper").map(|text| PropValue::String(text.to_string())))
}

pub fn alert_title(view: &NodeView<'_>) -> Option<PropValue> {
    raw_text(view, &["title"])
        .or_else(|| text_named(view.node, "title").map(|text| PropValue::String(text.to_string())))
}

/// Alert message: an exposed property, else the first text not named as a title.
pub fn alert_message(view: &NodeView<'_>) -> Option<PropValue> {
    if let Some(value) = raw_text(view, &["message", "text", "description"]) {
        return Some(value);
    }
    let mut stack = vec![view.node];
    while let Some(current) = stack.pop() {
        if !current.visible {
            continue;
        }
        if current.is_text() && !current.name.to_lowercase().contains("title") {
            return current.characters.clone().map(PropValue::String);
        }
        stack.extend(current.children.iter().rev());
    }
    None
}

/// Badge content; numeric text becomes a number.
pub fn badge_content(view: &NodeView<'_>) -> Option<PropValue> {
    let text = raw_text(view, &["content", "count", "badgeContent"])
        .or_else(|| own_text(view.node))?;
    let parsed = text.as_str().and_then(|s| s.trim().parse::<f64>().ok());
    Some(parsed.map(PropValue::Number).unwrap_or(text))
}

/// Avatar initials from the first text run.
pub fn avatar_initials(view: &NodeView<'_>) -> Option<PropValue> {
    raw_text(view, &["initials", "text"]).or_else(|| own_text(view.node))
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

fn card_slot_category(node: &DesignNode) -> Option<Category> {
    if !node.node_type.is_container() {
        return None;
    }
    let normalized: String = node
        .name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    match normalized.as_str() {
        "cardheader" | "header" => Some(Category::CardHeader),
        "cardcontent" | "content" | "body" => Some(Category::CardContent),
        "cardactions" | "actions" | "footer" => Some(Category::CardActions),
        _ => None,
    }
}

/// Header, content and actions regions of a card, in source order, found
/// beneath any wrapper frames. A found region is not searched further and
/// a region without visible children is skipped.
pub fn card_slots(node: &DesignNode) -> Vec<Slot<'_>> {
    let mut slots = Vec::new();
    let mut stack: Vec<&DesignNode> = node.visible_children().collect();
    stack.reverse();

    while let Some(current) = stack.pop() {
        if let Some(category) = card_slot_category(current) {
            if current.visible_children().next().is_some() {
                slots.push(Slot::forced(current, category));
            } else {
                tracing::debug!(node = %current.id, %category, "skipping empty card region");
            }
            continue;
        }
        if current.node_type.is_container() {
            stack.extend(current.children.iter().filter(|c| c.visible).rev());
        }
    }
    slots
}

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

/// Whether a node is an icon: an instance or vector-like node named as one.
pub fn is_icon_node(node: &DesignNode) -> bool {
    node.visible
        && matches!(
            node.node_type,
            NodeType::Instance
                | NodeType::Component
                | NodeType::Frame
                | NodeType::Group
                | NodeType::Vector
                | NodeType::BooleanOperation
        )
        && node.name.to_lowercase().contains("icon")
}

/// Icons of a button: the first icon before the label is `startIcon`, the
/// first after it is `endIcon`.
pub fn button_icons(node: &DesignNode) -> Vec<(&'static str, &DesignNode)> {
    let mut start = None;
    let mut end = None;
    let mut seen_text = false;

    let mut stack: Vec<&DesignNode> = node.visible_children().collect();
    stack.reverse();
    while let Some(current) = stack.pop() {
        if is_icon_node(current) {
            if !seen_text && start.is_none() {
                start = Some(current);
            } else if seen_text && end.is_none() {
                end = Some(current);
            }
            continue;
        }
        if current.is_text() {
            seen_text = true;
            continue;
        }
        stack.extend(current.children.iter().filter(|c| c.visible).rev());
    }

    let mut icons = Vec::new();
    if let Some(icon) = start {
        icons.push(("startIcon", icon));
    }
    if let Some(icon) = end {
        icons.push(("endIcon", icon));
    }
    icons
}

/// The first icon beneath a node, as its `icon`.
pub fn child_icon(node: &DesignNode) -> Vec<(&'static str, &DesignNode)> {
    let mut stack: Vec<&DesignNode> = node.visible_children().collect();
    stack.reverse();
    while let Some(current) = stack.pop() {
        if is_icon_node(current) {
            return vec![("icon", current)];
        }
        stack.extend(current.children.iter().filter(|c| c.visible).rev());
    }
    Vec::new()
}

/// The node itself is the icon.
pub fn self_icon(node: &DesignNode) -> Vec<(&'static str, &DesignNode)> {
    vec![("icon", node)]
}

// ---------------------------------------------------------------------------
// Render templates
// ---------------------------------------------------------------------------

/// Checkbox, switch and radio: wrapped in a `FormControlLabel` when labelled.
pub fn render_control(input: &RenderInput<'_>) -> Rendered {
    let control = element(input.symbol(), &input.base_attributes(), None, &[], true);
    match input.text("label") {
        Some(label) => {
            let markup = format!(
                "<FormControlLabel control={{{}}} {} />",
                control,
                string_attribute("label", label)
            );
            Rendered::new(markup)
                .with_import(input.symbol_import())
                .with_import(Import::named(input.descriptor.module, "FormControlLabel"))
        }
        None => Rendered::new(control).with_import(input.symbol_import()),
    }
}

/// Alert with an optional title and close action.
pub fn render_alert(input: &RenderInput<'_>) -> Rendered {
    let mut imports = vec![input.symbol_import()];
    let mut attributes = input.all_attributes();

    if input.flag("closable") {
        let action = "action={<IconButton aria-label=\"close\" color=\"inherit\" size=\"small\"><CloseIcon fontSize=\"inherit\" /></IconButton>}";
        if !attributes.is_empty() {
            attributes.push(' ');
        }
        attributes.push_str(action);
        imports.push(Import::named(input.descriptor.module, "IconButton"));
        imports.push(Import::default_export("@mui/icons-material/Close", "CloseIcon"));
    }

    let markup = match input.text("title") {
        Some(title) => {
            imports.push(Import::named(input.descriptor.module, "AlertTitle"));
            let mut children = vec![format!("<AlertTitle>{}</AlertTitle>", escape_text(title))];
            children.extend(input.content.map(str::to_string));
            children.extend(input.children.iter().cloned());
            element(input.symbol(), &attributes, None, &children, false)
        }
        None => element(input.symbol(), &attributes, input.content, input.children, false),
    };
    Rendered {
        markup,
        imports,
    }
}

/// Icon button: the resolved icon is its only content.
pub fn render_icon_button(input: &RenderInput<'_>) -> Rendered {
    let mut rendered = Rendered::default().with_import(input.symbol_import());
    let mut children = Vec::new();
    if let Some(icon) = input.icon("icon") {
        children.push(icon_element(icon));
        rendered.imports.push(icon_import(icon));
    }
    children.extend(input.children.iter().cloned());
    rendered.markup = element(input.symbol(), &input.base_attributes(), None, &children, false);
    rendered
}

/// Standalone icon: the named icon when resolved, else a bare `SvgIcon`.
pub fn render_icon(input: &RenderInput<'_>) -> Rendered {
    match input.icon("icon") {
        Some(icon) => {
            let symbol = icon_symbol(icon);
            Rendered::new(element(&symbol, &input.base_attributes(), None, &[], true))
                .with_import(icon_import(icon))
        }
        None => Rendered::new(element(input.symbol(), &input.base_attributes(), None, &[], true))
            .with_import(input.symbol_import()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ComponentDescriptor;
    use kiln_core::{ExtractedComponent, IconRef, TypeStyle};
    use serde_json::json;

    fn text_with_size(id: &str, text: &str, size: f64) -> DesignNode {
        let mut node = DesignNode::text(id, "text", text);
        node.style = Some(TypeStyle {
            font_size: Some(size),
            ..Default::default()
        });
        node
    }

    #[test]
    fn test_label_two_levels_deep() {
        let node = DesignNode::frame("1", "Button").with_child(
            DesignNode::frame("2", "Wrapper")
                .with_child(DesignNode::frame("3", "Inner").with_child(DesignNode::text("4", "t", "Save"))),
        );
        assert_eq!(label(&NodeView::new(&node)), Some(PropValue::String("Save".into())));
    }

    #[test]
    fn test_label_prefers_exposed_property() {
        let node = DesignNode::frame("1", "Button")
            .with_property("Label#1:0", json!({ "type": "TEXT", "value": "Submit" }))
            .with_child(DesignNode::text("2", "t", "Save"));
        assert_eq!(label(&NodeView::new(&node)), Some(PropValue::String("Submit".into())));
    }

    #[test]
    fn test_typography_variant_from_font_size() {
        let heading = text_with_size("1", "Title", 34.0);
        let body = text_with_size("2", "Body", 14.0);
        assert_eq!(typography_variant(&NodeView::new(&heading)), Some(PropValue::Keyword("h4".into())));
        assert_eq!(typography_variant(&NodeView::new(&body)), Some(PropValue::Keyword("body2".into())));
    }

    #[test]
    fn test_typography_variant_from_property() {
        let node = text_with_size("1", "Title", 14.0).with_property("Variant", json!("H2"));
        assert_eq!(typography_variant(&NodeView::new(&node)), Some(PropValue::Keyword("h2".into())));
    }

    #[test]
    fn test_state_flags() {
        let node = DesignNode::frame("1", "Checkbox").with_property("State", json!("Checked"));
        let view = NodeView::new(&node);
        assert_eq!(checked(&view), Some(PropValue::Boolean(true)));
        assert_eq!(disabled(&view), Some(PropValue::Boolean(false)));
    }

    #[test]
    fn test_card_slots_ignore_wrappers() {
        let card = DesignNode::frame("1", "Card").with_child(
            DesignNode::frame("2", "Wrapper")
                .with_child(DesignNode::frame("3", "Header").with_child(DesignNode::frame("3a", "Content")))
                .with_child(
                    DesignNode::frame("4", "Inner").with_child(
                        DesignNode::frame("5", "Content").with_child(DesignNode::text("5a", "Body", "Details")),
                    ),
                )
                .with_child(DesignNode::frame("6", "Actions")),
        );

        let slots = card_slots(&card);
        let ids: Vec<_> = slots.iter().map(|s| s.node.id.as_str()).collect();
        let categories: Vec<_> = slots.iter().map(|s| s.category).collect();

        assert_eq!(ids, vec!["3", "5"]);
        assert_eq!(categories, vec![Some(Category::CardHeader), Some(Category::CardContent)]);
    }

    #[test]
    fn test_card_slots_skip_empty_regions() {
        let card = DesignNode::frame("1", "Card")
            .with_child(DesignNode::frame("2", "Content").with_child(DesignNode::text("3", "Body", "Hello")))
            .with_child(DesignNode::frame("4", "Actions").with_child(DesignNode::frame("5", "Button").hidden()));

        let categories: Vec<_> = card_slots(&card).iter().map(|s| s.category).collect();
        assert_eq!(categories, vec![Some(Category::CardContent)]);
    }

    #[test]
    fn test_typography_text_joins_runs() {
        let node = DesignNode::frame("1", "Copy")
            .with_child(DesignNode::text("2", "First", "Hello"))
            .with_child(DesignNode::text("3", "Second", "World"));
        assert_eq!(typography_text(&NodeView::new(&node)), Some(PropValue::String("Hello World".into())));

        let leaf = DesignNode::text("4", "Only", "Alone");
        assert_eq!(typography_text(&NodeView::new(&leaf)), Some(PropValue::String("Alone".into())));
        assert_eq!(typography_text(&NodeView::new(&DesignNode::frame("5", "Empty"))), None);
    }

    #[test]
    fn test_button_icons_by_position() {
        let node = DesignNode::instance("1", "Button", "9:1")
            .with_child(DesignNode::instance("2", "Icon/Add", "9:2"))
            .with_child(DesignNode::text("3", "Label", "Add item"))
            .with_child(DesignNode::instance("4", "Icon/ArrowForward", "9:3"));

        let icons = button_icons(&node);
        let named: Vec<_> = icons.iter().map(|(slot, n)| (*slot, n.id.as_str())).collect();
        assert_eq!(named, vec![("startIcon", "2"), ("endIcon", "4")]);
    }

    #[test]
    fn test_badge_content_numeric() {
        let node = DesignNode::frame("1", "Badge").with_child(DesignNode::text("2", "count", "4"));
        assert_eq!(badge_content(&NodeView::new(&node)), Some(PropValue::Number(4.0)));
    }

    #[test]
    fn test_render_control_with_label() {
        let descriptor = ComponentDescriptor::new(Category::Checkbox);
        let component = ExtractedComponent::new(Category::Checkbox, "1", "Checkbox")
            .with_property("label", "Accept")
            .with_property("checked", true);
        let attributes = vec!["checked".to_string()];
        let input = RenderInput {
            component: &component,
            descriptor: &descriptor,
            attributes: &attributes,
            icon_attributes: &[],
            sx: None,
            content: None,
            children: &[],
        };

        let rendered = render_control(&input);
        assert_eq!(
            rendered.markup,
            "<FormControlLabel control={<Checkbox checked />} label=\"Accept\" />"
        );
        assert!(rendered
            .imports
            .contains(&Import::named("@mui/material", "FormControlLabel")));
    }

    #[test]
    fn test_render_alert_closable() {
        let descriptor = ComponentDescriptor::new(Category::Alert);
        let component = ExtractedComponent::new(Category::Alert, "1", "Alert")
            .with_property("closable", true)
            .with_property("title", "Heads up");
        let attributes = vec!["severity=\"warning\"".to_string()];
        let input = RenderInput {
            component: &component,
            descriptor: &descriptor,
            attributes: &attributes,
            icon_attributes: &[],
            sx: None,
            content: Some("Disk almost full"),
            children: &[],
        };

        let rendered = render_alert(&input);
        assert!(rendered.markup.starts_with("<Alert severity=\"warning\" action={<IconButton"));
        assert!(rendered.markup.contains("  <AlertTitle>Heads up</AlertTitle>\n  Disk almost full\n"));
        let symbols: Vec<_> = rendered.imports.iter().map(|i| i.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["Alert", "IconButton", "CloseIcon", "AlertTitle"]);
    }

    #[test]
    fn test_render_icon_button() {
        let descriptor = ComponentDescriptor::new(Category::IconButton);
        let component = ExtractedComponent::new(Category::IconButton, "1", "IconButton").with_auxiliary(
            "icon",
            PropValue::Icon(IconRef {
                name: "Delete".into(),
                component_id: None,
            }),
        );
        let input = RenderInput {
            component: &component,
            descriptor: &descriptor,
            attributes: &[],
            icon_attributes: &[],
            sx: None,
            content: None,
            children: &[],
        };

        let rendered = render_icon_button(&input);
        assert_eq!(rendered.markup, "<IconButton>\n  <DeleteIcon />\n</IconButton>");
        assert_eq!(rendered.imports.len(), 2);
    }
}
