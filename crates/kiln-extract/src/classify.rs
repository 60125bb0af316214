//! Node classification.
//!
//! Rules are tried in priority order and the first match wins:
//!
//! 1. exact alias of the node name
//! 2. alias of the library component an instance was made from
//! 3. structure of the immediate children
//! 4. keywords in the node name
//! 5. the `Box` container, for container node types only

use kiln_core::{Category, DesignNode};
use kiln_registry::{ComponentDescriptor, MappingRegistry};
use kiln_resolver::RunContext;

use crate::error::Result;

/// Which rule produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Alias,
    Library,
    Structure,
    NameHint,
    Default,
    /// Category imposed by a parent's slot hook.
    Forced,
}

/// Outcome of classifying one node.
#[derive(Debug, Clone)]
pub struct Classification<'r> {
    pub category: Category,
    pub descriptor: &'r ComponentDescriptor,
    pub rule: Rule,
    /// `Prop=Value` pairs of the instance's library component.
    pub variants: Vec<(String, String)>,
}

/// Keywords suggesting a category, in table order. Multi-word keywords
/// match words separated by spaces, `_`, `-` or `/`.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    // Interactive
    (Category::IconButton, &["icon button", "iconbutton", "icon btn"]),
    (Category::Button, &["button", "btn"]),
    (Category::TextField, &["text field", "textfield", "text input", "input"]),
    (Category::Checkbox, &["checkbox", "check box"]),
    (Category::Radio, &["radio"]),
    (Category::Switch, &["switch", "toggle"]),
    (Category::Tabs, &["tabs", "tab bar"]),
    (Category::Tab, &["tab"]),

    // Layout
    (Category::AppBar, &["app bar", "appbar", "navbar", "top bar", "toolbar"]),
    (Category::Card, &["card", "tile"]),
    (Category::ListItem, &["list item", "listitem"]),
    (Category::List, &["list"]),
    (Category::Stack, &["stack"]),
    (Category::Divider, &["divider", "separator"]),

    // Content
    (Category::Chip, &["chip", "tag", "pill"]),
    (Category::Avatar, &["avatar"]),
    (Category::Badge, &["badge"]),
    (Category::Icon, &["icon"]),
    (Category::Typography, &["heading", "title", "label", "caption", "paragraph"]),

    // Feedback
    (Category::Alert, &["alert", "snackbar", "banner"]),
];

/// Classifies design nodes against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'r> {
    registry: &'r MappingRegistry,
}

impl Classifier<'static> {
    /// Classifier over the built-in registry.
    pub fn standard() -> Self {
        Self::new(MappingRegistry::standard())
    }
}

impl<'r> Classifier<'r> {
    pub fn new(registry: &'r MappingRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r MappingRegistry {
        self.registry
    }

    /// Classify a node, or `None` if no rule applies.
    ///
    /// Only a component-info lookup for an unmatched instance can touch the
    /// network; its client errors propagate.
    pub fn classify(&self, node: &DesignNode, ctx: &mut RunContext<'_>) -> Result<Option<Classification<'r>>> {
        if let Some(descriptor) = self.registry.lookup_alias(&node.name) {
            let variants = cached_variants(node, ctx);
            return Ok(Some(self.matched(descriptor, Rule::Alias, variants)));
        }

        if let Some(component_id) = node.component_id.as_deref() {
            if let Some(info) = ctx.component_info(component_id)? {
                let variants = info.variant_pairs();
                if let Some(descriptor) = self.registry.lookup_alias(info.canonical_name()) {
                    return Ok(Some(self.matched(descriptor, Rule::Library, variants)));
                }
            }
        }

        let variants = cached_variants(node, ctx);

        if let Some(descriptor) = structural_category(node).and_then(|c| self.registry.lookup_category(c)) {
            return Ok(Some(self.matched(descriptor, Rule::Structure, variants)));
        }

        if let Some(descriptor) = name_hint(&node.name).and_then(|c| self.registry.lookup_category(c)) {
            return Ok(Some(self.matched(descriptor, Rule::NameHint, variants)));
        }

        if node.node_type.is_container() {
            if let Some(descriptor) = self.registry.lookup_category(Category::Container) {
                return Ok(Some(self.matched(descriptor, Rule::Default, variants)));
            }
        }

        tracing::debug!(node = %node.id, name = %node.name, node_type = ?node.node_type, "unclassifiable node");
        Ok(None)
    }

    /// Classify a node as `category`, as imposed by a slot hook.
    pub fn classify_as(
        &self,
        node: &DesignNode,
        category: Category,
        ctx: &RunContext<'_>,
    ) -> Option<Classification<'r>> {
        let descriptor = self.registry.lookup_category(category)?;
        Some(self.matched(descriptor, Rule::Forced, cached_variants(node, ctx)))
    }

    fn matched(
        &self,
        descriptor: &'r ComponentDescriptor,
        rule: Rule,
        variants: Vec<(String, String)>,
    ) -> Classification<'r> {
        tracing::trace!(category = %descriptor.category, ?rule, "classified");
        Classification {
            category: descriptor.category,
            descriptor,
            rule,
            variants,
        }
    }
}

/// Variant pairs from already-cached component info; never fetches.
fn cached_variants(node: &DesignNode, ctx: &RunContext<'_>) -> Vec<(String, String)> {
    node.component_id
        .as_deref()
        .and_then(|id| ctx.components.get(id))
        .map(|info| info.variant_pairs())
        .unwrap_or_default()
}

/// Category implied by the immediate children alone.
///
/// A text leaf is a label. Any layout-frame child makes a container; else
/// children that are all text make a label.
pub fn structural_category(node: &DesignNode) -> Option<Category> {
    if node.is_text() {
        return Some(Category::Typography);
    }
    if !node.node_type.is_container() {
        return None;
    }

    let mut visible = node.visible_children().peekable();
    visible.peek()?;

    let mut all_text = true;
    for child in visible {
        if child.is_layout_frame() {
            return Some(Category::Container);
        }
        all_text &= child.is_text();
    }
    all_text.then_some(Category::Typography)
}

/// Category suggested by keywords in a name. The longest matching keyword
/// wins; table order breaks ties.
///
/// Matching is case-insensitive containment, so `Submitbutton` hints a button.
pub fn name_hint(name: &str) -> Option<Category> {
    let name: String = name
        .to_lowercase()
        .chars()
        .map(|c| if matches!(c, '_' | '-' | '/') { ' ' } else { c })
        .collect();
    let mut best: Option<(Category, usize)> = None;

    for (category, keywords) in CATEGORY_KEYWORDS {
        for keyword in keywords.iter() {
            if name.contains(keyword) && best.map_or(true, |(_, len)| keyword.len() > len) {
                best = Some((*category, keyword.len()));
            }
        }
    }
    best.map(|(category, _)| category)
}
