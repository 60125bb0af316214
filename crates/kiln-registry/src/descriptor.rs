//! Component descriptors: one registry entry per category.

use std::fmt;

use kiln_core::{Category, DesignNode};

use crate::render::{RenderInput, Rendered};
use crate::schema::PropSchema;

/// Module every built-in component symbol is imported from.
pub const MATERIAL_MODULE: &str = "@mui/material";

/// A sub-node selected by a slot hook, optionally forced to a category.
#[derive(Debug, Clone, Copy)]
pub struct Slot<'n> {
    pub node: &'n DesignNode,
    pub category: Option<Category>,
}

impl<'n> Slot<'n> {
    pub fn new(node: &'n DesignNode) -> Self {
        Self { node, category: None }
    }

    pub fn forced(node: &'n DesignNode, category: Category) -> Self {
        Self {
            node,
            category: Some(category),
        }
    }
}

/// Selects the ordered sub-nodes a composite component recurses into.
pub type SlotFn = for<'n> fn(&'n DesignNode) -> Vec<Slot<'n>>;

/// Names icon sub-nodes by the attribute they populate.
pub type IconFn = for<'n> fn(&'n DesignNode) -> Vec<(&'static str, &'n DesignNode)>;

/// Renders one component from its prepared parts.
pub type RenderFn = fn(&RenderInput<'_>) -> Rendered;

/// How a component's children are found.
#[derive(Clone, Copy)]
pub enum ChildRule {
    /// Every visible child that classifies.
    Structural,
    /// No children.
    Leaf,
    /// Exactly the sub-nodes the hook returns.
    Slots(SlotFn),
}

impl fmt::Debug for ChildRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural => f.write_str("Structural"),
            Self::Leaf => f.write_str("Leaf"),
            Self::Slots(_) => f.write_str("Slots(..)"),
        }
    }
}

/// Everything needed to recognize, extract and render one category.
#[derive(Clone)]
pub struct ComponentDescriptor {
    pub category: Category,
    pub aliases: Vec<&'static str>,
    pub props: Vec<PropSchema>,
    /// Style keys a named property already covers.
    pub style_exclusions: Vec<&'static str>,
    pub children: ChildRule,
    pub icons: Option<IconFn>,
    pub render: Option<RenderFn>,
    /// Property rendered as the element's text content.
    pub content: Option<&'static str>,
    pub self_closing: bool,
    pub module: &'static str,
}

impl ComponentDescriptor {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            aliases: Vec::new(),
            props: Vec::new(),
            style_exclusions: Vec::new(),
            children: ChildRule::Structural,
            icons: None,
            render: None,
            content: None,
            self_closing: false,
            module: MATERIAL_MODULE,
        }
    }

    pub fn aliases(mut self, aliases: &[&'static str]) -> Self {
        self.aliases.extend_from_slice(aliases);
        self
    }

    pub fn prop(mut self, schema: PropSchema) -> Self {
        self.props.push(schema);
        self
    }

    pub fn exclude_styles(mut self, keys: &[&'static str]) -> Self {
        self.style_exclusions.extend_from_slice(keys);
        self
    }

    pub fn leaf(mut self) -> Self {
        self.children = ChildRule::Leaf;
        self
    }

    pub fn slots(mut self, hook: SlotFn) -> Self {
        self.children = ChildRule::Slots(hook);
        self
    }

    pub fn icons(mut self, hook: IconFn) -> Self {
        self.icons = Some(hook);
        self
    }

    pub fn render(mut self, template: RenderFn) -> Self {
        self.render = Some(template);
        self
    }

    /// Render `prop` as text content; the property is no longer an attribute.
    pub fn content(mut self, prop: &'static str) -> Self {
        self.content = Some(prop);
        if let Some(schema) = self.props.iter_mut().find(|s| s.name == prop) {
            schema.attribute = false;
        }
        self
    }

    pub fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self.children = ChildRule::Leaf;
        self
    }

    /// Output symbol of this component.
    pub fn symbol(&self) -> &'static str {
        self.category.symbol()
    }

    pub fn schema(&self, name: &str) -> Option<&PropSchema> {
        self.props.iter().find(|schema| schema.name == name)
    }

    pub fn excludes_style(&self, key: &str) -> bool {
        self.style_exclusions.contains(&key)
    }

    /// Slot sub-nodes when the descriptor overrides child discovery.
    pub fn child_slots<'n>(&self, node: &'n DesignNode) -> Option<Vec<Slot<'n>>> {
        match self.children {
            ChildRule::Slots(hook) => Some(hook(node)),
            _ => None,
        }
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("category", &self.category)
            .field("aliases", &self.aliases)
            .field("props", &self.props)
            .field("style_exclusions", &self.style_exclusions)
            .field("children", &self.children)
            .field("icons", &self.icons.is_some())
            .field("render", &self.render.is_some())
            .field("content", &self.content)
            .field("self_closing", &self.self_closing)
            .field("module", &self.module)
            .finish()
    }
}
