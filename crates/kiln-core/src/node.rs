//! Design-document node model.
//!
//! These types mirror the design tool's REST payloads closely enough to be
//! deserialized directly from them. The pipeline only ever reads them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::Rgba;

fn visible_by_default() -> bool {
    true
}

fn full_opacity() -> f64 {
    1.0
}

/// Node type tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Document,
    Canvas,
    #[default]
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Text,
    Vector,
    Rectangle,
    Ellipse,
    Line,
    Star,
    RegularPolygon,
    BooleanOperation,
    Slice,
    #[serde(other)]
    Other,
}

impl NodeType {
    /// Node types that can hold other nodes and lay them out.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Frame
                | Self::Group
                | Self::Section
                | Self::Component
                | Self::ComponentSet
                | Self::Instance
        )
    }
}

/// Auto-layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    None,
    Horizontal,
    Vertical,
    #[serde(other)]
    Other,
}

/// Sizing behaviour of a frame along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizingMode {
    Fixed,
    Auto,
    Hug,
    Fill,
    #[serde(other)]
    Other,
}

/// Alignment of children along an auto-layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    Min,
    Center,
    Max,
    SpaceBetween,
    Baseline,
    #[serde(other)]
    Other,
}

/// Paint kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintType {
    #[default]
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    #[serde(other)]
    Other,
}

/// Reference from an attribute to a design variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type", default)]
    pub alias_type: String,
    pub id: String,
}

impl VariableAlias {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            alias_type: "VARIABLE_ALIAS".to_string(),
            id: id.into(),
        }
    }
}

/// Variable bindings carried by a single paint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaintBindings {
    pub color: Option<VariableAlias>,
}

/// A gradient color stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: Rgba,
    #[serde(default)]
    pub position: f64,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type", default)]
    pub paint_type: PaintType,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default = "full_opacity")]
    pub opacity: f64,
    pub color: Option<Rgba>,
    #[serde(default)]
    pub gradient_stops: Vec<GradientStop>,
    #[serde(default)]
    pub bound_variables: PaintBindings,
}

impl Paint {
    /// A visible solid paint.
    pub fn solid(color: Rgba) -> Self {
        Self {
            paint_type: PaintType::Solid,
            visible: true,
            opacity: 1.0,
            color: Some(color),
            gradient_stops: Vec::new(),
            bound_variables: PaintBindings::default(),
        }
    }

    /// Bind the paint's color to a variable.
    pub fn bound_to(mut self, variable_id: impl Into<String>) -> Self {
        self.bound_variables.color = Some(VariableAlias::new(variable_id));
        self
    }

    /// The variable id the color is bound to, if any.
    pub fn variable_id(&self) -> Option<&str> {
        self.bound_variables.color.as_ref().map(|alias| alias.id.as_str())
    }

    /// The representative color of this paint, before opacity.
    ///
    /// Gradients use their first stop; image paints have none.
    pub fn base_color(&self) -> Option<Rgba> {
        self.color
            .or_else(|| self.gradient_stops.first().map(|stop| stop.color))
    }
}

/// Which paint list of a node a color is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintSlot {
    /// The node's own fills.
    Fill,
    /// The node's own strokes.
    Stroke,
    /// The fills of the node's primary text run.
    TextFill,
}

impl PaintSlot {
    /// Key of this slot in a node's `styles` map.
    pub fn style_key(&self) -> &'static str {
        match self {
            Self::Fill | Self::TextFill => "fill",
            Self::Stroke => "stroke",
        }
    }
}

/// Typography attributes of a text node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    pub font_family: Option<String>,
    pub font_weight: Option<f64>,
    pub font_size: Option<f64>,
    pub line_height_px: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub text_align_horizontal: Option<String>,
}

/// One node of a design document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default)]
    pub children: Vec<DesignNode>,

    // Layout
    pub layout_mode: Option<LayoutMode>,
    pub item_spacing: Option<f64>,
    pub padding_left: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub primary_axis_sizing_mode: Option<SizingMode>,
    pub counter_axis_sizing_mode: Option<SizingMode>,
    pub layout_sizing_horizontal: Option<SizingMode>,
    pub primary_axis_align_items: Option<AxisAlign>,
    pub counter_axis_align_items: Option<AxisAlign>,
    pub corner_radius: Option<f64>,

    // Paint
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub strokes: Vec<Paint>,
    pub stroke_weight: Option<f64>,

    // Text
    pub characters: Option<String>,
    pub style: Option<TypeStyle>,

    // References
    #[serde(default)]
    pub styles: IndexMap<String, String>,
    #[serde(default)]
    pub bound_variables: IndexMap<String, Value>,
    pub component_id: Option<String>,
    #[serde(default)]
    pub component_properties: IndexMap<String, Value>,
}

impl DesignNode {
    /// Create a node of the given type.
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            visible: true,
            ..Default::default()
        }
    }

    /// Create a frame node.
    pub fn frame(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeType::Frame)
    }

    /// Create a text node carrying `characters`.
    pub fn text(id: impl Into<String>, name: impl Into<String>, characters: impl Into<String>) -> Self {
        let mut node = Self::new(id, name, NodeType::Text);
        node.characters = Some(characters.into());
        node
    }

    /// Create an instance of a library component.
    pub fn instance(
        id: impl Into<String>,
        name: impl Into<String>,
        component_id: impl Into<String>,
    ) -> Self {
        let mut node = Self::new(id, name, NodeType::Instance);
        node.component_id = Some(component_id.into());
        node
    }

    /// Add a child node.
    pub fn with_child(mut self, child: DesignNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add several child nodes.
    pub fn with_children(mut self, children: impl IntoIterator<Item = DesignNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Add a fill paint.
    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    /// Add a stroke paint.
    pub fn with_stroke(mut self, paint: Paint) -> Self {
        self.strokes.push(paint);
        self
    }

    /// Reference a named style for a paint slot (`fill`, `stroke`, `text`).
    pub fn with_style(mut self, slot: impl Into<String>, style_id: impl Into<String>) -> Self {
        self.styles.insert(slot.into(), style_id.into());
        self
    }

    /// Add a raw component property.
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.component_properties.insert(key.into(), value);
        self
    }

    /// Switch on auto-layout.
    pub fn with_layout(mut self, mode: LayoutMode, spacing: f64) -> Self {
        self.layout_mode = Some(mode);
        self.item_spacing = Some(spacing);
        self
    }

    /// Mark the node hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// A text leaf carrying a text run.
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text && self.characters.is_some()
    }

    /// A frame-like node that lays out children.
    pub fn is_layout_frame(&self) -> bool {
        self.node_type.is_container()
    }

    /// Children that are not hidden, in source order.
    pub fn visible_children(&self) -> impl Iterator<Item = &DesignNode> {
        self.children.iter().filter(|child| child.visible)
    }

    /// The paints of a slot on this node. `TextFill` reads the node's own fills.
    pub fn paints(&self, slot: PaintSlot) -> &[Paint] {
        match slot {
            PaintSlot::Fill | PaintSlot::TextFill => &self.fills,
            PaintSlot::Stroke => &self.strokes,
        }
    }

    /// The first visible paint of a slot.
    pub fn first_visible_paint(&self, slot: PaintSlot) -> Option<&Paint> {
        self.paints(slot).iter().find(|paint| paint.visible)
    }

    /// The named style referenced for a slot.
    pub fn style_id(&self, slot: PaintSlot) -> Option<&str> {
        self.styles.get(slot.style_key()).map(String::as_str)
    }

    /// The first text run in this subtree, in pre-order, visible nodes only.
    ///
    /// Traversal stops at the first match; it does not prefer longer or
    /// deeper runs.
    pub fn first_text(&self) -> Option<&str> {
        self.texts().next()
    }

    /// Every visible text leaf in this subtree, in pre-order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                if !node.visible {
                    continue;
                }
                stack.extend(node.children.iter().rev());
                if node.node_type == NodeType::Text {
                    if let Some(text) = node.characters.as_deref() {
                        return Some(text);
                    }
                }
            }
            None
        })
    }

    /// The first visible text node in this subtree, in pre-order.
    pub fn first_text_node(&self) -> Option<&DesignNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if !node.visible {
                continue;
            }
            if node.is_text() {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Look up a raw component property by case-insensitive key.
    ///
    /// Design-tool property keys carry a `#<id>` suffix (e.g. `Label#12:3`);
    /// the suffix is ignored when matching.
    pub fn raw_property(&self, key: &str) -> Option<&Value> {
        self.component_properties
            .iter()
            .find(|(name, _)| property_key_matches(name, key))
            .map(|(_, value)| value)
    }
}

/// Unwrap the design tool's `{ "type": ..., "value": ... }` property wrapper.
pub fn unwrap_value(value: &Value) -> &Value {
    match value {
        Value::Object(map) => map.get("value").unwrap_or(value),
        _ => value,
    }
}

/// Compare a raw property key against a schema key.
pub fn property_key_matches(raw: &str, key: &str) -> bool {
    let base = raw.split('#').next().unwrap_or(raw).trim();
    base.eq_ignore_ascii_case(key)
}
