//! Inline style entries derived from a node's layout and paint.
//!
//! Keys follow the target library's `sx` shorthand. Spacing on the 4px grid
//! becomes theme units (`px / 8`); anything else stays in pixels.

use indexmap::IndexMap;
use kiln_core::{AxisAlign, DesignNode, LayoutMode, PaintSlot, PropValue, SizingMode};
use kiln_registry::ComponentDescriptor;
use kiln_resolver::{ColorResolver, RunContext};

use crate::error::Result;

/// Builds the inline style map of a component.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleExtractor {
    resolver: ColorResolver,
}

impl StyleExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style entries for `node`, skipping keys `descriptor` excludes.
    ///
    /// Paints are only resolved for keys that survive exclusion.
    pub fn extract(
        &self,
        node: &DesignNode,
        descriptor: &ComponentDescriptor,
        ctx: &mut RunContext<'_>,
    ) -> Result<IndexMap<String, PropValue>> {
        let mut style = StyleMap {
            entries: IndexMap::new(),
            descriptor,
        };

        let direction = match node.layout_mode {
            Some(LayoutMode::Horizontal) => Some("row"),
            Some(LayoutMode::Vertical) => Some("column"),
            _ => None,
        };
        if let Some(direction) = direction {
            style.set("display", text("flex"));
            style.set("flexDirection", text(direction));
            if let Some(gap) = node.item_spacing.filter(|gap| *gap > 0.0) {
                style.set("gap", spacing(gap));
            }
            if let Some(align) = node.counter_axis_align_items.and_then(align_items) {
                style.set("alignItems", text(align));
            }
            if let Some(justify) = node.primary_axis_align_items.and_then(justify_content) {
                style.set("justifyContent", text(justify));
            }
        }

        padding(node, &mut style);

        if let Some(radius) = node.corner_radius.filter(|radius| *radius > 0.0) {
            style.set("borderRadius", text(&pixels(radius)));
        }

        if !node.is_text() && style.wants("bgcolor") {
            if let Some(paint) = node.first_visible_paint(PaintSlot::Fill) {
                let color = self.resolver.resolve(paint, node.style_id(PaintSlot::Fill), ctx)?;
                style.set("bgcolor", PropValue::Color(color));
            }
        }

        if style.wants("border") {
            if let Some(paint) = node.first_visible_paint(PaintSlot::Stroke) {
                let weight = node.stroke_weight.filter(|w| *w > 0.0).unwrap_or(1.0);
                let color = self.resolver.resolve(paint, node.style_id(PaintSlot::Stroke), ctx)?;
                style.set("border", text(&format!("{} solid", pixels(weight))));
                style.set_as("border", "borderColor", PropValue::Color(color));
            }
        }

        if node.layout_sizing_horizontal == Some(SizingMode::Fill) {
            style.set("width", text("100%"));
        }

        Ok(style.entries)
    }
}

struct StyleMap<'d> {
    entries: IndexMap<String, PropValue>,
    descriptor: &'d ComponentDescriptor,
}

impl StyleMap<'_> {
    fn wants(&self, key: &str) -> bool {
        !self.descriptor.excludes_style(key)
    }

    fn set(&mut self, key: &str, value: PropValue) {
        self.set_as(key, key, value);
    }

    /// Insert `key` unless `governing` is excluded.
    fn set_as(&mut self, governing: &str, key: &str, value: PropValue) {
        if self.wants(governing) {
            self.entries.insert(key.to_string(), value);
        }
    }
}

fn padding(node: &DesignNode, style: &mut StyleMap<'_>) {
    let [top, right, bottom, left] = [
        node.padding_top,
        node.padding_right,
        node.padding_bottom,
        node.padding_left,
    ]
    .map(|p| p.unwrap_or(0.0).max(0.0));

    if top == 0.0 && right == 0.0 && bottom == 0.0 && left == 0.0 {
        return;
    }
    if top == right && right == bottom && bottom == left {
        style.set("p", spacing(top));
    } else if left == right && top == bottom {
        if left > 0.0 {
            style.set("px", spacing(left));
        }
        if top > 0.0 {
            style.set("py", spacing(top));
        }
    } else {
        for (key, value) in [("pt", top), ("pr", right), ("pb", bottom), ("pl", left)] {
            if value > 0.0 {
                style.set(key, spacing(value));
            }
        }
    }
}

fn align_items(align: AxisAlign) -> Option<&'static str> {
    match align {
        AxisAlign::Center => Some("center"),
        AxisAlign::Max => Some("flex-end"),
        AxisAlign::Baseline => Some("baseline"),
        _ => None,
    }
}

fn justify_content(align: AxisAlign) -> Option<&'static str> {
    match align {
        AxisAlign::Center => Some("center"),
        AxisAlign::Max => Some("flex-end"),
        AxisAlign::SpaceBetween => Some("space-between"),
        _ => None,
    }
}

/// Theme units for 4px-grid values, else a pixel string.
pub fn spacing(px: f64) -> PropValue {
    if px % 4.0 == 0.0 {
        PropValue::Number(px / 8.0)
    } else {
        text(&pixels(px))
    }
}

fn pixels(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}px", value as i64)
    } else {
        format!("{value}px")
    }
}

fn text(value: &str) -> PropValue {
    PropValue::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::{Category, Paint, ResolvedColor, Rgba, StaticClient};
    use kiln_registry::MappingRegistry;

    fn extract(node: &DesignNode, category: Category) -> IndexMap<String, PropValue> {
        let client = StaticClient::new();
        let mut ctx = RunContext::new(&client, "file");
        let descriptor = MappingRegistry::standard().lookup_category(category).unwrap();
        StyleExtractor::new().extract(node, descriptor, &mut ctx).unwrap()
    }

    fn auto_layout() -> DesignNode {
        let mut node = DesignNode::frame("1", "Row").with_layout(LayoutMode::Horizontal, 16.0);
        node.counter_axis_align_items = Some(AxisAlign::Center);
        node.primary_axis_align_items = Some(AxisAlign::SpaceBetween);
        node.padding_left = Some(24.0);
        node.padding_right = Some(24.0);
        node.padding_top = Some(10.0);
        node.padding_bottom = Some(10.0);
        node.corner_radius = Some(8.0);
        node.layout_sizing_horizontal = Some(SizingMode::Fill);
        node.with_fill(Paint::solid(Rgba::WHITE))
    }

    #[test]
    fn test_box_layout() {
        let style = extract(&auto_layout(), Category::Container);

        assert_eq!(style.get("display"), Some(&PropValue::String("flex".into())));
        assert_eq!(style.get("flexDirection"), Some(&PropValue::String("row".into())));
        assert_eq!(style.get("gap"), Some(&PropValue::Number(2.0)));
        assert_eq!(style.get("alignItems"), Some(&PropValue::String("center".into())));
        assert_eq!(style.get("justifyContent"), Some(&PropValue::String("space-between".into())));
        assert_eq!(style.get("px"), Some(&PropValue::Number(3.0)));
        assert_eq!(style.get("py"), Some(&PropValue::String("10px".into())));
        assert_eq!(style.get("borderRadius"), Some(&PropValue::String("8px".into())));
        assert_eq!(
            style.get("bgcolor"),
            Some(&PropValue::Color(ResolvedColor::Literal("#ffffffff".into())))
        );
        assert_eq!(style.get("width"), Some(&PropValue::String("100%".into())));
    }

    #[test]
    fn test_exclusions_are_honoured() {
        let style = extract(&auto_layout(), Category::Button);

        for key in ["display", "flexDirection", "gap", "px", "py", "bgcolor", "borderRadius", "width"] {
            assert!(!style.contains_key(key), "{key} should be excluded");
        }
    }

    #[test]
    fn test_uniform_padding_and_border() {
        let mut node = DesignNode::frame("1", "Panel")
            .with_stroke(Paint::solid(Rgba::BLACK));
        node.padding_left = Some(16.0);
        node.padding_right = Some(16.0);
        node.padding_top = Some(16.0);
        node.padding_bottom = Some(16.0);
        node.stroke_weight = Some(2.0);

        let style = extract(&node, Category::Container);
        assert_eq!(style.get("p"), Some(&PropValue::Number(2.0)));
        assert_eq!(style.get("border"), Some(&PropValue::String("2px solid".into())));
        assert_eq!(
            style.get("borderColor"),
            Some(&PropValue::Color(ResolvedColor::Literal("#000000ff".into())))
        );
        assert!(!style.contains_key("display"));

        let divider = extract(&node, Category::Divider);
        assert!(!divider.contains_key("border"));
        assert!(!divider.contains_key("borderColor"));
    }

    #[test]
    fn test_text_nodes_have_no_background() {
        let node = DesignNode::text("1", "Title", "Hi").with_fill(Paint::solid(Rgba::BLACK));
        assert!(extract(&node, Category::Typography).is_empty());
    }

    #[test]
    fn test_spacing_units() {
        assert_eq!(spacing(8.0), PropValue::Number(1.0));
        assert_eq!(spacing(12.0), PropValue::Number(1.5));
        assert_eq!(spacing(5.0), PropValue::String("5px".into()));
        assert_eq!(spacing(2.5), PropValue::String("2.5px".into()));
    }
}
