//! The built-in descriptor table.

use kiln_core::{Category, PaintSlot};

use crate::descriptor::ComponentDescriptor;
use crate::hooks;
use crate::schema::PropSchema;

const SIZES: &[&str] = &["small", "medium", "large"];
const PALETTE: &[&str] = &[
    "inherit", "primary", "secondary", "success", "error", "info", "warning", "default",
];
const SEVERITIES: &[&str] = &["success", "info", "warning", "error"];

/// Style keys consumed by a component's own look.
const SURFACE_STYLES: &[&str] = &["bgcolor", "border", "borderRadius", "p", "px", "py", "pt", "pr", "pb", "pl"];

/// Every built-in descriptor, in table order.
pub fn standard_descriptors() -> Vec<ComponentDescriptor> {
    vec![
        ComponentDescriptor::new(Category::Container)
            .aliases(&["Box", "Container", "<Box>"]),
        ComponentDescriptor::new(Category::Stack)
            .aliases(&["Stack", "<Stack>", "Auto Layout"])
            .prop(PropSchema::enumeration("direction", &["row", "column", "row-reverse", "column-reverse"])
                .default_str("column")
                .extractor(hooks::stack_direction))
            .prop(PropSchema::number("spacing").default_number(0.0).extractor(hooks::stack_spacing))
            .exclude_styles(&["display", "flexDirection", "gap"]),
        ComponentDescriptor::new(Category::Typography)
            .aliases(&["Typography", "<Typography>", "Text"])
            .prop(PropSchema::text("text").extractor(hooks::typography_text))
            .prop(PropSchema::enumeration("variant", &[
                "h1", "h2", "h3", "h4", "h5", "h6", "subtitle1", "subtitle2", "body1", "body2",
                "caption", "overline", "button",
            ])
            .default_str("body1")
            .extractor(hooks::typography_variant))
            .prop(PropSchema::color("color", PaintSlot::TextFill).default_str("text.primary"))
            .content("text")
            .leaf(),
        ComponentDescriptor::new(Category::Button)
            .aliases(&["Button", "<Button>", "Button/Base", "Btn"])
            .prop(PropSchema::text("label").extractor(hooks::label))
            .prop(PropSchema::enumeration("variant", &["text", "contained", "outlined"]).default_str("text"))
            .prop(PropSchema::enumeration("size", SIZES).default_str("medium"))
            .prop(PropSchema::enumeration("color", PALETTE).default_str("primary"))
            .prop(PropSchema::boolean("disabled").default_bool(false).extractor(hooks::disabled))
            .prop(PropSchema::boolean("fullWidth").default_bool(false).extractor(hooks::full_width))
            .content("label")
            .exclude_styles(SURFACE_STYLES)
            .exclude_styles(&["display", "flexDirection", "gap", "alignItems", "justifyContent", "width"])
            .icons(hooks::button_icons)
            .leaf(),
        ComponentDescriptor::new(Category::IconButton)
            .aliases(&["IconButton", "Icon Button", "<IconButton>"])
            .prop(PropSchema::enumeration("size", SIZES).default_str("medium"))
            .prop(PropSchema::enumeration("color", PALETTE).default_str("default"))
            .prop(PropSchema::boolean("disabled").default_bool(false).extractor(hooks::disabled))
            .exclude_styles(SURFACE_STYLES)
            .exclude_styles(&["display", "flexDirection", "gap", "alignItems", "justifyContent"])
            .icons(hooks::child_icon)
            .render(hooks::render_icon_button)
            .leaf(),
        ComponentDescriptor::new(Category::Card)
            .aliases(&["Card", "<Card>"])
            .prop(PropSchema::enumeration("variant", &["elevation", "outlined"]).default_str("elevation"))
            .prop(PropSchema::boolean("raised").default_bool(false))
            .exclude_styles(&["bgcolor", "borderRadius"])
            .slots(hooks::card_slots),
        ComponentDescriptor::new(Category::CardHeader)
            .aliases(&["CardHeader", "Card Header", "<CardHeader>"])
            .prop(PropSchema::text("title").extractor(hooks::card_title))
            .prop(PropSchema::text("subheader").extractor(hooks::card_subheader))
            .self_closing(),
        ComponentDescriptor::new(Category::CardContent)
            .aliases(&["CardContent", "Card Content", "<CardContent>"])
            .exclude_styles(&["p", "px", "py", "pt", "pr", "pb", "pl"]),
        ComponentDescriptor::new(Category::CardActions)
            .aliases(&["CardActions", "Card Actions", "<CardActions>"])
            .prop(PropSchema::boolean("disableSpacing").default_bool(false))
            .exclude_styles(&["display", "flexDirection", "alignItems", "p", "px", "py", "pt", "pr", "pb", "pl"]),
        ComponentDescriptor::new(Category::Chip)
            .aliases(&["Chip", "<Chip>", "Tag"])
            .prop(PropSchema::text("label").extractor(hooks::label))
            .prop(PropSchema::enumeration("variant", &["filled", "outlined"]).default_str("filled"))
            .prop(PropSchema::enumeration("size", &["small", "medium"]).default_str("medium"))
            .prop(PropSchema::enumeration("color", PALETTE).default_str("default"))
            .prop(PropSchema::boolean("disabled").default_bool(false).extractor(hooks::disabled))
            .exclude_styles(SURFACE_STYLES)
            .exclude_styles(&["display", "flexDirection", "gap", "alignItems", "justifyContent"])
            .icons(hooks::child_icon)
            .self_closing(),
        ComponentDescriptor::new(Category::Avatar)
            .aliases(&["Avatar", "<Avatar>"])
            .prop(PropSchema::text("initials").extractor(hooks::avatar_initials))
            .prop(PropSchema::enumeration("variant", &["circular", "rounded", "square"]).default_str("circular"))
            .content("initials")
            .exclude_styles(&["borderRadius", "display", "flexDirection", "alignItems", "justifyContent"])
            .leaf(),
        ComponentDescriptor::new(Category::Icon)
            .aliases(&["Icon", "SvgIcon", "<Icon>"])
            .prop(PropSchema::enumeration("fontSize", &["inherit", "small", "medium", "large"]).default_str("medium"))
            .prop(PropSchema::enumeration("color", PALETTE).default_str("inherit"))
            .icons(hooks::self_icon)
            .render(hooks::render_icon)
            .exclude_styles(SURFACE_STYLES)
            .self_closing(),
        ComponentDescriptor::new(Category::TextField)
            .aliases(&["TextField", "Text Field", "Input", "<TextField>"])
            .prop(PropSchema::text("label").extractor(hooks::field_label))
            .prop(PropSchema::text("placeholder").extractor(hooks::placeholder))
            .prop(PropSchema::text("helperText").extractor(hooks::helper_text))
            .prop(PropSchema::enumeration("variant", &["outlined", "filled", "standard"]).default_str("outlined"))
            .prop(PropSchema::enumeration("size", &["small", "medium"]).default_str("medium"))
            .prop(PropSchema::boolean("disabled").default_bool(false).extractor(hooks::disabled))
            .prop(PropSchema::boolean("error").default_bool(false).extractor(hooks::error))
            .prop(PropSchema::boolean("fullWidth").default_bool(false).extractor(hooks::full_width))
            .exclude_styles(SURFACE_STYLES)
            .exclude_styles(&["display", "flexDirection", "gap", "alignItems", "justifyContent", "width"])
            .self_closing(),
        ComponentDescriptor::new(Category::Checkbox)
            .aliases(&["Checkbox", "Check Box", "<Checkbox>"])
            .prop(PropSchema::text("label").extractor(hooks::label).consumed())
            .prop(PropSchema::boolean("checked").default_bool(false).extractor(hooks::checked))
            .prop(PropSchema::boolean("disabled").default_bool(false).extractor(hooks::disabled))
            .prop(PropSchema::enumeration("size", SIZES).default_str("medium"))
            .prop(PropSchema::enumeration("color", PALETTE).default_str("primary"))
            .exclude_styles(SURFACE_STYLES)
            .exclude_styles(&["display", "flexDirection", "gap", "alignItems", "justifyContent"])
            .render(hooks::render_control)
            .self_closing(),
        ComponentDescriptor::new(Category::Switch)
            .aliases(&["Switch", "Toggle", "<Switch>"])
            .prop(PropSchema::text("label").extractor(hooks::label).consumed())
            .prop(PropSchema::boolean("checked").default_bool(false).extractor(hooks::checked))
            .prop(PropSchema::boolean("disabled").default_bool(false).extractor(hooks::disabled))
            .prop(PropSchema::enumeration("size", &["small", "medium"]).default_str("medium"))
            .prop(PropSchema::enumeration("color", PALETTE).default_str("primary"))
            .exclude_styles(SURFACE_STYLES)
            .exclude_styles(&["display", "flexDirection", "gap", "alignItems", "justifyContent"])
            .render(hooks::render_control)
            .self_closing(),
        ComponentDescriptor::new(Category::Radio)
            .aliases(&["Radio", "Radio Button", "<Radio>"])
            .prop(PropSchema::text("label").extractor(hooks::label).consumed())
            .prop(PropSchema::boolean("checked").default_bool(false).extractor(hooks::checked))
            .prop(PropSchema::boolean("disabled").default_bool(false).extractor(hooks::disabled))
            .prop(PropSchema::enumeration("size", &["small", "medium"]).default_str("medium"))
            .prop(PropSchema::enumeration("color", PALETTE).default_str("primary"))
            .exclude_styles(SURFACE_STYLES)
            .exclude_styles(&["display", "flexDirection", "gap", "alignItems", "justifyContent"])
            .render(hooks::render_control)
            .self_closing(),
        ComponentDescriptor::new(Category::Divider)
            .aliases(&["Divider", "Separator", "<Divider>"])
            .prop(PropSchema::enumeration("orientation", &["horizontal", "vertical"]).default_str("horizontal"))
            .prop(PropSchema::enumeration("variant", &["fullwidth", "inset", "middle"]).default_str("fullwidth"))
            .exclude_styles(&["bgcolor", "border"])
            .self_closing(),
        ComponentDescriptor::new(Category::Alert)
            .aliases(&["Alert", "<Alert>"])
            .prop(PropSchema::text("message").extractor(hooks::alert_message))
            .prop(PropSchema::enumeration("severity", SEVERITIES).default_str("success"))
            .prop(PropSchema::enumeration("variant", &["standard", "filled", "outlined"]).default_str("standard"))
            .prop(PropSchema::text("title").extractor(hooks::alert_title).consumed())
            .prop(PropSchema::boolean("closable").default_bool(false).extractor(hooks::closable).consumed())
            .content("message")
            .exclude_styles(SURFACE_STYLES)
            .exclude_styles(&["display", "flexDirection", "gap", "alignItems", "justifyContent"])
            .render(hooks::render_alert)
            .leaf(),
        ComponentDescriptor::new(Category::Badge)
            .aliases(&["Badge", "<Badge>"])
            .prop(PropSchema::text("badgeContent").extractor(hooks::badge_content))
            .prop(PropSchema::enumeration("variant", &["standard", "dot"]).default_str("standard"))
            .prop(PropSchema::enumeration("color", PALETTE).default_str("default")),
        ComponentDescriptor::new(Category::AppBar)
            .aliases(&["AppBar", "App Bar", "<AppBar>", "Navbar"])
            .prop(PropSchema::enumeration("position", &["fixed", "absolute", "sticky", "static", "relative"]).default_str("fixed"))
            .prop(PropSchema::enumeration("color", PALETTE).default_str("primary"))
            .exclude_styles(&["bgcolor"]),
        ComponentDescriptor::new(Category::Tabs)
            .aliases(&["Tabs", "<Tabs>", "Tab Bar"])
            .prop(PropSchema::enumeration("variant", &["standard", "scrollable"]).default_str("standard"))
            .prop(PropSchema::enumeration("orientation", &["horizontal", "vertical"]).default_str("horizontal")),
        ComponentDescriptor::new(Category::Tab)
            .aliases(&["Tab", "<Tab>"])
            .prop(PropSchema::text("label").extractor(hooks::label))
            .prop(PropSchema::boolean("disabled").default_bool(false).extractor(hooks::disabled))
            .exclude_styles(SURFACE_STYLES)
            .self_closing(),
        ComponentDescriptor::new(Category::List)
            .aliases(&["List", "<List>"])
            .prop(PropSchema::boolean("dense").default_bool(false))
            .prop(PropSchema::boolean("disablePadding").default_bool(false)),
        ComponentDescriptor::new(Category::ListItem)
            .aliases(&["ListItem", "List Item", "<ListItem>"])
            .prop(PropSchema::boolean("dense").default_bool(false))
            .prop(PropSchema::boolean("divider").default_bool(false)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_category_has_one_descriptor() {
        let descriptors = standard_descriptors();
        let categories: HashSet<_> = descriptors.iter().map(|d| d.category).collect();

        assert_eq!(descriptors.len(), Category::ALL.len());
        for category in Category::ALL {
            assert!(categories.contains(&category), "missing {:?}", category);
        }
    }

    #[test]
    fn test_defaults_are_allowed_values() {
        for descriptor in standard_descriptors() {
            for schema in &descriptor.props {
                if let (Some(crate::schema::DefaultValue::Str(default)), false) =
                    (schema.default, schema.allowed.is_empty())
                {
                    assert!(
                        schema.allows(default),
                        "{:?}.{} default {} not allowed",
                        descriptor.category,
                        schema.name,
                        default
                    );
                }
            }
        }
    }

    #[test]
    fn test_content_props_are_not_attributes() {
        for descriptor in standard_descriptors() {
            if let Some(content) = descriptor.content {
                let schema = descriptor.schema(content).expect("content prop declared");
                assert!(!schema.attribute);
            }
        }
    }

    #[test]
    fn test_button_variant_defaults_to_text() {
        let descriptors = standard_descriptors();
        let button = descriptors
            .iter()
            .find(|d| d.category == Category::Button)
            .unwrap();
        let variant = button.schema("variant").unwrap();
        assert!(variant.is_default(&kiln_core::PropValue::Keyword("text".into())));
        assert!(!variant.is_default(&kiln_core::PropValue::Keyword("contained".into())));
    }
}
