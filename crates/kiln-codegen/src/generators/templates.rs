//! Template engine for page and types modules.

use crate::error::{CodegenError, Result};
use convert_case::{Case, Casing};
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;

/// Name of the page module template.
pub const PAGE_TEMPLATE: &str = "page";

/// Name of the companion types module template.
pub const TYPES_TEMPLATE: &str = "types";

const PAGE_SOURCE: &str = r#"// Generated by kiln from "{{source}}". Do not edit.
{{imports}}

export default function {{name}}() {
  return (
{{indent body 4}}
  );
}
"#;

const TYPES_SOURCE: &str = r#"// Generated by kiln from "{{source}}". Do not edit.

export const {{camel_case name}}Elements = [{{join elements ", "}}] as const;

export type {{name}}Element = (typeof {{camel_case name}}Elements)[number];
{{interfaces}}"#;

/// Template engine using Handlebars.
///
/// Output is source code, so HTML escaping is disabled.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create a template engine without templates.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Create a template engine with the built-in page and types templates.
    pub fn with_builtin_templates() -> Result<Self> {
        let mut engine = Self::new();
        engine.register_template(PAGE_TEMPLATE, PAGE_SOURCE)?;
        engine.register_template(TYPES_TEMPLATE, TYPES_SOURCE)?;
        Ok(engine)
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Register custom helpers.
    fn register_helpers(handlebars: &mut Handlebars) {
        handlebars.register_helper("camel_case", Box::new(camel_case_helper));
        handlebars.register_helper("indent", Box::new(indent_helper));
        handlebars.register_helper("join", Box::new(join_helper));
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TemplateEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.handlebars.get_templates().keys().collect();
        names.sort();
        f.debug_struct("TemplateEngine").field("templates", &names).finish()
    }
}

fn str_param<'h>(h: &'h Helper<'_>, index: usize) -> &'h str {
    h.param(index)
        .and_then(|v| v.value().as_str())
        .unwrap_or("")
}

fn camel_case_helper(
    h: &Helper<'_>,
    _: &Handlebars<'_>,
    _: &Context,
    _: &mut RenderContext<'_, '_>,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&str_param(h, 0).to_case(Case::Camel))?;
    Ok(())
}

/// `{{indent text n}}`: prefix every non-blank line with `n` spaces (default 4).
fn indent_helper(
    h: &Helper<'_>,
    _: &Handlebars<'_>,
    _: &Context,
    _: &mut RenderContext<'_, '_>,
    out: &mut dyn Output,
) -> HelperResult {
    let content = str_param(h, 0);
    let spaces = h
        .param(1)
        .and_then(|v| v.value().as_u64())
        .unwrap_or(4) as usize;

    let indent = " ".repeat(spaces);
    let indented = content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    out.write(&indented)?;
    Ok(())
}

/// `{{join items sep}}`: join an array of strings.
fn join_helper(
    h: &Helper<'_>,
    _: &Handlebars<'_>,
    _: &Context,
    _: &mut RenderContext<'_, '_>,
    out: &mut dyn Output,
) -> HelperResult {
    let arr = h.param(0).and_then(|v| v.value().as_array());
    let sep = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .unwrap_or(", ");

    if let Some(items) = arr {
        let joined = items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(sep);
        out.write(&joined)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_simple() {
        let mut engine = TemplateEngine::new();
        engine
            .register_template("hello", "Hello, {{name}}!")
            .unwrap();

        let result = engine.render("hello", &json!({"name": "<World>"})).unwrap();
        assert_eq!(result, "Hello, <World>!");
    }

    #[test]
    fn test_camel_case_helper() {
        let mut engine = TemplateEngine::new();
        engine.register_template("case", "{{camel_case a}}Elements").unwrap();
        let result = engine.render("case", &json!({"a": "LandingPage"})).unwrap();
        assert_eq!(result, "landingPageElements");
    }

    #[test]
    fn test_indent_and_join_helpers() {
        let mut engine = TemplateEngine::new();
        engine
            .register_template("layout", "{{indent body 2}}|{{join items \" | \"}}")
            .unwrap();
        let result = engine
            .render("layout", &json!({"body": "<A>\n\n</A>", "items": ["'a'", "'b'"]}))
            .unwrap();
        assert_eq!(result, "  <A>\n\n  </A>|'a' | 'b'");
    }

    #[test]
    fn test_strict_mode_rejects_missing_fields() {
        let engine = TemplateEngine::with_builtin_templates().unwrap();
        assert!(engine.render(PAGE_TEMPLATE, &json!({"name": "Page"})).is_err());
    }

    #[test]
    fn test_invalid_template() {
        let mut engine = TemplateEngine::new();
        assert!(matches!(
            engine.register_template("bad", "{{#each items}}"),
            Err(CodegenError::InvalidTemplate(_))
        ));
    }
}
