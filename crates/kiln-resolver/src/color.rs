//! Paint to theme-path or literal color resolution.

use kiln_core::{Paint, ResolvedColor};

use crate::context::RunContext;
use crate::error::Result;
use crate::tokens::parse_token_name;
use crate::variables::normalize_variable_id;

/// Literal of a paint with no color at all.
pub const TRANSPARENT_LITERAL: &str = "#00000000";

/// Which cascade tier produced a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Library,
    Variable,
    Style,
    Literal,
}

/// Resolves paints through the five-tier cascade:
///
/// 1. static library map, by normalized variable id
/// 2. remote variable lookup (once per run)
/// 3. name parsing of the variable's name
/// 4. name parsing of the referenced named style
/// 5. `#rrggbbaa` literal
///
/// A path, once found, is authoritative. Variable outcomes are memoized per
/// id for the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorResolver;

impl ColorResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(
        &self,
        paint: &Paint,
        style_id: Option<&str>,
        ctx: &mut RunContext<'_>,
    ) -> Result<ResolvedColor> {
        self.resolve_with_tier(paint, style_id, ctx).map(|(color, _)| color)
    }

    /// Resolve and report the tier that produced the color.
    pub fn resolve_with_tier(
        &self,
        paint: &Paint,
        style_id: Option<&str>,
        ctx: &mut RunContext<'_>,
    ) -> Result<(ResolvedColor, Tier)> {
        if let Some(raw_id) = paint.variable_id() {
            let id = normalize_variable_id(raw_id);
            if let Some((path, tier)) = self.variable_path(id, ctx)? {
                return Ok((ResolvedColor::Path(path), tier));
            }
        }

        if let Some(style_id) = style_id {
            if let Some(entry) = ctx.styles.get(style_id) {
                if let Some(path) = parse_token_name(&entry.name, &ctx.aliases) {
                    tracing::trace!(style = style_id, path = %path, "resolved from named style");
                    return Ok((ResolvedColor::Path(path), Tier::Style));
                }
            }
        }

        Ok((ResolvedColor::Literal(literal(paint)), Tier::Literal))
    }

    fn variable_path(&self, id: &str, ctx: &mut RunContext<'_>) -> Result<Option<(String, Tier)>> {
        if let Some(memo) = ctx.resolved.get(id) {
            return Ok(memo.clone());
        }

        if let Some(path) = ctx.library.path(id) {
            let path = path.to_string();
            tracing::trace!(variable = id, path = %path, "resolved from library map");
            ctx.resolved.insert(id.to_string(), Some((path.clone(), Tier::Library)));
            return Ok(Some((path, Tier::Library)));
        }

        let client = ctx.client();
        let file_key = ctx.file_key().to_string();
        let path = ctx
            .variables
            .lookup(client, &file_key, id, &ctx.aliases)?
            .and_then(|mapping| mapping.path.clone());

        if path.is_none() {
            tracing::debug!(variable = id, "variable yields no theme path; falling through");
        }
        let outcome = path.map(|path| (path, Tier::Variable));
        ctx.resolved.insert(id.to_string(), outcome.clone());
        Ok(outcome)
    }
}

/// `#rrggbbaa` literal of a paint, opacity folded into alpha.
///
/// Gradients use their first stop; paints without color are transparent.
pub fn literal(paint: &Paint) -> String {
    match paint.base_color() {
        Some(color) => color.with_opacity(paint.opacity).to_hex(),
        None => TRANSPARENT_LITERAL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::LibraryMap;
    use kiln_core::{
        ClientError, Endpoint, PaintType, Rgba, StaticClient, StyleType, Variable, VariableType,
        VariablesMeta, VariablesResponse,
    };
    use proptest::prelude::*;

    fn variables_client() -> StaticClient {
        let mut meta = VariablesMeta::default();
        meta.variables.insert(
            "VariableID:1:2".into(),
            Variable {
                id: "VariableID:1:2".into(),
                name: "Brand/Dark".into(),
                key: String::new(),
                variable_collection_id: String::new(),
                resolved_type: VariableType::Color,
                remote: false,
            },
        );
        StaticClient::new().with_variables("file", VariablesResponse { meta })
    }

    #[test]
    fn test_library_map_needs_no_calls() {
        let client = StaticClient::new();
        let mut ctx = RunContext::new(&client, "file")
            .with_library(LibraryMap::new().with_entry("abc123", "primary.main"));

        let paint = Paint::solid(Rgba::BLACK).bound_to("VariableID:abc123/4:5");
        let color = ColorResolver.resolve(&paint, None, &mut ctx).unwrap();

        assert_eq!(color, ResolvedColor::Path("primary.main".into()));
        assert_eq!(client.total_calls(), 0);
    }

    #[test]
    fn test_unbound_paint_is_literal() {
        let client = StaticClient::new();
        let mut ctx = RunContext::new(&client, "file");

        let paint = Paint::solid(Rgba::rgba(1.0, 0.0, 0.0, 1.0));
        let color = ColorResolver.resolve(&paint, None, &mut ctx).unwrap();

        assert_eq!(color, ResolvedColor::Literal("#ff0000ff".into()));
        assert_eq!(color.as_str().len(), 9);
        assert_eq!(client.total_calls(), 0);
    }

    #[test]
    fn test_remote_variable_resolved_once() {
        let client = variables_client();
        let mut ctx = RunContext::new(&client, "file");
        let paint = Paint::solid(Rgba::BLACK).bound_to("VariableID:1:2");

        for _ in 0..3 {
            let (color, _) = ColorResolver.resolve_with_tier(&paint, None, &mut ctx).unwrap();
            assert_eq!(color, ResolvedColor::Path("primary.dark".into()));
        }
        assert_eq!(client.calls(Endpoint::Variables), 1);
        assert_eq!(ctx.resolved_count(), 1);
    }

    #[test]
    fn test_unknown_variable_falls_back_to_style() {
        let client = variables_client();
        let mut ctx = RunContext::new(&client, "file");
        ctx.styles.insert("S:1", "Error/Light", StyleType::Fill);

        let paint = Paint::solid(Rgba::BLACK).bound_to("VariableID:7:7");
        let (color, tier) = ColorResolver.resolve_with_tier(&paint, Some("S:1"), &mut ctx).unwrap();
        assert_eq!(color, ResolvedColor::Path("error.light".into()));
        assert_eq!(tier, Tier::Style);

        let (color, tier) = ColorResolver.resolve_with_tier(&paint, None, &mut ctx).unwrap();
        assert_eq!(color, ResolvedColor::Literal("#000000ff".into()));
        assert_eq!(tier, Tier::Literal);
        assert_eq!(client.calls(Endpoint::Variables), 1);
    }

    #[test]
    fn test_api_failure_falls_through() {
        let client = StaticClient::new().with_failure(
            Endpoint::Variables,
            ClientError::Api {
                status: 403,
                message: "forbidden".into(),
            },
        );
        let mut ctx = RunContext::new(&client, "file");
        let paint = Paint::solid(Rgba::WHITE).bound_to("VariableID:1:2");

        let color = ColorResolver.resolve(&paint, None, &mut ctx).unwrap();
        assert_eq!(color, ResolvedColor::Literal("#ffffffff".into()));
    }

    #[test]
    fn test_network_failure_propagates() {
        let client = StaticClient::new()
            .with_failure(Endpoint::Variables, ClientError::Network("reset".into()));
        let mut ctx = RunContext::new(&client, "file");
        let paint = Paint::solid(Rgba::WHITE).bound_to("VariableID:1:2");

        assert!(ColorResolver.resolve(&paint, None, &mut ctx).is_err());
    }

    #[test]
    fn test_literal_folds_opacity_and_handles_images() {
        let mut paint = Paint::solid(Rgba::rgb(0.0, 0.0, 1.0));
        paint.opacity = 0.5;
        assert_eq!(literal(&paint), "#0000ff80");

        let image = Paint {
            paint_type: PaintType::Image,
            color: None,
            ..Paint::solid(Rgba::BLACK)
        };
        assert_eq!(literal(&image), TRANSPARENT_LITERAL);
    }

    proptest! {
        #[test]
        fn prop_literal_is_lowercase_8_hex(
            r in 0.0f64..=1.0, g in 0.0f64..=1.0, b in 0.0f64..=1.0,
            a in 0.0f64..=1.0, opacity in 0.0f64..=1.0,
        ) {
            let mut paint = Paint::solid(Rgba::rgba(r, g, b, a));
            paint.opacity = opacity;
            let hex = literal(&paint);

            prop_assert_eq!(hex.len(), 9);
            prop_assert!(hex.starts_with('#'));
            prop_assert!(hex[1..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }
}
