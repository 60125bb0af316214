//! React/TypeScript generator targeting the Material UI component library.

use std::collections::BTreeMap;

use convert_case::{Case, Casing};
use kiln_core::{Category, ExtractedComponent, PropValue};
use kiln_registry::render::{attribute, element, escape_text, icon_import, render_generic};
use kiln_registry::{ComponentDescriptor, MappingRegistry, RenderInput, ValueKind};
use serde_json::json;

use super::templates::{TemplateEngine, PAGE_TEMPLATE, TYPES_TEMPLATE};
use super::{CodeGenerator, GeneratedPage};
use crate::error::Result;
use crate::imports::ImportSet;
use crate::sx::{js_string, sx_attribute};

/// Markup and imports of one rendered component tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTree {
    pub markup: String,
    pub imports: ImportSet,
}

struct Frame<'a> {
    component: &'a ExtractedComponent,
    children: Vec<String>,
    next: usize,
}

impl<'a> Frame<'a> {
    fn new(component: &'a ExtractedComponent) -> Self {
        Self {
            component,
            children: Vec::new(),
            next: 0,
        }
    }
}

/// React code generator.
#[derive(Debug)]
pub struct ReactGenerator<'r> {
    engine: TemplateEngine<'static>,
    registry: &'r MappingRegistry,
}

impl ReactGenerator<'static> {
    /// Generator over the built-in registry.
    pub fn standard() -> Result<Self> {
        Self::new(MappingRegistry::standard())
    }
}

impl<'r> ReactGenerator<'r> {
    pub fn new(registry: &'r MappingRegistry) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::with_builtin_templates()?,
            registry,
        })
    }

    /// Render one component tree, children before parents.
    pub fn render_tree(&self, root: &ExtractedComponent) -> RenderedTree {
        let mut imports = ImportSet::new();
        let mut stack = vec![Frame::new(root)];

        while let Some(frame) = stack.last_mut() {
            let component = frame.component;
            if frame.next < component.children.len() && !self.is_self_closing(component) {
                let child = &component.children[frame.next];
                frame.next += 1;
                stack.push(Frame::new(child));
                continue;
            }

            let Some(done) = stack.pop() else { break };
            let markup = self.render_component(done.component, &done.children, &mut imports);
            match stack.last_mut() {
                Some(parent) => parent.children.push(markup),
                None => return RenderedTree { markup, imports },
            }
        }
        RenderedTree {
            markup: String::new(),
            imports,
        }
    }

    fn is_self_closing(&self, component: &ExtractedComponent) -> bool {
        self.registry
            .lookup_category(component.category)
            .is_some_and(|descriptor| descriptor.self_closing)
    }

    fn render_component(
        &self,
        component: &ExtractedComponent,
        children: &[String],
        imports: &mut ImportSet,
    ) -> String {
        let fallback;
        let descriptor = match self.registry.lookup_category(component.category) {
            Some(descriptor) => descriptor,
            None => {
                tracing::debug!(
                    category = %component.category,
                    node = %component.source_id,
                    "no descriptor, rendering a container"
                );
                match self.registry.lookup_category(Category::Container) {
                    Some(container) => container,
                    None => {
                        fallback = ComponentDescriptor::new(Category::Container);
                        &fallback
                    }
                }
            }
        };

        let attributes: Vec<String> = component
            .properties
            .iter()
            .filter(|(key, _)| descriptor.schema(key).is_some_and(|schema| schema.attribute))
            .map(|(key, value)| attribute(key, value))
            .collect();

        let mut icon_attributes = Vec::new();
        for (slot, value) in &component.auxiliary {
            if let PropValue::Icon(icon) = value {
                icon_attributes.push(attribute(slot, value));
                imports.insert(icon_import(icon));
            }
        }

        let sx = sx_attribute(&component.style);
        let content = descriptor
            .content
            .and_then(|key| component.get_property(key))
            .and_then(|value| match value {
                PropValue::String(s) | PropValue::Keyword(s) => Some(escape_text(s)),
                PropValue::Number(n) => Some(n.to_string()),
                _ => None,
            });

        let input = RenderInput {
            component,
            descriptor,
            attributes: &attributes,
            icon_attributes: &icon_attributes,
            sx: sx.as_deref(),
            content: content.as_deref(),
            children,
        };
        let rendered = match descriptor.render {
            Some(template) => template(&input),
            None => render_generic(&input),
        };
        imports.extend(rendered.imports);
        rendered.markup
    }

    fn types_module(&self, source: &str, name: &str, roots: &[ExtractedComponent], imports: &ImportSet) -> Result<String> {
        let elements: Vec<String> = imports.symbols().into_iter().map(js_string).collect();
        let data = json!({
            "source": source,
            "name": name,
            "elements": elements,
            "interfaces": self.prop_interfaces(name, roots),
        });
        self.engine.render(TYPES_TEMPLATE, &data)
    }

    /// One props interface per rendered symbol, listing the props in use.
    fn prop_interfaces(&self, name: &str, roots: &[ExtractedComponent]) -> String {
        let mut used: BTreeMap<&'static str, (&ComponentDescriptor, BTreeMap<&str, bool>)> = BTreeMap::new();
        let mut stack: Vec<&ExtractedComponent> = roots.iter().rev().collect();

        while let Some(component) = stack.pop() {
            let Some(descriptor) = self.registry.lookup_category(component.category) else {
                continue;
            };
            let (_, props) = used
                .entry(descriptor.symbol())
                .or_insert_with(|| (descriptor, BTreeMap::new()));
            for (key, value) in &component.properties {
                let numeric = matches!(value, PropValue::Number(_));
                let seen_numeric = props.entry(key.as_str()).or_insert(false);
                *seen_numeric |= numeric;
            }
            if !descriptor.self_closing {
                stack.extend(component.children.iter().rev());
            }
        }

        let mut out = String::new();
        for (symbol, (descriptor, props)) in used {
            if props.is_empty() {
                continue;
            }
            out.push_str(&format!("\nexport interface {}{}Props {{\n", name, symbol));
            for schema in descriptor.props.iter().filter(|s| props.contains_key(s.name)) {
                let numeric = props.get(schema.name).copied().unwrap_or(false);
                let ts_type = match schema.kind {
                    ValueKind::Enum if !schema.allowed.is_empty() => schema
                        .allowed
                        .iter()
                        .map(|value| js_string(value))
                        .collect::<Vec<_>>()
                        .join(" | "),
                    ValueKind::Text if numeric => "string | number".to_string(),
                    ValueKind::Number => "number".to_string(),
                    ValueKind::Bool => "boolean".to_string(),
                    ValueKind::Enum | ValueKind::Text | ValueKind::Color(_) => "string".to_string(),
                };
                out.push_str(&format!("  {}?: {};\n", schema.name, ts_type));
            }
            out.push_str("}\n");
        }
        out
    }
}

impl CodeGenerator for ReactGenerator<'_> {
    fn framework_name(&self) -> &'static str {
        "React"
    }

    fn generate(&self, name: &str, roots: &[ExtractedComponent]) -> Result<GeneratedPage> {
        let source = name.replace(['\r', '\n'], " ");

        let mut imports = ImportSet::new();
        let mut bodies = Vec::with_capacity(roots.len());
        for root in roots {
            let tree = self.render_tree(root);
            imports.merge(tree.imports);
            bodies.push(tree.markup);
        }

        // The page function must not shadow an imported component.
        let mut component = component_name(name);
        while imports.symbols().contains(&component.as_str()) {
            component.push_str("Page");
        }
        let body = match bodies.len() {
            0 => "null".to_string(),
            1 => bodies.remove(0),
            _ => element("", "", None, &bodies, false),
        };

        let module = self.engine.render(
            PAGE_TEMPLATE,
            &json!({
                "source": source,
                "name": component,
                "imports": imports.render(),
                "body": body,
            }),
        )?;
        let types = self.types_module(&source, &component, roots, &imports)?;

        tracing::debug!(page = %component, roots = roots.len(), imports = imports.symbols().len(), "generated page");
        Ok(GeneratedPage {
            name: component,
            module,
            types,
            imports,
        })
    }
}

/// PascalCase component identifier for a page name; names that do not start
/// with a letter are prefixed with `Page`.
pub fn component_name(name: &str) -> String {
    let words: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let pascal = words.trim().to_case(Case::Pascal);
    match pascal.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => pascal,
        _ => format!("Page{}", pascal),
    }
}
