//! Tree walking: classify, extract and aggregate a design subtree.

use std::vec;

use kiln_core::{Category, DesignNode, ExtractedComponent};
use kiln_registry::{ChildRule, MappingRegistry, Slot};
use kiln_resolver::RunContext;

use crate::classify::{Classification, Classifier};
use crate::error::Result;
use crate::props::PropertyExtractor;
use crate::style::StyleExtractor;

/// Walker settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// Case-insensitive name prefixes of nodes that are never emitted.
    pub placeholder_markers: Vec<String>,
    /// Walk hidden nodes as if they were visible.
    pub include_hidden: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            placeholder_markers: vec!["placeholder".to_string(), "_placeholder".to_string()],
            include_hidden: false,
        }
    }
}

impl WalkOptions {
    pub fn is_placeholder(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.placeholder_markers
            .iter()
            .any(|marker| !marker.is_empty() && name.starts_with(&marker.to_lowercase()))
    }
}

/// Outcome of visiting one node.
#[derive(Debug)]
pub enum Visit<'n> {
    /// Hidden, placeholder, or unclassifiable.
    Skip,
    Leaf(ExtractedComponent),
    /// Children come from the descriptor's slot hook.
    Slots(ExtractedComponent, Vec<Slot<'n>>),
    Recurse(ExtractedComponent, Vec<&'n DesignNode>),
}

#[derive(Clone, Copy)]
struct Target<'n> {
    node: &'n DesignNode,
    category: Option<Category>,
}

struct Pending<'n> {
    component: ExtractedComponent,
    queue: vec::IntoIter<Target<'n>>,
}

impl<'n> Pending<'n> {
    fn new(component: ExtractedComponent, targets: Vec<Target<'n>>) -> Self {
        Self {
            component,
            queue: targets.into_iter(),
        }
    }
}

/// Walks a design subtree into an [`ExtractedComponent`] tree.
///
/// The walk is iterative: an explicit stack of partially built components,
/// each with the queue of sub-nodes still to visit.
#[derive(Debug, Clone)]
pub struct TreeWalker<'r> {
    classifier: Classifier<'r>,
    props: PropertyExtractor,
    styles: StyleExtractor,
    options: WalkOptions,
}

impl TreeWalker<'static> {
    /// Walker over the built-in registry.
    pub fn standard() -> Self {
        Self::new(MappingRegistry::standard())
    }
}

impl<'r> TreeWalker<'r> {
    pub fn new(registry: &'r MappingRegistry) -> Self {
        Self {
            classifier: Classifier::new(registry),
            props: PropertyExtractor::new(),
            styles: StyleExtractor::new(),
            options: WalkOptions::default(),
        }
    }

    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    pub fn classifier(&self) -> &Classifier<'r> {
        &self.classifier
    }

    /// Walk `root`. `None` when the root itself is skipped.
    pub fn walk(&self, root: &DesignNode, ctx: &mut RunContext<'_>) -> Result<Option<ExtractedComponent>> {
        let mut stack = match self.visit(root, None, ctx)? {
            Visit::Skip => return Ok(None),
            Visit::Leaf(component) => return Ok(Some(component)),
            Visit::Slots(component, slots) => vec![Pending::new(component, slot_targets(slots))],
            Visit::Recurse(component, children) => vec![Pending::new(component, child_targets(children))],
        };

        loop {
            let Some(top) = stack.last_mut() else {
                return Ok(None);
            };

            if let Some(target) = top.queue.next() {
                match self.visit(target.node, target.category, ctx)? {
                    Visit::Skip => {}
                    Visit::Leaf(component) => top.component.children.push(component),
                    Visit::Slots(component, slots) => {
                        stack.push(Pending::new(component, slot_targets(slots)));
                    }
                    Visit::Recurse(component, children) => {
                        stack.push(Pending::new(component, child_targets(children)));
                    }
                }
                continue;
            }

            let Some(done) = stack.pop() else {
                return Ok(None);
            };
            match stack.last_mut() {
                Some(parent) => parent.component.children.push(done.component),
                None => return Ok(Some(done.component)),
            }
        }
    }

    /// Walk several roots, dropping the ones that are skipped.
    pub fn walk_all<'n>(
        &self,
        roots: impl IntoIterator<Item = &'n DesignNode>,
        ctx: &mut RunContext<'_>,
    ) -> Result<Vec<ExtractedComponent>> {
        let mut components = Vec::new();
        for root in roots {
            if let Some(component) = self.walk(root, ctx)? {
                components.push(component);
            }
        }
        Ok(components)
    }

    /// Classify and extract one node; `forced` is a slot's imposed category.
    pub fn visit<'n>(
        &self,
        node: &'n DesignNode,
        forced: Option<Category>,
        ctx: &mut RunContext<'_>,
    ) -> Result<Visit<'n>> {
        if !node.visible && !self.options.include_hidden {
            tracing::trace!(node = %node.id, "skipping hidden node");
            return Ok(Visit::Skip);
        }
        if self.options.is_placeholder(&node.name) {
            tracing::debug!(node = %node.id, name = %node.name, "skipping placeholder");
            return Ok(Visit::Skip);
        }

        let forced = forced.and_then(|category| self.classifier.classify_as(node, category, ctx));
        let classification = match forced {
            Some(classification) => classification,
            None => match self.classifier.classify(node, ctx)? {
                Some(classification) => classification,
                None => return Ok(Visit::Skip),
            },
        };

        let component = self.extract(node, &classification, ctx)?;
        let visit = match classification.descriptor.children {
            ChildRule::Leaf => Visit::Leaf(component),
            ChildRule::Slots(hook) => Visit::Slots(component, hook(node)),
            ChildRule::Structural => {
                let children: Vec<&DesignNode> = node
                    .children
                    .iter()
                    .filter(|child| child.visible || self.options.include_hidden)
                    .collect();
                if children.is_empty() {
                    Visit::Leaf(component)
                } else {
                    Visit::Recurse(component, children)
                }
            }
        };
        Ok(visit)
    }

    /// Build the component of a classified node, without children.
    pub fn extract(
        &self,
        node: &DesignNode,
        classification: &Classification<'_>,
        ctx: &mut RunContext<'_>,
    ) -> Result<ExtractedComponent> {
        let descriptor = classification.descriptor;
        let mut component = ExtractedComponent::new(classification.category, &node.id, &node.name);
        component.properties = self
            .props
            .properties(node, descriptor, &classification.variants, ctx)?;
        component.auxiliary = self.props.icons(node, descriptor, ctx)?;
        component.style = self.styles.extract(node, descriptor, ctx)?;
        component.variants = classification
            .variants
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        Ok(component)
    }
}

fn slot_targets(slots: Vec<Slot<'_>>) -> Vec<Target<'_>> {
    slots
        .into_iter()
        .map(|slot| Target {
            node: slot.node,
            category: slot.category,
        })
        .collect()
}

fn child_targets(children: Vec<&DesignNode>) -> Vec<Target<'_>> {
    children
        .into_iter()
        .map(|node| Target { node, category: None })
        .collect()
}
