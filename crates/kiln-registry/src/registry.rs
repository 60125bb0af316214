//! Descriptor registry with a reverse alias index.

use std::collections::HashMap;
use std::sync::OnceLock;

use kiln_core::Category;

use crate::descriptor::ComponentDescriptor;
use crate::standard::standard_descriptors;

/// Read-only registry of component descriptors.
///
/// Alias and category indexes are built once at construction; lookups never
/// fail with an error, a miss is simply `None`.
#[derive(Debug)]
pub struct MappingRegistry {
    descriptors: Vec<ComponentDescriptor>,
    by_alias: HashMap<&'static str, usize>,
    by_category: HashMap<Category, usize>,
}

impl MappingRegistry {
    /// The shared built-in registry.
    pub fn standard() -> &'static MappingRegistry {
        static STANDARD: OnceLock<MappingRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| MappingRegistry::from_descriptors(standard_descriptors()))
    }

    /// Build a registry from descriptors, in priority order.
    ///
    /// When two descriptors claim the same alias or category, the first one
    /// registered wins.
    pub fn from_descriptors(descriptors: Vec<ComponentDescriptor>) -> Self {
        let mut by_alias = HashMap::new();
        let mut by_category = HashMap::new();

        for (index, descriptor) in descriptors.iter().enumerate() {
            by_category.entry(descriptor.category).or_insert(index);

            for &alias in &descriptor.aliases {
                let alias: &'static str = alias.trim();
                if let Some(&existing) = by_alias.get(alias) {
                    let existing: &ComponentDescriptor = &descriptors[existing];
                    tracing::warn!(
                        alias,
                        kept = %existing.category,
                        ignored = %descriptor.category,
                        "duplicate component alias"
                    );
                    continue;
                }
                by_alias.insert(alias, index);
            }
        }

        Self {
            descriptors,
            by_alias,
            by_category,
        }
    }

    /// Descriptor whose alias equals the trimmed `name` exactly.
    pub fn lookup_alias(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.by_alias
            .get(name.trim())
            .map(|&index| &self.descriptors[index])
    }

    pub fn lookup_category(&self, category: Category) -> Option<&ComponentDescriptor> {
        self.by_category
            .get(&category)
            .map(|&index| &self.descriptors[index])
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
