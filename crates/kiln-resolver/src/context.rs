//! Run-scoped resolution context.

use std::collections::HashMap;
use std::fmt;

use kiln_core::{ComponentsResponse, DocumentClient, FileResponse, StylesResponse};

use crate::color::Tier;
use crate::components::{ComponentInfo, ComponentInfoCache};
use crate::error::Result;
use crate::library::LibraryMap;
use crate::styles::StyleRegistry;
use crate::tokens::GroupAliases;
use crate::variables::VariableCache;

/// Caches and collaborators for one document run.
///
/// Built per document and dropped afterwards; caches are never invalidated
/// mid-run.
pub struct RunContext<'c> {
    client: &'c dyn DocumentClient,
    file_key: String,
    pub variables: VariableCache,
    pub styles: StyleRegistry,
    pub components: ComponentInfoCache,
    pub library: LibraryMap,
    pub aliases: GroupAliases,
    pub(crate) resolved: HashMap<String, Option<(String, Tier)>>,
}

impl<'c> RunContext<'c> {
    /// An empty context for `file_key`.
    pub fn new(client: &'c dyn DocumentClient, file_key: impl Into<String>) -> Self {
        Self {
            client,
            file_key: file_key.into(),
            variables: VariableCache::new(),
            styles: StyleRegistry::new(),
            components: ComponentInfoCache::new(),
            library: LibraryMap::new(),
            aliases: GroupAliases::default(),
            resolved: HashMap::new(),
        }
    }

    /// A context seeded with the styles and components embedded in `file`.
    pub fn for_file(client: &'c dyn DocumentClient, file_key: impl Into<String>, file: &FileResponse) -> Self {
        let mut context = Self::new(client, file_key);
        context.styles = StyleRegistry::from_file_styles(&file.styles);
        context.components =
            ComponentInfoCache::from_file_components(&file.components, &file.component_sets);
        context
    }

    pub fn with_library(mut self, library: LibraryMap) -> Self {
        self.library = library;
        self
    }

    pub fn with_aliases(mut self, aliases: GroupAliases) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_published_styles(mut self, response: &StylesResponse) -> Self {
        self.styles.merge_published(response);
        self
    }

    pub fn with_published_components(mut self, response: &ComponentsResponse) -> Self {
        self.components.merge_published(response);
        self
    }

    pub fn client(&self) -> &'c dyn DocumentClient {
        self.client
    }

    pub fn file_key(&self) -> &str {
        &self.file_key
    }

    /// Resolve a component id through the component-info cache.
    pub fn component_info(&mut self, component_id: &str) -> Result<Option<&ComponentInfo>> {
        self.components.lookup(self.client, &self.file_key, component_id)
    }

    /// Number of memoized variable resolutions.
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }
}

impl fmt::Debug for RunContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("file_key", &self.file_key)
            .field("variables", &self.variables.len())
            .field("styles", &self.styles.len())
            .field("components", &self.components.len())
            .field("library", &self.library.len())
            .field("resolved", &self.resolved.len())
            .finish()
    }
}
