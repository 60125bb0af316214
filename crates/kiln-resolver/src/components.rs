//! Component-info cache: instance component ids to canonical source names.

use std::collections::HashMap;

use indexmap::IndexMap;
use kiln_core::{ComponentMeta, ComponentSetMeta, ComponentsResponse, DocumentClient};

use crate::error::Result;

/// Name information of a library component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    pub name: String,
    pub component_set_name: Option<String>,
}

impl ComponentInfo {
    pub fn new(name: impl Into<String>, component_set_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            component_set_name,
        }
    }

    /// The set name for variants, else the component's own name.
    pub fn canonical_name(&self) -> &str {
        self.component_set_name.as_deref().unwrap_or(&self.name)
    }

    /// `Prop=Value` pairs of a variant name such as `Variant=Contained, Size=Small`.
    pub fn variant_pairs(&self) -> Vec<(String, String)> {
        parse_variant_name(&self.name)
    }
}

/// Parse `Prop=Value, Prop2=Value2`. Segments without `=` are skipped.
pub fn parse_variant_name(name: &str) -> Vec<(String, String)> {
    name.split(',')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Component id to info. `None` entries are components the API does not know.
#[derive(Debug, Default)]
pub struct ComponentInfoCache {
    entries: HashMap<String, Option<ComponentInfo>>,
}

impl ComponentInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the component metadata embedded in a file payload.
    pub fn from_file_components(
        components: &IndexMap<String, ComponentMeta>,
        component_sets: &IndexMap<String, ComponentSetMeta>,
    ) -> Self {
        let mut cache = Self::new();
        for (id, meta) in components {
            let set_name = meta
                .component_set_id
                .as_ref()
                .and_then(|set_id| component_sets.get(set_id))
                .map(|set| set.name.clone());
            cache.insert(id.clone(), ComponentInfo::new(meta.name.clone(), set_name));
        }
        cache
    }

    /// Add published components; entries already known win.
    pub fn merge_published(&mut self, response: &ComponentsResponse) {
        for component in &response.meta.components {
            let set_name = component
                .containing_frame
                .as_ref()
                .and_then(|frame| frame.containing_state_group.as_ref())
                .map(|group| group.name.clone());
            self.entries
                .entry(component.node_id.clone())
                .or_insert_with(|| Some(ComponentInfo::new(component.name.clone(), set_name)));
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, info: ComponentInfo) {
        self.entries.insert(id.into(), Some(info));
    }

    /// Cached info without touching the network.
    pub fn get(&self, id: &str) -> Option<&ComponentInfo> {
        self.entries.get(id).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a component id, fetching its node on a miss.
    ///
    /// A not-found response is cached as unknown; any other client error
    /// propagates.
    pub fn lookup(
        &mut self,
        client: &dyn DocumentClient,
        file_key: &str,
        id: &str,
    ) -> Result<Option<&ComponentInfo>> {
        if !self.entries.contains_key(id) {
            let info = Self::fetch(client, file_key, id)?;
            if info.is_none() {
                tracing::debug!(component = id, "component unknown; caching failure");
            }
            self.entries.insert(id.to_string(), info);
        }
        Ok(self.get(id))
    }

    fn fetch(client: &dyn DocumentClient, file_key: &str, id: &str) -> Result<Option<ComponentInfo>> {
        tracing::debug!(component = id, "fetching component node");
        let response = match client.get_file_nodes(file_key, &[id.to_string()]) {
            Ok(response) => response,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let Some(Some(entry)) = response.nodes.get(id) else {
            return Ok(None);
        };

        let set_name = entry
            .components
            .get(id)
            .and_then(|meta| meta.component_set_id.as_ref())
            .and_then(|set_id| entry.component_sets.get(set_id))
            .map(|set| set.name.clone());
        Ok(Some(ComponentInfo::new(entry.document.name.clone(), set_name)))
    }
}
