//! Run-scoped cache of design variables.

use std::collections::HashMap;

use kiln_core::{ClientError, DocumentClient, Variable, VariableType};

use crate::error::Result;
use crate::tokens::{parse_token_name, GroupAliases};

/// Strip the `VariableID:` prefix and any `/<node>` suffix.
///
/// `VariableID:abc123/4:5` becomes `abc123`; `VariableID:4:5` becomes `4:5`.
pub fn normalize_variable_id(id: &str) -> &str {
    let id = id.strip_prefix("VariableID:").unwrap_or(id);
    id.split('/').next().unwrap_or(id)
}

/// What a variable holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Color,
    Size,
    Variant,
    Typography,
    Other,
}

impl VariableKind {
    fn of(variable: &Variable) -> Self {
        match variable.resolved_type {
            VariableType::Color => Self::Color,
            VariableType::Float => {
                let name = variable.name.to_lowercase();
                if name.contains("font") || name.contains("typography") {
                    Self::Typography
                } else {
                    Self::Size
                }
            }
            VariableType::String => Self::Variant,
            _ => Self::Other,
        }
    }
}

/// A fetched variable with its parsed theme path.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableMapping {
    pub name: String,
    pub path: Option<String>,
    pub kind: VariableKind,
}

/// Variable id to mapping. `None` entries are permanent failures.
///
/// The remote variable table is requested at most once per run; every
/// variable it returns is cached, so later misses never touch the network.
#[derive(Debug, Default)]
pub struct VariableCache {
    entries: HashMap<String, Option<VariableMapping>>,
    fetched: bool,
}

impl VariableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the remote table has been requested.
    pub fn fetched(&self) -> bool {
        self.fetched
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a mapping under a normalized id.
    pub fn insert(&mut self, id: &str, mapping: Option<VariableMapping>) {
        self.entries.insert(normalize_variable_id(id).to_string(), mapping);
    }

    /// Look up a normalized variable id, fetching the remote table on the
    /// first miss.
    ///
    /// Not-found and API failures are cached as permanent failures; rate
    /// limiting and network failures propagate.
    pub fn lookup(
        &mut self,
        client: &dyn DocumentClient,
        file_key: &str,
        id: &str,
        aliases: &GroupAliases,
    ) -> Result<Option<&VariableMapping>> {
        if !self.entries.contains_key(id) {
            if !self.fetched {
                self.fetch(client, file_key, aliases)?;
            }
            if !self.entries.contains_key(id) {
                tracing::debug!(variable = id, "variable not found; caching failure");
                self.entries.insert(id.to_string(), None);
            }
        }
        Ok(self.entries.get(id).and_then(Option::as_ref))
    }

    fn fetch(
        &mut self,
        client: &dyn DocumentClient,
        file_key: &str,
        aliases: &GroupAliases,
    ) -> Result<()> {
        tracing::debug!(file_key, "fetching file variables");
        match client.get_file_variables(file_key) {
            Ok(response) => {
                self.fetched = true;
                for (id, variable) in &response.meta.variables {
                    let mapping = VariableMapping {
                        name: variable.name.clone(),
                        path: parse_token_name(&variable.name, aliases),
                        kind: VariableKind::of(variable),
                    };
                    if !variable.key.is_empty() {
                        self.entries.insert(variable.key.clone(), Some(mapping.clone()));
                    }
                    self.insert(id, Some(mapping));
                }
                tracing::debug!(count = response.meta.variables.len(), "cached file variables");
                Ok(())
            }
            Err(err @ (ClientError::NotFound { .. } | ClientError::Api { .. })) => {
                self.fetched = true;
                tracing::warn!(error = %err, "variable lookup failed; falling back");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
