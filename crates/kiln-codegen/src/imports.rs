//! Deduplicated, sorted import statements.

use std::collections::{BTreeMap, BTreeSet};

use kiln_registry::Import;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ModuleImports {
    default: Option<String>,
    named: BTreeSet<String>,
}

/// Imports of a generated module, grouped by module path.
///
/// Iteration and rendering are sorted by module, then symbol, so output does
/// not depend on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    modules: BTreeMap<String, ModuleImports>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, import: Import) {
        let entry = self.modules.entry(import.module).or_default();
        if import.default {
            if let Some(existing) = &entry.default {
                if *existing != import.symbol {
                    tracing::warn!(existing = %existing, symbol = %import.symbol, "conflicting default imports");
                }
                return;
            }
            entry.default = Some(import.symbol);
        } else {
            entry.named.insert(import.symbol);
        }
    }

    pub fn extend(&mut self, imports: impl IntoIterator<Item = Import>) {
        for import in imports {
            self.insert(import);
        }
    }

    pub fn merge(&mut self, other: ImportSet) {
        for (module, imports) in other.modules {
            let entry = self.modules.entry(module).or_default();
            if entry.default.is_none() {
                entry.default = imports.default;
            }
            entry.named.extend(imports.named);
        }
    }

    pub fn contains(&self, module: &str, symbol: &str) -> bool {
        self.modules.get(module).is_some_and(|imports| {
            imports.default.as_deref() == Some(symbol) || imports.named.contains(symbol)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Every imported symbol, sorted and deduplicated.
    pub fn symbols(&self) -> Vec<&str> {
        let symbols: BTreeSet<&str> = self
            .modules
            .values()
            .flat_map(|imports| imports.default.iter().chain(imports.named.iter()))
            .map(String::as_str)
            .collect();
        symbols.into_iter().collect()
    }

    /// One `import` statement per module.
    pub fn render(&self) -> String {
        self.modules
            .iter()
            .map(|(module, imports)| {
                let named = if imports.named.is_empty() {
                    None
                } else {
                    Some(format!(
                        "{{ {} }}",
                        imports.named.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
                    ))
                };
                let clause = match (&imports.default, named) {
                    (Some(default), Some(named)) => format!("{}, {}", default, named),
                    (Some(default), None) => default.clone(),
                    (None, Some(named)) => named,
                    (None, None) => String::new(),
                };
                format!("import {} from '{}';", clause, module)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
