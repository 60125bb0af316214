//! Named-style registry.

use indexmap::IndexMap;
use kiln_core::{StyleMeta, StyleType, StylesResponse};

/// A registered named style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub name: String,
    pub style_type: StyleType,
}

/// Style id to entry. Loaded once per run, read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    entries: IndexMap<String, StyleEntry>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Styles embedded in a file payload, keyed by style id.
    pub fn from_file_styles(styles: &IndexMap<String, StyleMeta>) -> Self {
        let entries = styles
            .iter()
            .map(|(id, meta)| {
                (
                    id.clone(),
                    StyleEntry {
                        name: meta.name.clone(),
                        style_type: meta.style_type,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Add published styles; styles already known from the file win.
    pub fn merge_published(&mut self, response: &StylesResponse) {
        for style in &response.meta.styles {
            self.entries
                .entry(style.node_id.clone())
                .or_insert_with(|| StyleEntry {
                    name: style.name.clone(),
                    style_type: style.style_type,
                });
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>, style_type: StyleType) {
        self.entries.insert(
            id.into(),
            StyleEntry {
                name: name.into(),
                style_type,
            },
        );
    }

    pub fn get(&self, id: &str) -> Option<&StyleEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::{PublishedStyle, StylesMeta};

    #[test]
    fn test_file_styles_take_precedence() {
        let mut file_styles = IndexMap::new();
        file_styles.insert(
            "S:1".to_string(),
            StyleMeta {
                key: "k1".into(),
                name: "Primary/Main".into(),
                style_type: StyleType::Fill,
            },
        );
        let mut registry = StyleRegistry::from_file_styles(&file_styles);

        registry.merge_published(&StylesResponse {
            meta: StylesMeta {
                styles: vec![
                    PublishedStyle {
                        key: "k1".into(),
                        node_id: "S:1".into(),
                        name: "Renamed".into(),
                        style_type: StyleType::Fill,
                    },
                    PublishedStyle {
                        key: "k2".into(),
                        node_id: "S:2".into(),
                        name: "Body/Regular".into(),
                        style_type: StyleType::Text,
                    },
                ],
            },
        });

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("S:1").map(|s| s.name.as_str()), Some("Primary/Main"));
        assert_eq!(registry.get("S:2").map(|s| s.style_type), Some(StyleType::Text));
    }
}
