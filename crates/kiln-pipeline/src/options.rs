//! Pipeline configuration.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use kiln_extract::WalkOptions;
use kiln_resolver::{GroupAliases, LibraryMap};
use serde::Deserialize;

use crate::error::{PipelineError, Result};

/// Options of one pipeline run.
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineOptions {
    /// Directory generated modules are written to.
    pub output_dir: PathBuf,
    /// Case-insensitive name prefixes of nodes that are never emitted.
    pub placeholder_markers: Vec<String>,
    pub include_hidden: bool,
    /// Extra color-group aliases (`"brand": "primary"`), applied over the
    /// built-in ones.
    pub group_aliases: IndexMap<String, String>,
    /// Static variable export consulted before the remote variable table.
    pub library_map: Option<PathBuf>,
    /// Node ids of the pages to process; empty means every canvas.
    pub pages: Vec<String>,
    /// Also write the `*.types.ts` companion module.
    pub emit_types: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        let walk = WalkOptions::default();
        Self {
            output_dir: PathBuf::from("generated"),
            placeholder_markers: walk.placeholder_markers,
            include_hidden: walk.include_hidden,
            group_aliases: IndexMap::new(),
            library_map: None,
            pages: Vec::new(),
            emit_types: true,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&read(path.as_ref())?)
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_placeholder_markers(mut self, markers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.placeholder_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    pub fn with_group_alias(mut self, alias: impl Into<String>, group: impl Into<String>) -> Self {
        self.group_aliases.insert(alias.into(), group.into());
        self
    }

    pub fn with_library_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_map = Some(path.into());
        self
    }

    pub fn with_page(mut self, node_id: impl Into<String>) -> Self {
        self.pages.push(node_id.into());
        self
    }

    pub fn with_emit_types(mut self, emit: bool) -> Self {
        self.emit_types = emit;
        self
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            placeholder_markers: self.placeholder_markers.clone(),
            include_hidden: self.include_hidden,
        }
    }

    /// Built-in color-group aliases extended with the configured ones.
    pub fn group_aliases(&self) -> GroupAliases {
        let mut aliases = GroupAliases::default();
        aliases.extend(&self.group_aliases);
        aliases
    }

    /// The configured library map, or an empty one.
    pub fn load_library(&self) -> Result<LibraryMap> {
        match &self.library_map {
            Some(path) => Ok(LibraryMap::from_json(&read(path)?)?),
            None => Ok(LibraryMap::new()),
        }
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PipelineOptions::default();
        assert_eq!(options.output_dir, PathBuf::from("generated"));
        assert_eq!(options.placeholder_markers, vec!["placeholder", "_placeholder"]);
        assert!(options.emit_types);
        assert!(options.pages.is_empty());
        assert_eq!(options.walk_options(), WalkOptions::default());
    }

    #[test]
    fn test_from_json_partial() {
        let options = PipelineOptions::from_json(
            r#"{ "outputDir": "src/pages", "emitTypes": false, "groupAliases": { "brand": "secondary" }, "pages": ["1:2"] }"#,
        )
        .unwrap();

        assert_eq!(options.output_dir, PathBuf::from("src/pages"));
        assert!(!options.emit_types);
        assert_eq!(options.pages, vec!["1:2"]);
        assert!(!options.include_hidden);
        assert_eq!(options.group_aliases.get("brand").map(String::as_str), Some("secondary"));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            PipelineOptions::from_json("{ \"emitTypes\": 3 }"),
            Err(PipelineError::Options(_))
        ));
    }

    #[test]
    fn test_load_library() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(
            &path,
            r#"{ "abc": "primary.main", "def": { "name": "Brand/Dark", "path": "primary.dark" } }"#,
        )
        .unwrap();

        let library = PipelineOptions::new().with_library_map(&path).load_library().unwrap();
        assert_eq!(library.path("abc"), Some("primary.main"));
        assert_eq!(library.path("def"), Some("primary.dark"));

        let missing = PipelineOptions::new().with_library_map(dir.path().join("missing.json"));
        assert!(matches!(missing.load_library(), Err(PipelineError::Read { .. })));
        assert!(PipelineOptions::new().load_library().unwrap().is_empty());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiln.json");
        std::fs::write(&path, r#"{ "includeHidden": true }"#).unwrap();

        let options = PipelineOptions::from_file(&path).unwrap();
        assert!(options.include_hidden);
        assert!(options.walk_options().include_hidden);
    }
}
