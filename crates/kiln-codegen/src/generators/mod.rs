//! Code generators for extracted component trees.

mod react;
mod templates;

pub use react::{component_name, ReactGenerator, RenderedTree};
pub use templates::{TemplateEngine, PAGE_TEMPLATE, TYPES_TEMPLATE};

use kiln_core::ExtractedComponent;

use crate::error::Result;
use crate::imports::ImportSet;

/// Common trait for code generators.
pub trait CodeGenerator {
    /// Target framework name.
    fn framework_name(&self) -> &'static str;

    /// Generate the page module named `name` from its root components.
    ///
    /// Performs no I/O; equal inputs give byte-identical output.
    fn generate(&self, name: &str, roots: &[ExtractedComponent]) -> Result<GeneratedPage>;
}

/// Output of generating one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    /// Component identifier of the page.
    pub name: String,
    /// Page module source.
    pub module: String,
    /// Companion types module source.
    pub types: String,
    /// Imports of the page module.
    pub imports: ImportSet,
}

impl GeneratedPage {
    pub fn module_file_name(&self) -> String {
        format!("{}.tsx", self.name)
    }

    pub fn types_file_name(&self) -> String {
        format!("{}.types.ts", self.name)
    }

    /// Files to persist, the types module only when requested.
    pub fn files(&self, include_types: bool) -> Vec<GeneratedFile> {
        let mut files = vec![GeneratedFile {
            path: self.module_file_name(),
            content: self.module.clone(),
        }];
        if include_types {
            files.push(GeneratedFile {
                path: self.types_file_name(),
                content: self.types.clone(),
            });
        }
        files
    }
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File path relative to the output directory.
    pub path: String,
    /// File content.
    pub content: String,
}
