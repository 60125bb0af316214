//! Kiln code generation.
//!
//! Turns extracted component trees into React page modules that import
//! their components from Material UI. Generation is pure: the same trees
//! always produce byte-identical modules.

pub mod error;
pub mod generators;
pub mod imports;
pub mod sx;

pub use error::{CodegenError, Result};
pub use generators::{
    component_name, CodeGenerator, GeneratedFile, GeneratedPage, ReactGenerator, RenderedTree,
    TemplateEngine,
};
pub use imports::ImportSet;
pub use sx::sx_attribute;
