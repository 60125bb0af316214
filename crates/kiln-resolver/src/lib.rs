//! Design-variable and color resolution.
//!
//! This crate resolves:
//! - Paints to theme paths (`primary.main`) or `#rrggbbaa` literals
//! - Variable ids through a static library map and the remote variable table
//! - Instance component ids to canonical component names
//!
//! All caches live in a [`RunContext`] built per document.

mod color;
mod components;
mod context;
mod error;
mod library;
mod styles;
mod tokens;
mod variables;

pub use color::{literal, ColorResolver, Tier, TRANSPARENT_LITERAL};
pub use components::{parse_variant_name, ComponentInfo, ComponentInfoCache};
pub use context::RunContext;
pub use error::{ResolveError, Result};
pub use library::{LibraryEntry, LibraryMap};
pub use styles::{StyleEntry, StyleRegistry};
pub use tokens::{parse_token_name, GroupAliases, GROUPS};
pub use variables::{normalize_variable_id, VariableCache, VariableKind, VariableMapping};
