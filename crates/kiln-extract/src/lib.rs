//! Classification and extraction of design subtrees.
//!
//! The [`TreeWalker`] drives the [`Classifier`], the [`PropertyExtractor`]
//! and the [`StyleExtractor`] over each node, producing an owned
//! [`ExtractedComponent`](kiln_core::ExtractedComponent) tree. All run-scoped
//! caches are reached through the [`RunContext`](kiln_resolver::RunContext).

mod classify;
mod error;
mod props;
mod style;
mod walk;

pub use classify::{name_hint, structural_category, Classification, Classifier, Rule};
pub use error::{ExtractError, Result};
pub use props::{icon_identifier, normalize, PropertyExtractor};
pub use style::{spacing, StyleExtractor};
pub use walk::{TreeWalker, Visit, WalkOptions};
