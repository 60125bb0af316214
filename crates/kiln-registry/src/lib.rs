//! Component mapping registry.
//!
//! A static table of [`ComponentDescriptor`]s, one per [`Category`]. Each
//! descriptor says how a design node is recognized (aliases), which
//! properties are extracted from it (schemas and custom extractors), how
//! its children are found (structural, leaf, or slot hooks), and how it is
//! rendered (generic or custom template).
//!
//! [`Category`]: kiln_core::Category

pub mod descriptor;
pub mod hooks;
pub mod registry;
pub mod render;
pub mod schema;
pub mod standard;

pub use descriptor::{ChildRule, ComponentDescriptor, IconFn, RenderFn, Slot, SlotFn, MATERIAL_MODULE};
pub use registry::MappingRegistry;
pub use render::{Import, RenderInput, Rendered};
pub use schema::{DefaultValue, ExtractFn, NodeView, PropSchema, TransformFn, ValueKind};
pub use standard::standard_descriptors;
