//! Core types for the Kiln design-to-code pipeline.
//!
//! This crate provides the foundational types used across all other kiln crates:
//! - The design-node model deserialized from the design tool's API
//! - Component categories and the extracted component tree
//! - Color values
//! - The document-client and file-system collaborator traits
//! - Error types

pub mod api;
pub mod category;
pub mod client;
pub mod color;
pub mod component;
pub mod errors;
pub mod fs;
pub mod node;

pub use api::*;
pub use category::Category;
pub use client::{find_node, ClientResult, DocumentClient, Endpoint, RetryPolicy, StaticClient};
pub use color::Rgba;
pub use component::{ExtractedComponent, IconRef, PropValue, ResolvedColor};
pub use errors::{ClientError, PersistError};
pub use fs::{FileSystem, LocalFileSystem};
pub use node::*;
