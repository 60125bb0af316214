//! Kiln page pipeline.
//!
//! Sequences one design file end to end:
//!
//! 1. fetch the file through a [`DocumentClient`](kiln_core::DocumentClient)
//! 2. build a run-scoped [`RunContext`](kiln_resolver::RunContext)
//! 3. walk each selected page into component trees
//! 4. generate the page and types modules
//! 5. persist them through a [`FileSystem`](kiln_core::FileSystem)
//!
//! Any client failure aborts the file before anything is written.

pub mod error;
pub mod options;
pub mod pipeline;

pub use error::{PipelineError, Result};
pub use options::PipelineOptions;
pub use pipeline::{PageOutput, PageReport, Pipeline};
