//! The document-client boundary.
//!
//! The pipeline only consumes [`DocumentClient`]; fetching, authentication,
//! and retries belong to implementations of it. [`StaticClient`] serves
//! pre-fetched payloads from memory, which covers offline runs and tests.

use std::cell::RefCell;
use std::time::Duration;

use indexmap::IndexMap;

use crate::api::{
    ComponentsResponse, FileResponse, NodeEntry, NodesResponse, StylesResponse,
    VariablesResponse,
};
use crate::errors::ClientError;
use crate::node::DesignNode;

/// Result type alias for client calls.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Source of design documents and their auxiliary registries.
pub trait DocumentClient {
    /// Fetch a whole file.
    fn get_file(&self, file_key: &str) -> ClientResult<FileResponse>;

    /// Fetch specific subtrees of a file.
    fn get_file_nodes(&self, file_key: &str, node_ids: &[String]) -> ClientResult<NodesResponse>;

    /// Fetch the published components of a file.
    fn get_file_components(&self, file_key: &str) -> ClientResult<ComponentsResponse>;

    /// Fetch the published styles of a file.
    fn get_file_styles(&self, file_key: &str) -> ClientResult<StylesResponse>;

    /// Fetch the local variables of a file.
    fn get_file_variables(&self, file_key: &str) -> ClientResult<VariablesResponse>;
}

/// Endpoints of a [`DocumentClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    File,
    FileNodes,
    Components,
    Styles,
    Variables,
}

/// Backoff schedule for client implementations.
///
/// Rate-limit failures wait `rate_limit_multiplier` times longer than other
/// retryable failures. Once `max_attempts` is reached the caller must
/// surface the original error unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub rate_limit_multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            rate_limit_multiplier: 4,
        }
    }
}

impl RetryPolicy {
    /// Never retry.
    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (0-based), or `None` to give up.
    pub fn delay_for(&self, error: &ClientError, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts || !error.is_retryable() {
            return None;
        }

        if let ClientError::RateLimited {
            retry_after_secs: Some(secs),
        } = error
        {
            return Some(Duration::from_secs(*secs));
        }

        let backoff = self.base_delay * 2u32.saturating_pow(attempt);
        if error.is_rate_limited() {
            Some(backoff * self.rate_limit_multiplier)
        } else {
            Some(backoff)
        }
    }
}

/// In-memory client over pre-fetched payloads.
///
/// Every call is counted per endpoint, which lets callers assert how many
/// requests a run issued.
#[derive(Debug, Default)]
pub struct StaticClient {
    files: IndexMap<String, FileResponse>,
    components: IndexMap<String, ComponentsResponse>,
    styles: IndexMap<String, StylesResponse>,
    variables: IndexMap<String, VariablesResponse>,
    failures: IndexMap<Endpoint, ClientError>,
    calls: RefCell<IndexMap<Endpoint, usize>>,
}

impl StaticClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file_key: impl Into<String>, file: FileResponse) -> Self {
        self.files.insert(file_key.into(), file);
        self
    }

    /// Register a file from its JSON payload.
    pub fn with_file_json(self, file_key: impl Into<String>, json: &str) -> serde_json::Result<Self> {
        let file: FileResponse = serde_json::from_str(json)?;
        Ok(self.with_file(file_key, file))
    }

    pub fn with_components(mut self, file_key: impl Into<String>, response: ComponentsResponse) -> Self {
        self.components.insert(file_key.into(), response);
        self
    }

    pub fn with_styles(mut self, file_key: impl Into<String>, response: StylesResponse) -> Self {
        self.styles.insert(file_key.into(), response);
        self
    }

    pub fn with_variables(mut self, file_key: impl Into<String>, response: VariablesResponse) -> Self {
        self.variables.insert(file_key.into(), response);
        self
    }

    /// Make every call to `endpoint` fail with `error`.
    pub fn with_failure(mut self, endpoint: Endpoint, error: ClientError) -> Self {
        self.failures.insert(endpoint, error);
        self
    }

    /// Number of calls made to `endpoint`.
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.calls.borrow().get(&endpoint).copied().unwrap_or(0)
    }

    /// Number of calls made to any endpoint.
    pub fn total_calls(&self) -> usize {
        self.calls.borrow().values().sum()
    }

    fn record(&self, endpoint: Endpoint) -> ClientResult<()> {
        *self.calls.borrow_mut().entry(endpoint).or_insert(0) += 1;
        tracing::trace!(?endpoint, "static client call");
        match self.failures.get(&endpoint) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn file(&self, file_key: &str) -> ClientResult<&FileResponse> {
        self.files.get(file_key).ok_or_else(|| ClientError::NotFound {
            resource: format!("file {}", file_key),
        })
    }
}

impl DocumentClient for StaticClient {
    fn get_file(&self, file_key: &str) -> ClientResult<FileResponse> {
        self.record(Endpoint::File)?;
        self.file(file_key).cloned()
    }

    fn get_file_nodes(&self, file_key: &str, node_ids: &[String]) -> ClientResult<NodesResponse> {
        self.record(Endpoint::FileNodes)?;
        let file = self.file(file_key)?;

        let mut nodes = IndexMap::new();
        for id in node_ids {
            let entry = find_node(&file.document, id).map(|node| NodeEntry {
                document: node.clone(),
                components: file.components.clone(),
                component_sets: file.component_sets.clone(),
                styles: file.styles.clone(),
            });
            nodes.insert(id.clone(), entry);
        }

        Ok(NodesResponse {
            name: file.name.clone(),
            nodes,
        })
    }

    fn get_file_components(&self, file_key: &str) -> ClientResult<ComponentsResponse> {
        self.record(Endpoint::Components)?;
        Ok(self.components.get(file_key).cloned().unwrap_or_default())
    }

    fn get_file_styles(&self, file_key: &str) -> ClientResult<StylesResponse> {
        self.record(Endpoint::Styles)?;
        Ok(self.styles.get(file_key).cloned().unwrap_or_default())
    }

    fn get_file_variables(&self, file_key: &str) -> ClientResult<VariablesResponse> {
        self.record(Endpoint::Variables)?;
        Ok(self.variables.get(file_key).cloned().unwrap_or_default())
    }
}

/// Find a node by id anywhere below `root`.
pub fn find_node<'a>(root: &'a DesignNode, id: &str) -> Option<&'a DesignNode> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter().rev());
    }
    None
}
