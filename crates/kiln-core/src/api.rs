//! Wire types returned by the design API.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::node::DesignNode;

/// Kind of a published style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StyleType {
    Fill,
    Text,
    Effect,
    Grid,
    #[serde(other)]
    Other,
}

/// Component metadata embedded in a file payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMeta {
    #[serde(default)]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub component_set_id: Option<String>,
}

/// Component-set metadata embedded in a file payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSetMeta {
    #[serde(default)]
    pub key: String,
    pub name: String,
}

/// Style metadata embedded in a file payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMeta {
    #[serde(default)]
    pub key: String,
    pub name: String,
    pub style_type: StyleType,
}

/// Response of the file endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    #[serde(default)]
    pub name: String,
    pub document: DesignNode,
    #[serde(default)]
    pub components: IndexMap<String, ComponentMeta>,
    #[serde(default)]
    pub component_sets: IndexMap<String, ComponentSetMeta>,
    #[serde(default)]
    pub styles: IndexMap<String, StyleMeta>,
}

/// One requested subtree of the nodes endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeEntry {
    pub document: DesignNode,
    #[serde(default)]
    pub components: IndexMap<String, ComponentMeta>,
    #[serde(default)]
    pub component_sets: IndexMap<String, ComponentSetMeta>,
    #[serde(default)]
    pub styles: IndexMap<String, StyleMeta>,
}

/// Response of the nodes endpoint. Unknown ids map to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodesResponse {
    #[serde(default)]
    pub name: String,
    pub nodes: IndexMap<String, Option<NodeEntry>>,
}

/// Component set that contains a published component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainingStateGroup {
    pub name: String,
    pub node_id: Option<String>,
}

/// Frame a published component lives in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainingFrame {
    pub name: Option<String>,
    pub node_id: Option<String>,
    pub page_name: Option<String>,
    pub containing_state_group: Option<ContainingStateGroup>,
}

/// A published library component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedComponent {
    #[serde(default)]
    pub key: String,
    pub node_id: String,
    pub name: String,
    #[serde(default)]
    pub containing_frame: Option<ContainingFrame>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentsMeta {
    #[serde(default)]
    pub components: Vec<PublishedComponent>,
}

/// Response of the file-components endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentsResponse {
    #[serde(default)]
    pub meta: ComponentsMeta,
}

/// A published library style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedStyle {
    #[serde(default)]
    pub key: String,
    pub node_id: String,
    pub name: String,
    pub style_type: StyleType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StylesMeta {
    #[serde(default)]
    pub styles: Vec<PublishedStyle>,
}

/// Response of the file-styles endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StylesResponse {
    #[serde(default)]
    pub meta: StylesMeta,
}

/// Value type of a design variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableType {
    Boolean,
    Float,
    String,
    Color,
    #[serde(other)]
    Other,
}

/// A design variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub variable_collection_id: String,
    pub resolved_type: VariableType,
    #[serde(default)]
    pub remote: bool,
}

/// A named collection of variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesMeta {
    #[serde(default)]
    pub variables: IndexMap<String, Variable>,
    #[serde(default)]
    pub variable_collections: IndexMap<String, VariableCollection>,
}

/// Response of the local-variables endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariablesResponse {
    #[serde(default)]
    pub meta: VariablesMeta,
}
