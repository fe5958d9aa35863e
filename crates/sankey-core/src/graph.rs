//! Input model of a flow graph.
//!
//! A [`SankeyGraph`] is what callers hand to the layout engine: a flat list of
//! nodes and a flat list of value-weighted links. Link endpoints are given as a
//! [`NodeRef`], which is either a position in the node list or a node name.
//! Resolution of those references happens once, when the graph is linked.
//!
//! The model deserializes from the conventional JSON shape:
//!
//! ```
//! # use sankey_core::graph::{NodeRef, SankeyGraph};
//! let json = r#"{
//!     "nodes": [{ "name": "Coal" }, { "name": "Electricity" }],
//!     "links": [{ "source": 0, "target": "Electricity", "value": 12.5 }]
//! }"#;
//! let graph: SankeyGraph = serde_json::from_str(json).unwrap();
//! assert_eq!(graph.nodes().len(), 2);
//! assert_eq!(graph.links()[0].source(), &NodeRef::Index(0));
//! assert_eq!(graph.links()[0].target(), &NodeRef::Name("Electricity".into()));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// Reference from a link to one of its endpoint nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    /// Position of the node in [`SankeyGraph::nodes`].
    Index(usize),
    /// Name of the node. Resolves to the first node carrying it.
    Name(Id),
}

impl From<usize> for NodeRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for NodeRef {
    fn from(name: &str) -> Self {
        Self::Name(Id::new(name))
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Index(index) => write!(f, "#{index}"),
            NodeRef::Name(name) => write!(f, "\"{name}\""),
        }
    }
}

/// A node as supplied by the caller.
///
/// Only the identity is supplied; value, position and size are derived by the
/// layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<Id>,
}

impl NodeSpec {
    /// Creates a named node.
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(Id::new(name)),
        }
    }

    /// Creates a node without a name. It can only be referenced by index.
    pub fn anonymous() -> Self {
        Self { name: None }
    }

    pub fn name(&self) -> Option<Id> {
        self.name
    }
}

/// A value-weighted, directed link as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    source: NodeRef,
    target: NodeRef,
    value: f32,
}

impl LinkSpec {
    /// Creates a link carrying `value` units of flow from `source` to `target`.
    ///
    /// # Arguments
    ///
    /// * `source` - Node the flow leaves, by index or name.
    /// * `target` - Node the flow enters, by index or name.
    /// * `value` - Non-negative magnitude of the flow.
    pub fn new(source: impl Into<NodeRef>, target: impl Into<NodeRef>, value: f32) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }

    pub fn source(&self) -> &NodeRef {
        &self.source
    }

    pub fn target(&self) -> &NodeRef {
        &self.target
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

/// A flat flow graph: nodes plus links between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SankeyGraph {
    #[serde(default)]
    nodes: Vec<NodeSpec>,
    #[serde(default)]
    links: Vec<LinkSpec>,
}

impl SankeyGraph {
    pub fn new(nodes: Vec<NodeSpec>, links: Vec<LinkSpec>) -> Self {
        Self { nodes, links }
    }

    /// Builds a graph of named nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sankey_core::graph::{LinkSpec, SankeyGraph};
    /// let graph = SankeyGraph::from_names(
    ///     ["A", "B"],
    ///     vec![LinkSpec::new("A", "B", 10.0)],
    /// );
    /// assert_eq!(graph.nodes().len(), 2);
    /// ```
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>, links: Vec<LinkSpec>) -> Self {
        Self {
            nodes: names.into_iter().map(NodeSpec::new).collect(),
            links,
        }
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn links(&self) -> &[LinkSpec] {
        &self.links
    }

    /// Appends a node and returns its index.
    pub fn add_node(&mut self, node: NodeSpec) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Appends a link. Endpoints are not checked until the graph is laid out.
    pub fn add_link(&mut self, link: LinkSpec) {
        self.links.push(link);
    }
}
