//! Low-level graph data structures and primitives.
//!
//! This module provides the arena that every layout stage walks: nodes and
//! links stored in flat vectors and addressed by index, with each node
//! carrying the indices of the links that leave it and the links that enter
//! it. Indices are positions in the caller's input, so layout output can be
//! matched back to the input graph directly.
//!
//! # Architecture
//!
//! - [`NodeIndex`], [`LinkIndex`]: Type-safe indices into the arena
//! - [`LinkedNode`]: A node with its outgoing (`source_links`) and incoming
//!   (`target_links`) link lists
//! - [`LinkedLink`]: A link with both endpoints resolved to node indices
//! - [`LinkedGraph`]: The arena itself
//!
//! The graph is directed and allows self-loops and multiple links between the
//! same pair of nodes.

use std::fmt;

use serde::Serialize;

use sankey_core::identifier::Id;

/// Type-safe index of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe index of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LinkIndex(usize);

impl LinkIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LinkIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node together with the links touching it.
#[derive(Debug, Clone)]
pub(crate) struct LinkedNode {
    name: Id,
    source_links: Vec<LinkIndex>,
    target_links: Vec<LinkIndex>,
}

impl LinkedNode {
    pub(crate) fn new(name: Id) -> Self {
        Self {
            name,
            source_links: Vec::new(),
            target_links: Vec::new(),
        }
    }

    pub(crate) fn name(&self) -> Id {
        self.name
    }

    /// Links for which this node is the source, in link-collection order.
    pub(crate) fn source_links(&self) -> &[LinkIndex] {
        &self.source_links
    }

    /// Links for which this node is the target, in link-collection order.
    pub(crate) fn target_links(&self) -> &[LinkIndex] {
        &self.target_links
    }

    pub(crate) fn into_link_lists(self) -> (Vec<LinkIndex>, Vec<LinkIndex>) {
        (self.source_links, self.target_links)
    }
}

/// A directed link with both endpoints resolved.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LinkedLink {
    source: NodeIndex,
    target: NodeIndex,
    value: f32,
}

impl LinkedLink {
    pub(crate) fn source(&self) -> NodeIndex {
        self.source
    }

    pub(crate) fn target(&self) -> NodeIndex {
        self.target
    }

    pub(crate) fn value(&self) -> f32 {
        self.value
    }
}

/// Flat arena of resolved nodes and links.
#[derive(Debug, Clone, Default)]
pub(crate) struct LinkedGraph {
    nodes: Vec<LinkedNode>,
    links: Vec<LinkedLink>,
}

impl LinkedGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its index.
    pub(crate) fn add_node(&mut self, name: Id) -> NodeIndex {
        self.nodes.push(LinkedNode::new(name));
        NodeIndex(self.nodes.len() - 1)
    }

    /// Adds a directed link between two existing nodes.
    ///
    /// The link is appended to the source's outgoing list and the target's
    /// incoming list.
    ///
    /// # Panics
    /// Panics in debug mode if either endpoint does not exist. Callers resolve
    /// endpoints before adding links, so this only catches internal bugs.
    pub(crate) fn add_link(&mut self, source: NodeIndex, target: NodeIndex, value: f32) -> LinkIndex {
        debug_assert!(
            source.0 < self.nodes.len(),
            "Adding link: source node {source} does not exist"
        );
        debug_assert!(
            target.0 < self.nodes.len(),
            "Adding link: target node {target} does not exist"
        );

        self.links.push(LinkedLink {
            source,
            target,
            value,
        });

        let idx = LinkIndex(self.links.len() - 1);
        self.nodes[source.0].source_links.push(idx);
        self.nodes[target.0].target_links.push(idx);
        idx
    }

    pub(crate) fn node(&self, idx: NodeIndex) -> &LinkedNode {
        &self.nodes[idx.0]
    }

    pub(crate) fn link(&self, idx: LinkIndex) -> &LinkedLink {
        &self.links[idx.0]
    }

    pub(crate) fn nodes(&self) -> &[LinkedNode] {
        &self.nodes
    }

    pub(crate) fn links(&self) -> &[LinkedLink] {
        &self.links
    }

    pub(crate) fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns an iterator over every node index in insertion order.
    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + use<> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    /// Sum of the values of the given links.
    pub(crate) fn total_value(&self, links: &[LinkIndex]) -> f32 {
        links.iter().map(|&idx| self.link(idx).value).sum()
    }

    pub(crate) fn into_parts(self) -> (Vec<LinkedNode>, Vec<LinkedLink>) {
        (self.nodes, self.links)
    }
}
