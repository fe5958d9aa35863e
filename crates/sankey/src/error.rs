//! Error types for Sankey layout operations.
//!
//! This module provides the main error type [`SankeyError`] which wraps
//! the error conditions that can occur while laying out a flow graph.
//!
//! Only malformed input is an error. A graph that collapses to a single layer
//! is laid out normally (and logged), and a canvas too small for the data is
//! accepted: collision resolution compresses the nodes against each other.

use std::io;

use thiserror::Error;

use sankey_core::identifier::Id;

/// The main error type for Sankey operations.
#[derive(Debug, Error)]
pub enum SankeyError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A link endpoint index is outside the node collection.
    #[error(
        "Construction error: link {link} refers to node {index}, but the graph has {node_count} nodes"
    )]
    Construction {
        link: usize,
        index: usize,
        node_count: usize,
    },

    /// A link endpoint names a node that does not exist.
    #[error("Construction error: link {link} refers to unknown node \"{name}\"")]
    UnknownNodeName { link: usize, name: Id },

    #[error("Unknown node index: {0}")]
    UnknownNode(usize),
}

impl SankeyError {
    /// Returns true for errors raised while resolving the input graph.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::Construction { .. } | Self::UnknownNodeName { .. }
        )
    }
}
