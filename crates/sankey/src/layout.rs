//! Layout engine for flow graphs.
//!
//! Turns an input [`SankeyGraph`] into a [`SankeyLayout`] with every node
//! placed and sized and every link band stacked.
//!
//! # Pipeline
//!
//! ```text
//! SankeyGraph
//!     ↓ linker       endpoint resolution, per-node link lists
//! LinkedGraph
//!     ↓ valuator     node values
//! ValuedGraph
//!     ↓ breadth      layers and horizontal coordinates
//! LayeredGraph
//!     ↓ depth        vertical coordinates, extents, thickness
//!     ↓ link_depth   link ordering and offsets
//! SankeyLayout
//! ```
//!
//! Each stage takes the previous one by value. Only the last stage runs
//! again on [`SankeyLayout::relayout`].

mod breadth;
mod depth;
mod diagram;
mod link_depth;
mod linker;
mod path;
mod valuator;

pub use diagram::{LayoutLink, LayoutNode, SankeyLayout};

use log::info;

use sankey_core::graph::SankeyGraph;

use crate::{config::LayoutConfig, error::SankeyError};

/// Runs the layout pipeline with a fixed configuration.
pub(crate) struct Engine<'a> {
    config: &'a LayoutConfig,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Lays out `graph`.
    ///
    /// # Errors
    ///
    /// Returns a construction error if a link endpoint does not resolve to a
    /// node. No layout is produced in that case.
    pub(crate) fn calculate(&self, graph: &SankeyGraph) -> Result<SankeyLayout, SankeyError> {
        let linked = linker::link(graph)?;
        let valued = valuator::compute_node_values(linked);

        let layered = breadth::assign(valued, self.config);
        info!(layer_count = layered.layer_count(); "Layers assigned");

        let mut layout = depth::solve(layered, self.config);
        layout.relayout();

        info!(
            nodes = layout.nodes().len(),
            links = layout.links().len(),
            ky = layout.ky();
            "Layout calculated"
        );
        Ok(layout)
    }
}
