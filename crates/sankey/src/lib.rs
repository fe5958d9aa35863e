//! Sankey - A layout engine for flow diagrams.
//!
//! Given nodes and value-weighted links between them, computes where every
//! node sits and how tall it is, and how the link bands stack at each node,
//! so that band thickness is proportional to flow and nothing overlaps.
//! Rendering is left to the caller; [`SankeyLayout::link_path`] provides the
//! band geometry a renderer needs.

pub mod config;

mod error;
mod layout;
mod structure;

pub use sankey_core::{geometry, graph, identifier};

pub use error::SankeyError;
pub use layout::{LayoutLink, LayoutNode, SankeyLayout};
pub use structure::{LinkIndex, NodeIndex};

use log::{debug, info, trace};

use config::AppConfig;
use geometry::CubicCurve;
use graph::SankeyGraph;

/// Builder for laying out flow graphs.
///
/// # Examples
///
/// ```rust
/// use sankey::{
///     SankeyBuilder,
///     config::AppConfig,
///     graph::{LinkSpec, SankeyGraph},
/// };
///
/// let graph = SankeyGraph::from_names(
///     ["Coal", "Power", "Homes"],
///     vec![
///         LinkSpec::new("Coal", "Power", 40.0),
///         LinkSpec::new("Power", "Homes", 25.0),
///     ],
/// );
///
/// let builder = SankeyBuilder::new(AppConfig::default());
/// let layout = builder.layout(&graph).expect("Failed to lay out");
///
/// assert_eq!(layout.layer_count(), 3);
/// ```
#[derive(Default)]
pub struct SankeyBuilder {
    config: AppConfig,
}

impl SankeyBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and link settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lay out a flow graph.
    ///
    /// The graph is only read. The returned layout owns every derived value
    /// and keeps node and link indices equal to their input positions.
    ///
    /// # Errors
    ///
    /// Returns [`SankeyError::Construction`] if a link refers to a node index
    /// that does not exist, or [`SankeyError::UnknownNodeName`] if it refers
    /// to a name no node carries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sankey::{SankeyBuilder, graph::{LinkSpec, SankeyGraph}};
    ///
    /// let graph = SankeyGraph::from_names(["A", "B"], vec![LinkSpec::new(0usize, 5usize, 1.0)]);
    /// let err = SankeyBuilder::default().layout(&graph).unwrap_err();
    ///
    /// assert!(err.is_construction_error());
    /// ```
    pub fn layout(&self, graph: &SankeyGraph) -> Result<SankeyLayout, SankeyError> {
        info!(
            nodes = graph.nodes().len(),
            links = graph.links().len();
            "Laying out graph"
        );

        let layout = layout::Engine::new(self.config.layout()).calculate(graph)?;

        debug!(layer_count = layout.layer_count(); "Graph laid out successfully");
        trace!(layout:?; "Computed layout");

        Ok(layout)
    }

    /// Band centre lines for every link of `layout`, in link order.
    ///
    /// Uses the configured link curvature.
    pub fn link_paths(&self, layout: &SankeyLayout) -> Vec<CubicCurve> {
        let curvature = self.config.link().curvature();
        (0..layout.links().len())
            .filter_map(|i| layout.link_path(LinkIndex::new(i), curvature))
            .collect()
    }
}
