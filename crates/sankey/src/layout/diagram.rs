//! The finished layout of a flow graph.
//!
//! A [`SankeyLayout`] owns every derived field: node breadth, depth and extent,
//! and link thickness and offsets. Node and link indices match the positions
//! of the corresponding entries in the input graph.

use log::debug;
use serde::Serialize;

use sankey_core::{
    geometry::{Bounds, CubicCurve, Point, Size},
    identifier::Id,
};

use crate::{
    error::SankeyError,
    layout::{link_depth, path},
    structure::{LinkIndex, NodeIndex},
};

/// A laid out node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub(super) name: Id,
    pub(super) value: f32,
    pub(super) layer: usize,
    pub(super) breadth: f32,
    pub(super) depth: f32,
    pub(super) extent: f32,
    pub(super) source_links: Vec<LinkIndex>,
    pub(super) target_links: Vec<LinkIndex>,
}

impl LayoutNode {
    pub fn name(&self) -> Id {
        self.name
    }

    /// Larger of the node's total inflow and total outflow.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Discrete layer index, 0 for the leftmost layer.
    pub fn layer(&self) -> usize {
        self.layer
    }

    /// Horizontal coordinate of the node's left edge.
    pub fn breadth(&self) -> f32 {
        self.breadth
    }

    /// Vertical coordinate of the node's top edge.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Vertical size of the node.
    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Outgoing links, ordered top to bottom by their target's depth.
    pub fn source_links(&self) -> &[LinkIndex] {
        &self.source_links
    }

    /// Incoming links, ordered top to bottom by their source's depth.
    pub fn target_links(&self) -> &[LinkIndex] {
        &self.target_links
    }
}

/// A laid out link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutLink {
    pub(super) source: NodeIndex,
    pub(super) target: NodeIndex,
    pub(super) value: f32,
    pub(super) thickness: f32,
    pub(super) source_offset: f32,
    pub(super) target_offset: f32,
}

impl LayoutLink {
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn target(&self) -> NodeIndex {
        self.target
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Band width, `value` scaled by the layout's `ky`.
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Offset of the band's top edge below the source node's top edge.
    pub fn source_offset(&self) -> f32 {
        self.source_offset
    }

    /// Offset of the band's top edge below the target node's top edge.
    pub fn target_offset(&self) -> f32 {
        self.target_offset
    }
}

/// Layout of a whole flow graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyLayout {
    nodes: Vec<LayoutNode>,
    links: Vec<LayoutLink>,
    layer_count: usize,
    ky: f32,
    #[serde(skip)]
    node_width: f32,
    #[serde(skip)]
    height: f32,
}

impl SankeyLayout {
    pub(super) fn new(
        nodes: Vec<LayoutNode>,
        links: Vec<LayoutLink>,
        layer_count: usize,
        ky: f32,
        node_width: f32,
        height: f32,
    ) -> Self {
        Self {
            nodes,
            links,
            layer_count,
            ky,
            node_width,
            height,
        }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[LayoutLink] {
        &self.links
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&LayoutNode> {
        self.nodes.get(idx.index())
    }

    pub fn link(&self, idx: LinkIndex) -> Option<&LayoutLink> {
        self.links.get(idx.index())
    }

    /// Number of layers produced by leveling.
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Global scale from flow value to vertical pixels.
    pub fn ky(&self) -> f32 {
        self.ky
    }

    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    /// Node indices grouped by layer, each group ordered top to bottom.
    pub fn layers(&self) -> Vec<Vec<NodeIndex>> {
        let mut layers: Vec<Vec<NodeIndex>> = vec![Vec::new(); self.layer_count];
        for (i, node) in self.nodes.iter().enumerate() {
            layers[node.layer].push(NodeIndex::new(i));
        }
        for layer in &mut layers {
            layer.sort_by(|a, b| {
                self.nodes[a.index()]
                    .depth
                    .total_cmp(&self.nodes[b.index()].depth)
            });
        }
        layers.retain(|layer| !layer.is_empty());
        layers
    }

    /// Rectangle occupied by a node.
    pub fn node_bounds(&self, idx: NodeIndex) -> Option<Bounds> {
        let node = self.node(idx)?;
        Some(
            Point::new(node.breadth, node.depth)
                .to_bounds(Size::new(self.node_width, node.extent)),
        )
    }

    /// Centre line of a link band, from the source's right edge to the
    /// target's left edge.
    ///
    /// `curvature` places the control points as a fraction of the horizontal
    /// span; 0.5 gives the usual S-shaped band.
    pub fn link_path(&self, idx: LinkIndex, curvature: f32) -> Option<CubicCurve> {
        let link = self.link(idx)?;
        Some(path::link_curve(
            &self.nodes[link.source.index()],
            &self.nodes[link.target.index()],
            link,
            self.node_width,
            curvature,
        ))
    }

    /// Moves a node vertically, as an interactive drag does.
    ///
    /// The depth is clamped so the node stays within the canvas. Breadth and
    /// extent are untouched, and so are link offsets until [`relayout`] runs.
    /// Returns the depth actually applied.
    ///
    /// # Errors
    ///
    /// Returns [`SankeyError::UnknownNode`] if `idx` is not a node of this layout.
    ///
    /// [`relayout`]: Self::relayout
    pub fn move_node(&mut self, idx: NodeIndex, depth: f32) -> Result<f32, SankeyError> {
        let height = self.height;
        let node = self
            .nodes
            .get_mut(idx.index())
            .ok_or(SankeyError::UnknownNode(idx.index()))?;
        node.depth = depth.min(height - node.extent).max(0.0);
        debug!(node:% = idx, depth = node.depth; "Node moved");
        Ok(node.depth)
    }

    /// Recomputes link offsets from the current node depths.
    ///
    /// Run after [`move_node`](Self::move_node); breadth, depth and extent of
    /// every node are left as they are.
    pub fn relayout(&mut self) {
        link_depth::compute(&mut self.nodes, &mut self.links);
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn two_node_layout() -> SankeyLayout {
        let nodes = vec![
            LayoutNode {
                name: Id::new("A"),
                value: 10.0,
                layer: 0,
                breadth: 0.0,
                depth: 0.0,
                extent: 100.0,
                source_links: vec![LinkIndex::new(0)],
                target_links: vec![],
            },
            LayoutNode {
                name: Id::new("B"),
                value: 10.0,
                layer: 1,
                breadth: 176.0,
                depth: 50.0,
                extent: 100.0,
                source_links: vec![],
                target_links: vec![LinkIndex::new(0)],
            },
        ];
        let links = vec![LayoutLink {
            source: NodeIndex::new(0),
            target: NodeIndex::new(1),
            value: 10.0,
            thickness: 100.0,
            source_offset: 0.0,
            target_offset: 0.0,
        }];
        SankeyLayout::new(nodes, links, 2, 10.0, 24.0, 200.0)
    }

    #[test]
    fn test_node_bounds() {
        let layout = two_node_layout();
        let bounds = layout.node_bounds(NodeIndex::new(1)).unwrap();

        assert_eq!(bounds.min_x(), 176.0);
        assert_eq!(bounds.min_y(), 50.0);
        assert_eq!(bounds.width(), 24.0);
        assert_eq!(bounds.height(), 100.0);
        assert!(layout.node_bounds(NodeIndex::new(2)).is_none());
    }

    #[test]
    fn test_move_node_clamps_to_canvas() {
        let mut layout = two_node_layout();

        assert_eq!(layout.move_node(NodeIndex::new(0), -30.0).unwrap(), 0.0);
        assert_eq!(layout.move_node(NodeIndex::new(0), 500.0).unwrap(), 100.0);
        assert_eq!(layout.move_node(NodeIndex::new(0), 42.5).unwrap(), 42.5);
        assert_eq!(layout.node(NodeIndex::new(0)).unwrap().depth(), 42.5);
    }

    #[test]
    fn test_move_unknown_node() {
        let mut layout = two_node_layout();
        let err = layout.move_node(NodeIndex::new(9), 0.0).unwrap_err();

        assert!(matches!(err, SankeyError::UnknownNode(9)));
    }

    #[test]
    fn test_link_path_endpoints() {
        let layout = two_node_layout();
        let curve = layout.link_path(LinkIndex::new(0), 0.5).unwrap();

        assert_approx_eq!(f32, curve.start().x(), 24.0);
        assert_approx_eq!(f32, curve.start().y(), 50.0);
        assert_approx_eq!(f32, curve.end().x(), 176.0);
        assert_approx_eq!(f32, curve.end().y(), 100.0);
        assert!(layout.link_path(LinkIndex::new(1), 0.5).is_none());
    }

    #[test]
    fn test_layers_sorted_by_depth() {
        let mut layout = two_node_layout();
        layout.nodes[1].layer = 0;

        layout.move_node(NodeIndex::new(0), 90.0).unwrap();
        assert_eq!(
            layout.layers(),
            vec![vec![NodeIndex::new(1), NodeIndex::new(0)]]
        );
    }
}
