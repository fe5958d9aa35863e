//! Depth solving: vertical placement and sizing of nodes.
//!
//! Nodes are first stacked in input order within their layer and sized with a
//! single global scale `ky`, chosen so that the fullest layer exactly fits the
//! available height. A number of relaxation iterations then pull each node
//! toward the value-weighted centre of its neighbours, alternating between a
//! right-to-left sweep over outgoing links and a left-to-right sweep over
//! incoming links. Every sweep is followed by collision resolution, which
//! restores the per-layer packing.
//!
//! Collision resolution keeps nodes inside the canvas only when the layer fits
//! in the first place. When the configured height is too small for the data,
//! the upward sweep compresses the nodes against each other and may push the
//! top ones above 0; that result is accepted as is.
//!
//! If some layer's padding alone exceeds the height, its candidate scale is
//! negative. `ky` is then clamped to 0 for the whole graph, since it is shared
//! by every node: all extents and thicknesses collapse to zero and only the
//! padding gaps remain. The clamp is reported with a warning.

use log::{debug, trace, warn};

use crate::{
    config::LayoutConfig,
    layout::{
        breadth::LayeredGraph,
        diagram::{LayoutLink, LayoutNode, SankeyLayout},
    },
    structure::{LinkedGraph, LinkedLink, NodeIndex},
};

/// Per-iteration decay of the relaxation weight.
const ALPHA_DECAY: f32 = 0.99;

/// Which links a relaxation sweep follows.
#[derive(Debug, Clone, Copy)]
enum Side {
    /// Toward the targets of outgoing links.
    Outgoing,
    /// Toward the sources of incoming links.
    Incoming,
}

struct DepthSolver<'a> {
    graph: &'a LinkedGraph,
    values: Vec<f32>,
    /// Node indices per layer, re-sorted top to bottom by every collision pass.
    layers: Vec<Vec<NodeIndex>>,
    depths: Vec<f32>,
    extents: Vec<f32>,
    ky: f32,
    padding: f32,
    height: f32,
}

impl<'a> DepthSolver<'a> {
    fn new(layered: &'a LayeredGraph, config: &LayoutConfig) -> Self {
        let valued = layered.valued();
        let graph = valued.graph();
        let node_count = graph.nodes_count();

        Self {
            graph,
            values: graph.node_indices().map(|idx| valued.value(idx)).collect(),
            layers: layered.nodes_by_layer(),
            depths: vec![0.0; node_count],
            extents: vec![0.0; node_count],
            ky: 0.0,
            padding: config.node_padding(),
            height: config.height(),
        }
    }

    /// Picks `ky`, sizes every node and seeds depths with in-layer positions.
    fn initialize(&mut self) {
        let height = self.height;
        let padding = self.padding;
        let values = &self.values;

        // Layers without flow do not constrain the scale.
        let fitted = self
            .layers
            .iter()
            .filter_map(|layer| {
                let total: f32 = layer.iter().map(|idx| values[idx.index()]).sum();
                (total > 0.0).then(|| (height - (layer.len() - 1) as f32 * padding) / total)
            })
            .reduce(f32::min)
            .unwrap_or(0.0);

        if fitted < 0.0 {
            let crowded = self.layers.iter().map(Vec::len).max().unwrap_or(0);
            warn!(
                fitted_ky = fitted,
                height = height,
                padding = padding,
                largest_layer = crowded;
                "Padding alone exceeds the available height; all extents collapse to zero"
            );
        }
        self.ky = fitted.max(0.0);

        for layer in &self.layers {
            for (position, idx) in layer.iter().enumerate() {
                self.depths[idx.index()] = position as f32;
                self.extents[idx.index()] = values[idx.index()] * self.ky;
            }
        }

        debug!(ky = self.ky, layers = self.layers.len(); "Depths initialized");
    }

    fn center(&self, idx: NodeIndex) -> f32 {
        self.depths[idx.index()] + self.extents[idx.index()] / 2.0
    }

    /// Moves every node with outgoing links toward its targets, last layer first.
    fn relax_right_to_left(&mut self, alpha: f32) {
        for layer in (0..self.layers.len()).rev() {
            for position in 0..self.layers[layer].len() {
                let idx = self.layers[layer][position];
                self.relax_node(idx, alpha, Side::Outgoing);
            }
        }
    }

    /// Moves every node with incoming links toward its sources, first layer first.
    fn relax_left_to_right(&mut self, alpha: f32) {
        for layer in 0..self.layers.len() {
            for position in 0..self.layers[layer].len() {
                let idx = self.layers[layer][position];
                self.relax_node(idx, alpha, Side::Incoming);
            }
        }
    }

    /// Shifts a node's centre toward the value-weighted centre of its
    /// neighbours on `side`, scaled by `alpha`.
    ///
    /// Nodes with no links on that side, or links carrying no flow, stay put.
    fn relax_node(&mut self, idx: NodeIndex, alpha: f32, side: Side) {
        let graph = self.graph;
        let node = graph.node(idx);
        let (links, neighbor): (_, fn(&LinkedLink) -> NodeIndex) = match side {
            Side::Outgoing => (node.source_links(), LinkedLink::target),
            Side::Incoming => (node.target_links(), LinkedLink::source),
        };

        let total = graph.total_value(links);
        if total <= 0.0 {
            return;
        }

        let weighted: f32 = links
            .iter()
            .map(|&link| {
                let link = graph.link(link);
                self.center(neighbor(link)) * link.value()
            })
            .sum();

        let shift = (weighted / total - self.center(idx)) * alpha;
        self.depths[idx.index()] += shift;
    }

    /// Removes vertical overlap within every layer.
    ///
    /// Each layer is sorted by depth and swept top to bottom, pushing nodes
    /// down to clear the node above by the padding. If the last node then ends
    /// below the canvas it is pushed back up to the boundary, and a bottom to
    /// top sweep pushes the others up to clear the node below.
    fn resolve_collisions(&mut self) {
        let Self {
            layers,
            depths,
            extents,
            padding,
            height,
            ..
        } = self;
        let (padding, height) = (*padding, *height);

        for layer in layers.iter_mut() {
            layer.sort_by(|a, b| depths[a.index()].total_cmp(&depths[b.index()]));

            let mut y0 = 0.0;
            for idx in layer.iter() {
                let i = idx.index();
                let dy = y0 - depths[i];
                if dy > 0.0 {
                    depths[i] += dy;
                }
                y0 = depths[i] + extents[i] + padding;
            }

            let Some(last) = layer.last() else {
                continue;
            };

            let dy = y0 - padding - height;
            if dy > 0.0 {
                depths[last.index()] -= dy;
                y0 = depths[last.index()];

                for idx in layer.iter().rev().skip(1) {
                    let i = idx.index();
                    let dy = depths[i] + extents[i] + padding - y0;
                    if dy > 0.0 {
                        depths[i] -= dy;
                    }
                    y0 = depths[i];
                }
            }
        }
    }
}

/// Assigns depth and extent to every node and thickness to every link.
///
/// Link offsets are left at zero; they are filled in by the link stacking
/// pass.
pub(super) fn solve(layered: LayeredGraph, config: &LayoutConfig) -> SankeyLayout {
    let (ky, depths, extents) = {
        let mut solver = DepthSolver::new(&layered, config);
        solver.initialize();
        solver.resolve_collisions();

        let mut alpha = 1.0;
        for iteration in 0..config.iterations() {
            alpha *= ALPHA_DECAY;
            solver.relax_right_to_left(alpha);
            solver.resolve_collisions();
            solver.relax_left_to_right(alpha);
            solver.resolve_collisions();
            trace!(iteration = iteration, alpha = alpha; "Relaxation iteration done");
        }

        (solver.ky, solver.depths, solver.extents)
    };

    let (valued, layers, layer_count, breadths) = layered.into_parts();
    let (graph, values) = valued.into_parts();
    let (nodes, links) = graph.into_parts();

    let nodes = nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| {
            let name = node.name();
            let (source_links, target_links) = node.into_link_lists();
            LayoutNode {
                name,
                value: values[i],
                layer: layers[i],
                breadth: breadths[i],
                depth: depths[i],
                extent: extents[i],
                source_links,
                target_links,
            }
        })
        .collect();

    let links = links
        .into_iter()
        .map(|link| LayoutLink {
            source: link.source(),
            target: link.target(),
            value: link.value(),
            thickness: link.value() * ky,
            source_offset: 0.0,
            target_offset: 0.0,
        })
        .collect();

    debug!(iterations = config.iterations(); "Depths solved");

    SankeyLayout::new(
        nodes,
        links,
        layer_count,
        ky,
        config.node_width(),
        config.height(),
    )
}
