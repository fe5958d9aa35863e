//! Breadth assignment: topological layering and horizontal rescaling.
//!
//! Layering is breadth-first. Every node starts in layer 0; each following
//! layer holds the targets of the previous layer's outgoing links, so a node
//! ends up in the layer given by its longest path from a source. A
//! [`LayeringPolicy`] then moves nodes without links on one side, and the
//! layers are spread evenly over the available width.
//!
//! A cycle would keep its nodes in the queue forever. When leveling has not
//! settled after one pass per node, the links closing each cycle (back links
//! of a depth-first walk in input order) are set aside and leveling runs
//! again on the remaining acyclic graph.

use log::{debug, warn};

use crate::{
    config::{LayeringPolicy, LayoutConfig},
    layout::valuator::ValuedGraph,
    structure::{LinkedGraph, NodeIndex},
};

/// A valued graph whose nodes carry a layer and a horizontal coordinate.
#[derive(Debug, Clone)]
pub(crate) struct LayeredGraph {
    valued: ValuedGraph,
    layers: Vec<usize>,
    layer_count: usize,
    breadths: Vec<f32>,
}

impl LayeredGraph {
    pub(crate) fn valued(&self) -> &ValuedGraph {
        &self.valued
    }

    pub(crate) fn layer(&self, idx: NodeIndex) -> usize {
        self.layers[idx.index()]
    }

    pub(crate) fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Node indices grouped by layer, in ascending layer order.
    ///
    /// Nodes keep their input order within a layer. Empty layers are skipped.
    pub(crate) fn nodes_by_layer(&self) -> Vec<Vec<NodeIndex>> {
        let mut groups: Vec<Vec<NodeIndex>> = vec![Vec::new(); self.layer_count];
        for idx in self.valued.graph().node_indices() {
            groups[self.layer(idx)].push(idx);
        }
        groups.retain(|group| !group.is_empty());
        groups
    }

    pub(crate) fn into_parts(self) -> (ValuedGraph, Vec<usize>, usize, Vec<f32>) {
        (self.valued, self.layers, self.layer_count, self.breadths)
    }
}

/// Assigns every node a layer and a horizontal coordinate.
///
/// With a single layer (for example a graph without links) the rescale is
/// skipped and every node sits at coordinate 0.
pub(crate) fn assign(valued: ValuedGraph, config: &LayoutConfig) -> LayeredGraph {
    let graph = valued.graph();
    let (mut layers, layer_count) = match level(graph, &[]) {
        Leveling::Settled { layers, layer_count } => (layers, layer_count),
        Leveling::Cyclic => {
            let back = back_links(graph);
            warn!(
                back_links = back.iter().filter(|&&is_back| is_back).count();
                "Graph contains a cycle; leveling without the links that close it"
            );
            match level(graph, &back) {
                Leveling::Settled { layers, layer_count } => (layers, layer_count),
                // Without back links the graph is acyclic and always settles.
                Leveling::Cyclic => (vec![0; graph.nodes_count()], 1),
            }
        }
    };

    if config.layering() == LayeringPolicy::MoveSourcesRight {
        move_sources_right(graph, &mut layers);
    }
    move_sinks_right(graph, &mut layers, layer_count);

    let breadths = if layer_count > 1 {
        let kx = (config.width() - config.node_width()) / (layer_count - 1) as f32;
        layers.iter().map(|&layer| layer as f32 * kx).collect()
    } else {
        if graph.nodes_count() > 0 {
            warn!(
                nodes = graph.nodes_count();
                "Degenerate layout: all nodes share a single layer"
            );
        }
        vec![0.0; layers.len()]
    };

    debug!(layer_count = layer_count, policy:? = config.layering(); "Breadths assigned");

    LayeredGraph {
        valued,
        layers,
        layer_count,
        breadths,
    }
}

/// Outcome of breadth-first leveling.
enum Leveling {
    Settled { layers: Vec<usize>, layer_count: usize },
    /// The queue was still non-empty after one pass per node.
    Cyclic,
}

/// Breadth-first leveling over every link not flagged in `skip`.
///
/// `skip` is indexed by link; links past its end are followed.
fn level(graph: &LinkedGraph, skip: &[bool]) -> Leveling {
    let node_count = graph.nodes_count();
    let mut layers = vec![0; node_count];
    let mut remaining: Vec<NodeIndex> = graph.node_indices().collect();
    let mut layer = 0;

    while !remaining.is_empty() {
        if layer == node_count {
            debug!(unplaced = remaining.len(); "Leveling did not settle");
            return Leveling::Cyclic;
        }

        let mut next = Vec::new();
        let mut queued = vec![false; node_count];
        for &idx in &remaining {
            layers[idx.index()] = layer;
            for &link in graph.node(idx).source_links() {
                if skip.get(link.index()).copied().unwrap_or(false) {
                    continue;
                }
                let target = graph.link(link).target();
                if !queued[target.index()] {
                    queued[target.index()] = true;
                    next.push(target);
                }
            }
        }

        remaining = next;
        layer += 1;
    }

    Leveling::Settled {
        layers,
        layer_count: layer,
    }
}

/// Flags every link that closes a cycle.
///
/// Depth-first walk from each unvisited node in input order, following
/// outgoing links in link order. A link into a node still on the walk's path
/// is a back link.
fn back_links(graph: &LinkedGraph) -> Vec<bool> {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        OnPath,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; graph.nodes_count()];
    let mut back = vec![false; graph.links().len()];

    for root in graph.node_indices() {
        if marks[root.index()] != Mark::Unvisited {
            continue;
        }
        marks[root.index()] = Mark::OnPath;
        let mut stack = vec![(root, 0usize)];

        while let Some(&(node, next)) = stack.last() {
            let Some(&link) = graph.node(node).source_links().get(next) else {
                marks[node.index()] = Mark::Done;
                stack.pop();
                continue;
            };

            let top = stack.len() - 1;
            stack[top].1 += 1;

            let target = graph.link(link).target();
            match marks[target.index()] {
                Mark::OnPath => back[link.index()] = true,
                Mark::Unvisited => {
                    marks[target.index()] = Mark::OnPath;
                    stack.push((target, 0));
                }
                Mark::Done => {}
            }
        }
    }

    back
}

/// Moves every node without outgoing links to the last layer.
fn move_sinks_right(graph: &LinkedGraph, layers: &mut [usize], layer_count: usize) {
    let last = layer_count.saturating_sub(1);
    for idx in graph.node_indices() {
        if graph.node(idx).source_links().is_empty() {
            layers[idx.index()] = last;
        }
    }
}

/// Pulls every node without incoming links right, to one layer before its
/// nearest target.
fn move_sources_right(graph: &LinkedGraph, layers: &mut [usize]) {
    for idx in graph.node_indices() {
        let node = graph.node(idx);
        if !node.target_links().is_empty() {
            continue;
        }
        let nearest = node
            .source_links()
            .iter()
            .map(|&link| layers[graph.link(link).target().index()])
            .min();
        if let Some(nearest) = nearest {
            layers[idx.index()] = nearest.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use sankey_core::graph::{LinkSpec, NodeSpec, SankeyGraph};

    use super::*;
    use crate::layout::{linker, valuator};

    fn layered(graph: &SankeyGraph, config: &LayoutConfig) -> LayeredGraph {
        let linked = linker::link(graph).unwrap();
        assign(valuator::compute_node_values(linked), config)
    }

    fn layers_of(layered: &LayeredGraph) -> Vec<usize> {
        layered
            .valued()
            .graph()
            .node_indices()
            .map(|idx| layered.layer(idx))
            .collect()
    }

    #[test]
    fn test_chain_layers() {
        let graph = SankeyGraph::from_names(
            ["A", "B", "C"],
            vec![LinkSpec::new("A", "B", 10.0), LinkSpec::new("B", "C", 10.0)],
        );

        let layered = layered(&graph, &LayoutConfig::default());

        assert_eq!(layers_of(&layered), vec![0, 1, 2]);
        assert_eq!(layered.layer_count(), 3);
    }

    #[test]
    fn test_longest_path_wins() {
        // A -> B -> C -> D and A -> D: D sits after C, not after A.
        let graph = SankeyGraph::from_names(
            ["A", "B", "C", "D"],
            vec![
                LinkSpec::new("A", "B", 1.0),
                LinkSpec::new("B", "C", 1.0),
                LinkSpec::new("C", "D", 1.0),
                LinkSpec::new("A", "D", 1.0),
            ],
        );

        let layered = layered(&graph, &LayoutConfig::default());
        assert_eq!(layers_of(&layered), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_sinks_move_right() {
        // A -> B -> C and A -> E: E is a sink and joins C in the last layer.
        let graph = SankeyGraph::from_names(
            ["A", "B", "C", "E"],
            vec![
                LinkSpec::new("A", "B", 1.0),
                LinkSpec::new("B", "C", 1.0),
                LinkSpec::new("A", "E", 1.0),
            ],
        );

        let layered = layered(&graph, &LayoutConfig::default());
        assert_eq!(layers_of(&layered), vec![0, 1, 2, 2]);
    }

    #[test]
    fn test_isolated_node_is_a_sink() {
        let graph = SankeyGraph::from_names(
            ["A", "B", "Lonely"],
            vec![LinkSpec::new("A", "B", 1.0)],
        );

        let layered = layered(&graph, &LayoutConfig::default());
        assert_eq!(layers_of(&layered), vec![0, 1, 1]);
    }

    #[test]
    fn test_move_sources_right_policy() {
        // A -> B -> C -> D and S -> D: S is pulled right next to D.
        let graph = SankeyGraph::from_names(
            ["A", "B", "C", "D", "S"],
            vec![
                LinkSpec::new("A", "B", 1.0),
                LinkSpec::new("B", "C", 1.0),
                LinkSpec::new("C", "D", 1.0),
                LinkSpec::new("S", "D", 1.0),
            ],
        );

        let sinks = layered(&graph, &LayoutConfig::default());
        assert_eq!(layers_of(&sinks), vec![0, 1, 2, 3, 0]);

        let config = LayoutConfig::default().with_layering(LayeringPolicy::MoveSourcesRight);
        let sources = layered(&graph, &config);
        assert_eq!(layers_of(&sources), vec![0, 1, 2, 3, 2]);
    }

    #[test]
    fn test_rescale_spreads_layers_over_width() {
        let graph = SankeyGraph::from_names(
            ["A", "B", "C"],
            vec![LinkSpec::new("A", "B", 1.0), LinkSpec::new("B", "C", 1.0)],
        );
        let config = LayoutConfig::default()
            .with_size(224.0, 100.0)
            .with_node_width(24.0);

        let layered = layered(&graph, &config);

        assert_approx_eq!(f32, layered.breadths[0], 0.0);
        assert_approx_eq!(f32, layered.breadths[1], 100.0);
        assert_approx_eq!(f32, layered.breadths[2], 200.0);
    }

    #[test]
    fn test_single_layer_skips_rescale() {
        let graph = SankeyGraph::new(vec![NodeSpec::new("A"), NodeSpec::new("B")], vec![]);

        let layered = layered(&graph, &LayoutConfig::default());

        assert_eq!(layered.layer_count(), 1);
        assert_eq!(layers_of(&layered), vec![0, 0]);
        assert_eq!(layered.breadths[0], 0.0);
        assert_eq!(layered.breadths[1], 0.0);
    }

    #[test]
    fn test_empty_graph() {
        let layered = layered(&SankeyGraph::default(), &LayoutConfig::default());

        assert_eq!(layered.layer_count(), 0);
        assert!(layered.nodes_by_layer().is_empty());
    }

    #[test]
    fn test_cycle_terminates() {
        let graph = SankeyGraph::from_names(
            ["A", "B", "C"],
            vec![
                LinkSpec::new("A", "B", 1.0),
                LinkSpec::new("B", "C", 1.0),
                LinkSpec::new("C", "B", 1.0),
            ],
        );

        let layered = layered(&graph, &LayoutConfig::default());

        assert_eq!(layers_of(&layered), vec![0, 1, 2]);
        assert_eq!(layered.layer_count(), 3);
        assert!(layered.breadths[1].is_finite());
    }

    #[test]
    fn test_cycle_keeps_nodes_spread_out() {
        // A -> B -> C -> A closes a cycle; C also feeds the sink D.
        let graph = SankeyGraph::from_names(
            ["A", "B", "C", "D"],
            vec![
                LinkSpec::new("A", "B", 1.0),
                LinkSpec::new("B", "C", 1.0),
                LinkSpec::new("C", "A", 1.0),
                LinkSpec::new("C", "D", 1.0),
            ],
        );
        let config = LayoutConfig::default();

        let layered = layered(&graph, &config);

        assert_eq!(layers_of(&layered), vec![0, 1, 2, 3]);
        assert_eq!(layered.layer_count(), 4);
        assert_approx_eq!(f32, layered.breadths[0], 0.0);
        assert_approx_eq!(f32, layered.breadths[3], config.width() - config.node_width());
    }

    #[test]
    fn test_back_links_flag_only_cycle_closers() {
        let graph = SankeyGraph::from_names(
            ["A", "B", "C", "D"],
            vec![
                LinkSpec::new("A", "B", 1.0),
                LinkSpec::new("B", "C", 1.0),
                LinkSpec::new("C", "A", 1.0),
                LinkSpec::new("A", "D", 1.0),
                LinkSpec::new("D", "D", 1.0),
            ],
        );
        let linked = linker::link(&graph).unwrap();

        assert_eq!(back_links(&linked), vec![false, false, true, false, true]);
    }

    #[test]
    fn test_self_loop_terminates() {
        let graph = SankeyGraph::from_names(["A"], vec![LinkSpec::new("A", "A", 1.0)]);

        let layered = layered(&graph, &LayoutConfig::default());
        assert_eq!(layered.layer_count(), 1);
    }

    #[test]
    fn test_nodes_by_layer_keeps_input_order() {
        let graph = SankeyGraph::from_names(
            ["X", "A", "Y", "B"],
            vec![LinkSpec::new("X", "Y", 1.0), LinkSpec::new("A", "B", 1.0)],
        );

        let layered = layered(&graph, &LayoutConfig::default());
        let groups = layered.nodes_by_layer();

        assert_eq!(
            groups,
            vec![
                vec![NodeIndex::new(0), NodeIndex::new(1)],
                vec![NodeIndex::new(2), NodeIndex::new(3)],
            ]
        );
    }
}
