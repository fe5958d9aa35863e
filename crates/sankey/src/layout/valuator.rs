//! Node valuation: derives each node's magnitude from its links.

use log::debug;

use crate::structure::{LinkedGraph, NodeIndex};

/// A linked graph whose nodes carry a value.
#[derive(Debug, Clone)]
pub(crate) struct ValuedGraph {
    graph: LinkedGraph,
    values: Vec<f32>,
}

impl ValuedGraph {
    pub(crate) fn graph(&self) -> &LinkedGraph {
        &self.graph
    }

    pub(crate) fn value(&self, idx: NodeIndex) -> f32 {
        self.values[idx.index()]
    }

    pub(crate) fn into_parts(self) -> (LinkedGraph, Vec<f32>) {
        (self.graph, self.values)
    }
}

/// Computes `max(Σ outgoing values, Σ incoming values)` for every node.
///
/// A node must be tall enough for whichever side carries more flow. Nodes
/// with no links get value 0.
pub(crate) fn compute_node_values(graph: LinkedGraph) -> ValuedGraph {
    let values: Vec<f32> = graph
        .nodes()
        .iter()
        .map(|node| {
            graph
                .total_value(node.source_links())
                .max(graph.total_value(node.target_links()))
        })
        .collect();

    debug!(
        total_value = values.iter().sum::<f32>();
        "Node values computed"
    );

    ValuedGraph { graph, values }
}

#[cfg(test)]
mod tests {
    use sankey_core::identifier::Id;

    use super::*;

    #[test]
    fn test_value_is_max_of_sides() {
        let mut graph = LinkedGraph::new();
        let a = graph.add_node(Id::new("a"));
        let b = graph.add_node(Id::new("b"));
        let c = graph.add_node(Id::new("c"));
        let d = graph.add_node(Id::new("d"));

        graph.add_link(a, b, 10.0);
        graph.add_link(b, c, 4.0);
        graph.add_link(b, d, 3.0);

        let valued = compute_node_values(graph);

        assert_eq!(valued.value(a), 10.0); // source: outflow only
        assert_eq!(valued.value(b), 10.0); // inflow 10 dominates outflow 7
        assert_eq!(valued.value(c), 4.0); // sink: inflow only
        assert_eq!(valued.value(d), 3.0);
    }

    #[test]
    fn test_outflow_can_dominate() {
        let mut graph = LinkedGraph::new();
        let a = graph.add_node(Id::new("a"));
        let b = graph.add_node(Id::new("b"));
        let c = graph.add_node(Id::new("c"));

        graph.add_link(a, b, 2.0);
        graph.add_link(b, c, 5.0);

        let valued = compute_node_values(graph);
        assert_eq!(valued.value(b), 5.0);
    }

    #[test]
    fn test_isolated_node_has_zero_value() {
        let mut graph = LinkedGraph::new();
        let lonely = graph.add_node(Id::new("lonely"));

        let valued = compute_node_values(graph);
        assert_eq!(valued.value(lonely), 0.0);
    }

    #[test]
    fn test_self_loop_counts_on_both_sides() {
        let mut graph = LinkedGraph::new();
        let a = graph.add_node(Id::new("a"));
        graph.add_link(a, a, 6.0);

        let valued = compute_node_values(graph);
        assert_eq!(valued.value(a), 6.0);
    }
}
