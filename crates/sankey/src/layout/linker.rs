//! Graph linking: resolves link endpoints and builds per-node link lists.

use std::collections::{HashMap, hash_map::Entry};

use log::{debug, trace};

use sankey_core::{
    graph::{NodeRef, SankeyGraph},
    identifier::Id,
};

use crate::{
    error::SankeyError,
    structure::{LinkedGraph, NodeIndex},
};

/// Resolves every link endpoint of `graph` to a node index and records, for
/// each node, its outgoing and incoming links in link-collection order.
///
/// Nodes without a name are given an anonymous identifier derived from their
/// position. Named references resolve to the first node carrying the name.
///
/// # Errors
///
/// Returns [`SankeyError::Construction`] if an index endpoint is out of
/// bounds, or [`SankeyError::UnknownNodeName`] if a named endpoint matches no
/// node. Nothing else is validated: self-loops and duplicate links are kept.
pub(crate) fn link(graph: &SankeyGraph) -> Result<LinkedGraph, SankeyError> {
    let mut linked = LinkedGraph::new();
    let mut by_name: HashMap<Id, NodeIndex> = HashMap::new();

    for (position, spec) in graph.nodes().iter().enumerate() {
        let name = spec.name().unwrap_or_else(|| Id::from_anonymous(position));
        let idx = linked.add_node(name);
        if let Entry::Vacant(entry) = by_name.entry(name) {
            entry.insert(idx);
        } else {
            debug!(name:% = name, node = position; "Duplicate node name, references resolve to the first");
        }
    }

    let node_count = linked.nodes_count();
    let resolve = |link: usize, node_ref: &NodeRef| -> Result<NodeIndex, SankeyError> {
        match node_ref {
            NodeRef::Index(index) if *index < node_count => Ok(NodeIndex::new(*index)),
            NodeRef::Index(index) => Err(SankeyError::Construction {
                link,
                index: *index,
                node_count,
            }),
            NodeRef::Name(name) => by_name
                .get(name)
                .copied()
                .ok_or(SankeyError::UnknownNodeName { link, name: *name }),
        }
    };

    // All endpoints resolve before the first link is added.
    let endpoints = graph
        .links()
        .iter()
        .enumerate()
        .map(|(idx, spec)| Ok((resolve(idx, spec.source())?, resolve(idx, spec.target())?)))
        .collect::<Result<Vec<_>, SankeyError>>()?;

    for ((source, target), spec) in endpoints.into_iter().zip(graph.links()) {
        let idx = linked.add_link(source, target, spec.value());
        trace!(link:% = idx, source:% = source, target:% = target, value = spec.value(); "Linked");
    }

    debug!(nodes = node_count, links = linked.links().len(); "Graph linked");

    Ok(linked)
}

#[cfg(test)]
mod tests {
    use sankey_core::graph::{LinkSpec, NodeSpec};

    use super::*;
    use crate::structure::LinkIndex;

    #[test]
    fn test_resolves_index_endpoints() {
        let graph = SankeyGraph::new(
            vec![NodeSpec::new("A"), NodeSpec::new("B")],
            vec![LinkSpec::new(0usize, 1usize, 5.0)],
        );

        let linked = link(&graph).unwrap();
        let l = linked.link(LinkIndex::new(0));

        assert_eq!(l.source(), NodeIndex::new(0));
        assert_eq!(l.target(), NodeIndex::new(1));
        assert_eq!(l.value(), 5.0);
    }

    #[test]
    fn test_resolves_named_endpoints() {
        let graph = SankeyGraph::from_names(
            ["Coal", "Grid", "Homes"],
            vec![LinkSpec::new("Coal", "Grid", 3.0), LinkSpec::new(1usize, "Homes", 2.0)],
        );

        let linked = link(&graph).unwrap();

        assert_eq!(linked.link(LinkIndex::new(0)).source(), NodeIndex::new(0));
        assert_eq!(linked.link(LinkIndex::new(0)).target(), NodeIndex::new(1));
        assert_eq!(linked.link(LinkIndex::new(1)).target(), NodeIndex::new(2));
        assert_eq!(linked.node(NodeIndex::new(1)).name(), "Grid");
    }

    #[test]
    fn test_link_lists_follow_link_order() {
        let graph = SankeyGraph::from_names(
            ["A", "B", "C"],
            vec![
                LinkSpec::new("A", "C", 1.0),
                LinkSpec::new("B", "C", 1.0),
                LinkSpec::new("A", "B", 1.0),
            ],
        );

        let linked = link(&graph).unwrap();
        let a = linked.node(NodeIndex::new(0));
        let c = linked.node(NodeIndex::new(2));

        assert_eq!(a.source_links(), &[LinkIndex::new(0), LinkIndex::new(2)]);
        assert_eq!(c.target_links(), &[LinkIndex::new(0), LinkIndex::new(1)]);
    }

    #[test]
    fn test_out_of_range_index_is_construction_error() {
        let graph = SankeyGraph::new(
            vec![NodeSpec::new("A"), NodeSpec::new("B")],
            vec![LinkSpec::new(0usize, 1usize, 1.0), LinkSpec::new(1usize, 2usize, 1.0)],
        );

        let err = link(&graph).unwrap_err();

        assert!(matches!(
            err,
            SankeyError::Construction {
                link: 1,
                index: 2,
                node_count: 2
            }
        ));
    }

    #[test]
    fn test_unknown_name_is_construction_error() {
        let graph = SankeyGraph::from_names(["A"], vec![LinkSpec::new("Ghost", "A", 1.0)]);

        let err = link(&graph).unwrap_err();

        assert!(err.is_construction_error());
        assert!(matches!(err, SankeyError::UnknownNodeName { link: 0, .. }));
    }

    #[test]
    fn test_self_loops_and_duplicates_are_kept() {
        let graph = SankeyGraph::from_names(
            ["A", "B"],
            vec![
                LinkSpec::new("A", "A", 1.0),
                LinkSpec::new("A", "B", 1.0),
                LinkSpec::new("A", "B", 2.0),
            ],
        );

        let linked = link(&graph).unwrap();

        assert_eq!(linked.links().len(), 3);
        assert_eq!(linked.node(NodeIndex::new(0)).source_links().len(), 3);
        assert_eq!(linked.node(NodeIndex::new(0)).target_links().len(), 1);
    }

    #[test]
    fn test_duplicate_names_resolve_to_first() {
        let graph = SankeyGraph::from_names(
            ["Dup", "Other", "Dup"],
            vec![LinkSpec::new("Other", "Dup", 1.0)],
        );

        let linked = link(&graph).unwrap();

        assert_eq!(linked.link(LinkIndex::new(0)).target(), NodeIndex::new(0));
    }

    #[test]
    fn test_anonymous_nodes_get_positional_names() {
        let graph = SankeyGraph::new(
            vec![NodeSpec::anonymous(), NodeSpec::anonymous()],
            vec![LinkSpec::new(0usize, 1usize, 1.0)],
        );

        let linked = link(&graph).unwrap();

        assert_eq!(linked.node(NodeIndex::new(1)).name(), "__1");
    }
}
