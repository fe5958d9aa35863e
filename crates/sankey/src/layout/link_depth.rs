//! Link stacking: orders the bands at each node and assigns their offsets.
//!
//! Bands leaving a node are ordered by the depth of the node they lead to, and
//! bands entering a node by the depth of the node they come from. Offsets then
//! accumulate band thickness, so bands at an endpoint tile without gaps or
//! overlap and do not cross right next to the node.

use log::trace;

use crate::layout::diagram::{LayoutLink, LayoutNode};

/// Sorts every node's link lists and recomputes all link offsets.
///
/// Only link order and offsets change; node fields are read, never written.
pub(super) fn compute(nodes: &mut [LayoutNode], links: &mut [LayoutLink]) {
    let depths: Vec<f32> = nodes.iter().map(|node| node.depth).collect();

    for node in nodes.iter_mut() {
        node.source_links.sort_by(|a, b| {
            let a = depths[links[a.index()].target.index()];
            let b = depths[links[b.index()].target.index()];
            a.total_cmp(&b)
        });
        node.target_links.sort_by(|a, b| {
            let a = depths[links[a.index()].source.index()];
            let b = depths[links[b.index()].source.index()];
            a.total_cmp(&b)
        });
    }

    for node in nodes.iter() {
        let mut offset = 0.0;
        for link in &node.source_links {
            let link = &mut links[link.index()];
            link.source_offset = offset;
            offset += link.thickness;
        }

        let mut offset = 0.0;
        for link in &node.target_links {
            let link = &mut links[link.index()];
            link.target_offset = offset;
            offset += link.thickness;
        }
    }

    trace!(links = links.len(); "Link offsets computed");
}
