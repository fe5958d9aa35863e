//! Geometry of link bands.

use sankey_core::geometry::{CubicCurve, Point};

use crate::layout::diagram::{LayoutLink, LayoutNode};

/// Centre line of the band for `link` running from `source` to `target`.
///
/// The band leaves the source's right edge and enters the target's left edge
/// horizontally; both control points share the endpoint heights and sit at
/// `curvature` and `1 - curvature` of the horizontal span.
pub(super) fn link_curve(
    source: &LayoutNode,
    target: &LayoutNode,
    link: &LayoutLink,
    node_width: f32,
    curvature: f32,
) -> CubicCurve {
    let half = link.thickness / 2.0;
    let start = Point::new(
        source.breadth + node_width,
        source.depth + link.source_offset + half,
    );
    let end = Point::new(target.breadth, target.depth + link.target_offset + half);

    let x2 = start.lerp(end, curvature).x();
    let x3 = start.lerp(end, 1.0 - curvature).x();

    CubicCurve::new(
        start,
        Point::new(x2, start.y()),
        Point::new(x3, end.y()),
        end,
    )
}
