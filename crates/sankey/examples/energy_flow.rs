//! Example: Laying out an energy flow graph
//!
//! Builds a small graph of energy sources, conversion and end uses, lays it
//! out, and prints node rectangles and link band paths.

use sankey::{
    NodeIndex, SankeyBuilder,
    config::{AppConfig, LayoutConfig, LinkConfig},
    graph::{LinkSpec, SankeyGraph},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let graph = SankeyGraph::from_names(
        [
            "Coal",
            "Gas",
            "Solar",
            "Electricity",
            "Homes",
            "Industry",
            "Losses",
        ],
        vec![
            LinkSpec::new("Coal", "Electricity", 40.0),
            LinkSpec::new("Gas", "Electricity", 25.0),
            LinkSpec::new("Gas", "Homes", 15.0),
            LinkSpec::new("Solar", "Electricity", 10.0),
            LinkSpec::new("Electricity", "Homes", 30.0),
            LinkSpec::new("Electricity", "Industry", 25.0),
            LinkSpec::new("Electricity", "Losses", 20.0),
        ],
    );

    let layout_config = LayoutConfig::default()
        .with_size(800.0, 400.0)
        .with_node_padding(12.0);
    let builder = SankeyBuilder::new(AppConfig::new(layout_config, LinkConfig::default()));

    let layout = builder.layout(&graph)?;

    println!("Layers: {}, ky: {:.3}\n", layout.layer_count(), layout.ky());

    println!("Nodes:");
    for (i, node) in layout.nodes().iter().enumerate() {
        if let Some(bounds) = layout.node_bounds(NodeIndex::new(i)) {
            println!(
                "  {:<12} value {:>5.1}  x {:>6.1}  y {:>6.1}  h {:>6.1}",
                node.name().to_string(),
                node.value(),
                bounds.min_x(),
                bounds.min_y(),
                bounds.height()
            );
        }
    }

    println!("\nLinks:");
    for (link, path) in layout.links().iter().zip(builder.link_paths(&layout)) {
        let source = layout.nodes()[link.source().index()].name();
        let target = layout.nodes()[link.target().index()].name();
        println!(
            "  {source} -> {target} ({:.1}px): {}",
            link.thickness(),
            path.to_path_data()
        );
    }

    Ok(())
}
