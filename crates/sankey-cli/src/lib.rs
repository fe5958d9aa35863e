//! CLI logic for the Sankey layout tool.
//!
//! Reads a flow graph from JSON, lays it out and writes the annotated graph
//! back as JSON.

pub mod error_adapter;

mod args;
mod config;
mod export;

pub use args::Args;

use std::{fs, io};

use log::info;

use sankey::{SankeyBuilder, SankeyError, graph::SankeyGraph};

use export::LayoutDocument;

/// Run the Sankey CLI application
///
/// This function reads the input graph, lays it out with the loaded
/// configuration and writes the layout to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SankeyError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input JSON
/// - Links referring to missing nodes
pub fn run(args: &Args) -> Result<(), SankeyError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = config::apply_overrides(app_config, args);

    let source = fs::read_to_string(&args.input)?;
    let graph: SankeyGraph = serde_json::from_str(&source).map_err(io::Error::from)?;

    let builder = SankeyBuilder::new(app_config);
    let layout = builder.layout(&graph)?;
    let paths = builder.link_paths(&layout);

    LayoutDocument::new(&layout, &paths).write_to(&args.output)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
