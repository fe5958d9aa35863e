//! Command-line argument definitions for the Sankey CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity, and per-run layout overrides.

use clap::Parser;

/// Command-line arguments for the Sankey layout tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph (JSON)
    #[arg(help = "Path to the input graph file")]
    pub input: String,

    /// Path to the output layout file (JSON)
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Override the number of relaxation iterations
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Override the available width
    #[arg(long)]
    pub width: Option<f32>,

    /// Override the available height
    #[arg(long)]
    pub height: Option<f32>,
}
