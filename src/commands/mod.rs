//! Command implementations for the doxdepends CLI
//!
//! doxdepends has a single command: read the XML, write the graph and
//! optionally report cycles.

pub mod graph;

use miette::Result;

use crate::cli::Cli;

/// Execute a command based on CLI input
pub fn execute_command(cli: Cli) -> Result<()> {
    graph::execute_graph_command(cli)
}
