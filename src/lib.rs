//! # doxdepends - Class Dependency Graphs from Doxygen XML
//!
//! doxdepends reads the XML output of Doxygen and draws the dependencies
//! between the documented classes, structs and interfaces of a project as a
//! Graphviz DOT file, ready to be embedded back into the documentation with
//! `\dotfile`. Classes that belong to a Doxygen group are drawn inside one
//! cluster per group, and dependency cycles can be reported separately.
//!
//! ## Main Components
//!
//! - **Catalog**: Reads `index.xml` and group documents into the
//!   [`EntityCatalog`](catalog::EntityCatalog), and extracts raw references
//!   from each entity's detail document
//! - **Graph**: Resolves references into a deduplicated dependency graph and
//!   renders it as clustered DOT
//! - **Namespace filter**: Restricts the graph to one namespace and shortens
//!   display names
//! - **Detector**: Finds dependency cycles (Tarjan's SCC plus an iterative
//!   DFS)
//! - **Reports**: Human-readable and JSON cycle reports
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use doxdepends::catalog::EntityCatalog;
//! use doxdepends::detector::CycleDetector;
//! use doxdepends::graph::{DependencyGraphBuilder, GraphRenderer};
//! use doxdepends::namespace_filter::NamespaceFilter;
//! use doxdepends::reports::{HumanReportGenerator, ReportGenerator};
//! use miette::IntoDiagnostic;
//!
//! # fn main() -> miette::Result<()> {
//! let xml_dir = Path::new("build/docs/xml");
//!
//! // Step 1: Catalog every documented entity and group
//! let catalog = EntityCatalog::load(xml_dir, None)?;
//!
//! // Step 2: Read each entity's detail document and add its dependencies
//! let mut builder = DependencyGraphBuilder::new(&catalog);
//! builder.build_from_xml(&catalog, xml_dir, None)?;
//!
//! // Step 3: Keep only the `Proj` namespace
//! let graph = NamespaceFilter::new("Proj").apply(builder.graph());
//!
//! // Step 4: Render and report
//! let dot = GraphRenderer::new().render_dot_string(&graph, catalog.groups())?;
//! std::fs::write("dependencies.dot", dot).into_diagnostic()?;
//!
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&graph)?;
//! print!("{}", HumanReportGenerator::new(None).generate_report(&detector)?);
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod progress;
mod utils;

// Public modules
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod detector;
pub mod doxygen_parser;
pub mod error;
pub mod executors;
pub mod graph;
pub mod namespace_filter;
pub mod reports;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    execute_command(Cli::parse())
}
