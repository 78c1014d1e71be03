//! # Graph Construction and Rendering Module
//!
//! This module builds the entity dependency graph and renders it as Graphviz
//! DOT for Doxygen's `\dotfile` command.
//!
//! ## Components
//!
//! ### Graph Building
//! - **DependencyGraphBuilder**: Resolves references against the catalog and
//!   adds deduplicated, self-loop free edges
//! - **EntityNode**: An entity in the graph, with its display name
//! - **DependencyEdge**: A "depends on" relationship between two entities
//!
//! ### Graph Rendering
//! - **GraphRenderer**: Writes DOT with one cluster per non-empty group
//!
//! ## Example
//!
//! ```
//! use doxdepends::catalog::EntityCatalog;
//! use doxdepends::core::{Reference, ReferenceKind};
//! use doxdepends::doxygen_parser::CompoundKind;
//! use doxdepends::graph::{DependencyGraphBuilder, GraphRenderer};
//!
//! # fn main() -> miette::Result<()> {
//! let mut catalog = EntityCatalog::new();
//! let app = catalog.insert_entity("classApp", "App", CompoundKind::Class);
//! catalog.insert_entity("classCore", "Core", CompoundKind::Class);
//!
//! let mut builder = DependencyGraphBuilder::new(&catalog);
//! builder.add_references(
//!     &catalog,
//!     app,
//!     vec![
//!         Reference::named("Core", ReferenceKind::Variable),
//!         Reference::named("std::string", ReferenceKind::Variable),
//!     ],
//! );
//!
//! let dot = GraphRenderer::new().render_dot_string(builder.graph(), catalog.groups())?;
//! assert!(dot.contains(r#""App" -> "Core";"#));
//! # Ok(())
//! # }
//! ```

mod builder;
mod renderer;
mod types;

pub use builder::{DependencyGraphBuilder, EntityGraph, resolve};
pub use renderer::GraphRenderer;
pub use types::{DependencyEdge, EntityNode};
