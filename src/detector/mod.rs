//! # Cycle Detection Module
//!
//! This module finds circular dependencies between documented entities.
//!
//! ## Algorithm
//!
//! The graph is first split into strongly connected components with Tarjan's
//! algorithm; only components with more than one entity can hold a cycle.
//! Inside each such component, Johnson's algorithm enumerates every
//! elementary circuit. The search keeps its path on an explicit stack
//! rather than recursing, so long dependency chains cannot overflow it.
//! Each cycle is rotated to start at its lexicographically smallest member
//! and the list is sorted, so the report is the same whatever order the
//! entities were cataloged in.
//!
//! ## Example
//!
//! ```
//! use doxdepends::core::ReferenceKind;
//! use doxdepends::detector::CycleDetector;
//! use doxdepends::graph::{DependencyEdge, EntityGraph, EntityNode};
//!
//! # fn main() -> miette::Result<()> {
//! let mut graph = EntityGraph::new();
//! let a = graph.add_node(EntityNode::new("classA", "A"));
//! let b = graph.add_node(EntityNode::new("classB", "B"));
//! graph.add_edge(a, b, DependencyEdge::new(ReferenceKind::Variable));
//! graph.add_edge(b, a, DependencyEdge::new(ReferenceKind::Parameter));
//!
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&graph)?;
//!
//! assert!(detector.has_cycles());
//! assert_eq!(detector.cycles()[0].entity_names(), ["A", "B"]);
//! # Ok(())
//! # }
//! ```

mod detector_impl;

pub use detector_impl::*;
