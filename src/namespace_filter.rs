//! Namespace filtering and renaming
//!
//! Restricts a dependency graph to the entities of one namespace and strips
//! that namespace from their display names.

use std::collections::BTreeMap;

use crate::graph::{EntityGraph, EntityNode};

/// Separators accepted after the target namespace (C++ and C#/Java style)
const SEPARATORS: &[&str] = &["::", "."];

/// Keeps only entities inside a target namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceFilter {
    namespace: String,
}

impl NamespaceFilter {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The part of a qualified name after the namespace and its separator,
    /// or `None` if the name lies outside the namespace
    pub fn strip<'a>(&self, qualified_name: &'a str) -> Option<&'a str> {
        let rest = qualified_name.strip_prefix(self.namespace.as_str())?;
        SEPARATORS
            .iter()
            .find_map(|separator| rest.strip_prefix(*separator))
            .filter(|short| !short.is_empty())
    }

    pub fn includes(&self, qualified_name: &str) -> bool {
        self.strip(qualified_name).is_some()
    }

    /// Build the filtered graph
    ///
    /// Nodes outside the namespace are removed together with every edge that
    /// touches them; retained nodes keep their relative order and get the
    /// shortened display name. Filtering is idempotent since the qualified
    /// name is never rewritten.
    pub fn apply(&self, graph: &EntityGraph) -> EntityGraph {
        graph.filter_map(
            |_, node| {
                self.strip(&node.qualified_name).map(|short| EntityNode {
                    display_name: short.to_string(),
                    ..node.clone()
                })
            },
            |_, edge| Some(edge.clone()),
        )
    }
}

/// Apply an optional filter; without one the graph passes through unchanged
pub fn apply_optional(filter: Option<&NamespaceFilter>, graph: EntityGraph) -> EntityGraph {
    match filter {
        Some(filter) => filter.apply(&graph),
        None => graph,
    }
}

/// Display names shared by more than one node, each with the qualified
/// names that map to it
///
/// Graphviz identifies nodes by label, so such entities would be drawn as
/// one node. `Proj::X` and `Proj.X` collide under namespace `Proj`.
pub fn colliding_display_names(graph: &EntityGraph) -> Vec<(String, Vec<String>)> {
    let mut by_name: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for node in graph.node_weights() {
        by_name
            .entry(node.display_name())
            .or_default()
            .push(node.qualified_name.clone());
    }

    by_name
        .into_iter()
        .filter(|(_, qualified)| qualified.len() > 1)
        .map(|(name, qualified)| (name.to_string(), qualified))
        .collect()
}
