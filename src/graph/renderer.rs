use std::collections::HashSet;
use std::io::Write;

use miette::Result;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::builder::EntityGraph;
use crate::core::Group;
use crate::error::DoxDependsError;
use crate::utils::string::{escape_dot, sanitize_dot_id};

// Cluster styling matches the look of Doxygen's own diagrams
mod style {
    pub const CLUSTER_COLOR: &str = "darkorange";
    pub const NODE_FONT_COLOR: &str = "blue";
    pub const FONT: &str = "Verdana";
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(DoxDependsError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(DoxDependsError::from)
    };
}

/// Renders an entity graph as Graphviz DOT
///
/// Grouped entities are wrapped in one `cluster_` subgraph per group, in
/// group order; everything else is declared at the top level. Output depends
/// only on node, group and edge order, so unchanged input renders
/// byte-identically.
#[derive(Debug, Default)]
pub struct GraphRenderer;

impl GraphRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_dot(
        &self,
        graph: &EntityGraph,
        groups: &[Group],
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "digraph dependencies {{")?;
        writeln_out!(output, " rankdir=\"LR\";")?;
        writeln_out!(output, " concentrate=true;")?;
        writeln_out!(
            output,
            " node [shape=record, fontname={}, fontsize=10, margin=.1, width=.2, height=.2];",
            style::FONT
        )?;

        let mut clustered: HashSet<NodeIndex> = HashSet::new();
        let mut cluster_ids: HashSet<String> = HashSet::new();
        for group in groups {
            let members: Vec<NodeIndex> = graph
                .node_indices()
                .filter(|&idx| graph[idx].group.as_deref() == Some(group.id.as_str()))
                .collect();
            if members.is_empty() {
                continue;
            }

            let cluster_id = unique_cluster_id(&group.id, &mut cluster_ids);
            self.write_cluster(graph, group, &cluster_id, &members, output)?;
            clustered.extend(members);
        }

        for idx in graph.node_indices() {
            if !clustered.contains(&idx) {
                self.write_node(graph, idx, "", output)?;
            }
        }

        let mut edges: Vec<(NodeIndex, NodeIndex)> = graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target()))
            .collect();
        edges.sort();

        for (source, target) in edges {
            writeln_out!(
                output,
                " \"{}\" -> \"{}\";",
                escape_dot(graph[source].display_name()),
                escape_dot(graph[target].display_name())
            )?;
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    /// Render into a string
    pub fn render_dot_string(&self, graph: &EntityGraph, groups: &[Group]) -> Result<String> {
        let mut buffer = Vec::new();
        self.render_dot(graph, groups, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            DoxDependsError::GraphError {
                message: format!("Rendered graph is not valid UTF-8: {e}"),
            }
            .into()
        })
    }

    fn write_cluster(
        &self,
        graph: &EntityGraph,
        group: &Group,
        cluster_id: &str,
        members: &[NodeIndex],
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, " subgraph cluster_{cluster_id} {{")?;
        writeln_out!(output, "   label     = \"{}\";", escape_dot(&group.title))?;
        writeln_out!(output, "   labeljust = r;")?;
        writeln_out!(output, "   color     = {};", style::CLUSTER_COLOR)?;
        writeln_out!(output, "   fontcolor = {};", style::CLUSTER_COLOR)?;
        writeln_out!(output, "   fontsize  = 12;")?;
        writeln_out!(output, "   fontname  = \"{}\";", style::FONT)?;
        writeln_out!(output, "   penwidth  = 2;")?;
        for &idx in members {
            self.write_node(graph, idx, "  ", output)?;
        }
        writeln_out!(output, " }}")?;
        Ok(())
    }

    /// Nodes link back to the documentation through Doxygen's `\ref`
    fn write_node(
        &self,
        graph: &EntityGraph,
        idx: NodeIndex,
        indent: &str,
        output: &mut dyn Write,
    ) -> Result<()> {
        let node = &graph[idx];
        writeln_out!(
            output,
            "{} \"{}\" [URL=\"\\ref {}\", fontcolor={}];",
            indent,
            escape_dot(node.display_name()),
            escape_dot(&node.qualified_name),
            style::NODE_FONT_COLOR
        )?;
        Ok(())
    }
}

/// Sanitized group id, suffixed with a counter when another group of the
/// same rendering already sanitized to it (`group-a` and `group_a`)
fn unique_cluster_id(group_id: &str, taken: &mut HashSet<String>) -> String {
    let base = sanitize_dot_id(group_id);
    let mut candidate = base.clone();
    let mut suffix = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{base}_{suffix}");
        suffix += 1;
    }
    candidate
}
