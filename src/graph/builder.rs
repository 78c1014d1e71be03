use std::collections::HashSet;
use std::path::Path;

use miette::{Result, WrapErr};
use petgraph::graph::{DiGraph, NodeIndex};

use super::types::{DependencyEdge, EntityNode};
use crate::catalog::{EntityCatalog, ReferenceExtractor, detail_path};
use crate::core::{Reference, ReferenceKind};
use crate::doxygen_parser::ClassDef;
use crate::progress::ProgressReporter;

/// Directed graph of entities; an edge `a -> b` means `a` depends on `b`
pub type EntityGraph = DiGraph<EntityNode, DependencyEdge>;

/// Builder for constructing the entity dependency graph
///
/// Nodes are created for every cataloged entity up front, in catalog order.
/// Edges are added as references resolve; self-references and repeated pairs
/// are ignored, so the result is a simple directed graph.
pub struct DependencyGraphBuilder {
    graph: EntityGraph,
    node_indices: Vec<NodeIndex>,
    edge_pairs: HashSet<(NodeIndex, NodeIndex)>,
}

impl DependencyGraphBuilder {
    /// Create a builder holding one node per cataloged entity
    pub fn new(catalog: &EntityCatalog) -> Self {
        let mut graph: EntityGraph = DiGraph::with_capacity(catalog.len(), 0);
        let node_indices = catalog
            .entities()
            .iter()
            .map(|entity| graph.add_node(EntityNode::from(entity)))
            .collect();

        Self {
            graph,
            node_indices,
            edge_pairs: HashSet::new(),
        }
    }

    /// Read every entity's detail document and add the dependencies it declares
    ///
    /// Documents are parsed one at a time; only the resolved edges are kept.
    pub fn build_from_xml(
        &mut self,
        catalog: &EntityCatalog,
        xml_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<()> {
        for (position, entity) in catalog.entities().iter().enumerate() {
            let path = detail_path(xml_dir, &entity.id);
            if let Some(p) = progress {
                p.processing_file(entity.kind.as_str(), &path);
            }

            let class = ClassDef::parse_file(&path)
                .wrap_err_with(|| format!("Failed to read {}", entity.qualified_name))?;
            let references = ReferenceExtractor::from_class_def(&class).into_references();
            self.add_references(catalog, position, references);
        }

        Ok(())
    }

    /// Resolve references made by the entity at `source` and add their edges
    ///
    /// Returns the number of new edges.
    pub fn add_references(
        &mut self,
        catalog: &EntityCatalog,
        source: usize,
        references: impl IntoIterator<Item = Reference>,
    ) -> usize {
        let mut added = 0;
        for reference in references {
            let Some(target) = resolve(catalog, &reference) else {
                continue;
            };
            let (from, to) = if reference.kind.is_reverse() {
                (target, source)
            } else {
                (source, target)
            };
            if self.add_dependency(from, to, reference.kind) {
                added += 1;
            }
        }
        added
    }

    /// Add an edge between two catalog positions
    ///
    /// Returns `false` for self-dependencies, unknown positions and pairs
    /// that already have an edge.
    pub fn add_dependency(&mut self, from: usize, to: usize, kind: ReferenceKind) -> bool {
        if from == to {
            return false;
        }
        let (Some(&from_idx), Some(&to_idx)) = (self.node_indices.get(from), self.node_indices.get(to))
        else {
            return false;
        };
        if !self.edge_pairs.insert((from_idx, to_idx)) {
            return false;
        }
        self.graph.add_edge(from_idx, to_idx, DependencyEdge::new(kind));
        true
    }

    pub fn graph(&self) -> &EntityGraph {
        &self.graph
    }

    pub fn into_graph(self) -> EntityGraph {
        self.graph
    }
}

/// Find the catalog position a reference points at
///
/// A hyperlinked refid wins; otherwise only an exact qualified-name match
/// resolves. Builtins and external types resolve to nothing.
pub fn resolve(catalog: &EntityCatalog, reference: &Reference) -> Option<usize> {
    reference
        .refid
        .as_deref()
        .and_then(|refid| catalog.position_of_id(refid))
        .or_else(|| catalog.position_of_name(&reference.name))
}
