use std::collections::{HashMap, HashSet};

use miette::Result;
use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use petgraph::visit::NodeFiltered;

use crate::graph::EntityGraph;

/// Detector for finding dependency cycles between entities
pub struct CycleDetector {
    cycles: Vec<EntityCycle>,
}

/// A closed walk of entities, each depending on the next and the last on the
/// first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCycle {
    entity_names: Vec<String>,
}

impl EntityCycle {
    pub fn new(entity_names: Vec<String>) -> Self {
        Self { entity_names }
    }

    /// Display names in dependency order, starting at the smallest name
    pub fn entity_names(&self) -> &[String] {
        &self.entity_names
    }

    pub fn len(&self) -> usize {
        self.entity_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_names.is_empty()
    }

    /// `A → B → C → A`
    pub fn path(&self) -> String {
        let mut names = self.entity_names.clone();
        if let Some(first) = self.entity_names.first() {
            names.push(first.clone());
        }
        names.join(" → ")
    }
}

/// One frame of the explicit circuit-search stack
struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    next: usize,
    /// Some path through this node returned to the start
    closed: bool,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleDetector {
    pub fn new() -> Self {
        Self { cycles: Vec::new() }
    }

    /// Detect every elementary cycle of the graph
    ///
    /// Runs in time proportional to nodes plus edges for each reported
    /// cycle. The result does not depend on node order; it replaces that of
    /// any earlier call and is sorted by member names.
    pub fn detect_cycles(&mut self, graph: &EntityGraph) -> Result<()> {
        let mut seen: HashSet<Vec<NodeIndex>> = HashSet::new();
        let mut cycles = Vec::new();

        for scc in tarjan_scc(graph) {
            if scc.len() < 2 {
                continue;
            }
            for cycle in find_cycles_in_scc(graph, &scc) {
                let canonical = canonical_rotation(graph, cycle);
                if seen.insert(canonical.clone()) {
                    cycles.push(EntityCycle::new(
                        canonical
                            .iter()
                            .map(|&idx| graph[idx].display_name().to_string())
                            .collect(),
                    ));
                }
            }
        }

        cycles.sort_by(|a, b| a.entity_names.cmp(&b.entity_names));
        self.cycles = cycles;
        Ok(())
    }

    pub fn cycles(&self) -> &[EntityCycle] {
        &self.cycles
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }
}

/// Every elementary circuit of one strongly connected component
///
/// Johnson's algorithm: find the circuits through the smallest node, drop
/// that node, and repeat on the strongly connected components of what is
/// left.
fn find_cycles_in_scc(graph: &EntityGraph, scc: &[NodeIndex]) -> Vec<Vec<NodeIndex>> {
    let mut cycles = Vec::new();
    let mut pending = vec![scc.to_vec()];

    while let Some(mut component) = pending.pop() {
        component.sort();
        let Some((&start, rest)) = component.split_first() else {
            continue;
        };

        let members: HashSet<NodeIndex> = component.iter().copied().collect();
        circuits_through(graph, start, &members, &mut cycles);

        let remaining: HashSet<NodeIndex> = rest.iter().copied().collect();
        let subgraph = NodeFiltered(graph, |node: NodeIndex| remaining.contains(&node));
        pending.extend(
            tarjan_scc(&subgraph)
                .into_iter()
                .filter(|component| component.len() > 1),
        );
    }

    cycles
}

/// Circuits starting and ending at `start`, using only `members`
///
/// Nodes are blocked while on the path and stay blocked until a circuit
/// is found through them, so each circuit is produced exactly once.
fn circuits_through(
    graph: &EntityGraph,
    start: NodeIndex,
    members: &HashSet<NodeIndex>,
    cycles: &mut Vec<Vec<NodeIndex>>,
) {
    let successors_of = |node: NodeIndex| {
        let mut successors: Vec<NodeIndex> = graph
            .neighbors(node)
            .filter(|n| members.contains(n))
            .collect();
        successors.sort();
        successors.dedup();
        successors
    };

    let mut blocked: HashSet<NodeIndex> = HashSet::from([start]);
    let mut blocked_by: HashMap<NodeIndex, HashSet<NodeIndex>> = HashMap::new();
    let mut path = vec![start];
    let mut stack = vec![Frame {
        node: start,
        successors: successors_of(start),
        next: 0,
        closed: false,
    }];

    while let Some(frame) = stack.last_mut() {
        if let Some(&next) = frame.successors.get(frame.next) {
            frame.next += 1;
            if next == start {
                cycles.push(path.clone());
                frame.closed = true;
            } else if blocked.insert(next) {
                path.push(next);
                stack.push(Frame {
                    node: next,
                    successors: successors_of(next),
                    next: 0,
                    closed: false,
                });
            }
            continue;
        }

        let Some(done) = stack.pop() else {
            break;
        };
        path.pop();

        if done.closed {
            unblock(done.node, &mut blocked, &mut blocked_by);
            if let Some(parent) = stack.last_mut() {
                parent.closed = true;
            }
        } else {
            for successor in done.successors {
                blocked_by.entry(successor).or_default().insert(done.node);
            }
        }
    }
}

/// Unblock a node and, transitively, every node waiting on it
fn unblock(
    node: NodeIndex,
    blocked: &mut HashSet<NodeIndex>,
    blocked_by: &mut HashMap<NodeIndex, HashSet<NodeIndex>>,
) {
    let mut pending = vec![node];
    while let Some(node) = pending.pop() {
        if blocked.remove(&node) {
            if let Some(waiting) = blocked_by.remove(&node) {
                pending.extend(waiting);
            }
        }
    }
}

/// Rotate a cycle to start at the member with the smallest display name
fn canonical_rotation(graph: &EntityGraph, mut cycle: Vec<NodeIndex>) -> Vec<NodeIndex> {
    let start = cycle
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            graph[**a]
                .display_name()
                .cmp(graph[**b].display_name())
                .then(a.cmp(b))
        })
        .map(|(position, _)| position)
        .unwrap_or(0);
    cycle.rotate_left(start);
    cycle
}

#[cfg(test)]
mod tests {
    use petgraph::graph::DiGraph;

    use super::*;
    use crate::core::ReferenceKind;
    use crate::graph::{DependencyEdge, EntityNode};

    fn graph_with(names: &[&str], edges: &[(usize, usize)]) -> EntityGraph {
        let mut graph = DiGraph::new();
        let nodes: Vec<_> = names
            .iter()
            .map(|name| graph.add_node(EntityNode::new(format!("class{name}"), *name)))
            .collect();
        for &(from, to) in edges {
            graph.add_edge(
                nodes[from],
                nodes[to],
                DependencyEdge::new(ReferenceKind::Variable),
            );
        }
        graph
    }

    fn detect(graph: &EntityGraph) -> CycleDetector {
        let mut detector = CycleDetector::new();
        detector.detect_cycles(graph).unwrap();
        detector
    }

    #[test]
    fn test_no_cycles_in_linear_graph() {
        let graph = graph_with(&["A", "B", "C"], &[(0, 1), (1, 2)]);
        let detector = detect(&graph);

        assert_eq!(detector.cycle_count(), 0);
        assert!(!detector.has_cycles());
    }

    #[test]
    fn test_three_node_cycle_reported_once() {
        let graph = graph_with(&["A", "B", "C"], &[(0, 1), (1, 2), (2, 0)]);
        let detector = detect(&graph);

        assert_eq!(detector.cycle_count(), 1);
        assert_eq!(detector.cycles()[0].entity_names(), ["A", "B", "C"]);
        assert_eq!(detector.cycles()[0].path(), "A → B → C → A");
    }

    #[test]
    fn test_rotation_starts_at_smallest_name() {
        // Insertion order puts C first, so the search enters the cycle at C
        let graph = graph_with(&["C", "A", "B"], &[(0, 1), (1, 2), (2, 0)]);
        let detector = detect(&graph);

        assert_eq!(detector.cycle_count(), 1);
        assert_eq!(detector.cycles()[0].entity_names(), ["A", "B", "C"]);
    }

    #[test]
    fn test_two_node_mutual_dependency() {
        let graph = graph_with(&["Left", "Right", "Other"], &[(0, 1), (1, 0), (2, 0)]);
        let detector = detect(&graph);

        assert_eq!(detector.cycle_count(), 1);
        assert_eq!(detector.cycles()[0].entity_names(), ["Left", "Right"]);
    }

    #[test]
    fn test_separate_cycles_are_all_reported() {
        let graph = graph_with(
            &["A", "B", "C", "D", "E"],
            &[(0, 1), (1, 0), (2, 3), (3, 4), (4, 2), (1, 2)],
        );
        let detector = detect(&graph);

        let names: Vec<_> = detector
            .cycles()
            .iter()
            .map(|c| c.entity_names().to_vec())
            .collect();
        assert_eq!(
            names,
            vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["C".to_string(), "D".to_string(), "E".to_string()],
            ]
        );
    }

    fn named_graph(order: &[&str], edges: &[(&str, &str)]) -> EntityGraph {
        let position = |name: &str| order.iter().position(|n| *n == name).unwrap();
        let indexed: Vec<(usize, usize)> = edges
            .iter()
            .map(|(from, to)| (position(from), position(to)))
            .collect();
        graph_with(order, &indexed)
    }

    fn cycle_names(detector: &CycleDetector) -> Vec<Vec<&str>> {
        detector
            .cycles()
            .iter()
            .map(|c| c.entity_names().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_cycles_independent_of_node_order() {
        let edges = [("A", "B"), ("B", "A"), ("A", "C"), ("C", "B")];
        let orders = [
            ["A", "B", "C"],
            ["A", "C", "B"],
            ["B", "A", "C"],
            ["B", "C", "A"],
            ["C", "A", "B"],
            ["C", "B", "A"],
        ];

        for order in orders {
            let detector = detect(&named_graph(&order, &edges));
            assert_eq!(
                cycle_names(&detector),
                vec![vec!["A", "B"], vec!["A", "C", "B"]],
                "node order {order:?}"
            );
        }
    }

    #[test]
    fn test_overlapping_cycles_shared_nodes() {
        let graph = named_graph(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D"), ("D", "C")],
        );
        let detector = detect(&graph);

        assert_eq!(cycle_names(&detector), vec![vec!["A", "B", "C"], vec!["C", "D"]]);
    }

    #[test]
    fn test_multiple_cycles_in_same_scc() {
        // Every pair depends on each other in both directions
        let graph = named_graph(
            &["A", "B", "C"],
            &[
                ("A", "B"),
                ("B", "A"),
                ("B", "C"),
                ("C", "B"),
                ("A", "C"),
                ("C", "A"),
            ],
        );
        let detector = detect(&graph);

        assert_eq!(
            cycle_names(&detector),
            vec![
                vec!["A", "B"],
                vec!["A", "B", "C"],
                vec!["A", "C"],
                vec!["A", "C", "B"],
                vec!["B", "C"],
            ]
        );
    }

    #[test]
    fn test_detection_is_repeatable() {
        let graph = graph_with(&["A", "B"], &[(0, 1), (1, 0)]);
        let mut detector = CycleDetector::new();
        detector.detect_cycles(&graph).unwrap();
        detector.detect_cycles(&graph).unwrap();

        assert_eq!(detector.cycle_count(), 1);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let names: Vec<String> = (0..10_000).map(|i| format!("N{i:05}")).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut edges: Vec<(usize, usize)> = (0..names.len() - 1).map(|i| (i, i + 1)).collect();
        edges.push((names.len() - 1, 0));

        let graph = graph_with(&name_refs, &edges);
        let detector = detect(&graph);

        assert_eq!(detector.cycle_count(), 1);
        assert_eq!(detector.cycles()[0].len(), 10_000);
        assert_eq!(detector.cycles()[0].entity_names()[0], "N00000");
    }
}
