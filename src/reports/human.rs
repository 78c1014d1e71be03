//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::ReportGenerator;
use crate::detector::CycleDetector;
use crate::error::DoxDependsError;
use crate::utils::string::pluralize;

pub struct HumanReportGenerator {
    max_cycles: Option<usize>,
}

impl HumanReportGenerator {
    pub fn new(max_cycles: Option<usize>) -> Self {
        Self { max_cycles }
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, DoxDependsError> {
        let mut output = String::new();

        if !detector.has_cycles() {
            writeln!(
                output,
                "{} No dependency cycles between documented classes.",
                style("✓").green().bold()
            )?;
            return Ok(output);
        }

        writeln!(
            output,
            "{} Found {} dependency {}:",
            style("⚠").red().bold(),
            style(detector.cycle_count()).red().bold(),
            pluralize("cycle", detector.cycle_count())
        )?;

        let limit = self.max_cycles.unwrap_or(usize::MAX);
        for (i, cycle) in detector.cycles().iter().take(limit).enumerate() {
            writeln!(
                output,
                "  {} Cycle #{}: {}",
                style("🔄").yellow(),
                i + 1,
                style(cycle.path()).bold()
            )?;
        }

        if limit < detector.cycle_count() {
            writeln!(
                output,
                "{} Showing {} of {} cycles.",
                style("ℹ").blue(),
                style(limit).yellow(),
                style(detector.cycle_count()).yellow()
            )?;
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReferenceKind;
    use crate::graph::{DependencyEdge, EntityGraph, EntityNode};

    fn detector_for(edges: &[(&str, &str)]) -> CycleDetector {
        let mut graph = EntityGraph::new();
        let mut nodes = std::collections::HashMap::new();
        for (from, to) in edges {
            for name in [from, to] {
                nodes
                    .entry(name.to_string())
                    .or_insert_with(|| graph.add_node(EntityNode::new(*name, *name)));
            }
            graph.add_edge(
                nodes[*from],
                nodes[*to],
                DependencyEdge::new(ReferenceKind::Variable),
            );
        }
        let mut detector = CycleDetector::new();
        detector.detect_cycles(&graph).unwrap();
        detector
    }

    #[test]
    fn test_report_without_cycles() {
        console::set_colors_enabled(false);
        let report = HumanReportGenerator::new(None)
            .generate_report(&detector_for(&[("A", "B")]))
            .unwrap();

        assert!(report.contains("No dependency cycles"));
    }

    #[test]
    fn test_report_lists_cycle_path() {
        console::set_colors_enabled(false);
        let report = HumanReportGenerator::new(None)
            .generate_report(&detector_for(&[("A", "B"), ("B", "C"), ("C", "A")]))
            .unwrap();

        assert!(report.contains("Found 1 dependency cycle:"));
        assert!(report.contains("Cycle #1: A → B → C → A"));
    }

    #[test]
    fn test_report_respects_max_cycles() {
        console::set_colors_enabled(false);
        let detector = detector_for(&[("A", "B"), ("B", "A"), ("C", "D"), ("D", "C")]);
        let report = HumanReportGenerator::new(Some(1))
            .generate_report(&detector)
            .unwrap();

        assert!(report.contains("Cycle #1: A → B → A"));
        assert!(!report.contains("Cycle #2"));
        assert!(report.contains("Showing 1 of 2 cycles."));
    }
}
