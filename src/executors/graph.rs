//! Graph command executor

use std::io::Write;
use std::path::Path;

use console::style;
use miette::{Result, WrapErr};
use tempfile::NamedTempFile;

use crate::catalog::EntityCatalog;
use crate::cli::OutputFormat;
use crate::config::GraphOptions;
use crate::detector::CycleDetector;
use crate::error::DoxDependsError;
use crate::executors::CommandExecutor;
use crate::graph::{DependencyGraphBuilder, GraphRenderer};
use crate::namespace_filter::{NamespaceFilter, apply_optional, colliding_display_names};
use crate::progress::ProgressReporter;
use crate::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator};

pub struct GraphExecutor;

/// Everything one run produces, before anything is written
pub struct GraphOutput {
    pub dot: String,
    pub cycles: Option<CycleDetector>,
}

impl GraphExecutor {
    /// Run the pipeline in memory: catalog, graph, namespace filter, then the
    /// DOT rendering and, when requested, cycle detection on the filtered graph
    pub fn render(
        config: &GraphOptions,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Result<GraphOutput> {
        if let Some(p) = progress.as_deref_mut() {
            p.start_loading(&config.xml_directory);
        }

        let catalog = EntityCatalog::load(&config.xml_directory, progress.as_deref())
            .wrap_err("Failed to build the entity catalog")?;

        let mut builder = DependencyGraphBuilder::new(&catalog);
        builder
            .build_from_xml(&catalog, &config.xml_directory, progress.as_deref())
            .wrap_err("Failed to build dependency graph")?;

        if let Some(p) = progress.as_deref_mut() {
            p.finish_loading(catalog.len(), catalog.groups().len());
            p.graph_built(builder.graph().node_count(), builder.graph().edge_count());
        }

        let filter = config.target_namespace.as_deref().map(NamespaceFilter::new);
        let graph = apply_optional(filter.as_ref(), builder.into_graph());

        if let (Some(p), Some(filter)) = (progress.as_deref(), filter.as_ref()) {
            p.namespace_applied(filter.namespace(), graph.node_count());
        }

        for (name, qualified_names) in colliding_display_names(&graph) {
            eprintln!(
                "{} {} entities are drawn as one node \"{}\": {}",
                style("⚠").yellow().bold(),
                qualified_names.len(),
                style(&name).bold(),
                qualified_names.join(", ")
            );
        }

        let dot = GraphRenderer::new()
            .render_dot_string(&graph, catalog.groups())
            .wrap_err("Failed to render DOT graph")?;

        let cycles = if config.report_cycles {
            if let Some(p) = progress.as_deref() {
                p.start_cycle_detection();
            }

            let mut detector = CycleDetector::new();
            detector
                .detect_cycles(&graph)
                .wrap_err("Failed to detect dependency cycles")?;

            if let Some(p) = progress.as_deref() {
                p.finish_cycle_detection(detector.cycle_count());
            }
            Some(detector)
        } else {
            None
        };

        Ok(GraphOutput { dot, cycles })
    }
}

impl CommandExecutor for GraphExecutor {
    type Config = GraphOptions;

    fn execute(config: Self::Config) -> Result<()> {
        let mut progress = config.verbose.then(ProgressReporter::new);

        let output = Self::render(&config, progress.as_mut())?;

        write_atomically(&config.output_file, output.dot.as_bytes())?;
        eprintln!(
            "{} Graph written to {}",
            style("✓").green(),
            style(config.output_file.display()).bold()
        );

        if let Some(detector) = output.cycles {
            let report = cycle_report(&detector, config.format)
                .wrap_err("Failed to generate cycle report")?;
            print!("{report}");
        }

        Ok(())
    }
}

/// Format the cycle report in the requested format
pub fn cycle_report(
    detector: &CycleDetector,
    format: OutputFormat,
) -> Result<String, DoxDependsError> {
    match format {
        OutputFormat::Human => HumanReportGenerator::new(None).generate_report(detector),
        OutputFormat::Json => JsonReportGenerator::new().generate_report(detector),
    }
}

/// Replace `path` with `contents` without ever exposing a partial file
///
/// The data goes to a temporary file in the destination directory, which is
/// then renamed over the destination.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), DoxDependsError> {
    let write_failure = |source: std::io::Error| DoxDependsError::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_failure)?;
    file.write_all(contents).map_err(write_failure)?;
    file.flush().map_err(write_failure)?;
    file.persist(path).map_err(|e| write_failure(e.error))?;
    Ok(())
}
