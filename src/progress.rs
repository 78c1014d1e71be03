use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::utils::string::pluralize;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Verbose progress output, written to stderr
pub struct ProgressReporter {
    term: Term,
    files_seen: AtomicUsize,
    current_spinner: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            files_seen: AtomicUsize::new(0),
            current_spinner: None,
        }
    }

    fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        let mut frames = SPINNER_FRAMES.to_vec();
        frames.push("✓");
        match ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
            Ok(spinner_style) => pb.set_style(spinner_style.tick_strings(&frames)),
            Err(_) => pb.set_style(ProgressStyle::default_spinner().tick_strings(&frames)),
        }
        pb.set_message(message.to_string());
        if self.term.is_term() {
            pb.enable_steady_tick(TICK_INTERVAL);
        }
        pb
    }

    pub fn start_loading(&mut self, xml_dir: &Path) {
        let _ = self.term.clear_line();
        eprintln!(
            "{} Using XML directory {}",
            style("📂").cyan(),
            style(xml_dir.display()).bold()
        );
        let spinner = self.create_spinner("Reading index.xml...");
        self.current_spinner = Some(spinner);
    }

    /// Note that a detail document of the given compound kind is being read
    pub fn processing_file(&self, kind: &str, path: &Path) {
        self.files_seen.fetch_add(1, Ordering::Relaxed);
        let message = format!("Processing {kind} file {}", path.display());
        if let Some(ref pb) = self.current_spinner {
            pb.set_message(message);
            pb.tick();
        } else {
            eprintln!("  {} {}", style("→").dim(), style(message).dim());
        }
    }

    pub fn files_seen(&self) -> usize {
        self.files_seen.load(Ordering::Relaxed)
    }

    pub fn finish_loading(&mut self, entities: usize, groups: usize) {
        if let Some(pb) = self.current_spinner.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        eprintln!(
            "{} Read {} XML {}: {} {}, {} {}",
            style("✓").green(),
            style(self.files_seen() + 1).yellow().bold(),
            pluralize("file", self.files_seen() + 1),
            style(entities).yellow().bold(),
            pluralize("entity", entities),
            style(groups).yellow().bold(),
            pluralize("group", groups)
        );
    }

    pub fn graph_built(&self, nodes: usize, edges: usize) {
        eprintln!(
            "{} Dependency graph: {} {}, {} {}",
            style("🔨").blue(),
            style(nodes).yellow(),
            pluralize("node", nodes),
            style(edges).yellow(),
            pluralize("edge", edges)
        );
    }

    pub fn namespace_applied(&self, namespace: &str, kept: usize) {
        eprintln!(
            "{} Restricted to namespace {}: {} {} kept",
            style("🔎").cyan(),
            style(namespace).green(),
            style(kept).yellow(),
            pluralize("node", kept)
        );
    }

    pub fn start_cycle_detection(&self) {
        eprintln!("{} Detecting dependency cycles...", style("🔄").yellow());
    }

    pub fn finish_cycle_detection(&self, cycles_found: usize) {
        if cycles_found == 0 {
            eprintln!("{} No cycles detected", style("✓").green().bold());
        } else {
            eprintln!(
                "{} Found {} {}",
                style("⚠").yellow().bold(),
                style(cycles_found).red().bold(),
                pluralize("cycle", cycles_found)
            );
        }
    }
}
