//! JSON format report generation

use serde::Serialize;

use super::ReportGenerator;
use crate::detector::CycleDetector;
use crate::error::DoxDependsError;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct CycleReport<'a> {
    has_cycles: bool,
    cycle_count: usize,
    cycles: Vec<CycleEntry<'a>>,
}

#[derive(Serialize)]
struct CycleEntry<'a> {
    entities: &'a [String],
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, DoxDependsError> {
        let report = CycleReport {
            has_cycles: detector.has_cycles(),
            cycle_count: detector.cycle_count(),
            cycles: detector
                .cycles()
                .iter()
                .map(|cycle| CycleEntry {
                    entities: cycle.entity_names(),
                })
                .collect(),
        };

        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }
}
