//! Cycle report generation
//!
//! The cycle report is the only thing doxdepends prints to stdout:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use

pub mod human;
pub mod json;

use crate::detector::CycleDetector;
use crate::error::DoxDependsError;

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from cycle detection results
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, DoxDependsError>;
}

pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
