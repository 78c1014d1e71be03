//! Graph run configuration

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::common::{ConfigBuilder, missing_field};
use crate::constants::output::DEFAULT_OUTPUT_FILE;
use crate::error::DoxDependsError;

#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub xml_directory: PathBuf,
    pub report_cycles: bool,
    pub target_namespace: Option<String>,
    pub output_file: PathBuf,
    pub verbose: bool,
    pub format: OutputFormat,
}

impl GraphOptions {
    pub fn builder() -> GraphOptionsBuilder {
        GraphOptionsBuilder::new()
    }
}

#[derive(Default)]
pub struct GraphOptionsBuilder {
    xml_directory: Option<PathBuf>,
    report_cycles: bool,
    target_namespace: Option<String>,
    output_file: Option<PathBuf>,
    verbose: bool,
    format: Option<OutputFormat>,
}

impl GraphOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_xml_directory(mut self, xml_directory: PathBuf) -> Self {
        self.xml_directory = Some(xml_directory);
        self
    }

    pub fn with_report_cycles(mut self, report_cycles: bool) -> Self {
        self.report_cycles = report_cycles;
        self
    }

    pub fn with_target_namespace(mut self, target_namespace: Option<String>) -> Self {
        self.target_namespace = target_namespace;
        self
    }

    pub fn with_output_file(mut self, output_file: PathBuf) -> Self {
        self.output_file = Some(output_file);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl ConfigBuilder for GraphOptionsBuilder {
    type Config = GraphOptions;

    fn build(self) -> Result<Self::Config, DoxDependsError> {
        if self.target_namespace.as_deref().is_some_and(str::is_empty) {
            return Err(DoxDependsError::ConfigurationError {
                message: "Target namespace must not be empty".to_string(),
            });
        }

        Ok(GraphOptions {
            xml_directory: self
                .xml_directory
                .ok_or_else(|| missing_field("xml_directory"))?,
            report_cycles: self.report_cycles,
            target_namespace: self.target_namespace,
            output_file: self
                .output_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            verbose: self.verbose,
            format: self.format.unwrap_or(OutputFormat::Human),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GraphOptions::builder()
            .with_xml_directory(PathBuf::from("xml"))
            .build()
            .unwrap();

        assert_eq!(options.xml_directory, PathBuf::from("xml"));
        assert!(!options.report_cycles);
        assert!(options.target_namespace.is_none());
        assert_eq!(options.output_file, PathBuf::from("doxdepends.dot"));
        assert!(!options.verbose);
        assert_eq!(options.format, OutputFormat::Human);
    }

    #[test]
    fn test_missing_xml_directory() {
        let err = GraphOptions::builder().build().unwrap_err();
        assert!(matches!(
            err,
            DoxDependsError::ConfigurationError { ref message } if message.contains("xml_directory")
        ));
    }

    #[test]
    fn test_empty_namespace_rejected() {
        let result = GraphOptions::builder()
            .with_xml_directory(PathBuf::from("xml"))
            .with_target_namespace(Some(String::new()))
            .build();
        assert!(result.is_err());
    }
}
