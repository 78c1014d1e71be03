//! # Configuration Module
//!
//! Options for a doxdepends run, assembled with a builder that validates
//! required fields.
//!
//! ## Example
//!
//! ```
//! use doxdepends::cli::OutputFormat;
//! use doxdepends::common::ConfigBuilder;
//! use doxdepends::config::GraphOptions;
//!
//! let options = GraphOptions::builder()
//!     .with_xml_directory("docs/xml".into())
//!     .with_report_cycles(true)
//!     .with_target_namespace(Some("Proj".to_string()))
//!     .with_format(OutputFormat::Json)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.output_file.to_str(), Some("doxdepends.dot"));
//! ```

pub mod graph;

pub use graph::GraphOptions;
