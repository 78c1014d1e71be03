use std::path::PathBuf;

use clap::Parser;

use crate::constants::output::{DEFAULT_FORMAT, DEFAULT_OUTPUT_FILE};

#[derive(Parser, Debug)]
#[command(
    name = "doxdepends",
    about = "Render the class dependency graph of a Doxygen-documented project",
    long_about = "doxdepends reads the XML output of Doxygen (GENERATE_XML = YES), builds a \
                  graph of dependencies between the documented classes, structs and \
                  interfaces, and writes it as a Graphviz DOT file. Classes belonging to a \
                  Doxygen group are clustered together, and dependency cycles can be \
                  reported on stdout.",
    version
)]
pub struct Cli {
    /// Directory containing Doxygen's index.xml
    #[arg(value_name = "XML_DIRECTORY")]
    pub xml_directory: PathBuf,

    /// Print the dependency cycles found in the graph
    #[arg(short = 'c', long, env = "DOXDEPENDS_REPORT_CYCLES")]
    pub report_cycles: bool,

    /// Only keep entities inside this namespace, shown without the prefix
    #[arg(short = 'n', long, value_name = "NAMESPACE", env = "DOXDEPENDS_TARGET_NAMESPACE")]
    pub target_namespace: Option<String>,

    /// Where to write the DOT graph
    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        default_value = DEFAULT_OUTPUT_FILE,
        env = "DOXDEPENDS_OUTPUT_FILE"
    )]
    pub output_file: PathBuf,

    /// Show progress while reading the XML
    #[arg(short, long, env = "DOXDEPENDS_VERBOSE")]
    pub verbose: bool,

    /// Cycle report format
    #[arg(long, value_enum, default_value = DEFAULT_FORMAT, env = "DOXDEPENDS_FORMAT")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}
