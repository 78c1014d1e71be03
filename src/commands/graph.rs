//! Graph command implementation

use miette::{Result, WrapErr};

use crate::cli::Cli;
use crate::common::{ConfigBuilder, FromCli};
use crate::config::GraphOptions;
use crate::error::DoxDependsError;

impl FromCli for GraphOptions {
    fn from_cli(cli: Cli) -> Result<Self, DoxDependsError> {
        GraphOptions::builder()
            .with_xml_directory(cli.xml_directory)
            .with_report_cycles(cli.report_cycles)
            .with_target_namespace(cli.target_namespace)
            .with_output_file(cli.output_file)
            .with_verbose(cli.verbose)
            .with_format(cli.format)
            .build()
    }
}

crate::impl_try_from_cli!(GraphOptions);

/// Execute the graph command
pub fn execute_graph_command(cli: Cli) -> Result<()> {
    let config =
        GraphOptions::from_cli(cli).wrap_err("Failed to parse command line configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::graph::GraphExecutor;
    GraphExecutor::execute(config)
}
