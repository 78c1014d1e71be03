//! Common functionality shared across commands

use crate::error::DoxDependsError;

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, DoxDependsError>;
}

/// Trait for configurations that can be created from the parsed command line
pub trait FromCli: Sized {
    fn from_cli(cli: crate::cli::Cli) -> Result<Self, DoxDependsError>;
}

/// Macro to implement `TryFrom<Cli>` using [`FromCli`] trait
#[macro_export]
macro_rules! impl_try_from_cli {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Cli> for $config {
            type Error = $crate::error::DoxDependsError;

            fn try_from(cli: $crate::cli::Cli) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCli>::from_cli(cli)
            }
        }
    };
}

/// Error for a builder field that was never set
pub fn missing_field(field: &str) -> DoxDependsError {
    DoxDependsError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}
