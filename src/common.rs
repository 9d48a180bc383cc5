//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;

use crate::constants::limits::{DEFAULT_MAX_PROCESSES, DEFAULT_MAX_RESOURCES};
use crate::store::StoreLimits;

/// Scenario arguments shared by every command
#[derive(Args, Debug, Clone)]
pub struct ScenarioArgs {
    /// Scenario file describing the resource allocation graph
    #[arg(value_name = "SCENARIO", env = "RAG_DEADLOCK_SCENARIO")]
    pub path: PathBuf,

    /// Maximum number of processes the graph may hold
    #[arg(long, default_value_t = DEFAULT_MAX_PROCESSES, env = "RAG_DEADLOCK_MAX_PROCESSES")]
    pub max_processes: usize,

    /// Maximum number of resources the graph may hold
    #[arg(long, default_value_t = DEFAULT_MAX_RESOURCES, env = "RAG_DEADLOCK_MAX_RESOURCES")]
    pub max_resources: usize,
}

/// Common output format arguments
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "RAG_DEADLOCK_FORMAT")]
    pub format: crate::cli::OutputFormat,
}

impl ScenarioArgs {
    /// Store limits requested on the command line
    pub fn limits(&self) -> StoreLimits {
        StoreLimits::new(self.max_processes, self.max_resources)
    }
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::RagError>;
}

/// Trait for configurations that can be created from CLI commands
/// This trait simplifies command-to-config conversions
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(command: crate::cli::Commands) -> Result<Self, crate::error::RagError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::RagError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}

/// Shorthand for the error a builder returns when a field was never set
pub(crate) fn missing_field(field: &str) -> crate::error::RagError {
    crate::error::RagError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}
