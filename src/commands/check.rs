//! Check command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::CheckConfig;
use crate::error::RagError;

impl FromCommand for CheckConfig {
    fn from_command(command: Commands) -> Result<Self, RagError> {
        match command {
            Commands::Check {
                scenario,
                format,
                error_on_deadlock,
            } => CheckConfig::builder()
                .with_limits(scenario.limits())
                .with_scenario(scenario.path)
                .with_format(format.format)
                .with_error_on_deadlock(error_on_deadlock)
                .build(),
            _ => Err(RagError::ConfigurationError {
                message: "Invalid command type for CheckConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(CheckConfig);

/// Execute the check command for detecting deadlocks in a scenario
pub fn execute_check_command(command: Commands) -> Result<()> {
    let config = CheckConfig::from_command(command)
        .wrap_err("Failed to parse check command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::check::CheckExecutor;
    CheckExecutor::execute(config)
}
