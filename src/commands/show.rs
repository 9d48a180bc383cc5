//! Show command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::ShowConfig;
use crate::error::RagError;

impl FromCommand for ShowConfig {
    fn from_command(command: Commands) -> Result<Self, RagError> {
        match command {
            Commands::Show {
                scenario,
                format,
                output,
                highlight_cycle,
            } => ShowConfig::builder()
                .with_limits(scenario.limits())
                .with_scenario(scenario.path)
                .with_format(format)
                .with_output(output)
                .with_highlight_cycle(highlight_cycle)
                .build(),
            _ => Err(RagError::ConfigurationError {
                message: "Invalid command type for ShowConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(ShowConfig);

/// Execute the show command for rendering the resource allocation graph
pub fn execute_show_command(command: Commands) -> Result<()> {
    let config =
        ShowConfig::from_command(command).wrap_err("Failed to parse show command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::show::ShowExecutor;
    ShowExecutor::execute(config)
}
