//! Command implementations for the rag-deadlock CLI
//!
//! This module contains the implementations for each CLI command:
//! - check: Report whether a scenario is deadlocked
//! - show: Render the resource allocation graph of a scenario

pub mod check;
pub mod show;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Check { .. } => check::execute_check_command(command),
        Commands::Show { .. } => show::execute_show_command(command),
    }
}
