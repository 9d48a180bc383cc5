use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::{FormatArgs, ScenarioArgs};

#[derive(Parser)]
#[command(
    name = "rag-deadlock",
    about = "Detect deadlocks in a resource allocation graph",
    long_about = "rag-deadlock loads a resource allocation graph (processes, resources, request \
                  edges and allocation edges) from a scenario file, derives the wait-for graph \
                  between processes and reports the first cycle of mutual waiting it finds, \
                  naming the resource behind every link of the cycle.",
    version
)]
pub struct Cli {
    /// Print debug logs from the store and the detector on stderr
    #[arg(short, long, global = true, env = "RAG_DEADLOCK_VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a scenario for deadlock
    ///
    /// Builds the wait-for graph of the scenario and searches it for a cycle.
    /// The first cycle found is reported with the resource that causes each
    /// wait.
    #[command(
        long_about = "Load a scenario, derive the wait-for graph and search it for a cycle of \
                      waiting processes. Processes are searched in ascending id order, so the \
                      reported cycle is deterministic. Use --error-on-deadlock to fail CI jobs \
                      when a deadlock is present."
    )]
    Check {
        #[command(flatten)]
        scenario: ScenarioArgs,

        #[command(flatten)]
        format: FormatArgs,

        /// Exit with error code if a deadlock is found
        #[arg(long, env = "RAG_DEADLOCK_ERROR_ON_DEADLOCK")]
        error_on_deadlock: bool,
    },

    /// Render the resource allocation graph of a scenario
    ///
    /// Prints the processes, resources, request edges and allocation edges as
    /// an adjacency listing, a Graphviz DOT file or a Mermaid diagram.
    #[command(
        long_about = "Render the resource allocation graph of a scenario. Request edges point \
                      from a process to the resource it waits for; allocation edges point from a \
                      resource to the process holding it. Edges on the detected wait cycle are \
                      highlighted unless --highlight-cycle false is given."
    )]
    Show {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Graph format
        #[arg(
            short,
            long,
            value_enum,
            default_value = crate::constants::output::DEFAULT_GRAPH_FORMAT,
            env = "RAG_DEADLOCK_GRAPH_FORMAT"
        )]
        format: GraphFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, env = "RAG_DEADLOCK_OUTPUT")]
        output: Option<PathBuf>,

        /// Highlight the detected wait cycle
        #[arg(
            long,
            action = clap::ArgAction::Set,
            default_value_t = true,
            env = "RAG_DEADLOCK_HIGHLIGHT_CYCLE"
        )]
        highlight_cycle: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Junit,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum GraphFormat {
    Ascii,
    Dot,
    Mermaid,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_command() {
        let cli = Cli::try_parse_from([
            "rag-deadlock",
            "check",
            "deadlock.toml",
            "--format",
            "json",
            "--max-processes",
            "4",
            "--error-on-deadlock",
        ])
        .unwrap();

        match cli.command {
            Commands::Check {
                scenario,
                format,
                error_on_deadlock,
            } => {
                assert_eq!(scenario.path, PathBuf::from("deadlock.toml"));
                assert_eq!(scenario.max_processes, 4);
                assert_eq!(format.format, OutputFormat::Json);
                assert!(error_on_deadlock);
            }
            _ => panic!("Expected check command"),
        }
    }

    #[test]
    fn test_parse_show_command_defaults() {
        let cli = Cli::try_parse_from(["rag-deadlock", "show", "deadlock.toml"]).unwrap();

        match cli.command {
            Commands::Show {
                format,
                output,
                highlight_cycle,
                ..
            } => {
                assert_eq!(format, GraphFormat::Ascii);
                assert_eq!(output, None);
                assert!(highlight_cycle);
            }
            _ => panic!("Expected show command"),
        }
    }

    #[test]
    fn test_highlight_cycle_can_be_disabled() {
        let cli = Cli::try_parse_from([
            "rag-deadlock",
            "show",
            "deadlock.toml",
            "--highlight-cycle",
            "false",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Commands::Show {
                highlight_cycle: false,
                ..
            }
        ));
    }
}
