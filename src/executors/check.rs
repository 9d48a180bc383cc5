//! Check command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::OutputFormat;
use crate::config::CheckConfig;
use crate::executors::{CommandExecutor, load_store};
use crate::reports::{
    HumanReportGenerator, JsonReportGenerator, JunitReportGenerator, ReportGenerator,
};

pub struct CheckExecutor;

impl CommandExecutor for CheckExecutor {
    type Config = CheckConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let store = load_store(&config.scenario, config.limits)?;

        eprintln!(
            "\n{} Searching the wait-for graph for deadlock...",
            style("🔄").yellow()
        );
        let check = store.run_deadlock_check();
        let snapshot = store.snapshot();

        let report_result = match config.format {
            OutputFormat::Human => HumanReportGenerator::new().generate_report(&snapshot, &check),
            OutputFormat::Json => JsonReportGenerator::new().generate_report(&snapshot, &check),
            OutputFormat::Junit => JunitReportGenerator::new().generate_report(&snapshot, &check),
        };

        match report_result {
            Ok(report) => print!("{report}"),
            Err(e) => {
                return Err(e)
                    .into_diagnostic()
                    .wrap_err("Failed to generate report");
            }
        }

        // Exit with error code if a deadlock was found and requested
        if config.error_on_deadlock && check.is_deadlock() {
            std::process::exit(1);
        }

        Ok(())
    }
}
