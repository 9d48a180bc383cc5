//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::ReportGenerator;
use crate::detector::DeadlockCheck;
use crate::error::RagError;
use crate::store::RagSnapshot;
use crate::utils::string::pluralize;

pub struct HumanReportGenerator;

impl Default for HumanReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(
        &self,
        snapshot: &RagSnapshot<'_>,
        check: &DeadlockCheck,
    ) -> Result<String, RagError> {
        let mut output = String::new();

        let cycle = match check {
            DeadlockCheck::NoProcesses => {
                writeln!(
                    output,
                    "\n{} No processes registered, so nothing can deadlock.",
                    style("ℹ").blue()
                )?;
                return Ok(output);
            }
            DeadlockCheck::NoDeadlock => {
                writeln!(
                    output,
                    "\n{} No deadlock detected! The wait-for graph over {} {} is acyclic.",
                    style("✅").green().bold(),
                    snapshot.process_count(),
                    pluralize("process", snapshot.process_count())
                )?;
                return Ok(output);
            }
            DeadlockCheck::Deadlock(cycle) => cycle,
        };

        writeln!(
            output,
            "\n{} Deadlock detected among {} {}:\n",
            style("❌").red().bold(),
            style(cycle.len()).red().bold(),
            pluralize("process", cycle.len())
        )?;

        writeln!(output, "{} Wait cycle:", style("🔄").yellow())?;
        for step in cycle.steps() {
            writeln!(
                output,
                "    {} {} waits for {} held by {}",
                style("•").dim(),
                style(snapshot.process_name(step.process)).bold(),
                style(snapshot.resource_name(step.resource)).yellow(),
                style(snapshot.process_name(step.next)).bold()
            )?;
        }

        let mut chain = String::new();
        for step in cycle.steps() {
            write!(
                chain,
                "{} ──{}──▶ ",
                snapshot.process_name(step.process),
                snapshot.resource_name(step.resource)
            )?;
        }
        if let Some(first) = cycle.steps().first() {
            chain.push_str(&snapshot.process_name(first.process));
        }
        writeln!(output, "\n    {}\n", style(chain).cyan())?;

        if cycle.is_self_wait() {
            writeln!(
                output,
                "{} The process requests a resource it already holds.",
                style("💡").yellow()
            )?;
        } else {
            writeln!(
                output,
                "{} Each process waits on a resource held by the next one in the cycle.",
                style("💡").yellow()
            )?;
        }

        Ok(output)
    }
}
