//! JUnit XML format report generation

use std::fmt::Write;

use super::ReportGenerator;
use crate::detector::DeadlockCheck;
use crate::error::RagError;
use crate::store::RagSnapshot;
use crate::utils::string::pluralize;

pub struct JunitReportGenerator;

impl Default for JunitReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JunitReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JunitReportGenerator {
    fn generate_report(
        &self,
        snapshot: &RagSnapshot<'_>,
        check: &DeadlockCheck,
    ) -> Result<String, RagError> {
        let mut output = String::new();
        let failures = if check.is_deadlock() { "1" } else { "0" };

        writeln!(output, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            output,
            r#"<testsuites name="rag-deadlock" tests="1" failures="{failures}">"#
        )?;
        writeln!(
            output,
            r#"  <testsuite name="deadlock-check" tests="1" failures="{failures}">"#
        )?;

        match check.cycle() {
            Some(cycle) => {
                writeln!(
                    output,
                    r#"    <testcase name="wait-for-graph-acyclic" classname="rag-deadlock">"#
                )?;
                writeln!(output, r#"      <failure message="Deadlock detected">"#)?;
                writeln!(
                    output,
                    "Wait cycle over {} {}:",
                    cycle.len(),
                    pluralize("process", cycle.len())
                )?;
                for step in cycle.steps() {
                    writeln!(
                        output,
                        "  {} waits for {} held by {}",
                        escape_xml(&snapshot.process_name(step.process)),
                        escape_xml(&snapshot.resource_name(step.resource)),
                        escape_xml(&snapshot.process_name(step.next))
                    )?;
                }
                writeln!(output, r#"      </failure>"#)?;
                writeln!(output, r#"    </testcase>"#)?;
            }
            None => {
                writeln!(
                    output,
                    r#"    <testcase name="wait-for-graph-acyclic" classname="rag-deadlock" />"#
                )?;
            }
        }

        writeln!(output, r#"  </testsuite>"#)?;
        writeln!(output, r#"</testsuites>"#)?;

        Ok(output)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
