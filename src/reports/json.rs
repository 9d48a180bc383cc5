//! JSON format report generation

use serde_json::{Value, json};

use super::ReportGenerator;
use crate::detector::DeadlockCheck;
use crate::error::RagError;
use crate::store::RagSnapshot;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(
        &self,
        snapshot: &RagSnapshot<'_>,
        check: &DeadlockCheck,
    ) -> Result<String, RagError> {
        let status = match check {
            DeadlockCheck::NoProcesses => "no_processes",
            DeadlockCheck::NoDeadlock => "no_deadlock",
            DeadlockCheck::Deadlock(_) => "deadlock",
        };

        let cycle = match check.cycle() {
            Some(cycle) => Value::Array(
                cycle
                    .steps()
                    .iter()
                    .map(|step| {
                        json!({
                            "process": snapshot.process_name(step.process),
                            "process_id": step.process,
                            "resource": snapshot.resource_name(step.resource),
                            "resource_id": step.resource,
                            "next": snapshot.process_name(step.next),
                            "next_id": step.next,
                        })
                    })
                    .collect(),
            ),
            None => Value::Null,
        };

        let report = json!({
            "deadlocked": check.is_deadlock(),
            "status": status,
            "process_count": snapshot.process_count(),
            "resource_count": snapshot.resource_count(),
            "request_count": snapshot.request_count(),
            "allocation_count": snapshot.allocation_count(),
            "cycle": cycle,
        });

        serde_json::to_string_pretty(&report).map_err(RagError::Json)
    }
}
