//! Report generation modules for different output formats
//!
//! This module contains report generators for the outcome of a deadlock
//! check:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use
//! - junit: JUnit XML format for CI/CD integration

pub mod human;
pub mod json;
pub mod junit;

use crate::detector::DeadlockCheck;
use crate::error::RagError;
use crate::store::RagSnapshot;

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from a deadlock check and the graph it ran on
    fn generate_report(
        &self,
        snapshot: &RagSnapshot<'_>,
        check: &DeadlockCheck,
    ) -> Result<String, RagError>;
}

// Re-export for convenience
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
pub use junit::JunitReportGenerator;
