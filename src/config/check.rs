//! Check command configuration

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::common::missing_field;
use crate::store::StoreLimits;

/// Configuration for the check command
///
/// This struct contains all options for loading a scenario and reporting
/// whether it is deadlocked.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Scenario file to load
    pub scenario: PathBuf,
    /// Capacity of the store the scenario is loaded into
    pub limits: StoreLimits,
    /// Output format for the report
    pub format: OutputFormat,
    /// Whether to exit with error code if a deadlock is found
    pub error_on_deadlock: bool,
}

impl CheckConfig {
    pub fn builder() -> CheckConfigBuilder {
        CheckConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct CheckConfigBuilder {
    scenario: Option<PathBuf>,
    limits: Option<StoreLimits>,
    format: Option<OutputFormat>,
    error_on_deadlock: Option<bool>,
}

impl CheckConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scenario(mut self, scenario: PathBuf) -> Self {
        self.scenario = Some(scenario);
        self
    }

    pub fn with_limits(mut self, limits: StoreLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_error_on_deadlock(mut self, error_on_deadlock: bool) -> Self {
        self.error_on_deadlock = Some(error_on_deadlock);
        self
    }
}

impl crate::common::ConfigBuilder for CheckConfigBuilder {
    type Config = CheckConfig;

    fn build(self) -> Result<Self::Config, crate::error::RagError> {
        Ok(CheckConfig {
            scenario: self.scenario.ok_or_else(|| missing_field("scenario"))?,
            limits: self.limits.ok_or_else(|| missing_field("limits"))?,
            format: self.format.ok_or_else(|| missing_field("format"))?,
            error_on_deadlock: self
                .error_on_deadlock
                .ok_or_else(|| missing_field("error_on_deadlock"))?,
        })
    }
}
