//! Show command configuration

use std::path::PathBuf;

use crate::cli::GraphFormat;
use crate::common::missing_field;
use crate::store::StoreLimits;

#[derive(Debug, Clone)]
pub struct ShowConfig {
    pub scenario: PathBuf,
    pub limits: StoreLimits,
    pub format: GraphFormat,
    pub output: Option<PathBuf>,
    pub highlight_cycle: bool,
}

impl ShowConfig {
    pub fn builder() -> ShowConfigBuilder {
        ShowConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct ShowConfigBuilder {
    scenario: Option<PathBuf>,
    limits: Option<StoreLimits>,
    format: Option<GraphFormat>,
    output: Option<Option<PathBuf>>,
    highlight_cycle: Option<bool>,
}

impl ShowConfigBuilder {
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

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_highlight_cycle(mut self, highlight_cycle: bool) -> Self {
        self.highlight_cycle = Some(highlight_cycle);
        self
    }
}

impl crate::common::ConfigBuilder for ShowConfigBuilder {
    type Config = ShowConfig;

    fn build(self) -> Result<Self::Config, crate::error::RagError> {
        Ok(ShowConfig {
            scenario: self.scenario.ok_or_else(|| missing_field("scenario"))?,
            limits: self.limits.ok_or_else(|| missing_field("limits"))?,
            format: self.format.ok_or_else(|| missing_field("format"))?,
            output: self.output.ok_or_else(|| missing_field("output"))?,
            highlight_cycle: self
                .highlight_cycle
                .ok_or_else(|| missing_field("highlight_cycle"))?,
        })
    }
}
