//! Scenario files describing a resource allocation graph by name
//!
//! A scenario is the front end's persistence format. Loading one resolves
//! every name to an id and replays the declarations as store operations, so
//! the store's own validation applies unchanged.

use std::path::Path;

use miette::{NamedSource, Result, SourceSpan};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{AllocationOutcome, EntityKind, ProcessId, ResourceId};
use crate::error::{RagError, ScenarioParseError};
use crate::store::{RagSnapshot, RagStore, StoreLimits};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub processes: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requests: Vec<ScenarioRequest>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allocations: Vec<ScenarioAllocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioRequest {
    pub process: String,
    pub resource: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioAllocation {
    pub resource: String,
    pub process: String,
}

/// An allocation in the scenario that replaced an earlier holder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupersededAllocation {
    pub resource: ResourceId,
    pub previous: ProcessId,
    pub current: ProcessId,
}

impl Scenario {
    pub fn parse_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RagError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self::from_str_named(&path.display().to_string(), &content)?)
    }

    /// Parse scenario text; `name` labels the source in diagnostics
    pub fn from_str_named(name: &str, content: &str) -> Result<Self, RagError> {
        toml::from_str(content).map_err(|e| {
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            RagError::ScenarioParseError(Box::new(ScenarioParseError {
                file: name.to_string(),
                source_code: NamedSource::new(name, content.to_string()),
                span,
                source: e,
            }))
        })
    }

    /// Capture the current state of a store
    pub fn from_snapshot(snapshot: &RagSnapshot<'_>) -> Self {
        Self {
            processes: snapshot.processes().iter().map(|p| p.name.clone()).collect(),
            resources: snapshot.resources().iter().map(|r| r.name.clone()).collect(),
            requests: snapshot
                .requests()
                .map(|edge| ScenarioRequest {
                    process: snapshot.process_name(edge.process),
                    resource: snapshot.resource_name(edge.resource),
                })
                .collect(),
            allocations: snapshot
                .allocations()
                .map(|edge| ScenarioAllocation {
                    resource: snapshot.resource_name(edge.resource),
                    process: snapshot.process_name(edge.process),
                })
                .collect(),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, RagError> {
        Ok(toml::to_string(self)?)
    }

    /// Replay the scenario into `store`
    ///
    /// Entities are added in file order, so ids follow declaration order.
    /// Allocations that replace an earlier holder are returned. The replay
    /// runs on a copy, so on error `store` is left untouched.
    pub fn apply(&self, store: &mut RagStore) -> Result<Vec<SupersededAllocation>, RagError> {
        let mut staged = store.clone();
        let superseded = self.replay(&mut staged)?;
        *store = staged;

        info!(
            processes = store.process_count(),
            resources = store.resource_count(),
            superseded = superseded.len(),
            "scenario applied"
        );
        Ok(superseded)
    }

    fn replay(&self, store: &mut RagStore) -> Result<Vec<SupersededAllocation>, RagError> {
        for name in &self.processes {
            store.add_process(name)?;
        }
        for name in &self.resources {
            store.add_resource(name)?;
        }

        for request in &self.requests {
            let process = resolve_process(store, &request.process)?;
            let resource = resolve_resource(store, &request.resource)?;
            store.add_request_edge(process, resource)?;
        }

        let mut superseded = Vec::new();
        for allocation in &self.allocations {
            let resource = resolve_resource(store, &allocation.resource)?;
            let process = resolve_process(store, &allocation.process)?;
            if let AllocationOutcome::Superseded { previous } =
                store.add_allocation_edge(resource, process)?
            {
                superseded.push(SupersededAllocation {
                    resource,
                    previous,
                    current: process,
                });
            }
        }

        Ok(superseded)
    }

    /// Build a fresh store holding this scenario
    pub fn into_store(
        &self,
        limits: StoreLimits,
    ) -> Result<(RagStore, Vec<SupersededAllocation>), RagError> {
        let mut store = RagStore::with_limits(limits);
        let superseded = self.apply(&mut store)?;
        Ok((store, superseded))
    }
}

fn resolve_process(store: &RagStore, name: &str) -> Result<ProcessId, RagError> {
    store
        .process_by_name(name)
        .ok_or_else(|| RagError::UnknownName {
            kind: EntityKind::Process,
            name: name.to_string(),
        })
}

fn resolve_resource(store: &RagStore, name: &str) -> Result<ResourceId, RagError> {
    store
        .resource_by_name(name)
        .ok_or_else(|| RagError::UnknownName {
            kind: EntityKind::Resource,
            name: name.to_string(),
        })
}
