//! Core type definitions
//!
//! This module contains the basic data structures of a resource allocation
//! graph, with minimal logic - focusing on data representation.

use std::fmt;

use serde::Serialize;

/// Stable identifier of a process, assigned in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProcessId(pub usize);

/// Stable identifier of a resource, assigned in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceId(pub usize);

impl ProcessId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl ResourceId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// A process registered in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    pub id: ProcessId,
    pub name: String,
}

/// A resource registered in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
}

/// Process `process` has asked for, but not received, `resource`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestEdge {
    pub process: ProcessId,
    pub resource: ResourceId,
}

impl RequestEdge {
    pub fn new(process: ProcessId, resource: ResourceId) -> Self {
        Self { process, resource }
    }
}

impl fmt::Display for RequestEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.process, self.resource)
    }
}

/// Resource `resource` is currently held by `process`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AllocationEdge {
    pub resource: ResourceId,
    pub process: ProcessId,
}

impl AllocationEdge {
    pub fn new(resource: ResourceId, process: ProcessId) -> Self {
        Self { resource, process }
    }
}

impl fmt::Display for AllocationEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.resource, self.process)
    }
}

/// Which side of the bipartite graph an entity lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Process,
    Resource,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Process => write!(f, "process"),
            EntityKind::Resource => write!(f, "resource"),
        }
    }
}

/// Kind of edge, used when reporting edge-level failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Request,
    Allocation,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Request => write!(f, "request"),
            EdgeKind::Allocation => write!(f, "allocation"),
        }
    }
}

/// Result of a successful `add_allocation_edge`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationOutcome {
    /// The resource was free and is now held by the requested process
    Granted,
    /// The resource was held by `previous`, which has been replaced
    Superseded { previous: ProcessId },
}

impl AllocationOutcome {
    pub fn superseded_owner(&self) -> Option<ProcessId> {
        match self {
            AllocationOutcome::Granted => None,
            AllocationOutcome::Superseded { previous } => Some(*previous),
        }
    }
}
