use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, info};

use crate::constants::limits::{DEFAULT_MAX_PROCESSES, DEFAULT_MAX_RESOURCES};
use crate::core::{
    AllocationEdge, AllocationOutcome, EdgeKind, EntityKind, Process, ProcessId, RequestEdge,
    Resource, ResourceId,
};
use crate::detector::{DeadlockCheck, run_deadlock_check};
use crate::error::RagError;

/// Upper bounds on the number of entities a store accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    pub max_processes: usize,
    pub max_resources: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_processes: DEFAULT_MAX_PROCESSES,
            max_resources: DEFAULT_MAX_RESOURCES,
        }
    }
}

impl StoreLimits {
    pub fn new(max_processes: usize, max_resources: usize) -> Self {
        Self {
            max_processes,
            max_resources,
        }
    }
}

/// Owner of all processes, resources, request edges and allocation edges
///
/// Ids are positions in the entity tables: entities are only ever appended,
/// and `reset` clears the tables together with the id counters.
#[derive(Debug, Clone, Default)]
pub struct RagStore {
    processes: Vec<Process>,
    resources: Vec<Resource>,
    process_names: HashMap<String, ProcessId>,
    resource_names: HashMap<String, ResourceId>,
    requests: BTreeSet<RequestEdge>,
    // One entry per allocated resource, which is the single-owner invariant.
    allocations: BTreeMap<ResourceId, ProcessId>,
    limits: StoreLimits,
}

impl RagStore {
    /// Create an empty store with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with explicit limits
    pub fn with_limits(limits: StoreLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    /// Register a new process and return its id
    pub fn add_process(&mut self, name: &str) -> Result<ProcessId, RagError> {
        if self.process_names.contains_key(name) {
            return Err(RagError::DuplicateName {
                kind: EntityKind::Process,
                name: name.to_string(),
            });
        }
        if self.processes.len() >= self.limits.max_processes {
            return Err(RagError::CapacityExceeded {
                kind: EntityKind::Process,
                limit: self.limits.max_processes,
            });
        }

        let id = ProcessId(self.processes.len());
        self.processes.push(Process {
            id,
            name: name.to_string(),
        });
        self.process_names.insert(name.to_string(), id);

        debug!(process = %id, name, "registered process");
        Ok(id)
    }

    /// Register a new resource and return its id
    pub fn add_resource(&mut self, name: &str) -> Result<ResourceId, RagError> {
        if self.resource_names.contains_key(name) {
            return Err(RagError::DuplicateName {
                kind: EntityKind::Resource,
                name: name.to_string(),
            });
        }
        if self.resources.len() >= self.limits.max_resources {
            return Err(RagError::CapacityExceeded {
                kind: EntityKind::Resource,
                limit: self.limits.max_resources,
            });
        }

        let id = ResourceId(self.resources.len());
        self.resources.push(Resource {
            id,
            name: name.to_string(),
        });
        self.resource_names.insert(name.to_string(), id);

        debug!(resource = %id, name, "registered resource");
        Ok(id)
    }

    /// Record that `process` is waiting for `resource`
    pub fn add_request_edge(
        &mut self,
        process: ProcessId,
        resource: ResourceId,
    ) -> Result<(), RagError> {
        self.check_process(process)?;
        self.check_resource(resource)?;

        let edge = RequestEdge::new(process, resource);
        if !self.requests.insert(edge) {
            return Err(RagError::AlreadyExists {
                kind: EdgeKind::Request,
                edge: edge.to_string(),
            });
        }

        debug!(%edge, "added request edge");
        Ok(())
    }

    /// Hand `resource` to `process`, replacing any previous holder
    ///
    /// Replacing a holder is a successful mutation; the previous owner is
    /// returned in [`AllocationOutcome::Superseded`].
    pub fn add_allocation_edge(
        &mut self,
        resource: ResourceId,
        process: ProcessId,
    ) -> Result<AllocationOutcome, RagError> {
        self.check_resource(resource)?;
        self.check_process(process)?;

        let edge = AllocationEdge::new(resource, process);
        match self.allocations.insert(resource, process) {
            None => {
                debug!(%edge, "added allocation edge");
                Ok(AllocationOutcome::Granted)
            }
            Some(previous) if previous == process => Err(RagError::AlreadyExists {
                kind: EdgeKind::Allocation,
                edge: edge.to_string(),
            }),
            Some(previous) => {
                info!(
                    %resource,
                    previous = %previous,
                    current = %process,
                    "allocation superseded previous owner"
                );
                Ok(AllocationOutcome::Superseded { previous })
            }
        }
    }

    /// Withdraw the request of `process` for `resource`
    pub fn remove_request_edge(
        &mut self,
        process: ProcessId,
        resource: ResourceId,
    ) -> Result<(), RagError> {
        let edge = RequestEdge::new(process, resource);
        if !self.requests.remove(&edge) {
            return Err(RagError::EdgeNotFound {
                kind: EdgeKind::Request,
                edge: edge.to_string(),
            });
        }

        debug!(%edge, "removed request edge");
        Ok(())
    }

    /// Release `resource` from `process`
    pub fn remove_allocation_edge(
        &mut self,
        resource: ResourceId,
        process: ProcessId,
    ) -> Result<(), RagError> {
        let edge = AllocationEdge::new(resource, process);
        if self.allocations.get(&resource) != Some(&process) {
            return Err(RagError::EdgeNotFound {
                kind: EdgeKind::Allocation,
                edge: edge.to_string(),
            });
        }

        self.allocations.remove(&resource);
        debug!(%edge, "removed allocation edge");
        Ok(())
    }

    /// Drop every process, resource and edge
    pub fn reset(&mut self) {
        self.processes.clear();
        self.resources.clear();
        self.process_names.clear();
        self.resource_names.clear();
        self.requests.clear();
        self.allocations.clear();

        debug!("store reset");
    }

    /// Read-only view of the current state
    pub fn snapshot(&self) -> RagSnapshot<'_> {
        RagSnapshot {
            processes: &self.processes,
            resources: &self.resources,
            requests: &self.requests,
            allocations: &self.allocations,
        }
    }

    /// Build the wait-for graph and search it for the first deadlock cycle
    pub fn run_deadlock_check(&self) -> DeadlockCheck {
        run_deadlock_check(&self.snapshot())
    }

    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes.get(id.index())
    }

    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.index())
    }

    pub fn process_by_name(&self, name: &str) -> Option<ProcessId> {
        self.process_names.get(name).copied()
    }

    pub fn resource_by_name(&self, name: &str) -> Option<ResourceId> {
        self.resource_names.get(name).copied()
    }

    pub fn owner_of(&self, resource: ResourceId) -> Option<ProcessId> {
        self.allocations.get(&resource).copied()
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    fn check_process(&self, id: ProcessId) -> Result<(), RagError> {
        if id.index() < self.processes.len() {
            Ok(())
        } else {
            Err(RagError::InvalidReference {
                kind: EntityKind::Process,
                id: id.index(),
            })
        }
    }

    fn check_resource(&self, id: ResourceId) -> Result<(), RagError> {
        if id.index() < self.resources.len() {
            Ok(())
        } else {
            Err(RagError::InvalidReference {
                kind: EntityKind::Resource,
                id: id.index(),
            })
        }
    }
}

/// Borrowed, read-only view of a [`RagStore`]
#[derive(Debug, Clone, Copy)]
pub struct RagSnapshot<'a> {
    processes: &'a [Process],
    resources: &'a [Resource],
    requests: &'a BTreeSet<RequestEdge>,
    allocations: &'a BTreeMap<ResourceId, ProcessId>,
}

impl<'a> RagSnapshot<'a> {
    /// Processes in ascending id order
    pub fn processes(&self) -> &'a [Process] {
        self.processes
    }

    /// Resources in ascending id order
    pub fn resources(&self) -> &'a [Resource] {
        self.resources
    }

    /// Request edges ordered by process, then resource
    pub fn requests(&self) -> impl Iterator<Item = RequestEdge> + 'a {
        self.requests.iter().copied()
    }

    /// Allocation edges ordered by resource
    pub fn allocations(&self) -> impl Iterator<Item = AllocationEdge> + 'a {
        self.allocations
            .iter()
            .map(|(&resource, &process)| AllocationEdge::new(resource, process))
    }

    /// Resource-indexed owner table
    pub fn allocation_table(&self) -> &'a BTreeMap<ResourceId, ProcessId> {
        self.allocations
    }

    pub fn owner_of(&self, resource: ResourceId) -> Option<ProcessId> {
        self.allocations.get(&resource).copied()
    }

    pub fn is_requested(&self, process: ProcessId, resource: ResourceId) -> bool {
        self.requests.contains(&RequestEdge::new(process, resource))
    }

    /// Display name of a process, falling back to its id
    pub fn process_name(&self, id: ProcessId) -> String {
        self.processes
            .get(id.index())
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Display name of a resource, falling back to its id
    pub fn resource_name(&self, id: ResourceId) -> String {
        self.resources
            .get(id.index())
            .map(|r| r.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    pub fn allocation_count(&self) -> usize {
        self.allocations.len()
    }

    /// True when the store holds no processes, resources or edges
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
            && self.resources.is_empty()
            && self.requests.is_empty()
            && self.allocations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn two_by_two() -> (RagStore, [ProcessId; 2], [ResourceId; 2]) {
        let mut store = RagStore::new();
        let p0 = store.add_process("P0").unwrap();
        let p1 = store.add_process("P1").unwrap();
        let r0 = store.add_resource("R0").unwrap();
        let r1 = store.add_resource("R1").unwrap();
        (store, [p0, p1], [r0, r1])
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let (store, [p0, p1], [r0, r1]) = two_by_two();

        assert_eq!(p0, ProcessId(0));
        assert_eq!(p1, ProcessId(1));
        assert_eq!(r0, ResourceId(0));
        assert_eq!(r1, ResourceId(1));
        assert_eq!(store.process(p1).unwrap().name, "P1");
        assert_eq!(store.resource_by_name("R1"), Some(r1));
    }

    #[test]
    fn test_duplicate_process_name_rejected() {
        let mut store = RagStore::new();
        store.add_process("editor").unwrap();

        let err = store.add_process("editor").unwrap_err();

        assert!(matches!(
            err,
            RagError::DuplicateName {
                kind: EntityKind::Process,
                ..
            }
        ));
        assert_eq!(store.process_count(), 1);
    }

    #[test]
    fn test_duplicate_resource_name_rejected() {
        let mut store = RagStore::new();
        store.add_resource("printer").unwrap();

        let err = store.add_resource("printer").unwrap_err();

        assert!(matches!(
            err,
            RagError::DuplicateName {
                kind: EntityKind::Resource,
                ..
            }
        ));
        assert_eq!(store.resource_count(), 1);
    }

    #[test]
    fn test_process_and_resource_names_are_separate() {
        let mut store = RagStore::new();
        store.add_process("disk").unwrap();

        assert!(store.add_resource("disk").is_ok());
    }

    #[test]
    fn test_capacity_limit() {
        let mut store = RagStore::with_limits(StoreLimits::new(1, 2));
        store.add_process("P0").unwrap();
        store.add_resource("R0").unwrap();
        store.add_resource("R1").unwrap();

        assert!(matches!(
            store.add_process("P1"),
            Err(RagError::CapacityExceeded {
                kind: EntityKind::Process,
                limit: 1
            })
        ));
        assert!(matches!(
            store.add_resource("R2"),
            Err(RagError::CapacityExceeded {
                kind: EntityKind::Resource,
                limit: 2
            })
        ));
    }

    #[test]
    fn test_request_edge_validation() {
        let (mut store, [p0, _], [r0, _]) = two_by_two();

        assert!(matches!(
            store.add_request_edge(ProcessId(9), r0),
            Err(RagError::InvalidReference {
                kind: EntityKind::Process,
                id: 9
            })
        ));
        assert!(matches!(
            store.add_request_edge(p0, ResourceId(9)),
            Err(RagError::InvalidReference {
                kind: EntityKind::Resource,
                id: 9
            })
        ));

        store.add_request_edge(p0, r0).unwrap();
        assert!(matches!(
            store.add_request_edge(p0, r0),
            Err(RagError::AlreadyExists {
                kind: EdgeKind::Request,
                ..
            })
        ));
        assert_eq!(store.snapshot().request_count(), 1);
    }

    #[test]
    fn test_allocation_edge_validation() {
        let (mut store, [p0, _], [r0, _]) = two_by_two();

        assert!(matches!(
            store.add_allocation_edge(ResourceId(5), p0),
            Err(RagError::InvalidReference {
                kind: EntityKind::Resource,
                id: 5
            })
        ));

        assert_eq!(
            store.add_allocation_edge(r0, p0).unwrap(),
            AllocationOutcome::Granted
        );
        assert!(matches!(
            store.add_allocation_edge(r0, p0),
            Err(RagError::AlreadyExists {
                kind: EdgeKind::Allocation,
                ..
            })
        ));
    }

    #[test]
    fn test_reallocation_supersedes_previous_owner() {
        let (mut store, [p0, p1], [r0, _]) = two_by_two();
        store.add_allocation_edge(r0, p1).unwrap();

        let outcome = store.add_allocation_edge(r0, p0).unwrap();

        assert_eq!(outcome, AllocationOutcome::Superseded { previous: p1 });
        let allocations: Vec<_> = store.snapshot().allocations().collect();
        assert_eq!(allocations, vec![AllocationEdge::new(r0, p0)]);
    }

    #[test]
    fn test_single_owner_after_many_allocations() {
        let (mut store, [p0, p1], [r0, r1]) = two_by_two();
        let sequence = [(r0, p0), (r0, p1), (r1, p1), (r0, p0), (r1, p0), (r1, p1)];
        for (resource, process) in sequence {
            let _ = store.add_allocation_edge(resource, process);
        }

        let mut per_resource: HashMap<ResourceId, usize> = HashMap::new();
        for edge in store.snapshot().allocations() {
            *per_resource.entry(edge.resource).or_default() += 1;
        }

        assert!(per_resource.values().all(|&count| count <= 1));
        assert_eq!(store.owner_of(r0), Some(p0));
        assert_eq!(store.owner_of(r1), Some(p1));
    }

    #[test]
    fn test_remove_missing_edges_leaves_state_unchanged() {
        let (mut store, [p0, p1], [r0, r1]) = two_by_two();
        store.add_request_edge(p0, r0).unwrap();
        store.add_allocation_edge(r1, p1).unwrap();

        assert!(matches!(
            store.remove_request_edge(p1, r0),
            Err(RagError::EdgeNotFound {
                kind: EdgeKind::Request,
                ..
            })
        ));
        assert!(matches!(
            store.remove_allocation_edge(r1, p0),
            Err(RagError::EdgeNotFound {
                kind: EdgeKind::Allocation,
                ..
            })
        ));

        let snapshot = store.snapshot();
        assert_eq!(
            snapshot.requests().collect::<Vec<_>>(),
            vec![RequestEdge::new(p0, r0)]
        );
        assert_eq!(
            snapshot.allocations().collect::<Vec<_>>(),
            vec![AllocationEdge::new(r1, p1)]
        );
    }

    #[test]
    fn test_remove_existing_edges() {
        let (mut store, [p0, p1], [r0, r1]) = two_by_two();
        store.add_request_edge(p0, r0).unwrap();
        store.add_allocation_edge(r1, p1).unwrap();

        store.remove_request_edge(p0, r0).unwrap();
        store.remove_allocation_edge(r1, p1).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.request_count(), 0);
        assert_eq!(snapshot.allocation_count(), 0);
        assert_eq!(store.owner_of(r1), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let (mut store, [p0, p1], [r0, r1]) = two_by_two();
        store.add_request_edge(p0, r0).unwrap();
        store.add_allocation_edge(r1, p1).unwrap();

        store.reset();

        let snapshot = store.snapshot();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.process_count(), 0);
        assert_eq!(snapshot.resource_count(), 0);
        assert_eq!(store.process_by_name("P0"), None);
        // Ids restart after a reset
        assert_eq!(store.add_process("fresh").unwrap(), ProcessId(0));
    }

    #[test]
    fn test_reset_keeps_limits() {
        let mut store = RagStore::with_limits(StoreLimits::new(3, 4));
        store.add_process("P0").unwrap();

        store.reset();

        assert_eq!(store.limits(), StoreLimits::new(3, 4));
    }

    #[test]
    fn test_snapshot_names() {
        let (store, [p0, _], [_, r1]) = two_by_two();
        let snapshot = store.snapshot();

        assert_eq!(snapshot.process_name(p0), "P0");
        assert_eq!(snapshot.resource_name(r1), "R1");
        assert_eq!(snapshot.process_name(ProcessId(42)), "P42");
    }
}
