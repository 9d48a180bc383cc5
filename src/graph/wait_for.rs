//! Wait-for graph derivation
//!
//! The wait-for graph keeps only processes: an edge `p -> q` exists when `p`
//! requests some resource currently allocated to `q`. Each edge carries every
//! resource that justifies it.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::core::{ProcessId, RequestEdge, ResourceId};
use crate::store::RagSnapshot;

/// Process-to-process waiting relation derived from a resource allocation graph
#[derive(Debug, Clone, Default)]
pub struct WaitForGraph {
    graph: DiGraphMap<ProcessId, BTreeSet<ResourceId>>,
}

impl WaitForGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the wait-for graph of a store snapshot
    pub fn from_snapshot(snapshot: &RagSnapshot<'_>) -> Self {
        build_wait_for_graph(
            snapshot.processes().iter().map(|p| p.id),
            snapshot.requests(),
            snapshot.allocation_table(),
        )
    }

    pub fn add_process(&mut self, process: ProcessId) {
        self.graph.add_node(process);
    }

    /// Record that `from` waits on `to` because of `witness`
    ///
    /// `from == to` is kept: a process requesting a resource it already holds
    /// waits on itself.
    pub fn add_wait(&mut self, from: ProcessId, to: ProcessId, witness: ResourceId) {
        if let Some(witnesses) = self.graph.edge_weight_mut(from, to) {
            witnesses.insert(witness);
        } else {
            self.graph.add_edge(from, to, BTreeSet::from([witness]));
        }
    }

    /// All processes in ascending id order
    pub fn processes(&self) -> Vec<ProcessId> {
        let mut nodes: Vec<ProcessId> = self.graph.nodes().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Processes `process` waits on, in ascending id order
    pub fn successors(&self, process: ProcessId) -> Vec<ProcessId> {
        if !self.graph.contains_node(process) {
            return Vec::new();
        }
        let mut next: Vec<ProcessId> = self.graph.neighbors(process).collect();
        next.sort_unstable();
        next
    }

    pub fn has_edge(&self, from: ProcessId, to: ProcessId) -> bool {
        self.graph.contains_edge(from, to)
    }

    /// Every resource justifying `from -> to`, lowest id first
    pub fn witnesses(&self, from: ProcessId, to: ProcessId) -> Option<&BTreeSet<ResourceId>> {
        self.graph.edge_weight(from, to)
    }

    /// Lowest-id resource justifying `from -> to`
    pub fn witness(&self, from: ProcessId, to: ProcessId) -> Option<ResourceId> {
        self.witnesses(from, to)
            .and_then(|witnesses| witnesses.first().copied())
    }

    /// Edges ordered by source, then target
    pub fn edges(&self) -> Vec<(ProcessId, ProcessId)> {
        let mut edges: Vec<_> = self
            .graph
            .all_edges()
            .map(|(from, to, _)| (from, to))
            .collect();
        edges.sort_unstable();
        edges
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Underlying petgraph representation
    pub fn graph(&self) -> &DiGraphMap<ProcessId, BTreeSet<ResourceId>> {
        &self.graph
    }
}

/// Derive the wait-for graph from request edges and the resource owner table
///
/// Runs in O(P·R): every request looks up the single owner of its resource.
pub fn build_wait_for_graph(
    processes: impl IntoIterator<Item = ProcessId>,
    requests: impl IntoIterator<Item = RequestEdge>,
    allocations: &BTreeMap<ResourceId, ProcessId>,
) -> WaitForGraph {
    let mut wfg = WaitForGraph::new();

    for process in processes {
        wfg.add_process(process);
    }

    for request in requests {
        if let Some(&owner) = allocations.get(&request.resource) {
            wfg.add_wait(request.process, owner, request.resource);
        }
    }

    debug!(
        processes = wfg.node_count(),
        edges = wfg.edge_count(),
        "built wait-for graph"
    );
    wfg
}
