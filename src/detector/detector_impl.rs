use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info};

use crate::core::{ProcessId, ResourceId};
use crate::graph::WaitForGraph;
use crate::store::RagSnapshot;

/// One link of a deadlock: `process` requests `resource`, which `next` holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitStep {
    pub process: ProcessId,
    pub resource: ResourceId,
    pub next: ProcessId,
}

impl fmt::Display for WaitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -({})-> {}", self.process, self.resource, self.next)
    }
}

/// A cycle of waiting processes
///
/// The `next` of the last step is the `process` of the first one. A single
/// step whose `process` equals its `next` is a process waiting on itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlockCycle {
    steps: Vec<WaitStep>,
}

impl DeadlockCycle {
    pub fn new(steps: Vec<WaitStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[WaitStep] {
        &self.steps
    }

    /// Processes in cycle order, starting where the cycle was entered
    pub fn processes(&self) -> Vec<ProcessId> {
        self.steps.iter().map(|step| step.process).collect()
    }

    /// Witness resources in cycle order
    pub fn resources(&self) -> Vec<ResourceId> {
        self.steps.iter().map(|step| step.resource).collect()
    }

    pub fn contains(&self, process: ProcessId) -> bool {
        self.steps.iter().any(|step| step.process == process)
    }

    /// Witness resource for the `from -> to` link, if that link is in the cycle
    pub fn witness_for(&self, from: ProcessId, to: ProcessId) -> Option<ResourceId> {
        self.steps
            .iter()
            .find(|step| step.process == from && step.next == to)
            .map(|step| step.resource)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_self_wait(&self) -> bool {
        self.steps.len() == 1
    }
}

impl fmt::Display for DeadlockCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain: Vec<String> = self.steps.iter().map(ToString::to_string).collect();
        write!(f, "{}", chain.join(", "))
    }
}

/// Outcome of a deadlock check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadlockCheck {
    /// The graph has no processes, so nothing can wait
    NoProcesses,
    /// The wait-for graph is acyclic
    NoDeadlock,
    /// The first cycle found in the wait-for graph
    Deadlock(DeadlockCycle),
}

impl DeadlockCheck {
    pub fn is_deadlock(&self) -> bool {
        matches!(self, DeadlockCheck::Deadlock(_))
    }

    pub fn cycle(&self) -> Option<&DeadlockCycle> {
        match self {
            DeadlockCheck::Deadlock(cycle) => Some(cycle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnStack,
    Done,
}

struct Frame {
    process: ProcessId,
    successors: Vec<ProcessId>,
    cursor: usize,
}

/// Per-run DFS state: visit state of each process plus the active path
struct TraversalContext<'g> {
    wfg: &'g WaitForGraph,
    states: HashMap<ProcessId, VisitState>,
    stack: Vec<Frame>,
}

impl<'g> TraversalContext<'g> {
    fn new(wfg: &'g WaitForGraph) -> Self {
        Self {
            wfg,
            states: HashMap::with_capacity(wfg.node_count()),
            stack: Vec::new(),
        }
    }

    fn state_of(&self, process: ProcessId) -> VisitState {
        self.states
            .get(&process)
            .copied()
            .unwrap_or(VisitState::Unvisited)
    }

    fn enter(&mut self, process: ProcessId) {
        self.states.insert(process, VisitState::OnStack);
        self.stack.push(Frame {
            process,
            successors: self.wfg.successors(process),
            cursor: 0,
        });
    }

    /// Explore everything reachable from `root`; returns the processes of the
    /// first cycle closed along the way
    fn search_from(&mut self, root: ProcessId) -> Option<Vec<ProcessId>> {
        self.enter(root);

        loop {
            let frame = self.stack.last_mut()?;
            match frame.successors.get(frame.cursor).copied() {
                Some(next) => {
                    frame.cursor += 1;
                    match self.state_of(next) {
                        VisitState::Unvisited => self.enter(next),
                        VisitState::OnStack => return Some(self.close_cycle(next)),
                        VisitState::Done => {}
                    }
                }
                None => {
                    let finished = frame.process;
                    self.stack.pop();
                    self.states.insert(finished, VisitState::Done);
                }
            }
        }
    }

    /// The contiguous run of the active path from `entry` to the top
    ///
    /// `entry` is `OnStack`, so it always has a frame on the active path.
    fn close_cycle(&self, entry: ProcessId) -> Vec<ProcessId> {
        let start = self.stack.iter().position(|frame| frame.process == entry);
        debug_assert!(
            start.is_some(),
            "on-stack process {entry} missing from the active path"
        );
        let start = start.unwrap_or(0);
        self.stack[start..]
            .iter()
            .map(|frame| frame.process)
            .collect()
    }
}

/// Find the first cycle of the wait-for graph
///
/// Roots are tried in ascending process id order and successors are visited
/// in ascending id order, so the reported cycle is deterministic. Each link is
/// annotated with its lowest-id witness resource.
pub fn detect_cycle(wfg: &WaitForGraph) -> Option<DeadlockCycle> {
    let mut context = TraversalContext::new(wfg);

    for root in wfg.processes() {
        if context.state_of(root) != VisitState::Unvisited {
            continue;
        }
        if let Some(processes) = context.search_from(root) {
            return annotate(wfg, &processes);
        }
    }

    None
}

/// Attach the lowest-id witness to every link of a traversed cycle
///
/// Every link was reached by following a wait-for edge, and
/// [`WaitForGraph::add_wait`] never creates an edge without a witness. A
/// missing witness is a broken graph, never an acyclic one.
fn annotate(wfg: &WaitForGraph, processes: &[ProcessId]) -> Option<DeadlockCycle> {
    let mut steps = Vec::with_capacity(processes.len());
    for (i, &process) in processes.iter().enumerate() {
        let next = processes[(i + 1) % processes.len()];
        let witness = wfg.witness(process, next);
        debug_assert!(
            witness.is_some(),
            "wait-for edge {process} -> {next} has no witness"
        );
        let resource = witness?;
        steps.push(WaitStep {
            process,
            resource,
            next,
        });
    }
    Some(DeadlockCycle::new(steps))
}

/// Build the wait-for graph of `snapshot` and search it for a deadlock
pub fn run_deadlock_check(snapshot: &RagSnapshot<'_>) -> DeadlockCheck {
    if snapshot.process_count() == 0 {
        debug!("deadlock check skipped: no processes");
        return DeadlockCheck::NoProcesses;
    }

    let wfg = WaitForGraph::from_snapshot(snapshot);
    match detect_cycle(&wfg) {
        Some(cycle) => {
            info!(length = cycle.len(), cycle = %cycle, "deadlock detected");
            DeadlockCheck::Deadlock(cycle)
        }
        None => {
            debug!("no deadlock detected");
            DeadlockCheck::NoDeadlock
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::RagStore;

    fn chain(edges: &[(usize, usize)], nodes: usize) -> WaitForGraph {
        let mut wfg = WaitForGraph::new();
        for id in 0..nodes {
            wfg.add_process(ProcessId(id));
        }
        for (i, &(from, to)) in edges.iter().enumerate() {
            wfg.add_wait(ProcessId(from), ProcessId(to), ResourceId(i));
        }
        wfg
    }

    #[test]
    fn test_no_cycle_in_linear_chain() {
        let wfg = chain(&[(0, 1), (1, 2)], 3);

        assert_eq!(detect_cycle(&wfg), None);
    }

    #[test]
    fn test_empty_graph_has_no_cycle() {
        assert_eq!(detect_cycle(&WaitForGraph::new()), None);
    }

    #[test]
    fn test_two_process_cycle_with_witnesses() {
        let wfg = chain(&[(0, 1), (1, 0)], 2);

        let cycle = detect_cycle(&wfg).unwrap();

        assert_eq!(
            cycle.steps(),
            &[
                WaitStep {
                    process: ProcessId(0),
                    resource: ResourceId(0),
                    next: ProcessId(1),
                },
                WaitStep {
                    process: ProcessId(1),
                    resource: ResourceId(1),
                    next: ProcessId(0),
                },
            ]
        );
    }

    #[test]
    fn test_cycle_excludes_path_prefix() {
        // 0 -> 1 -> 2 -> 3 -> 1: the cycle is 1, 2, 3
        let wfg = chain(&[(0, 1), (1, 2), (2, 3), (3, 1)], 4);

        let cycle = detect_cycle(&wfg).unwrap();

        assert_eq!(
            cycle.processes(),
            vec![ProcessId(1), ProcessId(2), ProcessId(3)]
        );
        assert_eq!(cycle.steps().last().unwrap().next, ProcessId(1));
    }

    #[test]
    fn test_self_wait_is_one_step_cycle() {
        let wfg = chain(&[(0, 0)], 1);

        let cycle = detect_cycle(&wfg).unwrap();

        assert!(cycle.is_self_wait());
        assert_eq!(cycle.processes(), vec![ProcessId(0)]);
        assert_eq!(cycle.steps()[0].next, ProcessId(0));
    }

    #[test]
    fn test_first_cycle_follows_ascending_order() {
        // Two disjoint cycles; the one reachable from the lowest root wins.
        let wfg = chain(&[(2, 3), (3, 2), (0, 1), (1, 0)], 4);

        let cycle = detect_cycle(&wfg).unwrap();

        assert_eq!(cycle.processes(), vec![ProcessId(0), ProcessId(1)]);
    }

    #[test]
    fn test_successor_order_picks_lowest_neighbor_first() {
        // From 0 both 1 and 2 lead back to 0; 1 is explored first.
        let wfg = chain(&[(0, 2), (0, 1), (2, 0), (1, 0)], 3);

        let cycle = detect_cycle(&wfg).unwrap();

        assert_eq!(cycle.processes(), vec![ProcessId(0), ProcessId(1)]);
    }

    #[test]
    fn test_done_nodes_are_not_revisited_as_cycles() {
        // Diamond: 0 -> 1 -> 3, 0 -> 2 -> 3. Reaching 3 twice is not a cycle.
        let wfg = chain(&[(0, 1), (0, 2), (1, 3), (2, 3)], 4);

        assert_eq!(detect_cycle(&wfg), None);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let edges: Vec<(usize, usize)> = (0..10_000).map(|i| (i, i + 1)).collect();
        let wfg = chain(&edges, 10_001);

        assert_eq!(detect_cycle(&wfg), None);
    }

    #[test]
    fn test_run_deadlock_check_on_empty_store() {
        let store = RagStore::new();

        assert_eq!(
            run_deadlock_check(&store.snapshot()),
            DeadlockCheck::NoProcesses
        );
    }

    #[test]
    fn test_witness_matches_store_state() {
        let mut store = RagStore::new();
        let p0 = store.add_process("P0").unwrap();
        let p1 = store.add_process("P1").unwrap();
        let r0 = store.add_resource("R0").unwrap();
        let r1 = store.add_resource("R1").unwrap();
        let r2 = store.add_resource("R2").unwrap();
        store.add_request_edge(p0, r2).unwrap();
        store.add_request_edge(p0, r1).unwrap();
        store.add_request_edge(p1, r0).unwrap();
        store.add_allocation_edge(r1, p1).unwrap();
        store.add_allocation_edge(r2, p1).unwrap();
        store.add_allocation_edge(r0, p0).unwrap();

        let check = store.run_deadlock_check();
        let cycle = check.cycle().unwrap();
        let snapshot = store.snapshot();

        for step in cycle.steps() {
            assert!(snapshot.is_requested(step.process, step.resource));
            assert_eq!(snapshot.owner_of(step.resource), Some(step.next));
        }
        // R1 and R2 both justify P0 -> P1; the lower id is reported
        assert_eq!(cycle.witness_for(p0, p1), Some(r1));
    }

    #[test]
    fn test_every_cycle_link_is_a_witnessed_edge() {
        let mut wfg = WaitForGraph::new();
        for id in 0..4 {
            wfg.add_process(ProcessId(id));
        }
        wfg.add_wait(ProcessId(0), ProcessId(1), ResourceId(7));
        wfg.add_wait(ProcessId(0), ProcessId(1), ResourceId(2));
        wfg.add_wait(ProcessId(1), ProcessId(2), ResourceId(5));
        wfg.add_wait(ProcessId(2), ProcessId(3), ResourceId(1));
        wfg.add_wait(ProcessId(3), ProcessId(1), ResourceId(4));

        let cycle = detect_cycle(&wfg).unwrap();

        assert_eq!(
            cycle.processes(),
            vec![ProcessId(1), ProcessId(2), ProcessId(3)]
        );
        for step in cycle.steps() {
            assert!(wfg.has_edge(step.process, step.next));
            assert_eq!(Some(step.resource), wfg.witness(step.process, step.next));
        }
    }

    #[test]
    fn test_cycle_display() {
        let wfg = chain(&[(0, 1), (1, 0)], 2);
        let cycle = detect_cycle(&wfg).unwrap();

        assert_eq!(cycle.to_string(), "P0 -(R0)-> P1, P1 -(R1)-> P0");
    }
}
