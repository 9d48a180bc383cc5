//! # Deadlock Detection Module
//!
//! This module searches the wait-for graph for a cycle of waiting processes.
//!
//! ## Algorithm
//!
//! An iterative depth-first search visits processes in ascending id order.
//! Each process is `Unvisited`, `OnStack` (on the active path) or `Done`
//! (fully explored without closing a cycle). Reaching an `OnStack` process
//! closes a cycle: the active path from that process to the top of the stack.
//! The search stops at the first cycle, and each link is annotated with the
//! lowest-id resource that justifies it.
//!
//! The traversal state lives in a per-call context, so detection is
//! re-entrant and needs no cleanup between runs.
//!
//! ## Example
//!
//! ```
//! use rag_deadlock::detector::DeadlockCheck;
//! use rag_deadlock::store::RagStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = RagStore::new();
//! let p0 = store.add_process("P0")?;
//! let p1 = store.add_process("P1")?;
//! let r0 = store.add_resource("R0")?;
//! let r1 = store.add_resource("R1")?;
//!
//! // Each process holds what the other one wants
//! store.add_request_edge(p0, r0)?;
//! store.add_request_edge(p1, r1)?;
//! store.add_allocation_edge(r0, p1)?;
//! store.add_allocation_edge(r1, p0)?;
//!
//! let check = store.run_deadlock_check();
//! assert!(check.is_deadlock());
//!
//! let cycle = check.cycle().unwrap();
//! assert_eq!(cycle.witness_for(p0, p1), Some(r0));
//! assert_eq!(cycle.witness_for(p1, p0), Some(r1));
//!
//! store.reset();
//! assert_eq!(store.run_deadlock_check(), DeadlockCheck::NoProcesses);
//! # Ok(())
//! # }
//! ```

mod detector_impl;

pub use detector_impl::*;
