//! # Resource Allocation Graph Store
//!
//! This module owns the mutable state of a resource allocation graph:
//! processes, resources, request edges (process waits for resource) and
//! allocation edges (resource held by process).
//!
//! ## Invariants
//!
//! - Process and resource ids are assigned in creation order and never reused
//!   until the store is reset.
//! - A resource has at most one allocation edge. Allocating an already held
//!   resource to another process replaces the holder and reports it.
//! - Edges only ever reference existing processes and resources.
//!
//! ## Example
//!
//! ```
//! use rag_deadlock::core::AllocationOutcome;
//! use rag_deadlock::store::RagStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = RagStore::new();
//! let p0 = store.add_process("P0")?;
//! let p1 = store.add_process("P1")?;
//! let r0 = store.add_resource("R0")?;
//!
//! store.add_allocation_edge(r0, p1)?;
//! let outcome = store.add_allocation_edge(r0, p0)?;
//!
//! assert_eq!(outcome, AllocationOutcome::Superseded { previous: p1 });
//! assert_eq!(store.owner_of(r0), Some(p0));
//! # Ok(())
//! # }
//! ```

mod shared;
mod store_impl;

pub use shared::SharedRagStore;
pub use store_impl::*;
