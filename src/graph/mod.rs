//! # Graph Derivation and Rendering Module
//!
//! This module derives the process-only wait-for graph from a resource
//! allocation graph and renders the allocation graph for people to read.
//!
//! ## Components
//!
//! ### Wait-For Graph
//! - **WaitForGraph**: `p -> q` when `p` requests a resource held by `q`;
//!   every edge keeps the resources that justify it
//! - **build_wait_for_graph**: pure derivation from request edges and the
//!   resource owner table, recomputed on every detection run
//!
//! ### Rendering
//! - **RagRenderer**: ASCII adjacency listing, Graphviz DOT and Mermaid, with
//!   optional highlighting of the detected wait cycle
//!
//! ## Example
//!
//! ```
//! use miette::IntoDiagnostic;
//! use rag_deadlock::graph::{RagRenderer, WaitForGraph};
//! use rag_deadlock::store::RagStore;
//!
//! # fn main() -> miette::Result<()> {
//! let mut store = RagStore::new();
//! let p0 = store.add_process("P0")?;
//! let p1 = store.add_process("P1")?;
//! let r0 = store.add_resource("R0")?;
//! store.add_request_edge(p0, r0)?;
//! store.add_allocation_edge(r0, p1)?;
//!
//! let wfg = WaitForGraph::from_snapshot(&store.snapshot());
//! assert_eq!(wfg.edges(), vec![(p0, p1)]);
//!
//! let mut output = Vec::new();
//! RagRenderer::new(true).render_dot(&store.snapshot(), None, &mut output)?;
//! assert!(String::from_utf8(output).into_diagnostic()?.contains("digraph"));
//! # Ok(())
//! # }
//! ```

mod renderer;
mod wait_for;

pub use renderer::RagRenderer;
pub use wait_for::{WaitForGraph, build_wait_for_graph};
