//! # RAG Deadlock - Detect Deadlock in Resource Allocation Graphs
//!
//! RAG Deadlock keeps a resource allocation graph of processes and
//! single-instance resources, derives the wait-for graph between processes,
//! and reports whether that graph contains a cycle. When it does, every
//! process in the cycle is named together with the resource it is blocked
//! on.
//!
//! ## Main Components
//!
//! - **Store**: Registers processes and resources and holds the request and
//!   allocation edges between them
//! - **Graph**: Derives the wait-for graph and renders the allocation graph
//! - **Detector**: Finds a wait cycle with an iterative depth-first search
//! - **Scenario**: Loads and saves graphs as TOML files
//! - **Reports**: Generates human-readable and machine-readable reports
//!
//! ## Usage
//!
//! ### Example: Detecting a Two-Process Deadlock
//!
//! ```
//! use rag_deadlock::detector::DeadlockCheck;
//! use rag_deadlock::store::RagStore;
//!
//! # fn main() -> Result<(), rag_deadlock::error::RagError> {
//! let mut store = RagStore::new();
//! let p0 = store.add_process("P0")?;
//! let p1 = store.add_process("P1")?;
//! let r0 = store.add_resource("R0")?;
//! let r1 = store.add_resource("R1")?;
//!
//! // Each process holds one resource and asks for the other
//! store.add_allocation_edge(r0, p0)?;
//! store.add_allocation_edge(r1, p1)?;
//! store.add_request_edge(p0, r1)?;
//! store.add_request_edge(p1, r0)?;
//!
//! match store.run_deadlock_check() {
//!     DeadlockCheck::Deadlock(cycle) => {
//!         assert_eq!(cycle.processes(), vec![p0, p1]);
//!         assert_eq!(cycle.witness_for(p0, p1), Some(r1));
//!         println!("Deadlock: {cycle}");
//!     }
//!     other => panic!("expected a deadlock, got {other:?}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Loading a Scenario and Rendering It
//!
//! ```no_run
//! use std::path::Path;
//!
//! use rag_deadlock::graph::RagRenderer;
//! use rag_deadlock::reports::{HumanReportGenerator, ReportGenerator};
//! use rag_deadlock::scenario::Scenario;
//! use rag_deadlock::store::StoreLimits;
//! use miette::IntoDiagnostic;
//!
//! # fn main() -> miette::Result<()> {
//! let scenario = Scenario::parse_file(Path::new("deadlock.toml"))?;
//! let (store, _superseded) = scenario.into_store(StoreLimits::default())?;
//!
//! let check = store.run_deadlock_check();
//! let snapshot = store.snapshot();
//! println!(
//!     "{}",
//!     HumanReportGenerator::new().generate_report(&snapshot, &check)?
//! );
//!
//! // Generate a DOT file for Graphviz with the cycle highlighted
//! let mut dot_output = Vec::new();
//! RagRenderer::new(true).render_dot(&snapshot, check.cycle(), &mut dot_output)?;
//! std::fs::write("deadlock.dot", dot_output).into_diagnostic()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Sharing a Store Between Threads
//!
//! ```
//! use std::thread;
//!
//! use rag_deadlock::store::SharedRagStore;
//!
//! let shared = SharedRagStore::default();
//! let writer = shared.clone();
//!
//! thread::spawn(move || {
//!     writer.write(|store| store.add_process("worker").map(|_| ()))
//! })
//! .join()
//! .unwrap()
//! .unwrap();
//!
//! assert!(!shared.run_deadlock_check().is_deadlock());
//! ```

// Private modules
mod constants;
mod logging;
mod utils;

// Public modules
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod detector;
pub mod error;
pub mod executors;
pub mod graph;
pub mod reports;
pub mod scenario;
pub mod store;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();
    logging::init(cli.verbose);

    execute_command(cli.command)
}
