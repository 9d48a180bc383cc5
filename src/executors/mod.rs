//! Command executors that handle the actual logic for each command

pub mod check;
pub mod show;

use std::path::Path;

use console::style;
use miette::{Result, WrapErr};

use crate::scenario::Scenario;
use crate::store::{RagStore, StoreLimits};

/// Trait for command executors
pub trait CommandExecutor {
    type Config;

    /// Execute the command with the given configuration
    fn execute(config: Self::Config) -> Result<()>;
}

/// Load a scenario file into a fresh store, reporting superseded allocations
fn load_store(path: &Path, limits: StoreLimits) -> Result<RagStore> {
    eprintln!(
        "{} Loading scenario {}...",
        style("🔍").cyan(),
        style(path.display()).bold()
    );

    let scenario = Scenario::parse_file(path)
        .wrap_err_with(|| format!("Failed to load scenario '{}'", path.display()))?;
    let (store, superseded) = scenario
        .into_store(limits)
        .wrap_err("Failed to build the resource allocation graph")?;

    let snapshot = store.snapshot();
    for notice in &superseded {
        eprintln!(
            "  {} {} reassigned from {} to {}",
            style("ℹ").blue(),
            style(snapshot.resource_name(notice.resource)).yellow(),
            snapshot.process_name(notice.previous),
            snapshot.process_name(notice.current)
        );
    }

    eprintln!(
        "{} Loaded {} processes, {} resources, {} requests, {} allocations",
        style("✓").green(),
        style(snapshot.process_count()).yellow().bold(),
        style(snapshot.resource_count()).yellow().bold(),
        snapshot.request_count(),
        snapshot.allocation_count()
    );

    Ok(store)
}
