//! End-to-end tests that drive scenario files through the commands

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rag_deadlock::cli::{Cli, GraphFormat};
use rag_deadlock::commands::execute_command;
use rag_deadlock::common::ConfigBuilder;
use rag_deadlock::config::ShowConfig;
use rag_deadlock::error::RagError;
use rag_deadlock::executors::CommandExecutor;
use rag_deadlock::executors::show::ShowExecutor;
use rag_deadlock::graph::RagRenderer;
use rag_deadlock::reports::{JsonReportGenerator, ReportGenerator};
use rag_deadlock::scenario::Scenario;
use rag_deadlock::store::StoreLimits;
use tempfile::TempDir;

const DINING: &str = r#"
processes = ["philosopher-0", "philosopher-1", "philosopher-2"]
resources = ["fork-0", "fork-1", "fork-2"]

[[allocations]]
resource = "fork-0"
process = "philosopher-0"

[[allocations]]
resource = "fork-1"
process = "philosopher-1"

[[allocations]]
resource = "fork-2"
process = "philosopher-2"

[[requests]]
process = "philosopher-0"
resource = "fork-1"

[[requests]]
process = "philosopher-1"
resource = "fork-2"

[[requests]]
process = "philosopher-2"
resource = "fork-0"
"#;

const CLASSIC: &str = r#"
processes = ["P0", "P1"]
resources = ["R0", "R1"]

[[requests]]
process = "P0"
resource = "R0"

[[requests]]
process = "P1"
resource = "R1"

[[allocations]]
resource = "R0"
process = "P1"

[[allocations]]
resource = "R1"
process = "P0"
"#;

fn write_scenario(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn show(path: &Path, format: GraphFormat, output: &Path, highlight: bool) -> String {
    let config = ShowConfig::builder()
        .with_scenario(path.to_path_buf())
        .with_limits(StoreLimits::default())
        .with_format(format)
        .with_output(Some(output.to_path_buf()))
        .with_highlight_cycle(highlight)
        .build()
        .unwrap();

    ShowExecutor::execute(config).unwrap();
    fs::read_to_string(output).unwrap()
}

#[test]
fn test_dining_philosophers_deadlock() {
    let dir = TempDir::new().unwrap();
    let path = write_scenario(&dir, "dining.toml", DINING);

    let scenario = Scenario::parse_file(&path).unwrap();
    let (store, superseded) = scenario.into_store(StoreLimits::default()).unwrap();
    let check = store.run_deadlock_check();

    assert!(superseded.is_empty());
    let cycle = check.cycle().unwrap();
    let snapshot = store.snapshot();
    let names: Vec<String> = cycle
        .processes()
        .into_iter()
        .map(|p| snapshot.process_name(p))
        .collect();
    assert_eq!(
        names,
        vec!["philosopher-0", "philosopher-1", "philosopher-2"]
    );
    assert_eq!(
        cycle.to_string(),
        "P0 -(R1)-> P1, P1 -(R2)-> P2, P2 -(R0)-> P0"
    );
}

#[test]
fn test_missing_scenario_file() {
    let dir = TempDir::new().unwrap();

    let err = Scenario::parse_file(&dir.path().join("absent.toml")).unwrap_err();

    assert!(predicate::str::contains("Failed to read file").eval(&err.to_string()));
}

#[test]
fn test_invalid_scenario_reports_file_name() {
    let dir = TempDir::new().unwrap();
    let path = write_scenario(&dir, "broken.toml", "processes = [\"P0\"\n");

    let err = Scenario::parse_file(&path).unwrap_err();

    assert!(predicate::str::contains("Invalid scenario syntax").eval(&err.to_string()));
    assert!(predicate::str::contains("broken.toml").eval(&err.to_string()));
}

#[test]
fn test_scenario_exceeding_limits() {
    let scenario = Scenario::from_str_named("dining.toml", DINING).unwrap();

    let err = scenario.into_store(StoreLimits::new(2, 50)).unwrap_err();

    assert!(matches!(err, RagError::CapacityExceeded { limit: 2, .. }));
}

#[test]
fn test_saved_scenario_reloads_identically() {
    let dir = TempDir::new().unwrap();
    let scenario = Scenario::from_str_named("dining.toml", DINING).unwrap();
    let (store, _) = scenario.into_store(StoreLimits::default()).unwrap();

    let saved = Scenario::from_snapshot(&store.snapshot());
    let path = write_scenario(&dir, "saved.toml", &saved.to_toml_string().unwrap());
    let (reloaded, _) = Scenario::parse_file(&path)
        .unwrap()
        .into_store(StoreLimits::default())
        .unwrap();

    assert_eq!(
        reloaded.snapshot().requests().collect::<Vec<_>>(),
        store.snapshot().requests().collect::<Vec<_>>()
    );
    assert_eq!(
        reloaded.snapshot().allocations().collect::<Vec<_>>(),
        store.snapshot().allocations().collect::<Vec<_>>()
    );
    assert_eq!(reloaded.run_deadlock_check(), store.run_deadlock_check());
}

#[test]
fn test_json_report_for_scenario() {
    let scenario = Scenario::from_str_named("classic.toml", CLASSIC).unwrap();
    let (store, _) = scenario.into_store(StoreLimits::default()).unwrap();

    let report = JsonReportGenerator::new()
        .generate_report(&store.snapshot(), &store.run_deadlock_check())
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&report).unwrap();

    assert_eq!(json["deadlocked"], true);
    assert_eq!(json["cycle"][0]["resource"], "R0");
    assert_eq!(json["cycle"][1]["resource"], "R1");
}

#[test]
fn test_show_ascii_highlights_cycle() {
    let dir = TempDir::new().unwrap();
    let path = write_scenario(&dir, "classic.toml", CLASSIC);

    let output = show(&path, GraphFormat::Ascii, &dir.path().join("rag.txt"), true);

    assert_eq!(
        output,
        "===== RAG =====\n\
         P0: -> R0 [DEADLOCK]\n\
         P1: -> R1 [DEADLOCK]\n\
         R0: -> P1 [DEADLOCK]\n\
         R1: -> P0 [DEADLOCK]\n\
         ================\n\
         [DEADLOCK] = edge on the detected wait cycle\n"
    );
}

#[test]
fn test_show_ascii_without_highlight() {
    let dir = TempDir::new().unwrap();
    let path = write_scenario(&dir, "classic.toml", CLASSIC);

    let output = show(&path, GraphFormat::Ascii, &dir.path().join("rag.txt"), false);

    assert!(!output.contains("[DEADLOCK]"));
    assert!(output.contains("P0: -> R0\n"));
}

#[test]
fn test_show_dot_and_mermaid() {
    let dir = TempDir::new().unwrap();
    let path = write_scenario(&dir, "dining.toml", DINING);

    let dot = show(&path, GraphFormat::Dot, &dir.path().join("rag.dot"), true);
    let mermaid = show(&path, GraphFormat::Mermaid, &dir.path().join("rag.mmd"), true);

    assert!(predicate::str::starts_with("digraph rag {").eval(&dot));
    assert!(predicate::str::contains("p0 -> r1 [style=dashed").eval(&dot));
    assert!(predicate::str::contains("r0 -> p0 [style=solid").eval(&dot));
    assert!(predicate::str::starts_with("graph LR").eval(&mermaid));
    assert!(predicate::str::contains("p2 -.->|requests| r0").eval(&mermaid));
    assert!(predicate::str::contains("linkStyle").eval(&mermaid));
}

#[test]
fn test_renderer_matches_show_command() {
    let dir = TempDir::new().unwrap();
    let path = write_scenario(&dir, "classic.toml", CLASSIC);
    let (store, _) = Scenario::parse_file(&path)
        .unwrap()
        .into_store(StoreLimits::default())
        .unwrap();
    let check = store.run_deadlock_check();

    let mut direct = Vec::new();
    RagRenderer::new(true)
        .render_mermaid(&store.snapshot(), check.cycle(), &mut direct)
        .unwrap();
    let via_command = show(&path, GraphFormat::Mermaid, &dir.path().join("rag.mmd"), true);

    assert_eq!(String::from_utf8(direct).unwrap(), via_command);
}

#[test]
fn test_check_command_runs_on_acyclic_scenario() {
    let dir = TempDir::new().unwrap();
    let path = write_scenario(
        &dir,
        "chain.toml",
        r#"
processes = ["P0", "P1"]
resources = ["R0"]

[[requests]]
process = "P0"
resource = "R0"

[[allocations]]
resource = "R0"
process = "P1"
"#,
    );

    let cli = Cli::try_parse_from([
        "rag-deadlock",
        "check",
        path.to_str().unwrap(),
        "--format",
        "json",
        "--error-on-deadlock",
    ])
    .unwrap();

    execute_command(cli.command).unwrap();
}

#[test]
fn test_check_command_surfaces_unknown_names() {
    let dir = TempDir::new().unwrap();
    let path = write_scenario(
        &dir,
        "typo.toml",
        r#"
processes = ["P0"]
resources = ["R0"]

[[requests]]
process = "P9"
resource = "R0"
"#,
    );

    let cli = Cli::try_parse_from(["rag-deadlock", "check", path.to_str().unwrap()]).unwrap();
    let err = execute_command(cli.command).unwrap_err();

    assert!(predicate::str::contains("Failed to build").eval(&err.to_string()));
}
