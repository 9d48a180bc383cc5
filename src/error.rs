use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::core::{EdgeKind, EntityKind};

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid scenario syntax in '{file}'")]
#[diagnostic(
    code(rag_deadlock::scenario_parse_error),
    help("Check the TOML syntax near the highlighted position")
)]
pub struct ScenarioParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum RagError {
    #[error("A {kind} named '{name}' already exists")]
    #[diagnostic(
        code(rag_deadlock::duplicate_name),
        help("Names must be unique among processes and among resources")
    )]
    DuplicateName { kind: EntityKind, name: String },

    #[error("Cannot add another {kind}: limit of {limit} reached")]
    #[diagnostic(
        code(rag_deadlock::capacity_exceeded),
        help("Raise the limit with --max-processes or --max-resources")
    )]
    CapacityExceeded { kind: EntityKind, limit: usize },

    #[error("Unknown {kind} id {id}")]
    #[diagnostic(
        code(rag_deadlock::invalid_reference),
        help("Edges may only reference processes and resources that exist")
    )]
    InvalidReference { kind: EntityKind, id: usize },

    #[error("The {kind} edge {edge} already exists")]
    #[diagnostic(
        code(rag_deadlock::already_exists),
        help("The edge is already part of the graph; nothing to do")
    )]
    AlreadyExists { kind: EdgeKind, edge: String },

    #[error("The {kind} edge {edge} does not exist")]
    #[diagnostic(
        code(rag_deadlock::edge_not_found),
        help("Only edges currently present in the graph can be removed")
    )]
    EdgeNotFound { kind: EdgeKind, edge: String },

    #[error("No {kind} named '{name}'")]
    #[diagnostic(
        code(rag_deadlock::unknown_name),
        help("Declare every process and resource before referencing it in an edge")
    )]
    UnknownName { kind: EntityKind, name: String },

    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(rag_deadlock::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    ScenarioParseError(Box<ScenarioParseError>),

    #[error("Scenario serialization error")]
    #[diagnostic(
        code(rag_deadlock::toml_error),
        help("This is likely an internal error - please report it")
    )]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error")]
    #[diagnostic(
        code(rag_deadlock::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(rag_deadlock::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(rag_deadlock::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(rag_deadlock::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },
}
