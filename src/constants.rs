//! Configuration constants for rag-deadlock
//!
//! This module contains the defaults used throughout the application. The
//! limits can be overridden through command-line flags or environment
//! variables.

/// Store capacity defaults
pub mod limits {
    /// Default maximum number of processes a store accepts
    pub const DEFAULT_MAX_PROCESSES: usize = 50;

    /// Default maximum number of resources a store accepts
    pub const DEFAULT_MAX_RESOURCES: usize = 50;
}

/// Output formatting configuration
pub mod output {
    /// Default report format when not specified
    pub const DEFAULT_FORMAT: &str = "human";

    /// Default graph format when not specified
    pub const DEFAULT_GRAPH_FORMAT: &str = "ascii";
}

/// Logging configuration
pub mod logging {
    /// Environment variable holding a `tracing` filter directive
    pub const FILTER_ENV: &str = "RAG_DEADLOCK_LOG";
}
