//! # Configuration Module
//!
//! This module provides configuration structures for the rag-deadlock
//! commands. Each command has its own config module with a builder for easy
//! construction.
//!
//! ## Command Configurations
//!
//! - **CheckConfig**: Configuration for the `check` command that reports
//!   deadlocks
//! - **ShowConfig**: Configuration for the `show` command that renders the
//!   resource allocation graph
//!
//! ## Example
//!
//! ```
//! use rag_deadlock::cli::OutputFormat;
//! use rag_deadlock::common::ConfigBuilder;
//! use rag_deadlock::config::CheckConfig;
//! use rag_deadlock::store::StoreLimits;
//!
//! let config = CheckConfig::builder()
//!     .with_scenario("deadlock.toml".into())
//!     .with_limits(StoreLimits::default())
//!     .with_format(OutputFormat::Human)
//!     .with_error_on_deadlock(true)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.error_on_deadlock);
//! ```

pub mod check;
pub mod show;

pub use check::CheckConfig;
pub use show::ShowConfig;
