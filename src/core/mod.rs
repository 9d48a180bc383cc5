//! Core data types and structures
//!
//! This module contains the fundamental data types of the resource allocation
//! graph, separated from the store and detection logic.

pub mod types;

pub use types::*;
