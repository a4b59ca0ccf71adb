//! Builder API for ergonomic graph and engine construction.
//!
//! This module provides fluent builders and macros for declaring states,
//! triggers and transition graphs with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::ConfigError;
pub use machine::EngineBuilder;
pub use transition::{EdgeHandle, GraphBuilder};
