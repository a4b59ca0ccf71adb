//! Configuration errors raised while assembling graphs and engines.
//!
//! These are caller bugs: they surface immediately and are never retried.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Duplicate transition: {from} -- ({trigger}) -> {to}")]
    DuplicateTransition {
        from: String,
        trigger: String,
        to: String,
    },

    #[error("Cycle detected: {from} -> {to}")]
    CycleDetected { from: String, to: String },

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Either use .configure_transitions(...) or add transitions with .add_transition(...), not both")]
    MixedConfiguration,

    #[error("Engine has been disposed")]
    Disposed,

    #[error("Export format '{0}' is not supported")]
    UnsupportedExportFormat(String),

    #[error("Unknown storage type '{0}'")]
    UnknownStorage(String),

    #[error("Storage directory is required for JSON storage")]
    MissingStorageDirectory,

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Entity key not specified. Call .key(key) before .build()")]
    MissingKey,

    #[error("Entity not specified. Call .entity(entity) before .build()")]
    MissingEntity,
}
