//! Engine-level error types.

use crate::builder::ConfigError;
use crate::storage::StorageError;
use thiserror::Error;

/// A transition whose action failed. Recovered by `Engine::fire`.
#[derive(Debug, Error)]
pub enum TransitionFailure {
    #[error("Action for {state} -- ({trigger}) failed: {source}")]
    ActionFailed {
        state: String,
        trigger: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Action for {state} -- ({trigger}) panicked: {message}")]
    ActionPanicked {
        state: String,
        trigger: String,
        message: String,
    },
}

/// Everything an engine operation can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Transition(#[from] TransitionFailure),
}

impl Error {
    /// Whether the error must reach the caller of `Engine::fire`.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Transition(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
