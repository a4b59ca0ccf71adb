//! Core building blocks shared by every engine.
//!
//! This module contains:
//! - The value traits engines are generic over (`State`, `Trigger`, `EntityKey`, `Entity`)
//! - Bounded history and log buffers
//! - The concurrency guard that serializes the firing protocol

mod buffer;
mod guard;
mod history;
mod log;
mod state;

pub use buffer::BoundedBuffer;
pub use guard::ConcurrencyGuard;
pub use history::{HistoryEntry, TransitionHistory, HISTORY_CAPACITY};
pub use log::{EngineLog, LogEntry, LogLevel, LOG_CAPACITY};
pub use state::{Entity, EntityKey, State, Trigger};
