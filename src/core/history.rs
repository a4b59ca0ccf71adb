//! State transition history tracking.
//!
//! Every engine keeps a bounded, ordered record of the states it has committed
//! together with the trigger that led there.

use super::buffer::BoundedBuffer;
use super::state::{State, Trigger};

/// Maximum number of entries retained by a [`TransitionHistory`].
pub const HISTORY_CAPACITY: usize = 100;

/// Record of a single committed state.
///
/// `trigger` is `None` only for the seed entry recorded when the engine is
/// constructed.
///
/// # Example
///
/// ```rust
/// use flowline::core::HistoryEntry;
///
/// let seed: HistoryEntry<&str, &str> = HistoryEntry::seed("Created");
/// assert!(seed.trigger.is_none());
///
/// let paid = HistoryEntry::new("Pay", "Paid");
/// assert_eq!(paid.trigger, Some("Pay"));
/// assert_eq!(paid.state, "Paid");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry<T, S> {
    /// The trigger that caused the transition
    pub trigger: Option<T>,
    /// The state that was committed
    pub state: S,
}

impl<T, S> HistoryEntry<T, S> {
    pub fn new(trigger: T, state: S) -> Self {
        Self {
            trigger: Some(trigger),
            state,
        }
    }

    pub fn seed(state: S) -> Self {
        Self {
            trigger: None,
            state,
        }
    }
}

/// Ordered, bounded history of committed states.
///
/// Holds at most [`HISTORY_CAPACITY`] entries; the oldest entry is evicted
/// first. Reads return snapshots, so callers never observe a half-applied
/// append.
#[derive(Debug)]
pub struct TransitionHistory<S: State, T: Trigger> {
    entries: BoundedBuffer<HistoryEntry<T, S>>,
}

impl<S: State, T: Trigger> Default for TransitionHistory<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, T: Trigger> TransitionHistory<S, T> {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: BoundedBuffer::new(capacity),
        }
    }

    /// Record the initial state.
    pub fn record_seed(&self, state: S) {
        self.entries.push(HistoryEntry::seed(state));
    }

    /// Record a committed transition.
    pub fn record(&self, trigger: T, state: S) {
        self.entries.push(HistoryEntry::new(trigger, state));
    }

    /// Snapshot of all retained entries, oldest first.
    pub fn entries(&self) -> Vec<HistoryEntry<T, S>> {
        self.entries.snapshot()
    }

    /// The sequence of committed states, oldest first.
    pub fn states(&self) -> Vec<S> {
        self.entries
            .snapshot()
            .into_iter()
            .map(|entry| entry.state)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&self) {
        self.entries.clear();
    }
}
