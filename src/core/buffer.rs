//! Fixed-capacity FIFO buffer shared by the history and the engine log.

use parking_lot::RwLock;
use std::collections::VecDeque;

/// Append-only buffer that evicts its oldest entries once `capacity` is reached.
///
/// Appends take the write lock for the push-and-evict pair, so the length never
/// exceeds the capacity, even with many concurrent writers. Readers get cloned
/// snapshots.
#[derive(Debug)]
pub struct BoundedBuffer<T> {
    capacity: usize,
    entries: RwLock<VecDeque<T>>,
}

impl<T: Clone> BoundedBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn push(&self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.write();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.entries.read().iter().cloned().collect()
    }

    pub fn filtered<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.entries
            .read()
            .iter()
            .filter(|entry| predicate(entry))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
