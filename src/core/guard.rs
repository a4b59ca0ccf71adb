//! Per-engine mutual exclusion for the firing protocol.
//!
//! The guard owns the data that only the firing protocol may touch. Holding
//! the permit across awaits (persistence calls, user actions) is the point:
//! a second caller's precondition check runs only after the first caller has
//! fully committed.

use tokio::sync::{Mutex, MutexGuard};

/// Async mutual exclusion around the guarded value `T`.
///
/// Waiters are served in FIFO order.
///
/// # Example
///
/// ```rust
/// use flowline::core::ConcurrencyGuard;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let guard = ConcurrencyGuard::new(0u32);
/// {
///     let mut permit = guard.acquire().await;
///     *permit += 1;
/// }
/// assert_eq!(*guard.acquire().await, 1);
/// # }
/// ```
#[derive(Debug)]
pub struct ConcurrencyGuard<T> {
    inner: Mutex<T>,
}

impl<T> ConcurrencyGuard<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Wait until no other caller holds the guard.
    pub async fn acquire(&self) -> MutexGuard<'_, T> {
        self.inner.lock().await
    }

    /// Take the guard only if it is free right now.
    pub fn try_acquire(&self) -> Option<MutexGuard<'_, T>> {
        self.inner.try_lock().ok()
    }

    /// Exclusive access without waiting; `&mut self` already rules out other holders.
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }
}
