//! Value traits for the things an engine is parameterised over.
//!
//! States and triggers are opaque: the engine only compares them for equality,
//! hashes them, and asks for a stable name when logging or exporting.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone` + `Eq` + `Hash`: states key the transition graph and the final-state set
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are written by persistence adapters
///
/// # Example
///
/// ```rust
/// use flowline::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum OrderState {
///     Created,
///     Paid,
///     Shipped,
/// }
///
/// impl State for OrderState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Created => "Created",
///             Self::Paid => "Paid",
///             Self::Shipped => "Shipped",
///         }
///     }
/// }
///
/// assert_eq!(OrderState::Paid.name(), "Paid");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Trait for the inputs that select an edge out of the current state.
pub trait Trigger: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the trigger's name for display/logging.
    fn name(&self) -> &str;
}

/// Identity of the entity an engine is bound to.
pub trait EntityKey: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<K> EntityKey for K where K: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// The value whose lifecycle an engine drives.
pub trait Entity: Clone + Send + Sync + 'static {}

impl<E> Entity for E where E: Clone + Send + Sync + 'static {}
