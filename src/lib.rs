//! Flowline: an async finite-state machine engine for persisted entities
//!
//! An engine binds one entity, identified by a key, to a validated transition
//! graph. Firing a trigger runs the edge's async action against a working copy
//! of the entity, then commits the new state, persists it through a storage
//! adapter and notifies subscribers. Firing is serialized per engine.
//!
//! # Core Concepts
//!
//! - **State / Trigger**: Value types naming graph nodes and edges, usually declared with
//!   [`state_enum!`] and [`trigger_enum!`]
//! - **Graph**: `(state, trigger) -> state` edges, validated to stay acyclic as they are added
//! - **Engine**: Runs the firing protocol and keeps a bounded history and log
//! - **Storage**: Pluggable persistence of `(state, entity)` pairs, in memory or as JSON files
//! - **Export**: Mermaid and DOT renderings of a graph
//!
//! # Example
//!
//! ```rust
//! use flowline::engine::Engine;
//! use flowline::{state_enum, trigger_enum};
//!
//! state_enum! {
//!     pub enum OrderState { Created, Paid, Shipped }
//! }
//! trigger_enum! {
//!     pub enum OrderTrigger { Pay, Ship }
//! }
//!
//! #[derive(Clone, Debug)]
//! struct Order {
//!     paid: bool,
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> flowline::engine::Result<()> {
//! let mut engine = Engine::<OrderState, OrderTrigger, u64, Order>::new(
//!     OrderState::Created,
//!     1001,
//!     Order { paid: false },
//! );
//! engine
//!     .add_transition(OrderState::Created, OrderTrigger::Pay, OrderState::Paid, |ctx| {
//!         Box::pin(async move {
//!             if let Some(order) = ctx.entity_mut() {
//!                 order.paid = true;
//!             }
//!             Ok(())
//!         })
//!     })?
//!     .add_transition(OrderState::Paid, OrderTrigger::Ship, OrderState::Shipped, |_| {
//!         Box::pin(async { Ok(()) })
//!     })?
//!     .mark_final();
//!
//! engine.fire(OrderTrigger::Pay).await?;
//! assert_eq!(engine.current_state(), OrderState::Paid);
//! assert!(engine.current_entity().map_or(false, |order| order.paid));
//!
//! // Invalid triggers are rejected without changing state.
//! assert!(!engine.fire(OrderTrigger::Pay).await?);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod export;
pub mod graph;
pub mod storage;
pub mod testing;

// Re-export commonly used types
pub use builder::{ConfigError, EngineBuilder, GraphBuilder};
pub use self::core::{Entity, EntityKey, HistoryEntry, LogEntry, LogLevel, State, Trigger};
pub use engine::{Engine, EngineHooks, Error, Result, TransitionContext};
pub use export::ExportFormat;
pub use graph::TransitionGraph;
pub use storage::{create_adapter, PersistenceAdapter, StorageConfig, StorageType};
