//! The engine and everything it hands to callers: action context, events,
//! creation hooks and errors.

mod context;
mod error;
mod events;
mod hooks;
mod machine;

pub use context::{Redirect, TransitionContext};
pub use error::{Error, Result, TransitionFailure};
pub use events::{
    EntityChangedHandler, EntityDeletedHandler, StateChangedHandler, TransitionFailedHandler,
};
pub use hooks::{CreationHook, EngineHooks};
pub use machine::Engine;
