//! Bazaar Ports
//!
//! Port definitions (traits) for the Bazaar marketplace engine.
//! These define the boundaries between domain logic and infrastructure.

mod clock;
mod hooks;
mod store;

pub use clock::Clock;
pub use hooks::{HookError, HookResult, LifecycleHooks, NoopHooks};
pub use store::OrderStore;
