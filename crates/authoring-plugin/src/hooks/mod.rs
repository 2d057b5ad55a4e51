//! Hook system: registry, dispatcher, and hook point definitions.

pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use definitions::{HookAction, HookPoint};
pub use dispatcher::HookDispatcher;
pub use registry::{HookHandler, HookRegistry};
