//! # authoring-plugin
//!
//! Module framework for the authoring host. Provides:
//!
//! - Module lifecycle management (register, init, ready, shutdown)
//! - Hook registry with priority-ordered registration
//! - Hook dispatcher with mutable observation and Continue/Halt semantics
//! - Name-keyed collaborator resolution for module initialization
//! - In-memory content and plugin-registry collaborators

pub mod api;
pub mod hooks;
pub mod manager;
pub mod prelude;
pub mod registry;
pub mod traits;

pub use api::context::{ContentPluginService, ContentService, ModuleContext};
pub use hooks::definitions::{HookAction, HookPoint};
pub use hooks::dispatcher::HookDispatcher;
pub use hooks::registry::{HookHandler, HookRegistry};
pub use manager::ModuleManager;
pub use registry::{Module, ModuleInfo, ModuleRegistry, ModuleState};
