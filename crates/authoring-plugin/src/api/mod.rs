//! Module API: collaborator interfaces and their in-memory implementations.

pub mod context;
pub mod services;

pub use context::{ContentPluginService, ContentService, ModuleContext};
pub use services::{MemoryContentPluginService, MemoryContentService};
