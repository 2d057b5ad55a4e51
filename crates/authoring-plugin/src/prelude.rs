//! Prelude for convenient imports.

pub use async_trait::async_trait;

pub use authoring_core::types::{Document, InsertContext, PluginDescriptor, PluginFilter};
pub use authoring_core::{AppError, AppResult};

pub use crate::api::context::{
    CONTENT_PLUGIN_SERVICE, CONTENT_SERVICE, ContentPluginService, ContentService, ModuleContext,
};
pub use crate::hooks::definitions::{HookAction, HookPoint};
pub use crate::hooks::registry::{HookHandler, HookRegistry};
pub use crate::registry::{Module, ModuleInfo};
pub use crate::traits::ClosureHandler;
