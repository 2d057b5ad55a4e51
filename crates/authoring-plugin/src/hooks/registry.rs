//! Hook registry: modules register handlers by hook point with priority ordering.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use authoring_core::AppResult;
use authoring_core::types::{Document, InsertContext};

use super::definitions::{HookAction, HookPoint};

/// Trait for hook handler implementations.
///
/// Handlers receive an exclusive borrow of the document for the duration of
/// the call. Whatever the handler leaves in `document` when it returns is
/// what the next handler, and finally the content service, sees.
#[async_trait]
pub trait HookHandler: Send + Sync + std::fmt::Debug {
    /// Returns the handler name used in logs.
    fn name(&self) -> &str;

    /// Returns the ID of the module owning this handler.
    fn module_id(&self) -> &str;

    /// Returns the priority (lower = runs first).
    fn priority(&self) -> i32 {
        100
    }

    /// Handles a hook invocation.
    async fn execute(&self, ctx: &InsertContext, document: &mut Document)
    -> AppResult<HookAction>;
}

/// Entry in the hook registry.
#[derive(Debug)]
struct HookEntry {
    /// The handler.
    handler: Arc<dyn HookHandler>,
    /// Priority (lower = earlier execution).
    priority: i32,
    /// Module that registered this handler.
    module_id: String,
}

/// Registry of hook handlers organized by hook point.
#[derive(Debug)]
pub struct HookRegistry {
    /// Hook point → sorted list of handlers.
    handlers: RwLock<HashMap<HookPoint, Vec<HookEntry>>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a handler for a specific hook point.
    pub async fn register(&self, hook: HookPoint, handler: Arc<dyn HookHandler>) {
        let module_id = handler.module_id().to_string();
        let priority = handler.priority();
        let name = handler.name().to_string();

        let mut handlers = self.handlers.write().await;
        let entries = handlers.entry(hook).or_default();

        entries.push(HookEntry {
            handler,
            priority,
            module_id: module_id.clone(),
        });

        // Stable sort keeps registration order among equal priorities
        entries.sort_by_key(|e| e.priority);

        info!(
            hook = %hook,
            module_id = %module_id,
            handler = %name,
            priority = priority,
            "Hook handler registered"
        );
    }

    /// Unregisters all handlers for a specific module.
    pub async fn unregister_module(&self, module_id: &str) {
        let mut handlers = self.handlers.write().await;

        for entries in handlers.values_mut() {
            entries.retain(|e| e.module_id != module_id);
        }

        handlers.retain(|_, entries| !entries.is_empty());

        info!(module_id = %module_id, "All hooks unregistered for module");
    }

    /// Returns all handlers for a specific hook point, sorted by priority.
    pub async fn get_handlers(&self, hook: &HookPoint) -> Vec<Arc<dyn HookHandler>> {
        let handlers = self.handlers.read().await;
        handlers
            .get(hook)
            .map(|entries| entries.iter().map(|e| e.handler.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns whether any handlers are registered for a hook point.
    pub async fn has_handlers(&self, hook: &HookPoint) -> bool {
        let handlers = self.handlers.read().await;
        handlers
            .get(hook)
            .map(|entries| !entries.is_empty())
            .unwrap_or(false)
    }

    /// Returns the number of handlers registered for a hook point.
    pub async fn handler_count(&self, hook: &HookPoint) -> usize {
        let handlers = self.handlers.read().await;
        handlers.get(hook).map(|entries| entries.len()).unwrap_or(0)
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
