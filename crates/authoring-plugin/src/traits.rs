//! Convenience handler types for module development.

use async_trait::async_trait;

use authoring_core::AppResult;
use authoring_core::types::{Document, InsertContext};

use crate::hooks::definitions::HookAction;
use crate::hooks::registry::HookHandler;

type HandlerFn = dyn Fn(&InsertContext, &mut Document) -> AppResult<HookAction> + Send + Sync;

/// A closure-based hook handler for quick handler creation.
///
/// The closure runs synchronously inside the dispatcher; handlers that need
/// to await collaborators implement [`HookHandler`] directly.
pub struct ClosureHandler {
    /// Module ID.
    id: String,
    /// Priority.
    priority_val: i32,
    /// Handler function.
    handler: Box<HandlerFn>,
}

impl std::fmt::Debug for ClosureHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureHandler")
            .field("id", &self.id)
            .field("priority_val", &self.priority_val)
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ClosureHandler {
    /// Creates a new closure-based handler.
    pub fn new<F>(module_id: &str, priority: i32, handler: F) -> Self
    where
        F: Fn(&InsertContext, &mut Document) -> AppResult<HookAction> + Send + Sync + 'static,
    {
        Self {
            id: module_id.to_string(),
            priority_val: priority,
            handler: Box::new(handler),
        }
    }
}

#[async_trait]
impl HookHandler for ClosureHandler {
    fn name(&self) -> &str {
        &self.id
    }

    fn module_id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        self.priority_val
    }

    async fn execute(
        &self,
        ctx: &InsertContext,
        document: &mut Document,
    ) -> AppResult<HookAction> {
        (self.handler)(ctx, document)
    }
}
