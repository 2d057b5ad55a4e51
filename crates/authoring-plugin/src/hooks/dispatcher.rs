//! Hook dispatcher: runs handlers in series over a mutable document.
//!
//! For before hooks (`pre_*`):
//! - Handlers are called in priority order, each with the same `&mut Document`.
//! - A handler error stops the chain and is returned to the caller.
//! - If any handler returns `Halt`, execution stops and the main operation is aborted.
//!
//! For after hooks (`post_*`):
//! - All handlers are called regardless of individual results.
//! - Errors and halts are logged, never returned.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use authoring_core::error::AppError;
use authoring_core::types::{Document, InsertContext};

use super::definitions::{HookAction, HookPoint};
use super::registry::HookRegistry;

/// Dispatches hooks to all registered handlers.
#[derive(Debug, Clone)]
pub struct HookDispatcher {
    /// Hook registry.
    registry: Arc<HookRegistry>,
}

impl HookDispatcher {
    /// Creates a new hook dispatcher.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self { registry }
    }

    /// Invokes a before hook, letting every handler mutate `document`.
    ///
    /// Returns once all handlers have completed; mutations made by the
    /// handlers are visible in `document` at that point.
    pub async fn invoke(
        &self,
        hook: HookPoint,
        ctx: &InsertContext,
        document: &mut Document,
    ) -> Result<(), AppError> {
        let handlers = self.registry.get_handlers(&hook).await;

        if handlers.is_empty() {
            return Ok(());
        }

        debug!(
            hook = %hook,
            schema = %ctx.schema_name,
            handler_count = handlers.len(),
            "Dispatching hook"
        );

        for handler in &handlers {
            let action = handler.execute(ctx, document).await.map_err(|e| {
                error!(
                    hook = %hook,
                    handler = %handler.name(),
                    module_id = %handler.module_id(),
                    error = %e,
                    "Hook handler failed"
                );
                e
            })?;

            match action {
                HookAction::Continue => {
                    debug!(hook = %hook, handler = %handler.name(), "Handler returned Continue");
                }
                HookAction::Halt(reason) if hook.is_before_hook() => {
                    info!(
                        hook = %hook,
                        handler = %handler.name(),
                        reason = %reason,
                        "Handler halted execution"
                    );
                    return Err(AppError::plugin(format!(
                        "Operation blocked by '{}': {}",
                        handler.name(),
                        reason
                    )));
                }
                HookAction::Halt(_) => {
                    warn!(
                        hook = %hook,
                        handler = %handler.name(),
                        "Handler returned Halt for non-before hook, ignoring"
                    );
                }
            }
        }

        Ok(())
    }

    /// Fires an after hook. All handlers run regardless of their results.
    pub async fn notify(&self, hook: HookPoint, ctx: &InsertContext, document: &mut Document) {
        for handler in self.registry.get_handlers(&hook).await {
            match handler.execute(ctx, document).await {
                Ok(HookAction::Continue) => {}
                Ok(HookAction::Halt(_)) => {
                    warn!(
                        hook = %hook,
                        handler = %handler.name(),
                        "Handler returned Halt for non-before hook, ignoring"
                    );
                }
                Err(e) => {
                    error!(
                        hook = %hook,
                        handler = %handler.name(),
                        error = %e,
                        "After-hook handler failed"
                    );
                }
            }
        }
    }
}
