//! Module manager: lifecycle management for all modules.

use std::sync::Arc;

use tracing::{error, info, warn};

use authoring_core::{AppError, AppResult};

use crate::api::context::ModuleContext;
use crate::registry::{Module, ModuleInfo, ModuleRegistry, ModuleState};

/// Manages the full lifecycle of modules: register, init, ready, shutdown.
#[derive(Debug)]
pub struct ModuleManager {
    /// Module registry.
    module_registry: Arc<ModuleRegistry>,
    /// Context handed to every module's `init`.
    context: Arc<ModuleContext>,
}

impl ModuleManager {
    /// Creates a new module manager over a collaborator context.
    pub fn new(context: Arc<ModuleContext>) -> Self {
        Self {
            module_registry: Arc::new(ModuleRegistry::new()),
            context,
        }
    }

    /// Registers and initializes a module.
    ///
    /// The module is marked `Ready` only when `init` succeeds. An `init`
    /// failure marks it `Failed` and is returned; there is no retry.
    pub async fn load_module(&self, module: Arc<dyn Module>) -> AppResult<()> {
        let info = module.info();
        let module_id = info.id.clone();

        self.module_registry.register(module.clone()).await?;

        if let Err(e) = module.init(&self.context).await {
            error!(
                module_id = %module_id,
                error = %e,
                unavailable = e.is_unavailable(),
                "Module init failed"
            );
            self.module_registry
                .set_state(&module_id, ModuleState::Failed(e.to_string()))
                .await?;
            return Err(AppError::with_source(
                e.kind,
                format!("Module '{}' init failed: {}", module_id, e.message),
                e,
            ));
        }

        self.module_registry
            .set_state(&module_id, ModuleState::Ready)
            .await?;

        info!(
            module_id = %module_id,
            version = %info.version,
            "Module loaded and ready"
        );

        Ok(())
    }

    /// Shuts down and unregisters a module.
    pub async fn unload_module(&self, module_id: &str) -> AppResult<()> {
        let module = self.module_registry.unregister(module_id).await?;

        if let Err(e) = module.shutdown().await {
            warn!(
                module_id = %module_id,
                error = %e,
                "Module shutdown returned error"
            );
        }

        info!(module_id = %module_id, "Module unloaded");

        Ok(())
    }

    /// Shuts down and unregisters all modules.
    pub async fn unload_all(&self) {
        for info in self.module_registry.list().await {
            if let Err(e) = self.unload_module(&info.id).await {
                error!(
                    module_id = %info.id,
                    error = %e,
                    "Error unloading module"
                );
            }
        }

        info!("All modules unloaded");
    }

    /// Checks whether a module finished initialization.
    pub async fn is_ready(&self, module_id: &str) -> bool {
        self.module_registry.is_ready(module_id).await
    }

    /// Returns the lifecycle state of a module.
    pub async fn state(&self, module_id: &str) -> Option<ModuleState> {
        self.module_registry.state(module_id).await
    }

    /// Lists all loaded modules.
    pub async fn list_modules(&self) -> Vec<ModuleInfo> {
        self.module_registry.list().await
    }
}
