//! Module registry: stores loaded module instances, metadata, and readiness.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use authoring_core::{AppError, AppResult};

use crate::api::context::ModuleContext;

/// Metadata about a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// Unique module identifier.
    pub id: String,
    /// Module version string.
    pub version: String,
    /// Module description.
    pub description: String,
}

/// Lifecycle state of a registered module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum ModuleState {
    /// Registered, `init` has not completed yet.
    Loading,
    /// `init` completed successfully.
    Ready,
    /// `init` failed; the module will never become ready.
    Failed(String),
}

/// Trait that all modules must implement.
#[async_trait::async_trait]
pub trait Module: Send + Sync + std::fmt::Debug {
    /// Returns module metadata.
    fn info(&self) -> ModuleInfo;

    /// Resolves collaborators and registers hooks. Called once at startup.
    ///
    /// The module is reported ready only after this returns `Ok`.
    async fn init(&self, ctx: &ModuleContext) -> AppResult<()>;

    /// Called when the module is unloaded.
    async fn shutdown(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Debug)]
struct ModuleEntry {
    module: Arc<dyn Module>,
    info: ModuleInfo,
    state: ModuleState,
}

/// Registry of all loaded modules.
#[derive(Debug)]
pub struct ModuleRegistry {
    /// Module ID → entry.
    modules: RwLock<HashMap<String, ModuleEntry>>,
}

impl ModuleRegistry {
    /// Creates a new empty module registry.
    pub fn new() -> Self {
        Self {
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a module in the `Loading` state.
    pub async fn register(&self, module: Arc<dyn Module>) -> AppResult<()> {
        let info = module.info();
        let id = info.id.clone();

        let mut modules = self.modules.write().await;

        if modules.contains_key(&id) {
            return Err(AppError::conflict(format!(
                "Module '{}' is already registered",
                id
            )));
        }

        info!(module_id = %id, version = %info.version, "Registering module");

        modules.insert(
            id,
            ModuleEntry {
                module,
                info,
                state: ModuleState::Loading,
            },
        );

        Ok(())
    }

    /// Unregisters a module by ID.
    pub async fn unregister(&self, module_id: &str) -> AppResult<Arc<dyn Module>> {
        let mut modules = self.modules.write().await;

        let entry = modules
            .remove(module_id)
            .ok_or_else(|| AppError::not_found(format!("Module '{}' not found", module_id)))?;

        info!(module_id = %module_id, "Module unregistered");

        Ok(entry.module)
    }

    /// Updates the lifecycle state of a module.
    pub async fn set_state(&self, module_id: &str, state: ModuleState) -> AppResult<()> {
        let mut modules = self.modules.write().await;
        let entry = modules
            .get_mut(module_id)
            .ok_or_else(|| AppError::not_found(format!("Module '{}' not found", module_id)))?;
        entry.state = state;
        Ok(())
    }

    /// Gets a module by ID.
    pub async fn get(&self, module_id: &str) -> Option<Arc<dyn Module>> {
        let modules = self.modules.read().await;
        modules.get(module_id).map(|e| e.module.clone())
    }

    /// Returns the lifecycle state of a module.
    pub async fn state(&self, module_id: &str) -> Option<ModuleState> {
        let modules = self.modules.read().await;
        modules.get(module_id).map(|e| e.state.clone())
    }

    /// Checks whether a module finished initialization.
    pub async fn is_ready(&self, module_id: &str) -> bool {
        matches!(self.state(module_id).await, Some(ModuleState::Ready))
    }

    /// Lists all registered module metadata, sorted by ID.
    pub async fn list(&self) -> Vec<ModuleInfo> {
        let modules = self.modules.read().await;
        let mut infos: Vec<ModuleInfo> = modules.values().map(|e| e.info.clone()).collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }

    /// Returns module count.
    pub async fn count(&self) -> usize {
        let modules = self.modules.read().await;
        modules.len()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
