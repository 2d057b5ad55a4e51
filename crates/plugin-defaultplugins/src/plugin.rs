//! Default-plugins module implementation: registers with the module host.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::info;

use authoring_core::config::plugin::DefaultPluginsConfig;
use authoring_core::{AppError, AppResult};
use authoring_plugin::api::context::{CONTENT_PLUGIN_SERVICE, CONTENT_SERVICE};
use authoring_plugin::{
    ContentPluginService, ContentService, HookPoint, Module, ModuleContext, ModuleInfo,
};

use crate::hooks::DefaultPluginsHook;

/// Module ID reported to the host.
pub const MODULE_ID: &str = "adapt-authoring-defaultplugins";

/// Collaborators resolved during init and held for the module's lifetime.
struct Collaborators {
    content: Arc<dyn ContentService>,
    plugins: Arc<dyn ContentPluginService>,
}

/// Default-plugins module for the authoring host
pub struct DefaultPluginsModule {
    /// Module information
    info: ModuleInfo,
    /// Module configuration; falls back to the host config when unset
    config: Option<DefaultPluginsConfig>,
    /// Collaborators (set on init)
    collaborators: OnceLock<Collaborators>,
}

impl std::fmt::Debug for DefaultPluginsModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultPluginsModule")
            .field("info", &self.info)
            .field("config", &self.config)
            .field("initialized", &self.collaborators.get().is_some())
            .finish()
    }
}

impl DefaultPluginsModule {
    /// Create a new module reading its settings from the host configuration
    pub fn new() -> Self {
        Self {
            info: ModuleInfo {
                id: MODULE_ID.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "Enables default plugins on new config documents".to_string(),
            },
            config: None,
            collaborators: OnceLock::new(),
        }
    }

    /// Create a new module with explicit settings
    pub fn with_config(config: DefaultPluginsConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::new()
        }
    }

    /// Get the content service resolved during init
    pub fn content(&self) -> Option<&Arc<dyn ContentService>> {
        self.collaborators.get().map(|c| &c.content)
    }

    /// Get the plugin registry resolved during init
    pub fn plugins(&self) -> Option<&Arc<dyn ContentPluginService>> {
        self.collaborators.get().map(|c| &c.plugins)
    }
}

impl Default for DefaultPluginsModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for DefaultPluginsModule {
    fn info(&self) -> ModuleInfo {
        self.info.clone()
    }

    async fn init(&self, ctx: &ModuleContext) -> AppResult<()> {
        if self.collaborators.get().is_some() {
            return Err(AppError::conflict(format!(
                "Module '{}' is already initialized",
                self.info.id
            )));
        }

        let (content, plugins) = tokio::try_join!(
            ctx.wait_for::<dyn ContentService>(CONTENT_SERVICE),
            ctx.wait_for::<dyn ContentPluginService>(CONTENT_PLUGIN_SERVICE),
        )?;

        let schema_name = self
            .config
            .as_ref()
            .unwrap_or(&ctx.config().default_plugins)
            .schema_name
            .clone();

        self.collaborators
            .set(Collaborators {
                content: content.clone(),
                plugins: plugins.clone(),
            })
            .map_err(|_| {
                AppError::conflict(format!("Module '{}' is already initialized", self.info.id))
            })?;

        let hook = DefaultPluginsHook::new(&self.info.id, &schema_name, plugins);
        content
            .hooks()
            .register(HookPoint::PreInsert, Arc::new(hook))
            .await;

        info!(
            module_id = %self.info.id,
            schema = %schema_name,
            "Default plugins hook registered"
        );
        Ok(())
    }

    async fn shutdown(&self) -> AppResult<()> {
        if let Some(content) = self.content() {
            content.hooks().unregister_module(&self.info.id).await;
        }
        Ok(())
    }
}
