//! Shared test helpers for integration tests.

use std::sync::Arc;

use async_trait::async_trait;

use authoring_core::config::AppConfig;
use authoring_core::types::{Document, InsertContext, PluginDescriptor, PluginFilter};
use authoring_core::{AppError, AppResult};
use authoring_plugin::api::context::{CONTENT_PLUGIN_SERVICE, CONTENT_SERVICE};
use authoring_plugin::api::services::{MemoryContentPluginService, MemoryContentService};
use authoring_plugin::{ContentPluginService, ContentService, ModuleContext, ModuleManager};
use plugin_defaultplugins::DefaultPluginsModule;

/// Test host with in-memory collaborators and the default-plugins module loaded
pub struct TestHost {
    /// Content service the module observes
    pub content: Arc<MemoryContentService>,
    /// Plugin registry
    pub plugins: Arc<MemoryContentPluginService>,
    /// Module manager
    pub manager: ModuleManager,
}

impl TestHost {
    /// Build a host whose registry holds `plugins` and load the module
    pub async fn with_plugins(plugins: Vec<PluginDescriptor>) -> Self {
        let context = test_context();
        let content = Arc::new(MemoryContentService::new());
        let registry = Arc::new(MemoryContentPluginService::with_plugins(plugins));

        context.register::<dyn ContentService>(CONTENT_SERVICE, content.clone());
        context.register::<dyn ContentPluginService>(CONTENT_PLUGIN_SERVICE, registry.clone());

        let manager = ModuleManager::new(context);
        manager
            .load_module(Arc::new(DefaultPluginsModule::new()))
            .await
            .expect("Failed to load default plugins module");

        Self {
            content,
            plugins: registry,
            manager,
        }
    }

    /// Build a host whose registry flags each of `names` as a default plugin
    pub async fn with_defaults(names: &[&str]) -> Self {
        Self::with_plugins(defaults(names)).await
    }

    /// Insert a document into `schema_name`
    pub async fn insert(&self, schema_name: &str, document: Document) -> AppResult<Document> {
        self.content
            .insert(InsertContext::new(schema_name), document)
            .await
    }

    /// Insert a config document, panicking on failure
    pub async fn insert_config(&self, document: Document) -> Document {
        self.insert("config", document)
            .await
            .expect("Failed to insert config document")
    }
}

/// Host configuration with a short collaborator timeout
pub fn test_context() -> Arc<ModuleContext> {
    let mut config = AppConfig::default();
    config.modules.resolve_timeout_seconds = 2;
    Arc::new(ModuleContext::new(Arc::new(config)))
}

/// Plugin descriptors flagged as added by default
pub fn defaults(names: &[&str]) -> Vec<PluginDescriptor> {
    names
        .iter()
        .map(|n| PluginDescriptor::new(*n).added_by_default())
        .collect()
}

/// Owned enabled plugin names
pub fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Plugin registry whose queries always fail
#[derive(Debug, Default)]
pub struct UnavailableRegistry;

#[async_trait]
impl ContentPluginService for UnavailableRegistry {
    async fn find(&self, _filter: &PluginFilter) -> AppResult<Vec<PluginDescriptor>> {
        Err(AppError::storage("plugin registry unavailable"))
    }
}
