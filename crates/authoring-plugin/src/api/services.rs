//! In-memory implementations of the collaborator traits.
//!
//! These back the host binary and the test suites. They keep everything in
//! process memory and make no attempt at persistence.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use authoring_core::AppResult;
use authoring_core::types::{Document, DocumentId, InsertContext, PluginDescriptor, PluginFilter};

use super::context::{ContentPluginService, ContentService};
use crate::hooks::definitions::HookPoint;
use crate::hooks::dispatcher::HookDispatcher;
use crate::hooks::registry::HookRegistry;

/// Content service storing documents per schema in memory.
#[derive(Debug)]
pub struct MemoryContentService {
    /// Lifecycle hook registry shared with modules.
    hooks: Arc<HookRegistry>,
    /// Dispatcher over `hooks`.
    dispatcher: HookDispatcher,
    /// Schema name → documents in insertion order.
    documents: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryContentService {
    /// Creates an empty content service.
    pub fn new() -> Self {
        let hooks = Arc::new(HookRegistry::new());
        Self {
            dispatcher: HookDispatcher::new(hooks.clone()),
            hooks,
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of stored documents of a schema.
    pub async fn count(&self, schema_name: &str) -> usize {
        let documents = self.documents.read().await;
        documents.get(schema_name).map(Vec::len).unwrap_or(0)
    }
}

impl Default for MemoryContentService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentService for MemoryContentService {
    fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    async fn insert(&self, ctx: InsertContext, mut document: Document) -> AppResult<Document> {
        self.dispatcher
            .invoke(HookPoint::PreInsert, &ctx, &mut document)
            .await?;

        if document.doc_type.is_none() {
            document.doc_type = Some(ctx.schema_name.clone());
        }
        let id = DocumentId::new();
        document.id = Some(id);

        self.documents
            .write()
            .await
            .entry(ctx.schema_name.clone())
            .or_default()
            .push(document.clone());

        debug!(schema = %ctx.schema_name, document_id = %id, "Document inserted");

        self.dispatcher
            .notify(HookPoint::PostInsert, &ctx, &mut document)
            .await;

        Ok(document)
    }

    async fn find(&self, schema_name: &str) -> AppResult<Vec<Document>> {
        let documents = self.documents.read().await;
        Ok(documents.get(schema_name).cloned().unwrap_or_default())
    }
}

/// Plugin registry keeping descriptors in registration order.
#[derive(Debug, Default)]
pub struct MemoryContentPluginService {
    /// Registered plugins.
    plugins: RwLock<Vec<PluginDescriptor>>,
}

impl MemoryContentPluginService {
    /// Creates an empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with `plugins`.
    pub fn with_plugins(plugins: impl IntoIterator<Item = PluginDescriptor>) -> Self {
        Self {
            plugins: RwLock::new(plugins.into_iter().collect()),
        }
    }

    /// Adds a plugin, replacing any existing descriptor of the same name in place.
    pub async fn add(&self, descriptor: PluginDescriptor) {
        let mut plugins = self.plugins.write().await;
        match plugins.iter_mut().find(|p| p.name == descriptor.name) {
            Some(existing) => *existing = descriptor,
            None => {
                info!(plugin = %descriptor.name, default = descriptor.is_added_by_default, "Plugin added");
                plugins.push(descriptor);
            }
        }
    }
}

#[async_trait]
impl ContentPluginService for MemoryContentPluginService {
    async fn find(&self, filter: &PluginFilter) -> AppResult<Vec<PluginDescriptor>> {
        let plugins = self.plugins.read().await;
        Ok(plugins
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::definitions::HookAction;
    use crate::traits::ClosureHandler;

    #[tokio::test]
    async fn test_insert_assigns_id_and_type() {
        let content = MemoryContentService::new();
        let stored = content
            .insert(InsertContext::new("article"), Document::new())
            .await
            .expect("insert");

        assert!(stored.id.is_some());
        assert_eq!(stored.doc_type.as_deref(), Some("article"));
        assert_eq!(content.count("article").await, 1);
        assert_eq!(content.find("article").await.expect("find"), vec![stored]);
    }

    #[tokio::test]
    async fn test_insert_keeps_explicit_type() {
        let content = MemoryContentService::new();
        let stored = content
            .insert(
                InsertContext::new("config"),
                Document::new().with_type("course-config"),
            )
            .await
            .expect("insert");

        assert_eq!(stored.doc_type.as_deref(), Some("course-config"));
        assert_eq!(content.count("config").await, 1);
    }

    #[tokio::test]
    async fn test_pre_insert_mutation_is_stored() {
        let content = MemoryContentService::new();
        content
            .hooks()
            .register(
                HookPoint::PreInsert,
                Arc::new(ClosureHandler::new("tagger", 100, |_, doc| {
                    doc.enabled_plugins_mut().push("tagged".to_string());
                    Ok(HookAction::Continue)
                })),
            )
            .await;

        content
            .insert(InsertContext::new("config"), Document::new())
            .await
            .expect("insert");

        let stored = content.find("config").await.expect("find");
        assert_eq!(
            stored[0].enabled_plugins(),
            Some(&["tagged".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_halted_insert_is_not_stored() {
        let content = MemoryContentService::new();
        content
            .hooks()
            .register(
                HookPoint::PreInsert,
                Arc::new(ClosureHandler::new("guard", 100, |_, _| {
                    Ok(HookAction::halt("locked"))
                })),
            )
            .await;

        let result = content
            .insert(InsertContext::new("config"), Document::new())
            .await;

        assert!(result.is_err());
        assert_eq!(content.count("config").await, 0);
    }

    #[tokio::test]
    async fn test_plugin_find_preserves_order_and_filters() {
        let registry = MemoryContentPluginService::with_plugins([
            PluginDescriptor::new("b").added_by_default(),
            PluginDescriptor::new("optional"),
            PluginDescriptor::new("a").added_by_default(),
        ]);

        let names: Vec<String> = registry
            .find(&PluginFilter::added_by_default())
            .await
            .expect("find")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_plugin_add_replaces_in_place() {
        let registry = MemoryContentPluginService::new();
        registry.add(PluginDescriptor::new("a")).await;
        registry.add(PluginDescriptor::new("b")).await;
        registry
            .add(PluginDescriptor::new("a").added_by_default().with_version("2.0.0"))
            .await;

        let all = registry.find(&PluginFilter::all()).await.expect("find");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "a");
        assert!(all[0].is_added_by_default);
        assert_eq!(all[0].version.as_deref(), Some("2.0.0"));
    }
}
