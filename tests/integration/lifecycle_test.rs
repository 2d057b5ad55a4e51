//! Integration tests for module startup against the host collaborators.

use std::sync::Arc;

use authoring_core::error::ErrorKind;
use authoring_core::types::{Document, InsertContext};
use authoring_plugin::api::context::{CONTENT_PLUGIN_SERVICE, CONTENT_SERVICE};
use authoring_plugin::api::services::MemoryContentService;
use authoring_plugin::{ContentPluginService, ContentService, HookPoint, ModuleManager};
use plugin_defaultplugins::DefaultPluginsModule;
use plugin_defaultplugins::plugin::MODULE_ID;

use crate::helpers::{TestHost, UnavailableRegistry, test_context};

#[tokio::test]
async fn test_ready_after_hook_registered() {
    let host = TestHost::with_defaults(&["plugin-a"]).await;

    assert!(host.manager.is_ready(MODULE_ID).await);
    assert_eq!(
        host.content.hooks().handler_count(&HookPoint::PreInsert).await,
        1
    );
}

#[tokio::test]
async fn test_registry_failure_aborts_insert() {
    let context = test_context();
    let content = Arc::new(MemoryContentService::new());
    context.register::<dyn ContentService>(CONTENT_SERVICE, content.clone());
    context.register::<dyn ContentPluginService>(
        CONTENT_PLUGIN_SERVICE,
        Arc::new(UnavailableRegistry),
    );

    let manager = ModuleManager::new(context);
    manager
        .load_module(Arc::new(DefaultPluginsModule::new()))
        .await
        .expect("load");

    let err = content
        .insert(InsertContext::new("config"), Document::new())
        .await
        .expect_err("insert must fail");

    assert_eq!(err.kind, ErrorKind::Storage);
    assert_eq!(content.count("config").await, 0);

    content
        .insert(InsertContext::new("article"), Document::new())
        .await
        .expect("other schemas are unaffected");
}

#[tokio::test(start_paused = true)]
async fn test_missing_content_service_fails_startup() {
    let context = test_context();
    context.register::<dyn ContentPluginService>(
        CONTENT_PLUGIN_SERVICE,
        Arc::new(UnavailableRegistry),
    );

    let manager = ModuleManager::new(context);
    let err = manager
        .load_module(Arc::new(DefaultPluginsModule::new()))
        .await
        .expect_err("content is never registered");

    assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    assert!(!manager.is_ready(MODULE_ID).await);
}

#[tokio::test]
async fn test_unload_stops_enrichment() {
    let host = TestHost::with_defaults(&["plugin-a"]).await;

    host.manager.unload_all().await;
    let stored = host.insert_config(Document::new()).await;

    assert!(stored.enabled_plugins().is_none());
}
