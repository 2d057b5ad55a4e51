//! Integration tests for default plugin enrichment of config inserts.

use serde_json::json;

use authoring_core::types::{Document, PluginDescriptor};

use crate::helpers::{TestHost, names};

#[tokio::test]
async fn test_config_without_list_gets_all_defaults() {
    let host = TestHost::with_defaults(&["plugin-a", "plugin-b"]).await;

    let stored = host.insert_config(Document::new()).await;

    assert_eq!(
        stored.enabled_plugins(),
        Some(&names(&["plugin-a", "plugin-b"])[..])
    );
}

#[tokio::test]
async fn test_existing_default_is_not_duplicated() {
    let host = TestHost::with_defaults(&["plugin-a", "plugin-b"]).await;

    let stored = host
        .insert_config(Document::new().with_enabled_plugins(["plugin-a"]))
        .await;

    assert_eq!(
        stored.enabled_plugins(),
        Some(&names(&["plugin-a", "plugin-b"])[..])
    );
}

#[tokio::test]
async fn test_existing_order_is_preserved() {
    let host = TestHost::with_defaults(&["plugin-c"]).await;

    let stored = host
        .insert_config(Document::new().with_enabled_plugins(["plugin-b", "plugin-a"]))
        .await;

    assert_eq!(
        stored.enabled_plugins(),
        Some(&names(&["plugin-b", "plugin-a", "plugin-c"])[..])
    );
}

#[tokio::test]
async fn test_other_schema_is_untouched() {
    let host = TestHost::with_defaults(&["plugin-a"]).await;

    let stored = host
        .insert("article", Document::new().with_field("title", json!("Intro")))
        .await
        .expect("insert article");

    assert!(stored.enabled_plugins().is_none());
    assert_eq!(stored.field("title"), Some(&json!("Intro")));
}

#[tokio::test]
async fn test_no_defaults_leaves_document_alone() {
    let host = TestHost::with_plugins(vec![PluginDescriptor::new("optional")]).await;

    let stored = host.insert_config(Document::new()).await;
    assert!(stored.enabled_plugins().is_none());

    let stored = host
        .insert_config(Document::new().with_enabled_plugins(["existing"]))
        .await;
    assert_eq!(stored.enabled_plugins(), Some(&names(&["existing"])[..]));
}

#[tokio::test]
async fn test_empty_list_is_filled() {
    let host = TestHost::with_defaults(&["plugin-a"]).await;

    let stored = host
        .insert_config(Document::new().with_enabled_plugins(Vec::<String>::new()))
        .await;

    assert_eq!(stored.enabled_plugins(), Some(&names(&["plugin-a"])[..]));
}

#[tokio::test]
async fn test_many_defaults_keep_registry_order() {
    let all: Vec<String> = (0..10).map(|i| format!("plugin-{i}")).collect();
    let refs: Vec<&str> = all.iter().map(String::as_str).collect();
    let host = TestHost::with_defaults(&refs).await;

    let stored = host.insert_config(Document::new()).await;

    assert_eq!(stored.enabled_plugins(), Some(&all[..]));
}

#[tokio::test]
async fn test_all_defaults_already_enabled() {
    let host = TestHost::with_defaults(&["plugin-a", "plugin-b"]).await;

    let stored = host
        .insert_config(Document::new().with_enabled_plugins(["plugin-b", "plugin-a"]))
        .await;

    assert_eq!(
        stored.enabled_plugins(),
        Some(&names(&["plugin-b", "plugin-a"])[..])
    );
}

#[tokio::test]
async fn test_reinserting_enriched_document_is_stable() {
    let host = TestHost::with_defaults(&["plugin-a", "plugin-b"]).await;

    let first = host
        .insert_config(Document::new().with_enabled_plugins(["custom"]))
        .await;
    let mut again = first.clone();
    again.id = None;
    let second = host.insert_config(again).await;

    assert_eq!(first.enabled_plugins(), second.enabled_plugins());
}

#[tokio::test]
async fn test_only_flagged_plugins_are_added() {
    let host = TestHost::with_plugins(vec![
        PluginDescriptor::new("optional"),
        PluginDescriptor::new("plugin-a").added_by_default(),
    ])
    .await;

    let stored = host.insert_config(Document::new()).await;

    assert_eq!(stored.enabled_plugins(), Some(&names(&["plugin-a"])[..]));
}

#[tokio::test]
async fn test_registry_changes_apply_to_later_inserts() {
    let host = TestHost::with_defaults(&["plugin-a"]).await;

    let before = host.insert_config(Document::new()).await;
    host.plugins
        .add(PluginDescriptor::new("plugin-b").added_by_default())
        .await;
    let after = host.insert_config(Document::new()).await;

    assert_eq!(before.enabled_plugins(), Some(&names(&["plugin-a"])[..]));
    assert_eq!(
        after.enabled_plugins(),
        Some(&names(&["plugin-a", "plugin-b"])[..])
    );
}

#[tokio::test]
async fn test_other_fields_survive_enrichment() {
    let host = TestHost::with_defaults(&["plugin-a"]).await;

    let stored = host
        .insert_config(
            Document::new()
                .with_field("_courseId", json!("course-1"))
                .with_field("_theme", json!("vanilla")),
        )
        .await;

    assert_eq!(stored.field("_courseId"), Some(&json!("course-1")));
    assert_eq!(stored.field("_theme"), Some(&json!("vanilla")));
    assert_eq!(stored.doc_type.as_deref(), Some("config"));
    assert!(stored.id.is_some());
    assert_eq!(host.content.count("config").await, 1);
}
