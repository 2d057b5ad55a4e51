//! Module context: collaborators and configuration available to modules.
//!
//! Collaborators are registered under a well-known name together with the
//! interface type they implement (usually a trait object such as
//! `dyn ContentService`). Modules resolve them during `init`, keep the
//! returned `Arc` for their lifetime, and never look them up again.

use std::any::{Any, type_name};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::{debug, warn};

use authoring_core::config::AppConfig;
use authoring_core::types::{Document, InsertContext, PluginDescriptor, PluginFilter};
use authoring_core::{AppError, AppResult};

use crate::hooks::registry::HookRegistry;

/// Name under which the content service is registered.
pub const CONTENT_SERVICE: &str = "content";

/// Name under which the plugin registry service is registered.
pub const CONTENT_PLUGIN_SERVICE: &str = "contentplugin";

/// Content storage operations available to modules.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Returns the registry of content lifecycle hooks.
    ///
    /// Handlers registered on [`HookPoint::PreInsert`] receive a mutable
    /// borrow of every document before it is stored.
    ///
    /// [`HookPoint::PreInsert`]: crate::hooks::definitions::HookPoint::PreInsert
    fn hooks(&self) -> &Arc<HookRegistry>;

    /// Inserts a document, running the pre-insert and post-insert hooks.
    ///
    /// Returns the document as stored.
    async fn insert(&self, ctx: InsertContext, document: Document) -> AppResult<Document>;

    /// Returns every stored document of a schema, in insertion order.
    async fn find(&self, schema_name: &str) -> AppResult<Vec<Document>>;
}

/// Plugin registry queries available to modules.
#[async_trait]
pub trait ContentPluginService: Send + Sync {
    /// Returns every plugin matching `filter`, in registry order.
    async fn find(&self, filter: &PluginFilter) -> AppResult<Vec<PluginDescriptor>>;
}

type Boxed = Box<dyn Any + Send + Sync>;

/// Context passed to modules during initialization.
///
/// Holds the host configuration and a name-keyed hub of collaborators.
pub struct ModuleContext {
    /// Host configuration.
    config: Arc<AppConfig>,
    /// Collaborator name → `Arc<T>` boxed as `Any`.
    services: DashMap<String, Boxed>,
    /// Woken whenever a collaborator is registered.
    registered: Notify,
}

impl std::fmt::Debug for ModuleContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.services.iter().map(|e| e.key().clone()).collect();
        f.debug_struct("ModuleContext")
            .field("services", &names)
            .finish()
    }
}

impl ModuleContext {
    /// Creates an empty context.
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            services: DashMap::new(),
            registered: Notify::new(),
        }
    }

    /// Returns the host configuration.
    pub fn config(&self) -> &Arc<AppConfig> {
        &self.config
    }

    /// Registers a collaborator under `name` as interface type `T`.
    ///
    /// Re-registering a name replaces the previous collaborator; modules that
    /// already resolved it keep their `Arc`.
    pub fn register<T>(&self, name: &str, service: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.services.insert(name.to_string(), Box::new(service));
        debug!(service = %name, interface = type_name::<T>(), "Collaborator registered");
        self.registered.notify_waiters();
    }

    /// Returns whether a collaborator is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Resolves a registered collaborator without waiting.
    pub fn get<T>(&self, name: &str) -> AppResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.lookup::<T>(name).unwrap_or_else(|| {
            Err(AppError::service_unavailable(format!(
                "Collaborator '{name}' is not registered"
            )))
        })
    }

    /// Resolves a collaborator, waiting for it to be registered.
    ///
    /// Fails with `ServiceUnavailable` once the configured resolve timeout
    /// elapses, or with `Internal` if the name is bound to another interface.
    /// A timeout too large to represent as a deadline waits without one.
    pub async fn wait_for<T>(&self, name: &str) -> AppResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let timeout = self.config.modules.resolve_timeout();
        let deadline = Instant::now().checked_add(timeout);

        loop {
            let notified = self.registered.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(found) = self.lookup::<T>(name) {
                return found;
            }

            debug!(service = %name, "Waiting for collaborator");

            let Some(deadline) = deadline else {
                notified.await;
                continue;
            };

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                warn!(
                    service = %name,
                    timeout_seconds = timeout.as_secs(),
                    "Collaborator did not become available"
                );
                return Err(AppError::service_unavailable(format!(
                    "Collaborator '{name}' not available after {}s",
                    timeout.as_secs()
                )));
            }
        }
    }

    fn lookup<T>(&self, name: &str) -> Option<AppResult<Arc<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let entry = self.services.get(name)?;
        Some(
            entry
                .downcast_ref::<Arc<T>>()
                .cloned()
                .ok_or_else(|| {
                    AppError::internal(format!(
                        "Collaborator '{name}' does not implement {}",
                        type_name::<T>()
                    ))
                }),
        )
    }
}
