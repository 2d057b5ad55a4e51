//! Authoring Host: module host for content authoring
//!
//! Main entry point that wires the collaborators together and starts modules.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use authoring_core::config::AppConfig;
use authoring_core::error::AppError;
use authoring_plugin::api::context::{CONTENT_PLUGIN_SERVICE, CONTENT_SERVICE};
use authoring_plugin::api::services::{MemoryContentPluginService, MemoryContentService};
use authoring_plugin::{ContentPluginService, ContentService, ModuleContext, ModuleManager};
use plugin_defaultplugins::DefaultPluginsModule;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Host error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("AUTHORING_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main host run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting authoring host v{}", env!("CARGO_PKG_VERSION"));

    // Step 1: Collaborators
    let context = Arc::new(ModuleContext::new(Arc::new(config)));

    let content = Arc::new(MemoryContentService::new());
    let plugins = Arc::new(MemoryContentPluginService::new());
    context.register::<dyn ContentService>(CONTENT_SERVICE, content);
    context.register::<dyn ContentPluginService>(CONTENT_PLUGIN_SERVICE, plugins);

    // Step 2: Modules
    let manager = ModuleManager::new(context);
    manager
        .load_module(Arc::new(DefaultPluginsModule::new()))
        .await?;

    tracing::info!(
        modules = manager.list_modules().await.len(),
        "Authoring host ready"
    );

    // Step 3: Graceful shutdown
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, unloading modules...");
    manager.unload_all().await;

    tracing::info!("Authoring host shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
