//! Pre-insert hook that enables default plugins on config documents.

use std::sync::Arc;

use tracing::debug;

use authoring_plugin::prelude::*;

/// Appends each default plugin name not already present to the document's
/// enabled plugin list, in the order given.
///
/// The list is created only when `defaults` is non-empty. Returns the number
/// of names appended.
pub fn apply_default_plugins(document: &mut Document, defaults: &[PluginDescriptor]) -> usize {
    if defaults.is_empty() {
        return 0;
    }

    let enabled = document.enabled_plugins_mut();
    let before = enabled.len();

    for plugin in defaults {
        if !enabled.contains(&plugin.name) {
            enabled.push(plugin.name.clone());
        }
    }

    enabled.len() - before
}

/// Hook handler for pre_insert: enable default plugins on config documents
pub struct DefaultPluginsHook {
    /// Owning module ID
    module_id: String,
    /// Schema whose inserts are enriched
    schema_name: String,
    /// Plugin registry
    plugins: Arc<dyn ContentPluginService>,
}

impl std::fmt::Debug for DefaultPluginsHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultPluginsHook")
            .field("module_id", &self.module_id)
            .field("schema_name", &self.schema_name)
            .finish()
    }
}

impl DefaultPluginsHook {
    /// Create a new pre_insert hook handler
    pub fn new(
        module_id: impl Into<String>,
        schema_name: impl Into<String>,
        plugins: Arc<dyn ContentPluginService>,
    ) -> Self {
        Self {
            module_id: module_id.into(),
            schema_name: schema_name.into(),
            plugins,
        }
    }
}

#[async_trait]
impl HookHandler for DefaultPluginsHook {
    fn name(&self) -> &str {
        "defaultplugins_pre_insert"
    }

    fn module_id(&self) -> &str {
        &self.module_id
    }

    async fn execute(
        &self,
        ctx: &InsertContext,
        document: &mut Document,
    ) -> AppResult<HookAction> {
        if !ctx.is_schema(&self.schema_name) {
            return Ok(HookAction::Continue);
        }

        let defaults = self.plugins.find(&PluginFilter::added_by_default()).await?;
        let added = apply_default_plugins(document, &defaults);

        debug!(
            schema = %ctx.schema_name,
            defaults = defaults.len(),
            added = added,
            "Default plugins applied"
        );

        Ok(HookAction::Continue)
    }
}
