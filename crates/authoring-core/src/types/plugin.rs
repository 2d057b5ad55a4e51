//! Plugin registry records and the filter used to query them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A plugin known to the plugin registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDescriptor {
    /// Unique plugin name, as stored in `_enabledPlugins`.
    pub name: String,
    /// Whether the plugin is enabled on newly created config documents.
    #[serde(default)]
    pub is_added_by_default: bool,
    /// Installed plugin version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Remaining registry fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PluginDescriptor {
    /// Creates a descriptor that is not added by default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_added_by_default: false,
            version: None,
            extra: Map::new(),
        }
    }

    /// Marks the plugin as added by default.
    pub fn added_by_default(mut self) -> Self {
        self.is_added_by_default = true;
        self
    }

    /// Sets the plugin version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Query filter for the plugin registry.
///
/// Unset fields match every descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginFilter {
    /// Restrict results by the added-by-default flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_added_by_default: Option<bool>,
}

impl PluginFilter {
    /// Filter matching every plugin.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching `{ isAddedByDefault: true }`.
    pub fn added_by_default() -> Self {
        Self {
            is_added_by_default: Some(true),
        }
    }

    /// Returns whether the descriptor satisfies this filter.
    pub fn matches(&self, descriptor: &PluginDescriptor) -> bool {
        self.is_added_by_default
            .is_none_or(|flag| descriptor.is_added_by_default == flag)
    }
}
