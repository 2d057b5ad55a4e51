//! Default-plugins module configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the module that enables default plugins on new
/// config documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultPluginsConfig {
    /// Content schema whose inserts receive the default plugins.
    #[serde(default = "default_schema_name")]
    pub schema_name: String,
}

impl Default for DefaultPluginsConfig {
    fn default() -> Self {
        Self {
            schema_name: default_schema_name(),
        }
    }
}

fn default_schema_name() -> String {
    "config".to_string()
}
