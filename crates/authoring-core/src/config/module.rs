//! Module lifecycle configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings applied by the host while starting modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// How long a module may wait for a named collaborator before its
    /// initialization fails.
    #[serde(default = "default_resolve_timeout")]
    pub resolve_timeout_seconds: u64,
}

impl ModuleConfig {
    /// Returns the collaborator resolve timeout as a [`Duration`].
    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_seconds)
    }
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            resolve_timeout_seconds: default_resolve_timeout(),
        }
    }
}

fn default_resolve_timeout() -> u64 {
    30
}
