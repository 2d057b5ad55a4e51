//! Hook point definitions and handler actions.

use serde::{Deserialize, Serialize};

/// Enumeration of the content lifecycle points modules can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPoint {
    /// Fired immediately before a document is stored. Handlers may mutate
    /// the document or halt the insert.
    PreInsert,
    /// Fired after a document has been stored.
    PostInsert,
}

impl HookPoint {
    /// Returns the string name of this hook point.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreInsert => "pre_insert",
            Self::PostInsert => "post_insert",
        }
    }

    /// Returns whether this is a "before" hook that supports halt semantics.
    pub fn is_before_hook(&self) -> bool {
        matches!(self, Self::PreInsert)
    }
}

impl std::fmt::Display for HookPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action returned by a hook handler telling the dispatcher what to do next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookAction {
    /// Continue to the next handler.
    Continue,
    /// Halt execution; no further handlers or the main operation will run.
    Halt(String),
}

impl HookAction {
    /// Creates a halt action.
    pub fn halt(reason: impl Into<String>) -> Self {
        Self::Halt(reason.into())
    }
}
