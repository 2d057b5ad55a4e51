//! Default-plugins module for the authoring host.
//!
//! When a document is inserted into the `config` content schema, every
//! plugin the registry flags as added-by-default is appended to the
//! document's `_enabledPlugins` list. Existing entries keep their order and
//! names already present are not repeated.

pub mod hooks;
pub mod plugin;

pub use hooks::{DefaultPluginsHook, apply_default_plugins};
pub use plugin::DefaultPluginsModule;
