//! Core type definitions used across the workspace.

pub mod content;
pub mod id;
pub mod plugin;

pub use content::{Document, InsertContext};
pub use id::*;
pub use plugin::{PluginDescriptor, PluginFilter};
