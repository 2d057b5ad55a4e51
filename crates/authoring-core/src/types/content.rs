//! Content documents and the context that accompanies their insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::DocumentId;

/// A content document on its way into (or out of) content storage.
///
/// Only the attributes modules reason about are typed. Every other field of
/// the content schema is carried in [`fields`](Self::fields) and written back
/// unchanged when the document is serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Storage identifier, assigned by the content service on insert.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    /// Content type discriminator (e.g. `"config"`, `"article"`).
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// Ordered, duplicate-free list of enabled plugin names.
    #[serde(
        rename = "_enabledPlugins",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enabled_plugins: Option<Vec<String>>,
    /// Remaining schema fields, passed through untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the content type discriminator.
    pub fn with_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Sets the enabled plugin list.
    pub fn with_enabled_plugins<I, S>(mut self, plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled_plugins = Some(plugins.into_iter().map(Into::into).collect());
        self
    }

    /// Inserts an opaque schema field.
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Gets an opaque schema field by key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the enabled plugin list, if the document carries one.
    pub fn enabled_plugins(&self) -> Option<&[String]> {
        self.enabled_plugins.as_deref()
    }

    /// Returns the enabled plugin list, creating an empty one if absent.
    pub fn enabled_plugins_mut(&mut self) -> &mut Vec<String> {
        self.enabled_plugins.get_or_insert_with(Vec::new)
    }
}

/// Context passed alongside a document to content lifecycle hooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertContext {
    /// Name of the content schema the document is being inserted as.
    pub schema_name: String,
    /// Timestamp of the operation.
    pub timestamp: DateTime<Utc>,
}

impl InsertContext {
    /// Creates a new insert context for a schema.
    pub fn new(schema_name: impl Into<String>) -> Self {
        Self {
            schema_name: schema_name.into(),
            timestamp: Utc::now(),
        }
    }

    /// Returns whether this insert targets the given schema.
    pub fn is_schema(&self, schema_name: &str) -> bool {
        self.schema_name == schema_name
    }
}
