//! Per-resource state
//!
//! [`ResourceData`] mirrors the last observed remote object. The `id`
//! attribute doubles as the existence marker: a resource whose id has been
//! cleared is gone and the host drops it from state.

use crate::diagnostics::{DiagResult, Diagnostic, Diagnostics};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ID: &str = "id";

/// Attribute map of a single managed resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceData {
    attributes: Map<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Resource identifier, `None` when the resource does not exist
    pub fn id(&self) -> Option<&str> {
        self.get_str(ID).filter(|id| !id.is_empty())
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.attributes.insert(ID.to_string(), Value::String(id.into()));
    }

    /// Mark the resource as gone
    pub fn clear_id(&mut self) {
        self.attributes.remove(ID);
    }

    pub fn exists(&self) -> bool {
        self.id().is_some()
    }

    /// The id, or an error diagnostic when the state has none
    pub fn require_id(&self) -> DiagResult<&str> {
        self.id().ok_or_else(|| {
            Diagnostic::error("Resource has no id")
                .with_attribute(ID)
                .with_detail("The resource state does not carry an identifier.")
                .into()
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// A string attribute that must be present
    pub fn require_str(&self, key: &str) -> DiagResult<&str> {
        self.get_str(key).ok_or_else(|| missing(key))
    }

    /// An integer attribute that must be present
    pub fn require_i64(&self, key: &str) -> DiagResult<i64> {
        self.get_i64(key).ok_or_else(|| missing(key))
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn into_attributes(self) -> Map<String, Value> {
        self.attributes
    }
}

impl From<Map<String, Value>> for ResourceData {
    fn from(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }
}

fn missing(key: &str) -> Diagnostics {
    Diagnostic::error("Missing attribute value")
        .with_attribute(key)
        .with_detail(format!("The attribute \"{}\" has no value in the resource state.", key))
        .into()
}
