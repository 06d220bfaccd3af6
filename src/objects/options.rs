//! Operation options passed through to connector calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Options accompanying a connector operation.
///
/// The engine only interprets `attributes_to_get`, which it sets when reading
/// an object before writing it back. Every other option is opaque and handed
/// to the connector untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attributes_to_get: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    options: BTreeMap<String, Value>,
}

impl OperationOptions {
    /// Names of the attributes the caller wants returned, if restricted.
    pub fn attributes_to_get(&self) -> Option<&[String]> {
        self.attributes_to_get.as_deref()
    }

    /// Get an opaque option by name.
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// All opaque options.
    pub fn options(&self) -> &BTreeMap<String, Value> {
        &self.options
    }
}

impl fmt::Display for OperationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("{}"),
        }
    }
}

/// Builder for [`OperationOptions`].
#[derive(Debug, Clone, Default)]
pub struct OperationOptionsBuilder {
    inner: OperationOptions,
}

impl OperationOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a copy of existing options.
    pub fn from_options(options: &OperationOptions) -> Self {
        Self {
            inner: options.clone(),
        }
    }

    pub fn attributes_to_get<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.attributes_to_get = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inner.options.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> OperationOptions {
        self.inner
    }
}
