//! Object identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Connector-assigned identifier of a single object.
///
/// The value is opaque to the engine. Some connectors also report a revision
/// alongside it. An update may hand back a different uid when the connector
/// renames the object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Uid {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    revision: Option<String>,
}

impl Uid {
    /// Create a uid without revision information.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            revision: None,
        }
    }

    /// Create a uid carrying a revision.
    pub fn with_revision(value: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            revision: Some(revision.into()),
        }
    }

    /// Get the uid value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the revision, if the connector reported one.
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Compare uid values, ignoring revisions.
    pub fn same_value(&self, other: &Uid) -> bool {
        self.value == other.value
    }

    /// Replace the value while keeping the revision.
    pub(crate) fn map_value(self, f: impl FnOnce(String) -> String) -> Self {
        Self {
            value: f(self.value),
            revision: self.revision,
        }
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.revision {
            Some(revision) => write!(f, "{} (revision {})", self.value, revision),
            None => f.write_str(&self.value),
        }
    }
}
