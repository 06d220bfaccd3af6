//! Whole-value attributes.

use crate::objects::names_equal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An attribute name together with its complete, ordered value sequence.
///
/// Used for replace/add/remove value-set calls and for objects read back from
/// a connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    values: Vec<Value>,
}

impl Attribute {
    /// Create an attribute with the given values.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Create a single-valued attribute.
    pub fn single(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, vec![value.into()])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether this attribute has the given name.
    pub fn is(&self, name: &str) -> bool {
        names_equal(&self.name, name)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// First value of the attribute, if any.
    pub fn single_value(&self) -> Option<&Value> {
        self.values.first()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, Value::Array(self.values.clone()))
    }
}
