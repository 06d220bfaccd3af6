//! Attribute deltas.
//!
//! An [`AttributeDelta`] describes the change requested for one attribute. It
//! is either a wholesale replacement of the attribute's values, or an
//! incremental change adding and/or removing individual values. The two modes
//! never mix: once a replacement is present, additions and removals for the
//! same entry are discarded.
//!
//! ```rust
//! use connector_delta::objects::{AttributeDelta, AttributeDeltaBuilder};
//! use serde_json::json;
//!
//! let replace = AttributeDelta::replace("mail", vec![json!("new@example.com")]);
//! assert!(replace.is_replace());
//!
//! let membership = AttributeDeltaBuilder::new("groups")
//!     .add_values(vec![json!("admins")])
//!     .remove_values(vec![json!("guests")])
//!     .build();
//! assert_eq!(membership.values_to_add(), Some(&[json!("admins")][..]));
//! ```

use crate::objects::names_equal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Requested change for a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AttributeDeltaRepr")]
pub struct AttributeDelta {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    values_to_add: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values_to_remove: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values_to_replace: Option<Vec<Value>>,
}

impl AttributeDelta {
    /// Replace all values of the attribute.
    pub fn replace(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values_to_add: None,
            values_to_remove: None,
            values_to_replace: Some(values),
        }
    }

    /// Add and/or remove individual values.
    ///
    /// Passing `None` for both sides yields a delta that carries no change;
    /// such deltas are rejected when an update is validated.
    pub fn add_remove(
        name: impl Into<String>,
        values_to_add: Option<Vec<Value>>,
        values_to_remove: Option<Vec<Value>>,
    ) -> Self {
        Self {
            name: name.into(),
            values_to_add,
            values_to_remove,
            values_to_replace: None,
        }
    }

    /// Add individual values.
    pub fn add(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::add_remove(name, Some(values), None)
    }

    /// Remove individual values.
    pub fn remove(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::add_remove(name, None, Some(values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether this delta targets the given attribute name.
    pub fn is(&self, name: &str) -> bool {
        names_equal(&self.name, name)
    }

    pub fn values_to_add(&self) -> Option<&[Value]> {
        self.values_to_add.as_deref()
    }

    pub fn values_to_remove(&self) -> Option<&[Value]> {
        self.values_to_remove.as_deref()
    }

    pub fn values_to_replace(&self) -> Option<&[Value]> {
        self.values_to_replace.as_deref()
    }

    /// Whether this delta replaces the attribute wholesale.
    pub fn is_replace(&self) -> bool {
        self.values_to_replace.is_some()
    }

    /// Whether any of the three value sequences is present.
    pub fn has_change(&self) -> bool {
        self.values_to_add.is_some()
            || self.values_to_remove.is_some()
            || self.values_to_replace.is_some()
    }

    /// Build a copy with every value passed through `f`.
    ///
    /// Order is preserved and each value stays in the sequence it came from.
    pub fn map_values<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str, &Value) -> Value,
    {
        let mut map = |values: &Option<Vec<Value>>| {
            values
                .as_ref()
                .map(|values| values.iter().map(|value| f(&self.name, value)).collect())
        };
        Self {
            name: self.name.clone(),
            values_to_add: map(&self.values_to_add),
            values_to_remove: map(&self.values_to_remove),
            values_to_replace: map(&self.values_to_replace),
        }
    }
}

impl fmt::Display for AttributeDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |values: &Option<Vec<Value>>| match values {
            Some(values) => Value::Array(values.clone()).to_string(),
            None => "null".to_string(),
        };
        if self.is_replace() {
            write!(
                f,
                "{}: replace {}",
                self.name,
                render(&self.values_to_replace)
            )
        } else {
            write!(
                f,
                "{}: add {}, remove {}",
                self.name,
                render(&self.values_to_add),
                render(&self.values_to_remove)
            )
        }
    }
}

/// Wire shape of [`AttributeDelta`]; folds mixed entries into replace mode.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeDeltaRepr {
    name: String,
    #[serde(default)]
    values_to_add: Option<Vec<Value>>,
    #[serde(default)]
    values_to_remove: Option<Vec<Value>>,
    #[serde(default)]
    values_to_replace: Option<Vec<Value>>,
}

impl From<AttributeDeltaRepr> for AttributeDelta {
    fn from(repr: AttributeDeltaRepr) -> Self {
        match repr.values_to_replace {
            Some(values) => AttributeDelta::replace(repr.name, values),
            None => AttributeDelta::add_remove(repr.name, repr.values_to_add, repr.values_to_remove),
        }
    }
}

/// Fluent builder for [`AttributeDelta`].
#[derive(Debug, Clone)]
pub struct AttributeDeltaBuilder {
    name: String,
    values_to_add: Option<Vec<Value>>,
    values_to_remove: Option<Vec<Value>>,
    values_to_replace: Option<Vec<Value>>,
}

impl AttributeDeltaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values_to_add: None,
            values_to_remove: None,
            values_to_replace: None,
        }
    }

    /// Append values to add. Ignored if replace values are set.
    pub fn add_values(mut self, values: Vec<Value>) -> Self {
        self.values_to_add.get_or_insert_with(Vec::new).extend(values);
        self
    }

    /// Append values to remove. Ignored if replace values are set.
    pub fn remove_values(mut self, values: Vec<Value>) -> Self {
        self.values_to_remove
            .get_or_insert_with(Vec::new)
            .extend(values);
        self
    }

    /// Append values to replace with.
    pub fn replace_values(mut self, values: Vec<Value>) -> Self {
        self.values_to_replace
            .get_or_insert_with(Vec::new)
            .extend(values);
        self
    }

    pub fn build(self) -> AttributeDelta {
        match self.values_to_replace {
            Some(values) => AttributeDelta::replace(self.name, values),
            None => AttributeDelta::add_remove(self.name, self.values_to_add, self.values_to_remove),
        }
    }
}
