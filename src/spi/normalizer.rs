//! Attribute normalization strategies.
//!
//! Normalization canonicalizes uids and attribute values so that requests and
//! results use the same representation. Implementations must be deterministic
//! and idempotent: normalizing an already normalized value returns it as-is.

use crate::objects::{ObjectClass, Uid};
use serde_json::Value;
use std::collections::BTreeSet;

/// Pluggable per-object-class canonicalization.
pub trait AttributeNormalizer: Send + Sync {
    /// Normalize a uid. Defaults to returning it unchanged.
    fn normalize_uid(&self, object_class: &ObjectClass, uid: &Uid) -> Uid {
        let _ = object_class;
        uid.clone()
    }

    /// Normalize a single value of the named attribute.
    fn normalize_value(&self, object_class: &ObjectClass, name: &str, value: &Value) -> Value;
}

/// Leaves everything untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl AttributeNormalizer for IdentityNormalizer {
    fn normalize_value(&self, _object_class: &ObjectClass, _name: &str, value: &Value) -> Value {
        value.clone()
    }
}

/// Lowercases string values of selected attributes.
///
/// Useful for targets that treat names like `mail` or group references
/// case-insensitively. Non-string values pass through unchanged.
#[derive(Debug, Clone, Default)]
pub struct CaseInsensitiveNormalizer {
    // Stored lowercased
    attributes: BTreeSet<String>,
    object_classes: Option<BTreeSet<String>>,
    uid: bool,
}

impl CaseInsensitiveNormalizer {
    /// Normalize the given attributes for every object class.
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            attributes: attributes
                .into_iter()
                .map(|name| name.as_ref().to_ascii_lowercase())
                .collect(),
            object_classes: None,
            uid: false,
        }
    }

    /// Also lowercase uid values.
    pub fn with_uid(mut self) -> Self {
        self.uid = true;
        self
    }

    /// Restrict normalization to the given object classes.
    pub fn for_object_classes<I, S>(mut self, object_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.object_classes = Some(
            object_classes
                .into_iter()
                .map(|name| name.as_ref().to_ascii_lowercase())
                .collect(),
        );
        self
    }

    fn applies_to(&self, object_class: &ObjectClass) -> bool {
        match &self.object_classes {
            Some(classes) => classes.contains(&object_class.name().to_ascii_lowercase()),
            None => true,
        }
    }
}

impl AttributeNormalizer for CaseInsensitiveNormalizer {
    fn normalize_uid(&self, object_class: &ObjectClass, uid: &Uid) -> Uid {
        if self.uid && self.applies_to(object_class) {
            uid.clone().map_value(|value| value.to_lowercase())
        } else {
            uid.clone()
        }
    }

    fn normalize_value(&self, object_class: &ObjectClass, name: &str, value: &Value) -> Value {
        if !self.applies_to(object_class) || !self.attributes.contains(&name.to_ascii_lowercase()) {
            return value.clone();
        }
        match value {
            Value::String(text) => Value::String(text.to_lowercase()),
            other => other.clone(),
        }
    }
}
