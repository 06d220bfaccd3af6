//! Applies an [`AttributeNormalizer`] to uids, delta sets and fetched objects.

use crate::objects::{Attribute, AttributeDelta, ConnectorObject, ObjectClass, UID_ATTRIBUTE, Uid};
use crate::spi::AttributeNormalizer;
use serde_json::Value;

/// Normalization bound to the object class of one update.
pub(crate) struct DeltaNormalizer<'a> {
    normalizer: &'a dyn AttributeNormalizer,
    object_class: &'a ObjectClass,
    normalize_uid: bool,
}

impl<'a> DeltaNormalizer<'a> {
    pub(crate) fn new(
        normalizer: &'a dyn AttributeNormalizer,
        object_class: &'a ObjectClass,
        normalize_uid: bool,
    ) -> Self {
        Self {
            normalizer,
            object_class,
            normalize_uid,
        }
    }

    pub(crate) fn uid(&self, uid: &Uid) -> Uid {
        if self.normalize_uid {
            self.normalizer.normalize_uid(self.object_class, uid)
        } else {
            uid.clone()
        }
    }

    /// Normalize every value of every delta, one value at a time.
    ///
    /// Values of `__UID__` deltas go through uid normalization so that
    /// reported renames match the normalized request uid.
    pub(crate) fn deltas(&self, deltas: &[AttributeDelta]) -> Vec<AttributeDelta> {
        deltas
            .iter()
            .map(|delta| delta.map_values(|name, value| self.value(name, value)))
            .collect()
    }

    /// Normalize an object read back from the connector, so that its current
    /// values compare equal to the normalized delta values.
    pub(crate) fn object(&self, object: &ConnectorObject) -> ConnectorObject {
        let attributes = object
            .attributes()
            .iter()
            .map(|attribute| {
                let values = attribute
                    .values()
                    .iter()
                    .map(|value| self.value(attribute.name(), value))
                    .collect();
                Attribute::new(attribute.name(), values)
            })
            .collect();
        ConnectorObject::new(object.object_class().clone(), self.uid(object.uid()), attributes)
    }

    fn value(&self, name: &str, value: &Value) -> Value {
        match value {
            Value::String(text) if names_uid(name) => {
                Value::String(self.uid(&Uid::new(text.as_str())).value().to_string())
            }
            _ if names_uid(name) => value.clone(),
            _ => self
                .normalizer
                .normalize_value(self.object_class, name, value),
        }
    }
}

fn names_uid(name: &str) -> bool {
    name.eq_ignore_ascii_case(UID_ATTRIBUTE)
}
