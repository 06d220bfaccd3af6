//! Objects read back from a connector.

use crate::objects::{Attribute, ObjectClass, Uid};
use serde::{Deserialize, Serialize};

/// Snapshot of an object as reported by a connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorObject {
    object_class: ObjectClass,
    uid: Uid,
    attributes: Vec<Attribute>,
}

impl ConnectorObject {
    pub fn new(object_class: ObjectClass, uid: Uid, attributes: Vec<Attribute>) -> Self {
        Self {
            object_class,
            uid,
            attributes,
        }
    }

    pub fn object_class(&self) -> &ObjectClass {
        &self.object_class
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.is(name))
    }

    /// Keep only the attributes whose names are listed.
    pub fn retain_attributes(&mut self, names: &[String]) {
        self.attributes
            .retain(|attribute| names.iter().any(|name| attribute.is(name)));
    }
}
