//! Object class tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Category of object held by a connector.
///
/// Names compare case-insensitively. The `__ALL__` wildcard addresses every
/// object class at once and is only meaningful for read-style operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectClass(String);

impl ObjectClass {
    /// Name of the predefined account object class.
    pub const ACCOUNT_NAME: &'static str = "__ACCOUNT__";
    /// Name of the predefined group object class.
    pub const GROUP_NAME: &'static str = "__GROUP__";
    /// Name of the wildcard object class.
    pub const ALL_NAME: &'static str = "__ALL__";

    /// Create an object class with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The predefined account object class.
    pub fn account() -> Self {
        Self::new(Self::ACCOUNT_NAME)
    }

    /// The predefined group object class.
    pub fn group() -> Self {
        Self::new(Self::GROUP_NAME)
    }

    /// The wildcard object class.
    pub fn all() -> Self {
        Self::new(Self::ALL_NAME)
    }

    /// Get the object class name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Check whether this object class has the given name.
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }

    /// Check whether this is the `__ALL__` wildcard.
    pub fn is_all(&self) -> bool {
        self.is(Self::ALL_NAME)
    }
}

impl PartialEq for ObjectClass {
    fn eq(&self, other: &Self) -> bool {
        self.is(&other.0)
    }
}

impl Eq for ObjectClass {}

impl Hash for ObjectClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
