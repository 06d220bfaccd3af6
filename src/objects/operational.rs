//! Operational attribute names.
//!
//! Operational attributes drive account state (enablement, passwords, lockout)
//! or name the object. Changing them value-by-value has no meaning, so they may
//! only appear in replace deltas.

use crate::objects::NAME_ATTRIBUTE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

pub const ENABLE: &str = "__ENABLE__";
pub const ENABLE_DATE: &str = "__ENABLE_DATE__";
pub const DISABLE_DATE: &str = "__DISABLE_DATE__";
pub const LOCK_OUT: &str = "__LOCK_OUT__";
pub const PASSWORD_EXPIRATION_DATE: &str = "__PASSWORD_EXPIRATION_DATE__";
pub const PASSWORD: &str = "__PASSWORD__";
pub const CURRENT_PASSWORD: &str = "__CURRENT_PASSWORD__";
pub const PASSWORD_EXPIRED: &str = "__PASSWORD_EXPIRED__";

static STANDARD: LazyLock<OperationalAttributes> = LazyLock::new(|| {
    OperationalAttributes::new([
        ENABLE,
        ENABLE_DATE,
        DISABLE_DATE,
        LOCK_OUT,
        PASSWORD_EXPIRATION_DATE,
        PASSWORD,
        CURRENT_PASSWORD,
        PASSWORD_EXPIRED,
        NAME_ATTRIBUTE,
    ])
});

/// Immutable set of attribute names that only accept replace deltas.
///
/// Membership is an exact, case-sensitive match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationalAttributes {
    names: BTreeSet<String>,
}

impl OperationalAttributes {
    /// Create a set from the given names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The process-wide standard set: all operational attributes plus `__NAME__`.
    pub fn standard() -> &'static OperationalAttributes {
        &STANDARD
    }

    /// A new set containing these names and the extra ones.
    pub fn with_additional<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut combined = self.names.clone();
        combined.extend(names.into_iter().map(Into::into));
        Self { names: combined }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for OperationalAttributes {
    fn default() -> Self {
        Self::standard().clone()
    }
}
