//! Connector capability discovery and update tier selection.
//!
//! A connector advertises which operations it implements through the
//! accessors of [`Connector`]. From that set exactly one [`UpdateTier`] is
//! chosen per update, in priority order:
//!
//! 1. [`UpdateTier::Delta`] - the connector applies deltas itself
//! 2. [`UpdateTier::ValueSet`] - replace plus add/remove of individual values
//! 3. [`UpdateTier::ReadModifyWrite`] - replace only, with the current object
//!    read first; requires retrieval support
//!
//! Selection is evaluated again for every update.

use crate::error::{UpdateError, UpdateResult};
use crate::spi::{Connector, GetOp, UpdateAttributeValuesOp, UpdateDeltaOp, UpdateOp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of an update tier, without the operation handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateTierKind {
    Delta,
    ValueSet,
    ReadModifyWrite,
}

impl fmt::Display for UpdateTierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpdateTierKind::Delta => "delta",
            UpdateTierKind::ValueSet => "value-set",
            UpdateTierKind::ReadModifyWrite => "read-modify-write",
        };
        f.write_str(name)
    }
}

/// The update strategy selected for a connector, holding the operations it
/// will call.
#[derive(Clone, Copy)]
pub enum UpdateTier<'a> {
    /// Connector understands deltas natively
    Delta(&'a dyn UpdateDeltaOp),
    /// Connector replaces, adds and removes whole value sets
    ValueSet(&'a dyn UpdateAttributeValuesOp),
    /// Connector only replaces; current values are read first
    ReadModifyWrite {
        update: &'a dyn UpdateOp,
        get: &'a dyn GetOp,
    },
}

impl<'a> UpdateTier<'a> {
    /// Select the highest-priority tier the connector supports.
    ///
    /// # Errors
    /// [`UpdateError::UnsupportedOperation`] when the connector has no update
    /// operation, or only whole-value replacement without retrieval.
    pub fn select<C: Connector + ?Sized>(connector: &'a C) -> UpdateResult<Self> {
        if let Some(op) = connector.as_update_delta() {
            return Ok(UpdateTier::Delta(op));
        }
        if let Some(op) = connector.as_update_attribute_values() {
            return Ok(UpdateTier::ValueSet(op));
        }
        match (connector.as_update(), connector.as_get()) {
            (Some(update), Some(get)) => Ok(UpdateTier::ReadModifyWrite { update, get }),
            (Some(_), None) => Err(UpdateError::unsupported(
                "Connector must support get to apply deltas by read-modify-write",
            )),
            (None, _) => Err(UpdateError::unsupported(
                "Connector does not support any update operation",
            )),
        }
    }

    pub fn kind(&self) -> UpdateTierKind {
        match self {
            UpdateTier::Delta(_) => UpdateTierKind::Delta,
            UpdateTier::ValueSet(_) => UpdateTierKind::ValueSet,
            UpdateTier::ReadModifyWrite { .. } => UpdateTierKind::ReadModifyWrite,
        }
    }
}

impl fmt::Debug for UpdateTier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UpdateTier").field(&self.kind()).finish()
    }
}

/// Report of the operations a connector advertises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorCapabilities {
    /// Native delta update
    pub update_delta: bool,

    /// Add/remove of individual values
    pub update_attribute_values: bool,

    /// Whole-value replacement (implied by `update_attribute_values`)
    pub update: bool,

    /// Single object retrieval
    pub get: bool,

    /// Connector-specific normalization
    pub normalizer: bool,

    /// Tier the engine would select, if any
    pub update_tier: Option<UpdateTierKind>,
}

impl ConnectorCapabilities {
    /// Discover the capabilities of a connector.
    pub fn of<C: Connector + ?Sized>(connector: &C) -> Self {
        let update_attribute_values = connector.as_update_attribute_values().is_some();
        Self {
            update_delta: connector.as_update_delta().is_some(),
            update_attribute_values,
            update: update_attribute_values || connector.as_update().is_some(),
            get: connector.as_get().is_some(),
            normalizer: connector.normalizer().is_some(),
            update_tier: UpdateTier::select(connector).ok().map(|tier| tier.kind()),
        }
    }

    /// Whether deltas can be applied to this connector at all.
    pub fn supports_update_delta(&self) -> bool {
        self.update_tier.is_some()
    }
}
