//! Up-front validation of delta update requests.
//!
//! Runs before normalization and before the connector is touched. Checks are
//! applied in a fixed order and the first failure is returned.

use crate::error::{UpdateError, UpdateResult};
use crate::objects::{AttributeDelta, ObjectClass, OperationalAttributes, UID_ATTRIBUTE, Uid};

/// Predicate gate for delta update requests.
#[derive(Debug, Clone, Copy)]
pub struct DeltaValidator<'a> {
    operational_attributes: &'a OperationalAttributes,
}

impl<'a> DeltaValidator<'a> {
    pub fn new(operational_attributes: &'a OperationalAttributes) -> Self {
        Self {
            operational_attributes,
        }
    }

    /// Validate a request.
    ///
    /// # Errors
    /// - [`UpdateError::InvalidArgument`] for an empty uid or object class name
    /// - [`UpdateError::UnsupportedOperation`] for the `__ALL__` object class
    /// - [`UpdateError::InvalidAttributeValue`] when a delta targets `__UID__`
    /// - [`UpdateError::InvalidArgument`] for a delta without any value sequence,
    ///   or an add/remove delta on an operational attribute
    pub fn validate(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        deltas: &[AttributeDelta],
    ) -> UpdateResult<()> {
        if uid.value().is_empty() {
            return Err(UpdateError::invalid_argument("Parameter 'uid' must not be blank"));
        }
        if object_class.name().is_empty() {
            return Err(UpdateError::invalid_argument(
                "Parameter 'objectClass' must not be blank",
            ));
        }
        if object_class.is_all() {
            return Err(UpdateError::unsupported(
                "Operation is not allowed on __ALL__ object class",
            ));
        }

        if deltas.iter().any(|delta| delta.is(UID_ATTRIBUTE)) {
            return Err(UpdateError::invalid_attribute_value(
                "Parameter 'modifications' contains a uid",
            ));
        }

        for delta in deltas {
            if !delta.has_change() {
                return Err(UpdateError::invalid_argument(format!(
                    "Lists of added, removed and replaced values of '{}' can not all be absent",
                    delta.name()
                )));
            }
            if !delta.is_replace() && self.operational_attributes.contains(delta.name()) {
                return Err(UpdateError::invalid_argument(format!(
                    "Operational attribute '{}' can not be added or removed",
                    delta.name()
                )));
            }
        }

        Ok(())
    }
}
