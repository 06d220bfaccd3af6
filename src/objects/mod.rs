//! Data model shared by the engine and connector implementations.
//!
//! # Key Types
//!
//! - [`AttributeDelta`] - Requested change for a single attribute
//! - [`Attribute`] - Whole value sequence of a single attribute
//! - [`ConnectorObject`] - Object read back from a connector
//! - [`ObjectClass`] / [`Uid`] - Object category and identity
//! - [`OperationOptions`] - Options passed through to connector calls
//! - [`OperationalAttributes`] - Names reserved for replace-only semantics
//!
//! Attribute names are compared case-insensitively throughout, except for
//! operational attribute membership which is an exact match.

pub mod attribute;
pub mod connector_object;
pub mod delta;
pub mod object_class;
pub mod operational;
pub mod options;
pub mod uid;

pub use attribute::Attribute;
pub use connector_object::ConnectorObject;
pub use delta::{AttributeDelta, AttributeDeltaBuilder};
pub use object_class::ObjectClass;
pub use operational::OperationalAttributes;
pub use options::{OperationOptions, OperationOptionsBuilder};
pub use uid::Uid;

/// Reserved attribute name carrying the object's uid.
pub const UID_ATTRIBUTE: &str = "__UID__";

/// Reserved attribute name carrying the object's naming attribute.
pub const NAME_ATTRIBUTE: &str = "__NAME__";

/// Compare two attribute names the way connectors do.
pub fn names_equal(left: &str, right: &str) -> bool {
    left.eq_ignore_ascii_case(right)
}
