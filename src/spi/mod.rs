//! Service provider interface implemented by connectors.
//!
//! A connector exposes the update contracts it understands through the
//! accessor methods of [`Connector`]. The engine never inspects concrete types;
//! it only asks which operations are available and picks an update strategy
//! from the answer.
//!
//! # Available Operations
//!
//! * [`UpdateDeltaOp`] - Applies attribute deltas natively
//! * [`UpdateAttributeValuesOp`] - Adds/removes individual values, on top of [`UpdateOp`]
//! * [`UpdateOp`] - Replaces whole attribute values
//! * [`GetOp`] - Reads a single object by uid
//! * [`AttributeNormalizer`] - Canonicalizes uids and values

pub mod connector;
pub mod normalizer;

pub use connector::{Connector, GetOp, UpdateAttributeValuesOp, UpdateDeltaOp, UpdateOp};
pub use normalizer::{AttributeNormalizer, CaseInsensitiveNormalizer, IdentityNormalizer};
