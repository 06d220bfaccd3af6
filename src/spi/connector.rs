//! Connector operation traits.
//!
//! All operations are async and object safe so that a connector can hand out
//! `&dyn` views of itself for each capability it supports.
//!
//! # Example Implementation
//!
//! ```rust
//! use async_trait::async_trait;
//! use connector_delta::error::ConnectorResult;
//! use connector_delta::objects::{Attribute, ObjectClass, OperationOptions, Uid};
//! use connector_delta::spi::{Connector, UpdateOp};
//!
//! struct ReplaceOnly;
//!
//! #[async_trait]
//! impl UpdateOp for ReplaceOnly {
//!     async fn update(
//!         &self,
//!         _object_class: &ObjectClass,
//!         uid: &Uid,
//!         _attributes: &[Attribute],
//!         _options: &OperationOptions,
//!     ) -> ConnectorResult<Option<Uid>> {
//!         Ok(Some(uid.clone()))
//!     }
//! }
//!
//! impl Connector for ReplaceOnly {
//!     fn as_update(&self) -> Option<&dyn UpdateOp> {
//!         Some(self)
//!     }
//! }
//! ```

use crate::error::ConnectorResult;
use crate::objects::{Attribute, AttributeDelta, ConnectorObject, ObjectClass, OperationOptions, Uid};
use crate::spi::AttributeNormalizer;
use async_trait::async_trait;
use std::sync::Arc;

/// Native delta update.
#[async_trait]
pub trait UpdateDeltaOp: Send + Sync {
    /// Apply the deltas to the object and report side-effect changes.
    ///
    /// # Returns
    /// Deltas the connector applied beyond what was requested (for example a
    /// new uid after a rename). Empty when there were none.
    async fn update_delta(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        deltas: &[AttributeDelta],
        options: &OperationOptions,
    ) -> ConnectorResult<Vec<AttributeDelta>>;
}

/// Whole-value replacement update.
#[async_trait]
pub trait UpdateOp: Send + Sync {
    /// Replace the values of each given attribute.
    ///
    /// # Returns
    /// The uid of the object after the update, which may differ from `uid`.
    /// `None` means the connector did not report one.
    async fn update(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        attributes: &[Attribute],
        options: &OperationOptions,
    ) -> ConnectorResult<Option<Uid>>;
}

/// Incremental value updates, layered on whole-value replacement.
#[async_trait]
pub trait UpdateAttributeValuesOp: UpdateOp {
    /// Add the given values to the current values of each attribute.
    async fn add_attribute_values(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        attributes: &[Attribute],
        options: &OperationOptions,
    ) -> ConnectorResult<Option<Uid>>;

    /// Remove the given values from the current values of each attribute.
    async fn remove_attribute_values(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        attributes: &[Attribute],
        options: &OperationOptions,
    ) -> ConnectorResult<Option<Uid>>;
}

/// Single object retrieval.
#[async_trait]
pub trait GetOp: Send + Sync {
    /// Read the object, restricted to `options.attributes_to_get()` when set.
    ///
    /// Returns `None` if no object with that uid exists.
    async fn get_object(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        options: &OperationOptions,
    ) -> ConnectorResult<Option<ConnectorObject>>;
}

/// A connector and the capabilities it advertises.
///
/// Every accessor defaults to "not supported". Implementors override the ones
/// matching the operation traits they implement, typically returning
/// `Some(self)`.
pub trait Connector: Send + Sync {
    fn as_update_delta(&self) -> Option<&dyn UpdateDeltaOp> {
        None
    }

    fn as_update_attribute_values(&self) -> Option<&dyn UpdateAttributeValuesOp> {
        None
    }

    fn as_update(&self) -> Option<&dyn UpdateOp> {
        None
    }

    fn as_get(&self) -> Option<&dyn GetOp> {
        None
    }

    /// Connector-specific normalization, if any.
    fn normalizer(&self) -> Option<&dyn AttributeNormalizer> {
        None
    }
}

impl<C: Connector + ?Sized> Connector for Arc<C> {
    fn as_update_delta(&self) -> Option<&dyn UpdateDeltaOp> {
        (**self).as_update_delta()
    }

    fn as_update_attribute_values(&self) -> Option<&dyn UpdateAttributeValuesOp> {
        (**self).as_update_attribute_values()
    }

    fn as_update(&self) -> Option<&dyn UpdateOp> {
        (**self).as_update()
    }

    fn as_get(&self) -> Option<&dyn GetOp> {
        (**self).as_get()
    }

    fn normalizer(&self) -> Option<&dyn AttributeNormalizer> {
        (**self).normalizer()
    }
}
