//! Delta update engine.
//!
//! [`UpdateDeltaEngine`] offers a single delta update contract regardless of
//! which update operations the underlying connector implements. Each call
//! goes through the same pipeline:
//!
//! 1. validation of the object class, uid and deltas
//! 2. normalization of the uid and every delta value
//! 3. selection of an [`UpdateTier`] from the connector's capabilities
//! 4. execution on that tier (one or more connector calls)
//! 5. normalization of the side-effect deltas returned to the caller
//!
//! # Example Usage
//!
//! ```rust
//! use connector_delta::connectors::{InMemoryConnector, UpdateMode};
//! use connector_delta::objects::{Attribute, AttributeDelta, ObjectClass};
//! use connector_delta::update::UpdateDeltaEngine;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = InMemoryConnector::new(UpdateMode::ReadModifyWrite);
//! let uid = connector
//!     .create(&ObjectClass::account(), vec![Attribute::single("__NAME__", "jdoe")])
//!     .await?;
//!
//! let engine = UpdateDeltaEngine::new(connector);
//! let side_effects = engine
//!     .update_delta(
//!         &ObjectClass::account(),
//!         &uid,
//!         &[AttributeDelta::add("groups", vec![json!("admins")])],
//!         None,
//!     )
//!     .await?;
//! assert!(side_effects.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod read_modify_write;
pub mod side_effects;
pub mod validation;

mod native;
mod normalize;
mod oplog;
mod value_set;

pub use side_effects::uid_side_effects;
pub use validation::DeltaValidator;

use crate::capabilities::{ConnectorCapabilities, UpdateTier};
use crate::error::UpdateResult;
use crate::objects::{AttributeDelta, ObjectClass, OperationOptions, OperationalAttributes, Uid};
use crate::spi::{AttributeNormalizer, Connector, IdentityNormalizer};
use log::{debug, info, trace};
use normalize::DeltaNormalizer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Engine configuration.
///
/// Fixed once the engine is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateEngineConfig {
    /// Attributes that may only be replaced, never added to or removed from.
    pub operational_attributes: OperationalAttributes,

    /// Whether uids (and `__UID__` side effects) are normalized.
    pub normalize_uid: bool,

    /// Use the connector's own normalizer when it advertises one, rather than
    /// the normalizer configured on the engine.
    pub prefer_connector_normalizer: bool,
}

impl Default for UpdateEngineConfig {
    fn default() -> Self {
        Self {
            operational_attributes: OperationalAttributes::default(),
            normalize_uid: true,
            prefer_connector_normalizer: true,
        }
    }
}

/// State of one update as it flows through a tier.
pub(crate) struct UpdateRequest<'a> {
    pub(crate) request_id: String,
    pub(crate) object_class: &'a ObjectClass,
    /// Normalized uid as sent to the connector
    pub(crate) uid: Uid,
    /// Normalized deltas
    pub(crate) deltas: Vec<AttributeDelta>,
    pub(crate) options: OperationOptions,
}

/// Applies attribute deltas through whichever update tier a connector offers.
pub struct UpdateDeltaEngine<C> {
    connector: C,
    config: UpdateEngineConfig,
    normalizer: Option<Arc<dyn AttributeNormalizer>>,
}

impl<C: Connector> UpdateDeltaEngine<C> {
    /// Create an engine with the default configuration.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            config: UpdateEngineConfig::default(),
            normalizer: None,
        }
    }

    pub fn builder(connector: C) -> UpdateDeltaEngineBuilder<C> {
        UpdateDeltaEngineBuilder::new(connector)
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn config(&self) -> &UpdateEngineConfig {
        &self.config
    }

    /// Capabilities currently advertised by the connector.
    pub fn capabilities(&self) -> ConnectorCapabilities {
        ConnectorCapabilities::of(&self.connector)
    }

    /// Apply `deltas` to the object identified by `uid`.
    ///
    /// # Arguments
    /// * `object_class` - Class of the object; `__ALL__` is rejected
    /// * `uid` - The object's uid
    /// * `deltas` - Requested changes, one entry per attribute
    /// * `options` - Passed through to the connector; `None` means no options
    ///
    /// # Returns
    /// Normalized side-effect deltas: changes the connector made that were not
    /// requested, such as a new uid after a rename. Empty when there were none.
    ///
    /// # Errors
    /// Validation and tier selection failures are reported with a specific
    /// [`UpdateError`](crate::error::UpdateError) kind before the connector is
    /// called. Connector failures are returned unchanged inside
    /// [`UpdateError::Connector`](crate::error::UpdateError::Connector); for the
    /// multi-call tiers, calls that already succeeded are not rolled back.
    pub async fn update_delta(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        deltas: &[AttributeDelta],
        options: Option<&OperationOptions>,
    ) -> UpdateResult<Vec<AttributeDelta>> {
        DeltaValidator::new(&self.config.operational_attributes).validate(
            object_class,
            uid,
            deltas,
        )?;

        let normalizer =
            DeltaNormalizer::new(self.normalizer(), object_class, self.config.normalize_uid);
        let request = UpdateRequest {
            request_id: Uuid::new_v4().to_string(),
            object_class,
            uid: normalizer.uid(uid),
            deltas: normalizer.deltas(deltas),
            options: options.cloned().unwrap_or_default(),
        };

        let tier = UpdateTier::select(&self.connector)?;

        info!(
            "Updating {} object '{}' with {} delta(s) via {} tier (request: '{}')",
            object_class,
            request.uid,
            request.deltas.len(),
            tier.kind(),
            request.request_id
        );
        trace!(
            "Normalized deltas: [{}] (request: '{}')",
            oplog::join(&request.deltas),
            request.request_id
        );

        let side_effects = match tier {
            UpdateTier::Delta(op) => native::apply(op, &request).await?,
            UpdateTier::ValueSet(op) => value_set::apply(op, &request).await?,
            UpdateTier::ReadModifyWrite { update, get } => {
                read_modify_write::apply(update, get, &normalizer, &request).await?
            }
        };
        let side_effects = normalizer.deltas(&side_effects);

        debug!(
            "Update of '{}' finished with {} side effect(s) (request: '{}')",
            request.uid,
            side_effects.len(),
            request.request_id
        );
        Ok(side_effects)
    }

    fn normalizer(&self) -> &dyn AttributeNormalizer {
        let connector_normalizer = self.connector.normalizer();
        let configured = self.normalizer.as_deref();
        let chosen = if self.config.prefer_connector_normalizer {
            connector_normalizer.or(configured)
        } else {
            configured.or(connector_normalizer)
        };
        chosen.unwrap_or(&IdentityNormalizer)
    }
}

/// Builder for [`UpdateDeltaEngine`].
pub struct UpdateDeltaEngineBuilder<C> {
    connector: C,
    config: UpdateEngineConfig,
    normalizer: Option<Arc<dyn AttributeNormalizer>>,
}

impl<C: Connector> UpdateDeltaEngineBuilder<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            config: UpdateEngineConfig::default(),
            normalizer: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: UpdateEngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn operational_attributes(mut self, operational_attributes: OperationalAttributes) -> Self {
        self.config.operational_attributes = operational_attributes;
        self
    }

    pub fn normalize_uid(mut self, normalize_uid: bool) -> Self {
        self.config.normalize_uid = normalize_uid;
        self
    }

    pub fn prefer_connector_normalizer(mut self, prefer: bool) -> Self {
        self.config.prefer_connector_normalizer = prefer;
        self
    }

    /// Normalizer used when the connector does not provide its own.
    pub fn normalizer(mut self, normalizer: impl AttributeNormalizer + 'static) -> Self {
        self.normalizer = Some(Arc::new(normalizer));
        self
    }

    pub fn build(self) -> UpdateDeltaEngine<C> {
        UpdateDeltaEngine {
            connector: self.connector,
            config: self.config,
            normalizer: self.normalizer,
        }
    }
}
