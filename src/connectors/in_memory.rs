//! In-memory connector implementation.
//!
//! Objects are kept in a nested map keyed by object class and uid value,
//! guarded by a `tokio::sync::RwLock`. The structure is:
//!
//! ```text
//! HashMap<ObjectClass, HashMap<String, Vec<Attribute>>>
//! ```
//!
//! An object's uid is the value of its `__NAME__` attribute when it has one,
//! so replacing `__NAME__` renames the object and hands back a new uid.
//! Objects created without a name get a random uuid.
//!
//! Value arithmetic uses list semantics in every mode: added values are
//! appended and each removed value deletes its first occurrence. Replacing an
//! attribute with no values removes it.
//!
//! # Example Usage
//!
//! ```rust
//! use connector_delta::connectors::{InMemoryConnector, UpdateMode};
//! use connector_delta::objects::{Attribute, ObjectClass};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = InMemoryConnector::new(UpdateMode::ValueSet);
//! let uid = connector
//!     .create(&ObjectClass::account(), vec![Attribute::single("__NAME__", "jdoe")])
//!     .await?;
//! assert_eq!(uid.value(), "jdoe");
//! # Ok(())
//! # }
//! ```

use crate::capabilities::UpdateTierKind;
use crate::error::{ConnectorError, ConnectorResult};
use crate::objects::{
    Attribute, AttributeDelta, ConnectorObject, NAME_ATTRIBUTE, ObjectClass, OperationOptions,
    UID_ATTRIBUTE, Uid,
};
use crate::spi::{
    AttributeNormalizer, Connector, GetOp, UpdateAttributeValuesOp, UpdateDeltaOp, UpdateOp,
};
use crate::update::read_modify_write::compute_target;
use crate::update::uid_side_effects;
use async_trait::async_trait;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

type ObjectStore = HashMap<ObjectClass, HashMap<String, Vec<Attribute>>>;

/// Which update operations the connector advertises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateMode {
    /// Native delta updates
    #[default]
    Delta,
    /// Replace plus add/remove of individual values
    ValueSet,
    /// Whole-attribute replacement only
    ReadModifyWrite,
}

impl UpdateMode {
    /// The tier the engine selects for a connector in this mode.
    pub fn tier(self) -> UpdateTierKind {
        match self {
            UpdateMode::Delta => UpdateTierKind::Delta,
            UpdateMode::ValueSet => UpdateTierKind::ValueSet,
            UpdateMode::ReadModifyWrite => UpdateTierKind::ReadModifyWrite,
        }
    }
}

/// Thread-safe in-memory connector.
///
/// Clones share the same store. Retrieval is always advertised; the update
/// operations advertised depend on the [`UpdateMode`].
#[derive(Clone, Default)]
pub struct InMemoryConnector {
    mode: UpdateMode,
    data: Arc<RwLock<ObjectStore>>,
    normalizer: Option<Arc<dyn AttributeNormalizer>>,
}

impl InMemoryConnector {
    /// Create an empty connector advertising the given mode.
    pub fn new(mode: UpdateMode) -> Self {
        Self {
            mode,
            data: Arc::new(RwLock::new(HashMap::new())),
            normalizer: None,
        }
    }

    /// Advertise a connector-specific normalizer.
    pub fn with_normalizer(mut self, normalizer: impl AttributeNormalizer + 'static) -> Self {
        self.normalizer = Some(Arc::new(normalizer));
        self
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Store a new object and return its uid.
    ///
    /// # Errors
    /// - [`ConnectorError::InvalidAttributeValue`] if `__UID__` is supplied
    /// - [`ConnectorError::AlreadyExists`] if an object with the same name exists
    pub async fn create(
        &self,
        object_class: &ObjectClass,
        attributes: Vec<Attribute>,
    ) -> ConnectorResult<Uid> {
        if attributes.iter().any(|attribute| attribute.is(UID_ATTRIBUTE)) {
            return Err(ConnectorError::invalid_attribute_value(
                UID_ATTRIBUTE,
                "uid is assigned by the connector",
            ));
        }

        let uid = name_of(&attributes).unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut data = self.data.write().await;
        let objects = data.entry(object_class.clone()).or_default();
        if objects.contains_key(&uid) {
            return Err(ConnectorError::AlreadyExists {
                name: uid,
                object_class: object_class.name().to_string(),
            });
        }

        debug!("Created {} object '{}'", object_class, uid);
        objects.insert(uid.clone(), attributes);
        Ok(Uid::new(uid))
    }

    /// Full snapshot of an object, regardless of any options.
    pub async fn object(&self, object_class: &ObjectClass, uid: &Uid) -> Option<ConnectorObject> {
        let data = self.data.read().await;
        data.get(object_class)
            .and_then(|objects| objects.get(uid.value()))
            .map(|attributes| {
                ConnectorObject::new(object_class.clone(), uid.clone(), attributes.clone())
            })
    }

    /// Current object counts.
    pub async fn stats(&self) -> InMemoryConnectorStats {
        let data = self.data.read().await;
        InMemoryConnectorStats {
            object_class_count: data.values().filter(|objects| !objects.is_empty()).count(),
            total_objects: data.values().map(HashMap::len).sum(),
        }
    }

    /// Apply `change` to the stored attributes of one object.
    ///
    /// The object is re-keyed when the change gives it a new name. Nothing is
    /// written if the new name is already taken.
    async fn modify<F>(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        operation: &str,
        change: F,
    ) -> ConnectorResult<Uid>
    where
        F: FnOnce(&mut Vec<Attribute>),
    {
        let unknown = || ConnectorError::unknown_uid(uid.value(), object_class.name());

        let mut data = self.data.write().await;
        let objects = data.get_mut(object_class).ok_or_else(unknown)?;
        let mut attributes = objects.get(uid.value()).cloned().ok_or_else(unknown)?;

        change(&mut attributes);

        let new_uid = name_of(&attributes).unwrap_or_else(|| uid.value().to_string());
        if new_uid != uid.value() {
            if objects.contains_key(&new_uid) {
                return Err(ConnectorError::AlreadyExists {
                    name: new_uid,
                    object_class: object_class.name().to_string(),
                });
            }
            objects.remove(uid.value());
            debug!(
                "Renamed {} object '{}' to '{}' during {}",
                object_class, uid, new_uid, operation
            );
        }

        trace!(
            "{} on {} object '{}' stored {} attribute(s)",
            operation,
            object_class,
            new_uid,
            attributes.len()
        );
        objects.insert(new_uid.clone(), attributes);
        Ok(Uid::new(new_uid))
    }
}

impl fmt::Debug for InMemoryConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryConnector")
            .field("mode", &self.mode)
            .field("normalizer", &self.normalizer.is_some())
            .finish_non_exhaustive()
    }
}

/// Statistics about the objects held by an [`InMemoryConnector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryConnectorStats {
    /// Number of object classes holding at least one object
    pub object_class_count: usize,
    /// Total number of objects across all object classes
    pub total_objects: usize,
}

/// String value of `__NAME__`, if present.
fn name_of(attributes: &[Attribute]) -> Option<String> {
    attributes
        .iter()
        .find(|attribute| attribute.is(NAME_ATTRIBUTE))
        .and_then(Attribute::single_value)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Store `target` in place of the attribute with the same name.
fn store(attributes: &mut Vec<Attribute>, target: Attribute) {
    let position = attributes
        .iter()
        .position(|attribute| attribute.is(target.name()));
    match (position, target.values().is_empty()) {
        (Some(index), true) => {
            attributes.remove(index);
        }
        (Some(index), false) => attributes[index] = target,
        (None, true) => {}
        (None, false) => attributes.push(target),
    }
}

fn apply_delta(attributes: &mut Vec<Attribute>, delta: &AttributeDelta) {
    let current = attributes.iter().find(|attribute| attribute.is(delta.name()));
    if let Some(target) = compute_target(current, delta) {
        store(attributes, target);
    }
}

#[async_trait]
impl UpdateDeltaOp for InMemoryConnector {
    async fn update_delta(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        deltas: &[AttributeDelta],
        _options: &OperationOptions,
    ) -> ConnectorResult<Vec<AttributeDelta>> {
        let updated = self
            .modify(object_class, uid, "updateDelta", |attributes| {
                for delta in deltas {
                    apply_delta(attributes, delta);
                }
            })
            .await?;
        Ok(uid_side_effects(uid, &updated))
    }
}

#[async_trait]
impl UpdateOp for InMemoryConnector {
    async fn update(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        replacements: &[Attribute],
        _options: &OperationOptions,
    ) -> ConnectorResult<Option<Uid>> {
        let updated = self
            .modify(object_class, uid, "update", |attributes| {
                for replacement in replacements {
                    store(attributes, replacement.clone());
                }
            })
            .await?;
        Ok(Some(updated))
    }
}

#[async_trait]
impl UpdateAttributeValuesOp for InMemoryConnector {
    async fn add_attribute_values(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        additions: &[Attribute],
        _options: &OperationOptions,
    ) -> ConnectorResult<Option<Uid>> {
        let updated = self
            .modify(object_class, uid, "addAttributeValues", |attributes| {
                for addition in additions {
                    let delta = AttributeDelta::add(addition.name(), addition.values().to_vec());
                    apply_delta(attributes, &delta);
                }
            })
            .await?;
        Ok(Some(updated))
    }

    async fn remove_attribute_values(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        removals: &[Attribute],
        _options: &OperationOptions,
    ) -> ConnectorResult<Option<Uid>> {
        let updated = self
            .modify(object_class, uid, "removeAttributeValues", |attributes| {
                for removal in removals {
                    let delta = AttributeDelta::remove(removal.name(), removal.values().to_vec());
                    apply_delta(attributes, &delta);
                }
            })
            .await?;
        Ok(Some(updated))
    }
}

#[async_trait]
impl GetOp for InMemoryConnector {
    async fn get_object(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        options: &OperationOptions,
    ) -> ConnectorResult<Option<ConnectorObject>> {
        let mut object = self.object(object_class, uid).await;
        if let (Some(object), Some(names)) = (object.as_mut(), options.attributes_to_get()) {
            object.retain_attributes(names);
        }
        Ok(object)
    }
}

impl Connector for InMemoryConnector {
    fn as_update_delta(&self) -> Option<&dyn UpdateDeltaOp> {
        match self.mode {
            UpdateMode::Delta => Some(self),
            _ => None,
        }
    }

    fn as_update_attribute_values(&self) -> Option<&dyn UpdateAttributeValuesOp> {
        match self.mode {
            UpdateMode::ValueSet => Some(self),
            _ => None,
        }
    }

    fn as_update(&self) -> Option<&dyn UpdateOp> {
        match self.mode {
            UpdateMode::ValueSet | UpdateMode::ReadModifyWrite => Some(self),
            UpdateMode::Delta => None,
        }
    }

    fn as_get(&self) -> Option<&dyn GetOp> {
        Some(self)
    }

    fn normalizer(&self) -> Option<&dyn AttributeNormalizer> {
        self.normalizer.as_deref()
    }
}
