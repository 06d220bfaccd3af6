//! Shared test utilities for delta update testing.
//!
//! The centrepiece is [`RecordingConnector`], a connector whose advertised
//! operations are chosen per test. It records every call it receives and
//! answers with scripted results, so tests can assert on exactly what the
//! engine sent and in which order.


use async_trait::async_trait;
use connector_delta::error::{ConnectorError, ConnectorResult};
use connector_delta::objects::{
    Attribute, AttributeDelta, ConnectorObject, ObjectClass, OperationOptions, Uid,
};
use connector_delta::spi::{
    AttributeNormalizer, Connector, GetOp, UpdateAttributeValuesOp, UpdateDeltaOp, UpdateOp,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub const UPDATE_DELTA: &str = "updateDelta";
pub const UPDATE: &str = "update";
pub const ADD_VALUES: &str = "addAttributeValues";
pub const REMOVE_VALUES: &str = "removeAttributeValues";
pub const GET_OBJECT: &str = "getObject";

/// Initialize logging once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One call received by a [`RecordingConnector`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    UpdateDelta {
        object_class: ObjectClass,
        uid: Uid,
        deltas: Vec<AttributeDelta>,
        options: OperationOptions,
    },
    Values {
        operation: &'static str,
        object_class: ObjectClass,
        uid: Uid,
        attributes: Vec<Attribute>,
        options: OperationOptions,
    },
    Get {
        object_class: ObjectClass,
        uid: Uid,
        options: OperationOptions,
    },
}

impl Call {
    pub fn operation(&self) -> &'static str {
        match self {
            Call::UpdateDelta { .. } => UPDATE_DELTA,
            Call::Values { operation, .. } => *operation,
            Call::Get { .. } => GET_OBJECT,
        }
    }

    pub fn uid(&self) -> &Uid {
        match self {
            Call::UpdateDelta { uid, .. } | Call::Values { uid, .. } | Call::Get { uid, .. } => uid,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Call::Values { attributes, .. } => attributes,
            _ => &[],
        }
    }

    pub fn deltas(&self) -> &[AttributeDelta] {
        match self {
            Call::UpdateDelta { deltas, .. } => deltas,
            _ => &[],
        }
    }

    pub fn options(&self) -> &OperationOptions {
        match self {
            Call::UpdateDelta { options, .. }
            | Call::Values { options, .. }
            | Call::Get { options, .. } => options,
        }
    }
}

/// Which operations a [`RecordingConnector`] advertises.
#[derive(Debug, Clone, Copy, Default)]
pub struct Advertised {
    pub update_delta: bool,
    pub update_attribute_values: bool,
    pub update: bool,
    pub get: bool,
}

/// Connector that records calls and replays scripted answers.
///
/// Unless scripted otherwise:
/// - update operations return the uid they were called with
/// - `updateDelta` echoes its input deltas
/// - `getObject` returns the configured object, or `None`
#[derive(Default)]
pub struct RecordingConnector {
    advertised: Advertised,
    calls: Mutex<Vec<Call>>,
    uids: Mutex<HashMap<&'static str, VecDeque<Option<Uid>>>>,
    failures: Mutex<HashMap<&'static str, ConnectorError>>,
    delta_result: Option<Vec<AttributeDelta>>,
    object: Option<ConnectorObject>,
    normalizer: Option<Box<dyn AttributeNormalizer>>,
}

impl RecordingConnector {
    pub fn new(advertised: Advertised) -> Self {
        Self {
            advertised,
            ..Self::default()
        }
    }

    /// Native delta support only.
    pub fn delta() -> Self {
        Self::new(Advertised {
            update_delta: true,
            ..Advertised::default()
        })
    }

    /// Replace plus add/remove values, no retrieval.
    pub fn value_set() -> Self {
        Self::new(Advertised {
            update_attribute_values: true,
            update: true,
            ..Advertised::default()
        })
    }

    /// Replace plus retrieval.
    pub fn read_modify_write() -> Self {
        Self::new(Advertised {
            update: true,
            get: true,
            ..Advertised::default()
        })
    }

    /// Queue the uid the next call of `operation` returns.
    pub fn returning(self, operation: &'static str, uid: Option<Uid>) -> Self {
        self.uids
            .lock()
            .unwrap()
            .entry(operation)
            .or_default()
            .push_back(uid);
        self
    }

    /// Make every call of `operation` fail.
    pub fn failing(self, operation: &'static str, error: ConnectorError) -> Self {
        self.failures.lock().unwrap().insert(operation, error);
        self
    }

    pub fn with_delta_result(mut self, deltas: Vec<AttributeDelta>) -> Self {
        self.delta_result = Some(deltas);
        self
    }

    pub fn with_object(mut self, object: ConnectorObject) -> Self {
        self.object = Some(object);
        self
    }

    pub fn with_normalizer(mut self, normalizer: impl AttributeNormalizer + 'static) -> Self {
        self.normalizer = Some(Box::new(normalizer));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::operation).collect()
    }

    fn record(&self, call: Call) -> ConnectorResult<()> {
        let operation = call.operation();
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn next_uid(&self, operation: &'static str, uid: &Uid) -> Option<Uid> {
        self.uids
            .lock()
            .unwrap()
            .get_mut(operation)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Some(uid.clone()))
    }

    fn values_call(
        &self,
        operation: &'static str,
        object_class: &ObjectClass,
        uid: &Uid,
        attributes: &[Attribute],
        options: &OperationOptions,
    ) -> ConnectorResult<Option<Uid>> {
        self.record(Call::Values {
            operation,
            object_class: object_class.clone(),
            uid: uid.clone(),
            attributes: attributes.to_vec(),
            options: options.clone(),
        })?;
        Ok(self.next_uid(operation, uid))
    }
}

#[async_trait]
impl UpdateDeltaOp for RecordingConnector {
    async fn update_delta(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        deltas: &[AttributeDelta],
        options: &OperationOptions,
    ) -> ConnectorResult<Vec<AttributeDelta>> {
        self.record(Call::UpdateDelta {
            object_class: object_class.clone(),
            uid: uid.clone(),
            deltas: deltas.to_vec(),
            options: options.clone(),
        })?;
        Ok(self
            .delta_result
            .clone()
            .unwrap_or_else(|| deltas.to_vec()))
    }
}

#[async_trait]
impl UpdateOp for RecordingConnector {
    async fn update(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        attributes: &[Attribute],
        options: &OperationOptions,
    ) -> ConnectorResult<Option<Uid>> {
        self.values_call(UPDATE, object_class, uid, attributes, options)
    }
}

#[async_trait]
impl UpdateAttributeValuesOp for RecordingConnector {
    async fn add_attribute_values(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        attributes: &[Attribute],
        options: &OperationOptions,
    ) -> ConnectorResult<Option<Uid>> {
        self.values_call(ADD_VALUES, object_class, uid, attributes, options)
    }

    async fn remove_attribute_values(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        attributes: &[Attribute],
        options: &OperationOptions,
    ) -> ConnectorResult<Option<Uid>> {
        self.values_call(REMOVE_VALUES, object_class, uid, attributes, options)
    }
}

#[async_trait]
impl GetOp for RecordingConnector {
    async fn get_object(
        &self,
        object_class: &ObjectClass,
        uid: &Uid,
        options: &OperationOptions,
    ) -> ConnectorResult<Option<ConnectorObject>> {
        self.record(Call::Get {
            object_class: object_class.clone(),
            uid: uid.clone(),
            options: options.clone(),
        })?;
        Ok(self.object.clone())
    }
}

impl Connector for RecordingConnector {
    fn as_update_delta(&self) -> Option<&dyn UpdateDeltaOp> {
        self.advertised.update_delta.then_some(self as &dyn UpdateDeltaOp)
    }

    fn as_update_attribute_values(&self) -> Option<&dyn UpdateAttributeValuesOp> {
        self.advertised
            .update_attribute_values
            .then_some(self as &dyn UpdateAttributeValuesOp)
    }

    fn as_update(&self) -> Option<&dyn UpdateOp> {
        self.advertised.update.then_some(self as &dyn UpdateOp)
    }

    fn as_get(&self) -> Option<&dyn GetOp> {
        self.advertised.get.then_some(self as &dyn GetOp)
    }

    fn normalizer(&self) -> Option<&dyn AttributeNormalizer> {
        self.normalizer.as_deref()
    }
}
