//! Entry/exit logging around connector operations.

use crate::error::{ConnectorResult, UpdateError, UpdateResult};
use crate::objects::Uid;
use crate::update::UpdateRequest;
use log::{debug, log_enabled, warn, Level};
use std::fmt::Display;

pub(crate) fn enter<T: Display>(request: &UpdateRequest<'_>, operation: &str, uid: &Uid, items: &[T]) {
    if !log_enabled!(Level::Debug) {
        return;
    }
    debug!(
        "Enter: {}({}, {}, [{}], {}) (request: '{}')",
        operation,
        request.object_class,
        uid,
        join(items),
        request.options,
        request.request_id
    );
}

pub(crate) fn exit(request: &UpdateRequest<'_>, operation: &str, returned: &dyn Display) {
    debug!(
        "Return: {} from {} (request: '{}')",
        returned, operation, request.request_id
    );
}

/// Record a connector failure and lift the result into the engine's error type.
///
/// The connector error itself is passed on untouched.
pub(crate) fn record<T>(
    request: &UpdateRequest<'_>,
    operation: &str,
    result: ConnectorResult<T>,
) -> UpdateResult<T> {
    result.map_err(|error| {
        warn!(
            "Connector operation '{}' failed for {} object '{}': {} (request: '{}')",
            operation, request.object_class, request.uid, error, request.request_id
        );
        UpdateError::Connector(error)
    })
}

pub(crate) fn display_uid(uid: &Option<Uid>) -> String {
    match uid {
        Some(uid) => uid.to_string(),
        None => "null".to_string(),
    }
}

pub(crate) fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
