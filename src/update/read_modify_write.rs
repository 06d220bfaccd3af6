//! Delta updates on connectors that can only replace whole attributes.
//!
//! The current object is read with exactly the attributes named by the deltas
//! and normalized like the deltas were. Target values are computed locally and
//! a single replace call writes them back. Nothing guards against a concurrent writer between the read and the
//! write.
//!
//! Value arithmetic uses list semantics: added values are appended even if
//! already present, and each removed value deletes only its first occurrence.

use crate::error::{UpdateError, UpdateResult};
use crate::objects::{Attribute, AttributeDelta, ConnectorObject, OperationOptionsBuilder};
use crate::spi::{GetOp, UpdateOp};
use crate::update::normalize::DeltaNormalizer;
use crate::update::side_effects::uid_side_effects;
use crate::update::{UpdateRequest, oplog};
use log::trace;

/// Target attribute for one delta, given the attribute's current state.
///
/// - replace: the replacement values verbatim
/// - absent attribute with values to add: the added values
/// - absent attribute with only values to remove: `None`, nothing to write
/// - present attribute: current values, then additions appended, then the
///   first occurrence of each removed value dropped
pub fn compute_target(current: Option<&Attribute>, delta: &AttributeDelta) -> Option<Attribute> {
    if let Some(values) = delta.values_to_replace() {
        return Some(Attribute::new(delta.name(), values.to_vec()));
    }

    let Some(current) = current else {
        return delta
            .values_to_add()
            .map(|values| Attribute::new(delta.name(), values.to_vec()));
    };

    let mut values = current.values().to_vec();
    if let Some(added) = delta.values_to_add() {
        values.extend(added.iter().cloned());
    }
    if let Some(removed) = delta.values_to_remove() {
        for value in removed {
            if let Some(position) = values.iter().position(|existing| existing == value) {
                values.remove(position);
            }
        }
    }
    Some(Attribute::new(delta.name(), values))
}

/// Attributes to write back for all deltas, in delta order.
pub fn compute_update_attributes(object: &ConnectorObject, deltas: &[AttributeDelta]) -> Vec<Attribute> {
    deltas
        .iter()
        .filter_map(|delta| compute_target(object.attribute(delta.name()), delta))
        .collect()
}

/// Distinct attribute names referenced by the deltas.
pub(crate) fn attributes_to_get(deltas: &[AttributeDelta]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(deltas.len());
    for delta in deltas {
        if !names.iter().any(|name| delta.is(name)) {
            names.push(delta.name().to_string());
        }
    }
    names
}

pub(crate) async fn apply(
    update: &dyn UpdateOp,
    get: &dyn GetOp,
    normalizer: &DeltaNormalizer<'_>,
    request: &UpdateRequest<'_>,
) -> UpdateResult<Vec<AttributeDelta>> {
    let object_class = request.object_class;
    let uid = &request.uid;
    let options = OperationOptionsBuilder::from_options(&request.options)
        .attributes_to_get(attributes_to_get(&request.deltas))
        .build();

    let fetched = get.get_object(object_class, uid, &options).await;
    let object = oplog::record(request, "getObject", fetched)?
        .ok_or_else(|| UpdateError::unknown_uid(uid.value(), object_class.name()))?;
    trace!(
        "Current attributes of '{}': [{}] (request: '{}')",
        uid,
        oplog::join(object.attributes()),
        request.request_id
    );

    let attributes = compute_update_attributes(&normalizer.object(&object), &request.deltas);

    oplog::enter(request, "update", uid, &attributes);
    let result = update.update(object_class, uid, &attributes, &options).await;
    let returned = oplog::record(request, "update", result)?;
    oplog::exit(request, "update", &oplog::display_uid(&returned));

    Ok(match returned {
        Some(updated) => uid_side_effects(uid, &updated),
        None => Vec::new(),
    })
}
