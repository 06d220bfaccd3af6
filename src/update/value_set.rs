//! Delta updates on connectors that replace, add and remove whole value sets.
//!
//! The deltas are split into three groups and sent as up to three separate
//! connector calls, always in the order replace, add, remove. Each call is
//! made against the uid returned by the previous one, since a replace may
//! rename the object.
//!
//! The steps are not transactional. If a later call fails, the effects of
//! the earlier calls stay applied on the target.

use crate::error::UpdateResult;
use crate::objects::{Attribute, AttributeDelta, Uid};
use crate::spi::UpdateAttributeValuesOp;
use crate::update::side_effects::uid_side_effects;
use crate::update::{UpdateRequest, oplog};
use log::warn;

/// Deltas split into whole-value groups.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ValueSetGroups {
    pub(crate) replace: Vec<Attribute>,
    pub(crate) add: Vec<Attribute>,
    pub(crate) remove: Vec<Attribute>,
}

/// Split deltas by mode. A replace delta contributes only to the replace group.
pub(crate) fn partition(deltas: &[AttributeDelta]) -> ValueSetGroups {
    let mut groups = ValueSetGroups::default();
    for delta in deltas {
        if let Some(values) = delta.values_to_replace() {
            groups.replace.push(Attribute::new(delta.name(), values.to_vec()));
            continue;
        }
        if let Some(values) = delta.values_to_add() {
            groups.add.push(Attribute::new(delta.name(), values.to_vec()));
        }
        if let Some(values) = delta.values_to_remove() {
            groups.remove.push(Attribute::new(delta.name(), values.to_vec()));
        }
    }
    groups
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Replace,
    Add,
    Remove,
}

impl Step {
    fn operation(self) -> &'static str {
        match self {
            Step::Replace => "update",
            Step::Add => "addAttributeValues",
            Step::Remove => "removeAttributeValues",
        }
    }
}

pub(crate) async fn apply(
    op: &dyn UpdateAttributeValuesOp,
    request: &UpdateRequest<'_>,
) -> UpdateResult<Vec<AttributeDelta>> {
    let groups = partition(&request.deltas);

    let uid = run_step(op, request, Step::Replace, request.uid.clone(), &groups.replace).await?;
    let uid = run_step(op, request, Step::Add, uid, &groups.add).await?;
    let uid = run_step(op, request, Step::Remove, uid, &groups.remove).await?;

    Ok(uid_side_effects(&request.uid, &uid))
}

/// Run one step if it has anything to send, returning the uid to chain on.
async fn run_step(
    op: &dyn UpdateAttributeValuesOp,
    request: &UpdateRequest<'_>,
    step: Step,
    uid: Uid,
    attributes: &[Attribute],
) -> UpdateResult<Uid> {
    if attributes.is_empty() {
        return Ok(uid);
    }

    let operation = step.operation();
    let object_class = request.object_class;
    let options = &request.options;
    oplog::enter(request, operation, &uid, attributes);

    let result = match step {
        Step::Replace => op.update(object_class, &uid, attributes, options).await,
        Step::Add => op.add_attribute_values(object_class, &uid, attributes, options).await,
        Step::Remove => {
            op.remove_attribute_values(object_class, &uid, attributes, options)
                .await
        }
    };
    let returned = oplog::record(request, operation, result)?;
    oplog::exit(request, operation, &oplog::display_uid(&returned));

    match returned {
        Some(next) => Ok(next),
        None => {
            warn!(
                "Return value from {} is 'null'; continuing with uid '{}' (request: '{}')",
                operation, uid, request.request_id
            );
            Ok(uid)
        }
    }
}
