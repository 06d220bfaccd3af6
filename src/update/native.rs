//! Passthrough for connectors that apply deltas natively.

use crate::error::UpdateResult;
use crate::objects::AttributeDelta;
use crate::spi::UpdateDeltaOp;
use crate::update::{UpdateRequest, oplog};

const OPERATION: &str = "updateDelta";

/// Hand the normalized deltas to the connector and return what it reports.
pub(crate) async fn apply(
    op: &dyn UpdateDeltaOp,
    request: &UpdateRequest<'_>,
) -> UpdateResult<Vec<AttributeDelta>> {
    oplog::enter(request, OPERATION, &request.uid, &request.deltas);

    let result = op
        .update_delta(
            request.object_class,
            &request.uid,
            &request.deltas,
            &request.options,
        )
        .await;
    let side_effects = oplog::record(request, OPERATION, result)?;

    oplog::exit(request, OPERATION, &format!("[{}]", oplog::join(&side_effects)));
    Ok(side_effects)
}
