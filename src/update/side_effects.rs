//! Side-effect deltas reported back to the caller.

use crate::objects::{AttributeDelta, UID_ATTRIBUTE, Uid};
use serde_json::Value;

/// Deltas describing a uid change between the request and the final result.
///
/// Empty when the values match; otherwise a single `__UID__` replace delta
/// carrying the new value. Revisions are not compared.
pub fn uid_side_effects(original: &Uid, updated: &Uid) -> Vec<AttributeDelta> {
    if original.same_value(updated) {
        Vec::new()
    } else {
        vec![AttributeDelta::replace(
            UID_ATTRIBUTE,
            vec![Value::String(updated.value().to_string())],
        )]
    }
}
