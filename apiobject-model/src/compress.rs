use crate::coerce::is_truthy;
use serde_json::{Map, Value};

/// Drops entries whose value is empty or falsy, keeping the order of the rest.
///
/// Sequences and mappings survive when non-empty; scalars when truthy
/// (so `0`, `""`, `"0"`, `false` and `null` are dropped). Only the top
/// level is filtered.
#[must_use]
pub fn compress(data: Map<String, Value>) -> Map<String, Value> {
    data.into_iter().filter(|(_, value)| is_truthy(value)).collect()
}
