//! Record compaction
//!
//! Removes undefined leaves from a materialized record tree at any
//! depth: nulls, empty strings, empty arrays and empty objects. What
//! remains is exactly what the typed records deserialize from, so an
//! "absent or non-empty" field contract holds without per-field checks.

use serde_json::Value;

/// Compact a value, returning `None` when nothing defined remains
///
/// Arrays are units: members are compacted individually and the array
/// is kept or dropped wholesale, never merged element-wise. `false` and
/// `0` are defined values and always survive.
pub fn compact(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(members) => {
            let compacted: Vec<Value> = members.into_iter().filter_map(compact).collect();
            if compacted.is_empty() {
                None
            } else {
                Some(Value::Array(compacted))
            }
        }
        Value::Object(fields) => {
            let compacted: serde_json::Map<String, Value> = fields
                .into_iter()
                .filter_map(|(key, value)| compact(value).map(|value| (key, value)))
                .collect();
            if compacted.is_empty() {
                None
            } else {
                Some(Value::Object(compacted))
            }
        }
        defined => Some(defined),
    }
}
