//! Dot-path traversal over nested JSON objects.
//!
//! A path such as `child.progress.abilities` names the value reached by
//! descending through object keys `child`, `progress` and `abilities`.
//! Array elements can be read by numeric segment (`child.achievements.0`).

use mengya_types::error::{MengyaError, Result};
use serde_json::{Map, Value};

/// Look up the value at `path`. Any missing segment is a miss.
pub fn get_nested<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for key in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(key)?,
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Store `value` at `path`, creating intermediate objects as needed.
///
/// A numeric segment under an array writes that element, padding the array
/// with `null` when the index is past the end. Descending into a scalar or
/// `null`, or into an array with a non-numeric segment, is an error and
/// leaves `root` untouched.
pub fn set_nested(root: &mut Value, path: &str, value: Value) -> Result<()> {
    let mut keys = path.split('.').peekable();
    let mut current = root;
    while let Some(key) = keys.next() {
        let last = keys.peek().is_none();
        let fill = || {
            if last {
                Value::Null
            } else {
                Value::Object(Map::new())
            }
        };
        // Anything created here is a fresh object, so later segments cannot
        // fail and a failed write never leaves partial state behind.
        current = child_mut(current, key, fill).map_err(|kind| {
            MengyaError::InvalidPath(format!("{path}: cannot write {key:?} into {kind}"))
        })?;
    }
    *current = value;
    Ok(())
}

fn child_mut<'a>(
    container: &'a mut Value,
    key: &str,
    fill: impl FnOnce() -> Value,
) -> std::result::Result<&'a mut Value, &'static str> {
    match container {
        Value::Object(map) => Ok(map.entry(key.to_string()).or_insert_with(fill)),
        Value::Array(items) => {
            let index = key.parse::<usize>().map_err(|_| "an array")?;
            if index >= items.len() {
                items.resize(index, Value::Null);
                items.push(fill());
            }
            Ok(&mut items[index])
        },
        Value::Null => Err("null"),
        Value::Bool(_) => Err("a boolean"),
        Value::Number(_) => Err("a number"),
        Value::String(_) => Err("a string"),
    }
}

/// Flatten nested objects back into `(dot.path, leaf)` pairs.
///
/// Objects are descended into; arrays, scalars and `null` are leaves. An
/// empty object contributes no pairs.
pub fn flatten(root: &Value) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    if let Value::Object(map) = root {
        flatten_into(map, "", &mut out);
    }
    out
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(child) => flatten_into(child, &full, out),
            leaf => out.push((full, leaf.clone())),
        }
    }
}
