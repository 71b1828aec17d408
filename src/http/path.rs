//! Dotted-path lookups into JSON bodies
//!
//! Paths look like `data.items` or `$.meta.next_cursor`. Array elements are
//! addressed by index (`results.0.id`). An empty path or `$` is the root.

use crate::types::JsonValue;

fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.strip_prefix('$').unwrap_or(path);
    let path = path.strip_prefix('.').unwrap_or(path);
    path.split('.').filter(|s| !s.is_empty())
}

/// Borrow the value at `path`
pub fn lookup<'v>(value: &'v JsonValue, path: &str) -> Option<&'v JsonValue> {
    segments(path).try_fold(value, |current, part| match current {
        JsonValue::Object(map) => map.get(part),
        JsonValue::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Move the value at `path` out of `value`
pub fn take(value: JsonValue, path: &str) -> Option<JsonValue> {
    segments(path).try_fold(value, |current, part| match current {
        JsonValue::Object(mut map) => map.remove(part),
        JsonValue::Array(mut items) => {
            let index = part.parse::<usize>().ok().filter(|i| *i < items.len())?;
            Some(items.swap_remove(index))
        }
        _ => None,
    })
}

/// Read the value at `path` as a string.
///
/// Numbers are rendered in decimal. Booleans, `null`, objects and arrays read
/// as absent, so a `has_more` flag is never mistaken for a token.
pub fn lookup_string(value: &JsonValue, path: &str) -> Option<String> {
    match lookup(value, path)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
