// search/value.rs
//
// Helpers for digging through untyped provider payloads. All field
// "guessing" elsewhere is expressed as ordered candidate path lists fed
// into these functions, so precedence stays auditable.

use serde_json::Value;

/// Walk a sequence of object keys / array indices. Returns `None` for any
/// missing step or an explicit JSON null at the end.
pub fn value_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for seg in path {
        cur = match cur {
            Value::Object(map) => map.get(*seg)?,
            Value::Array(items) => items.get(seg.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if cur.is_null() {
        None
    } else {
        Some(cur)
    }
}

/// Parse-or-absent numeric coercion: finite numbers pass through, numeric
/// strings are parsed, everything else (including NaN/inf) is absent.
/// Never zero-fills.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// First candidate path that yields a number.
pub fn number_at(root: &Value, paths: &[&[&str]]) -> Option<f64> {
    paths
        .iter()
        .find_map(|path| value_at(root, path).and_then(to_number))
}

pub fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// First candidate path that yields a non-empty string.
pub fn string_at(root: &Value, paths: &[&[&str]]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| value_at(root, path).and_then(non_empty_str))
        .map(str::to_string)
}

/// Like `string_at`, but also accepts bare numbers (zip codes show up as
/// either in the wild).
pub fn scalar_string_at(root: &Value, paths: &[&[&str]]) -> Option<String> {
    paths.iter().find_map(|path| {
        let value = value_at(root, path)?;
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    })
}
