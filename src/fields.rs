// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

//! Helpers for working with record fields.
//!
//! A "record" everywhere in voltctl is a `serde_json::Value`: collections
//! are arrays, records are objects, and field values are the usual tagged
//! variants (string, number, bool, null, nested object, array). These free
//! functions are the only place that knows how to stringify a value or walk
//! a dotted field path; the filter, order, and format engines all build on
//! them.

use serde_json::Value;

/// Canonical string conversion used for comparison and display.
///
/// Strings render unquoted, numbers and bools via their display form, and
/// null as the empty string. Arrays and objects render as compact JSON, so
/// an empty slice or map prints "[]" / "{}" instead of erroring.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Silent dotted-path lookup: `lookup(rec, "a.b")` walks nested objects and
/// returns None if any segment is missing or not an object. Used where
/// unresolved fields degrade quietly (sorting, formatting); the filter
/// engine does its own strict resolution with proper errors.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Derive a column header from a field path: the last dotted segment,
/// uppercased. "device.serialNumber" -> "SERIALNUMBER".
pub fn header_name(path: &str) -> String {
    path.rsplit('.').next().unwrap_or(path).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(stringify(&json!("abc")), "abc");
        assert_eq!(stringify(&json!(42)), "42");
        assert_eq!(stringify(&json!(-7)), "-7");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&Value::Null), "");
    }

    #[test]
    fn test_stringify_empty_collections() {
        assert_eq!(stringify(&json!([])), "[]");
        assert_eq!(stringify(&json!({})), "{}");
    }

    #[test]
    fn test_stringify_nested() {
        assert_eq!(stringify(&json!(["a", "b"])), r#"["a","b"]"#);
    }

    #[test]
    fn test_lookup_simple() {
        let rec = json!({"id": "olt-1"});
        assert_eq!(lookup(&rec, "id"), Some(&json!("olt-1")));
        assert_eq!(lookup(&rec, "missing"), None);
    }

    #[test]
    fn test_lookup_dotted() {
        let rec = json!({"proxy": {"address": {"host": "10.0.0.1"}}});
        assert_eq!(lookup(&rec, "proxy.address.host"), Some(&json!("10.0.0.1")));
        assert_eq!(lookup(&rec, "proxy.missing.host"), None);
        // Dotted path into a scalar resolves to nothing
        assert_eq!(lookup(&json!({"a": 1}), "a.b"), None);
    }

    #[test]
    fn test_header_name() {
        assert_eq!(header_name("id"), "ID");
        assert_eq!(header_name("serialNumber"), "SERIALNUMBER");
        assert_eq!(header_name("proxy.address.host"), "HOST");
    }
}
