//! JSON transport boundary.
//!
//! The transport layer hands argument payloads around as `serde_json::Value`.
//! This module converts those payloads into [`ArgumentValue`] trees and back,
//! preserving the omitted/null/value distinction: `Absent` entries never
//! appear in re-serialized output, `Null` serializes as JSON `null`.

use crate::value::ArgumentValue;
use serde_json::{Map, Number, Value};

/// Parses a JSON payload into an argument value.
///
/// JSON `null` maps to [`ArgumentValue::Null`]; `Absent` never occurs inside
/// a parsed tree, it only arises when a lookup misses.
#[must_use]
pub fn from_json(value: Value) -> ArgumentValue {
    match value {
        Value::Null => ArgumentValue::Null,
        Value::Bool(b) => ArgumentValue::Boolean(b),
        Value::Number(n) => from_number(&n),
        Value::String(s) => ArgumentValue::String(s),
        Value::Array(elements) => {
            ArgumentValue::List(elements.into_iter().map(from_json).collect())
        }
        Value::Object(entries) => ArgumentValue::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key, from_json(value)))
                .collect(),
        ),
    }
}

fn from_number(n: &Number) -> ArgumentValue {
    if let Some(i) = n.as_i64() {
        ArgumentValue::Int(i)
    } else {
        ArgumentValue::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Serializes an argument value back into JSON.
///
/// Returns `None` for `Absent`, so callers can drop omitted fields instead
/// of writing a key. Object entries that are `Absent` are dropped here.
#[must_use]
pub fn to_json(value: &ArgumentValue) -> Option<Value> {
    match value {
        ArgumentValue::Absent => None,
        ArgumentValue::Null => Some(Value::Null),
        ArgumentValue::Boolean(b) => Some(Value::Bool(*b)),
        ArgumentValue::Int(i) => Some(Value::Number((*i).into())),
        ArgumentValue::Float(f) => Number::from_f64(*f).map(Value::Number),
        ArgumentValue::String(s) => Some(Value::String(s.clone())),
        ArgumentValue::List(elements) => Some(Value::Array(
            elements
                .iter()
                .map(|element| to_json(element).unwrap_or(Value::Null))
                .collect(),
        )),
        ArgumentValue::Object(entries) => {
            let mut map = Map::new();
            for (key, entry) in entries {
                if let Some(json) = to_json(entry) {
                    map.insert(key.clone(), json);
                }
            }
            Some(Value::Object(map))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_nested_payload() {
        let value = from_json(json!({
            "name": "test name",
            "author": { "firstName": "Jane", "lastName": "Spring" }
        }));
        assert_eq!(value.get("name").as_str(), Some("test name"));
        assert_eq!(
            value.get("author").get("firstName").as_str(),
            Some("Jane")
        );
        assert!(value.get("publisher").is_absent());
    }

    #[test]
    fn test_from_json_null_is_not_absent() {
        let value = from_json(json!({ "name": null }));
        assert!(value.get("name").is_null());
        assert!(!value.get("name").is_absent());
    }

    #[test]
    fn test_to_json_drops_absent_entries() {
        let value = ArgumentValue::object([
            ("kept", ArgumentValue::from("v")),
            ("explicit", ArgumentValue::Null),
            ("omitted", ArgumentValue::Absent),
        ]);
        let json = to_json(&value).unwrap();
        assert_eq!(json, json!({ "kept": "v", "explicit": null }));
        assert!(json.get("omitted").is_none());
    }

    #[test]
    fn test_round_trip_preserves_list_order() {
        let payload = json!({ "items": [{ "name": "first" }, { "name": "second" }] });
        let value = from_json(payload.clone());
        assert_eq!(to_json(&value).unwrap(), payload);
    }

    #[test]
    fn test_numbers_split_into_int_and_float() {
        let value = from_json(json!({ "pages": 320, "rating": 4.5 }));
        assert_eq!(value.get("pages").kind(), "int");
        assert_eq!(value.get("rating").kind(), "float");
    }
}
