//! JSON and serde integration.
//!
//! `serde_json::Value` is the ecosystem's plain dynamic container, so it is
//! both the objectify entry point (`From<serde_json::Value>` wraps objects
//! and arrays recursively) and the normalify exit (`From<Value>` unwraps
//! them again). Equality against it works in both operand orders.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as Json;

use crate::error::StoreError;
use crate::list::AttrList;
use crate::map::AttrMap;
use crate::value::Value;

// =============================================================================
// CONVERSIONS
// =============================================================================

impl From<Json> for Value {
    fn from(value: Json) -> Self {
        match value {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(v),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::List(items.into_iter().collect()),
            Json::Object(entries) => Value::Map(entries.into_iter().collect()),
        }
    }
}

impl From<Value> for Json {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Json::Null,
            Value::Bool(v) => Json::Bool(v),
            Value::Int(v) => Json::Number(v.into()),
            Value::Float(v) => serde_json::Number::from_f64(v).map_or(Json::Null, Json::Number),
            Value::Str(v) => Json::String(v),
            Value::Map(map) => Json::from(map),
            Value::List(list) => Json::from(list),
        }
    }
}

impl From<serde_json::Map<String, Json>> for AttrMap {
    fn from(entries: serde_json::Map<String, Json>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<AttrMap> for Json {
    fn from(map: AttrMap) -> Self {
        let entries: serde_json::Map<String, Json> = map
            .into_iter()
            .map(|(key, value)| (key, Json::from(value)))
            .collect();
        Json::Object(entries)
    }
}

impl From<AttrList> for Json {
    fn from(list: AttrList) -> Self {
        Json::Array(list.into_iter().map(Json::from).collect())
    }
}

impl Value {
    /// Converts to a plain `serde_json::Value`, unwrapping recursively.
    pub fn to_json(&self) -> Json {
        Json::from(self.clone())
    }
}

impl AttrMap {
    /// Parses a JSON object into a map.
    pub fn from_json_str(input: &str) -> Result<AttrMap, StoreError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Serializes the map as a compact JSON string.
    pub fn to_json_string(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the map as a pretty-printed JSON string.
    pub fn to_json_string_pretty(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// =============================================================================
// EQUALITY AGAINST PLAIN CONTAINERS
// =============================================================================

impl PartialEq<Json> for Value {
    fn eq(&self, other: &Json) -> bool {
        match (self, other) {
            (Value::Null, Json::Null) => true,
            (Value::Bool(a), Json::Bool(b)) => a == b,
            (Value::Int(a), Json::Number(n)) => n.as_i64() == Some(*a),
            (Value::Float(a), Json::Number(n)) => n.as_f64() == Some(*a),
            (Value::Str(a), Json::String(b)) => a == b,
            (Value::Map(a), _) => a == other,
            (Value::List(a), _) => a == other,
            _ => false,
        }
    }
}

impl PartialEq<Value> for Json {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Json> for AttrMap {
    fn eq(&self, other: &Json) -> bool {
        let Some(entries) = other.as_object() else {
            return false;
        };
        self.len() == entries.len()
            && self
                .iter()
                .all(|(key, value)| entries.get(key.as_str()).is_some_and(|other| value == other))
    }
}

impl PartialEq<AttrMap> for Json {
    fn eq(&self, other: &AttrMap) -> bool {
        other == self
    }
}

impl PartialEq<Json> for AttrList {
    fn eq(&self, other: &Json) -> bool {
        let Some(items) = other.as_array() else {
            return false;
        };
        self.len() == items.len() && self.iter().zip(items).all(|(a, b)| a == b)
    }
}

impl PartialEq<AttrList> for Json {
    fn eq(&self, other: &AttrList) -> bool {
        other == self
    }
}

// =============================================================================
// SERDE
// =============================================================================

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Map(v) => v.serialize(serializer),
            Value::List(v) => v.serialize(serializer),
        }
    }
}

impl Serialize for AttrMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(key, value)| (key.as_str(), value)))
    }
}

impl Serialize for AttrList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON-like value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Int(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Str(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Str(v))
    }

    fn visit_none<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_unit<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut list = AttrList::new();
        while let Some(item) = access.next_element::<Value>()? {
            list.push(item);
        }
        Ok(Value::List(list))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = AttrMap::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.set(key, value);
        }
        Ok(Value::Map(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct MapVisitor;

impl<'de> Visitor<'de> for MapVisitor {
    type Value = AttrMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<AttrMap, A::Error> {
        let mut map = AttrMap::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.set(key, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for AttrMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MapVisitor)
    }
}

struct ListVisitor;

impl<'de> Visitor<'de> for ListVisitor {
    type Value = AttrList;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<AttrList, A::Error> {
        let mut list = AttrList::new();
        while let Some(item) = access.next_element::<Value>()? {
            list.push(item);
        }
        Ok(list)
    }
}

impl<'de> Deserialize<'de> for AttrList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(ListVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_objectify_from_json() {
        let source = json!({"a": [{"b": 1}, {"b": 2}], "s": "text"});
        let value = Value::from(source.clone());

        let map = value.as_map().unwrap();
        let list = map.attr("a").unwrap().as_list().unwrap();
        assert_eq!(list[0].as_map().unwrap()["b"], 1);
        assert_eq!(list[1].as_map().unwrap().attr("b").unwrap(), &Value::Int(2));

        // Strings stay scalar, never become character sequences.
        assert!(map["s"].as_str().is_some());
    }

    #[test]
    fn test_normalify_reverses_objectify() {
        let source = json!({
            "int": 123,
            "bool": true,
            "null": null,
            "string": "test",
            "dict": {"nested": "yes"},
            "list": [1, 2, 3, {"k": "v"}]
        });
        let wrapped = Value::from(source.clone());
        let unwrapped = Json::from(wrapped.clone());

        assert_eq!(unwrapped, source);
        assert_eq!(wrapped, source);
        assert_eq!(source, wrapped);
    }

    #[test]
    fn test_objectify_idempotent() {
        let source = json!({"a": {"b": [1, {"c": 2}]}});
        let once = Value::from(source.clone());
        let twice = Value::from(Json::from(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_equality_against_json_both_directions() {
        let map = AttrMap::new()
            .with("x", 1)
            .with("nested", AttrMap::new().with("y", 2.5));
        let plain = json!({"x": 1, "nested": {"y": 2.5}});

        assert_eq!(map, plain);
        assert_eq!(plain, map);
        assert_ne!(map, json!({"x": 1}));
        assert_ne!(map, json!({"x": 1, "nested": {"y": 3.0}}));
        assert_ne!(map, json!([1, 2]));
    }

    #[test]
    fn test_serde_roundtrip_through_string() {
        let map = AttrMap::new()
            .with("name", "test")
            .with("values", vec![1, 2, 3])
            .with("inner", AttrMap::new().with("flag", true));

        let encoded = map.to_json_string().unwrap();
        let decoded = AttrMap::from_json_str(&encoded).unwrap();
        assert_eq!(map, decoded);

        // Nested containers come back wrapped.
        assert!(decoded["inner"].is_map());
        assert!(decoded["values"].is_list());
    }

    #[test]
    fn test_deserialized_keys_get_attribute_aliases() {
        let map = AttrMap::from_json_str(r#"{"dev-null": 0, "1": "one"}"#).unwrap();
        assert_eq!(map.attr("dev_null").unwrap(), &Value::Int(0));
        assert_eq!(*map.attr("int_1").unwrap(), "one");
    }

    #[test]
    fn test_from_json_str_rejects_non_objects() {
        assert!(AttrMap::from_json_str("[1, 2]").is_err());
        assert!(AttrMap::from_json_str("not json").is_err());
    }

    #[test]
    fn test_float_roundtrip() {
        let value = Value::Float(3.25);
        let json = Json::from(value.clone());
        assert_eq!(Value::from(json), value);
    }
}
