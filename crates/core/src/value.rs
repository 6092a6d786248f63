//! Host value model.
//!
//! Fields of a value object hold dynamically-typed [`Value`]s. Every value has a
//! coarse [`PrimitiveKind`]; object values additionally carry the name of the
//! class they are an instance of, which is what nominal type checks look at.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

/// Coarse runtime classification of a [`Value`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::Null,
        PrimitiveKind::Boolean,
        PrimitiveKind::Integer,
        PrimitiveKind::Float,
        PrimitiveKind::String,
        PrimitiveKind::Array,
        PrimitiveKind::Object,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Null => "null",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Float => "float",
            PrimitiveKind::String => "string",
            PrimitiveKind::Array => "array",
            PrimitiveKind::Object => "object",
        }
    }

    /// Canonical kind name for a declared type keyword.
    ///
    /// Short spellings are widened (`int` → `integer`, `bool` → `boolean`,
    /// `double` → `float`); every other keyword stands for itself.
    pub fn canonical_name(keyword: &str) -> &str {
        match keyword {
            "int" => "integer",
            "bool" => "boolean",
            "double" => "float",
            other => other,
        }
    }

    /// Kind named by a declared type keyword, if the keyword names one at all.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let canonical = Self::canonical_name(keyword);
        Self::ALL.into_iter().find(|kind| kind.as_str() == canonical)
    }
}

impl core::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An instance of a named class.
///
/// Only the class name takes part in type checks; properties are carried along
/// as data and are never validated against anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    class: String,
    properties: BTreeMap<String, Value>,
}

impl Object {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }
}

/// A dynamically-typed field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Ordered list.
    Array(Vec<Value>),
    /// Keyed array. Shares the `array` kind with [`Value::Array`].
    Map(BTreeMap<String, Value>),
    Object(Object),
}

impl Value {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Value::Null => PrimitiveKind::Null,
            Value::Bool(_) => PrimitiveKind::Boolean,
            Value::Int(_) => PrimitiveKind::Integer,
            Value::Float(_) => PrimitiveKind::Float,
            Value::String(_) => PrimitiveKind::String,
            Value::Array(_) | Value::Map(_) => PrimitiveKind::Array,
            Value::Object(_) => PrimitiveKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Short rendering used in diagnostics: scalars as themselves, `null`,
    /// `array` for either array shape, and the class name for objects.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(x) => x.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(_) | Value::Map(_) => "array".to_string(),
            Value::Object(obj) => obj.class().to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    /// JSON objects become keyed arrays; integral numbers that fit `i64` become
    /// integers, every other number a float.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&Value> for serde_json::Value {
    /// Objects serialize as their properties; non-finite floats as `null`.
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(x) => serde_json::Number::from_f64(*x)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
            Value::Object(obj) => serde_json::Value::Object(
                obj.properties()
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    /// Same shape as the `serde_json::Value` conversion.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Value::from(self).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keyword_aliases_widen_to_canonical_kinds() {
        assert_eq!(PrimitiveKind::from_keyword("int"), Some(PrimitiveKind::Integer));
        assert_eq!(PrimitiveKind::from_keyword("bool"), Some(PrimitiveKind::Boolean));
        assert_eq!(PrimitiveKind::from_keyword("double"), Some(PrimitiveKind::Float));
        assert_eq!(PrimitiveKind::from_keyword("string"), Some(PrimitiveKind::String));
        assert_eq!(PrimitiveKind::from_keyword("integer"), Some(PrimitiveKind::Integer));
        assert_eq!(PrimitiveKind::from_keyword("callable"), None);
    }

    #[test]
    fn both_array_shapes_share_the_array_kind() {
        assert_eq!(Value::Array(vec![]).kind(), PrimitiveKind::Array);
        assert_eq!(Value::Map(BTreeMap::new()).kind(), PrimitiveKind::Array);
    }

    #[test]
    fn json_numbers_split_into_integers_and_floats() {
        assert_eq!(Value::from(json!(5)), Value::Int(5));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!(u64::MAX)).kind(), PrimitiveKind::Float);
    }

    #[test]
    fn json_objects_become_keyed_arrays() {
        let value = Value::from(json!({"amount": 5, "tags": ["a"]}));
        match value {
            Value::Map(map) => {
                assert_eq!(map.get("amount"), Some(&Value::Int(5)));
                assert_eq!(map.get("tags"), Some(&Value::Array(vec![Value::from("a")])));
            }
            other => panic!("Expected keyed array, got {other:?}"),
        }
    }

    #[test]
    fn objects_serialize_as_their_properties() {
        let obj = Object::new("App\\Money").with_property("amount", 100);
        let json = serde_json::Value::from(&Value::from(obj));
        assert_eq!(json, json!({"amount": 100}));
    }

    #[test]
    fn values_serialize_like_their_json_form() {
        let value = Value::Map(BTreeMap::from([
            ("amount".to_string(), Value::Int(5)),
            ("price".to_string(), Value::Float(1.5)),
            ("tags".to_string(), Value::Array(vec![Value::from("a"), Value::Null])),
            (
                "money".to_string(),
                Value::from(Object::new("App\\Money").with_property("cents", 100)),
            ),
        ]));

        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"amount":5,"money":{"cents":100},"price":1.5,"tags":["a",null]}"#
        );
        assert_eq!(serde_json::to_string(&Value::Float(f64::NAN)).unwrap(), "null");
    }

    #[test]
    fn describe_renders_objects_by_class_name() {
        assert_eq!(Value::from(Object::new("App\\Money")).describe(), "App\\Money");
        assert_eq!(Value::Null.describe(), "null");
        assert_eq!(Value::Array(vec![Value::Int(1)]).describe(), "array");
        assert_eq!(Value::from("5").describe(), "5");
    }

    #[test]
    fn none_converts_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }
}
