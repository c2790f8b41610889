//! Request body values.

use serde::Serialize;
use serde_json::{Map, Value};

use super::SerializationError;

/// A webhook body: raw text or a structured value.
///
/// Structured maps keep insertion order, so encoding is deterministic
/// for a given construction sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Opaque text, sent unchanged.
    Raw(String),
    /// A mapping of string keys to JSON values.
    Map(Map<String, Value>),
    /// An ordered sequence of JSON values.
    Seq(Vec<Value>),
}

impl Body {
    /// Creates a raw body.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    /// Converts a JSON value into a body.
    ///
    /// Objects become [`Body::Map`], arrays [`Body::Seq`] and strings
    /// [`Body::Raw`].
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError::NotStructured`] for null, booleans
    /// and numbers.
    pub fn from_value(value: Value) -> Result<Self, SerializationError> {
        match value {
            Value::Object(map) => Ok(Self::Map(map)),
            Value::Array(seq) => Ok(Self::Seq(seq)),
            Value::String(text) => Ok(Self::Raw(text)),
            Value::Null => Err(SerializationError::NotStructured { kind: "null" }),
            Value::Bool(_) => Err(SerializationError::NotStructured { kind: "boolean" }),
            Value::Number(_) => Err(SerializationError::NotStructured { kind: "number" }),
        }
    }

    /// Converts any serializable value into a body.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` fails to serialize (for example a map
    /// with non-string keys) or does not produce a mapping, sequence or
    /// string.
    ///
    /// # Example
    ///
    /// ```
    /// use actionhook::Body;
    /// use std::collections::BTreeMap;
    ///
    /// let body = Body::from_serialize(&BTreeMap::from([("event", "ping")])).unwrap();
    /// assert!(body.is_structured());
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, SerializationError> {
        Self::from_value(serde_json::to_value(value)?)
    }

    /// Returns true for mapping and sequence bodies.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self, Self::Map(_) | Self::Seq(_))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

impl From<Map<String, Value>> for Body {
    fn from(map: Map<String, Value>) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<Value>> for Body {
    fn from(seq: Vec<Value>) -> Self {
        Self::Seq(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn from_value_maps_json_types() {
        assert!(matches!(
            Body::from_value(json!({"a": 1})).unwrap(),
            Body::Map(_)
        ));
        assert!(matches!(Body::from_value(json!([1, 2])).unwrap(), Body::Seq(_)));
        assert_eq!(Body::from_value(json!("text")).unwrap(), Body::raw("text"));
    }

    #[test]
    fn from_value_rejects_scalars() {
        for (value, kind) in [(json!(null), "null"), (json!(true), "boolean"), (json!(4), "number")] {
            match Body::from_value(value) {
                Err(SerializationError::NotStructured { kind: k }) => assert_eq!(k, kind),
                other => panic!("Expected NotStructured, got {other:?}"),
            }
        }
    }

    #[test]
    fn from_serialize_rejects_non_string_keys() {
        let value = HashMap::from([((1, 2), "tuple key")]);

        let result = Body::from_serialize(&value);

        assert!(matches!(result, Err(SerializationError::Json(_))));
    }

    #[test]
    fn is_structured_only_for_map_and_seq() {
        assert!(Body::from(vec![json!(1)]).is_structured());
        assert!(Body::from(Map::new()).is_structured());
        assert!(!Body::from("raw").is_structured());
    }
}
