//! DynamoDB `AttributeValue` type.
//!
//! `AttributeValue` is a tagged union where exactly one variant is present.
//! The JSON wire format uses single-key objects like `{"S": "hello"}`, which
//! is exactly serde's externally-tagged enum representation, so the derive
//! carries the whole format apart from binary values (base64 strings on the
//! wire).

use std::collections::HashMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// DynamoDB attribute value.
///
/// Exactly one variant is present per value. Numbers are string-encoded to
/// preserve arbitrary precision across the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// String value.
    S(String),
    /// Number value (string-encoded for arbitrary precision).
    N(String),
    /// Binary value (base64-encoded in JSON).
    #[serde(with = "b64")]
    B(Bytes),
    /// String set.
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    /// Number set (string-encoded).
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    /// Binary set (base64-encoded in JSON).
    #[serde(rename = "BS", with = "b64_set")]
    Bs(Vec<Bytes>),
    /// Boolean value.
    #[serde(rename = "BOOL")]
    Bool(bool),
    /// Null value.
    #[serde(rename = "NULL")]
    Null(bool),
    /// List of attribute values.
    L(Vec<AttributeValue>),
    /// Map of attribute values.
    M(HashMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Returns the string value if this is an `S` variant.
    #[must_use]
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number string if this is an `N` variant.
    #[must_use]
    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the bytes if this is a `B` variant.
    #[must_use]
    pub fn as_b(&self) -> Option<&Bytes> {
        match self {
            Self::B(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool` variant.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the list if this is an `L` variant.
    #[must_use]
    pub fn as_l(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::L(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the map if this is an `M` variant.
    #[must_use]
    pub fn as_m(&self) -> Option<&HashMap<String, AttributeValue>> {
        match self {
            Self::M(m) => Some(m),
            _ => None,
        }
    }

    /// Returns `true` if this is a null value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(true))
    }

    /// Returns the DynamoDB type descriptor string (e.g., "S", "N", "BOOL").
    #[must_use]
    pub fn type_descriptor(&self) -> &'static str {
        match self {
            Self::S(_) => "S",
            Self::N(_) => "N",
            Self::B(_) => "B",
            Self::Ss(_) => "SS",
            Self::Ns(_) => "NS",
            Self::Bs(_) => "BS",
            Self::Bool(_) => "BOOL",
            Self::Null(_) => "NULL",
            Self::L(_) => "L",
            Self::M(_) => "M",
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::S(s.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::S(s)
    }
}

impl From<i32> for AttributeValue {
    fn from(n: i32) -> Self {
        Self::N(n.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        Self::N(n.to_string())
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        Self::N(n.to_string())
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

mod b64 {
    use base64::Engine;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(&encoded)
            .map(Bytes::from)
            .map_err(de::Error::custom)
    }
}

mod b64_set {
    use base64::Engine;
    use bytes::Bytes;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(set: &[Bytes], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(set.len()))?;
        for bytes in set {
            seq.serialize_element(&base64::engine::general_purpose::STANDARD.encode(bytes))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Bytes>, D::Error> {
        let encoded = Vec::<String>::deserialize(deserializer)?;
        encoded
            .iter()
            .map(|e| {
                base64::engine::general_purpose::STANDARD
                    .decode(e)
                    .map(Bytes::from)
                    .map_err(de::Error::custom)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_serialize_string_value() {
        let val = AttributeValue::S("hello".to_owned());
        assert_eq!(serde_json::to_string(&val).unwrap(), r#"{"S":"hello"}"#);
    }

    #[test]
    fn test_should_serialize_number_value() {
        let val = AttributeValue::N("8.5".to_owned());
        assert_eq!(serde_json::to_string(&val).unwrap(), r#"{"N":"8.5"}"#);
    }

    #[test]
    fn test_should_serialize_bool_and_null() {
        assert_eq!(
            serde_json::to_string(&AttributeValue::Bool(true)).unwrap(),
            r#"{"BOOL":true}"#
        );
        assert_eq!(
            serde_json::to_string(&AttributeValue::Null(true)).unwrap(),
            r#"{"NULL":true}"#
        );
    }

    #[test]
    fn test_should_roundtrip_binary_value() {
        let val = AttributeValue::B(Bytes::from_static(b"raw bytes"));
        let json = serde_json::to_string(&val).unwrap();
        assert_eq!(json, r#"{"B":"cmF3IGJ5dGVz"}"#);
        let back: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, val);
    }

    #[test]
    fn test_should_roundtrip_binary_set() {
        let val = AttributeValue::Bs(vec![Bytes::from_static(b"a"), Bytes::from_static(b"b")]);
        let json = serde_json::to_string(&val).unwrap();
        let back: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, val);
    }

    #[test]
    fn test_should_roundtrip_nested_map() {
        let mut info = HashMap::new();
        info.insert("rating".to_owned(), AttributeValue::from(8.5));
        info.insert("plot".to_owned(), AttributeValue::from("Nothing happens."));
        let val = AttributeValue::M(info);
        let json = serde_json::to_string(&val).unwrap();
        let back: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, val);
    }

    #[test]
    fn test_should_deserialize_sets() {
        let val: AttributeValue = serde_json::from_str(r#"{"SS":["a","b"]}"#).unwrap();
        assert!(matches!(val, AttributeValue::Ss(ref v) if v.len() == 2));
        let val: AttributeValue = serde_json::from_str(r#"{"NS":["1","2","3"]}"#).unwrap();
        assert!(matches!(val, AttributeValue::Ns(ref v) if v.len() == 3));
    }

    #[test]
    fn test_should_reject_unknown_type_key() {
        assert!(serde_json::from_str::<AttributeValue>(r#"{"X":"?"}"#).is_err());
    }

    #[test]
    fn test_should_convert_from_primitives() {
        assert_eq!(AttributeValue::from(2011_i64), AttributeValue::N("2011".to_owned()));
        assert_eq!(AttributeValue::from("A"), AttributeValue::S("A".to_owned()));
        assert_eq!(AttributeValue::from(true), AttributeValue::Bool(true));
    }
}
