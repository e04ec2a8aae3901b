//! Strict deserialization of attribute maps into typed records.
//!
//! The store hands back loosely-typed attribute maps; records are the typed
//! view the rest of the program works with. The mapping is schema-driven
//! and strict: a missing required field or a wrong shape fails the whole
//! scan with a [`DeserializationError`] instead of silently defaulting.

use tablescan_model::{AttributeValue, Item};

use crate::expression::{Path, PathElement};

/// An attribute map failed to match the target record shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeserializationError {
    /// A required attribute was absent.
    #[error("required attribute {path:?} is missing")]
    MissingAttribute {
        /// Dotted path of the missing attribute.
        path: String,
    },

    /// An attribute was present with a different type than the record
    /// expects.
    #[error("attribute {path:?} has type {actual} where {expected} was expected")]
    TypeMismatch {
        /// Dotted path of the offending attribute.
        path: String,
        /// Type descriptor the record expects.
        expected: &'static str,
        /// Type descriptor actually found.
        actual: &'static str,
    },

    /// A number attribute held a string that does not parse as the
    /// requested numeric type.
    #[error("attribute {path:?} holds {value:?} which is not a valid number")]
    InvalidNumber {
        /// Dotted path of the offending attribute.
        path: String,
        /// The string-encoded number as received.
        value: String,
    },

    /// An accessor was called with a path that is not a valid document
    /// path. This is a defect in the record impl, not in the data.
    #[error("accessor path {path:?} is not a valid document path")]
    InvalidPath {
        /// The raw accessor path.
        path: String,
    },

    /// The store returned a value shape this client cannot represent.
    #[error("unsupported attribute value: {detail}")]
    UnsupportedValue {
        /// Description of the unrepresentable value.
        detail: String,
    },
}

/// A typed record deserializable from one attribute map.
///
/// Implementations should go through [`ItemReader`] so that failures carry
/// the offending path. Deserialization must be strict -- return an error
/// rather than substitute a default.
pub trait FromItem: Sized {
    /// Map one attribute map into the record type.
    ///
    /// # Errors
    /// Returns [`DeserializationError`] when the map does not match the
    /// record shape.
    fn from_item(item: &Item) -> Result<Self, DeserializationError>;
}

/// Raw items pass through unchanged.
impl FromItem for Item {
    fn from_item(item: &Item) -> Result<Self, DeserializationError> {
        Ok(item.clone())
    }
}

/// Typed accessors over one attribute map.
///
/// Accessor paths use the same dotted syntax as expressions
/// (`info.rating`, `roles[0].name`) and resolve through nested maps and
/// lists.
#[derive(Debug, Clone, Copy)]
pub struct ItemReader<'a> {
    item: &'a Item,
}

impl<'a> ItemReader<'a> {
    /// Wrap an attribute map.
    #[must_use]
    pub fn new(item: &'a Item) -> Self {
        Self { item }
    }

    /// Required string attribute.
    pub fn string(&self, path: &str) -> Result<&'a str, DeserializationError> {
        let value = self.required(path)?;
        value.as_s().ok_or_else(|| mismatch(path, "S", value))
    }

    /// Optional string attribute: absent resolves to `None`, a present
    /// non-string is still an error.
    pub fn opt_string(&self, path: &str) -> Result<Option<&'a str>, DeserializationError> {
        match self.lookup(path)? {
            None => Ok(None),
            Some(value) => value.as_s().map(Some).ok_or_else(|| mismatch(path, "S", value)),
        }
    }

    /// Required integer attribute.
    pub fn integer(&self, path: &str) -> Result<i64, DeserializationError> {
        parse_number(path, self.number(path)?)
    }

    /// Optional integer attribute.
    pub fn opt_integer(&self, path: &str) -> Result<Option<i64>, DeserializationError> {
        self.opt_number(path)?
            .map(|raw| parse_number(path, raw))
            .transpose()
    }

    /// Required floating-point attribute.
    pub fn float(&self, path: &str) -> Result<f64, DeserializationError> {
        parse_number(path, self.number(path)?)
    }

    /// Optional floating-point attribute.
    pub fn opt_float(&self, path: &str) -> Result<Option<f64>, DeserializationError> {
        self.opt_number(path)?
            .map(|raw| parse_number(path, raw))
            .transpose()
    }

    /// Required boolean attribute.
    pub fn boolean(&self, path: &str) -> Result<bool, DeserializationError> {
        let value = self.required(path)?;
        value.as_bool().ok_or_else(|| mismatch(path, "BOOL", value))
    }

    /// Optional boolean attribute.
    pub fn opt_boolean(&self, path: &str) -> Result<Option<bool>, DeserializationError> {
        match self.lookup(path)? {
            None => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| mismatch(path, "BOOL", value)),
        }
    }

    /// Raw attribute value at a path, if present.
    pub fn value(&self, path: &str) -> Result<Option<&'a AttributeValue>, DeserializationError> {
        self.lookup(path)
    }

    fn number(&self, path: &str) -> Result<&'a str, DeserializationError> {
        let value = self.required(path)?;
        value.as_n().ok_or_else(|| mismatch(path, "N", value))
    }

    fn opt_number(&self, path: &str) -> Result<Option<&'a str>, DeserializationError> {
        match self.lookup(path)? {
            None => Ok(None),
            Some(value) => value.as_n().map(Some).ok_or_else(|| mismatch(path, "N", value)),
        }
    }

    fn required(&self, path: &str) -> Result<&'a AttributeValue, DeserializationError> {
        self.lookup(path)?
            .ok_or_else(|| DeserializationError::MissingAttribute {
                path: path.to_owned(),
            })
    }

    /// Walk a dotted path through nested maps and lists.
    fn lookup(&self, raw: &str) -> Result<Option<&'a AttributeValue>, DeserializationError> {
        let path = Path::parse(raw).map_err(|_| DeserializationError::InvalidPath {
            path: raw.to_owned(),
        })?;
        let mut current: Option<&'a AttributeValue> = None;
        for (i, element) in path.elements().iter().enumerate() {
            current = match element {
                PathElement::Attribute(name) => {
                    if i == 0 {
                        self.item.get(name)
                    } else {
                        match current {
                            Some(value) => value.as_m().and_then(|m| m.get(name)),
                            None => None,
                        }
                    }
                }
                PathElement::Index(index) => match current {
                    Some(value) => value.as_l().and_then(|l| l.get(*index)),
                    None => None,
                },
            };
            if current.is_none() {
                return Ok(None);
            }
        }
        Ok(current)
    }
}

fn mismatch(path: &str, expected: &'static str, actual: &AttributeValue) -> DeserializationError {
    DeserializationError::TypeMismatch {
        path: path.to_owned(),
        expected,
        actual: actual.type_descriptor(),
    }
}

fn parse_number<T: std::str::FromStr>(path: &str, raw: &str) -> Result<T, DeserializationError> {
    raw.parse().map_err(|_| DeserializationError::InvalidNumber {
        path: path.to_owned(),
        value: raw.to_owned(),
    })
}
