//! Common scan-facing types: items, table references, and the pagination
//! cursor.

use std::collections::HashMap;
use std::fmt;

use crate::attribute_value::AttributeValue;

/// One item as returned by the store: a loosely-typed attribute map.
pub type Item = HashMap<String, AttributeValue>;

/// Reference to a table by name.
///
/// Table names are validated on construction against the store's naming
/// rules (3--255 characters from `[A-Za-z0-9_.-]`), so an invalid name fails
/// before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TableRef(String);

impl TableRef {
    /// Create a table reference.
    ///
    /// # Errors
    /// Returns [`InvalidTableName`] if the name violates the store's naming
    /// rules.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidTableName> {
        let name = name.into();
        let valid_len = (3..=255).contains(&name.len());
        let valid_chars = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
        if valid_len && valid_chars {
            Ok(Self(name))
        } else {
            Err(InvalidTableName(name))
        }
    }

    /// Get the table name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a table name violates the store's naming rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTableName(String);

impl fmt::Display for InvalidTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid table name: {:?} (must be 3-255 characters from [A-Za-z0-9_.-])",
            self.0
        )
    }
}

impl std::error::Error for InvalidTableName {}

/// Opaque continuation token for a multi-page scan.
///
/// Wraps the key map the store hands back with a partial page
/// (`LastEvaluatedKey` on the wire). The scanner never inspects or
/// synthesizes a cursor; it only passes one back unmodified as the next
/// request's starting point. The accessors below exist for page-source
/// adapters, which sit on the store side of that contract.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Cursor(Item);

impl Cursor {
    /// Build a cursor from the key map returned by the store.
    ///
    /// Returns `None` for an empty key map, which the wire protocol uses to
    /// mean "no more pages".
    #[must_use]
    pub fn from_key(key: Item) -> Option<Self> {
        if key.is_empty() { None } else { Some(Self(key)) }
    }

    /// The wrapped key map, for adapters to place into the next request.
    #[must_use]
    pub fn as_key(&self) -> &Item {
        &self.0
    }
}
