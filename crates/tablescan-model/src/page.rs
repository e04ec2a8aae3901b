//! Request and page shapes exchanged with the store during a scan.
//!
//! Both structs use `PascalCase` JSON field naming to match the DynamoDB
//! wire protocol (`awsJson1_0`). Optional fields and empty maps are omitted
//! to produce minimal payloads. These types stay internal to the scan
//! component; callers only ever see deserialized records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;
use crate::types::{Cursor, Item};

/// One scan request in wire form, minus the pagination cursor.
///
/// The cursor travels separately: the request describes *what* to scan and
/// is built once per invocation, while the cursor changes page to page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageRequest {
    /// The name of the table to scan.
    pub table_name: String,

    /// Conditions the store evaluates before returning rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,

    /// The attributes to retrieve from each row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,

    /// Substitution tokens for attribute names in an expression
    /// (placeholder, e.g. `#n0`, to actual name).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: HashMap<String, String>,

    /// Substitution tokens for literal values in an expression
    /// (placeholder, e.g. `:v0`, to value).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_values: HashMap<String, AttributeValue>,

    /// If `true`, a strongly consistent read is used. Passed through to the
    /// store unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
}

/// One page of raw scan results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanPage {
    /// The attribute maps for rows that matched the scan conditions. May be
    /// empty even mid-scan: a filtered page can match nothing and still
    /// carry a continuation cursor.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,

    /// Where the scan stopped, if it stopped short of the end of the table.
    /// Feed this back as the next request's starting point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Cursor>,
}
