//! Wire-level data model for the tablescan scan utility.
//!
//! This crate holds the types that mirror the DynamoDB scan wire contract:
//! the `AttributeValue` union, attribute-map items, the opaque pagination
//! cursor, and the request/page shapes a page source exchanges with the
//! store. DynamoDB's JSON protocol makes serde derives do most of the work;
//! only binary values need custom handling (base64 on the wire).
// "DynamoDB" appears in virtually every doc comment in this crate.
#![allow(clippy::doc_markdown)]

pub mod attribute_value;
pub mod error;
pub mod page;
pub mod types;

pub use attribute_value::AttributeValue;
pub use error::RemoteErrorKind;
pub use page::{PageRequest, ScanPage};
pub use types::{Cursor, InvalidTableName, Item, TableRef};
