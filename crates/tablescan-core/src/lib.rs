//! Filtered table scan client for DynamoDB-style stores.
//!
//! The crate wraps the one genuinely reusable shape in "scan a table with a
//! filter": build a declarative filter and projection, render them into the
//! store's expression wire form with placeholder tables, page through the
//! scan behind an opaque cursor, deserialize every attribute map into a
//! typed record, and post-filter locally. The store itself is reached
//! through the [`source::PageSource`] seam; [`sdk::DynamoDbSource`] adapts a
//! caller-owned `aws-sdk-dynamodb` client to it.
//!
//! ```no_run
//! use tablescan_core::expression::{Path, Projection};
//! use tablescan_core::record::{FromItem, ItemReader, DeserializationError};
//! use tablescan_core::scanner::{FilteredScanner, ScanOptions};
//! use tablescan_core::sdk::DynamoDbSource;
//! use tablescan_model::{Item, TableRef};
//!
//! #[derive(Debug)]
//! struct Movie {
//!     title: String,
//!     rating: f64,
//! }
//!
//! impl FromItem for Movie {
//!     fn from_item(item: &Item) -> Result<Self, DeserializationError> {
//!         let reader = ItemReader::new(item);
//!         Ok(Self {
//!             title: reader.string("title")?.to_owned(),
//!             rating: reader.float("info.rating")?,
//!         })
//!     }
//! }
//!
//! # async fn run(client: aws_sdk_dynamodb::Client) -> Result<(), Box<dyn std::error::Error>> {
//! let scanner = FilteredScanner::new(DynamoDbSource::new(client));
//! let result = scanner
//!     .scan::<Movie, _>(
//!         &TableRef::new("Movies")?,
//!         Some(Path::parse("year")?.equals(2011)),
//!         Some(Projection::new(["title", "year", "info.rating"])?),
//!         |movie| movie.rating > 8.0,
//!         &ScanOptions::default(),
//!     )
//!     .await?;
//! println!("found {} movie(s)", result.count);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod expression;
pub mod record;
pub mod scanner;
pub mod sdk;
pub mod source;

pub use error::ScanError;
pub use scanner::{FilteredScanner, ScanOptions, ScanResult};
