//! Declarative filter and projection expressions.
//!
//! This module builds the store's expression language rather than parsing
//! it: callers compose a [`FilterExpr`] tree and a [`Projection`] from typed
//! parts, and the builder renders them into expression strings plus the
//! name/value placeholder tables the wire protocol expects. Placeholders
//! keep reserved attribute names safe and keep literal values out of the
//! expression text entirely.
//!
//! 1. **Compose**: `Path::parse("year")?.equals(2011).and(...)`.
//! 2. **Render**: [`ExpressionBuilder`] walks the tree, allocating `#nN`
//!    name tokens (deduplicated) and `:vN` value tokens (always fresh).

pub mod ast;
pub mod build;
pub mod projection;

pub use ast::{BuildError, CompareOp, FilterExpr, Path, PathElement};
pub use build::{ExpressionBuilder, WireExpressions};
pub use projection::Projection;
