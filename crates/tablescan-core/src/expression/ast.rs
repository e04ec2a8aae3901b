//! Filter expression tree and document paths.

use std::fmt;

use tablescan_model::AttributeValue;

/// Error raised while composing or rendering an expression.
///
/// All variants are caught before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The attribute path was empty.
    #[error("attribute path is empty")]
    EmptyPath,

    /// A dotted path contained an empty segment, e.g. `info..rating`.
    #[error("attribute path {0:?} contains an empty segment")]
    EmptySegment(String),

    /// A list index was malformed, e.g. `roles[x]` or `roles[0`.
    #[error("attribute path segment {0:?} has a malformed list index")]
    MalformedIndex(String),

    /// The projection named no attributes at all.
    #[error("projection must name at least one attribute")]
    EmptyProjection,
}

/// A single element in a document path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// A named attribute.
    Attribute(String),
    /// A list index dereference, e.g. `[0]`.
    Index(usize),
}

/// A document path: one or more attribute names, optionally indexing into
/// lists, e.g. `info.rating` or `roles[0].name`.
///
/// Paths address nested attributes the same way the store's expression
/// language does; each attribute name is placeholder-substituted separately
/// when the path is rendered, so reserved words are safe anywhere in the
/// path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    pub(crate) elements: Vec<PathElement>,
}

impl Path {
    /// Parse a dotted path string.
    ///
    /// # Errors
    /// Returns [`BuildError`] on an empty path, an empty segment, or a
    /// malformed list index.
    pub fn parse(raw: &str) -> Result<Self, BuildError> {
        if raw.is_empty() {
            return Err(BuildError::EmptyPath);
        }
        let mut elements = Vec::new();
        for segment in raw.split('.') {
            let (name, mut rest) = segment
                .find('[')
                .map_or((segment, ""), |at| segment.split_at(at));
            if name.is_empty() {
                return Err(BuildError::EmptySegment(raw.to_owned()));
            }
            elements.push(PathElement::Attribute(name.to_owned()));
            while let Some(inner) = rest.strip_prefix('[') {
                let Some(close) = inner.find(']') else {
                    return Err(BuildError::MalformedIndex(segment.to_owned()));
                };
                let index = inner[..close]
                    .parse()
                    .map_err(|_| BuildError::MalformedIndex(segment.to_owned()))?;
                elements.push(PathElement::Index(index));
                rest = &inner[close + 1..];
            }
            if !rest.is_empty() {
                return Err(BuildError::MalformedIndex(segment.to_owned()));
            }
        }
        Ok(Self { elements })
    }

    /// The path elements in order.
    #[must_use]
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// `self = value`
    #[must_use]
    pub fn equals(self, value: impl Into<AttributeValue>) -> FilterExpr {
        self.compare(CompareOp::Eq, value)
    }

    /// `self <> value`
    #[must_use]
    pub fn not_equals(self, value: impl Into<AttributeValue>) -> FilterExpr {
        self.compare(CompareOp::Ne, value)
    }

    /// `self < value`
    #[must_use]
    pub fn less_than(self, value: impl Into<AttributeValue>) -> FilterExpr {
        self.compare(CompareOp::Lt, value)
    }

    /// `self <= value`
    #[must_use]
    pub fn at_most(self, value: impl Into<AttributeValue>) -> FilterExpr {
        self.compare(CompareOp::Le, value)
    }

    /// `self > value`
    #[must_use]
    pub fn greater_than(self, value: impl Into<AttributeValue>) -> FilterExpr {
        self.compare(CompareOp::Gt, value)
    }

    /// `self >= value`
    #[must_use]
    pub fn at_least(self, value: impl Into<AttributeValue>) -> FilterExpr {
        self.compare(CompareOp::Ge, value)
    }

    /// `self BETWEEN low AND high` (both bounds inclusive).
    #[must_use]
    pub fn between(
        self,
        low: impl Into<AttributeValue>,
        high: impl Into<AttributeValue>,
    ) -> FilterExpr {
        FilterExpr::Between {
            path: self,
            low: low.into(),
            high: high.into(),
        }
    }

    /// `attribute_exists(self)`
    #[must_use]
    pub fn exists(self) -> FilterExpr {
        FilterExpr::Exists(self)
    }

    /// `attribute_not_exists(self)`
    #[must_use]
    pub fn not_exists(self) -> FilterExpr {
        FilterExpr::NotExists(self)
    }

    /// `begins_with(self, prefix)`
    #[must_use]
    pub fn begins_with(self, prefix: impl Into<String>) -> FilterExpr {
        FilterExpr::BeginsWith {
            path: self,
            prefix: prefix.into(),
        }
    }

    fn compare(self, op: CompareOp, value: impl Into<AttributeValue>) -> FilterExpr {
        FilterExpr::Compare {
            path: self,
            op,
            value: value.into(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            match element {
                PathElement::Attribute(name) => {
                    if i > 0 {
                        write!(f, ".{name}")?;
                    } else {
                        write!(f, "{name}")?;
                    }
                }
                PathElement::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Comparison operators the store's expression language accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`=`).
    Eq,
    /// Not equal (`<>`).
    Ne,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::Ne => write!(f, "<>"),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
        }
    }
}

/// A declarative filter predicate over remote attribute paths.
///
/// Unlike a parsed expression, the tree carries literal values directly;
/// they are moved into the value placeholder table only when the expression
/// is rendered, so no literal ever appears in the expression text.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Comparison: `path op value`.
    Compare {
        /// Attribute path on the left.
        path: Path,
        /// Comparison operator.
        op: CompareOp,
        /// Literal on the right.
        value: AttributeValue,
    },
    /// Range test: `path BETWEEN low AND high`.
    Between {
        /// Attribute path to test.
        path: Path,
        /// Lower bound (inclusive).
        low: AttributeValue,
        /// Upper bound (inclusive).
        high: AttributeValue,
    },
    /// Conjunction of two predicates.
    And(Box<FilterExpr>, Box<FilterExpr>),
    /// Disjunction of two predicates.
    Or(Box<FilterExpr>, Box<FilterExpr>),
    /// Negation of a predicate.
    Not(Box<FilterExpr>),
    /// `attribute_exists(path)`.
    Exists(Path),
    /// `attribute_not_exists(path)`.
    NotExists(Path),
    /// `begins_with(path, prefix)`.
    BeginsWith {
        /// Attribute path to test.
        path: Path,
        /// String prefix to match.
        prefix: String,
    },
}

impl FilterExpr {
    /// Combine with another predicate: `(self) AND (other)`.
    #[must_use]
    pub fn and(self, other: FilterExpr) -> FilterExpr {
        FilterExpr::And(Box::new(self), Box::new(other))
    }

    /// Combine with another predicate: `(self) OR (other)`.
    #[must_use]
    pub fn or(self, other: FilterExpr) -> FilterExpr {
        FilterExpr::Or(Box::new(self), Box::new(other))
    }

    /// Negate: `NOT (self)`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> FilterExpr {
        FilterExpr::Not(Box::new(self))
    }
}
