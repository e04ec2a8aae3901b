//! Rendering expressions into the store's wire form.

use std::collections::HashMap;

use tablescan_model::AttributeValue;

use super::ast::{BuildError, FilterExpr, Path, PathElement};
use super::projection::Projection;

/// The rendered wire form of a filter and/or projection: expression strings
/// plus the placeholder tables referenced by them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireExpressions {
    /// Rendered filter condition, if a filter was supplied.
    pub filter_expression: Option<String>,
    /// Rendered projection list, if a projection was supplied.
    pub projection_expression: Option<String>,
    /// Placeholder-to-name substitutions (`#n0` -> `year`).
    pub names: HashMap<String, String>,
    /// Placeholder-to-literal substitutions (`:v0` -> value).
    pub values: HashMap<String, AttributeValue>,
}

/// Builder combining an optional filter and an optional projection into one
/// [`WireExpressions`], sharing a single name placeholder table so the same
/// attribute renders to the same token in both.
#[derive(Debug, Default)]
pub struct ExpressionBuilder {
    filter: Option<FilterExpr>,
    projection: Option<Projection>,
}

impl ExpressionBuilder {
    /// Start an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a filter predicate.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterExpr) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Attach a projection.
    #[must_use]
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Render everything into wire form.
    ///
    /// # Errors
    /// Returns [`BuildError`] when the projection is empty.
    pub fn build(self) -> Result<WireExpressions, BuildError> {
        let mut alloc = PlaceholderAllocator::default();
        let filter_expression = self.filter.map(|f| render_filter(&f, &mut alloc));
        let projection_expression = self
            .projection
            .map(|p| render_projection(&p, &mut alloc))
            .transpose()?;
        Ok(WireExpressions {
            filter_expression,
            projection_expression,
            names: alloc.names,
            values: alloc.values,
        })
    }
}

/// Allocates `#nN` name tokens and `:vN` value tokens.
///
/// Name tokens are deduplicated per attribute name so a path used by both
/// the filter and the projection renders identically. Value tokens are
/// always fresh: two occurrences of the same literal stay independent.
#[derive(Debug, Default)]
struct PlaceholderAllocator {
    names: HashMap<String, String>,
    tokens_by_name: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl PlaceholderAllocator {
    fn name_token(&mut self, name: &str) -> String {
        if let Some(token) = self.tokens_by_name.get(name) {
            return token.clone();
        }
        let token = format!("#n{}", self.tokens_by_name.len());
        self.tokens_by_name.insert(name.to_owned(), token.clone());
        self.names.insert(token.clone(), name.to_owned());
        token
    }

    fn value_token(&mut self, value: AttributeValue) -> String {
        let token = format!(":v{}", self.values.len());
        self.values.insert(token.clone(), value);
        token
    }
}

fn render_path(path: &Path, alloc: &mut PlaceholderAllocator) -> String {
    let mut rendered = String::new();
    for (i, element) in path.elements().iter().enumerate() {
        match element {
            PathElement::Attribute(name) => {
                if i > 0 {
                    rendered.push('.');
                }
                rendered.push_str(&alloc.name_token(name));
            }
            PathElement::Index(index) => {
                rendered.push_str(&format!("[{index}]"));
            }
        }
    }
    rendered
}

fn render_filter(expr: &FilterExpr, alloc: &mut PlaceholderAllocator) -> String {
    match expr {
        FilterExpr::Compare { path, op, value } => {
            let path = render_path(path, alloc);
            let value = alloc.value_token(value.clone());
            format!("{path} {op} {value}")
        }
        FilterExpr::Between { path, low, high } => {
            let path = render_path(path, alloc);
            let low = alloc.value_token(low.clone());
            let high = alloc.value_token(high.clone());
            format!("{path} BETWEEN {low} AND {high}")
        }
        FilterExpr::And(left, right) => {
            let left = render_filter(left, alloc);
            let right = render_filter(right, alloc);
            format!("({left}) AND ({right})")
        }
        FilterExpr::Or(left, right) => {
            let left = render_filter(left, alloc);
            let right = render_filter(right, alloc);
            format!("({left}) OR ({right})")
        }
        FilterExpr::Not(inner) => {
            let inner = render_filter(inner, alloc);
            format!("NOT ({inner})")
        }
        FilterExpr::Exists(path) => {
            format!("attribute_exists({})", render_path(path, alloc))
        }
        FilterExpr::NotExists(path) => {
            format!("attribute_not_exists({})", render_path(path, alloc))
        }
        FilterExpr::BeginsWith { path, prefix } => {
            let path = render_path(path, alloc);
            let prefix = alloc.value_token(AttributeValue::S(prefix.clone()));
            format!("begins_with({path}, {prefix})")
        }
    }
}

fn render_projection(
    projection: &Projection,
    alloc: &mut PlaceholderAllocator,
) -> Result<String, BuildError> {
    if projection.paths().is_empty() {
        return Err(BuildError::EmptyProjection);
    }
    let rendered: Vec<String> = projection
        .paths()
        .iter()
        .map(|path| render_path(path, alloc))
        .collect();
    Ok(rendered.join(", "))
}
