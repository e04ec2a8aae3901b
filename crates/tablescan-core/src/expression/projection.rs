//! Result projections: the subset of attributes to retrieve.

use super::ast::{BuildError, Path};

/// An ordered set of attribute paths to retrieve, reducing transferred
/// payload. Duplicate paths are collapsed, first occurrence wins the
/// position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    paths: Vec<Path>,
}

impl Projection {
    /// Build a projection from dotted path strings.
    ///
    /// # Errors
    /// Returns [`BuildError`] when no paths are given or a path fails to
    /// parse.
    pub fn new<I, S>(attrs: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut paths = Vec::new();
        for attr in attrs {
            let path = Path::parse(attr.as_ref())?;
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(BuildError::EmptyProjection);
        }
        Ok(Self { paths })
    }

    /// Build a projection from already-parsed paths.
    ///
    /// Duplicates collapse as in [`Projection::new`]. Emptiness is caught
    /// when the projection is rendered, not here, so this cannot fail.
    #[must_use]
    pub fn from_paths(paths: Vec<Path>) -> Self {
        let mut deduped: Vec<Path> = Vec::with_capacity(paths.len());
        for path in paths {
            if !deduped.contains(&path) {
                deduped.push(path);
            }
        }
        Self { paths: deduped }
    }

    /// The projected paths in order.
    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_keep_order_and_drop_duplicates() {
        let projection = Projection::new(["title", "year", "title", "info.rating"]).unwrap();
        let rendered: Vec<String> = projection.paths().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["title", "year", "info.rating"]);
    }

    #[test]
    fn test_should_reject_empty_projection() {
        assert_eq!(
            Projection::new(Vec::<&str>::new()),
            Err(BuildError::EmptyProjection)
        );
    }

    #[test]
    fn test_should_propagate_path_errors() {
        assert_eq!(Projection::new([""]), Err(BuildError::EmptyPath));
    }
}
