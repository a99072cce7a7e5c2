//! Ordered, append-only collection of package names

use serde::Serialize;

/// Package names required by the choices made during a run.
///
/// Insertion order is the order decisions were evaluated. Duplicates are kept;
/// whoever writes the manifest is responsible for deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencySet {
    names: Vec<String>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    pub fn append_all<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
    }

    /// Current ordered sequence
    pub fn snapshot(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut deps = DependencySet::new();
        deps.append("typescript");
        deps.append_all(["ts-loader", "webpack-dev-server"]);

        assert_eq!(
            deps.snapshot(),
            ["typescript", "ts-loader", "webpack-dev-server"]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut deps = DependencySet::new();
        deps.append("webpack-dev-server");
        deps.append("webpack-dev-server");
        assert_eq!(deps.len(), 2);
    }
}
