//! Path-prefix exclusion rules.

use std::path::{Path, PathBuf};

use crate::paths::{normalize, HostPaths};

/// A set of normalized path prefixes that a scan must skip.
///
/// Matching is per path segment: `/a/b` excludes `/a/b` and `/a/b/c`,
/// never `/a/bc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    prefixes: Vec<PathBuf>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit paths, expanding `~` against `host`.
    pub fn from_paths<I, P>(host: &HostPaths, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut set = Self::new();
        for path in paths {
            set.insert(host.expand(path));
        }
        set
    }

    /// Parse the comma-separated form used on the command line and in the
    /// settings file. Blank entries are ignored.
    pub fn parse(host: &HostPaths, spec: &str) -> Self {
        Self::from_paths(
            host,
            spec.split(',').map(str::trim).filter(|s| !s.is_empty()),
        )
    }

    pub fn insert(&mut self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        if !self.prefixes.contains(&path) {
            self.prefixes.push(path);
        }
    }

    /// Merge another set into this one.
    pub fn extend(&mut self, other: &ExclusionSet) {
        for prefix in &other.prefixes {
            self.insert(prefix);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    /// True if `path` equals or lies under one of the prefixes.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.prefixes.is_empty() {
            return false;
        }
        let path = normalize(path);
        let excluded = self.prefixes.iter().any(|prefix| path.starts_with(prefix));
        if excluded {
            tracing::info!(path = %path.display(), "Excluded path");
        }
        excluded
    }
}
