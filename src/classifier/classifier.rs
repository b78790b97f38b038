//! Core trait and helpers for cleanup classifiers.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::Result;
use crate::scanner::{ExclusionSet, Item, SizeProbe};

/// A well-known location a classifier reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownPath {
    pub category: &'static str,
    pub path: PathBuf,
}

impl KnownPath {
    pub fn new(category: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            category,
            path: path.into(),
        }
    }
}

/// Trait for cleanup classifiers.
///
/// A classifier is a self-contained unit of knowledge about one ecosystem
/// (a package manager, VM tool, toolchain...). Implement this trait and add
/// a factory to the registry to support a new one; the scan engine does not
/// change.
pub trait Classifier: Send + Sync {
    /// Unique identifier, also the key in the settings file (e.g. "python").
    fn name(&self) -> &'static str;

    /// Human-readable name (e.g. "Python").
    fn display_name(&self) -> &'static str;

    /// Fixed locations this classifier reports on.
    fn known_paths(&self) -> Vec<KnownPath>;

    /// Paths owned by a more specific classifier. Known paths under any of
    /// these are skipped so they are reported only once.
    fn deferred_paths(&self) -> ExclusionSet {
        ExclusionSet::default()
    }

    /// Enumerate candidate items.
    ///
    /// Default implementation measures every existing known path that is not
    /// deferred and drops empty ones.
    fn scan(&self, probe: &dyn SizeProbe) -> Result<Vec<Item>> {
        Ok(measure_known_paths(
            self.name(),
            self.known_paths(),
            &self.deferred_paths(),
            probe,
        ))
    }
}

/// Measure a list of known paths, skipping missing, deferred and empty ones.
pub fn measure_known_paths(
    classifier: &str,
    paths: Vec<KnownPath>,
    deferred: &ExclusionSet,
    probe: &dyn SizeProbe,
) -> Vec<Item> {
    let mut items = Vec::new();

    for known in paths {
        if fs::symlink_metadata(&known.path).is_err() {
            tracing::debug!(classifier, path = %known.path.display(), "Path does not exist");
            continue;
        }
        if deferred.is_excluded(&known.path) {
            tracing::debug!(
                classifier,
                path = %known.path.display(),
                "Path excluded (handled by another classifier)"
            );
            continue;
        }
        if let Some(item) = Item::measured(known.category, &known.path, probe) {
            tracing::info!(
                classifier,
                category = known.category,
                path = %item.path.display(),
                size = %item.size,
                "Found item"
            );
            items.push(item);
        }
    }

    items
}

/// Children of `dir` whose file name starts with `prefix`, sorted.
///
/// Stands in for shell globs such as `python@*`.
pub fn children_with_prefix(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut matches: Vec<PathBuf> = read_dir
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with(prefix))
        .map(|e| e.path())
        .collect();
    matches.sort();
    matches
}

/// Directories named `name` found under `root`.
///
/// Only directories up to `search_depth` levels below `root` are searched,
/// so matches sit at most one level deeper. Matches are not descended into,
/// and symlinks are not followed.
pub fn find_named_dirs(root: &Path, name: &str, search_depth: usize) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(search_depth + 1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // Do not look inside a match
            e.path()
                .parent()
                .and_then(Path::file_name)
                .map_or(true, |parent| parent != name)
        });

    walker
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir() && e.file_name() == name)
        .map(|e| e.into_path())
        .collect()
}
