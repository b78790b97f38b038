//! System and folder scans.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::exclusion::ExclusionSet;
use super::item::Item;
use super::probe::SizeProbe;
use super::walker::FolderWalker;
use crate::classifier::ClassifierRegistry;
use crate::paths::HostPaths;

/// Share of the system-scan progress bar given to the fixed roots.
const SYSTEM_ROOTS_SHARE: f64 = 50.0;

/// A progress report from a running scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanProgress {
    pub label: String,
    /// 0.0 to 100.0
    pub percent: f64,
}

impl ScanProgress {
    pub fn new(label: impl Into<String>, percent: f64) -> Self {
        Self {
            label: label.into(),
            percent,
        }
    }
}

/// A directory always measured by a system scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemRoot {
    pub category: &'static str,
    pub path: PathBuf,
}

impl SystemRoot {
    pub fn new(category: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            category,
            path: path.into(),
        }
    }

    /// User cache, system temp, system logs and user logs.
    pub fn defaults(host: &HostPaths) -> Vec<Self> {
        vec![
            Self::new("User Cache", host.in_home(".cache")),
            Self::new("System Temp", "/tmp"),
            Self::new("Logs", "/var/log"),
            Self::new("User Logs", host.in_home(".local/state")),
        ]
    }
}

/// Runs scans against the filesystem.
///
/// The engine is immutable once built and is shared with scan workers
/// through an `Arc`.
pub struct ScanEngine {
    host: HostPaths,
    probe: Arc<dyn SizeProbe>,
    registry: Arc<ClassifierRegistry>,
    system_roots: Vec<SystemRoot>,
    enabled: BTreeMap<String, bool>,
}

impl ScanEngine {
    pub fn new(
        host: HostPaths,
        probe: Arc<dyn SizeProbe>,
        registry: Arc<ClassifierRegistry>,
    ) -> Self {
        let system_roots = SystemRoot::defaults(&host);
        Self {
            host,
            probe,
            registry,
            system_roots,
            enabled: BTreeMap::new(),
        }
    }

    pub fn with_system_roots(mut self, roots: Vec<SystemRoot>) -> Self {
        self.system_roots = roots;
        self
    }

    /// Classifier enablement map (absent names are enabled).
    pub fn with_enabled(mut self, enabled: BTreeMap<String, bool>) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn host(&self) -> &HostPaths {
        &self.host
    }

    pub fn probe(&self) -> &dyn SizeProbe {
        self.probe.as_ref()
    }

    pub fn registry(&self) -> &ClassifierRegistry {
        &self.registry
    }

    /// Measure the fixed system roots, then run every enabled classifier.
    ///
    /// Progress reaches 50 once the roots are done and ends with a single
    /// 100 event. Excluded paths are dropped, as are repeats of a path
    /// already reported.
    pub fn scan_system(
        &self,
        exclusions: &ExclusionSet,
        mut progress: impl FnMut(ScanProgress),
    ) -> Vec<Item> {
        tracing::info!(roots = self.system_roots.len(), "Starting system scan");
        let mut items = Vec::new();
        let total = self.system_roots.len();

        for (i, root) in self.system_roots.iter().enumerate() {
            if !exclusions.is_excluded(&root.path) {
                if let Some(item) = Item::measured(root.category, &root.path, self.probe()) {
                    tracing::info!(
                        category = root.category,
                        path = %item.path.display(),
                        size = %item.size,
                        "Found item"
                    );
                    items.push(item);
                }
            }
            let percent = (i + 1) as f64 / total as f64 * SYSTEM_ROOTS_SHARE;
            progress(ScanProgress::new(format!("Scanned {}", root.category), percent));
        }

        let found = self.registry.scan_enabled(&self.enabled, self.probe());
        items.extend(
            found
                .into_iter()
                .filter(|item| !exclusions.is_excluded(&item.path)),
        );

        let items = dedup_paths(items);
        progress(ScanProgress::new("Scan complete", 100.0));
        tracing::info!(items = items.len(), "System scan completed");
        items
    }

    /// Walk `root` down to `max_depth`, reporting every non-empty
    /// subdirectory.
    ///
    /// `~` is expanded and relative roots are taken from the current
    /// directory. A root that is not a directory, or is excluded, yields
    /// nothing. The registry is not consulted.
    pub fn scan_folder(
        &self,
        root: &Path,
        max_depth: usize,
        exclusions: &ExclusionSet,
        mut progress: impl FnMut(ScanProgress),
    ) -> Vec<Item> {
        let root = self.host.resolve(root);
        tracing::info!(root = %root.display(), max_depth, "Starting folder scan");

        if !root.is_dir() {
            tracing::warn!(path = %root.display(), "Not a directory, nothing to scan");
            progress(ScanProgress::new("Scan complete", 100.0));
            return Vec::new();
        }
        if exclusions.is_excluded(&root) {
            progress(ScanProgress::new("Scan complete", 100.0));
            return Vec::new();
        }

        let category = if root == self.host.home() {
            "Home Folder"
        } else {
            "Subfolder"
        };

        let mut walker = FolderWalker::new(self.probe(), exclusions, category, max_depth);
        walker.walk(&root, &mut progress)
    }
}

/// Keep the first item for each path.
fn dedup_paths(items: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.path.clone());
            if !fresh {
                tracing::debug!(path = %item.path.display(), "Dropping duplicate path");
            }
            fresh
        })
        .collect()
}
