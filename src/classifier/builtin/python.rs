//! Python caches and history files.

use crate::classifier::{find_named_dirs, measure_known_paths, Classifier, KnownPath};
use crate::error::Result;
use crate::paths::HostPaths;
use crate::scanner::{Item, SizeProbe};

/// How many levels below home are searched for `__pycache__`.
const PYCACHE_SEARCH_DEPTH: usize = 3;

/// Pip's cache, interpreter history and stray `__pycache__` directories.
pub struct PythonClassifier {
    host: HostPaths,
}

impl PythonClassifier {
    pub fn new(host: &HostPaths) -> Self {
        Self { host: host.clone() }
    }
}

impl Classifier for PythonClassifier {
    fn name(&self) -> &'static str {
        "python"
    }

    fn display_name(&self) -> &'static str {
        "Python"
    }

    fn known_paths(&self) -> Vec<KnownPath> {
        let h = &self.host;
        vec![
            KnownPath::new("Pip Cache", h.in_home(".cache/pip")),
            KnownPath::new("Python History", h.in_home(".python_history")),
            KnownPath::new(
                "IPython History",
                h.in_home(".ipython/profile_default/history.sqlite"),
            ),
        ]
    }

    fn scan(&self, probe: &dyn SizeProbe) -> Result<Vec<Item>> {
        tracing::info!("Starting Python classifier scan");
        let mut items =
            measure_known_paths(self.name(), self.known_paths(), &self.deferred_paths(), probe);

        for path in find_named_dirs(self.host.home(), "__pycache__", PYCACHE_SEARCH_DEPTH) {
            if let Some(item) = Item::measured("Python Cache", &path, probe) {
                tracing::info!(path = %path.display(), size = %item.size, "Found __pycache__");
                items.push(item);
            }
        }

        tracing::info!(count = items.len(), "Python classifier scan completed");
        Ok(items)
    }
}
