//! npm caches and `node_modules` trees.

use crate::classifier::{find_named_dirs, measure_known_paths, Classifier, KnownPath};
use crate::error::Result;
use crate::paths::HostPaths;
use crate::scanner::{Item, SizeProbe};

const NODE_MODULES_SEARCH_DEPTH: usize = 3;

/// npm caches plus `node_modules` directories near the top of home.
pub struct NodeClassifier {
    host: HostPaths,
}

impl NodeClassifier {
    pub fn new(host: &HostPaths) -> Self {
        Self { host: host.clone() }
    }
}

impl Classifier for NodeClassifier {
    fn name(&self) -> &'static str {
        "nodejs"
    }

    fn display_name(&self) -> &'static str {
        "Node.js"
    }

    fn known_paths(&self) -> Vec<KnownPath> {
        vec![
            KnownPath::new("NPM Cache", self.host.in_home(".npm")),
            KnownPath::new("NPM Cache", self.host.in_home(".cache/npm")),
        ]
    }

    fn scan(&self, probe: &dyn SizeProbe) -> Result<Vec<Item>> {
        tracing::info!("Starting Node.js classifier scan");
        let mut items =
            measure_known_paths(self.name(), self.known_paths(), &self.deferred_paths(), probe);

        for path in find_named_dirs(self.host.home(), "node_modules", NODE_MODULES_SEARCH_DEPTH) {
            if let Some(item) = Item::measured("Node.js Cache", &path, probe) {
                tracing::info!(path = %path.display(), size = %item.size, "Found node_modules");
                items.push(item);
            }
        }

        tracing::info!(count = items.len(), "Node.js classifier scan completed");
        Ok(items)
    }
}
