use serde::Serialize;
use std::path::{Path, PathBuf};

use super::probe::SizeProbe;
use super::size::Size;
use crate::paths::display_name;

/// A discovered candidate for cleanup.
///
/// Items are never mutated after a scan produces them; actions remove or
/// replace them in the live result list instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Grouping label (e.g. "Pip Cache").
    pub category: String,

    /// Display name, normally the base name of `path`
    pub name: String,

    /// Name shown in the list view
    pub short_name: String,

    /// Absolute path
    pub path: PathBuf,

    /// Size measured when the item was created
    pub size: Size,
}

impl Item {
    pub fn new(category: impl Into<String>, path: impl Into<PathBuf>, size: Size) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self {
            category: category.into(),
            short_name: name.clone(),
            name,
            path,
            size,
        }
    }

    /// Measure `path` and build an item, or `None` if it is empty or
    /// inaccessible.
    pub fn measured(category: &str, path: &Path, probe: &dyn SizeProbe) -> Option<Self> {
        let size = probe.measure(path);
        if size.is_zero() {
            tracing::debug!(path = %path.display(), "Empty or inaccessible path");
            return None;
        }
        Some(Self::new(category, path, size))
    }

    pub fn bytes(&self) -> u64 {
        self.size.bytes
    }

    /// Same item with a freshly measured size.
    pub fn with_size(&self, size: Size) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }
}
