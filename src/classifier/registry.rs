//! Classifier registry built from a static factory table.

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use super::builtin::builtin_factories;
use super::Classifier;
use crate::error::Result;
use crate::paths::HostPaths;
use crate::scanner::{Item, SizeProbe};

/// Builds one classifier for a host.
pub type ClassifierFactory = fn(&HostPaths) -> Result<Box<dyn Classifier>>;

/// Registry that owns every known classifier.
///
/// Disabled classifiers stay registered; enablement is decided per scan
/// from the settings map.
pub struct ClassifierRegistry {
    classifiers: Vec<Box<dyn Classifier>>,
}

impl ClassifierRegistry {
    /// A registry with no classifiers.
    pub fn empty() -> Self {
        Self {
            classifiers: Vec::new(),
        }
    }

    /// Registry holding all built-in classifiers.
    pub fn builtin(host: &HostPaths) -> Self {
        Self::discover(host, &builtin_factories())
    }

    /// Build a registry from a factory table.
    ///
    /// A factory that fails, or produces a name that is already registered,
    /// is skipped.
    pub fn discover(host: &HostPaths, factories: &[ClassifierFactory]) -> Self {
        let mut registry = Self::empty();
        for factory in factories {
            match factory(host) {
                Ok(classifier) => {
                    registry.register(classifier);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load classifier");
                }
            }
        }
        tracing::debug!(count = registry.len(), "Classifiers loaded");
        registry
    }

    /// Register a classifier. Returns false if the name is taken.
    pub fn register(&mut self, classifier: Box<dyn Classifier>) -> bool {
        if self.get(classifier.name()).is_some() {
            tracing::warn!(name = classifier.name(), "Duplicate classifier name, skipping");
            return false;
        }
        tracing::info!(name = classifier.name(), "Loaded classifier");
        self.classifiers.push(classifier);
        true
    }

    pub fn classifiers(&self) -> &[Box<dyn Classifier>] {
        &self.classifiers
    }

    /// Get a classifier by name.
    pub fn get(&self, name: &str) -> Option<&dyn Classifier> {
        self.classifiers
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.classifiers.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    /// Names absent from `enabled` count as enabled.
    pub fn is_enabled(name: &str, enabled: &BTreeMap<String, bool>) -> bool {
        enabled.get(name).copied().unwrap_or(true)
    }

    /// Run every enabled classifier and concatenate their items in
    /// registration order.
    ///
    /// Classifiers run in parallel. One that returns an error or panics
    /// contributes nothing; the rest are unaffected.
    pub fn scan_enabled(
        &self,
        enabled: &BTreeMap<String, bool>,
        probe: &dyn SizeProbe,
    ) -> Vec<Item> {
        let active: Vec<&dyn Classifier> = self
            .classifiers
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| {
                let on = Self::is_enabled(c.name(), enabled);
                if !on {
                    tracing::debug!(name = c.name(), "Classifier disabled, skipping");
                }
                on
            })
            .collect();

        let dispatch = tracing::dispatcher::get_default(|d| d.clone());

        let per_classifier: Vec<Vec<Item>> = active
            .par_iter()
            .map(|classifier| {
                tracing::dispatcher::with_default(&dispatch, || run_isolated(*classifier, probe))
            })
            .collect();

        per_classifier.into_iter().flatten().collect()
    }
}

impl Default for ClassifierRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

fn run_isolated(classifier: &dyn Classifier, probe: &dyn SizeProbe) -> Vec<Item> {
    let name = classifier.name();
    match panic::catch_unwind(AssertUnwindSafe(|| classifier.scan(probe))) {
        Ok(Ok(items)) => items,
        Ok(Err(e)) => {
            tracing::error!(classifier = name, error = %e, "Classifier scan failed");
            Vec::new()
        }
        Err(_) => {
            tracing::error!(classifier = name, "Classifier panicked during scan");
            Vec::new()
        }
    }
}
