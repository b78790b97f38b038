//! Classifiers: pluggable knowledge of where reclaimable data lives.

pub mod builtin;
#[allow(clippy::module_inception)]
mod classifier;
mod registry;

pub use builtin::builtin_factories;
pub use classifier::{children_with_prefix, find_named_dirs, measure_known_paths, Classifier, KnownPath};
pub use registry::{ClassifierFactory, ClassifierRegistry};
