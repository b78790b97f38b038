//! Generic system and user caches, logs and crash reports.

use crate::classifier::{Classifier, KnownPath};
use crate::paths::HostPaths;
use crate::scanner::ExclusionSet;

/// Broad cache and log locations.
///
/// Paths owned by the tool-specific classifiers are deferred so the same
/// directory is not reported twice.
pub struct SystemCleanupClassifier {
    host: HostPaths,
}

impl SystemCleanupClassifier {
    pub fn new(host: &HostPaths) -> Self {
        Self { host: host.clone() }
    }
}

impl Classifier for SystemCleanupClassifier {
    fn name(&self) -> &'static str {
        "system_cleanup"
    }

    fn display_name(&self) -> &'static str {
        "System Cleanup"
    }

    fn known_paths(&self) -> Vec<KnownPath> {
        let h = &self.host;
        vec![
            KnownPath::new("System Cache", "/var/cache"),
            KnownPath::new("User Cache", h.in_home(".cache")),
            KnownPath::new("System Logs", "/var/log"),
            KnownPath::new("User Logs", h.in_home(".local/state")),
            KnownPath::new("Crash Reports", "/var/crash"),
            KnownPath::new("Session Log", h.in_home(".xsession-errors")),
        ]
    }

    fn deferred_paths(&self) -> ExclusionSet {
        ExclusionSet::from_paths(
            &self.host,
            [
                "~/.cache/pip",
                "~/.npm",
                "~/.cache/npm",
                "~/.cache/yarn",
                "~/.cache/Homebrew",
                "~/.cache/go-build",
                "~/.cache/lm-studio",
                "~/.cache/llama.cpp",
                "~/.cache/vllm",
                "~/.cache/huggingface",
                "~/.ollama",
                "~/.localai",
            ],
        )
    }
}
