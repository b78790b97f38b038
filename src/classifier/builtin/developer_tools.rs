//! Package manager and build tool caches.

use std::path::PathBuf;

use crate::classifier::{children_with_prefix, Classifier, KnownPath};
use crate::paths::HostPaths;
use crate::scanner::ExclusionSet;

/// Linuxbrew cellar, where Homebrew keeps Python kegs.
pub(crate) const LINUXBREW_CELLAR: &str = "/home/linuxbrew/.linuxbrew/Cellar";

/// Caches of Yarn, RubyGems, Homebrew, Cargo, Gradle, Maven and Go.
pub struct DeveloperToolsClassifier {
    host: HostPaths,
    cellar: PathBuf,
}

impl DeveloperToolsClassifier {
    pub fn new(host: &HostPaths) -> Self {
        Self {
            host: host.clone(),
            cellar: PathBuf::from(LINUXBREW_CELLAR),
        }
    }
}

impl Classifier for DeveloperToolsClassifier {
    fn name(&self) -> &'static str {
        "developer_tools"
    }

    fn display_name(&self) -> &'static str {
        "Developer Tools"
    }

    fn known_paths(&self) -> Vec<KnownPath> {
        let h = &self.host;
        vec![
            KnownPath::new("Yarn Cache", h.in_home(".cache/yarn")),
            KnownPath::new("Ruby Gems", h.in_home(".gem")),
            KnownPath::new("Homebrew Cache", h.in_home(".cache/Homebrew")),
            KnownPath::new("Cargo Registry", h.in_home(".cargo/registry")),
            KnownPath::new("Gradle Cache", h.in_home(".gradle/caches")),
            KnownPath::new("Maven Repository", h.in_home(".m2/repository")),
            KnownPath::new("Go Build Cache", h.in_home(".cache/go-build")),
        ]
    }

    /// Homebrew Python kegs belong to `python_installs`.
    fn deferred_paths(&self) -> ExclusionSet {
        let mut set = ExclusionSet::new();
        for keg in children_with_prefix(&self.cellar, "python@") {
            set.insert(keg);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{disk_usage, WalkProbe};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_developer_tools_reports_existing_caches() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path();
        fs::create_dir_all(home.join(".cargo/registry/cache")).unwrap();
        fs::write(home.join(".cargo/registry/cache/crate.crate"), vec![b'x'; 8192]).unwrap();
        fs::create_dir_all(home.join(".gradle/caches")).unwrap();

        let classifier = DeveloperToolsClassifier::new(&HostPaths::with_home(home));
        let items = classifier.scan(&WalkProbe::default()).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "Cargo Registry");
        let krate = fs::metadata(home.join(".cargo/registry/cache/crate.crate")).unwrap();
        assert_eq!(items[0].bytes(), disk_usage(&krate));
    }

    #[test]
    fn test_developer_tools_defers_python_kegs() {
        let tmp = TempDir::new().unwrap();
        let cellar = tmp.path().join("Cellar");
        fs::create_dir_all(cellar.join("python@3.12")).unwrap();
        fs::create_dir_all(cellar.join("node")).unwrap();

        let classifier = DeveloperToolsClassifier {
            host: HostPaths::with_home(tmp.path()),
            cellar: cellar.clone(),
        };
        let deferred = classifier.deferred_paths();

        assert!(deferred.is_excluded(&cellar.join("python@3.12/bin")));
        assert!(!deferred.is_excluded(&cellar.join("node")));
    }
}
