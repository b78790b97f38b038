//! Side-by-side Python interpreter installs.

use std::path::PathBuf;

use crate::classifier::{children_with_prefix, Classifier, KnownPath};
use crate::paths::HostPaths;

use super::developer_tools::LINUXBREW_CELLAR;

/// pyenv, uv and conda installs plus system-local and Homebrew Pythons.
pub struct PythonInstallsClassifier {
    host: HostPaths,
    local_lib: PathBuf,
    cellar: PathBuf,
}

impl PythonInstallsClassifier {
    pub fn new(host: &HostPaths) -> Self {
        Self {
            host: host.clone(),
            local_lib: PathBuf::from("/usr/local/lib"),
            cellar: PathBuf::from(LINUXBREW_CELLAR),
        }
    }
}

impl Classifier for PythonInstallsClassifier {
    fn name(&self) -> &'static str {
        "python_installs"
    }

    fn display_name(&self) -> &'static str {
        "Python Installs"
    }

    fn known_paths(&self) -> Vec<KnownPath> {
        let h = &self.host;
        let mut paths = vec![
            KnownPath::new("Pyenv Install", h.in_home(".pyenv/versions")),
            KnownPath::new("uv Python", h.in_home(".local/share/uv/python")),
            KnownPath::new("Conda Packages", h.in_home("miniconda3/pkgs")),
            KnownPath::new("Conda Packages", h.in_home("anaconda3/pkgs")),
        ];
        paths.extend(
            children_with_prefix(&self.local_lib, "python3")
                .into_iter()
                .map(|p| KnownPath::new("Local Python", p)),
        );
        paths.extend(
            children_with_prefix(&self.cellar, "python@")
                .into_iter()
                .map(|p| KnownPath::new("Homebrew Python", p)),
        );
        paths
    }
}
