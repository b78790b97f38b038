//! Paths that destructive actions must never touch.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::{normalize, HostPaths};

const HOME_CRITICAL: &[&str] = &[
    "Documents",
    "Desktop",
    "Downloads",
    "Pictures",
    "Music",
    "Videos",
    ".config",
    ".local",
    ".local/share",
    ".local/share/Trash",
];

const SYSTEM_CRITICAL: &[&str] = &[
    "/", "/bin", "/boot", "/dev", "/etc", "/home", "/lib", "/opt", "/proc", "/root", "/sbin",
    "/srv", "/sys", "/usr", "/var",
];

/// Fixed set of protected paths.
///
/// Membership is exact: a child of a protected directory is not itself
/// protected.
#[derive(Debug, Clone)]
pub struct CriticalPathSet {
    paths: HashSet<PathBuf>,
}

impl CriticalPathSet {
    /// The home directory, its well-known user folders and the top-level
    /// system directories.
    pub fn for_host(host: &HostPaths) -> Self {
        let mut paths: HashSet<PathBuf> = SYSTEM_CRITICAL.iter().map(PathBuf::from).collect();
        paths.insert(host.home().to_path_buf());
        paths.extend(HOME_CRITICAL.iter().map(|rel| host.in_home(rel)));
        Self { paths }
    }

    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            paths: paths.into_iter().map(|p| normalize(p.as_ref())).collect(),
        }
    }

    /// True if `path`, or the path it resolves to, is protected.
    pub fn contains(&self, path: &Path) -> bool {
        if self.paths.contains(&normalize(path)) {
            return true;
        }
        match fs::canonicalize(path) {
            Ok(real) => self.paths.contains(&real),
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
