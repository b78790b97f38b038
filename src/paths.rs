//! Home-directory expansion and lexical path normalization.

use std::path::{Component, Path, PathBuf};

use crate::error::{ReclaimError, Result};

/// Well-known locations of the host the scan runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPaths {
    home: PathBuf,
}

impl HostPaths {
    /// Detect the current user's home directory.
    pub fn detect() -> Result<Self> {
        dirs::home_dir()
            .map(Self::with_home)
            .ok_or(ReclaimError::HomeNotFound)
    }

    /// Use an explicit home directory (tests, sandboxes).
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: normalize(&home.into()),
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Join a home-relative path.
    pub fn in_home(&self, relative: &str) -> PathBuf {
        self.home.join(relative)
    }

    /// Expand a leading `~` and normalize the result.
    pub fn expand(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        let expanded = match path.strip_prefix("~") {
            Ok(rest) => self.home.join(rest),
            Err(_) => path.to_path_buf(),
        };
        normalize(&expanded)
    }

    /// Expand, then anchor relative paths at the current directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let expanded = self.expand(path);
        if expanded.is_absolute() {
            return expanded;
        }
        match std::env::current_dir() {
            Ok(cwd) => normalize(&cwd.join(expanded)),
            Err(_) => expanded,
        }
    }
}

/// Lexically normalize a path: drops `.`, resolves `..` against the
/// preceding component and strips trailing separators. Symlinks are not
/// consulted.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Base name of a path as a display string.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
