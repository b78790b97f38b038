//! Freedesktop trash backends.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{ReclaimError, Result};

/// A way to move paths to the user's trash.
pub trait TrashBin: Send + Sync {
    /// Backend name, for logs and errors
    fn name(&self) -> &'static str;

    /// Check if this backend can be used on the current system
    fn is_available(&self) -> bool;

    /// Move `path` to the trash.
    fn trash(&self, path: &Path) -> Result<()>;

    /// Folder the trashed files end up in.
    fn location(&self) -> PathBuf;
}

/// Directory holding trashed files for a home directory.
pub fn trash_files_dir(home: &Path) -> PathBuf {
    match std::env::var_os("XDG_DATA_HOME") {
        Some(data) if !data.is_empty() => PathBuf::from(data).join("Trash/files"),
        _ => home.join(".local/share/Trash/files"),
    }
}

/// Resolve a program on PATH.
pub(crate) fn find_binary(program: &str) -> Option<String> {
    for dir in ["/usr/bin", "/bin"] {
        let candidate = Path::new(dir).join(program);
        if candidate.exists() {
            return Some(candidate.to_string_lossy().into_owned());
        }
    }

    let on_path = Command::new("which")
        .arg(program)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    on_path.then(|| program.to_string())
}

fn run_trash_command(program: &str, args: &[&str], path: &Path) -> Result<()> {
    let binary = find_binary(program)
        .ok_or_else(|| ReclaimError::TrashUnavailable(format!("{} not found", program)))?;

    let output = Command::new(binary)
        .args(args)
        .arg(path)
        .output()
        .map_err(|e| ReclaimError::io(path, e))?;

    if output.status.success() {
        tracing::info!(path = %path.display(), backend = program, "Moved to trash");
        Ok(())
    } else {
        Err(ReclaimError::Command {
            program: program.to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// `gio trash`, from GLib.
pub struct GioTrash {
    home: PathBuf,
}

impl GioTrash {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }
}

impl TrashBin for GioTrash {
    fn name(&self) -> &'static str {
        "gio"
    }

    fn is_available(&self) -> bool {
        find_binary("gio").is_some()
    }

    fn trash(&self, path: &Path) -> Result<()> {
        run_trash_command("gio", &["trash", "--"], path)
    }

    fn location(&self) -> PathBuf {
        trash_files_dir(&self.home)
    }
}

/// `trash-put`, from trash-cli.
pub struct TrashPut {
    home: PathBuf,
}

impl TrashPut {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }
}

impl TrashBin for TrashPut {
    fn name(&self) -> &'static str {
        "trash-put"
    }

    fn is_available(&self) -> bool {
        find_binary("trash-put").is_some()
    }

    fn trash(&self, path: &Path) -> Result<()> {
        run_trash_command("trash-put", &["--"], path)
    }

    fn location(&self) -> PathBuf {
        trash_files_dir(&self.home)
    }
}

/// Placeholder used when no backend is installed; always unavailable.
pub struct NoTrash;

impl TrashBin for NoTrash {
    fn name(&self) -> &'static str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn trash(&self, _path: &Path) -> Result<()> {
        Err(ReclaimError::TrashUnavailable(
            "install gio (glib2) or trash-cli".into(),
        ))
    }

    fn location(&self) -> PathBuf {
        PathBuf::new()
    }
}

/// First available backend: gio, then trash-put.
pub fn detect_trash(home: &Path) -> Box<dyn TrashBin> {
    let candidates: Vec<Box<dyn TrashBin>> =
        vec![Box::new(GioTrash::new(home)), Box::new(TrashPut::new(home))];

    for backend in candidates {
        if backend.is_available() {
            tracing::debug!(backend = backend.name(), "Using trash backend");
            return backend;
        }
    }

    tracing::warn!("No trash backend found");
    Box::new(NoTrash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_trash_is_unavailable() {
        let none = NoTrash;
        assert!(!none.is_available());
        let err = none.trash(Path::new("/tmp/x")).unwrap_err();
        assert!(matches!(err, ReclaimError::TrashUnavailable(_)));
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(GioTrash::new("/h").name(), "gio");
        assert_eq!(TrashPut::new("/h").name(), "trash-put");
    }

    #[test]
    fn test_find_binary_missing() {
        assert!(find_binary("definitely-not-a-real-binary-xyz").is_none());
    }
}
