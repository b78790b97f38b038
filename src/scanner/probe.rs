//! Recursive size measurement.

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

use super::size::{disk_usage, Size};

/// Default bound on a single measurement.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Computes the recursive on-disk size of a path.
///
/// Implementations never fail: a missing path, an unreadable root or a
/// measurement that exceeds its timeout all produce [`Size::zero`].
/// Symbolic links are never followed.
pub trait SizeProbe: Send + Sync {
    fn measure(&self, path: &Path) -> Size;
}

/// In-process walk summing allocated file blocks, like `du`.
///
/// Sparse files count only what is allocated, and a file reachable through
/// several hard links inside the walked tree counts once.
#[derive(Debug, Clone)]
pub struct WalkProbe {
    timeout: Duration,
}

impl WalkProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for WalkProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl SizeProbe for WalkProbe {
    fn measure(&self, path: &Path) -> Size {
        let root_meta = match fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Path does not exist");
                return Size::zero();
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to get size");
                return Size::zero();
            }
        };

        if root_meta.file_type().is_symlink() {
            return Size::zero();
        }
        if root_meta.is_file() {
            return Size::from_bytes(disk_usage(&root_meta));
        }

        if let Err(e) = fs::read_dir(path) {
            tracing::error!(path = %path.display(), error = %e, "Failed to get size");
            return Size::zero();
        }

        let deadline = Instant::now() + self.timeout;
        let mut total = 0u64;
        let mut linked: HashSet<(u64, u64)> = HashSet::new();

        let walker = WalkDir::new(path)
            .follow_links(false)
            .follow_root_links(false);

        for result in walker {
            if Instant::now() >= deadline {
                tracing::warn!(
                    path = %path.display(),
                    timeout_secs = self.timeout.as_secs(),
                    "Size measurement timed out"
                );
                return Size::zero();
            }

            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!(error = %err, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            if meta.nlink() > 1 && !linked.insert((meta.dev(), meta.ino())) {
                continue;
            }
            total += disk_usage(&meta);
        }

        Size::from_bytes(total)
    }
}

/// Shells out to `du -sh` and keeps its label.
#[derive(Debug, Clone)]
pub struct DuProbe {
    timeout: Duration,
}

impl DuProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn run(&self, path: &Path) -> std::io::Result<Option<String>> {
        let mut child = Command::new("du")
            .arg("-sh")
            .arg(path)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let deadline = Instant::now() + self.timeout;
        loop {
            if child.try_wait()?.is_some() {
                break;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(None);
            }
            thread::sleep(Duration::from_millis(20));
        }

        let mut stdout = String::new();
        if let Some(mut out) = child.stdout.take() {
            out.read_to_string(&mut stdout)?;
        }
        Ok(Some(stdout))
    }
}

impl Default for DuProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl SizeProbe for DuProbe {
    fn measure(&self, path: &Path) -> Size {
        if fs::symlink_metadata(path).is_err() {
            tracing::warn!(path = %path.display(), "Path does not exist");
            return Size::zero();
        }

        match self.run(path) {
            Ok(Some(stdout)) => {
                let label = stdout.split('\t').next().unwrap_or("").trim();
                if label.is_empty() {
                    Size::zero()
                } else {
                    Size::from_label(label)
                }
            }
            Ok(None) => {
                tracing::warn!(
                    path = %path.display(),
                    timeout_secs = self.timeout.as_secs(),
                    "Size measurement timed out"
                );
                Size::zero()
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to get size");
                Size::zero()
            }
        }
    }
}

/// Build the probe named in the settings (`walk` or `du`).
pub fn probe_by_name(name: &str, timeout: Duration) -> Box<dyn SizeProbe> {
    match name {
        "du" => Box::new(DuProbe::new(timeout)),
        _ => Box::new(WalkProbe::new(timeout)),
    }
}
