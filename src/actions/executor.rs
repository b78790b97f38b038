//! Reveal, trash, clean-folder and undo under the safety rules.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::busy::{BusyProbe, LsofProbe};
use super::critical::CriticalPathSet;
use super::reveal::{Revealer, XdgOpen};
use super::trash::{detect_trash, TrashBin};
use super::undo::UndoLog;
use crate::error::{ReclaimError, Result};
use crate::paths::HostPaths;
use crate::scanner::{Item, SizeProbe};

/// How long to wait for a busy path to be released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

/// Result of cleaning out a folder.
#[derive(Debug)]
pub struct CleanOutcome {
    pub path: PathBuf,
    pub trashed: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, ReclaimError)>,
}

impl CleanOutcome {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Turn any per-child failure into [`ReclaimError::PartialClean`].
    pub fn into_result(self) -> Result<Self> {
        if self.is_partial() {
            Err(ReclaimError::PartialClean {
                path: self.path,
                failed: self.failures.len(),
            })
        } else {
            Ok(self)
        }
    }
}

/// Performs user actions on scan results.
///
/// Destructive actions check, in order: trash availability, the critical
/// path set, then open handles (retried). Nothing is mutated when a check
/// fails.
pub struct ActionExecutor {
    host: HostPaths,
    probe: Arc<dyn SizeProbe>,
    critical: Arc<CriticalPathSet>,
    trash: Box<dyn TrashBin>,
    busy: Box<dyn BusyProbe>,
    revealer: Box<dyn Revealer>,
    retry: RetryPolicy,
    undo: UndoLog,
}

impl ActionExecutor {
    /// Executor using the system's trash, `lsof` and `xdg-open`.
    pub fn new(host: HostPaths, probe: Arc<dyn SizeProbe>) -> Self {
        let trash = detect_trash(host.home());
        let critical = Arc::new(CriticalPathSet::for_host(&host));
        Self {
            host,
            probe,
            critical,
            trash,
            busy: Box::new(LsofProbe),
            revealer: Box::new(XdgOpen),
            retry: RetryPolicy::default(),
            undo: UndoLog::new(),
        }
    }

    pub fn with_trash(mut self, trash: Box<dyn TrashBin>) -> Self {
        self.trash = trash;
        self
    }

    pub fn with_busy_probe(mut self, busy: Box<dyn BusyProbe>) -> Self {
        self.busy = busy;
        self
    }

    pub fn with_revealer(mut self, revealer: Box<dyn Revealer>) -> Self {
        self.revealer = revealer;
        self
    }

    pub fn with_critical(mut self, critical: Arc<CriticalPathSet>) -> Self {
        self.critical = critical;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn host(&self) -> &HostPaths {
        &self.host
    }

    pub fn undo_log(&self) -> &UndoLog {
        &self.undo
    }

    pub fn trash_backend(&self) -> &str {
        self.trash.name()
    }

    /// Show the folder containing `item` in the file manager.
    pub fn open(&self, item: &Item) -> Result<()> {
        let dir = item.path.parent().unwrap_or(item.path.as_path());
        self.revealer.reveal(dir)
    }

    /// Move `target` to the trash and drop it from `items`.
    ///
    /// Returns the trashed path.
    pub fn trash(&mut self, items: &mut Vec<Item>, target: &Item) -> Result<PathBuf> {
        let path = target.path.clone();
        self.check_destructive(&path)?;
        if fs::symlink_metadata(&path).is_err() {
            return Err(ReclaimError::PathNotFound(path));
        }

        self.wait_until_free(&path)?;
        self.trash.trash(&path)?;

        self.undo.push(path.clone());
        items.retain(|item| item.path != path);
        tracing::info!(path = %path.display(), size = %target.size, "Trashed item");
        Ok(path)
    }

    /// Trash every immediate child of the `target` folder, keeping the
    /// folder itself.
    ///
    /// A child that cannot be trashed is recorded and the rest are still
    /// attempted. The folder is then re-measured and its entry in `items`
    /// replaced.
    pub fn clean_folder(&mut self, items: &mut [Item], target: &Item) -> Result<CleanOutcome> {
        let path = target.path.clone();
        self.check_destructive(&path)?;

        match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(ReclaimError::NotADirectory(path)),
            Err(_) => return Err(ReclaimError::PathNotFound(path)),
        }

        let mut children: Vec<PathBuf> = fs::read_dir(&path)
            .map_err(|e| ReclaimError::io(&path, e))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        children.sort();

        let mut outcome = CleanOutcome {
            path: path.clone(),
            trashed: Vec::new(),
            failures: Vec::new(),
        };

        for child in children {
            let result = self
                .wait_until_free(&child)
                .and_then(|()| self.trash.trash(&child));
            match result {
                Ok(()) => {
                    self.undo.push(child.clone());
                    outcome.trashed.push(child);
                }
                Err(e) => {
                    tracing::warn!(path = %child.display(), error = %e, "Failed to trash item");
                    outcome.failures.push((child, e));
                }
            }
        }

        let size = self.probe.measure(&path);
        if let Some(slot) = items.iter_mut().find(|item| item.path == path) {
            *slot = slot.with_size(size);
        }

        tracing::info!(
            path = %path.display(),
            trashed = outcome.trashed.len(),
            failed = outcome.failures.len(),
            "Cleaned folder"
        );
        Ok(outcome)
    }

    /// Take the most recent trashed path off the undo log and open the
    /// trash folder so it can be restored.
    ///
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<Option<PathBuf>> {
        if self.undo.is_empty() {
            return Ok(None);
        }
        self.revealer.reveal(&self.trash.location())?;
        Ok(self.undo.pop())
    }

    fn check_destructive(&self, path: &Path) -> Result<()> {
        if !self.trash.is_available() {
            return Err(ReclaimError::TrashUnavailable(format!(
                "'{}' backend is not installed",
                self.trash.name()
            )));
        }
        if self.critical.contains(path) {
            tracing::warn!(path = %path.display(), "Refusing to modify critical path");
            return Err(ReclaimError::CriticalPath(path.to_path_buf()));
        }
        Ok(())
    }

    fn wait_until_free(&self, path: &Path) -> Result<()> {
        for attempt in 1..=self.retry.attempts {
            if !self.busy.is_busy(path) {
                return Ok(());
            }
            tracing::warn!(path = %path.display(), attempt, "Path in use, retrying");
            if attempt < self.retry.attempts {
                thread::sleep(self.retry.delay);
            }
        }
        Err(ReclaimError::BusyFile {
            path: path.to_path_buf(),
            attempts: self.retry.attempts,
        })
    }
}
