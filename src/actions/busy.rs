//! Open-file detection.

use std::path::Path;
use std::process::{Command, Stdio};

use super::trash::find_binary;

/// Tells whether another process holds a path open.
pub trait BusyProbe: Send + Sync {
    fn is_busy(&self, path: &Path) -> bool;
}

/// Asks `lsof`. Without `lsof` nothing is considered busy.
#[derive(Debug, Default, Clone)]
pub struct LsofProbe;

impl BusyProbe for LsofProbe {
    fn is_busy(&self, path: &Path) -> bool {
        let Some(lsof) = find_binary("lsof") else {
            tracing::debug!("lsof not available, assuming not busy");
            return false;
        };

        // lsof exits 0 when at least one process has the file open
        match Command::new(lsof)
            .arg("--")
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to run lsof");
                false
            }
        }
    }
}
