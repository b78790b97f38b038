//! Showing paths in the desktop file manager.

use std::path::Path;
use std::process::{Command, Stdio};

use super::trash::find_binary;
use crate::error::{ReclaimError, Result};

/// Opens a folder for the user.
pub trait Revealer: Send + Sync {
    fn reveal(&self, dir: &Path) -> Result<()>;
}

/// `xdg-open`, detached.
#[derive(Debug, Default, Clone)]
pub struct XdgOpen;

impl Revealer for XdgOpen {
    fn reveal(&self, dir: &Path) -> Result<()> {
        let binary = find_binary("xdg-open").ok_or_else(|| ReclaimError::Command {
            program: "xdg-open".into(),
            message: "not found".into(),
        })?;

        Command::new(binary)
            .arg(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ReclaimError::io(dir, e))?;

        tracing::info!(path = %dir.display(), "Opened in file manager");
        Ok(())
    }
}
