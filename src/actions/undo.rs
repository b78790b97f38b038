use std::path::{Path, PathBuf};

/// Paths moved to the trash this session, most recent last.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    entries: Vec<PathBuf>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: PathBuf) {
        self.entries.push(path);
    }

    pub fn pop(&mut self) -> Option<PathBuf> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&Path> {
        self.entries.last().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
