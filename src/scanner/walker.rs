//! Bounded-depth folder walk.

use std::fs;
use std::path::{Path, PathBuf};

use super::engine::ScanProgress;
use super::exclusion::ExclusionSet;
use super::item::Item;
use super::probe::SizeProbe;

/// Walks directories below a root, pre-order and in name order, measuring
/// every subdirectory down to `max_depth`.
///
/// Depth 1 is the root's immediate children. Files and symbolic links are
/// never reported or descended into.
pub struct FolderWalker<'a> {
    probe: &'a dyn SizeProbe,
    exclusions: &'a ExclusionSet,
    category: &'a str,
    max_depth: usize,
    visited: usize,
}

impl<'a> FolderWalker<'a> {
    pub fn new(
        probe: &'a dyn SizeProbe,
        exclusions: &'a ExclusionSet,
        category: &'a str,
        max_depth: usize,
    ) -> Self {
        Self {
            probe,
            exclusions,
            category,
            max_depth,
            visited: 0,
        }
    }

    /// Number of directories measured so far.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Walk `root` and return the non-empty directories found.
    ///
    /// The last progress event is always 100.
    pub fn walk(&mut self, root: &Path, progress: &mut dyn FnMut(ScanProgress)) -> Vec<Item> {
        let mut items = Vec::new();
        let mut stack: Vec<(PathBuf, usize)> = Vec::new();

        self.expand(root, 1, &mut stack);

        while let Some((path, depth)) = stack.pop() {
            self.visited += 1;
            // One percent per directory, held below 100 until the walk ends
            let percent = (self.visited as f64).min(99.0);
            progress(ScanProgress::new(format!("Scanning {}", path.display()), percent));

            if let Some(item) = Item::measured(self.category, &path, self.probe) {
                tracing::debug!(path = %path.display(), size = %item.size, depth, "Found folder");
                items.push(item);
            }
            self.expand(&path, depth + 1, &mut stack);
        }

        progress(ScanProgress::new("Scan complete", 100.0));
        tracing::info!(
            root = %root.display(),
            items = items.len(),
            visited = self.visited,
            "Folder scan completed"
        );
        items
    }

    /// List `dir` and push its subdirectories (at `child_depth`) so that
    /// they pop in name order.
    fn expand(&self, dir: &Path, child_depth: usize, stack: &mut Vec<(PathBuf, usize)>) {
        if child_depth > self.max_depth {
            return;
        }

        let mut children = match list_subdirs(dir) {
            Ok(children) => children,
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "Error scanning directory");
                return;
            }
        };
        children.retain(|child| !self.exclusions.is_excluded(child));
        children.sort();

        stack.extend(children.into_iter().rev().map(|c| (c, child_depth)));
    }
}

fn list_subdirs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(path = %dir.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        // file_type() does not follow symlinks
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => dirs.push(entry.path()),
            _ => {}
        }
    }
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::WalkProbe;
    use tempfile::TempDir;

    fn write(path: &Path, len: usize) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![b'x'; len]).unwrap();
    }

    fn walk(root: &Path, depth: usize, exclusions: &ExclusionSet) -> (Vec<Item>, Vec<f64>) {
        let probe = WalkProbe::default();
        let mut percents = Vec::new();
        let mut walker = FolderWalker::new(&probe, exclusions, "Subfolder", depth);
        let items = walker.walk(root, &mut |p| percents.push(p.percent));
        (items, percents)
    }

    #[test]
    fn test_walk_preorder_name_sorted() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("b/inner/f"), 10);
        write(&tmp.path().join("a/f"), 10);
        write(&tmp.path().join("c/f"), 10);

        let (items, _) = walk(tmp.path(), 2, &ExclusionSet::new());
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();

        assert_eq!(names, vec!["a", "b", "inner", "c"]);
    }

    #[test]
    fn test_walk_respects_max_depth() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("one/two/three/f"), 10);

        let (items, _) = walk(tmp.path(), 1, &ExclusionSet::new());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "one");

        let (items, _) = walk(tmp.path(), 3, &ExclusionSet::new());
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_walk_skips_files_empty_dirs_and_symlinks() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("loose.bin"), 100);
        write(&tmp.path().join("full/f"), 100);
        fs::create_dir(tmp.path().join("empty")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("full"), tmp.path().join("link")).unwrap();

        let (items, _) = walk(tmp.path(), 3, &ExclusionSet::new());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "full");
    }

    #[test]
    fn test_walk_skips_excluded_subtree() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("keep/f"), 10);
        write(&tmp.path().join("skip/deep/f"), 10);

        let mut exclusions = ExclusionSet::new();
        exclusions.insert(tmp.path().join("skip"));
        let (items, _) = walk(tmp.path(), 3, &exclusions);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "keep");
    }

    #[test]
    fn test_walk_progress_ends_at_100() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("a/f"), 10);

        let (_, percents) = walk(tmp.path(), 2, &ExclusionSet::new());
        assert_eq!(percents.last().copied(), Some(100.0));
        assert!(percents[..percents.len() - 1].iter().all(|p| *p <= 99.0));
    }

    #[test]
    fn test_walk_progress_counts_every_directory() {
        let tmp = TempDir::new().unwrap();
        for i in 0..5 {
            write(&tmp.path().join(format!("d{i}/inner/f")), 10);
        }

        let (items, percents) = walk(tmp.path(), 1, &ExclusionSet::new());
        assert_eq!(items.len(), 5);
        assert_eq!(percents, vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);

        let (items, percents) = walk(tmp.path(), 2, &ExclusionSet::new());
        assert_eq!(items.len(), 10);
        assert_eq!(percents.len(), 11);
    }

    #[test]
    fn test_walk_progress_clamps_below_100() {
        let tmp = TempDir::new().unwrap();
        for i in 0..120 {
            fs::create_dir(tmp.path().join(format!("d{i:03}"))).unwrap();
        }

        let (items, percents) = walk(tmp.path(), 1, &ExclusionSet::new());
        assert!(items.is_empty());
        assert_eq!(percents.len(), 121);
        assert_eq!(percents[98], 99.0);
        assert_eq!(percents[119], 99.0);
        assert_eq!(percents[120], 100.0);
    }
}
