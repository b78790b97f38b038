//! Integration tests for the scan engine and background sessions

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusty_reclaim::classifier::{Classifier, ClassifierRegistry, KnownPath};
use rusty_reclaim::error::{ReclaimError, Result};
use rusty_reclaim::paths::HostPaths;
use rusty_reclaim::scanner::{
    ExclusionSet, Item, ScanEngine, ScanMessage, ScanRequest, ScanSession, Size, SizeProbe,
    SystemRoot, WalkProbe,
};
use rusty_reclaim::view::{self, FilterParams, SizeBucket};
use tempfile::TempDir;
use walkdir::WalkDir;

const MIB: u64 = 1024 * 1024;

/// Write `kib` kibibytes of real data.
fn fill(path: &Path, kib: usize) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, vec![b'x'; kib * 1024]).unwrap();
}

/// Create a sparse file of `mb` megabytes. Only [`LengthProbe`] sees its size.
fn sparse(path: &Path, mb: u64) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    File::create(path).unwrap().set_len(mb * MIB).unwrap();
}

/// Sums apparent file lengths, so sparse files can stand in for folders
/// of hundreds of megabytes.
struct LengthProbe;

impl SizeProbe for LengthProbe {
    fn measure(&self, path: &Path) -> Size {
        let bytes = WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.metadata().ok())
            .map(|meta| meta.len())
            .sum();
        Size::from_bytes(bytes)
    }
}

fn engine_with(
    home: &Path,
    registry: ClassifierRegistry,
    probe: Arc<dyn SizeProbe>,
) -> ScanEngine {
    ScanEngine::new(HostPaths::with_home(home), probe, Arc::new(registry))
        .with_system_roots(Vec::new())
}

fn engine(home: &Path, registry: ClassifierRegistry) -> ScanEngine {
    engine_with(home, registry, Arc::new(WalkProbe::default()))
}

/// Reports fixed paths under one category.
struct FixedPaths {
    name: &'static str,
    category: &'static str,
    paths: Vec<PathBuf>,
}

impl Classifier for FixedPaths {
    fn name(&self) -> &'static str {
        self.name
    }

    fn display_name(&self) -> &'static str {
        self.category
    }

    fn known_paths(&self) -> Vec<KnownPath> {
        self.paths
            .iter()
            .map(|p| KnownPath::new(self.category, p.clone()))
            .collect()
    }
}

struct Broken;

impl Classifier for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn display_name(&self) -> &'static str {
        "Broken"
    }

    fn known_paths(&self) -> Vec<KnownPath> {
        Vec::new()
    }

    fn scan(&self, _probe: &dyn SizeProbe) -> Result<Vec<Item>> {
        Err(ReclaimError::Classifier {
            name: "broken".into(),
            message: "cannot read state".into(),
        })
    }
}

#[test]
fn test_medium_filter_over_mixed_sizes() {
    let home = TempDir::new().unwrap();
    let vms = home.path().join("VirtualBox VMs");
    let npm = home.path().join(".npm");
    let pip = home.path().join(".cache/pip");
    sparse(&vms.join("disk.vdi"), 2048);
    sparse(&npm.join("_cacache/index"), 600);
    sparse(&pip.join("wheels/w.whl"), 40);

    let mut registry = ClassifierRegistry::empty();
    registry.register(Box::new(FixedPaths {
        name: "fixed",
        category: "Caches",
        paths: vec![vms.clone(), npm.clone(), pip.clone()],
    }));

    let items = engine_with(home.path(), registry, Arc::new(LengthProbe))
        .scan_system(&ExclusionSet::new(), |_| {});
    assert_eq!(items.len(), 3);

    let params = FilterParams {
        bucket: SizeBucket::Medium,
        ..Default::default()
    };
    let shown = view::apply(&items, &params);
    let paths: Vec<&Path> = shown.iter().map(|i| i.path.as_path()).collect();
    assert_eq!(paths, vec![vms.as_path(), npm.as_path()]);
    assert_eq!(shown[1].size.label, "600M");
}

#[test]
fn test_folder_scan_then_medium_filter() {
    let root = TempDir::new().unwrap();
    sparse(&root.path().join("A/data.bin"), 2);
    sparse(&root.path().join("B/data.bin"), 600);
    sparse(&root.path().join("C/data.bin"), 1200);

    let engine = engine_with(
        Path::new("/nonexistent-home"),
        ClassifierRegistry::empty(),
        Arc::new(LengthProbe),
    );
    let items = engine.scan_folder(root.path(), 1, &ExclusionSet::new(), |_| {});

    let sizes: Vec<(&str, u64)> = items.iter().map(|i| (i.name.as_str(), i.bytes())).collect();
    assert_eq!(sizes, vec![("A", 2 * MIB), ("B", 600 * MIB), ("C", 1200 * MIB)]);
    assert!(items.iter().all(|i| i.category == "Subfolder"));

    let params = FilterParams {
        bucket: SizeBucket::Medium,
        ..Default::default()
    };
    let shown = view::apply(&items, &params);
    let names: Vec<&str> = shown.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["C", "B"]);
}

#[test]
fn test_failing_classifier_does_not_abort_scan() {
    let home = TempDir::new().unwrap();
    let cache = home.path().join("cache");
    fill(&cache.join("blob"), 4);

    let mut registry = ClassifierRegistry::empty();
    registry.register(Box::new(Broken));
    registry.register(Box::new(FixedPaths {
        name: "fixed",
        category: "Caches",
        paths: vec![cache.clone()],
    }));

    let items = engine(home.path(), registry).scan_system(&ExclusionSet::new(), |_| {});
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].path, cache);
}

#[test]
fn test_disabled_classifier_is_skipped() {
    let home = TempDir::new().unwrap();
    let cache = home.path().join("cache");
    fill(&cache.join("blob"), 4);

    let mut registry = ClassifierRegistry::empty();
    registry.register(Box::new(FixedPaths {
        name: "fixed",
        category: "Caches",
        paths: vec![cache],
    }));
    let mut enabled = BTreeMap::new();
    enabled.insert("fixed".to_string(), false);

    let items = engine(home.path(), registry)
        .with_enabled(enabled)
        .scan_system(&ExclusionSet::new(), |_| {});
    assert!(items.is_empty());
}

#[test]
fn test_system_roots_progress_and_exclusion() {
    let home = TempDir::new().unwrap();
    fill(&home.path().join("cache/blob"), 4);
    fill(&home.path().join("logs/syslog"), 4);

    let roots = vec![
        SystemRoot::new("User Cache", home.path().join("cache")),
        SystemRoot::new("Logs", home.path().join("logs")),
    ];
    let host = HostPaths::with_home(home.path());
    let exclusions = ExclusionSet::from_paths(&host, [home.path().join("logs")]);

    let mut percents = Vec::new();
    let items = engine(home.path(), ClassifierRegistry::empty())
        .with_system_roots(roots)
        .scan_system(&exclusions, |p| percents.push(p.percent));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category, "User Cache");
    assert_eq!(percents, vec![25.0, 50.0, 100.0]);
}

#[test]
fn test_folder_scan_respects_depth() {
    let root = TempDir::new().unwrap();
    fill(&root.path().join("a/b/c/deep.bin"), 4);
    fill(&root.path().join("z/file.bin"), 8);

    let engine = engine(Path::new("/nonexistent-home"), ClassifierRegistry::empty());

    let shallow = engine.scan_folder(root.path(), 1, &ExclusionSet::new(), |_| {});
    let names: Vec<&str> = shallow.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["a", "z"]);
    assert!(shallow.iter().all(|i| i.category == "Subfolder"));

    let deep = engine.scan_folder(root.path(), 3, &ExclusionSet::new(), |_| {});
    let names: Vec<&str> = deep.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "z"]);
}

#[test]
fn test_folder_scan_of_home_uses_home_category() {
    let home = TempDir::new().unwrap();
    fill(&home.path().join("Downloads/iso.img"), 12);

    let items = engine(home.path(), ClassifierRegistry::empty()).scan_folder(
        home.path(),
        1,
        &ExclusionSet::new(),
        |_| {},
    );
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category, "Home Folder");
}

#[test]
fn test_folder_scan_progress_ends_at_100() {
    let root = TempDir::new().unwrap();
    for name in ["one", "two", "three"] {
        fill(&root.path().join(name).join("f"), 4);
    }

    let engine = engine(Path::new("/nonexistent-home"), ClassifierRegistry::empty());
    let mut percents = Vec::new();
    engine.scan_folder(root.path(), 2, &ExclusionSet::new(), |p| percents.push(p.percent));

    assert_eq!(percents, vec![1.0, 2.0, 3.0, 100.0]);

    let mut missing = Vec::new();
    let items = engine.scan_folder(&root.path().join("nope"), 2, &ExclusionSet::new(), |p| {
        missing.push(p.percent)
    });
    assert!(items.is_empty());
    assert_eq!(missing, vec![100.0]);
}

#[test]
fn test_folder_scan_reports_each_subfolder() {
    let root = TempDir::new().unwrap();
    for i in 0..50 {
        fill(&root.path().join(format!("dir{i:02}")).join("f"), 4);
    }

    let engine = engine(Path::new("/nonexistent-home"), ClassifierRegistry::empty());
    let mut percents = Vec::new();
    let items = engine.scan_folder(root.path(), 1, &ExclusionSet::new(), |p| {
        percents.push(p.percent)
    });

    assert_eq!(items.len(), 50);
    assert_eq!(percents.len(), 51);
    let expected: Vec<f64> = (1..=50).map(f64::from).chain([100.0]).collect();
    assert_eq!(percents, expected);
}

#[test]
fn test_session_delivers_sorted_result_after_progress() {
    let root = TempDir::new().unwrap();
    fill(&root.path().join("small/f"), 4);
    fill(&root.path().join("large/f"), 256);

    let engine = engine(Path::new("/nonexistent-home"), ClassifierRegistry::empty());
    let mut session = ScanSession::new(Arc::new(engine));
    assert!(session.start(ScanRequest::Folder {
        root: root.path().to_path_buf(),
        max_depth: 1,
        exclusions: ExclusionSet::new(),
    }));

    let mut progress_events = 0;
    let result = session.wait(|_| progress_events += 1).unwrap();

    assert!(result.is_completed());
    assert!(progress_events > 0);
    let names: Vec<&str> = result.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["large", "small"]);
    assert!(!session.is_scanning());
}

#[test]
fn test_session_poll_after_completion() {
    let root = TempDir::new().unwrap();
    fill(&root.path().join("only/f"), 4);

    let engine = engine(Path::new("/nonexistent-home"), ClassifierRegistry::empty());
    let mut session = ScanSession::new(Arc::new(engine));
    session.start(ScanRequest::Folder {
        root: root.path().to_path_buf(),
        max_depth: 1,
        exclusions: ExclusionSet::new(),
    });

    let mut completed = None;
    while completed.is_none() {
        for message in session.poll() {
            if let ScanMessage::Complete(result) = message {
                completed = Some(result);
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    assert_eq!(completed.unwrap().items.len(), 1);
    assert!(session.poll().is_empty());
}
