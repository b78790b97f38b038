//! Scanning: size probes, exclusions, the scan engine and its background
//! session.

mod engine;
mod exclusion;
mod item;
mod probe;
mod session;
mod size;
mod walker;

pub use engine::{ScanEngine, ScanProgress, SystemRoot};
pub use exclusion::ExclusionSet;
pub use item::Item;
pub use probe::{probe_by_name, DuProbe, SizeProbe, WalkProbe, DEFAULT_TIMEOUT};
pub use session::{ScanMessage, ScanRequest, ScanResult, ScanSession, ScanStatus, POLL_INTERVAL};
pub use size::{disk_usage, format_human_size, parse_human_size, Size};
pub use walker::FolderWalker;
