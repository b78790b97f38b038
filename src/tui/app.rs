//! Application state for the TUI.

use std::path::PathBuf;

use crate::actions::ActionExecutor;
use crate::config::Config;
use crate::scanner::{
    ExclusionSet, Item, ScanMessage, ScanProgress, ScanRequest, ScanSession, ScanStatus,
};
use crate::view::{self, FilterParams, SortColumn};

/// The current UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode.
    Normal,
    /// Search/filter mode.
    Search,
    /// Typing a custom minimum size in MB.
    MinSize,
    /// Confirmation dialog mode.
    Confirm(ConfirmAction),
    /// Help overlay mode.
    Help,
}

/// Action requiring confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Move the selected item to the trash.
    Trash,
    /// Trash the contents of the selected folder.
    CleanFolder,
}

/// What the current results came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    System,
    Folder(PathBuf),
}

/// Main application state for the TUI.
pub struct App {
    /// What is (or was last) scanned.
    pub target: ScanTarget,

    /// Folder scan depth.
    pub max_depth: usize,

    pub exclusions: ExclusionSet,

    /// Full result list of the last scan, minus trashed items.
    pub items: Vec<Item>,

    /// `items` after filtering and sorting (for rendering).
    pub visible: Vec<Item>,

    /// Filter, search and sort.
    pub params: FilterParams,

    /// Currently selected index in `visible`.
    pub selected: usize,

    /// Current UI mode.
    pub mode: Mode,

    /// Text typed in MinSize mode.
    pub input: String,

    /// Application should quit.
    pub should_quit: bool,

    /// Status message to display.
    pub status_message: Option<String>,

    /// Latest progress of the running scan.
    pub progress: Option<ScanProgress>,

    session: ScanSession,
    executor: ActionExecutor,
}

impl App {
    /// Create a new App instance.
    pub fn new(
        session: ScanSession,
        executor: ActionExecutor,
        target: ScanTarget,
        max_depth: usize,
        exclusions: ExclusionSet,
        params: FilterParams,
    ) -> Self {
        Self {
            target,
            max_depth: max_depth.max(1),
            exclusions,
            items: Vec::new(),
            visible: Vec::new(),
            params,
            selected: 0,
            mode: Mode::Normal,
            input: String::new(),
            should_quit: false,
            status_message: None,
            progress: None,
            session,
            executor,
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.session.is_scanning()
    }

    /// Get the currently selected item, if any.
    pub fn selected_item(&self) -> Option<&Item> {
        self.visible.get(self.selected)
    }

    /// Scan the current target again.
    pub fn start_scan(&mut self) {
        let request = match &self.target {
            ScanTarget::System => ScanRequest::System {
                exclusions: self.exclusions.clone(),
            },
            ScanTarget::Folder(root) => ScanRequest::Folder {
                root: root.clone(),
                max_depth: self.max_depth,
                exclusions: self.exclusions.clone(),
            },
        };

        if self.session.start(request) {
            self.progress = Some(ScanProgress::new("Starting scan", 0.0));
            self.status_message = None;
        } else {
            self.status_message = Some("Scan already in progress".to_string());
        }
    }

    /// Switch to `target` and scan it, unless a scan is running.
    pub fn scan(&mut self, target: ScanTarget) {
        if self.is_scanning() {
            self.status_message = Some("Scan already in progress".to_string());
            return;
        }
        self.target = target;
        self.selected = 0;
        self.start_scan();
    }

    /// Apply pending scan messages. Call every poll interval.
    pub fn tick(&mut self) {
        for message in self.session.poll() {
            match message {
                ScanMessage::Progress(p) => self.progress = Some(p),
                ScanMessage::Complete(result) => {
                    self.progress = None;
                    if let ScanStatus::Failed(message) = &result.status {
                        self.status_message = Some(format!("Scan failed: {}", message));
                    } else {
                        let total: u64 = result.items.iter().map(Item::bytes).sum();
                        self.status_message = Some(format!(
                            "Found {} items ({})",
                            result.items.len(),
                            humansize::format_size(total, humansize::BINARY)
                        ));
                    }
                    self.items = result.items;
                    self.refresh();
                }
            }
        }
    }

    /// Recompute the visible list from `items` and `params`.
    pub fn refresh(&mut self) {
        self.visible = view::apply(&self.items, &self.params);
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    /// Move the selection by `delta` rows, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.visible.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    pub fn cycle_bucket(&mut self) {
        self.params.bucket = self.params.bucket.next();
        self.params.custom_mb = None;
        self.status_message = Some(format!("Filter: {}", self.params.bucket.label()));
        self.refresh();
    }

    /// Use the typed MB value as the size threshold; empty clears it.
    pub fn apply_min_size_input(&mut self) {
        let value = self.input.trim().to_string();
        self.params.custom_mb = if value.is_empty() { None } else { Some(value) };
        self.refresh();
    }

    pub fn sort_by(&mut self, column: SortColumn) {
        self.params.sort = self.params.sort.toggle(column);
        self.refresh();
    }

    /// Folder scan into the selected item, if it is a directory.
    pub fn enter_selected(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        if !item.path.is_dir() {
            self.status_message = Some(format!("{} is not a folder", item.short_name));
            return;
        }
        let path = item.path.clone();
        self.scan(ScanTarget::Folder(path));
    }

    /// Folder scan of the parent of the current folder.
    pub fn go_up(&mut self) {
        let parent = match &self.target {
            ScanTarget::Folder(root) => root.parent().map(|p| p.to_path_buf()),
            ScanTarget::System => None,
        };
        match parent {
            Some(parent) => self.scan(ScanTarget::Folder(parent)),
            None => self.status_message = Some("Already at the top".to_string()),
        }
    }

    /// Change the folder depth and rescan a folder target.
    pub fn change_depth(&mut self, delta: isize) {
        self.max_depth = self.max_depth.saturating_add_signed(delta).max(1);
        self.status_message = Some(format!("Depth: {}", self.max_depth));
        if matches!(self.target, ScanTarget::Folder(_)) {
            self.scan(self.target.clone());
        }
    }

    pub fn reveal_selected(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        if let Err(e) = self.executor.open(item) {
            self.status_message = Some(format!("Error: {}", e));
        }
    }

    pub fn trash_selected(&mut self) {
        let Some(item) = self.selected_item().cloned() else {
            return;
        };
        match self.executor.trash(&mut self.items, &item) {
            Ok(path) => {
                self.status_message = Some(format!(
                    "Moved {} ({}) to the trash",
                    path.display(),
                    item.size
                ));
            }
            Err(e) => self.status_message = Some(format!("Error: {}", e)),
        }
        self.refresh();
    }

    pub fn clean_selected(&mut self) {
        let Some(item) = self.selected_item().cloned() else {
            return;
        };
        match self.executor.clean_folder(&mut self.items, &item) {
            Ok(outcome) if outcome.is_partial() => {
                self.status_message = Some(format!(
                    "Cleaned {} items, {} failed",
                    outcome.trashed.len(),
                    outcome.failures.len()
                ));
            }
            Ok(outcome) => {
                self.status_message = Some(format!("Cleaned {} items", outcome.trashed.len()));
            }
            Err(e) => self.status_message = Some(format!("Error: {}", e)),
        }
        self.refresh();
    }

    pub fn undo(&mut self) {
        self.status_message = Some(match self.executor.undo() {
            Ok(Some(path)) => format!("Restore {} from the opened trash folder", path.display()),
            Ok(None) => "Nothing to undo".to_string(),
            Err(e) => format!("Error: {}", e),
        });
    }

    /// Store the view and target so the next session starts here.
    pub fn save_to(&self, config: &mut Config) {
        config.set_filter_params(&self.params);
        config.max_depth = self.max_depth;
        config.last_scan_path = match &self.target {
            ScanTarget::System => None,
            ScanTarget::Folder(root) => Some(root.clone()),
        };
    }
}
