//! Filtering and sorting of scan results for display.

use std::cmp::Ordering;

use crate::scanner::Item;

const MIB: u64 = 1024 * 1024;

/// Preset minimum-size filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeBucket {
    #[default]
    All,
    Small,
    Medium,
    Large,
}

impl SizeBucket {
    pub const ALL: [SizeBucket; 4] = [Self::All, Self::Small, Self::Medium, Self::Large];

    /// Minimum size in bytes.
    pub fn threshold(self) -> u64 {
        match self {
            Self::All => 0,
            Self::Small => 100 * MIB,
            Self::Medium => 500 * MIB,
            Self::Large => 1024 * MIB,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Small => "Small (100MB+)",
            Self::Medium => "Medium (500MB+)",
            Self::Large => "Large (1GB+)",
        }
    }

    /// Accepts the display label or a short name (`small`, `medium`...).
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|b| {
            b.label().eq_ignore_ascii_case(s) || format!("{:?}", b).eq_ignore_ascii_case(s)
        })
    }

    /// Next bucket, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Small,
            Self::Small => Self::Medium,
            Self::Medium => Self::Large,
            Self::Large => Self::All,
        }
    }
}

/// Columns the result list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    Category,
    Name,
    Path,
    #[default]
    Size,
}

impl SortColumn {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" => Some(Self::Category),
            "name" | "short_name" => Some(Self::Name),
            "path" => Some(Self::Path),
            "size" => Some(Self::Size),
            _ => None,
        }
    }

    /// Key used in the settings file.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Name => "name",
            Self::Path => "path",
            Self::Size => "size",
        }
    }

    fn compare(self, a: &Item, b: &Item) -> Ordering {
        match self {
            Self::Category => a.category.cmp(&b.category),
            Self::Name => a.short_name.cmp(&b.short_name),
            Self::Path => a.path.cmp(&b.path),
            Self::Size => a.bytes().cmp(&b.bytes()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub descending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            column: SortColumn::Size,
            descending: true,
        }
    }
}

impl SortSpec {
    /// Sort by `column`; picking the current column again flips direction.
    pub fn toggle(self, column: SortColumn) -> Self {
        if self.column == column {
            Self {
                column,
                descending: !self.descending,
            }
        } else {
            Self {
                column,
                descending: self.descending,
            }
        }
    }
}

/// Everything that decides which items are shown, and in what order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    pub bucket: SizeBucket,
    /// Free-text minimum in MB; overrides the bucket when it parses.
    pub custom_mb: Option<String>,
    pub search: String,
    pub sort: SortSpec,
}

impl FilterParams {
    /// Minimum size in bytes.
    pub fn threshold(&self) -> u64 {
        self.custom_threshold()
            .unwrap_or_else(|| self.bucket.threshold())
    }

    fn custom_threshold(&self) -> Option<u64> {
        let mb: f64 = self.custom_mb.as_deref()?.trim().parse().ok()?;
        if !mb.is_finite() || mb < 0.0 {
            return None;
        }
        Some((mb * MIB as f64) as u64)
    }

    fn matches_search(&self, item: &Item) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        item.category.to_lowercase().contains(&needle)
            || item.short_name.to_lowercase().contains(&needle)
            || item.path.to_string_lossy().to_lowercase().contains(&needle)
    }
}

/// Items at or above the threshold that match the search, in their
/// original order.
pub fn filter(items: &[Item], params: &FilterParams) -> Vec<Item> {
    let threshold = params.threshold();
    items
        .iter()
        .filter(|item| item.bytes() >= threshold && params.matches_search(item))
        .cloned()
        .collect()
}

/// Stable sort by the chosen column.
pub fn sort(items: &mut [Item], spec: SortSpec) {
    items.sort_by(|a, b| {
        let ord = spec.column.compare(a, b);
        if spec.descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

/// Filter, then sort.
pub fn apply(items: &[Item], params: &FilterParams) -> Vec<Item> {
    let mut shown = filter(items, params);
    sort(&mut shown, params.sort);
    shown
}
