use serde::Serialize;
use std::fmt;
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;

const SUFFIXES: &[char] = &['K', 'M', 'G', 'T', 'P'];

/// Bytes actually allocated on disk for an entry.
/// `st_blocks` is always in 512-byte units on Linux.
pub fn disk_usage(metadata: &Metadata) -> u64 {
    metadata.blocks() * 512
}

/// Measured size of a path: the human label and the byte count it was
/// produced from. Both are fixed at measurement time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub label: String,
    pub bytes: u64,
}

impl Size {
    /// Size computed from an exact byte count.
    pub fn from_bytes(bytes: u64) -> Self {
        Self {
            label: format_human_size(bytes),
            bytes,
        }
    }

    /// Size reported by an external tool as a human label.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let bytes = parse_human_size(&label);
        Self { label, bytes }
    }

    /// The "empty or inaccessible" sentinel.
    pub fn zero() -> Self {
        Self {
            label: "0B".to_string(),
            bytes: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.bytes == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Format a byte count the way `du -h` does: `512B`, `2.0M`, `600M`, `1.2G`.
pub fn format_human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{}B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < SUFFIXES.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    // Values that round up to 10 switch to integer display
    if size < 9.95 {
        format!("{:.1}{}", size, SUFFIXES[unit_idx])
    } else {
        format!("{:.0}{}", size, SUFFIXES[unit_idx])
    }
}

/// Parse a human-readable size (`"1.2G"`, `"600M"`, `"0B"`) into bytes.
///
/// Only `K`, `M`, `G` and `T` suffixes (powers of 1024) are recognised.
/// Anything else, including a plain number or a locale-specific decimal
/// separator, yields 0.
pub fn parse_human_size(s: &str) -> u64 {
    let s = s.trim();
    if s == "0B" {
        return 0;
    }

    let Some(unit) = s.chars().last() else {
        return 0;
    };
    let multiplier: u64 = match unit {
        'K' => 1024,
        'M' => 1024u64.pow(2),
        'G' => 1024u64.pow(3),
        'T' => 1024u64.pow(4),
        _ => return 0,
    };

    match s[..s.len() - unit.len_utf8()].parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => (n * multiplier as f64) as u64,
        _ => 0,
    }
}
