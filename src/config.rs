use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::paths::HostPaths;
use crate::scanner::{probe_by_name, ExclusionSet, SizeProbe};
use crate::view::{FilterParams, SizeBucket, SortColumn, SortSpec};

/// Persistent settings.
///
/// Keys missing from the file take their defaults. Keys this version does
/// not know are kept in `extra` and written back unchanged on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder scanned last; absent means a system scan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_scan_path: Option<PathBuf>,
    /// Size bucket label, e.g. "Medium (500MB+)"
    pub size_filter: String,
    /// Custom minimum size in MB, overrides `size_filter` when numeric
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_size_mb: Option<String>,
    /// Folder scan depth
    pub max_depth: usize,
    /// Comma-separated paths to skip
    pub exclusions: String,
    /// category, name, path or size
    pub sort_column: String,
    pub sort_descending: bool,
    /// Size probe: walk or du
    pub size_probe: String,
    /// Per-measurement timeout in seconds
    pub size_timeout_secs: u64,
    /// Classifier name -> enabled
    pub classifiers: BTreeMap<String, bool>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            last_scan_path: None,
            size_filter: SizeBucket::All.label().to_string(),
            custom_size_mb: None,
            max_depth: 3,
            exclusions: String::new(),
            sort_column: SortColumn::Size.as_str().to_string(),
            sort_descending: true,
            size_probe: "walk".to_string(),
            size_timeout_secs: 30,
            classifiers: BTreeMap::new(),
            extra: toml::Table::new(),
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/rusty-reclaim/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rusty-reclaim").join("config.toml"))
    }

    /// Load from `path`, or the default location when `None`.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(write_err)?;

        tracing::debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if SizeBucket::from_label(&self.size_filter).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown size_filter '{}'",
                self.size_filter
            )));
        }
        if SortColumn::parse(&self.sort_column).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown sort_column '{}'",
                self.sort_column
            )));
        }
        if !matches!(self.size_probe.as_str(), "walk" | "du") {
            return Err(ConfigError::Invalid(format!(
                "size_probe must be 'walk' or 'du', got '{}'",
                self.size_probe
            )));
        }
        if self.size_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "size_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// View parameters stored in the settings (search is never persisted).
    pub fn filter_params(&self) -> FilterParams {
        FilterParams {
            bucket: SizeBucket::from_label(&self.size_filter).unwrap_or_default(),
            custom_mb: self.custom_size_mb.clone(),
            search: String::new(),
            sort: SortSpec {
                column: SortColumn::parse(&self.sort_column).unwrap_or_default(),
                descending: self.sort_descending,
            },
        }
    }

    /// Store the persistent parts of `params`.
    pub fn set_filter_params(&mut self, params: &FilterParams) {
        self.size_filter = params.bucket.label().to_string();
        self.custom_size_mb = params.custom_mb.clone().filter(|s| !s.trim().is_empty());
        self.sort_column = params.sort.column.as_str().to_string();
        self.sort_descending = params.sort.descending;
    }

    pub fn exclusion_set(&self, host: &HostPaths) -> ExclusionSet {
        ExclusionSet::parse(host, &self.exclusions)
    }

    pub fn size_timeout(&self) -> Duration {
        Duration::from_secs(self.size_timeout_secs)
    }

    pub fn size_probe(&self) -> Box<dyn SizeProbe> {
        probe_by_name(&self.size_probe, self.size_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.size_filter, "All");
        assert!(config.sort_descending);
    }

    #[test]
    fn config_serializes_to_toml() {
        let mut config = Config::default();
        config.classifiers.insert("python".into(), false);
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("max_depth = 3"));
        assert!(toml_str.contains("[classifiers]"));
        assert!(!toml_str.contains("last_scan_path"));
    }

    #[test]
    fn invalid_values_rejected() {
        let config = Config {
            max_depth: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = Config {
            size_probe: "magic".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn filter_params_round_trip() {
        let mut config = Config::default();
        let params = FilterParams {
            bucket: SizeBucket::Large,
            custom_mb: Some("250".into()),
            search: "ignored".into(),
            sort: SortSpec {
                column: SortColumn::Name,
                descending: false,
            },
        };
        config.set_filter_params(&params);

        assert_eq!(config.size_filter, "Large (1GB+)");
        assert_eq!(config.sort_column, "name");
        let restored = config.filter_params();
        assert_eq!(restored.bucket, SizeBucket::Large);
        assert_eq!(restored.custom_mb.as_deref(), Some("250"));
        assert!(restored.search.is_empty());
        assert!(!restored.sort.descending);
    }
}
