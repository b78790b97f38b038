//! Subcommand implementations.

pub mod actions;
pub mod classifiers;
pub mod scan;

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::classifier::ClassifierRegistry;
use crate::cli::ViewArgs;
use crate::config::Config;
use crate::paths::HostPaths;
use crate::scanner::{ExclusionSet, ScanEngine, SizeProbe};
use crate::view::{FilterParams, SizeBucket, SortColumn};

/// Settings and host information shared by every subcommand.
pub struct Context {
    pub config: Config,
    /// Explicit `--config` path, if any
    pub config_path: Option<PathBuf>,
    pub host: HostPaths,
    pub quiet: bool,
}

impl Context {
    pub fn new(config: Config, config_path: Option<PathBuf>, quiet: bool) -> Result<Self> {
        Ok(Self {
            config,
            config_path,
            host: HostPaths::detect()?,
            quiet,
        })
    }

    /// Where settings are written back.
    pub fn settings_path(&self) -> Result<PathBuf> {
        self.config_path
            .clone()
            .or_else(Config::default_path)
            .ok_or_else(|| anyhow!("Could not determine the config directory"))
    }

    pub fn probe(&self) -> Arc<dyn SizeProbe> {
        Arc::from(self.config.size_probe())
    }

    /// Engine wired with the built-in classifiers and configured probe.
    pub fn engine(&self) -> ScanEngine {
        ScanEngine::new(
            self.host.clone(),
            self.probe(),
            Arc::new(ClassifierRegistry::builtin(&self.host)),
        )
        .with_enabled(self.config.classifiers.clone())
    }

    /// Configured exclusions plus any given on the command line.
    pub fn exclusions(&self, view: &ViewArgs) -> ExclusionSet {
        let mut set = self.config.exclusion_set(&self.host);
        if let Some(extra) = &view.exclude {
            set.extend(&ExclusionSet::parse(&self.host, extra));
        }
        set
    }

    /// Configured view parameters overridden by command-line flags.
    pub fn filter_params(&self, view: &ViewArgs) -> Result<FilterParams> {
        let mut params = self.config.filter_params();

        if let Some(filter) = &view.filter {
            params.bucket = SizeBucket::from_label(filter)
                .ok_or_else(|| anyhow!("Unknown size filter '{}'", filter))?;
        }
        if let Some(mb) = &view.min_mb {
            params.custom_mb = Some(mb.clone());
        }
        if let Some(search) = &view.search {
            params.search = search.clone();
        }
        if let Some(column) = &view.sort {
            params.sort.column = SortColumn::parse(column)
                .ok_or_else(|| anyhow!("Unknown sort column '{}'", column))?;
        }
        if view.asc {
            params.sort.descending = false;
        }
        Ok(params)
    }
}
