//! Resolved settings for one command: config file, CLI overrides, paths.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::args::CommonArgs;
use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config, resolve_path},
    core::{ExtractionRoots, sink::TracingSink},
    error::StatsError,
};

pub struct StatsContext {
    pub config: Config,
    pub source_root: Option<PathBuf>,
    pub l10n_root: Option<PathBuf>,
    pub dataset_path: PathBuf,
    base_dir: PathBuf,
    pub sink: TracingSink,
}

impl StatsContext {
    /// Load the configuration found from the current directory and apply
    /// CLI overrides (CLI > config file > defaults).
    pub fn new(common: &CommonArgs) -> Result<Self> {
        Self::from_dir(Path::new("."), common)
    }

    pub fn from_dir(start_dir: &Path, common: &CommonArgs) -> Result<Self> {
        let loaded = load_config(start_dir)?;
        if !loaded.from_file {
            tracing::debug!("no {} found, using default configuration", CONFIG_FILE_NAME);
        }
        let config = loaded.config;
        let base_dir = loaded.base_dir;

        let source_root = common
            .source_root
            .clone()
            .or_else(|| config.source_root.as_deref().map(|p| resolve_path(&base_dir, p)));
        let l10n_root = common
            .l10n_root
            .clone()
            .or_else(|| config.l10n_root.as_deref().map(|p| resolve_path(&base_dir, p)));
        let dataset_path = common
            .dataset
            .clone()
            .unwrap_or_else(|| resolve_path(&base_dir, &config.dataset_path));

        Ok(Self {
            config,
            source_root,
            l10n_root,
            dataset_path,
            base_dir,
            sink: TracingSink,
        })
    }

    /// Resolve a path from the config file against its directory.
    pub fn config_path(&self, value: &str) -> PathBuf {
        resolve_path(&self.base_dir, value)
    }

    /// Roots for extraction. Both roots must exist when configured; the
    /// source root is mandatory.
    pub fn extraction_roots(&self) -> Result<ExtractionRoots, StatsError> {
        let source_root = self.source_root.clone().ok_or_else(|| {
            StatsError::config("no source root configured (--source-root or \"sourceRoot\")")
        })?;
        if !source_root.is_dir() {
            return Err(StatsError::config(format!(
                "source root {} does not exist",
                source_root.display()
            )));
        }
        if let Some(l10n_root) = &self.l10n_root
            && !l10n_root.is_dir()
        {
            return Err(StatsError::config(format!(
                "l10n root {} does not exist",
                l10n_root.display()
            )));
        }

        Ok(ExtractionRoots {
            source_root,
            l10n_root: self.l10n_root.clone(),
            reference_locale: self.config.reference_locale.clone(),
        })
    }
}
