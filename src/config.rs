use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::StatsError;

pub const CONFIG_FILE_NAME: &str = ".l10nstatsrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Product source checkout at the version being extracted.
    #[serde(default)]
    pub source_root: Option<String>,
    /// Localization tree with one directory per locale (Firefox desktop).
    #[serde(default)]
    pub l10n_root: Option<String>,
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,
    #[serde(default = "default_chart_path")]
    pub chart_path: String,
    #[serde(default = "default_csv_dir")]
    pub csv_dir: String,
    #[serde(default = "default_max_versions")]
    pub max_versions: usize,
    #[serde(default = "default_reference_locale")]
    pub reference_locale: String,
    /// Display names, e.g. `"de": "German"`.
    #[serde(default)]
    pub locale_names: BTreeMap<String, String>,
}

fn default_dataset_path() -> String {
    "./stats/completion.json".to_string()
}

fn default_chart_path() -> String {
    "./docs/data/data.json".to_string()
}

fn default_csv_dir() -> String {
    "./stats".to_string()
}

fn default_max_versions() -> usize {
    30
}

fn default_reference_locale() -> String {
    "en-US".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: None,
            l10n_root: None,
            dataset_path: default_dataset_path(),
            chart_path: default_chart_path(),
            csv_dir: default_csv_dir(),
            max_versions: default_max_versions(),
            reference_locale: default_reference_locale(),
            locale_names: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.max_versions == 0 {
            return Err(StatsError::config("'maxVersions' must be at least 1"));
        }
        if self.reference_locale.trim().is_empty() {
            return Err(StatsError::config("'referenceLocale' must not be empty"));
        }
        for (field, value) in [
            ("datasetPath", &self.dataset_path),
            ("chartPath", &self.chart_path),
            ("csvDir", &self.csv_dir),
        ] {
            if value.trim().is_empty() {
                return Err(StatsError::config(format!("'{}' must not be empty", field)));
            }
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory relative paths in the config are resolved against: the
    /// config file's directory, or the start directory when using defaults.
    pub base_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            base_dir: start_dir.to_path_buf(),
        }),
    }
}

/// Resolve a configured path against the config's base directory.
pub fn resolve_path(base_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let relative = path.strip_prefix(".").unwrap_or(path);
    if base_dir.as_os_str().is_empty() {
        relative.to_path_buf()
    } else {
        base_dir.join(relative)
    }
}
