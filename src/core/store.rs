//! Aggregated completion dataset and its on-disk store.
//!
//! The dataset is `locale -> { name, product -> { version -> ratio } }`,
//! persisted as pretty-printed JSON. Every map is ordered, so writing the same
//! dataset twice produces identical bytes.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::{self, File, OpenOptions, TryLockError},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{
    core::{CompletionRecord, Version},
    error::StatsError,
};

/// `version -> ratio`; `None` is "no data".
pub type VersionSeries = BTreeMap<Version, Option<f64>>;

/// Everything recorded for one locale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocaleSeries {
    /// Display name, e.g. `German`.
    pub name: String,
    /// Keyed by product name.
    #[serde(flatten)]
    pub products: BTreeMap<String, VersionSeries>,
}

impl LocaleSeries {
    pub fn product(&self, product: &str) -> Option<&VersionSeries> {
        self.products.get(product)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    locales: BTreeMap<String, LocaleSeries>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn get(&self, locale: &str) -> Option<&LocaleSeries> {
        self.locales.get(locale)
    }

    /// Locales in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &LocaleSeries)> {
        self.locales.iter()
    }

    /// Stored value for one key. The outer `None` means nothing was ever
    /// recorded; `Some(None)` is a recorded "no data".
    pub fn ratio(&self, locale: &str, product: &str, version: Version) -> Option<Option<f64>> {
        self.locales
            .get(locale)?
            .products
            .get(product)?
            .get(&version)
            .copied()
    }

    /// Every version recorded for a product, in numeric order.
    pub fn versions(&self, product: &str) -> BTreeSet<Version> {
        self.locales
            .values()
            .filter_map(|series| series.products.get(product))
            .flat_map(|versions| versions.keys().copied())
            .collect()
    }

    /// Upsert one (locale, product, version) ratio.
    ///
    /// Only that key changes. The display name is attached when the locale is
    /// first seen, or replaces a placeholder equal to the locale code.
    pub fn merge(&mut self, record: &CompletionRecord, display_name: Option<&str>) {
        self.set_ratio(
            &record.locale,
            &record.product,
            record.version,
            record.ratio,
            display_name,
        );
    }

    pub(crate) fn set_ratio(
        &mut self,
        locale: &str,
        product: &str,
        version: Version,
        ratio: Option<f64>,
        display_name: Option<&str>,
    ) {
        let series = self
            .locales
            .entry(locale.to_string())
            .or_insert_with(|| LocaleSeries {
                name: locale.to_string(),
                products: BTreeMap::new(),
            });
        if let Some(name) = display_name
            && series.name == locale
        {
            series.name = name.to_string();
        }
        series
            .products
            .entry(product.to_string())
            .or_default()
            .insert(version, ratio.map(round_ratio));
    }

    pub fn to_json(&self) -> Result<String, StatsError> {
        let mut json = serde_json::to_string_pretty(self).map_err(io::Error::from)?;
        json.push('\n');
        Ok(json)
    }
}

/// Round to 4 decimals, the precision kept in the dataset.
pub fn round_ratio(ratio: f64) -> f64 {
    (ratio * 10_000.0).round() / 10_000.0
}

/// Read a dataset without taking the lock. A missing file is an empty dataset.
pub fn load_dataset(path: &Path) -> Result<Dataset, StatsError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Dataset::new()),
        Err(e) => {
            return Err(StatsError::InvalidDataset {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };
    if content.trim().is_empty() {
        return Ok(Dataset::new());
    }
    serde_json::from_str(&content).map_err(|e| StatsError::InvalidDataset {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write `contents` to a temporary file next to `path`, then rename it over
/// `path`. Readers see either the old or the new file, never a partial one.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Exclusive read-modify-write access to the persisted dataset.
///
/// Holds a lock on `<dataset>.lock` until dropped.
#[derive(Debug)]
pub struct SnapshotStore {
    path: PathBuf,
    dataset: Dataset,
    _lock: File,
}

impl SnapshotStore {
    /// Lock and load the dataset at `path`.
    pub fn open(path: &Path) -> Result<Self, StatsError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(lock_path(path))?;
        match lock.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                return Err(StatsError::MergeConflict {
                    path: path.to_path_buf(),
                });
            }
            Err(TryLockError::Error(e)) => return Err(e.into()),
        }

        let dataset = load_dataset(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            dataset,
            _lock: lock,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn dataset_mut(&mut self) -> &mut Dataset {
        &mut self.dataset
    }

    pub fn merge(&mut self, record: &CompletionRecord, display_name: Option<&str>) {
        self.dataset.merge(record, display_name);
    }

    /// Atomically replace the dataset file and release the lock.
    pub fn commit(self) -> Result<Dataset, StatsError> {
        let json = self.dataset.to_json()?;
        write_atomic(&self.path, &json)?;
        Ok(self.dataset)
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    path.with_file_name(name)
}
