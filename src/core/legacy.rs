//! Import of legacy per-version stats files.
//!
//! Older runs wrote one file per product and version, named
//! `<product>_<MAJOR>_<MINOR>.json` and holding `locale -> completion`.
//! Fenix files store whole percentages (`95` for 95%), Firefox files store
//! ratios.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    core::{Product, Version, store::Dataset},
    error::StatsError,
};

static FILE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(firefox|fenix)_(\d+)_(\d+)\.json$").expect("legacy file name regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyFile {
    pub path: PathBuf,
    pub product: Product,
    pub version: Version,
}

/// Outcome of an import.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub files: usize,
    pub entries: usize,
    pub warnings: Vec<String>,
}

/// Product and version encoded in a legacy file name.
///
/// `firefox_147_0.json` gives `(Firefox, 147.0)`.
pub fn parse_file_name(name: &str) -> Option<(Product, Version)> {
    let captures = FILE_NAME_REGEX.captures(name)?;
    let product = Product::from_name(&captures[1])?;
    let version = Version::parse(&format!("{}.{}", &captures[2], &captures[3])).ok()?;
    Some((product, version))
}

/// Legacy files in `dir`, optionally for one product, ordered by product then
/// numeric version.
pub fn legacy_files(dir: &Path, product: Option<Product>) -> Result<Vec<LegacyFile>, StatsError> {
    if !dir.is_dir() {
        return Err(StatsError::config(format!(
            "legacy stats directory {} does not exist",
            dir.display()
        )));
    }

    let mut files: Vec<LegacyFile> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name();
            let (file_product, version) = parse_file_name(&name.to_string_lossy())?;
            Some(LegacyFile {
                path: entry.path(),
                product: file_product,
                version,
            })
        })
        .filter(|file| product.is_none_or(|p| p == file.product))
        .collect();
    files.sort_by(|a, b| (a.product, a.version).cmp(&(b.product, b.version)));
    Ok(files)
}

/// How completion values of one legacy file are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyScale {
    /// `0..=1`
    Ratio,
    /// `0..=100`
    Percent,
}

impl LegacyScale {
    pub fn for_product(product: Product) -> Self {
        match product {
            Product::Firefox => LegacyScale::Ratio,
            Product::Fenix => LegacyScale::Percent,
        }
    }

    pub fn to_ratio(self, value: f64) -> f64 {
        match self {
            LegacyScale::Ratio => value,
            LegacyScale::Percent => value / 100.0,
        }
    }
}

/// Merge the legacy files in `dir` into `dataset`, optionally only those of
/// one product.
///
/// A file that cannot be read or parsed is skipped with a warning, as is a
/// value outside the file's scale.
pub fn import_legacy(
    dataset: &mut Dataset,
    dir: &Path,
    product: Option<Product>,
    locale_names: &BTreeMap<String, String>,
) -> Result<ImportSummary, StatsError> {
    let mut summary = ImportSummary::default();

    for file in legacy_files(dir, product)? {
        let ratios = match read_legacy_file(&file.path) {
            Ok(ratios) => ratios,
            Err(reason) => {
                summary
                    .warnings
                    .push(format!("skipped {}: {}", file.path.display(), reason));
                continue;
            }
        };

        summary.files += 1;
        let scale = LegacyScale::for_product(file.product);
        for (locale, value) in ratios {
            let ratio = value.map(|v| scale.to_ratio(v));
            if ratio.is_some_and(|r| !(0.0..=1.0).contains(&r)) {
                summary.warnings.push(format!(
                    "skipped {} {} {}: ratio out of range",
                    file.product, file.version, locale
                ));
                continue;
            }
            dataset.set_ratio(
                &locale,
                file.product.name(),
                file.version,
                ratio,
                locale_names.get(&locale).map(String::as_str),
            );
            summary.entries += 1;
        }
    }
    Ok(summary)
}

fn read_legacy_file(path: &Path) -> Result<BTreeMap<String, Option<f64>>, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}
