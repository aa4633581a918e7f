//! Product extractors.
//!
//! A [`ProductExtractor`] knows which files make up a product's translatable
//! content and turns one locale's copy of them into a [`StringList`]. Both
//! variants share [`FileSet`], which walks resolved project files, parses each
//! one and unions the results under path-qualified keys.

use std::{fmt, path::PathBuf};

use clap::ValueEnum;

use crate::{
    core::{
        StringList,
        parsers::{ParseMode, ResourceFormat, parse_resource},
        project::ProjectFile,
    },
    error::{ParseError, StatsError},
};

mod desktop;
mod fenix;

pub use desktop::DesktopExtractor;
pub use fenix::FenixExtractor;

/// Roots and reference locale an extractor works against.
#[derive(Debug, Clone)]
pub struct ExtractionRoots {
    /// Checkout of the product source at the target version.
    pub source_root: PathBuf,
    /// Localization tree (one directory per locale). Desktop only.
    pub l10n_root: Option<PathBuf>,
    pub reference_locale: String,
}

/// Result of extracting one locale.
#[derive(Debug, Default)]
pub struct Extraction {
    pub strings: StringList,
    /// Non-fatal problems in file order.
    pub warnings: Vec<String>,
    /// Files that exist but could not be parsed. Also listed in `warnings`.
    pub parse_errors: Vec<ParseError>,
    /// The locale has nothing for this version (e.g. no locale directory).
    pub absent: bool,
}

impl Extraction {
    pub(crate) fn absent(warning: impl Into<String>) -> Self {
        Self {
            warnings: vec![warning.into()],
            absent: true,
            ..Self::default()
        }
    }
}

/// Product-specific knowledge of where translatable strings live.
pub trait ProductExtractor: Sync {
    /// Product key used in the dataset (`firefox`, `fenix`).
    fn product_name(&self) -> &'static str;

    /// Locales shipped for this version, without the reference locale.
    fn locales(&self) -> &[String];

    /// Extract every string of `locale`. Never fatal: problems become
    /// warnings and an absent locale yields an empty list.
    fn extract_string_list(&self, locale: &str) -> Extraction;

    /// Extract the reference list (blank source strings dropped).
    ///
    /// Fails only when the product's file set cannot be determined. Files
    /// that do not parse are left out of the denominator with a warning.
    fn extract_reference(&self) -> Result<Extraction, StatsError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Product {
    /// Firefox desktop.
    Firefox,
    /// Firefox for Android.
    Fenix,
}

impl Product {
    pub const ALL: [Product; 2] = [Product::Firefox, Product::Fenix];

    pub fn name(&self) -> &'static str {
        match self {
            Product::Firefox => "firefox",
            Product::Fenix => "fenix",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Resolve the product's reference file set and build its extractor.
    pub fn load_extractor(
        &self,
        roots: ExtractionRoots,
    ) -> Result<Box<dyn ProductExtractor>, StatsError> {
        Ok(match self {
            Product::Firefox => Box::new(DesktopExtractor::load(roots)?),
            Product::Fenix => Box::new(FenixExtractor::load(roots)?),
        })
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved project files of one product, minus excluded paths.
#[derive(Debug)]
pub(crate) struct FileSet {
    roots: ExtractionRoots,
    files: Vec<ProjectFile>,
    /// Reference files skipped because no parser handles them.
    unsupported: Vec<String>,
}

impl FileSet {
    pub(crate) fn new(
        roots: ExtractionRoots,
        files: Vec<ProjectFile>,
        excluded: impl Fn(&str) -> bool,
    ) -> Self {
        let mut unsupported = Vec::new();
        let files = files
            .into_iter()
            .filter(|file| !excluded(&file.key_scope))
            .filter(|file| {
                let supported =
                    ResourceFormat::for_path(&file.reference, ParseMode::Reference).is_some();
                if !supported {
                    unsupported.push(format!("unsupported resource format: {}", file.key_scope));
                }
                supported
            })
            .collect();
        Self {
            roots,
            files,
            unsupported,
        }
    }

    pub(crate) fn roots(&self) -> &ExtractionRoots {
        &self.roots
    }

    pub(crate) fn files(&self) -> &[ProjectFile] {
        &self.files
    }

    fn is_reference(&self, locale: &str) -> bool {
        locale == self.roots.reference_locale
    }

    /// Where `locale`'s copy of `file` lives, if it can be located at all.
    pub(crate) fn locate(&self, file: &ProjectFile, locale: &str) -> Option<PathBuf> {
        if self.is_reference(locale) {
            Some(file.reference.clone())
        } else {
            file.localized_path(locale, self.roots.l10n_root.as_deref())
        }
    }

    pub(crate) fn extract(&self, locale: &str) -> Extraction {
        let mode = if self.is_reference(locale) {
            ParseMode::Reference
        } else {
            ParseMode::Localized
        };

        let mut extraction = Extraction::default();
        for file in &self.files {
            let Some(path) = self.locate(file, locale) else {
                extraction
                    .warnings
                    .push(format!("{}: no localization root configured", file.key_scope));
                continue;
            };
            if !path.is_file() {
                extraction
                    .warnings
                    .push(format!("missing file {}", path.display()));
                continue;
            }

            match parse_resource(&path, mode) {
                Ok(mut list) => {
                    if !file.ignored_keys.is_empty() {
                        list.retain(|entry| !file.ignored_keys.contains(&entry.id));
                    }
                    extraction.strings.extend(list.qualified(&file.key_scope));
                }
                Err(err) => {
                    extraction.warnings.push(err.to_string());
                    extraction.parse_errors.push(err);
                }
            }
        }
        extraction
    }

    /// Reference extraction: a file that fails to parse contributes no keys
    /// and a warning, like any localized file.
    pub(crate) fn extract_reference(&self) -> Extraction {
        let mut extraction = self.extract(&self.roots.reference_locale);
        extraction.strings.retain_translated();
        extraction.warnings.extend(self.unsupported.iter().cloned());
        extraction
    }
}

/// True when any `/`-separated segment of `path` is one of `names`.
pub(crate) fn has_segment(path: &str, names: &[&str]) -> bool {
    path.split('/').any(|segment| names.contains(&segment))
}
