use std::{
    collections::{BTreeSet, HashSet},
    fs,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use super::{ExtractionRoots, Extraction, FileSet, ProductExtractor, has_segment};
use crate::{
    core::{
        parsers::{ParseMode, ResourceFormat},
        project::load_project,
    },
    error::StatsError,
};

pub const PRODUCT: &str = "firefox";
pub const PROJECT_FILE: &str = "browser/locales/l10n.toml";
pub const SHIPPED_LOCALES_FILE: &str = "browser/locales/shipped-locales";

const EXCLUDED_DIRS: &[&str] = &["test", "tests"];

/// Firefox desktop: `browser/locales/l10n.toml` plus everything it includes,
/// localized under `<l10n root>/<locale>/`.
#[derive(Debug)]
pub struct DesktopExtractor {
    files: FileSet,
    locales: Vec<String>,
}

impl DesktopExtractor {
    pub fn load(roots: ExtractionRoots) -> Result<Self, StatsError> {
        if roots.l10n_root.is_none() {
            return Err(StatsError::config(
                "firefox extraction needs an l10n root (--l10n-root or \"l10nRoot\")",
            ));
        }

        let project_path = roots.source_root.join(PROJECT_FILE);
        if !project_path.is_file() {
            return Err(StatsError::reference(
                PRODUCT,
                format!("missing {}", PROJECT_FILE),
            ));
        }
        let project = load_project(&project_path, &roots.source_root)
            .map_err(|e| StatsError::reference(PRODUCT, format!("{:#}", e)))?;

        let shipped = read_shipped_locales(&roots.source_root.join(SHIPPED_LOCALES_FILE))?;
        let locales = shipped
            .unwrap_or(project.locales)
            .into_iter()
            .filter(|locale| *locale != roots.reference_locale)
            .collect();

        let files = FileSet::new(roots, project.files, is_excluded);
        Ok(Self { files, locales })
    }

    fn locale_dir(&self, locale: &str) -> Option<PathBuf> {
        self.files
            .roots()
            .l10n_root
            .as_ref()
            .map(|root| root.join(locale))
    }

    /// Localizable files in the locale directory that no reference file maps to.
    fn count_obsolete_files(&self, locale: &str, locale_dir: &Path) -> usize {
        let expected: HashSet<PathBuf> = self
            .files
            .files()
            .iter()
            .filter_map(|file| self.files.locate(file, locale))
            .collect();
        let top_dirs: BTreeSet<PathBuf> = expected
            .iter()
            .filter_map(|path| path.strip_prefix(locale_dir).ok())
            .filter_map(|relative| relative.components().next())
            .map(|first| locale_dir.join(first))
            .collect();

        top_dirs
            .iter()
            .flat_map(|dir| {
                WalkDir::new(dir)
                    .into_iter()
                    .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'))
                    .filter_map(|e| e.ok())
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                ResourceFormat::for_path(entry.path(), ParseMode::Localized).is_some()
            })
            .filter(|entry| !expected.contains(entry.path()))
            .count()
    }
}

impl ProductExtractor for DesktopExtractor {
    fn product_name(&self) -> &'static str {
        PRODUCT
    }

    fn locales(&self) -> &[String] {
        &self.locales
    }

    fn extract_string_list(&self, locale: &str) -> Extraction {
        if locale == self.files.roots().reference_locale {
            return self.files.extract(locale);
        }

        let Some(locale_dir) = self.locale_dir(locale) else {
            return Extraction::absent("no l10n root configured");
        };
        if !locale_dir.is_dir() {
            return Extraction::absent(format!(
                "locale directory {} does not exist",
                locale_dir.display()
            ));
        }

        let mut extraction = self.files.extract(locale);
        let obsolete = self.count_obsolete_files(locale, &locale_dir);
        if obsolete > 0 {
            extraction.warnings.push(format!(
                "{} obsolete file(s) not in the reference set",
                obsolete
            ));
        }
        extraction
    }

    fn extract_reference(&self) -> Result<Extraction, StatsError> {
        Ok(self.files.extract_reference())
    }
}

/// Test directories are never shipped.
fn is_excluded(key_scope: &str) -> bool {
    has_segment(key_scope, EXCLUDED_DIRS)
}

/// First token of every non-empty line; `None` when the file does not exist.
fn read_shipped_locales(path: &Path) -> Result<Option<Vec<String>>, StatsError> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| {
        StatsError::reference(PRODUCT, format!("failed to read {}: {}", path.display(), e))
    })?;
    let mut locales: Vec<String> = Vec::new();
    for locale in content.lines().filter_map(|line| line.split_whitespace().next()) {
        if !locales.iter().any(|l| l == locale) {
            locales.push(locale.to_string());
        }
    }
    Ok(Some(locales))
}
