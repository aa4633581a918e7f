use super::{ExtractionRoots, Extraction, FileSet, ProductExtractor, has_segment};
use crate::{core::project::Project, error::StatsError};

pub const PRODUCT: &str = "fenix";
pub const PROJECT_FILES: [&str; 2] = [
    "mobile/android/fenix/l10n.toml",
    "mobile/android/android-components/l10n.toml",
];

const EXCLUDED_DIRS: &[&str] = &["test", "androidTest", "debug"];

/// Firefox for Android: the app and android-components projects. Localized
/// resources live next to the reference in `values-<qualifier>` directories.
#[derive(Debug)]
pub struct FenixExtractor {
    files: FileSet,
    locales: Vec<String>,
}

impl FenixExtractor {
    pub fn load(roots: ExtractionRoots) -> Result<Self, StatsError> {
        let mut paths = Vec::with_capacity(PROJECT_FILES.len());
        for project_file in PROJECT_FILES {
            let path = roots.source_root.join(project_file);
            if !path.is_file() {
                return Err(StatsError::reference(
                    PRODUCT,
                    format!("missing {}", project_file),
                ));
            }
            paths.push(path);
        }

        let project = Project::load(&paths, &roots.source_root)
            .map_err(|e| StatsError::reference(PRODUCT, format!("{:#}", e)))?;
        let locales = project
            .locales
            .into_iter()
            .filter(|locale| *locale != roots.reference_locale)
            .collect();

        let files = FileSet::new(roots, project.files, |scope| {
            has_segment(scope, EXCLUDED_DIRS)
        });
        Ok(Self { files, locales })
    }
}

impl ProductExtractor for FenixExtractor {
    fn product_name(&self) -> &'static str {
        PRODUCT
    }

    fn locales(&self) -> &[String] {
        &self.locales
    }

    fn extract_string_list(&self, locale: &str) -> Extraction {
        let present = self
            .files
            .files()
            .iter()
            .filter_map(|file| self.files.locate(file, locale))
            .any(|path| path.is_file());
        if !present {
            return Extraction::absent(format!("no localized resources for {}", locale));
        }
        self.files.extract(locale)
    }

    fn extract_reference(&self) -> Result<Extraction, StatsError> {
        Ok(self.files.extract_reference())
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            PROJECT_FILES[0],
            r#"
basepath = "."
locales = ["de", "he", "pt-BR"]

[[paths]]
    reference = "app/src/*/res/values/strings.xml"
    l10n = "app/src/*/res/values-{android_locale}/strings.xml"
"#,
        );
        write(
            root,
            PROJECT_FILES[1],
            r#"
basepath = "."
locales = ["de", "it"]

[[paths]]
    reference = "components/**/src/main/res/values/strings.xml"
    l10n = "components/**/src/main/res/values-{android_locale}/strings.xml"
"#,
        );
        write(
            root,
            "mobile/android/fenix/app/src/main/res/values/strings.xml",
            r#"<resources xmlns:tools="http://schemas.android.com/tools">
    <string name="app_name" translatable="false">Firefox</string>
    <string name="search">Search</string>
    <string name="open">Open</string>
</resources>"#,
        );
        write(
            root,
            "mobile/android/fenix/app/src/debug/res/values/strings.xml",
            r#"<resources><string name="debug_only">Debug</string></resources>"#,
        );
        write(
            root,
            "mobile/android/android-components/components/feature/tabs/src/main/res/values/strings.xml",
            r#"<resources><string name="close_tab">Close tab</string></resources>"#,
        );
        write(
            root,
            "mobile/android/fenix/app/src/main/res/values-iw/strings.xml",
            r#"<resources><string name="search">חיפוש</string><string name="open"></string></resources>"#,
        );
        write(
            root,
            "mobile/android/android-components/components/feature/tabs/src/main/res/values-pt-rBR/strings.xml",
            r#"<resources><string name="close_tab">Fechar aba</string></resources>"#,
        );
        dir
    }

    fn roots(root: &Path) -> ExtractionRoots {
        ExtractionRoots {
            source_root: root.to_path_buf(),
            l10n_root: None,
            reference_locale: "en-US".to_string(),
        }
    }

    #[test]
    fn test_locales_are_merged() {
        let dir = fixture();
        let extractor = FenixExtractor::load(roots(dir.path())).unwrap();
        assert_eq!(extractor.locales(), ["de", "he", "pt-BR", "it"]);
    }

    #[test]
    fn test_reference_skips_debug_and_untranslatable() {
        let dir = fixture();
        let extractor = FenixExtractor::load(roots(dir.path())).unwrap();
        let reference = extractor.extract_reference().unwrap();

        let keys: Vec<&String> = reference.strings.keys().collect();
        assert_eq!(
            keys,
            vec![
                "mobile/android/android-components/components/feature/tabs/src/main/res/values/strings.xml:close_tab",
                "mobile/android/fenix/app/src/main/res/values/strings.xml:open",
                "mobile/android/fenix/app/src/main/res/values/strings.xml:search",
            ]
        );
    }

    #[test]
    fn test_android_locale_directories() {
        let dir = fixture();
        let extractor = FenixExtractor::load(roots(dir.path())).unwrap();

        let hebrew = extractor.extract_string_list("he");
        assert!(!hebrew.absent);
        assert_eq!(hebrew.strings.translated_len(), 1);
        assert_eq!(hebrew.strings.len(), 2);

        let portuguese = extractor.extract_string_list("pt-BR");
        assert_eq!(portuguese.strings.translated_len(), 1);
        assert_eq!(portuguese.warnings.len(), 1);
        assert!(portuguese.warnings[0].starts_with("missing file"));
    }

    #[test]
    fn test_absent_locale() {
        let dir = fixture();
        let extractor = FenixExtractor::load(roots(dir.path())).unwrap();
        let extraction = extractor.extract_string_list("it");

        assert!(extraction.absent);
        assert!(extraction.strings.is_empty());
        assert_eq!(extraction.warnings, vec!["no localized resources for it"]);
    }

    #[test]
    fn test_both_project_files_are_required() {
        let dir = fixture();
        fs::remove_file(dir.path().join(PROJECT_FILES[1])).unwrap();
        let err = FenixExtractor::load(roots(dir.path())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot extract reference strings for fenix: missing mobile/android/android-components/l10n.toml"
        );
    }
}
