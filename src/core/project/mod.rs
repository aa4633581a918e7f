//! Reader for `l10n.toml` project files.
//!
//! Both products describe their localizable content with the same format:
//!
//! ```toml
//! basepath = "../.."
//! locales = ["de", "fr"]
//!
//! [[paths]]
//! reference = "browser/locales/en-US/**"
//! l10n = "{l}browser/**"
//!
//! [[includes]]
//! path = "toolkit/locales/l10n.toml"
//!
//! [[filters]]
//! path = "{l}browser/chrome/browser/obsolete.properties"
//! action = "ignore"
//! ```
//!
//! Loading a project resolves every reference file on disk and pairs it with
//! the template of its localized counterpart.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

mod pattern;

pub use pattern::PathPattern;

/// `{l}`: the locale's directory in the localization root, with a trailing `/`.
pub const L10N_DIR_PLACEHOLDER: &str = "{l}";
pub const LOCALE_PLACEHOLDER: &str = "{locale}";
pub const ANDROID_LOCALE_PLACEHOLDER: &str = "{android_locale}";

#[derive(Debug, Deserialize)]
struct RawProject {
    basepath: Option<String>,
    #[serde(default)]
    locales: Vec<String>,
    #[serde(default)]
    paths: Vec<RawPaths>,
    #[serde(default)]
    includes: Vec<RawInclude>,
    #[serde(default)]
    filters: Vec<RawFilter>,
}

#[derive(Debug, Deserialize)]
struct RawPaths {
    reference: Option<String>,
    l10n: String,
}

#[derive(Debug, Deserialize)]
struct RawInclude {
    path: String,
}

#[derive(Debug, Deserialize)]
struct RawFilter {
    path: OneOrMany,
    key: Option<OneOrMany>,
    action: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// An `ignore` filter, bound to the base path of the file declaring it.
#[derive(Debug)]
struct IgnoreFilter {
    basepath: PathBuf,
    paths: Vec<PathPattern>,
    keys: Vec<String>,
}

impl IgnoreFilter {
    fn matches(&self, file: &ProjectFile) -> bool {
        let relative = file
            .reference
            .strip_prefix(&self.basepath)
            .ok()
            .map(to_slash);
        self.paths.iter().any(|pattern| {
            pattern.matches(&file.l10n_template)
                || relative.as_deref().is_some_and(|path| pattern.matches(path))
        })
    }
}

/// One reference file and where its translations live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    /// Reference file on disk.
    pub reference: PathBuf,
    /// Reference path relative to the source root, `/`-separated. Used to
    /// qualify string keys.
    pub key_scope: String,
    /// Localized path with placeholders unexpanded, e.g.
    /// `{l}browser/browser/browser.ftl`.
    pub l10n_template: String,
    /// Base path of the project file that declared this entry.
    pub basepath: PathBuf,
    /// Keys excluded by `ignore` filters.
    pub ignored_keys: BTreeSet<String>,
}

impl ProjectFile {
    /// Expand the l10n template for a locale.
    ///
    /// Returns `None` when the template needs a localization root and none is
    /// configured.
    pub fn localized_path(&self, locale: &str, l10n_root: Option<&Path>) -> Option<PathBuf> {
        let expanded = self
            .l10n_template
            .replace(LOCALE_PLACEHOLDER, locale)
            .replace(ANDROID_LOCALE_PLACEHOLDER, &android_locale(locale));
        match expanded.strip_prefix(L10N_DIR_PLACEHOLDER) {
            Some(rest) => Some(l10n_root?.join(locale).join(rest)),
            None => Some(self.basepath.join(expanded)),
        }
    }
}

/// A fully resolved project: every reference file plus the declared locales.
#[derive(Debug, Default)]
pub struct Project {
    /// Locales declared across all loaded files, in declaration order.
    pub locales: Vec<String>,
    /// Reference files, sorted by path.
    pub files: Vec<ProjectFile>,
}

impl Project {
    /// Load one or more project files into a single project.
    pub fn load(paths: &[PathBuf], source_root: &Path) -> Result<Self> {
        let mut loader = Loader::new(source_root);
        for path in paths {
            loader.load(path)?;
        }
        Ok(loader.finish())
    }
}

/// Load a single `l10n.toml` (and its includes).
pub fn load_project(path: &Path, source_root: &Path) -> Result<Project> {
    Project::load(&[path.to_path_buf()], source_root)
}

struct Loader {
    source_root: PathBuf,
    visited: HashSet<PathBuf>,
    locales: Vec<String>,
    files: BTreeMap<PathBuf, ProjectFile>,
    filters: Vec<IgnoreFilter>,
}

impl Loader {
    fn new(source_root: &Path) -> Self {
        Self {
            source_root: normalize_path(source_root),
            visited: HashSet::new(),
            locales: Vec::new(),
            files: BTreeMap::new(),
            filters: Vec::new(),
        }
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let path = normalize_path(path);
        if !self.visited.insert(path.clone()) {
            return Ok(());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read project file {}", path.display()))?;
        let raw: RawProject = toml::from_str(&content)
            .with_context(|| format!("invalid project file {}", path.display()))?;

        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let basepath = normalize_path(&dir.join(raw.basepath.as_deref().unwrap_or(".")));

        for locale in raw.locales {
            if !self.locales.contains(&locale) {
                self.locales.push(locale);
            }
        }

        for filter in raw.filters {
            if filter.action != "ignore" {
                continue;
            }
            let paths = filter
                .path
                .into_vec()
                .iter()
                .map(|p| PathPattern::new(p))
                .collect::<Result<Vec<_>, _>>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid filter in {}", path.display()))?;
            self.filters.push(IgnoreFilter {
                basepath: basepath.clone(),
                paths,
                keys: filter.key.map(OneOrMany::into_vec).unwrap_or_default(),
            });
        }

        for paths in &raw.paths {
            self.add_paths(&basepath, paths)
                .with_context(|| format!("invalid [[paths]] entry in {}", path.display()))?;
        }

        for include in raw.includes {
            self.load(&basepath.join(&include.path))?;
        }
        Ok(())
    }

    fn add_paths(&mut self, basepath: &Path, raw: &RawPaths) -> Result<()> {
        let Some(reference) = &raw.reference else {
            return Ok(());
        };
        let reference_pattern = PathPattern::new(reference).map_err(anyhow::Error::msg)?;
        let l10n_pattern = PathPattern::new(&raw.l10n).map_err(anyhow::Error::msg)?;

        let pattern = glob_pattern(basepath, reference);
        let entries = glob::glob(&pattern)
            .with_context(|| format!("invalid reference pattern '{}'", reference))?;

        for entry in entries.flatten() {
            if !entry.is_file() {
                continue;
            }
            let Ok(relative) = entry.strip_prefix(basepath) else {
                continue;
            };
            let Some(captures) = reference_pattern.captures(&to_slash(relative)) else {
                continue;
            };
            let Some(l10n_template) = l10n_pattern.substitute(&captures) else {
                bail!(
                    "'{}' and '{}' use different wildcards",
                    reference,
                    raw.l10n
                );
            };

            let key_scope = entry
                .strip_prefix(&self.source_root)
                .map(to_slash)
                .unwrap_or_else(|_| to_slash(&entry));
            self.files.entry(entry.clone()).or_insert(ProjectFile {
                reference: entry,
                key_scope,
                l10n_template,
                basepath: basepath.to_path_buf(),
                ignored_keys: BTreeSet::new(),
            });
        }
        Ok(())
    }

    fn finish(self) -> Project {
        let filters = self.filters;
        let files = self
            .files
            .into_values()
            .filter_map(|mut file| {
                let matching: Vec<&IgnoreFilter> =
                    filters.iter().filter(|f| f.matches(&file)).collect();
                for filter in matching {
                    if filter.keys.is_empty() {
                        return None;
                    }
                    file.ignored_keys.extend(filter.keys.iter().cloned());
                }
                Some(file)
            })
            .collect();
        Project {
            locales: self.locales,
            files,
        }
    }
}

/// Android resource qualifier for a locale code.
///
/// `he`, `id` and `yi` keep their legacy codes; `ll-CC` becomes `ll-rCC`;
/// other multi-part tags use the BCP 47 form `b+ll+Script+CC`.
pub fn android_locale(locale: &str) -> String {
    let parts: Vec<&str> = locale.split('-').collect();
    match parts.as_slice() {
        ["he"] => "iw".to_string(),
        ["id"] => "in".to_string(),
        ["yi"] => "ji".to_string(),
        [language] => language.to_string(),
        [language, region] if region.len() == 2 || region.chars().all(|c| c.is_ascii_digit()) => {
            format!("{}-r{}", language, region)
        }
        _ => format!("b+{}", parts.join("+")),
    }
}

fn glob_pattern(basepath: &Path, reference: &str) -> String {
    // A trailing `**` only yields directories when globbing.
    let reference = if reference.ends_with("**") {
        format!("{}/*", reference)
    } else {
        reference.to_string()
    };
    if basepath.as_os_str().is_empty() {
        reference
    } else {
        format!(
            "{}/{}",
            glob::Pattern::escape(&basepath.to_string_lossy()),
            reference
        )
    }
}

/// `/`-separated form of a relative path.
pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `.` alone normalizes to an empty path.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn desktop_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "browser/locales/l10n.toml",
            r#"
basepath = "../.."
locales = ["de", "fr"]

[[paths]]
    reference = "browser/locales/en-US/**"
    l10n = "{l}browser/**"

[[includes]]
    path = "toolkit/locales/l10n.toml"

[[filters]]
    path = "{l}browser/chrome/browser/obsolete.properties"
    action = "ignore"

[[filters]]
    path = ["{l}browser/browser/menu.ftl"]
    key = ["menu-debug"]
    action = "ignore"

[[filters]]
    path = "{l}browser/browser/menu.ftl"
    key = "menu-error-only"
    action = "error"

[[filters]]
    path = "browser/locales/en-US/browser/menu.ftl"
    key = "menu-trace"
    action = "ignore"
"#,
        );
        write(
            root,
            "toolkit/locales/l10n.toml",
            r#"
basepath = "../.."
locales = ["fr", "it"]

[[paths]]
    reference = "toolkit/locales/en-US/**"
    l10n = "{l}toolkit/**"
"#,
        );
        write(root, "browser/locales/en-US/browser/menu.ftl", "menu-file = File\n");
        write(
            root,
            "browser/locales/en-US/chrome/browser/obsolete.properties",
            "a=b\n",
        );
        write(root, "toolkit/locales/en-US/toolkit/about.ftl", "about = About\n");
        dir
    }

    #[test]
    fn test_load_with_includes_and_filters() {
        let dir = desktop_tree();
        let root = dir.path();
        let project = load_project(&root.join("browser/locales/l10n.toml"), root).unwrap();

        assert_eq!(project.locales, vec!["de", "fr", "it"]);

        let scopes: Vec<&str> = project.files.iter().map(|f| f.key_scope.as_str()).collect();
        assert_eq!(
            scopes,
            vec![
                "browser/locales/en-US/browser/menu.ftl",
                "toolkit/locales/en-US/toolkit/about.ftl"
            ]
        );

        let menu = &project.files[0];
        assert_eq!(menu.l10n_template, "{l}browser/browser/menu.ftl");
        assert_eq!(
            menu.ignored_keys.iter().collect::<Vec<_>>(),
            vec!["menu-debug", "menu-trace"]
        );
    }

    #[test]
    fn test_localized_path_with_l10n_root() {
        let dir = desktop_tree();
        let root = dir.path();
        let project = load_project(&root.join("browser/locales/l10n.toml"), root).unwrap();
        let menu = &project.files[0];

        assert_eq!(
            menu.localized_path("de", Some(Path::new("/l10n"))).unwrap(),
            PathBuf::from("/l10n/de/browser/browser/menu.ftl")
        );
        assert_eq!(menu.localized_path("de", None), None);
    }

    #[test]
    fn test_android_style_paths() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "mobile/android/fenix/l10n.toml",
            r#"
basepath = "."
locales = ["he", "pt-BR"]

[[paths]]
    reference = "app/src/main/res/values/strings.xml"
    l10n = "app/src/main/res/values-{android_locale}/strings.xml"
"#,
        );
        write(
            root,
            "mobile/android/fenix/app/src/main/res/values/strings.xml",
            "<resources/>",
        );

        let project =
            load_project(&root.join("mobile/android/fenix/l10n.toml"), root).unwrap();
        let file = &project.files[0];
        assert_eq!(
            file.key_scope,
            "mobile/android/fenix/app/src/main/res/values/strings.xml"
        );
        assert_eq!(
            file.localized_path("pt-BR", None).unwrap(),
            root.join("mobile/android/fenix/app/src/main/res/values-pt-rBR/strings.xml")
        );
        assert_eq!(
            file.localized_path("he", None).unwrap(),
            root.join("mobile/android/fenix/app/src/main/res/values-iw/strings.xml")
        );
    }

    #[test]
    fn test_include_cycle_is_loaded_once() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "a/l10n.toml",
            "basepath = \"..\"\nlocales = [\"de\"]\n[[includes]]\npath = \"b/l10n.toml\"\n",
        );
        write(
            root,
            "b/l10n.toml",
            "basepath = \"..\"\n[[includes]]\npath = \"a/l10n.toml\"\n",
        );

        let project = load_project(&root.join("a/l10n.toml"), root).unwrap();
        assert_eq!(project.locales, vec!["de"]);
        assert!(project.files.is_empty());
    }

    #[test]
    fn test_missing_project_file() {
        let dir = TempDir::new().unwrap();
        let err = load_project(&dir.path().join("l10n.toml"), dir.path()).unwrap_err();
        assert!(err.to_string().contains("failed to read project file"));
    }

    #[test]
    fn test_android_locale() {
        assert_eq!(android_locale("de"), "de");
        assert_eq!(android_locale("he"), "iw");
        assert_eq!(android_locale("id"), "in");
        assert_eq!(android_locale("yi"), "ji");
        assert_eq!(android_locale("pt-BR"), "pt-rBR");
        assert_eq!(android_locale("es-419"), "es-r419");
        assert_eq!(android_locale("zh-Hant-TW"), "b+zh+Hant+TW");
        assert_eq!(android_locale("sat-Olck"), "b+sat+Olck");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/src/browser/locales/../..")),
            PathBuf::from("/src")
        );
        assert_eq!(normalize_path(Path::new("./a/./b")), PathBuf::from("a/b"));
        assert_eq!(normalize_path(Path::new("../a")), PathBuf::from("../a"));
        assert_eq!(normalize_path(Path::new(".")), PathBuf::new());
    }
}
