use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

mod chart;
mod export;
mod extract;
mod import_legacy;
mod init;

const BIN_NAME: &str = "l10n-stats";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop the config search at the test directory.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn extract_command(&self, product: &str, version: &str) -> Command {
        let mut cmd = self.command();
        cmd.args(["extract", "--product", product, "--version", version]);
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
    }

    /// Firefox desktop checkout under `firefox/` with its l10n tree under `l10n/`.
    pub fn with_desktop_tree() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(
            ".l10nstatsrc.json",
            r#"{ "sourceRoot": "./firefox", "l10nRoot": "./l10n", "localeNames": { "de": "German" } }"#,
        )?;
        test.write_file(
            "firefox/browser/locales/l10n.toml",
            r#"
basepath = "../.."
locales = ["de", "fr"]

[[paths]]
    reference = "browser/locales/en-US/**"
    l10n = "{l}browser/**"
"#,
        )?;
        test.write_file(
            "firefox/browser/locales/shipped-locales",
            "de\nen-US\nit\n",
        )?;
        test.write_file(
            "firefox/browser/locales/en-US/browser/menu.ftl",
            "menu-file = File\nmenu-edit = Edit\nmenu-view = View\n",
        )?;
        test.write_file(
            "firefox/browser/locales/en-US/chrome/browser/browser.properties",
            "title=Firefox\n",
        )?;
        test.write_file(
            "l10n/de/browser/browser/menu.ftl",
            "menu-file = Datei\nmenu-edit =\n    .label = Bearbeiten\n",
        )?;
        test.write_file(
            "l10n/de/browser/chrome/browser/browser.properties",
            "title=Firefox\n",
        )?;
        Ok(test)
    }

    /// Fenix and android-components resources in one source checkout.
    pub fn with_fenix_tree() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(".l10nstatsrc.json", r#"{ "sourceRoot": "./gecko" }"#)?;
        test.write_file(
            "gecko/mobile/android/fenix/l10n.toml",
            r#"
basepath = "."
locales = ["de", "he"]

[[paths]]
    reference = "app/src/*/res/values/strings.xml"
    l10n = "app/src/*/res/values-{android_locale}/strings.xml"
"#,
        )?;
        test.write_file(
            "gecko/mobile/android/android-components/l10n.toml",
            r#"
basepath = "."
locales = ["de"]

[[paths]]
    reference = "components/**/src/main/res/values/strings.xml"
    l10n = "components/**/src/main/res/values-{android_locale}/strings.xml"
"#,
        )?;
        test.write_file(
            "gecko/mobile/android/fenix/app/src/main/res/values/strings.xml",
            r#"<resources>
    <string name="app_name" translatable="false">Firefox</string>
    <string name="search">Search</string>
    <string name="open">Open</string>
</resources>"#,
        )?;
        test.write_file(
            "gecko/mobile/android/android-components/components/feature/tabs/src/main/res/values/strings.xml",
            r#"<resources><string name="close_tab">Close tab</string></resources>"#,
        )?;
        test.write_file(
            "gecko/mobile/android/fenix/app/src/main/res/values-iw/strings.xml",
            r#"<resources><string name="search">חיפוש</string><string name="open">פתח</string></resources>"#,
        )?;
        Ok(test)
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
