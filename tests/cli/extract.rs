use anyhow::Result;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_extract_desktop() -> Result<()> {
    let test = CliTest::with_desktop_tree()?;

    let output = test.extract_command("firefox", "147").output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(out.contains("firefox 147.0 (4 reference strings)"));
    assert!(out.contains("✓ 1 locale processed, 1 skipped"));
    assert!(out.contains("skipped: it: locale directory"));

    let dataset = test.read_json("stats/completion.json")?;
    assert_eq!(
        dataset,
        json!({
            "de": { "name": "German", "firefox": { "147.0": 0.75 } },
            "it": { "name": "it", "firefox": { "147.0": 0.0 } }
        })
    );

    Ok(())
}

#[test]
fn test_extract_rerun_is_idempotent() -> Result<()> {
    let test = CliTest::with_desktop_tree()?;

    test.extract_command("firefox", "147.0").output()?;
    let first = test.read_file("stats/completion.json")?;
    test.extract_command("firefox", "147").output()?;
    let second = test.read_file("stats/completion.json")?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_extract_keeps_other_versions() -> Result<()> {
    let test = CliTest::with_desktop_tree()?;

    test.extract_command("firefox", "146").output()?;
    test.write_file(
        "l10n/de/browser/browser/menu.ftl",
        "menu-file = Datei\nmenu-edit = Bearbeiten\nmenu-view = Ansicht\n",
    )?;
    test.extract_command("firefox", "147").output()?;

    let dataset = test.read_json("stats/completion.json")?;
    assert_eq!(dataset["de"]["firefox"], json!({ "146.0": 0.75, "147.0": 1.0 }));
    Ok(())
}

#[test]
fn test_extract_fenix() -> Result<()> {
    let test = CliTest::with_fenix_tree()?;

    let output = test.extract_command("fenix", "140.1").output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("fenix 140.0 (3 reference strings)"));

    let dataset = test.read_json("stats/completion.json")?;
    assert_eq!(dataset["he"]["fenix"], json!({ "140.0": 0.6667 }));
    assert_eq!(dataset["de"]["fenix"], json!({ "140.0": 0.0 }));
    Ok(())
}

#[test]
fn test_extract_rejects_invalid_version() -> Result<()> {
    let test = CliTest::with_desktop_tree()?;

    let output = test.extract_command("firefox", "nightly").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));
    assert!(!test.root().join("stats/completion.json").exists());
    Ok(())
}

#[test]
fn test_extract_without_source_root() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command("firefox", "147").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("no source root configured"));
    Ok(())
}

#[test]
fn test_extract_skips_malformed_reference_file() -> Result<()> {
    let test = CliTest::with_desktop_tree()?;
    test.write_file(
        "firefox/browser/locales/en-US/chrome/browser/crash.ini",
        "[Strings]\nnot a pair\n",
    )?;

    let output = test.extract_command("firefox", "147").output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("firefox 147.0 (4 reference strings)"));
    assert!(stderr(&output).contains("crash.ini"));

    let dataset = test.read_json("stats/completion.json")?;
    assert_eq!(dataset["de"]["firefox"], json!({ "147.0": 0.75 }));
    Ok(())
}

#[test]
fn test_extract_missing_project_file_writes_nothing() -> Result<()> {
    let test = CliTest::with_desktop_tree()?;
    std::fs::remove_file(test.root().join("firefox/browser/locales/l10n.toml"))?;

    let output = test.extract_command("firefox", "147").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("missing browser/locales/l10n.toml"));
    assert!(!test.root().join("stats/completion.json").exists());
    Ok(())
}

#[test]
fn test_extract_locked_dataset() -> Result<()> {
    let test = CliTest::with_desktop_tree()?;
    test.write_file("stats/completion.json", "{}\n")?;

    let lock = std::fs::File::create(test.root().join("stats/completion.json.lock"))?;
    lock.lock()?;

    let output = test.extract_command("firefox", "147").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(test.read_file("stats/completion.json")?, "{}\n");

    lock.unlock()?;
    Ok(())
}
