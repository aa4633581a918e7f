use anyhow::Result;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_import_legacy_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("legacy/firefox_146_0.json", r#"{ "de": 0.91234, "fr": 1.0 }"#)?;
    test.write_file("legacy/fenix_140_0.json", r#"{ "de": null, "fr": 87 }"#)?;
    test.write_file("legacy/firefox_147_0.json", r#"{ "de": 1.5 }"#)?;
    test.write_file("legacy/notes.json", r#"{ "de": 0.1 }"#)?;

    let output = test.command().args(["import-legacy", "legacy"]).output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Imported 4 entries from 3 files"));
    assert!(out.contains("ratio out of range"));

    let dataset = test.read_json("stats/completion.json")?;
    assert_eq!(
        dataset,
        json!({
            "de": {
                "name": "de",
                "firefox": { "146.0": 0.9123 },
                "fenix": { "140.0": null }
            },
            "fr": {
                "name": "fr",
                "firefox": { "146.0": 1.0 },
                "fenix": { "140.0": 0.87 }
            }
        })
    );
    Ok(())
}

#[test]
fn test_import_legacy_one_product() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("legacy/firefox_146_0.json", r#"{ "de": 0.5 }"#)?;
    test.write_file("legacy/fenix_140_0.json", r#"{ "de": 95 }"#)?;

    let output = test
        .command()
        .args(["import-legacy", "legacy", "--product", "fenix"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let dataset = test.read_json("stats/completion.json")?;
    assert_eq!(
        dataset,
        json!({ "de": { "name": "de", "fenix": { "140.0": 0.95 } } })
    );
    Ok(())
}

#[test]
fn test_import_legacy_missing_dir() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["import-legacy", "missing"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("does not exist"));
    assert!(!test.root().join("stats/completion.json").exists());
    Ok(())
}
