use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .l10nstatsrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".l10nstatsrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["datasetPath"], "./stats/completion.json");
    assert_eq!(parsed["maxVersions"], 30);
    assert_eq!(parsed["referenceLocale"], "en-US");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".l10nstatsrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ .l10nstatsrc.json already exists

    ----- stderr -----
    ");

    assert_eq!(test.read_file(".l10nstatsrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;

    let output = test.command().args(["chart", "--output", "out.json"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(test.read_file("out.json")?, "{}\n");

    Ok(())
}
