use anyhow::Result;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

const DATASET: &str = r#"{
  "de": {
    "name": "de",
    "firefox": { "145.0": 0.9, "146.0": null, "147.0": 0.95 },
    "fenix": { "140.0": 0.8 }
  },
  "fr": {
    "name": "French",
    "firefox": { "147.0": 1.0 }
  }
}
"#;

#[test]
fn test_chart_writes_configured_path() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".l10nstatsrc.json",
        r#"{ "chartPath": "./site/data.json", "localeNames": { "de": "German" } }"#,
    )?;
    test.write_file("stats/completion.json", DATASET)?;

    let output = test.command().arg("chart").output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Wrote chart data for 2 locales"));

    let chart = test.read_json("site/data.json")?;
    assert_eq!(
        chart,
        json!({
            "de": {
                "name": "German",
                "firefox": { "145.0": 0.9, "147.0": 0.95 },
                "fenix": { "140.0": 0.8 }
            },
            "fr": {
                "name": "French",
                "firefox": { "147.0": 1.0 },
                "fenix": {}
            }
        })
    );
    Ok(())
}

#[test]
fn test_chart_window_ends_at_version() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("stats/completion.json", DATASET)?;

    let output = test
        .command()
        .args(["chart", "--version", "146", "--output", "out.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let chart = test.read_json("out.json")?;
    assert_eq!(chart["de"]["firefox"], json!({ "145.0": 0.9 }));
    assert_eq!(chart["fr"]["firefox"], json!({}));
    Ok(())
}

#[test]
fn test_chart_empty_dataset() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["chart", "--output", "out.json"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Dataset is empty"));
    assert_eq!(test.read_file("out.json")?, "{}\n");
    Ok(())
}

#[test]
fn test_chart_rejects_malformed_dataset() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("stats/completion.json", "{ not json")?;

    let output = test.command().arg("chart").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));
    Ok(())
}
