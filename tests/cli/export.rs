use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_export_csv() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "stats/completion.json",
        r#"{
  "de": { "name": "German", "firefox": { "146.0": 0.9, "147.0": null } },
  "fr": { "name": "French", "firefox": { "147.0": 1.0 }, "fenix": { "140.0": 0.5 } }
}
"#,
    )?;

    let output = test
        .command()
        .args(["export", "--product", "firefox"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Exported 2 firefox rows"));

    insta::assert_snapshot!(test.read_file("stats/firefox_completion.csv")?.trim_end(), @r"
    locale,version,completion
    de,146.0,90.00
    fr,147.0,100.00
    ");
    Ok(())
}

#[test]
fn test_export_without_rows() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .command()
        .args(["export", "--product", "fenix", "--output", "fenix.csv"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(test.read_file("fenix.csv")?, "locale,version,completion\n");
    Ok(())
}
