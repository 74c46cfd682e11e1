use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, msgids, stderr, stdout};

#[test]
fn test_init_config_creates_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init-config"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .podcatrc.json"));

    let content = test.read_file(".podcatrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["translationsRoot"], "/translations");
    assert_eq!(parsed["templatePath"], "/translations/messages.pot");
    assert_eq!(parsed["lineWidth"], 80);

    Ok(())
}

#[test]
fn test_init_config_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".podcatrc.json", "{}")?;

    let output = test.run(&["init-config"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: .podcatrc.json already exists"));
    assert_eq!(test.read_file(".podcatrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_invalid_config_is_error() -> Result<()> {
    let test = CliTest::with_pod()?;
    test.write_file(".podcatrc.json", r#"{"lineWidth": 0}"#)?;

    let output = test.run(&["extract"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));
    assert!(!test.root().join("translations").exists());

    Ok(())
}

#[test]
fn test_config_found_from_working_directory() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".podcatrc.json", r#"{"ignores": ["/views"]}"#)?;
    test.write_file("site/.podcatrc.json", r#"{"ignores": ["/content"]}"#)?;
    test.write_file("site/podspec.yaml", "localization:\n  locales: [de]\n")?;
    test.write_file("site/content/pages/_blueprint.yaml", "{}\n")?;
    test.write_file("site/content/pages/home.yaml", "title@: Hello\n")?;
    test.write_file("site/views/base.html", "{{ _('Welcome') }}\n")?;

    let output = test.run(&["--pod", "site", "extract"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let template = test.read_file("site/translations/messages.pot")?;
    assert_eq!(msgids(&template), vec!["Hello"]);

    Ok(())
}
