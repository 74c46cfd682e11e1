use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, msgids, stderr, stdout};

/// Ten messages, `m3`, `m6` and `m9` untranslated.
fn ten_message_catalog() -> String {
    (1..=10)
        .map(|i| {
            let translation = if i % 3 == 0 {
                String::new()
            } else {
                format!("t{}", i)
            };
            format!(
                "#: /content/pages/p{}.yaml:1\nmsgid \"m{}\"\nmsgstr \"{}\"\n",
                i, i, translation
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_localized_filter_writes_missing_subset() -> Result<()> {
    let test = CliTest::with_pod()?;
    test.write_file("translations/fr/messages.po", &ten_message_catalog())?;

    let output = test.run(&[
        "filter",
        "--localized",
        "--out-dir",
        "/handoff",
        "--locale",
        "fr",
    ])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("fr: 3 missing of 10 -> /handoff/fr/messages.po"));

    let missing = test.read_file("handoff/fr/messages.po")?;
    assert_eq!(msgids(&missing), vec!["m3", "m6", "m9"]);

    Ok(())
}

#[test]
fn test_localized_filter_skips_complete_locales() -> Result<()> {
    let test = CliTest::with_pod()?;
    test.write_file("translations/de/messages.po", "msgid \"a\"\nmsgstr \"A\"\n")?;

    let output = test.run(&["filter", "--localized", "--out-dir", "/handoff", "--locale", "de"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("de: 0 missing of 1 (skipped)"));
    assert!(!test.root().join("handoff/de/messages.po").exists());

    Ok(())
}

#[test]
fn test_unlocalized_filter_writes_union() -> Result<()> {
    let test = CliTest::with_pod()?;
    test.write_file("translations/fr/messages.po", &ten_message_catalog())?;
    test.write_file(
        "translations/de/messages.po",
        "#: /content/pages/p1.yaml:1\nmsgid \"m1\"\nmsgstr \"\"\n\n#: /content/pages/p3.yaml:1\nmsgid \"m3\"\nmsgstr \"\"\n",
    )?;

    let output = test.run(&["filter", "--out-path", "/missing.pot"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("de: 2 missing of 2"));
    assert!(out.contains("fr: 3 missing of 10"));

    let union = test.read_file("missing.pot")?;
    assert_eq!(msgids(&union), vec!["m1", "m3", "m6", "m9"]);
    assert!(!union.contains("msgstr \"t"));

    Ok(())
}

#[test]
fn test_filter_path_restricts_missing() -> Result<()> {
    let test = CliTest::with_pod()?;
    test.write_file("translations/fr/messages.po", &ten_message_catalog())?;

    test.run(&[
        "filter",
        "--localized",
        "--out-dir",
        "/handoff",
        "--path",
        "/content/pages/p6.yaml",
    ])?;
    let missing = test.read_file("handoff/fr/messages.po")?;
    assert_eq!(msgids(&missing), vec!["m6"]);

    Ok(())
}

#[test]
fn test_filter_usage_errors() -> Result<()> {
    let test = CliTest::with_pod()?;

    let output = test.run(&["filter", "--localized"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(
        "Error: Must specify --out-dir when using --localized in order to generate localized catalogs."
    ));

    let output = test.run(&["filter"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Must specify --out-path when not using --localized."));

    assert!(!test.root().join("translations").exists());
    Ok(())
}

#[test]
fn test_usage_errors_come_before_pod_errors() -> Result<()> {
    let test = CliTest::with_pod()?;
    test.write_file("podspec.yaml", "localization: [unclosed\n")?;

    let output = test.run(&["filter", "--localized"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Must specify --out-dir when using --localized"));

    let output = test.run(&["import", "--content", "msgid \"a\"\nmsgstr \"b\"\n"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Must specify a locale when importing inline content."));

    // With valid flags the broken podspec is what fails.
    let output = test.run(&["filter", "--out-path", "/missing.po"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to open pod"));

    Ok(())
}
