use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, msgids, stderr, stdout};

fn pod_with_catalog() -> Result<CliTest> {
    let test = CliTest::with_pod()?;
    test.write_file(
        "translations/fr/messages.po",
        "#: /content/pages/home.yaml:1\n#, fuzzy\nmsgid \"Hello\"\nmsgstr \"Salut\"\n",
    )?;
    Ok(test)
}

#[test]
fn test_import_inline_content() -> Result<()> {
    let test = pod_with_catalog()?;

    let output = test.run(&[
        "import",
        "--content",
        "msgid \"Hello\"\nmsgstr \"Bonjour\"\n\nmsgid \"New\"\nmsgstr \"Nouveau\"\n",
        "--locale",
        "fr",
    ])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("Imported 2 translations into fr"));

    let fr = test.read_file("translations/fr/messages.po")?;
    assert_eq!(msgids(&fr), vec!["Hello", "New"]);
    assert!(fr.contains("#: /content/pages/home.yaml:1\nmsgid \"Hello\"\nmsgstr \"Bonjour\"\n"));
    assert!(!fr.contains("fuzzy"));

    Ok(())
}

#[test]
fn test_import_directory_infers_locales() -> Result<()> {
    let test = pod_with_catalog()?;
    test.write_file("incoming/fr/messages.po", "msgid \"Hello\"\nmsgstr \"Bonjour\"\n")?;
    test.write_file("incoming/de.po", "msgid \"Hello\"\nmsgstr \"Hallo\"\n")?;

    let output = test.run(&["import", "incoming"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    assert!(test.read_file("translations/fr/messages.po")?.contains("msgstr \"Bonjour\""));
    assert!(test.read_file("translations/de/messages.po")?.contains("msgstr \"Hallo\""));

    Ok(())
}

#[test]
fn test_import_file_without_locale_is_error() -> Result<()> {
    let test = pod_with_catalog()?;
    test.write_file("incoming.po", "msgid \"Hello\"\nmsgstr \"Bonjour\"\n")?;

    let output = test.run(&["import", "incoming.po"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Must specify a locale"));
    assert!(test.read_file("translations/fr/messages.po")?.contains("Salut"));

    Ok(())
}
