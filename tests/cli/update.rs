use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, msgids, stderr};

fn extracted_pod() -> Result<CliTest> {
    let test = CliTest::with_pod()?;
    test.write_file("content/pages/home.yaml", "title@: Hello\nbody@: Goodbye\n")?;
    let output = test.run(&["extract"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    Ok(test)
}

#[test]
fn test_init_creates_podspec_locales() -> Result<()> {
    let test = extracted_pod()?;

    let output = test.run(&["init"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    for locale in ["de", "fr"] {
        let po = test.read_file(&format!("translations/{}/messages.po", locale))?;
        assert_eq!(msgids(&po), vec!["Hello", "Goodbye"]);
    }

    test.write_file("translations/fr/messages.po", "msgid \"Hello\"\nmsgstr \"Salut\"\n")?;
    test.run(&["init", "fr"])?;
    assert!(test.read_file("translations/fr/messages.po")?.contains("Salut"));

    Ok(())
}

#[test]
fn test_init_without_template_is_error() -> Result<()> {
    let test = CliTest::with_pod()?;

    let output = test.run(&["init", "de"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(!test.root().join("translations/de/messages.po").exists());

    Ok(())
}

#[test]
fn test_update_preserves_translations() -> Result<()> {
    let test = extracted_pod()?;
    test.write_file(
        "translations/fr/messages.po",
        "# Keep it short\nmsgid \"Hello\"\nmsgstr \"Bonjour\"\n\nmsgid \"Removed\"\nmsgstr \"Supprimé\"\n",
    )?;

    let output = test.run(&["update", "fr", "--include-obsolete"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let fr = test.read_file("translations/fr/messages.po")?;
    assert_eq!(msgids(&fr), vec!["Hello", "Goodbye"]);
    assert!(fr.contains("# Keep it short\n"));
    assert!(fr.contains("msgid \"Hello\"\nmsgstr \"Bonjour\"\n"));
    assert!(fr.contains("#~ msgid \"Removed\"\n#~ msgstr \"Supprimé\"\n"));

    Ok(())
}

#[test]
fn test_update_fuzzy_matching() -> Result<()> {
    let test = extracted_pod()?;
    test.write_file("translations/de/messages.po", "msgid \"Goodbye!\"\nmsgstr \"Tschüss!\"\n")?;

    test.run(&["update", "de", "--fuzzy-matching"])?;
    let de = test.read_file("translations/de/messages.po")?;
    assert!(de.contains("#, fuzzy\nmsgid \"Goodbye\"\nmsgstr \"Tschüss!\"\n"));
    assert!(!de.contains("msgid \"Goodbye!\""));

    Ok(())
}

#[test]
fn test_strict_fails_on_malformed_records() -> Result<()> {
    let test = extracted_pod()?;
    test.write_file(
        "translations/de/messages.po",
        "msgstr \"orphan\"\n\nmsgid \"Hello\"\nmsgstr \"Hallo\"\n",
    )?;

    let lenient = test.run(&["update", "de"])?;
    assert_eq!(lenient.status.code(), Some(0));

    test.write_file(
        "translations/de/messages.po",
        "msgstr \"orphan\"\n\nmsgid \"Hello\"\nmsgstr \"Hallo\"\n",
    )?;
    let strict = test.run(&["--strict", "update", "de"])?;
    assert_eq!(strict.status.code(), Some(1));
    assert!(stderr(&strict).contains("Skipped 1 malformed catalog record"));
    assert!(test.read_file("translations/de/messages.po")?.contains("msgstr \"Hallo\""));

    Ok(())
}
