use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, msgids, stderr, stdout};

fn scenario_pod() -> Result<CliTest> {
    let test = CliTest::with_pod()?;
    test.write_file(
        "content/pages/home.yaml",
        "$localization:\n  locales: [fr]\ntitle@: Hello\n",
    )?;
    Ok(test)
}

#[test]
fn test_localized_extract_single_document() -> Result<()> {
    let test = scenario_pod()?;

    let output = test.run(&["extract", "--localized"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let fr = test.read_file("translations/fr/messages.po")?;
    assert_eq!(msgids(&fr), vec!["Hello"]);
    assert!(fr.contains("#: /content/pages/home.yaml:3\nmsgid \"Hello\"\nmsgstr \"\"\n"));
    assert!(!test.root().join("translations/de/messages.po").exists());
    assert!(stdout(&output).contains("Saved /translations/fr/messages.po (0/1 translated)"));

    Ok(())
}

#[test]
fn test_template_extract_single_document() -> Result<()> {
    let test = scenario_pod()?;

    let output = test.run(&["extract"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let template = test.read_file("translations/messages.pot")?;
    assert_eq!(msgids(&template), vec!["Hello"]);
    assert!(template.contains("#: /content/pages/home.yaml:3"));
    assert!(!test.root().join("translations/fr").exists());
    assert!(stderr(&output).contains("Extracting: /content/pages/home.yaml"));

    Ok(())
}

#[test]
fn test_extract_is_idempotent() -> Result<()> {
    let test = scenario_pod()?;
    test.write_file("views/base.html", "<h1>{{ _('Welcome') }}</h1>\n")?;

    test.run(&["extract", "--include-header"])?;
    let first = test.read_file("translations/messages.pot")?;
    test.run(&["extract", "--include-header"])?;
    let second = test.read_file("translations/messages.pot")?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_duplicate_ids_keep_last_location() -> Result<()> {
    let test = scenario_pod()?;
    test.write_file("views/a.html", "{{ _('Shared') }}\n")?;
    test.write_file("views/b.html", "\n{{ _('Shared') }}\n")?;

    test.run(&["extract"])?;
    let template = test.read_file("translations/messages.pot")?;

    assert!(template.contains("#: /views/b.html:2\nmsgid \"Shared\""));
    assert!(!template.contains("/views/a.html"));
    Ok(())
}

#[test]
fn test_malformed_template_writes_nothing() -> Result<()> {
    let test = scenario_pod()?;
    test.write_file("views/broken.html", "{{ _('never closed }}\n")?;

    let output = test.run(&["extract"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("/views/broken.html"));
    assert!(!test.root().join("translations/messages.pot").exists());

    Ok(())
}

#[test]
fn test_ignores_from_config() -> Result<()> {
    let test = scenario_pod()?;
    test.write_file("views/base.html", "{{ _('Welcome') }}\n")?;
    test.write_file(".podcatrc.json", r#"{"ignores": ["/views"]}"#)?;

    test.run(&["extract"])?;
    let template = test.read_file("translations/messages.pot")?;
    assert_eq!(msgids(&template), vec!["Hello"]);

    Ok(())
}

#[test]
fn test_empty_ids_keep_single_header() -> Result<()> {
    let test = CliTest::with_pod()?;
    test.write_file("content/pages/home.yaml", "title@: ''\nbody@: Hello\n")?;
    test.write_file(
        "views/base.html",
        "{{ _('') }}\n{% trans %}Welcome {{ name }}{% endtrans %}\n",
    )?;

    let output = test.run(&["extract", "--include-header"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let template = test.read_file("translations/messages.pot")?;
    assert_eq!(msgids(&template), vec!["Hello", "Welcome %(name)s"]);
    assert_eq!(template.matches("msgid \"\"\n").count(), 1);
    assert!(template.contains("#: /views/base.html:2\nmsgid \"Welcome %(name)s\""));

    let output = test.run(&["init"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        msgids(&test.read_file("translations/de/messages.po")?),
        vec!["Hello", "Welcome %(name)s"]
    );

    Ok(())
}
