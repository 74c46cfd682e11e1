use std::time::{Duration, SystemTime};

use anyhow::Result;
use filetime::{FileTime, set_file_mtime};

use crate::{CliTest, stderr, stdout};

fn translated_pod() -> Result<CliTest> {
    let test = CliTest::with_pod()?;
    test.write_file(
        "translations/fr/messages.po",
        "msgid \"Hello\"\nmsgstr \"Bonjour\"\n",
    )?;
    Ok(test)
}

#[test]
fn test_compile_writes_binary_catalog() -> Result<()> {
    let test = translated_pod()?;

    let output = test.run(&["compile"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Compiled fr"));
    assert!(out.contains("de has no catalog"));

    let binary = std::fs::read(test.root().join("translations/fr/messages.mo"))?;
    assert_eq!(binary[..4], [0xde, 0x12, 0x04, 0x95]);

    Ok(())
}

#[test]
fn test_compile_skips_fresh_catalogs() -> Result<()> {
    let test = translated_pod()?;
    let text = test.root().join("translations/fr/messages.po");
    let binary = test.root().join("translations/fr/messages.mo");

    test.run(&["compile"])?;
    let now = SystemTime::now();
    set_file_mtime(&text, FileTime::from_system_time(now - Duration::from_secs(60)))?;
    set_file_mtime(&binary, FileTime::from_system_time(now))?;

    let output = test.run(&["compile"])?;
    assert!(stdout(&output).contains("0 compiled, 1 up to date"));

    let output = test.run(&["compile", "--force"])?;
    assert!(stdout(&output).contains("1 compiled, 0 up to date"));

    Ok(())
}

#[test]
fn test_compile_rebuilds_stale_catalogs() -> Result<()> {
    let test = translated_pod()?;
    let text = test.root().join("translations/fr/messages.po");
    let binary = test.root().join("translations/fr/messages.mo");

    test.run(&["compile"])?;
    let now = SystemTime::now();
    set_file_mtime(&binary, FileTime::from_system_time(now - Duration::from_secs(60)))?;
    set_file_mtime(&text, FileTime::from_system_time(now))?;

    let output = test.run(&["compile"])?;
    assert!(stdout(&output).contains("Compiled fr"));

    Ok(())
}
