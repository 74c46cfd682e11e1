//! Command summaries printed for the user.
//!
//! Summaries go to stdout. Problems (skipped records, an existing config
//! file) go to stderr. Separate from the engine so podcat can be used as a
//! library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CatalogSummary, CommandResult, CommandSummary, ExtractSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::catalog::ParseWarning;
use crate::core::{CompileReport, FilterReport, ImportReport, InitReport, LocaleStats};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    let stdout = &mut io::stdout().lock();
    let stderr = &mut io::stderr().lock();
    print_to(result, stdout, stderr);
}

/// Print a command result to custom writers.
pub fn print_to<W: Write, E: Write>(result: &CommandResult, out: &mut W, err: &mut E) {
    match &result.summary {
        CommandSummary::Extract(ExtractSummary::Template(template)) => {
            print_saved_template(template, out)
        }
        CommandSummary::Extract(ExtractSummary::Localized(updated))
        | CommandSummary::Update(updated) => print_saved_catalogs(updated, out),
        CommandSummary::Init(report) => print_init(report, out),
        CommandSummary::Compile(report) => print_compile(report, out),
        CommandSummary::Import(reports) => print_import(reports, out),
        CommandSummary::Filter(report) => print_filter(report, out),
        CommandSummary::Stats(stats) => print_stats(stats, out),
        CommandSummary::InitConfig(summary) => {
            if summary.created {
                let _ = writeln!(
                    out,
                    "{} {}",
                    SUCCESS_MARK.green(),
                    format!("Created {}", CONFIG_FILE_NAME).green()
                );
            } else {
                let _ = writeln!(err, "Error: {} already exists", CONFIG_FILE_NAME);
            }
        }
    }

    print_warnings(&result.warnings, err);
}

fn print_saved_template<W: Write>(template: &CatalogSummary, out: &mut W) {
    let _ = writeln!(
        out,
        "{} Saved {} ({} messages)",
        SUCCESS_MARK.green(),
        template.pod_path,
        template.total
    );
}

fn print_saved_catalogs<W: Write>(catalogs: &[CatalogSummary], out: &mut W) {
    if catalogs.is_empty() {
        let _ = writeln!(out, "No locale catalogs to update.");
        return;
    }
    for catalog in catalogs {
        let _ = writeln!(
            out,
            "{} Saved {} ({}/{} translated)",
            SUCCESS_MARK.green(),
            catalog.pod_path,
            catalog.translated,
            catalog.total
        );
    }
}

fn print_init<W: Write>(report: &InitReport, out: &mut W) {
    for locale in &report.created {
        let _ = writeln!(out, "{} Created catalog for {}", SUCCESS_MARK.green(), locale);
    }
    for locale in &report.skipped {
        let _ = writeln!(
            out,
            "{}",
            format!("Skipped {} (catalog already exists)", locale).dimmed()
        );
    }
}

fn print_compile<W: Write>(report: &CompileReport, out: &mut W) {
    for locale in &report.compiled {
        let _ = writeln!(out, "{} Compiled {}", SUCCESS_MARK.green(), locale);
    }
    for locale in &report.missing {
        let _ = writeln!(
            out,
            "{} {} has no catalog",
            FAILURE_MARK.yellow(),
            locale
        );
    }
    let _ = writeln!(
        out,
        "{} compiled, {} up to date",
        report.compiled.len(),
        report.up_to_date.len()
    );
}

fn print_import<W: Write>(reports: &[ImportReport], out: &mut W) {
    for report in reports {
        let _ = writeln!(
            out,
            "{} Imported {} translations into {} from {}",
            SUCCESS_MARK.green(),
            report.imported,
            report.locale,
            report.source
        );
    }
}

fn print_filter<W: Write>(report: &FilterReport, out: &mut W) {
    for (subset, out_path) in &report.subsets {
        let counts = format!("{} missing of {}", subset.missing(), subset.total);
        match out_path {
            Some(path) if subset.missing() > 0 => {
                let _ = writeln!(out, "{}: {} -> {}", subset.locale, counts, path);
            }
            Some(_) => {
                let _ = writeln!(out, "{}", format!("{}: {} (skipped)", subset.locale, counts).dimmed());
            }
            None => {
                let _ = writeln!(out, "{}: {}", subset.locale, counts);
            }
        }
    }
    if let Some((template, path)) = &report.template {
        let _ = writeln!(
            out,
            "{} Saved {} ({} messages)",
            SUCCESS_MARK.green(),
            path,
            template.len()
        );
    }
}

fn print_stats<W: Write>(stats: &[LocaleStats], out: &mut W) {
    if stats.is_empty() {
        let _ = writeln!(out, "No locales found.");
        return;
    }

    let width = stats
        .iter()
        .map(|s| UnicodeWidthStr::width(s.locale.as_str()))
        .max()
        .unwrap_or(0);

    for s in stats {
        let padding = " ".repeat(width - UnicodeWidthStr::width(s.locale.as_str()));
        let percent = if s.total == 0 {
            100
        } else {
            s.translated * 100 / s.total
        };
        let line = format!(
            "{}{}  {:>3}%  {}/{} translated, {} fuzzy, {} untranslated",
            s.locale, padding, percent, s.translated, s.total, s.fuzzy, s.untranslated
        );
        if s.untranslated == 0 {
            let _ = writeln!(out, "{}", line.green());
        } else {
            let _ = writeln!(out, "{}", line);
        }
    }
}

fn print_warnings<W: Write>(warnings: &[ParseWarning], err: &mut W) {
    if warnings.is_empty() {
        return;
    }
    let _ = writeln!(
        err,
        "{} Skipped {} malformed catalog record{}",
        FAILURE_MARK.yellow(),
        warnings.len(),
        if warnings.len() == 1 { "" } else { "s" }
    );
}
