use std::path::Path;

use anyhow::Result;

use super::super::args::ImportCommand;
use super::{CommandContext, CommandResult, CommandSummary};
use crate::core::ImportSource;
use crate::core::importer::require_locale;

pub fn import(pod_root: &Path, cmd: ImportCommand) -> Result<CommandResult> {
    let source = match (cmd.source, cmd.content) {
        (Some(path), _) => ImportSource::Path(path),
        (None, Some(content)) => ImportSource::Content(content),
        (None, None) => anyhow::bail!("Must specify a PO file, a directory, or --content."),
    };
    require_locale(&source, cmd.locale.as_deref())?;

    let ctx = CommandContext::new(pod_root)?;
    let outcome = ctx.catalogs()?.import_translations(
        &source,
        cmd.locale.as_deref(),
        ctx.include_header(cmd.header.include_header),
    )?;
    Ok(CommandResult::new(
        CommandSummary::Import(outcome.value),
        outcome.warnings,
    ))
}
