use std::path::Path;

use anyhow::Result;

use super::super::args::FilterCommand;
use super::{CommandContext, CommandResult, CommandSummary};
use crate::core::FilterOptions;

pub fn filter(pod_root: &Path, cmd: FilterCommand) -> Result<CommandResult> {
    let mut options = FilterOptions {
        out_path: cmd.out_path,
        out_dir: cmd.out_dir,
        include_obsolete: cmd.include_obsolete,
        localized: cmd.localized,
        paths: cmd.paths,
        include_header: cmd.header.include_header,
        locales: cmd.locales,
    };
    // A bad flag combination is reported even when the pod cannot be opened.
    options.validate()?;

    let ctx = CommandContext::new(pod_root)?;
    options.include_header = ctx.include_header(options.include_header);

    let outcome = ctx.catalogs()?.filter(&options)?;
    Ok(CommandResult::new(
        CommandSummary::Filter(outcome.value),
        outcome.warnings,
    ))
}
