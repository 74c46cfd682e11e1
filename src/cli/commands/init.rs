use anyhow::Result;

use super::super::args::InitCommand;
use super::{CommandContext, CommandResult, CommandSummary};
use crate::pod::Pod;

pub fn init(ctx: &CommandContext, cmd: InitCommand) -> Result<CommandResult> {
    let catalogs = ctx.catalogs()?;
    let locales = if cmd.locales.is_empty() {
        ctx.pod.list_locales()
    } else {
        cmd.locales
    };
    catalogs.validate_locales(&locales);

    let outcome = catalogs.init(&locales, ctx.include_header(cmd.header.include_header))?;
    Ok(CommandResult::new(
        CommandSummary::Init(outcome.value),
        outcome.warnings,
    ))
}
