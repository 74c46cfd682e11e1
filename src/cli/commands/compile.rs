use anyhow::Result;

use super::super::args::CompileCommand;
use super::{CommandContext, CommandResult, CommandSummary};

pub fn compile(ctx: &CommandContext, cmd: CompileCommand) -> Result<CommandResult> {
    let outcome = ctx.catalogs()?.compile(cmd.force)?;
    Ok(CommandResult::new(
        CommandSummary::Compile(outcome.value),
        outcome.warnings,
    ))
}
