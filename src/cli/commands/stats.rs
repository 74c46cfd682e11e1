use anyhow::Result;

use super::{CommandContext, CommandResult, CommandSummary};

pub fn stats(ctx: &CommandContext) -> Result<CommandResult> {
    let outcome = ctx.catalogs()?.stats()?;
    Ok(CommandResult::new(
        CommandSummary::Stats(outcome.value),
        outcome.warnings,
    ))
}
