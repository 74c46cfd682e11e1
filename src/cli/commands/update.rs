use anyhow::Result;

use super::super::args::UpdateCommand;
use super::{CatalogSummary, CommandContext, CommandResult, CommandSummary};
use crate::core::UpdateOptions;

pub fn update(ctx: &CommandContext, cmd: UpdateCommand) -> Result<CommandResult> {
    let catalogs = ctx.catalogs()?;
    let locales = if cmd.locales.is_empty() {
        catalogs.known_locales()?
    } else {
        cmd.locales
    };
    catalogs.validate_locales(&locales);

    let options = UpdateOptions {
        use_fuzzy_matching: ctx.fuzzy_matching(cmd.fuzzy_matching),
        include_obsolete: cmd.include_obsolete,
        include_header: ctx.include_header(cmd.header.include_header),
    };
    let outcome = catalogs.update(&locales, &options)?;
    let summaries = outcome.value.iter().map(CatalogSummary::of).collect();

    Ok(CommandResult::new(
        CommandSummary::Update(summaries),
        outcome.warnings,
    ))
}
