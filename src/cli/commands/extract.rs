use anyhow::Result;

use super::super::args::ExtractCommand;
use super::{CatalogSummary, CommandContext, CommandResult, CommandSummary, ExtractSummary};
use crate::core::{ExtractOptions, Extracted, Outcome};

pub fn extract(ctx: &CommandContext, cmd: ExtractCommand) -> Result<CommandResult> {
    let catalogs = ctx.catalogs()?;
    let options = ExtractOptions {
        include_obsolete: cmd.include_obsolete,
        localized: cmd.localized,
        paths: cmd.paths,
        include_header: ctx.include_header(cmd.header.include_header),
        locales: cmd.locales,
        use_fuzzy_matching: ctx.fuzzy_matching(cmd.fuzzy_matching),
    };

    let Outcome { value, warnings } = catalogs.extract(&options)?;
    let summary = match value {
        Extracted::Template(template) => ExtractSummary::Template(CatalogSummary::of(&template)),
        Extracted::Localized(updated) => {
            ExtractSummary::Localized(updated.iter().map(CatalogSummary::of).collect())
        }
    };

    Ok(CommandResult::new(CommandSummary::Extract(summary), warnings))
}
