use std::{env, fs};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, InitConfigSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write a default `.podcatrc.json` into the working directory, where
/// commands look it up. An existing file is left alone and reported.
pub fn init_config() -> Result<CommandResult> {
    let cwd = env::current_dir().context("Failed to read the working directory")?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    let created = if config_path.exists() {
        false
    } else {
        fs::write(&config_path, default_config_json()?)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        true
    };

    Ok(CommandResult::new(
        CommandSummary::InitConfig(InitConfigSummary { created }),
        Vec::new(),
    ))
}
