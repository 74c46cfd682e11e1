use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandContext, CommandResult, compile::compile, extract::extract, filter::filter,
        import::import, init::init, init_config::init_config, stats::stats, update::update,
    },
};

/// Dispatches to the appropriate command handler based on the parsed arguments.
///
/// `filter` and `import` open the pod themselves, after their flags check out.
///
/// # Returns
/// - `Ok(CommandResult)` with the command summary and parse warnings
/// - `Err` if the command fails (e.g. usage error, malformed template, unreadable pod)
pub fn run(Arguments { pod, command, .. }: Arguments) -> Result<CommandResult> {
    let Some(command) = command else {
        anyhow::bail!("No command provided. Use --help to see available commands.");
    };

    let open = || CommandContext::new(&pod);
    match command {
        Command::Extract(cmd) => extract(&open()?, cmd),
        Command::Init(cmd) => init(&open()?, cmd),
        Command::Update(cmd) => update(&open()?, cmd),
        Command::Compile(cmd) => compile(&open()?, cmd),
        Command::Import(cmd) => import(&pod, cmd),
        Command::Filter(cmd) => filter(&pod, cmd),
        Command::Stats => stats(&open()?),
        Command::InitConfig => init_config(),
    }
}
