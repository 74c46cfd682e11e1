use std::process::ExitCode;

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use commands::{CommandResult, CommandSummary};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let strict = args.strict;

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let result = run::run(args)?;
    report::print(&result);

    Ok(exit_status_from_result(&result, strict).into())
}

/// Map a finished command to its exit status.
///
/// `init-config` on an existing file fails; under `--strict`, so does any
/// command that skipped malformed catalog records.
pub fn exit_status_from_result(result: &CommandResult, strict: bool) -> ExitStatus {
    if let CommandSummary::InitConfig(summary) = &result.summary
        && !summary.created
    {
        return ExitStatus::Failure;
    }
    if strict && !result.warnings.is_empty() {
        return ExitStatus::Failure;
    }
    ExitStatus::Success
}

#[cfg(test)]
mod tests {
    use crate::cli::commands::InitConfigSummary;
    use crate::cli::*;
    use crate::core::InitReport;
    use crate::core::catalog::ParseWarning;

    fn warning() -> ParseWarning {
        ParseWarning {
            path: "/translations/de/messages.po".to_string(),
            line: 4,
            reason: "msgstr without msgid".to_string(),
        }
    }

    #[test]
    fn test_warnings_fail_only_when_strict() {
        let result = CommandResult::new(
            CommandSummary::Init(InitReport::default()),
            vec![warning()],
        );
        assert_eq!(exit_status_from_result(&result, false), ExitStatus::Success);
        assert_eq!(exit_status_from_result(&result, true), ExitStatus::Failure);
    }

    #[test]
    fn test_existing_config_is_failure() {
        let result = CommandResult::new(
            CommandSummary::InitConfig(InitConfigSummary { created: false }),
            Vec::new(),
        );
        assert_eq!(exit_status_from_result(&result, false), ExitStatus::Failure);
    }
}
