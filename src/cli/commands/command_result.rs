use crate::core::catalog::ParseWarning;
use crate::core::{CompileReport, FilterReport, ImportReport, InitReport, LocaleStats};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Init(InitReport),
    Update(Vec<CatalogSummary>),
    Compile(CompileReport),
    Import(Vec<ImportReport>),
    Filter(FilterReport),
    Stats(Vec<LocaleStats>),
    InitConfig(InitConfigSummary),
}

/// Counts of one saved catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub pod_path: String,
    pub translated: usize,
    pub total: usize,
}

#[derive(Debug)]
pub enum ExtractSummary {
    Template(CatalogSummary),
    Localized(Vec<CatalogSummary>),
}

#[derive(Debug)]
pub struct InitConfigSummary {
    pub created: bool,
}

/// Result of running podcat commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Malformed catalog records skipped while loading.
    pub warnings: Vec<ParseWarning>,
}

impl CommandResult {
    pub fn new(summary: CommandSummary, warnings: Vec<ParseWarning>) -> Self {
        Self { summary, warnings }
    }
}
