//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Scan the pod and update the template or locale catalogs
//! - `init`: Create locale catalogs from the template
//! - `update`: Merge locale catalogs against the template
//! - `compile`: Build binary catalogs from stale text catalogs
//! - `import`: Copy translations from external PO files
//! - `filter`: Write missing-translation catalogs for translators
//! - `stats`: Show per-locale translation counts
//! - `init-config`: Write a default .podcatrc.json

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Pod root directory
    #[arg(long, global = true, default_value = ".")]
    pub pod: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Exit with status 1 when catalogs contained malformed records
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Header flag shared by every command that writes catalogs.
#[derive(Debug, Clone, Args)]
pub struct HeaderArgs {
    /// Write the catalog header record (overrides config file)
    #[arg(long)]
    pub include_header: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Keep messages no longer found in content, marked obsolete
    #[arg(long)]
    pub include_obsolete: bool,

    /// Update locale catalogs instead of the template
    #[arg(long)]
    pub localized: bool,

    /// Only extract from these pod paths (glob patterns or prefixes)
    #[arg(short, long = "path")]
    pub paths: Vec<String>,

    /// Only update these locales (with --localized)
    #[arg(short, long = "locale")]
    pub locales: Vec<String>,

    /// Carry translations over from similar messages, marked fuzzy
    #[arg(long)]
    pub fuzzy_matching: bool,

    #[command(flatten)]
    pub header: HeaderArgs,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Locales to create (default: the podspec's locales)
    pub locales: Vec<String>,

    #[command(flatten)]
    pub header: HeaderArgs,
}

#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Locales to update (default: every known locale)
    pub locales: Vec<String>,

    /// Carry translations over from similar messages, marked fuzzy
    #[arg(long)]
    pub fuzzy_matching: bool,

    /// Keep messages removed from the template, marked obsolete
    #[arg(long)]
    pub include_obsolete: bool,

    #[command(flatten)]
    pub header: HeaderArgs,
}

#[derive(Debug, Args)]
pub struct CompileCommand {
    /// Compile every catalog, even when up to date
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct ImportCommand {
    /// PO file, or directory of <locale>/messages.po or <locale>.po files
    #[arg(required_unless_present = "content", conflicts_with = "content")]
    pub source: Option<PathBuf>,

    /// PO content to import instead of a file
    #[arg(long)]
    pub content: Option<String>,

    /// Target locale (required for a single file or inline content)
    #[arg(short, long)]
    pub locale: Option<String>,

    #[command(flatten)]
    pub header: HeaderArgs,
}

#[derive(Debug, Args)]
pub struct FilterCommand {
    /// Pod path of the single output catalog
    #[arg(short = 'o', long)]
    pub out_path: Option<String>,

    /// Pod path of the directory receiving <locale>/messages.po (with --localized)
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Write one catalog per locale
    #[arg(long)]
    pub localized: bool,

    /// Keep obsolete messages in the output
    #[arg(long)]
    pub include_obsolete: bool,

    /// Only count messages located under these pod paths
    #[arg(short, long = "path")]
    pub paths: Vec<String>,

    /// Locales to filter (default: every known locale)
    #[arg(short, long = "locale")]
    pub locales: Vec<String>,

    #[command(flatten)]
    pub header: HeaderArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract messages from content, views and podspec
    Extract(ExtractCommand),
    /// Create locale catalogs from the template
    Init(InitCommand),
    /// Update locale catalogs against the template
    Update(UpdateCommand),
    /// Compile text catalogs to binary form
    Compile(CompileCommand),
    /// Import translations from PO files or content
    Import(ImportCommand),
    /// Write catalogs of messages still missing a translation
    Filter(FilterCommand),
    /// Show translation progress per locale
    Stats,
    /// Initialize a new .podcatrc.json configuration file
    InitConfig,
}
