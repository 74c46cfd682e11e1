use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::catalog::{DEFAULT_LINE_WIDTH, WriteOptions};
use crate::core::scan::DEFAULT_FUNCTION_NAMES;
use crate::utils::is_glob_pattern;

pub const CONFIG_FILE_NAME: &str = ".podcatrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Pod path of the directory holding `<locale>/messages.po`.
    #[serde(default = "default_translations_root")]
    pub translations_root: String,
    #[serde(default = "default_template_path")]
    pub template_path: String,
    #[serde(default = "default_line_width")]
    pub line_width: usize,
    #[serde(default = "default_function_names")]
    pub function_names: Vec<String>,
    /// Pod paths never scanned, as glob patterns or literal prefixes.
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub include_header: bool,
    #[serde(default)]
    pub use_fuzzy_matching: bool,
}

fn default_translations_root() -> String {
    "/translations".to_string()
}

fn default_template_path() -> String {
    "/translations/messages.pot".to_string()
}

fn default_line_width() -> usize {
    DEFAULT_LINE_WIDTH
}

fn default_function_names() -> Vec<String> {
    DEFAULT_FUNCTION_NAMES.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translations_root: default_translations_root(),
            template_path: default_template_path(),
            line_width: default_line_width(),
            function_names: default_function_names(),
            ignores: Vec::new(),
            include_header: false,
            use_fuzzy_matching: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid, if the
    /// line width is zero, or if no message function is configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if is_glob_pattern(pattern) {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
            }
        }
        if self.line_width == 0 {
            bail!("'lineWidth' must be greater than zero");
        }
        if self.function_names.iter().all(|name| name.trim().is_empty()) {
            bail!("'functionNames' must name at least one function");
        }
        Ok(())
    }

    /// Write options for a catalog, with the given header choice.
    pub fn write_options(&self, include_header: bool) -> WriteOptions {
        WriteOptions {
            include_header,
            width: self.line_width,
            ..Default::default()
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
