use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod compile;
mod extract;
mod filter;
mod import;
mod init_config;
mod update;

const BIN_NAME: &str = "podcat";

pub struct CliTest {
    _temp_dir: TempDir,
    pod_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let pod_dir = temp_dir.path().canonicalize()?;
        // Stops the config lookup from walking above the pod.
        fs::create_dir(pod_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            pod_dir,
        })
    }

    /// A pod with a `pages` collection and the podspec locales `de` and `fr`.
    pub fn with_pod() -> Result<Self> {
        let test = Self::new()?;
        test.write_file("podspec.yaml", "localization:\n  locales: [de, fr]\n")?;
        test.write_file("content/pages/_blueprint.yaml", "{}\n")?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.pod_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.pod_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.pod_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Result<Output> {
        self.command()
            .args(args)
            .output()
            .with_context(|| format!("Failed to run {} {:?}", BIN_NAME, args))
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.pod_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// The `msgid` values of a PO file, in file order, header excluded.
pub fn msgids(po: &str) -> Vec<String> {
    po.lines()
        .filter_map(|line| line.strip_prefix("msgid \""))
        .filter_map(|rest| rest.strip_suffix('"'))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
