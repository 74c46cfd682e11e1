use std::{env, path::Path};

use anyhow::{Context, Result};
use tracing::debug;

use super::CatalogSummary;
use crate::config::{Config, ConfigLoadResult, load_config};
use crate::core::Catalogs;
use crate::core::catalog::Catalog;
use crate::pod::FsPod;

/// The pod and configuration one command runs against.
pub struct CommandContext {
    pub pod: FsPod,
    pub config: Config,
}

impl CommandContext {
    /// Open the pod at `pod_root`. The config is looked up from the working
    /// directory, so one `.podcatrc.json` can serve several pods.
    pub fn new(pod_root: &Path) -> Result<Self> {
        let pod = FsPod::open(pod_root)
            .with_context(|| format!("Failed to open pod: {}", pod_root.display()))?;
        let cwd = env::current_dir().context("Failed to read the working directory")?;
        let ConfigLoadResult { config, from_file } = load_config(&cwd)?;
        if from_file {
            debug!("Loaded configuration from {}", cwd.display());
        }
        Ok(Self { pod, config })
    }

    pub fn catalogs(&self) -> Result<Catalogs<'_>> {
        Ok(Catalogs::new(&self.pod, &self.config)?)
    }

    /// A set flag wins; otherwise the config decides.
    pub fn include_header(&self, flag: bool) -> bool {
        flag || self.config.include_header
    }

    pub fn fuzzy_matching(&self, flag: bool) -> bool {
        flag || self.config.use_fuzzy_matching
    }
}

impl CatalogSummary {
    pub fn of(catalog: &Catalog) -> Self {
        Self {
            pod_path: catalog.pod_path.clone().unwrap_or_default(),
            translated: catalog.count_translated(),
            total: catalog.count_live(),
        }
    }
}
