use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dimensioning::{InstallationParams, SummaryPolicy};

/// Default location of the rules file
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment prefix; `MOTORSIZE__INSTALLATION__RUN_LENGTH_M=120` sets
/// `installation.run_length_m`.
pub const ENV_PREFIX: &str = "MOTORSIZE__";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub installation: InstallationParams,
    pub summary: SummaryPolicy,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let cfg: Config = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("loading sizing rules from {}", path.display()))?;
        cfg.check()?;
        Ok(cfg)
    }

    pub fn check(&self) -> Result<()> {
        self.installation
            .check()
            .context("invalid [installation] section")?;
        self.summary.check().context("invalid [summary] section")?;
        Ok(())
    }
}
