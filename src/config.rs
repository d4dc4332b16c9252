use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};

use crate::models::{PrincipalFilter, SsoInstance};

/// Default number of SDK attempts per request, including the first
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Named profile from the shared AWS config files
    pub profile: Option<String>,
    pub region: Option<String>,
    pub instance_arn: Option<String>,
    pub identity_store_id: Option<String>,
    pub max_attempts: Option<u32>,
    /// `USER`, `GROUP` or `ALL`
    pub principal_type: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().context("Could not find config directory")?;
        path.push("ssoreport");
        path.push("config.toml");
        Ok(path)
    }

    /// Pre-resolved Identity Center instance, if both halves are configured
    pub fn instance(&self) -> Result<Option<SsoInstance>> {
        match (&self.instance_arn, &self.identity_store_id) {
            (Some(arn), Some(store)) => Ok(Some(SsoInstance::new(arn, store))),
            (None, None) => Ok(None),
            _ => bail!("instance_arn and identity_store_id must be set together"),
        }
    }

    pub fn principal_filter(&self) -> Result<PrincipalFilter> {
        match &self.principal_type {
            Some(value) => Ok(value.parse()?),
            None => Ok(PrincipalFilter::default()),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS).max(1)
    }

    /// Overlay values set in `other` on top of this config
    pub fn merge(mut self, other: Config) -> Self {
        self.profile = other.profile.or(self.profile);
        self.region = other.region.or(self.region);
        self.instance_arn = other.instance_arn.or(self.instance_arn);
        self.identity_store_id = other.identity_store_id.or(self.identity_store_id);
        self.max_attempts = other.max_attempts.or(self.max_attempts);
        self.principal_type = other.principal_type.or(self.principal_type);
        self
    }
}
