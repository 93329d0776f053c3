use crate::core::affordability::AffordabilityPolicy;
use crate::core::offer::Item;
use crate::core::profile::FinancialProfile;
use crate::core::tax::TaxRuleSet;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_ttl_minutes() -> u64 {
    15
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RateProviderConfig {
    pub base_url: String,
    /// Freshness window for cached exchange rates.
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
    /// Upper bound on a single upstream fetch.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RateProviderConfig {
    fn default() -> Self {
        RateProviderConfig {
            base_url: "https://economia.awesomeapi.com.br".to_string(),
            ttl_minutes: default_ttl_minutes(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// A purchase project: a named group of items the user is saving for.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Local currency all comparisons are made in.
    pub currency: String,
    pub profile: FinancialProfile,
    #[serde(default)]
    pub provider: RateProviderConfig,
    #[serde(default)]
    pub tax: TaxRuleSet,
    #[serde(default)]
    pub policy: AffordabilityPolicy,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fsniper", "fsniper")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Finds an item by name across all projects, case-insensitively.
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.projects
            .iter()
            .flat_map(|p| p.items.iter())
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }
}
