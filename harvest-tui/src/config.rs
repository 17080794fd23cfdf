use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "harvest-tui";
const ACCOUNT_ID_ENV: &str = "HARVEST_ACCOUNT_ID";
const ACCESS_TOKEN_ENV: &str = "HARVEST_ACCESS_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Harvest account id, sent as the `Harvest-Account-Id` header.
    #[serde(default)]
    pub account_id: String,
    /// Personal access token from https://id.getharvest.com/developers
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Harvest asks API clients to identify themselves with a contact.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.harvestapp.com".to_string()
}

fn default_user_agent() -> String {
    format!("harvest-tui/{}", env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            access_token: String::new(),
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl HarvestConfig {
    fn app_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join(APP_DIR))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.toml"))
    }

    pub fn recents_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("recents.json"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("harvest-tui.log"))
    }

    /// Load config from disk, then apply environment overrides.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::from_toml(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(account_id) = var(ACCOUNT_ID_ENV).filter(|v| !v.trim().is_empty()) {
            self.account_id = account_id.trim().to_string();
        }
        if let Some(token) = var(ACCESS_TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
            self.access_token = token.trim().to_string();
        }
    }

    /// Fail early with a hint when credentials are missing.
    pub fn require_credentials(&self) -> Result<()> {
        if self.account_id.trim().is_empty() || self.access_token.trim().is_empty() {
            let path = Self::config_path()?;
            bail!(
                "Harvest credentials are missing. Set account_id and access_token in {} \
                 or export {} and {}.",
                path.display(),
                ACCOUNT_ID_ENV,
                ACCESS_TOKEN_ENV
            );
        }
        Ok(())
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }
}
