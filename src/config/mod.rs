#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

use crate::adapters::DEFAULT_API_URL;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, VerifyError};
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_VERIFY_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const MAX_TIMEOUT_SECS: u64 = 300;

/// Resolved explorer settings shared by every entry point.
#[derive(Clone, Serialize, Deserialize)]
pub struct ExplorerSettings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub source_timeout_secs: u64,
    pub verify_timeout_secs: u64,
}

impl std::fmt::Debug for ExplorerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerSettings")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("source_timeout_secs", &self.source_timeout_secs)
            .field("verify_timeout_secs", &self.verify_timeout_secs)
            .finish()
    }
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            source_timeout_secs: DEFAULT_SOURCE_TIMEOUT_SECS,
            verify_timeout_secs: DEFAULT_VERIFY_TIMEOUT_SECS,
        }
    }
}

impl ExplorerSettings {
    /// 從環境變數載入 (Lambda 使用)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            api_url: lookup("EXPLORER_API_URL").unwrap_or(defaults.api_url),
            api_key: lookup("ETHERSCAN_API_KEY").filter(|key| !key.is_empty()),
            source_timeout_secs: parse_secs(
                "SOURCE_TIMEOUT_SECS",
                lookup("SOURCE_TIMEOUT_SECS"),
                defaults.source_timeout_secs,
            )?,
            verify_timeout_secs: parse_secs(
                "VERIFY_TIMEOUT_SECS",
                lookup("VERIFY_TIMEOUT_SECS"),
                defaults.verify_timeout_secs,
            )?,
        })
    }
}

fn parse_secs(field: &str, raw: Option<String>, default: u64) -> Result<u64> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| VerifyError::InvalidConfigValueError {
                field: field.to_string(),
                value,
                reason: format!("Expected whole seconds: {}", e),
            }),
    }
}

impl ConfigProvider for ExplorerSettings {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }

    fn verify_timeout(&self) -> Duration {
        Duration::from_secs(self.verify_timeout_secs)
    }
}

impl Validate for ExplorerSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_url)?;
        validate_range("source_timeout_secs", self.source_timeout_secs, 1, MAX_TIMEOUT_SECS)?;
        validate_range("verify_timeout_secs", self.verify_timeout_secs, 1, MAX_TIMEOUT_SECS)?;

        // API key 缺少時不阻擋啟動，由每個請求回報
        if self.api_key.is_none() {
            tracing::warn!("ETHERSCAN_API_KEY is not set; every request will be rejected");
        }

        tracing::debug!("✅ Explorer configuration validation passed");
        Ok(())
    }
}
