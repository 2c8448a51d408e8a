use crate::config::{
    ExplorerSettings, DEFAULT_BIND_ADDRESS, DEFAULT_SOURCE_TIMEOUT_SECS,
    DEFAULT_VERIFY_TIMEOUT_SECS,
};
use crate::utils::error::{Result, VerifyError};
use crate::utils::validation::{validate_socket_addr, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub explorer: ExplorerConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorerConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub source_timeout_secs: Option<u64>,
    pub verify_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VerifyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| VerifyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ETHERSCAN_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;

        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| VerifyError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Explorer settings from the file, with defaults for unset keys.
    pub fn explorer_settings(&self) -> ExplorerSettings {
        let explorer = &self.explorer;
        ExplorerSettings {
            api_url: explorer
                .api_url
                .clone()
                .unwrap_or_else(|| ExplorerSettings::default().api_url),
            api_key: explorer
                .api_key
                .clone()
                .filter(|key| !key.is_empty() && !key.starts_with("${")),
            source_timeout_secs: explorer
                .source_timeout_secs
                .unwrap_or(DEFAULT_SOURCE_TIMEOUT_SECS),
            verify_timeout_secs: explorer
                .verify_timeout_secs
                .unwrap_or(DEFAULT_VERIFY_TIMEOUT_SECS),
        }
    }

    pub fn bind_address(&self) -> &str {
        self.server.bind.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.explorer_settings().validate()?;
        validate_socket_addr("server.bind", self.bind_address())
    }
}
