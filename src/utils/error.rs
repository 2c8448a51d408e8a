use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Missing ETHERSCAN_API_KEY")]
    MissingApiKey,

    #[error("Missing parameters")]
    MissingParameters,

    #[error("Empty source code")]
    EmptySourceCode,

    /// Explorer 回傳的失敗訊息，原文轉出
    #[error("{message}")]
    Upstream { message: String },

    #[error("{0}")]
    ApiError(reqwest::Error),

    #[error("{0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

impl VerifyError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey
                | Self::ConfigError { .. }
                | Self::InvalidConfigValueError { .. }
                | Self::ConfigValidationError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingParameters => {
                "Request is missing one of: chain, address, sourceChain".to_string()
            }
            Self::ApiError(e) if e.is_timeout() => "Explorer API timed out".to_string(),
            Self::ApiError(e) if e.is_connect() => "Could not reach the explorer API".to_string(),
            Self::Upstream { message } => format!("Explorer rejected the request: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "Set ETHERSCAN_API_KEY or pass --api-key",
            Self::MissingParameters => "Provide --chain, --address and --source-chain",
            Self::EmptySourceCode => "Make sure the contract is verified on the source chain",
            Self::Upstream { .. } => "Check the chain ids and the contract address",
            Self::ApiError(_) => "Check network access and the explorer API URL",
            Self::SerializationError(_) => "The explorer returned an unexpected payload",
            Self::IoError(_) => "Check file paths and permissions",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => "Review the configuration file and flags",
        }
    }
}

// 請求 URL 帶有 apikey，錯誤訊息會回傳給呼叫端，必須先移除
impl From<reqwest::Error> for VerifyError {
    fn from(e: reqwest::Error) -> Self {
        Self::ApiError(e.without_url())
    }
}

pub type Result<T> = std::result::Result<T, VerifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_messages_are_flat() {
        assert_eq!(
            VerifyError::MissingApiKey.to_string(),
            "Missing ETHERSCAN_API_KEY"
        );
        assert_eq!(
            VerifyError::MissingParameters.to_string(),
            "Missing parameters"
        );
        assert_eq!(VerifyError::EmptySourceCode.to_string(), "Empty source code");
        assert_eq!(
            VerifyError::upstream("Invalid API Key").to_string(),
            "Invalid API Key"
        );
    }

    #[test]
    fn test_config_error_classification() {
        assert!(VerifyError::MissingApiKey.is_config_error());
        assert!(VerifyError::ConfigError {
            message: "bad".to_string()
        }
        .is_config_error());
        assert!(!VerifyError::EmptySourceCode.is_config_error());
    }
}
